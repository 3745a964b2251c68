//! Sensor channel and event flag identifiers.
//!
//! These are the canonical key names used on the wire and by the external
//! monitoring API. The declaration order of [`Channel::ALL`] is the table
//! order used by every profile.

use std::fmt;

/// Number of numeric channels in a snapshot.
pub const CHANNEL_COUNT: usize = 13;

/// Number of boolean event flags in a snapshot.
pub const EVENT_COUNT: usize = 3;

/// Whether a channel carries a float or an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Rendered with exactly two decimal places.
    Float,
    /// Rendered with no decimal point.
    Int,
}

/// A single named numeric sensor measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    FurnaceTemp,
    EnvHumid,
    LightLevel,
    GasMethane,
    GasCo,
    MachineSound,
    TankPressure,
    MainCurrent,
    EngineVibe,
    InputVoltage,
    ConveyorDist,
    WaterLeak,
    CoolantValve,
}

impl Channel {
    /// All channels in table order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::FurnaceTemp,
        Channel::EnvHumid,
        Channel::LightLevel,
        Channel::GasMethane,
        Channel::GasCo,
        Channel::MachineSound,
        Channel::TankPressure,
        Channel::MainCurrent,
        Channel::EngineVibe,
        Channel::InputVoltage,
        Channel::ConveyorDist,
        Channel::WaterLeak,
        Channel::CoolantValve,
    ];

    /// Wire key, e.g. `Furnace_Temp`.
    pub const fn key(self) -> &'static str {
        match self {
            Channel::FurnaceTemp => "Furnace_Temp",
            Channel::EnvHumid => "Env_Humid",
            Channel::LightLevel => "Light_Level",
            Channel::GasMethane => "Gas_Methane",
            Channel::GasCo => "Gas_CO",
            Channel::MachineSound => "Machine_Sound",
            Channel::TankPressure => "Tank_Pressure",
            Channel::MainCurrent => "Main_Current",
            Channel::EngineVibe => "Engine_Vibe",
            Channel::InputVoltage => "Input_Voltage",
            Channel::ConveyorDist => "Conveyor_Dist",
            Channel::WaterLeak => "Water_Leak",
            Channel::CoolantValve => "Coolant_Valve",
        }
    }

    pub const fn kind(self) -> ChannelKind {
        match self {
            Channel::FurnaceTemp | Channel::EnvHumid => ChannelKind::Float,
            _ => ChannelKind::Int,
        }
    }

    /// Look up a channel by its exact wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Position in [`Channel::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A boolean channel representing a rare critical condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFlag {
    Flame,
    GateOpen,
    EmergencyStop,
}

impl EventFlag {
    pub const ALL: [EventFlag; EVENT_COUNT] =
        [EventFlag::Flame, EventFlag::GateOpen, EventFlag::EmergencyStop];

    pub const fn key(self) -> &'static str {
        match self {
            EventFlag::Flame => "Flame_Status",
            EventFlag::GateOpen => "Gate_Status",
            EventFlag::EmergencyStop => "E_Stop_Button",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.key() == key)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A typed channel value.
///
/// `Display` produces the wire formatting: two decimals for floats, plain
/// digits for integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Float(f64),
    Int(i64),
}

impl Reading {
    pub fn as_f64(self) -> f64 {
        match self {
            Reading::Float(v) => v,
            Reading::Int(v) => v as f64,
        }
    }

    pub const fn kind(self) -> ChannelKind {
        match self {
            Reading::Float(_) => ChannelKind::Float,
            Reading::Int(_) => ChannelKind::Int,
        }
    }

    /// Build a reading of the given kind, rounding to the nearest integer
    /// for [`ChannelKind::Int`].
    pub fn of_kind(kind: ChannelKind, value: f64) -> Self {
        match kind {
            ChannelKind::Float => Reading::Float(value),
            ChannelKind::Int => Reading::Int(value.round() as i64),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Float(v) => write!(f, "{v:.2}"),
            Reading::Int(v) => write!(f, "{v}"),
        }
    }
}
