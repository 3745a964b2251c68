//! Two-line wire text codec.
//!
//! ```text
//! Smart Factory Monitoring System - AUTOMATIC MODE - ONLINE
//! Furnace_Temp:850.00,Env_Humid:50.00,Light_Level:200,...,Coolant_Valve:85
//! ```
//!
//! The first line is a fixed header; the second is comma-separated
//! `Key:Value` pairs in [`WIRE_ORDER`]. Floats carry exactly two decimals,
//! integers and flags carry none.

use std::fmt::Write as _;

use crate::channel::{Channel, ChannelKind, EventFlag, Reading, CHANNEL_COUNT, EVENT_COUNT};
use crate::snapshot::{EventFlags, SensorSnapshot};

pub use crate::error::WireError;

/// Header line emitted by the generator.
pub const HEADER: &str = "Smart Factory Monitoring System - AUTOMATIC MODE - ONLINE";

/// One key on the data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Channel(Channel),
    Event(EventFlag),
}

impl Field {
    pub const fn key(self) -> &'static str {
        match self {
            Field::Channel(c) => c.key(),
            Field::Event(e) => e.key(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Channel::from_key(key)
            .map(Field::Channel)
            .or_else(|| EventFlag::from_key(key).map(Field::Event))
    }
}

/// Key order of the data line. Coolant_Valve trails the event flags.
pub const WIRE_ORDER: [Field; CHANNEL_COUNT + EVENT_COUNT] = [
    Field::Channel(Channel::FurnaceTemp),
    Field::Channel(Channel::EnvHumid),
    Field::Channel(Channel::LightLevel),
    Field::Channel(Channel::GasMethane),
    Field::Channel(Channel::GasCo),
    Field::Channel(Channel::MachineSound),
    Field::Channel(Channel::TankPressure),
    Field::Channel(Channel::MainCurrent),
    Field::Channel(Channel::EngineVibe),
    Field::Channel(Channel::InputVoltage),
    Field::Channel(Channel::ConveyorDist),
    Field::Channel(Channel::WaterLeak),
    Field::Event(EventFlag::Flame),
    Field::Event(EventFlag::GateOpen),
    Field::Event(EventFlag::EmergencyStop),
    Field::Channel(Channel::CoolantValve),
];

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the data line (no header).
pub fn render_data_line(snapshot: &SensorSnapshot) -> String {
    let mut line = String::with_capacity(320);
    for (i, field) in WIRE_ORDER.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        // Writing to a String cannot fail.
        let _ = match *field {
            Field::Channel(c) => write!(line, "{}:{}", c.key(), snapshot.get(c)),
            Field::Event(e) => write!(line, "{}:{}", e.key(), u8::from(snapshot.is_set(e))),
        };
    }
    line
}

/// Render the full two-line wire text, joined by a single `\n`.
pub fn render(snapshot: &SensorSnapshot) -> String {
    format!("{HEADER}\n{}", render_data_line(snapshot))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Operating mode announced in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Automatic,
    Manual,
}

/// System status announced in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    Online,
    Offline,
}

/// Parsed wire text.
///
/// Parsing is lenient per pair: a segment without `:` or a value that does
/// not parse for its key is skipped and recorded in `rejected`, and a
/// repeated key overwrites the earlier value. Individual fields may
/// therefore be absent; [`WireFrame::into_snapshot`] demands all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct WireFrame {
    pub mode: Option<Mode>,
    pub status: Option<SystemStatus>,
    readings: [Option<Reading>; CHANNEL_COUNT],
    events: [Option<bool>; EVENT_COUNT],
    /// Keys on the data line that are not part of the known field set.
    pub unrecognized: Vec<String>,
    /// Pairs skipped because they were malformed or carried a bad value,
    /// in data-line order.
    pub rejected: Vec<WireError>,
}

impl WireFrame {
    pub fn parse(text: &str) -> Result<Self, WireError> {
        let mut lines = text
            .split('\n')
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty());

        let header = lines.next().ok_or(WireError::MissingDataLine)?;
        let data = lines.next().ok_or(WireError::MissingDataLine)?;

        let mut frame = WireFrame {
            mode: parse_mode(header),
            status: parse_status(header),
            readings: [None; CHANNEL_COUNT],
            events: [None; EVENT_COUNT],
            unrecognized: Vec::new(),
            rejected: Vec::new(),
        };

        for pair in data.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once(':') else {
                frame.rejected.push(WireError::MalformedPair(pair.to_string()));
                continue;
            };
            if let Err(e) = frame.insert(key.trim(), value.trim()) {
                frame.rejected.push(e);
            }
        }

        Ok(frame)
    }

    /// Store one pair. Later values for the same key replace earlier ones.
    fn insert(&mut self, key: &str, value: &str) -> Result<(), WireError> {
        let Some(field) = Field::from_key(key) else {
            self.unrecognized.push(key.to_string());
            return Ok(());
        };

        match field {
            Field::Channel(channel) => {
                self.readings[channel.index()] = Some(parse_reading(channel, value)?);
            }
            Field::Event(flag) => {
                self.events[flag.index()] = Some(parse_flag(flag, value)?);
            }
        }
        Ok(())
    }

    pub fn reading(&self, channel: Channel) -> Option<Reading> {
        self.readings[channel.index()]
    }

    pub fn event(&self, flag: EventFlag) -> Option<bool> {
        self.events[flag.index()]
    }

    /// Known keys present on the data line, in wire order.
    pub fn present_keys(&self) -> Vec<&'static str> {
        WIRE_ORDER
            .into_iter()
            .filter(|field| self.has(*field))
            .map(Field::key)
            .collect()
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Channel(c) => self.reading(c).is_some(),
            Field::Event(e) => self.event(e).is_some(),
        }
    }

    /// Convert into a snapshot, failing on the first missing field in wire
    /// order. A field that is missing because its value was rejected
    /// reports the rejection instead.
    pub fn into_snapshot(self) -> Result<SensorSnapshot, WireError> {
        if let Some(missing) = WIRE_ORDER.into_iter().find(|field| !self.has(*field)) {
            let key = missing.key();
            let rejection = self
                .rejected
                .into_iter()
                .rev()
                .find(|e| matches!(e, WireError::InvalidValue { key: k, .. } if *k == key));
            return Err(rejection.unwrap_or(WireError::MissingField(key)));
        }

        let readings = self.readings.map(|r| r.unwrap_or(Reading::Int(0)));
        let events = EventFlags::from_array(self.events.map(|e| e.unwrap_or(false)));
        Ok(SensorSnapshot::from_parts(readings, events))
    }
}

/// Parse wire text straight into a snapshot.
pub fn parse_snapshot(text: &str) -> Result<SensorSnapshot, WireError> {
    WireFrame::parse(text)?.into_snapshot()
}

fn parse_reading(channel: Channel, value: &str) -> Result<Reading, WireError> {
    let invalid = || WireError::InvalidValue {
        key: channel.key(),
        value: value.to_string(),
    };
    match channel.kind() {
        ChannelKind::Float => {
            let v: f64 = value.parse().map_err(|_| invalid())?;
            if !v.is_finite() {
                return Err(invalid());
            }
            Ok(Reading::Float(v))
        }
        ChannelKind::Int => value.parse().map(Reading::Int).map_err(|_| invalid()),
    }
}

/// Flags accept exactly `0` or `1`.
fn parse_flag(flag: EventFlag, value: &str) -> Result<bool, WireError> {
    match value.parse::<i64>() {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(WireError::InvalidValue {
            key: flag.key(),
            value: value.to_string(),
        }),
    }
}

fn parse_mode(header: &str) -> Option<Mode> {
    if header.contains("AUTOMATIC MODE") {
        Some(Mode::Automatic)
    } else if header.contains("MANUAL MODE") {
        Some(Mode::Manual)
    } else {
        None
    }
}

fn parse_status(header: &str) -> Option<SystemStatus> {
    if header.contains("OFFLINE") {
        Some(SystemStatus::Offline)
    } else if header.contains("ONLINE") {
        Some(SystemStatus::Online)
    } else {
        None
    }
}
