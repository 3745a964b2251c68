//! Advisory status markers for console display.
//!
//! Not part of the wire contract; the monitoring API applies its own
//! alarm rules.

use std::fmt;

use crate::channel::{Channel, EventFlag};
use crate::snapshot::SensorSnapshot;

/// Methane level (ppm) above which a warning marker is shown.
pub const METHANE_WARNING_PPM: f64 = 300.0;

/// Tank pressure above which a warning marker is shown.
pub const PRESSURE_WARNING: f64 = 90.0;

/// Shown when no marker applies.
pub const NORMAL_GLYPH: &str = "✅";

/// A single independent severity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Flame,
    GateOpen,
    EmergencyStop,
    MethaneHigh,
    PressureHigh,
}

impl Marker {
    pub const fn glyph(self) -> &'static str {
        match self {
            Marker::Flame => "🔥",
            Marker::GateOpen => "🚪",
            Marker::EmergencyStop => "🛑",
            Marker::MethaneHigh => "⚠️",
            Marker::PressureHigh => "💥",
        }
    }
}

/// Markers raised by one snapshot, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    markers: Vec<Marker>,
}

impl StatusReport {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn is_normal(&self) -> bool {
        self.markers.is_empty()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_normal() {
            return f.write_str(NORMAL_GLYPH);
        }
        for (i, marker) in self.markers.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(marker.glyph())?;
        }
        Ok(())
    }
}

/// Derive the display markers for `snapshot`.
pub fn classify(snapshot: &SensorSnapshot) -> StatusReport {
    let events = snapshot.events();
    let checks = [
        (events.get(EventFlag::Flame), Marker::Flame),
        (events.get(EventFlag::GateOpen), Marker::GateOpen),
        (events.get(EventFlag::EmergencyStop), Marker::EmergencyStop),
        (
            snapshot.get(Channel::GasMethane).as_f64() > METHANE_WARNING_PPM,
            Marker::MethaneHigh,
        ),
        (
            snapshot.get(Channel::TankPressure).as_f64() > PRESSURE_WARNING,
            Marker::PressureHigh,
        ),
    ];

    StatusReport {
        markers: checks
            .into_iter()
            .filter_map(|(hit, marker)| hit.then_some(marker))
            .collect(),
    }
}
