//! Canned payloads for manual verification against a live API.

use crate::channel::{Channel, Reading, CHANNEL_COUNT};
use crate::snapshot::{EventFlags, SensorSnapshot};
use crate::wire;

/// Readings in [`Channel::ALL`] order, followed by the event flags.
struct Payload {
    readings: [f64; CHANNEL_COUNT],
    events: EventFlags,
}

static NORMAL: Payload = Payload {
    readings: [
        892.0, 45.5, 210.0, 15.0, 61.0, 512.0, 72.0, 123.0, 25.0, 230.0, 150.0, 100.0, 90.0,
    ],
    events: EventFlags {
        flame: false,
        gate_open: false,
        emergency_stop: false,
    },
};

static WARNING: Payload = Payload {
    readings: [
        950.0, 85.0, 50.0, 250.0, 85.0, 650.0, 85.0, 160.0, 60.0, 200.0, 0.0, 450.0, 95.0,
    ],
    events: EventFlags {
        flame: false,
        gate_open: true,
        emergency_stop: false,
    },
};

static EMERGENCY: Payload = Payload {
    readings: [
        1050.0, 90.0, 30.0, 400.0, 120.0, 700.0, 95.0, 180.0, 80.0, 180.0, 0.0, 500.0, 100.0,
    ],
    events: EventFlags {
        flame: true,
        gate_open: true,
        emergency_stop: true,
    },
};

/// A fixed payload with a known expected severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Normal,
    Warning,
    Emergency,
}

impl Scenario {
    /// Submission order used by the probe.
    pub const ALL: [Scenario; 3] = [Scenario::Normal, Scenario::Warning, Scenario::Emergency];

    pub const fn name(self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::Warning => "warning",
            Scenario::Emergency => "emergency",
        }
    }

    fn payload(self) -> &'static Payload {
        match self {
            Scenario::Normal => &NORMAL,
            Scenario::Warning => &WARNING,
            Scenario::Emergency => &EMERGENCY,
        }
    }

    pub fn snapshot(self) -> SensorSnapshot {
        let payload = self.payload();
        let readings = Channel::ALL.map(|channel| {
            Reading::of_kind(channel.kind(), payload.readings[channel.index()])
        });
        SensorSnapshot::from_parts(readings, payload.events)
    }

    /// The payload as two-line wire text.
    pub fn wire_text(self) -> String {
        wire::render(&self.snapshot())
    }
}
