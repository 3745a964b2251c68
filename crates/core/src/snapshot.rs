//! Immutable sensor snapshots.

use crate::channel::{Channel, EventFlag, Reading, CHANNEL_COUNT, EVENT_COUNT};
use crate::profile::Profile;

/// State of the three event flags in one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFlags {
    pub flame: bool,
    pub gate_open: bool,
    pub emergency_stop: bool,
}

impl EventFlags {
    pub fn get(&self, flag: EventFlag) -> bool {
        match flag {
            EventFlag::Flame => self.flame,
            EventFlag::GateOpen => self.gate_open,
            EventFlag::EmergencyStop => self.emergency_stop,
        }
    }

    #[must_use]
    pub fn with(mut self, flag: EventFlag, set: bool) -> Self {
        match flag {
            EventFlag::Flame => self.flame = set,
            EventFlag::GateOpen => self.gate_open = set,
            EventFlag::EmergencyStop => self.emergency_stop = set,
        }
        self
    }

    pub(crate) fn from_array(flags: [bool; EVENT_COUNT]) -> Self {
        let [flame, gate_open, emergency_stop] = flags;
        Self {
            flame,
            gate_open,
            emergency_stop,
        }
    }

    /// `true` when at least one flag is set.
    pub fn any(&self) -> bool {
        self.flame || self.gate_open || self.emergency_stop
    }
}

/// One complete set of simulated sensor values at a point in time.
///
/// Snapshots are never mutated in place; [`SensorSnapshot::with_value`]
/// and [`SensorSnapshot::with_event`] return a modified copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSnapshot {
    readings: [Reading; CHANNEL_COUNT],
    events: EventFlags,
}

impl SensorSnapshot {
    /// Callers guarantee each reading's kind matches its channel.
    pub(crate) fn from_parts(readings: [Reading; CHANNEL_COUNT], events: EventFlags) -> Self {
        Self { readings, events }
    }

    /// The profile's base constants with every event flag cleared.
    pub fn baseline(profile: &Profile) -> Self {
        let readings = Channel::ALL
            .map(|channel| Reading::of_kind(channel.kind(), profile.policy(channel).base));
        Self::from_parts(readings, EventFlags::default())
    }

    pub fn get(&self, channel: Channel) -> Reading {
        self.readings[channel.index()]
    }

    pub fn events(&self) -> EventFlags {
        self.events
    }

    pub fn is_set(&self, flag: EventFlag) -> bool {
        self.events.get(flag)
    }

    /// Channels and their readings in table order.
    pub fn readings(&self) -> impl Iterator<Item = (Channel, Reading)> + '_ {
        Channel::ALL.into_iter().zip(self.readings.iter().copied())
    }

    /// Copy of this snapshot with `channel` set to `value`, coerced to the
    /// channel's kind.
    #[must_use]
    pub fn with_value(mut self, channel: Channel, value: f64) -> Self {
        self.readings[channel.index()] = Reading::of_kind(channel.kind(), value);
        self
    }

    #[must_use]
    pub fn with_event(mut self, flag: EventFlag, set: bool) -> Self {
        self.events = self.events.with(flag, set);
        self
    }
}
