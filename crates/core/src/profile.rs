//! Generation profiles.
//!
//! A [`Profile`] is the full parameter table for the generator: one
//! [`ChannelPolicy`] per channel plus the per-snapshot probability of each
//! event flag. Two profiles ship:
//!
//! - [`BRIDGE`]: the canonical parameters used by the bridge simulator.
//! - [`PROBE`]: the narrower ranges and lower event odds used by the API
//!   probe's continuous mode.

use crate::channel::{Channel, EventFlag, CHANNEL_COUNT};

pub use crate::error::UnknownProfile;

/// Lower/upper clamp for percentage-like channels.
const PERCENT_MIN: f64 = 0.0;
const PERCENT_MAX: f64 = 100.0;

/// Base value, variation range and clamp bounds for a single channel.
///
/// The generated value is `clamp(base + uniform(low, high))`. For integer
/// channels all four numbers are whole and the variation is drawn as an
/// inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPolicy {
    pub base: f64,
    pub low: f64,
    pub high: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ChannelPolicy {
    const fn unbounded(base: f64, low: f64, high: f64) -> Self {
        Self {
            base,
            low,
            high,
            min: None,
            max: None,
        }
    }

    const fn non_negative(base: f64, low: f64, high: f64) -> Self {
        Self {
            base,
            low,
            high,
            min: Some(0.0),
            max: None,
        }
    }

    const fn percent(base: f64, low: f64, high: f64) -> Self {
        Self {
            base,
            low,
            high,
            min: Some(PERCENT_MIN),
            max: Some(PERCENT_MAX),
        }
    }

    /// Apply the clamp bounds to `value`.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

/// Per-snapshot probability of each event flag firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventOdds {
    pub flame: f64,
    pub gate_open: f64,
    pub emergency_stop: f64,
}

impl EventOdds {
    pub fn get(&self, flag: EventFlag) -> f64 {
        match flag {
            EventFlag::Flame => self.flame,
            EventFlag::GateOpen => self.gate_open,
            EventFlag::EmergencyStop => self.emergency_stop,
        }
    }
}

/// A named generator parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    /// Indexed in [`Channel::ALL`] order.
    pub channels: [ChannelPolicy; CHANNEL_COUNT],
    pub events: EventOdds,
}

/// Canonical profile of the bridge simulator.
pub static BRIDGE: Profile = Profile {
    name: "bridge",
    channels: [
        ChannelPolicy::unbounded(850.0, -50.0, 100.0), // Furnace_Temp
        ChannelPolicy::percent(50.0, -15.0, 15.0), // Env_Humid
        ChannelPolicy::non_negative(200.0, -100.0, 150.0), // Light_Level
        ChannelPolicy::non_negative(20.0, -10.0, 50.0), // Gas_Methane
        ChannelPolicy::non_negative(50.0, -20.0, 60.0), // Gas_CO
        ChannelPolicy::non_negative(500.0, -200.0, 300.0), // Machine_Sound
        ChannelPolicy::percent(70.0, -20.0, 30.0), // Tank_Pressure
        ChannelPolicy::non_negative(120.0, -40.0, 80.0), // Main_Current
        ChannelPolicy::non_negative(20.0, -10.0, 40.0), // Engine_Vibe
        ChannelPolicy::non_negative(230.0, -50.0, 50.0), // Input_Voltage
        ChannelPolicy::non_negative(150.0, -100.0, 100.0), // Conveyor_Dist
        ChannelPolicy::non_negative(100.0, -50.0, 200.0), // Water_Leak
        ChannelPolicy::percent(85.0, -20.0, 30.0), // Coolant_Valve
    ],
    events: EventOdds {
        flame: 0.03,
        gate_open: 0.15,
        emergency_stop: 0.01,
    },
};

/// Alternate profile used by the API probe's continuous simulation.
pub static PROBE: Profile = Profile {
    name: "probe",
    channels: [
        ChannelPolicy::unbounded(850.0, -50.0, 50.0), // Furnace_Temp
        ChannelPolicy::percent(50.0, -10.0, 10.0), // Env_Humid
        ChannelPolicy::non_negative(200.0, -50.0, 50.0), // Light_Level
        ChannelPolicy::non_negative(20.0, -5.0, 15.0), // Gas_Methane
        ChannelPolicy::non_negative(50.0, -10.0, 20.0), // Gas_CO
        ChannelPolicy::non_negative(500.0, -100.0, 200.0), // Machine_Sound
        ChannelPolicy::percent(70.0, -10.0, 15.0), // Tank_Pressure
        ChannelPolicy::non_negative(120.0, -20.0, 40.0), // Main_Current
        ChannelPolicy::non_negative(20.0, -5.0, 15.0), // Engine_Vibe
        ChannelPolicy::non_negative(230.0, -20.0, 20.0), // Input_Voltage
        ChannelPolicy::non_negative(150.0, -50.0, 50.0), // Conveyor_Dist
        ChannelPolicy::non_negative(100.0, -20.0, 100.0), // Water_Leak
        ChannelPolicy::percent(85.0, -10.0, 15.0), // Coolant_Valve
    ],
    events: EventOdds {
        flame: 0.02,
        gate_open: 0.10,
        emergency_stop: 0.005,
    },
};

impl Profile {
    /// Every shipped profile.
    pub fn all() -> [&'static Profile; 2] {
        [&BRIDGE, &PROBE]
    }

    /// Resolve a profile by name, ignoring ASCII case and surrounding
    /// whitespace.
    pub fn named(name: &str) -> Result<&'static Profile, UnknownProfile> {
        let wanted = name.trim();
        Self::all()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownProfile(name.to_string()))
    }

    pub fn policy(&self, channel: Channel) -> &ChannelPolicy {
        &self.channels[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_is_case_insensitive() {
        assert_eq!(Profile::named("bridge").unwrap().name, "bridge");
        assert_eq!(Profile::named(" PROBE ").unwrap().name, "probe");
    }

    #[test]
    fn named_rejects_unknown() {
        let err = Profile::named("turbo").unwrap_err();
        assert_eq!(err, UnknownProfile("turbo".to_string()));
        assert!(err.to_string().contains("turbo"));
    }

    #[test]
    fn percent_channels_are_clamped_to_0_100() {
        for profile in Profile::all() {
            for channel in [Channel::EnvHumid, Channel::TankPressure, Channel::CoolantValve] {
                let policy = profile.policy(channel);
                assert_eq!(policy.min, Some(0.0), "{} {channel}", profile.name);
                assert_eq!(policy.max, Some(100.0), "{} {channel}", profile.name);
            }
        }
    }

    #[test]
    fn only_furnace_temperature_is_unbounded() {
        for profile in Profile::all() {
            for channel in Channel::ALL {
                let policy = profile.policy(channel);
                if channel == Channel::FurnaceTemp {
                    assert_eq!(policy.min, None);
                } else {
                    assert_eq!(policy.min, Some(0.0), "{} {channel}", profile.name);
                }
            }
        }
    }

    #[test]
    fn clamp_applies_both_bounds() {
        let policy = ChannelPolicy::percent(70.0, -20.0, 30.0);
        assert_eq!(policy.clamp(-3.0), 0.0);
        assert_eq!(policy.clamp(101.0), 100.0);
        assert_eq!(policy.clamp(42.0), 42.0);

        let open = ChannelPolicy::unbounded(850.0, -50.0, 100.0);
        assert_eq!(open.clamp(-1.0e6), -1.0e6);
    }

    #[test]
    fn profiles_share_base_values() {
        for channel in Channel::ALL {
            assert_eq!(BRIDGE.policy(channel).base, PROBE.policy(channel).base);
        }
    }

    #[test]
    fn bridge_event_odds() {
        assert_eq!(BRIDGE.events.get(EventFlag::Flame), 0.03);
        assert_eq!(BRIDGE.events.get(EventFlag::GateOpen), 0.15);
        assert_eq!(BRIDGE.events.get(EventFlag::EmergencyStop), 0.01);
    }
}
