//! Bounded-random snapshot generation.
//!
//! [`generate`] walks the profile's channel table once, drawing one
//! variation per channel from a [`VariationSource`], then rolls the three
//! event flags. Randomness is always passed in explicitly; any
//! [`rand::Rng`] is a source, and [`Baseline`] yields the base constants.
//!
//! [`Generator`] pairs a profile with a seeded ChaCha8 stream so a run can
//! be replayed exactly from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::channel::{Channel, ChannelKind, EventFlag, Reading};
use crate::profile::Profile;
use crate::snapshot::{EventFlags, SensorSnapshot};
use crate::wire;

/// Source of per-channel variation and event trials.
pub trait VariationSource {
    /// Uniform float in the closed interval `[low, high]`.
    fn uniform_float(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in the closed interval `[low, high]`.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;

    /// Bernoulli trial with success probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> VariationSource for R {
    fn uniform_float(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.random_range(low..=high)
    }

    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.random_range(low..=high)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.random_bool(p.clamp(0.0, 1.0))
    }
}

/// Zero variation, no events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl VariationSource for Baseline {
    fn uniform_float(&mut self, _low: f64, _high: f64) -> f64 {
        0.0
    }

    fn uniform_int(&mut self, _low: i64, _high: i64) -> i64 {
        0
    }

    fn chance(&mut self, _p: f64) -> bool {
        false
    }
}

/// Draw a fresh snapshot from `profile` using `source`.
pub fn sample<V: VariationSource + ?Sized>(profile: &Profile, source: &mut V) -> SensorSnapshot {
    let readings = Channel::ALL.map(|channel| {
        let policy = profile.policy(channel);
        match channel.kind() {
            ChannelKind::Float => {
                let raw = policy.base + source.uniform_float(policy.low, policy.high);
                Reading::Float(policy.clamp(raw))
            }
            ChannelKind::Int => {
                let delta = source.uniform_int(policy.low as i64, policy.high as i64);
                let raw = policy.base as i64 + delta;
                Reading::Int(policy.clamp(raw as f64) as i64)
            }
        }
    });

    let events = EventFlags::from_array(
        EventFlag::ALL.map(|flag| source.chance(profile.events.get(flag))),
    );

    SensorSnapshot::from_parts(readings, events)
}

/// Draw a fresh snapshot and render its wire text.
pub fn generate<V: VariationSource + ?Sized>(
    profile: &Profile,
    source: &mut V,
) -> (SensorSnapshot, String) {
    let snapshot = sample(profile, source);
    let text = wire::render(&snapshot);
    (snapshot, text)
}

/// A profile bound to its own ChaCha8 random stream.
#[derive(Debug, Clone)]
pub struct Generator {
    profile: &'static Profile,
    rng: ChaCha8Rng,
}

impl Generator {
    /// Deterministic generator: the same seed and profile always yield the
    /// same sequence of snapshots.
    pub fn seeded(profile: &'static Profile, seed: u64) -> Self {
        Self {
            profile,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the thread-local RNG.
    pub fn from_entropy(profile: &'static Profile) -> Self {
        Self {
            profile,
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    pub fn profile(&self) -> &'static Profile {
        self.profile
    }

    pub fn generate(&mut self) -> (SensorSnapshot, String) {
        generate(self.profile, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{BRIDGE, PROBE};

    #[test]
    fn baseline_reproduces_base_constants() {
        let snapshot = sample(&BRIDGE, &mut Baseline);
        assert_eq!(snapshot, SensorSnapshot::baseline(&BRIDGE));
    }

    #[test]
    fn baseline_source_never_fires_events() {
        let mut source = Baseline;
        assert!(!source.chance(1.0));
        assert_eq!(source.uniform_int(-10, 50), 0);
        assert_eq!(source.uniform_float(-50.0, 100.0), 0.0);
    }

    #[test]
    fn rng_source_honours_degenerate_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.uniform_int(7, 7), 7);
        assert_eq!(rng.uniform_float(2.5, 2.5), 2.5);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }

    #[test]
    fn rng_source_stays_within_closed_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10_000 {
            let i = rng.uniform_int(-20, 30);
            assert!((-20..=30).contains(&i));
            let f = rng.uniform_float(-15.0, 15.0);
            assert!((-15.0..=15.0).contains(&f));
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let mut a = Generator::seeded(&BRIDGE, 42);
        let mut b = Generator::seeded(&BRIDGE, 42);
        for _ in 0..50 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Generator::seeded(&BRIDGE, 1);
        let mut b = Generator::seeded(&BRIDGE, 2);
        let diverged = (0..20).any(|_| a.generate().1 != b.generate().1);
        assert!(diverged);
    }

    #[test]
    fn generated_text_matches_rendered_snapshot() {
        let mut generator = Generator::seeded(&PROBE, 7);
        let (snapshot, text) = generator.generate();
        assert_eq!(text, wire::render(&snapshot));
        assert_eq!(generator.profile().name, "probe");
    }

    #[test]
    fn integer_channels_stay_whole_after_clamp() {
        let mut generator = Generator::from_entropy(&BRIDGE);
        for _ in 0..1_000 {
            let (snapshot, _) = generator.generate();
            for (channel, reading) in snapshot.readings() {
                assert_eq!(reading.kind(), channel.kind(), "{channel}");
            }
        }
    }
}
