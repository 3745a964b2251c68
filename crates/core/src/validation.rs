//! Plausibility checks for received snapshots.
//!
//! The generator clamps its own output well inside these ranges; the checks
//! matter for snapshots decoded from wire text produced elsewhere.

use crate::channel::Channel;
use crate::snapshot::SensorSnapshot;

pub use crate::error::RangeViolation;

/// Inclusive range accepted for each checked channel. Unlisted channels are
/// not range-checked.
pub const PLAUSIBLE_RANGES: [(Channel, f64, f64); 5] = [
    (Channel::FurnaceTemp, 0.0, 2000.0),
    (Channel::EnvHumid, 0.0, 100.0),
    (Channel::TankPressure, 0.0, 200.0),
    (Channel::GasCo, 0.0, 1000.0),
    (Channel::GasMethane, 0.0, 1000.0),
];

/// Check every channel in [`PLAUSIBLE_RANGES`], collecting all violations.
///
/// Event flags need no check here: a snapshot can only hold set or clear,
/// and the wire parser rejects anything other than `0` or `1`.
pub fn validate(snapshot: &SensorSnapshot) -> Result<(), Vec<RangeViolation>> {
    let violations: Vec<_> = PLAUSIBLE_RANGES
        .into_iter()
        .filter_map(|(channel, min, max)| {
            let value = snapshot.get(channel);
            (!(min..=max).contains(&value.as_f64())).then_some(RangeViolation {
                channel,
                value,
                min,
                max,
            })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
