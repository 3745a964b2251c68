//! Error types for the core crate.
//!
//! Generation itself cannot fail; errors only arise when decoding wire
//! text, checking received values against plausible ranges, or resolving a
//! profile by name.

use crate::channel::{Channel, Reading};

/// Errors raised while parsing wire text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireError {
    #[error("Expected a header line followed by a data line")]
    MissingDataLine,

    #[error("Malformed sensor pair: {0:?}")]
    MalformedPair(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// A reading outside the range the monitoring API accepts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {}: {value} (expected {min} to {max})", .channel.key())]
pub struct RangeViolation {
    pub channel: Channel,
    pub value: Reading,
    pub min: f64,
    pub max: f64,
}

/// Returned by [`Profile::named`](crate::profile::Profile::named) for an
/// unrecognised profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown generation profile '{0}' (expected 'bridge' or 'probe')")]
pub struct UnknownProfile(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        assert_eq!(
            WireError::MissingField("Gas_CO").to_string(),
            "Missing field: Gas_CO"
        );
        assert_eq!(
            WireError::InvalidValue {
                key: "Light_Level",
                value: "2.5".to_string(),
            }
            .to_string(),
            "Invalid value for Light_Level: \"2.5\""
        );
        assert_eq!(
            RangeViolation {
                channel: Channel::TankPressure,
                value: Reading::Int(250),
                min: 0.0,
                max: 200.0,
            }
            .to_string(),
            "Invalid Tank_Pressure: 250 (expected 0 to 200)"
        );
    }
}
