//! `smartfactory-core` library crate.
//!
//! Pure, I/O-free building blocks for the Smart Factory sensor bridge:
//! channel definitions, generation profiles, the snapshot generator, the
//! two-line wire text codec, plausibility validation, the advisory status
//! classifier, and the canned verification scenarios.

pub mod channel;
pub mod error;
pub mod generator;
pub mod profile;
pub mod scenario;
pub mod snapshot;
pub mod status;
pub mod validation;
pub mod wire;

pub use channel::{Channel, ChannelKind, EventFlag, Reading};
pub use generator::{generate, Baseline, Generator, VariationSource};
pub use profile::{ChannelPolicy, EventOdds, Profile, UnknownProfile};
pub use scenario::Scenario;
pub use snapshot::{EventFlags, SensorSnapshot};
pub use status::{classify, Marker, StatusReport};
pub use validation::{validate, RangeViolation};
pub use wire::{render, WireError, WireFrame};
