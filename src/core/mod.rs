//! Foundation types shared by every layer.

pub mod types;

pub use types::{Gesture, MatchDecision, MatchOutcome, RawTriple, Sample, AXES};
