//! The synthesis-with-fallback engine.
//!
//! A request flows through form resolution and normalization into the
//! direct candidate stage; when that declines, the fallback search adapts a
//! legal in-game encounter instead. Every stage takes the working entity by
//! value and hands back either an updated entity or a `Rejection`.

pub mod candidate;
pub mod encounter;
pub mod fallback;
pub mod forms;
pub mod normalize;
pub mod rules;

pub use candidate::{CandidateOutcome, CandidateSynthesizer};
pub use encounter::EncounterSynthesizer;
pub use fallback::{FallbackEncounterSearch, DEFAULT_MAX_CANDIDATES};
pub use forms::resolve_available_form;

#[cfg(test)]
pub(crate) mod tests;
