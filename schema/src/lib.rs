// Encounter Forge Schema - Shared identifiers and static data shapes
// This crate holds the numeric identifiers (species, versions, items, moves)
// and the per-species personal data layout shared by every part of the
// synthesis engine, so the rule tables can be expressed as plain data.

// Re-export the main types
pub use format::*;
pub use identity::*;
pub use personal_info::*;
pub use species::*;
pub use version::*;

pub mod format;
pub mod identity;
pub mod items;
pub mod moves;
pub mod personal_info;
pub mod species;
pub mod version;
