// In: src/lib.rs

//! Encounter Forge
//!
//! Synthesizes valid creature records for a requested species/form/shiny/alpha
//! combination, degrading from direct construction through the set pipeline
//! to adapting a known-legal in-game encounter, and batch-repairs invalid
//! records stored in save boxes.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod box_legalize;
pub mod config;
pub mod entity;
pub mod errors;
pub mod living_dex;
pub mod personal;
pub mod reference;
pub mod regen;
pub mod request;
pub mod services;
pub mod synthesis;
pub mod trainer;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `encounter-forge` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the identifiers every request and record is built from.
pub use schema::{
    GameContext, GameVersion, Gender, LanguageId, PersonalInfo, RecordFormat, Species,
};

// --- From this crate's modules (`src/`) ---

// Records, requests and synthesis outcomes.
pub use entity::Entity;
pub use regen::RegenTemplate;
pub use request::{Attempt, EncounterRequest, Rejection, Synthesis};

// The engine and its batch drivers.
pub use box_legalize::BoxLegalizer;
pub use living_dex::{LivingDexGenerator, LivingDexSettings, LivingSet};
pub use synthesis::EncounterSynthesizer;

// Collaborator seams and trainer resolution.
pub use services::{LegalityBackend, SaveContainer};
pub use trainer::{TrainerDatabase, TrainerInfo, TrainerSettings};

// Configuration and data access.
pub use config::ForgeConfig;
pub use personal::initialize_personal_tables;

// Crate-specific error and result types.
pub use errors::{ContainerError, ContainerResult, ForgeError, ForgeResult};
