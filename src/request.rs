use crate::entity::Entity;
use schema::Species;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the caller asks the engine to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRequest {
    pub species: Species,
    /// `None` picks any form obtainable in the target game.
    pub form: Option<u8>,
    pub shiny: bool,
    pub alpha: bool,
}

impl EncounterRequest {
    pub fn new(species: Species) -> Self {
        EncounterRequest {
            species,
            form: None,
            shiny: false,
            alpha: false,
        }
    }

    pub fn with_form(mut self, form: u8) -> Self {
        self.form = Some(form);
        self
    }

    pub fn shiny(mut self, shiny: bool) -> Self {
        self.shiny = shiny;
        self
    }

    pub fn alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    /// Whether `form` satisfies the requested form.
    pub fn accepts_form(&self, form: u8) -> bool {
        self.form.map_or(true, |requested| requested == form)
    }
}

/// Why no entity was produced. None of these are errors: the combination is
/// simply not obtainable right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The species has no form present in the target game
    Unobtainable,
    /// The resolved species/form is excluded for the trainer's generation
    IgnoredForm,
    /// No encounter template passed validation
    NoLegalEncounter,
    /// The adapted template could not be converted to the target record type
    ConversionFailed,
    /// The adapted template failed validation
    AdaptedInvalid,
    /// The entity no longer validated after conversion to the target record type
    ConvertedInvalid,
    /// Forcing the requested form onto the adapted template failed validation
    ForcedFormInvalid,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Unobtainable => "species/form not present in the target game",
            Rejection::IgnoredForm => "form excluded for the trainer's generation",
            Rejection::NoLegalEncounter => "no encounter template passed validation",
            Rejection::ConversionFailed => "template could not be converted",
            Rejection::AdaptedInvalid => "adapted template failed validation",
            Rejection::ConvertedInvalid => "converted entity failed validation",
            Rejection::ForcedFormInvalid => "forced form failed validation",
        };
        write!(f, "{}", reason)
    }
}

/// Outcome of one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub enum Synthesis {
    /// Built directly through the set pipeline
    Direct(Entity),
    /// Adapted from a legal encounter template
    Adapted(Entity),
    Rejected(Rejection),
}

/// A synthesis outcome together with the attempts it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub outcome: Synthesis,
    pub attempts: u32,
}

impl Attempt {
    pub fn direct(entity: Entity) -> Self {
        Attempt {
            outcome: Synthesis::Direct(entity),
            attempts: 1,
        }
    }

    pub fn adapted(entity: Entity) -> Self {
        Attempt {
            outcome: Synthesis::Adapted(entity),
            attempts: 1,
        }
    }

    pub fn rejected(rejection: Rejection, attempts: u32) -> Self {
        Attempt {
            outcome: Synthesis::Rejected(rejection),
            attempts,
        }
    }

    pub fn entity(&self) -> Option<&Entity> {
        match &self.outcome {
            Synthesis::Direct(entity) | Synthesis::Adapted(entity) => Some(entity),
            Synthesis::Rejected(_) => None,
        }
    }

    pub fn into_entity(self) -> Option<Entity> {
        match self.outcome {
            Synthesis::Direct(entity) | Synthesis::Adapted(entity) => Some(entity),
            Synthesis::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self.outcome {
            Synthesis::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Apply `f` to a produced entity; rejections pass through untouched.
    pub fn and_then(self, f: impl FnOnce(Entity) -> Result<Entity, Rejection>) -> Self {
        let attempts = self.attempts;
        let rewrap = |result: Result<Entity, Rejection>, adapted: bool| match result {
            Ok(entity) if adapted => Attempt::adapted(entity),
            Ok(entity) => Attempt::direct(entity),
            Err(rejection) => Attempt::rejected(rejection, attempts),
        };
        match self.outcome {
            Synthesis::Direct(entity) => Attempt {
                attempts,
                ..rewrap(f(entity), false)
            },
            Synthesis::Adapted(entity) => Attempt {
                attempts,
                ..rewrap(f(entity), true)
            },
            Synthesis::Rejected(_) => self,
        }
    }
}
