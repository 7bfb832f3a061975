use super::candidate::{CandidateOutcome, CandidateSynthesizer};
use super::fallback::{FallbackEncounterSearch, DEFAULT_MAX_CANDIDATES};
use crate::entity::Entity;
use crate::request::{Attempt, EncounterRequest, Rejection};
use crate::services::LegalityBackend;
use crate::trainer::TrainerInfo;
use schema::RecordFormat;
use tracing::debug;

/// Entry point for "give me one legal entity for this request".
pub struct EncounterSynthesizer<'a, B: LegalityBackend + ?Sized> {
    backend: &'a B,
    max_candidates: usize,
}

impl<'a, B: LegalityBackend + ?Sized> EncounterSynthesizer<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        EncounterSynthesizer {
            backend,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Synthesize directly, fall back to adapting an encounter, and convert
    /// the result to the trainer's record layout.
    pub fn get_random_encounter(&self, trainer: &TrainerInfo, request: &EncounterRequest) -> Attempt {
        let blank = self.backend.blank(trainer.generation, trainer.game);
        let target = blank.format;

        let attempt = match CandidateSynthesizer::new(self.backend).synthesize(blank, trainer, request) {
            CandidateOutcome::Rejected(rejection) => return Attempt::rejected(rejection, 0),
            CandidateOutcome::Accepted(entity) => Attempt::direct(entity),
            CandidateOutcome::Declined(working) => {
                let search = FallbackEncounterSearch::new(self.backend)
                    .with_max_candidates(self.max_candidates);
                match search.adapt(&working, trainer, request) {
                    Ok(entity) => Attempt::adapted(entity),
                    // Finding nothing to adapt does not count as an attempt
                    Err(Rejection::NoLegalEncounter) => {
                        Attempt::rejected(Rejection::NoLegalEncounter, 0)
                    }
                    Err(rejection) => Attempt::rejected(rejection, 1),
                }
            }
        };

        debug!(
            species = %request.species,
            form = ?request.form,
            attempts = attempt.attempts,
            rejection = ?attempt.rejection(),
            "Encounter synthesis finished"
        );

        attempt.and_then(|entity| self.convert_to(entity, target))
    }

    /// Move a synthesized entity into `target`, re-checking it when the
    /// layout changes.
    pub fn convert_to(&self, entity: Entity, target: RecordFormat) -> Result<Entity, Rejection> {
        if entity.format == target {
            return Ok(entity);
        }
        let converted = self
            .backend
            .convert(&entity, target)
            .ok_or(Rejection::ConversionFailed)?;
        if !self.backend.is_valid(&converted) {
            debug!(species = %converted.species, format = ?target, "Converted entity is invalid");
            return Err(Rejection::ConvertedInvalid);
        }
        Ok(converted)
    }
}
