use crate::entity::{Entity, MAX_LEVEL};
use crate::request::{EncounterRequest, Rejection};
use crate::services::LegalityBackend;
use crate::trainer::TrainerInfo;
use tracing::debug;

/// Default cap on encounter templates examined per search.
pub const DEFAULT_MAX_CANDIDATES: usize = 512;

/// Adapts a legal in-game encounter to the request when direct synthesis
/// does not produce one.
pub struct FallbackEncounterSearch<'a, B: LegalityBackend + ?Sized> {
    backend: &'a B,
    max_candidates: usize,
}

impl<'a, B: LegalityBackend + ?Sized> FallbackEncounterSearch<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        FallbackEncounterSearch {
            backend,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn adapt(
        &self,
        blank: &Entity,
        trainer: &TrainerInfo,
        request: &EncounterRequest,
    ) -> Result<Entity, Rejection> {
        let encounter = self
            .first_encounter(blank, trainer, request)
            .ok_or(Rejection::NoLegalEncounter)?;

        let origin_species = encounter.species;
        let encounter = self.rewrite_species(encounter, blank);

        let mut adapted = self
            .backend
            .convert(&encounter, blank.format)
            .ok_or(Rejection::ConversionFailed)?;
        adapted.held_item = blank.held_item;
        adapted.refresh_scaled_size();

        if request.accepts_form(adapted.form) {
            return if self.backend.is_valid(&adapted) {
                Ok(adapted)
            } else {
                debug!(species = %adapted.species, "Adapted encounter failed validation");
                Err(Rejection::AdaptedInvalid)
            };
        }

        // Last resort: force the requested form onto the adapted encounter
        if let Some(form) = request.form {
            adapted.form = form;
        }
        adapted.form_argument = self
            .backend
            .suggested_form_argument(&adapted, origin_species);
        adapted.refresh_scaled_size();

        if self.backend.is_valid(&adapted) {
            Ok(adapted)
        } else {
            debug!(species = %adapted.species, form = adapted.form, "Forced form failed validation");
            Err(Rejection::ForcedFormInvalid)
        }
    }

    /// First valid encounter, preferring one whose form matches the request.
    pub fn first_encounter(
        &self,
        blank: &Entity,
        trainer: &TrainerInfo,
        request: &EncounterRequest,
    ) -> Option<Entity> {
        let mut legal = self
            .backend
            .generate(blank, trainer)
            .take(self.max_candidates)
            .filter(|candidate| self.backend.is_valid(candidate));

        let Some(form) = request.form else {
            return legal.next();
        };

        let mut first = None;
        for candidate in legal {
            if candidate.form == form {
                return Some(candidate);
            }
            first.get_or_insert(candidate);
        }
        first
    }

    /// Turn an encounter of a relative (e.g. a pre-evolution) into the
    /// blank's species.
    fn rewrite_species(&self, mut encounter: Entity, blank: &Entity) -> Entity {
        if encounter.species == blank.species {
            return encounter;
        }
        debug!(from = %encounter.species, to = %blank.species, "Rewriting relative encounter");
        encounter.species = blank.species;
        encounter.level = MAX_LEVEL;
        if !encounter.is_nicknamed {
            encounter.nickname = encounter.default_nickname();
        }
        let moves = self.backend.suggested_moves(&encounter);
        encounter.set_moves(moves);
        encounter.refresh_ability(encounter.ability_number >> 1);
        encounter
    }
}
