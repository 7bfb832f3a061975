use super::forms::resolve_available_form;
use super::rules::{form_item, form_signature_move, is_dual_gender_form, is_ignored_form, is_shiny_locked};
use crate::entity::Entity;
use crate::request::{EncounterRequest, Rejection};
use crate::services::{LegalityBackend, LegalizationResult};
use crate::trainer::TrainerInfo;
use schema::Gender;
use tracing::debug;

/// Result of the direct synthesis stage.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// The set pipeline produced a valid entity of the requested form
    Accepted(Entity),
    /// The pipeline attempt did not satisfy the request; carries the resolved
    /// working blank for the fallback search
    Declined(Entity),
    /// The request was dropped before any attempt was made
    Rejected(Rejection),
}

impl CandidateOutcome {
    /// Whether a synthesis attempt was spent producing this outcome.
    pub fn consumed_attempt(&self) -> bool {
        !matches!(self, CandidateOutcome::Rejected(_))
    }
}

/// Builds an entity by round-tripping a resolved blank through set text and
/// the backend's set pipeline.
pub struct CandidateSynthesizer<'a, B: LegalityBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: LegalityBackend + ?Sized> CandidateSynthesizer<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        CandidateSynthesizer { backend }
    }

    pub fn synthesize(
        &self,
        blank: Entity,
        trainer: &TrainerInfo,
        request: &EncounterRequest,
    ) -> CandidateOutcome {
        let blank = match self.resolve_blank(blank, trainer, request) {
            Ok(blank) => blank,
            Err(rejection) => return CandidateOutcome::Rejected(rejection),
        };

        let text = self.set_text(&blank, request);
        let Some(mut set) = self.backend.parse(&text) else {
            debug!(text = %text, "Set text did not parse");
            return CandidateOutcome::Declined(blank);
        };
        set.format = trainer.generation;
        set.normalize(trainer.game.context());

        let mut template = self.backend.blank(trainer.generation, trainer.game);
        self.backend.apply_set_details(&mut template, &set);
        let (result, entity) = self.backend.try_convert(trainer, &set, &template);

        if result == LegalizationResult::Regenerated
            && request.accepts_form(entity.form)
            && self.backend.is_valid(&entity)
        {
            CandidateOutcome::Accepted(entity)
        } else {
            debug!(
                species = %blank.species,
                form = blank.form,
                ?result,
                "Direct synthesis declined"
            );
            CandidateOutcome::Declined(blank)
        }
    }

    /// Stamp species, gender and form onto the blank, rejecting combinations
    /// that cannot be produced for this trainer.
    pub fn resolve_blank(
        &self,
        mut blank: Entity,
        trainer: &TrainerInfo,
        request: &EncounterRequest,
    ) -> Result<Entity, Rejection> {
        blank.species = request.species;
        blank.gender = blank.sane_gender();

        if is_dual_gender_form(blank.species) {
            match request.form {
                None => blank.form = blank.gender.index(),
                Some(form) => blank.gender = Gender::from_index(form).unwrap_or(blank.gender),
            }
        }

        blank = match request.form {
            Some(form) => {
                blank.form = form;
                if let Some(item) = form_item(trainer.game, blank.species, form) {
                    blank.held_item = item;
                }
                if let Some((slot, move_id)) = form_signature_move(blank.species, form) {
                    blank.moves[slot] = move_id;
                }
                blank
            }
            None => resolve_available_form(blank, trainer)?,
        };

        if is_ignored_form(
            blank.species,
            blank.form,
            trainer.generation,
            blank.origin_generation(),
        ) {
            debug!(species = %blank.species, form = blank.form, "Form ignored for trainer generation");
            return Err(Rejection::IgnoredForm);
        }
        Ok(blank)
    }

    /// First line of the blank's set text plus the requested flags.
    fn set_text(&self, blank: &Entity, request: &EncounterRequest) -> String {
        let full = self.backend.to_text(blank);
        let mut text = full.lines().next().unwrap_or_default().to_string();
        if request.shiny && !is_shiny_locked(blank.species, blank.form) {
            text.push_str("\nShiny: Yes");
        }
        if request.alpha && blank.format.has_alpha() {
            text.push_str("\nAlpha: Yes");
        }
        text
    }
}
