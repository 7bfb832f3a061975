//! Living set generation: one legal entity per species (or per form) for a save.

use crate::entity::Entity;
use crate::personal::{dex_additions, form_count, is_present_in_game};
use crate::request::{Attempt, EncounterRequest};
use crate::services::{LegalityBackend, SaveContainer};
use crate::synthesis::EncounterSynthesizer;
use crate::trainer::{TrainerInfo, TrainerSettings};
use schema::{GameContext, GameVersion, RecordFormat, Species};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Options applied to every request of a living set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivingDexSettings {
    pub include_forms: bool,
    pub set_shiny: bool,
    pub set_alpha: bool,
}

/// Entities generated for a living set, with the attempts they cost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LivingSet {
    pub entities: Vec<Entity>,
    pub attempts: u32,
}

pub struct LivingDexGenerator<'a, B: LegalityBackend + ?Sized> {
    synthesizer: EncounterSynthesizer<'a, B>,
    trainers: Option<&'a TrainerSettings>,
}

impl<'a, B: LegalityBackend + ?Sized> LivingDexGenerator<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        LivingDexGenerator {
            synthesizer: EncounterSynthesizer::new(backend),
            trainers: None,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.synthesizer = self.synthesizer.with_max_candidates(max_candidates);
        self
    }

    /// Stamp entities with trainers from the database instead of the save's own.
    pub fn with_trainer_settings(mut self, trainers: &'a TrainerSettings) -> Self {
        self.trainers = Some(trainers);
        self
    }

    /// Trainer generated entities are created for.
    pub fn trainer_for<S: SaveContainer + ?Sized>(&self, save: &S) -> TrainerInfo {
        let own = save.trainer();
        match self.trainers {
            Some(settings) => settings.get_saved_trainer_data(
                save.game(),
                save.generation(),
                Some(&own),
                Some(own.language),
            ),
            None => own,
        }
    }

    /// One entity for the save, retrying Gen 2 saves with a Yellow trainer.
    pub fn get_random_encounter<S: SaveContainer + ?Sized>(
        &self,
        save: &S,
        request: &EncounterRequest,
    ) -> Attempt {
        let trainer = self.trainer_for(save);
        self.encounter_for(save, &trainer, request)
    }

    fn encounter_for<S: SaveContainer + ?Sized>(
        &self,
        save: &S,
        trainer: &TrainerInfo,
        request: &EncounterRequest,
    ) -> Attempt {
        let attempt = self.synthesizer.get_random_encounter(trainer, request);
        if attempt.entity().is_some() || save.generation() != 2 {
            return attempt;
        }

        debug!(species = %request.species, "Retrying with a Gen 1 trainer");
        let mut yellow = TrainerInfo::new(GameVersion::Yellow).with_language(trainer.language);
        yellow.ot_name = trainer.ot_name.clone();
        yellow.tid = trainer.tid;
        let retry = EncounterRequest::new(request.species)
            .with_form(0)
            .shiny(request.shiny);

        let fallback = self
            .synthesizer
            .get_random_encounter(&yellow, &retry)
            .and_then(|entity| self.synthesizer.convert_to(entity, RecordFormat::Pk2));
        Attempt {
            attempts: attempt.attempts + fallback.attempts,
            ..fallback
        }
    }

    /// One entity per species, or per obtainable form when `include_forms` is set.
    /// Combinations that cannot be synthesized are left out.
    pub fn generate_living_set<S: SaveContainer + ?Sized>(
        &self,
        save: &S,
        species: &[Species],
        settings: LivingDexSettings,
    ) -> LivingSet {
        let trainer = self.trainer_for(save);
        let context = save.record_format().context();
        let skip_absent_forms = matches!(
            context,
            GameContext::SwordShield | GameContext::LegendsArceus
        );

        let mut set = LivingSet::default();
        for &id in species {
            let requests: Vec<EncounterRequest> = if settings.include_forms {
                (0..form_count(context, id))
                    .filter(|&form| !skip_absent_forms || is_present_in_game(context, id, form))
                    .map(|form| EncounterRequest::new(id).with_form(form))
                    .collect()
            } else {
                vec![EncounterRequest::new(id)]
            };

            for request in requests {
                let request = request.shiny(settings.set_shiny).alpha(settings.set_alpha);
                let attempt = self.encounter_for(save, &trainer, &request);
                set.attempts += attempt.attempts;
                match attempt.into_entity() {
                    Some(mut entity) => {
                        entity.heal();
                        set.entities.push(entity);
                    }
                    None => debug!(species = %id, form = ?request.form, "Left out of living set"),
                }
            }
        }
        set
    }

    /// A living set of every species the save's game can hold.
    pub fn generate_living_dex<S: SaveContainer + ?Sized>(
        &self,
        save: &S,
        settings: LivingDexSettings,
    ) -> LivingSet {
        let species = living_dex_species(save);
        let set = self.generate_living_set(save, &species, settings);
        info!(
            game = %save.game(),
            requested = species.len(),
            generated = set.entities.len(),
            attempts = set.attempts,
            "Generated living dex"
        );
        set
    }
}

/// Species ids a full living dex for this save should request.
pub fn living_dex_species<S: SaveContainer + ?Sized>(save: &S) -> Vec<Species> {
    let context = save.record_format().context();
    let additions = dex_additions(context);
    (1..=save.max_species_id())
        .map(Species)
        .filter(|&species| match context {
            GameContext::LetsGo => {
                species.id() <= 151 || species == Species::MELTAN || species == Species::MELMETAL
            }
            GameContext::SwordShield => {
                is_present_in_game(context, species, 0) || additions.contains(&species)
            }
            GameContext::Bdsp => is_present_in_game(context, species, 0),
            _ => true,
        })
        .collect()
}
