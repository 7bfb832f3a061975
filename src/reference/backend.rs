//! A table-driven legality backend over the personal tables and rule tables.
//!
//! It is deliberately small: it checks the rules the synthesis engine itself
//! relies on (presence, forms, items, genders, shiny locks, move sanity,
//! origin stamps) and repairs records by rebuilding them through its own set
//! pipeline. It does not model encounter slots, PID correlations or stats.

use crate::entity::{Entity, MAX_LEVEL, MOVE_SLOTS};
use crate::personal::{form_count, is_present_in_game, personal_info};
use crate::regen::RegenTemplate;
use crate::services::{
    EncounterGenerator, LegalityChecker, LegalizationResult, SetPipeline, Suggestions,
    TemplateConverter,
};
use crate::synthesis::rules::{
    battle_move_replacement, form_item, form_signature_move, is_battle_only_form,
    is_dual_gender_form, is_shiny_locked, out_of_battle_form,
};
use crate::trainer::TrainerInfo;
use rand::Rng;
use schema::{moves, Gender, GameContext, RecordFormat, Species};
use thiserror::Error;
use tracing::debug;

/// Level wild encounters of the requested species are generated at.
pub const ENCOUNTER_LEVEL: u8 = 50;
/// Level encounters of a pre-evolution are generated at.
pub const RELATIVE_ENCOUNTER_LEVEL: u8 = 5;

/// A rule an entity breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("slot is empty")]
    Empty,
    #[error("{species} form {form} is not obtainable in this game")]
    NotInGame { species: Species, form: u8 },
    #[error("level {0} is out of range")]
    Level(u8),
    #[error("{0} cannot be shiny")]
    ShinyLocked(Species),
    #[error("record type has no alpha attribute")]
    AlphaUnsupported,
    #[error("gender does not match species data")]
    Gender,
    #[error("form requires held item {required}")]
    FormItem { required: u16 },
    #[error("form {0} only exists in battle")]
    BattleOnlyForm(u8),
    #[error("move {0} only exists in battle")]
    BattleOnlyMove(u16),
    #[error("move {0} appears more than once")]
    DuplicateMove(u16),
    #[error("no moves")]
    NoMoves,
    #[error("form requires move {0}")]
    SignatureMove(u16),
    #[error("no origin game")]
    NoOrigin,
    #[error("origin generation {origin} is newer than the record type")]
    FutureOrigin { origin: u8 },
    #[error("no original trainer")]
    NoTrainer,
    #[error("no nickname")]
    NoNickname,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    pub fn new() -> Self {
        ReferenceBackend
    }

    /// Every rule `entity` breaks, in check order.
    pub fn violations(&self, entity: &Entity) -> Vec<Violation> {
        if entity.is_empty() {
            return vec![Violation::Empty];
        }

        let mut found = Vec::new();
        let context = entity.format.context();
        let generation = entity.generation();

        if !is_present_in_game(context, entity.species, entity.form) {
            found.push(Violation::NotInGame {
                species: entity.species,
                form: entity.form,
            });
        }
        if entity.level == 0 || entity.level > MAX_LEVEL {
            found.push(Violation::Level(entity.level));
        }
        if entity.shiny && is_shiny_locked(entity.species, entity.form) {
            found.push(Violation::ShinyLocked(entity.species));
        }
        if entity.alpha && !entity.format.has_alpha() {
            found.push(Violation::AlphaUnsupported);
        }
        if !gender_matches(entity) {
            found.push(Violation::Gender);
        }

        let game = entity.version.unwrap_or_else(|| context.default_version());
        if let Some(required) = form_item(game, entity.species, entity.form) {
            if required != 0 && entity.held_item != required {
                found.push(Violation::FormItem { required });
            }
        }
        if is_battle_only_form(entity.species, entity.form, generation) {
            found.push(Violation::BattleOnlyForm(entity.form));
        }

        for (index, &move_id) in entity.moves.iter().enumerate() {
            if move_id == 0 {
                continue;
            }
            if battle_move_replacement(entity.species, move_id).is_some() {
                found.push(Violation::BattleOnlyMove(move_id));
            }
            if entity.moves[..index].contains(&move_id) {
                found.push(Violation::DuplicateMove(move_id));
            }
        }
        if entity.moves.iter().all(|&m| m == 0) {
            found.push(Violation::NoMoves);
        }
        if let Some((_, required)) = form_signature_move(entity.species, entity.form) {
            if !entity.has_move(required) {
                found.push(Violation::SignatureMove(required));
            }
        }

        match entity.origin_generation() {
            None => found.push(Violation::NoOrigin),
            Some(origin) if origin > generation => found.push(Violation::FutureOrigin { origin }),
            Some(_) => {}
        }
        if entity.ot_name.is_empty() {
            found.push(Violation::NoTrainer);
        }
        if entity.nickname.is_empty() {
            found.push(Violation::NoNickname);
        }
        found
    }

    /// A fresh wild encounter of `species`/`form` for `trainer`.
    fn encounter(&self, trainer: &TrainerInfo, species: Species, form: u8, level: u8) -> Entity {
        let mut entity = Entity::blank(trainer.format());
        entity.species = species;
        entity.form = form;
        entity.level = level;
        entity.apply_trainer(trainer);
        entity.gender = entity.sane_gender();
        if is_dual_gender_form(species) {
            entity.gender = Gender::from_index(form).unwrap_or(Gender::Male);
        }
        if let Some(item) = form_item(trainer.game, species, form) {
            entity.held_item = item;
        }
        entity.nickname = entity.default_nickname();
        let moves = self.suggested_moves(&entity);
        entity.set_moves(moves);
        entity.refresh_ability(0);
        roll_identity(&mut entity);
        entity
    }
}

fn gender_matches(entity: &Entity) -> bool {
    if is_dual_gender_form(entity.species) {
        return entity.gender.index() == entity.form;
    }
    match entity.personal().and_then(|info| info.fixed_gender()) {
        Some(fixed) => entity.gender == fixed,
        None => entity.gender != Gender::Genderless,
    }
}

/// Roll PID, encryption constant and size scalars, and set full HP.
fn roll_identity(entity: &mut Entity) {
    let mut rng = rand::rng();
    if entity.pid == 0 {
        entity.pid = rng.random();
    }
    if entity.encryption_constant == 0 {
        entity.encryption_constant = rng.random();
    }
    entity.height_scalar = rng.random();
    entity.weight_scalar = rng.random();
    entity.refresh_scaled_size();
    entity.max_hp = u16::from(entity.level) * 2 + 10;
    entity.heal();
}

/// Species line from the earliest pre-evolution to `species`.
fn evolution_chain(context: GameContext, species: Species) -> Vec<Species> {
    let mut chain = vec![species];
    let mut current = species;
    while let Some(previous) = personal_info(context, current, 0).and_then(|info| info.pre_evolution) {
        if chain.contains(&previous) {
            break;
        }
        chain.push(previous);
        current = previous;
    }
    chain.reverse();
    chain
}

impl LegalityChecker for ReferenceBackend {
    fn is_valid(&self, entity: &Entity) -> bool {
        self.violations(entity).is_empty()
    }
}

impl TemplateConverter for ReferenceBackend {
    fn convert(&self, entity: &Entity, target: RecordFormat) -> Option<Entity> {
        if entity.format == target {
            return Some(entity.clone());
        }
        if target.generation() < entity.generation() {
            return None;
        }
        let context = target.context();
        if context.has_presence_flags() && !is_present_in_game(context, entity.species, entity.form) {
            return None;
        }

        let mut converted = entity.clone();
        converted.format = target;
        if !target.has_alpha() {
            converted.alpha = false;
        }
        if !converted.is_nicknamed {
            converted.nickname = converted.default_nickname();
        }
        converted.refresh_ability(converted.ability_number >> 1);
        converted.refresh_scaled_size();
        Some(converted)
    }
}

impl EncounterGenerator for ReferenceBackend {
    fn generate<'a>(
        &'a self,
        blank: &Entity,
        trainer: &TrainerInfo,
    ) -> Box<dyn Iterator<Item = Entity> + 'a> {
        let context = trainer.game.context();
        let target = blank.species;
        let generation = trainer.generation;

        let slots: Vec<(Species, u8, u8)> = evolution_chain(context, target)
            .into_iter()
            .flat_map(|species| {
                let level = if species == target {
                    ENCOUNTER_LEVEL
                } else {
                    RELATIVE_ENCOUNTER_LEVEL
                };
                (0..form_count(context, species))
                    .filter(move |&form| {
                        is_present_in_game(context, species, form)
                            && !is_battle_only_form(species, form, generation)
                    })
                    .map(move |form| (species, form, level))
            })
            .collect();

        let trainer = trainer.clone();
        Box::new(
            slots
                .into_iter()
                .map(move |(species, form, level)| self.encounter(&trainer, species, form, level)),
        )
    }
}

impl SetPipeline for ReferenceBackend {
    fn apply_set_details(&self, template: &mut Entity, set: &RegenTemplate) {
        template.species = set.species;
        template.form = set.form;
        template.gender = set.gender.unwrap_or_else(|| template.sane_gender());
        template.shiny = set.shiny;
        template.alpha = set.alpha && template.format.has_alpha();
        template.level = set.level;
        template.held_item = set.held_item;
        if set.has_moves() {
            template.set_moves(set.moves);
        } else {
            let moves = self.suggested_moves(template);
            template.set_moves(moves);
        }
        if let Some(nickname) = &set.nickname {
            template.nickname = nickname.clone();
            template.is_nicknamed = true;
        }
    }

    fn try_convert(
        &self,
        trainer: &TrainerInfo,
        set: &RegenTemplate,
        template: &Entity,
    ) -> (LegalizationResult, Entity) {
        let mut entity = template.clone();
        let context = entity.format.context();
        if !is_present_in_game(context, set.species, set.form) {
            debug!(species = %set.species, form = set.form, "Set is not obtainable");
            return (LegalizationResult::Failed, entity);
        }

        entity.apply_trainer(trainer);
        let generation = entity.generation();
        entity.form = out_of_battle_form(entity.species, entity.form, generation);
        entity.level = entity.level.clamp(1, MAX_LEVEL);
        if !entity.format.has_alpha() {
            entity.alpha = false;
        }
        if is_shiny_locked(entity.species, entity.form) {
            entity.shiny = false;
        }

        if is_dual_gender_form(entity.species) {
            entity.gender = Gender::from_index(entity.form).unwrap_or(Gender::Male);
        } else {
            entity.gender = entity.sane_gender();
        }
        if let Some(item) = form_item(trainer.game, entity.species, entity.form) {
            if item != 0 {
                entity.held_item = item;
            }
        }

        entity.set_moves(repair_moves(self, &entity));
        if !entity.is_nicknamed || entity.nickname.is_empty() {
            entity.is_nicknamed = false;
            entity.nickname = entity.default_nickname();
        }
        entity.refresh_ability(entity.ability_number >> 1);
        roll_identity(&mut entity);

        let result = if self.is_valid(&entity) {
            LegalizationResult::Regenerated
        } else {
            LegalizationResult::Failed
        };
        (result, entity)
    }

    fn legalize(&self, trainer: &TrainerInfo, entity: &Entity) -> Entity {
        let mut set = RegenTemplate::from_entity(entity);
        set.format = trainer.generation;
        set.normalize(trainer.game.context());

        let mut template = self.blank(trainer.generation, trainer.game);
        self.apply_set_details(&mut template, &set);
        let (result, repaired) = self.try_convert(trainer, &set, &template);
        debug!(species = %entity.species, ?result, "Legalized entity");
        repaired
    }
}

/// Move list with battle-only moves replaced, duplicates dropped and the
/// form's signature move in place; falls back to suggestions when empty.
fn repair_moves(backend: &ReferenceBackend, entity: &Entity) -> [u16; MOVE_SLOTS] {
    let mut kept: Vec<u16> = Vec::with_capacity(MOVE_SLOTS);
    for &move_id in entity.moves.iter().filter(|&&m| m != 0) {
        let move_id = battle_move_replacement(entity.species, move_id).unwrap_or(move_id);
        if !kept.contains(&move_id) {
            kept.push(move_id);
        }
    }

    let mut repaired = [0; MOVE_SLOTS];
    if kept.is_empty() {
        repaired = backend.suggested_moves(entity);
    } else {
        repaired[..kept.len()].copy_from_slice(&kept);
    }
    if let Some((slot, required)) = form_signature_move(entity.species, entity.form) {
        if !repaired.contains(&required) {
            repaired[slot] = required;
        }
    }
    repaired
}

impl Suggestions for ReferenceBackend {
    fn suggested_moves(&self, entity: &Entity) -> [u16; MOVE_SLOTS] {
        match (entity.species, entity.form) {
            (Species::KELDEO, 1) => [moves::SECRET_SWORD, moves::TACKLE, 0, 0],
            (Species::ZACIAN | Species::ZAMAZENTA, _) => [moves::IRON_HEAD, moves::TACKLE, 0, 0],
            _ => [moves::TACKLE, 0, 0, 0],
        }
    }

    fn suggested_form_argument(&self, entity: &Entity, _origin_species: Species) -> u32 {
        match (entity.species, entity.form) {
            (Species::FURFROU, form) if form != 0 => 5,
            (Species::HOOPA, 1) => 3,
            _ => 0,
        }
    }
}
