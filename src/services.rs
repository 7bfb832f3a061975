//! Collaborators the engine calls but does not implement: the validator,
//! record conversion, encounter enumeration, the set pipeline, the set text
//! codec and the save container.

use crate::entity::{Entity, MOVE_SLOTS};
use crate::regen::RegenTemplate;
use crate::trainer::TrainerInfo;
use schema::{GameVersion, RecordFormat, Species};

/// Decides whether an entity satisfies every in-game consistency rule.
/// Must be deterministic and free of side effects.
pub trait LegalityChecker {
    fn is_valid(&self, entity: &Entity) -> bool;
}

pub trait TemplateConverter {
    /// Convert to another record layout, `None` when the layout cannot hold it.
    fn convert(&self, entity: &Entity, target: RecordFormat) -> Option<Entity>;

    /// A fresh record for a generation/game.
    fn blank(&self, generation: u8, game: GameVersion) -> Entity {
        Entity::blank(RecordFormat::for_game(generation, game))
    }
}

pub trait EncounterGenerator {
    /// Every in-game encounter reachable from the blank's species for this
    /// trainer. The sequence is finite and a new call restarts it.
    fn generate<'a>(
        &'a self,
        blank: &Entity,
        trainer: &TrainerInfo,
    ) -> Box<dyn Iterator<Item = Entity> + 'a>;
}

/// Status reported by the set pipeline's conversion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalizationResult {
    Regenerated,
    Failed,
    Timeout,
    VersionMismatch,
}

pub trait SetPipeline {
    /// Copy a set's details onto a template record.
    fn apply_set_details(&self, template: &mut Entity, set: &RegenTemplate);

    /// Build a legal entity for `set` from `template` and report how it went.
    fn try_convert(
        &self,
        trainer: &TrainerInfo,
        set: &RegenTemplate,
        template: &Entity,
    ) -> (LegalizationResult, Entity);

    /// Best-effort single-entity repair. The result may still be invalid.
    fn legalize(&self, trainer: &TrainerInfo, entity: &Entity) -> Entity;
}

pub trait SetTextCodec {
    fn to_text(&self, entity: &Entity) -> String;
    fn parse(&self, text: &str) -> Option<RegenTemplate>;
}

/// Derived values the legality engine can suggest for a record.
pub trait Suggestions {
    fn suggested_moves(&self, entity: &Entity) -> [u16; MOVE_SLOTS];
    fn suggested_form_argument(&self, entity: &Entity, origin_species: Species) -> u32;
}

/// Everything the synthesis engine needs from the legality side.
pub trait LegalityBackend:
    LegalityChecker + TemplateConverter + EncounterGenerator + SetPipeline + SetTextCodec + Suggestions
{
}

impl<T> LegalityBackend for T where
    T: LegalityChecker
        + TemplateConverter
        + EncounterGenerator
        + SetPipeline
        + SetTextCodec
        + Suggestions
        + ?Sized
{
}

/// Box storage of a save file.
pub trait SaveContainer {
    fn game(&self) -> GameVersion;

    fn generation(&self) -> u8 {
        self.game().generation()
    }

    /// The save's own trainer identity.
    fn trainer(&self) -> TrainerInfo;

    fn max_species_id(&self) -> u16;

    fn box_count(&self) -> usize;

    fn has_box(&self) -> bool {
        self.box_count() > 0
    }

    fn box_data(&self, index: usize) -> Vec<Entity>;

    fn set_box_data(&mut self, data: &[Entity], index: usize);

    /// Layout the save stores entities as.
    fn record_format(&self) -> RecordFormat {
        RecordFormat::for_game(self.generation(), self.game())
    }
}
