use crate::entity::{Entity, MOVE_SLOTS};
use crate::reference::ReferenceBackend;
use crate::regen::RegenTemplate;
use crate::services::{
    EncounterGenerator, LegalityChecker, LegalizationResult, SetPipeline, SetTextCodec,
    Suggestions, TemplateConverter,
};
use crate::trainer::TrainerInfo;
use schema::{GameVersion, RecordFormat, Species};

/// The reference backend with individual collaborators scripted to fail or
/// to return fixed data.
///
/// # Example
/// ```
/// let backend = ScriptedBackend::new()
///     .failing_pipeline()
///     .with_encounters(vec![]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    inner: ReferenceBackend,
    fail_pipeline: bool,
    fail_conversion: bool,
    rejected_origins: Vec<GameVersion>,
    rejected_formats: Vec<RecordFormat>,
    encounters: Option<Vec<Entity>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `try_convert` always reports a failure.
    pub fn failing_pipeline(mut self) -> Self {
        self.fail_pipeline = true;
        self
    }

    /// `convert` refuses every format change.
    pub fn failing_conversion(mut self) -> Self {
        self.fail_conversion = true;
        self
    }

    /// The validator refuses anything originating from `version`.
    pub fn rejecting_origin(mut self, version: GameVersion) -> Self {
        self.rejected_origins.push(version);
        self
    }

    /// The validator refuses anything stored as `format`.
    pub fn rejecting_format(mut self, format: RecordFormat) -> Self {
        self.rejected_formats.push(format);
        self
    }

    /// The generator yields exactly these encounters.
    pub fn with_encounters(mut self, encounters: Vec<Entity>) -> Self {
        self.encounters = Some(encounters);
        self
    }
}

impl LegalityChecker for ScriptedBackend {
    fn is_valid(&self, entity: &Entity) -> bool {
        let rejected = entity
            .version
            .is_some_and(|version| self.rejected_origins.contains(&version));
        !rejected
            && !self.rejected_formats.contains(&entity.format)
            && self.inner.is_valid(entity)
    }
}

impl TemplateConverter for ScriptedBackend {
    fn convert(&self, entity: &Entity, target: RecordFormat) -> Option<Entity> {
        if self.fail_conversion && entity.format != target {
            return None;
        }
        self.inner.convert(entity, target)
    }
}

impl EncounterGenerator for ScriptedBackend {
    fn generate<'a>(
        &'a self,
        blank: &Entity,
        trainer: &TrainerInfo,
    ) -> Box<dyn Iterator<Item = Entity> + 'a> {
        match &self.encounters {
            Some(encounters) => Box::new(encounters.iter().cloned()),
            None => self.inner.generate(blank, trainer),
        }
    }
}

impl SetPipeline for ScriptedBackend {
    fn apply_set_details(&self, template: &mut Entity, set: &RegenTemplate) {
        self.inner.apply_set_details(template, set);
    }

    fn try_convert(
        &self,
        trainer: &TrainerInfo,
        set: &RegenTemplate,
        template: &Entity,
    ) -> (LegalizationResult, Entity) {
        if self.fail_pipeline {
            return (LegalizationResult::Failed, template.clone());
        }
        let (result, entity) = self.inner.try_convert(trainer, set, template);
        if result == LegalizationResult::Regenerated && !self.is_valid(&entity) {
            return (LegalizationResult::Failed, entity);
        }
        (result, entity)
    }

    fn legalize(&self, trainer: &TrainerInfo, entity: &Entity) -> Entity {
        self.inner.legalize(trainer, entity)
    }
}

impl SetTextCodec for ScriptedBackend {
    fn to_text(&self, entity: &Entity) -> String {
        self.inner.to_text(entity)
    }

    fn parse(&self, text: &str) -> Option<RegenTemplate> {
        self.inner.parse(text)
    }
}

impl Suggestions for ScriptedBackend {
    fn suggested_moves(&self, entity: &Entity) -> [u16; MOVE_SLOTS] {
        self.inner.suggested_moves(entity)
    }

    fn suggested_form_argument(&self, entity: &Entity, origin_species: Species) -> u32 {
        self.inner.suggested_form_argument(entity, origin_species)
    }
}

/// A valid entity built through the reference pipeline.
pub fn legal_entity(trainer: &TrainerInfo, species: Species, form: u8) -> Entity {
    let backend = ReferenceBackend;
    let mut set = RegenTemplate::new(species, trainer.generation);
    set.form = form;
    let mut template = backend.blank(trainer.generation, trainer.game);
    backend.apply_set_details(&mut template, &set);
    let (result, entity) = backend.try_convert(trainer, &set, &template);
    match result {
        LegalizationResult::Regenerated => entity,
        other => panic!(
            "Failed to build legal {} form {}: {:?} {:?}",
            species,
            form,
            other,
            backend.violations(&entity)
        ),
    }
}

/// A blank for the trainer with species and form already resolved.
pub fn working_blank(trainer: &TrainerInfo, species: Species, form: u8) -> Entity {
    let mut blank = Entity::blank(trainer.format());
    blank.species = species;
    blank.form = form;
    blank.version = Some(trainer.game);
    blank.gender = blank.sane_gender();
    blank
}

pub fn sword() -> TrainerInfo {
    TrainerInfo::new(GameVersion::Sword)
}
