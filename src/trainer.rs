//! Trainer identities used to stamp generated entities, and the file-backed
//! database they are resolved from.

use crate::entity::Entity;
use crate::errors::{ForgeError, ForgeResult};
use schema::{Gender, GameVersion, LanguageId, RecordFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Identity of the original trainer an entity is created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerInfo {
    pub ot_name: String,
    pub tid: u16,
    pub sid: u16,
    pub gender: Gender,
    pub language: LanguageId,
    pub game: GameVersion,
    pub generation: u8,
}

impl TrainerInfo {
    pub const DEFAULT_OT: &'static str = "FORGE";
    pub const DEFAULT_TID: u16 = 12345;
    pub const DEFAULT_SID: u16 = 54321;

    /// The built-in trainer for a game.
    pub fn new(game: GameVersion) -> Self {
        TrainerInfo {
            ot_name: Self::DEFAULT_OT.to_string(),
            tid: Self::DEFAULT_TID,
            sid: Self::DEFAULT_SID,
            gender: Gender::Male,
            language: LanguageId::English,
            game,
            generation: game.generation(),
        }
    }

    pub fn with_language(mut self, language: LanguageId) -> Self {
        self.language = language;
        self
    }

    /// Trainer details carried by an entity that has an origin game.
    pub fn from_entity(entity: &Entity) -> Option<Self> {
        let game = entity.version?;
        if entity.ot_name.is_empty() {
            return None;
        }
        Some(TrainerInfo {
            ot_name: entity.ot_name.clone(),
            tid: entity.tid,
            sid: entity.sid,
            gender: Gender::Male,
            language: entity.language,
            game,
            generation: game.generation(),
        })
    }

    /// Record layout entities created for this trainer use.
    pub fn format(&self) -> RecordFormat {
        RecordFormat::for_game(self.generation, self.game)
    }
}

/// Registered trainers, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TrainerDatabase {
    entries: Vec<TrainerInfo>,
}

impl TrainerDatabase {
    pub fn register(&mut self, trainer: TrainerInfo) {
        self.entries.push(trainer);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First trainer for `version`, preferring one with the requested language.
    pub fn get_trainer(
        &self,
        version: GameVersion,
        language: Option<LanguageId>,
    ) -> Option<&TrainerInfo> {
        self.first_matching(|t| t.game == version, language)
    }

    /// First trainer from `generation`, preferring one with the requested language.
    pub fn get_trainer_from_generation(
        &self,
        generation: u8,
        language: Option<LanguageId>,
    ) -> Option<&TrainerInfo> {
        self.first_matching(|t| t.generation == generation, language)
    }

    fn first_matching(
        &self,
        predicate: impl Fn(&TrainerInfo) -> bool,
        language: Option<LanguageId>,
    ) -> Option<&TrainerInfo> {
        if let Some(language) = language {
            let exact = self
                .entries
                .iter()
                .find(|t| predicate(t) && t.language == language);
            if exact.is_some() {
                return exact;
            }
        }
        self.entries.iter().find(|t| predicate(t))
    }
}

/// Trainer resolution: database lookups with a fallback chain ending in a
/// built-in default for the generation tier.
#[derive(Debug, Clone, Default)]
pub struct TrainerSettings {
    database: TrainerDatabase,
}

impl TrainerSettings {
    /// Build settings from a directory of entity files.
    pub fn from_path(path: &Path) -> ForgeResult<Self> {
        let mut settings = Self::default();
        settings.load_from_path(path)?;
        Ok(settings)
    }

    pub fn database(&self) -> &TrainerDatabase {
        &self.database
    }

    pub fn register(&mut self, trainer: TrainerInfo) {
        self.database.register(trainer);
    }

    /// Register the trainer of every decodable entity file under `path`.
    /// A missing directory registers nothing. Returns the number registered.
    pub fn load_from_path(&mut self, path: &Path) -> ForgeResult<usize> {
        if !path.is_dir() {
            debug!(path = %path.display(), "Trainer directory not found, skipping");
            return Ok(0);
        }

        let mut files = Vec::new();
        collect_files(path, &mut files)?;
        files.sort();

        let mut registered = 0;
        for file in files {
            match read_entity_file(&file) {
                Ok(entity) => match TrainerInfo::from_entity(&entity) {
                    Some(trainer) => {
                        self.database.register(trainer);
                        registered += 1;
                    }
                    None => warn!(file = %file.display(), "Entity has no trainer details"),
                },
                Err(e) => warn!(file = %file.display(), error = %e, "Skipping unreadable entity file"),
            }
        }

        info!(registered, path = %path.display(), "Loaded trainer database");
        Ok(registered)
    }

    /// Built-in trainer for a generation tier.
    pub fn default_for_generation(generation: u8, language: Option<LanguageId>) -> TrainerInfo {
        let game = if generation > 7 {
            GameVersion::Sword
        } else {
            GameVersion::UltraMoon
        };
        Self::default_for_version(game, language)
    }

    /// Built-in trainer for a specific version.
    pub fn default_for_version(version: GameVersion, language: Option<LanguageId>) -> TrainerInfo {
        let trainer = TrainerInfo::new(version);
        match language {
            Some(language) => trainer.with_language(language),
            None => trainer,
        }
    }

    /// Resolve a trainer for a version/generation.
    ///
    /// Order: exact version (+language) in the database, then everything
    /// [`Self::get_generation_trainer_data`] tries.
    pub fn get_saved_trainer_data(
        &self,
        version: GameVersion,
        generation: u8,
        fallback: Option<&TrainerInfo>,
        language: Option<LanguageId>,
    ) -> TrainerInfo {
        if let Some(trainer) = self.database.get_trainer(version, language) {
            return trainer.clone();
        }
        self.get_generation_trainer_data(generation, version, fallback, language)
    }

    /// Resolve a trainer by generation only: the first registered trainer of
    /// `generation` (+language) unless `version` is a fringe title, then
    /// `fallback` when its language fits, then the built-in default.
    pub fn get_generation_trainer_data(
        &self,
        generation: u8,
        version: GameVersion,
        fallback: Option<&TrainerInfo>,
        language: Option<LanguageId>,
    ) -> TrainerInfo {
        let fringe = version.is_fringe();
        if !fringe {
            if let Some(trainer) = self.database.get_trainer_from_generation(generation, language) {
                return trainer.clone();
            }
        }

        if let Some(fallback) = fallback {
            if language.map_or(true, |lang| lang == fallback.language) {
                return fallback.clone();
            }
        }

        if fringe {
            Self::default_for_version(version, language)
        } else {
            Self::default_for_generation(generation, language)
        }
    }

    /// Trainer for re-creating `entity`, using its current format when it
    /// has been transferred away from its origin generation.
    pub fn for_entity(
        &self,
        entity: &Entity,
        template_save: &TrainerInfo,
        language: Option<LanguageId>,
    ) -> TrainerInfo {
        let format = entity.generation();
        match (entity.version, entity.origin_generation()) {
            (Some(version), Some(origin)) if origin == format => {
                self.get_saved_trainer_data(version, origin, Some(template_save), language)
            }
            _ => self.get_generation_trainer_data(
                format,
                template_save.game,
                Some(template_save),
                language,
            ),
        }
    }
}

fn collect_files(dir: &Path, files: &mut Vec<std::path::PathBuf>) -> ForgeResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| ForgeError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ForgeError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Decode one postcard-encoded entity file.
pub fn read_entity_file(path: &Path) -> ForgeResult<Entity> {
    let bytes = fs::read(path).map_err(|e| ForgeError::io(path, e))?;
    Ok(postcard::from_bytes(&bytes)?)
}

/// Encode one entity to a postcard file.
pub fn write_entity_file(path: &Path, entity: &Entity) -> ForgeResult<()> {
    let bytes = postcard::to_allocvec(entity)?;
    fs::write(path, bytes).map_err(|e| ForgeError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn trainer(name: &str, game: GameVersion, language: LanguageId) -> TrainerInfo {
        let mut trainer = TrainerInfo::new(game).with_language(language);
        trainer.ot_name = name.to_string();
        trainer
    }

    fn populated() -> TrainerSettings {
        let mut settings = TrainerSettings::default();
        settings.register(trainer("Ash", GameVersion::Sword, LanguageId::English));
        settings.register(trainer("Satoshi", GameVersion::Sword, LanguageId::Japanese));
        settings.register(trainer("Hop", GameVersion::Shield, LanguageId::French));
        settings.register(trainer("Dawn", GameVersion::BrilliantDiamond, LanguageId::English));
        settings
    }

    #[rstest]
    #[case(GameVersion::Sword, 8, Some(LanguageId::Japanese), "Satoshi")]
    #[case(GameVersion::Sword, 8, Some(LanguageId::German), "Ash")]
    #[case(GameVersion::Sword, 8, None, "Ash")]
    #[case(GameVersion::Shield, 8, Some(LanguageId::French), "Hop")]
    #[case(GameVersion::Shield, 8, Some(LanguageId::English), "Hop")]
    #[case(GameVersion::LegendsArceus, 8, Some(LanguageId::English), TrainerInfo::DEFAULT_OT)]
    #[case(GameVersion::UltraSun, 7, None, TrainerInfo::DEFAULT_OT)]
    fn test_resolution_chain(
        #[case] version: GameVersion,
        #[case] generation: u8,
        #[case] language: Option<LanguageId>,
        #[case] expected: &str,
    ) {
        let settings = populated();
        let resolved = settings.get_saved_trainer_data(version, generation, None, language);
        assert_eq!(resolved.ot_name, expected);
    }

    #[test]
    fn test_generation_lookup_uses_registration_order() {
        let settings = populated();
        let resolved =
            settings.get_saved_trainer_data(GameVersion::BrilliantDiamond, 8, None, None);
        assert_eq!(resolved.ot_name, "Dawn");

        // Shining Pearl is fringe, so the Sword trainers are never borrowed
        let resolved = settings.get_saved_trainer_data(GameVersion::ShiningPearl, 8, None, None);
        assert_eq!(resolved.game, GameVersion::ShiningPearl);
        assert_eq!(resolved.ot_name, TrainerInfo::DEFAULT_OT);
    }

    #[test]
    fn test_fallback_used_only_when_language_fits() {
        let settings = TrainerSettings::default();
        let save = trainer("Save", GameVersion::Crystal, LanguageId::Italian);

        let resolved = settings.get_saved_trainer_data(
            GameVersion::Crystal,
            2,
            Some(&save),
            Some(LanguageId::Italian),
        );
        assert_eq!(resolved, save);

        let resolved = settings.get_saved_trainer_data(
            GameVersion::Crystal,
            2,
            Some(&save),
            Some(LanguageId::Korean),
        );
        assert_eq!(resolved.game, GameVersion::UltraMoon);
        assert_eq!(resolved.language, LanguageId::Korean);
    }

    #[rstest]
    #[case::transferred(RecordFormat::Pk8, Some(GameVersion::UltraMoon), "GenFirst")]
    #[case::no_origin(RecordFormat::Pk8, None, "GenFirst")]
    #[case::native(RecordFormat::Pk8, Some(GameVersion::Sword), "VerLater")]
    #[case::transferred_without_trainer(RecordFormat::Pk7, Some(GameVersion::Crystal), "Save")]
    fn test_for_entity_trainer(
        #[case] format: RecordFormat,
        #[case] version: Option<GameVersion>,
        #[case] expected: &str,
    ) {
        let mut settings = TrainerSettings::default();
        settings.register(trainer("GenFirst", GameVersion::Shield, LanguageId::English));
        settings.register(trainer("VerLater", GameVersion::Sword, LanguageId::English));
        let save = trainer("Save", GameVersion::Sword, LanguageId::English);

        let mut entity = Entity::blank(format);
        entity.species = schema::Species::PIKACHU;
        entity.version = version;

        let resolved = settings.for_entity(&entity, &save, None);
        assert_eq!(resolved.ot_name, expected);
    }

    #[test]
    fn test_database_clear() {
        let mut database = TrainerDatabase::default();
        database.register(trainer("Ash", GameVersion::Sword, LanguageId::English));
        assert_eq!(database.len(), 1);

        database.clear();
        assert!(database.is_empty());
        assert_eq!(database.get_trainer(GameVersion::Sword, None), None);
    }

    #[test]
    fn test_default_tiers() {
        assert_eq!(
            TrainerSettings::default_for_generation(8, None).game,
            GameVersion::Sword
        );
        assert_eq!(
            TrainerSettings::default_for_generation(3, None).game,
            GameVersion::UltraMoon
        );
    }

    #[test]
    fn test_load_from_path_skips_garbage_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("swsh");
        fs::create_dir_all(&nested).expect("nested dir");

        let mut entity = Entity::blank(RecordFormat::Pk8);
        entity.species = schema::Species::PIKACHU;
        entity.apply_trainer(&trainer("Leon", GameVersion::Sword, LanguageId::English));
        write_entity_file(&nested.join("leon.pk8"), &entity).expect("write entity");
        fs::write(dir.path().join("notes.txt"), b"\xff\xff\xff").expect("write garbage");

        let settings = TrainerSettings::from_path(dir.path()).expect("load");
        assert_eq!(settings.database().len(), 1);
        let resolved = settings.get_saved_trainer_data(GameVersion::Sword, 8, None, None);
        assert_eq!(resolved.ot_name, "Leon");
    }

    #[test]
    fn test_missing_directory_registers_nothing() {
        let mut settings = TrainerSettings::default();
        let registered = settings
            .load_from_path(Path::new("/definitely/not/a/trainer/dir"))
            .expect("missing directory is not an error");
        assert_eq!(registered, 0);
    }
}
