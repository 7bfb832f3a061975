use crate::entity::Entity;
use crate::errors::{ForgeError, ForgeResult};
use crate::personal::max_species_id;
use crate::services::SaveContainer;
use crate::trainer::TrainerInfo;
use schema::GameVersion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// An in-memory save: a trainer plus fixed-size boxes of entities.
/// Stored on disk as a RON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySave {
    pub game: GameVersion,
    pub trainer: TrainerInfo,
    /// Overrides the highest species id of the game's personal table
    #[serde(default)]
    pub max_species: Option<u16>,
    pub boxes: Vec<Vec<Entity>>,
}

impl MemorySave {
    /// A save for `game` with `box_count` boxes of empty slots.
    pub fn new(game: GameVersion, box_count: usize, box_capacity: usize) -> Self {
        let trainer = TrainerInfo::new(game);
        let empty = Entity::blank(trainer.format());
        MemorySave {
            game,
            trainer,
            max_species: None,
            boxes: vec![vec![empty; box_capacity]; box_count],
        }
    }

    /// Put `entity` in a slot, growing the box if needed.
    pub fn set_slot(&mut self, box_index: usize, slot: usize, entity: Entity) {
        let empty = Entity::blank(self.record_format());
        let Some(data) = self.boxes.get_mut(box_index) else {
            return;
        };
        if data.len() <= slot {
            data.resize(slot + 1, empty);
        }
        data[slot] = entity;
    }

    pub fn load(path: &Path) -> ForgeResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ForgeError::io(path, e))?;
        let save: MemorySave = ron::from_str(&text).map_err(|e| ForgeError::Document {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        debug!(path = %path.display(), boxes = save.boxes.len(), "Loaded save");
        Ok(save)
    }

    pub fn save(&self, path: &Path) -> ForgeResult<()> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(
            |e| ForgeError::Document {
                path: path.to_path_buf(),
                details: e.to_string(),
            },
        )?;
        fs::write(path, text).map_err(|e| ForgeError::io(path, e))
    }
}

impl SaveContainer for MemorySave {
    fn game(&self) -> GameVersion {
        self.game
    }

    fn trainer(&self) -> TrainerInfo {
        self.trainer.clone()
    }

    fn max_species_id(&self) -> u16 {
        self.max_species
            .unwrap_or_else(|| max_species_id(self.game.context()))
    }

    fn box_count(&self) -> usize {
        self.boxes.len()
    }

    fn box_data(&self, index: usize) -> Vec<Entity> {
        self.boxes.get(index).cloned().unwrap_or_default()
    }

    fn set_box_data(&mut self, data: &[Entity], index: usize) {
        if let Some(target) = self.boxes.get_mut(index) {
            *target = data.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{RecordFormat, Species};

    #[test]
    fn test_new_save_has_empty_boxes_of_the_game_layout() {
        let save = MemorySave::new(GameVersion::LegendsArceus, 2, 3);
        assert_eq!(save.box_count(), 2);
        let data = save.box_data(1);
        assert_eq!(data.len(), 3);
        assert!(data.iter().all(Entity::is_empty));
        assert!(data.iter().all(|e| e.format == RecordFormat::Pa8));
        assert_eq!(save.max_species_id(), 905);
    }

    #[test]
    fn test_ron_round_trip_on_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("save.ron");

        let mut save = MemorySave::new(GameVersion::Sword, 1, 2);
        let mut entity = Entity::blank(RecordFormat::Pk8);
        entity.species = Species::PIKACHU;
        save.set_slot(0, 1, entity);
        save.save(&path).expect("write save");

        let loaded = MemorySave::load(&path).expect("read save");
        assert_eq!(loaded, save);
    }

    #[test]
    fn test_missing_save_is_an_io_error() {
        let result = MemorySave::load(Path::new("/no/such/save.ron"));
        assert!(matches!(result, Err(ForgeError::Io { .. })));
    }
}
