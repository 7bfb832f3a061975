//! The normalized request object the set pipeline consumes, and text export
//! of stored entities back into set descriptors.

use crate::entity::{Entity, MOVE_SLOTS};
use crate::errors::{ContainerError, ContainerResult};
use crate::services::{SaveContainer, SetTextCodec};
use schema::{Gender, Species};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVEL: u8 = 100;

/// A parsed set descriptor, normalized for regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenTemplate {
    pub species: Species,
    pub form: u8,
    pub gender: Option<Gender>,
    pub shiny: bool,
    pub alpha: bool,
    pub level: u8,
    pub held_item: u16,
    pub moves: [u16; MOVE_SLOTS],
    pub nickname: Option<String>,
    /// Generation the set is interpreted in
    pub format: u8,
}

impl RegenTemplate {
    pub fn new(species: Species, format: u8) -> Self {
        RegenTemplate {
            species,
            form: 0,
            gender: None,
            shiny: false,
            alpha: false,
            level: DEFAULT_LEVEL,
            held_item: 0,
            moves: [0; MOVE_SLOTS],
            nickname: None,
            format,
        }
    }

    pub fn from_entity(entity: &Entity) -> Self {
        RegenTemplate {
            species: entity.species,
            form: entity.form,
            gender: Some(entity.gender),
            shiny: entity.shiny,
            alpha: entity.alpha,
            level: entity.level,
            held_item: entity.held_item,
            moves: entity.moves,
            nickname: entity.is_nicknamed.then(|| entity.nickname.clone()),
            format: entity.generation(),
        }
    }

    pub fn has_moves(&self) -> bool {
        self.moves.iter().any(|&m| m != 0)
    }
}

/// Set text for one entity; empty slots produce an empty string.
pub fn regen_text<C: SetTextCodec + ?Sized>(codec: &C, entity: &Entity) -> String {
    if entity.is_empty() {
        return String::new();
    }
    codec.to_text(entity)
}

/// Set text for every occupied slot.
pub fn regen_sets<C: SetTextCodec + ?Sized>(codec: &C, entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .filter(|e| !e.is_empty())
        .map(|e| regen_text(codec, e))
        .collect()
}

pub fn regen_sets_joined<C: SetTextCodec + ?Sized>(
    codec: &C,
    entities: &[Entity],
    separator: &str,
) -> String {
    regen_sets(codec, entities).join(separator)
}

/// All sets in one box, separated by a blank line.
pub fn regen_sets_from_box<C, S>(codec: &C, save: &S, index: usize) -> ContainerResult<String>
where
    C: SetTextCodec + ?Sized,
    S: SaveContainer + ?Sized,
{
    if !save.has_box() {
        return Err(ContainerError::NoContainers);
    }
    if index >= save.box_count() {
        return Err(ContainerError::InvalidIndex {
            index,
            count: save.box_count(),
        });
    }
    let data = save.box_data(index);
    Ok(regen_sets_joined(codec, &data, "\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{MemorySave, SetText};
    use pretty_assertions::assert_eq;
    use schema::{GameVersion, RecordFormat};

    fn entity(species: Species) -> Entity {
        let mut entity = Entity::blank(RecordFormat::Pk8);
        entity.species = species;
        entity.level = 100;
        entity
    }

    #[test]
    fn test_empty_slots_are_skipped() {
        let data = vec![
            entity(Species::PIKACHU),
            Entity::blank(RecordFormat::Pk8),
            entity(Species::ZACIAN),
        ];
        let sets = regen_sets(&SetText, &data);
        assert_eq!(sets.len(), 2);
        assert!(sets[0].starts_with("Pikachu"));
        assert!(sets[1].starts_with("Zacian"));
        assert_eq!(regen_text(&SetText, &data[1]), "");
    }

    #[test]
    fn test_box_export_checks_index() {
        let mut save = MemorySave::new(GameVersion::Sword, 2, 30);
        save.set_slot(1, 0, entity(Species::BULBASAUR));

        let text = regen_sets_from_box(&SetText, &save, 1).expect("box 1 exists");
        assert!(text.starts_with("Bulbasaur"));
        assert_eq!(
            regen_sets_from_box(&SetText, &save, 2),
            Err(ContainerError::InvalidIndex { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_template_keeps_nickname_only_when_nicknamed() {
        let mut source = entity(Species::PIKACHU);
        source.nickname = "Sparky".to_string();
        assert_eq!(RegenTemplate::from_entity(&source).nickname, None);
        source.is_nicknamed = true;
        assert_eq!(
            RegenTemplate::from_entity(&source).nickname.as_deref(),
            Some("Sparky")
        );
    }
}
