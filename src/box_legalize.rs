//! Batch repair of invalid entities stored in a save's boxes.

use crate::entity::Entity;
use crate::errors::{ContainerError, ContainerResult};
use crate::services::{LegalityBackend, SaveContainer};
use crate::trainer::{TrainerInfo, TrainerSettings};
use tracing::{debug, info};

pub struct BoxLegalizer<'a, B: LegalityBackend + ?Sized> {
    backend: &'a B,
    trainers: Option<&'a TrainerSettings>,
}

impl<'a, B: LegalityBackend + ?Sized> BoxLegalizer<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        BoxLegalizer {
            backend,
            trainers: None,
        }
    }

    /// Resolve each entity's trainer from the database instead of the save.
    pub fn with_trainer_settings(mut self, trainers: &'a TrainerSettings) -> Self {
        self.trainers = Some(trainers);
        self
    }

    fn trainer_for(&self, entity: &Entity, save_trainer: &TrainerInfo) -> TrainerInfo {
        match self.trainers {
            Some(settings) => settings.for_entity(entity, save_trainer, None),
            None => save_trainer.clone(),
        }
    }

    /// Repair every invalid entry in place. Empty and already valid entries
    /// are not touched, and a repair only replaces its entry when the result
    /// is valid. Returns the number of entries replaced.
    pub fn legalize_all(&self, save_trainer: &TrainerInfo, data: &mut [Entity]) -> usize {
        let mut repaired = 0;
        for (slot, entry) in data.iter_mut().enumerate() {
            if entry.is_empty() || self.backend.is_valid(entry) {
                continue;
            }

            let trainer = self.trainer_for(entry, save_trainer);
            let mut result = self.backend.legalize(&trainer, entry);
            result.heal();
            if !self.backend.is_valid(&result) {
                debug!(slot, species = %entry.species, "Could not legalize entry");
                continue;
            }

            *entry = result;
            repaired += 1;
        }
        repaired
    }

    /// Repair one box, writing it back only when something changed.
    pub fn legalize_box<S: SaveContainer + ?Sized>(
        &self,
        save: &mut S,
        index: usize,
    ) -> ContainerResult<usize> {
        if index >= save.box_count() {
            return Err(ContainerError::InvalidIndex {
                index,
                count: save.box_count(),
            });
        }

        let mut data = save.box_data(index);
        let repaired = self.legalize_all(&save.trainer(), &mut data);
        if repaired > 0 {
            save.set_box_data(&data, index);
        }
        debug!(index, repaired, "Legalized box");
        Ok(repaired)
    }

    /// Repair every box of the save.
    pub fn legalize_boxes<S: SaveContainer + ?Sized>(&self, save: &mut S) -> ContainerResult<usize> {
        if !save.has_box() {
            return Err(ContainerError::NoContainers);
        }
        let mut repaired = 0;
        for index in 0..save.box_count() {
            repaired += self.legalize_box(save, index)?;
        }
        info!(boxes = save.box_count(), repaired, "Legalized all boxes");
        Ok(repaired)
    }
}
