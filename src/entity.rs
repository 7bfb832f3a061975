use crate::personal::personal_info;
use crate::trainer::TrainerInfo;
use schema::{Gender, GameVersion, LanguageId, PersonalInfo, RecordFormat, Species};
use serde::{Deserialize, Serialize};

pub const MAX_LEVEL: u8 = 100;
pub const MOVE_SLOTS: usize = 4;

/// One creature record, the unit every part of the engine produces or repairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub format: RecordFormat,
    pub species: Species,
    pub form: u8,
    pub form_argument: u32,
    pub gender: Gender,
    pub shiny: bool,
    pub alpha: bool,
    pub held_item: u16,
    pub moves: [u16; MOVE_SLOTS],
    pub level: u8,
    pub language: LanguageId,
    pub nickname: String,
    pub is_nicknamed: bool,
    pub version: Option<GameVersion>, // None until an origin game is stamped
    pub ability: u16,
    pub ability_number: u8, // 1, 2 or 4 (hidden)
    pub ot_name: String,
    pub tid: u16,
    pub sid: u16,
    pub pid: u32,
    pub encryption_constant: u32,
    pub current_hp: u16,
    pub max_hp: u16,
    pub status_condition: u32,
    pub height_scalar: u8,
    pub weight_scalar: u8,
    pub height_absolute: f32,
    pub weight_absolute: f32,
}

impl Entity {
    /// A fresh, minimally initialized record of the given layout.
    pub fn blank(format: RecordFormat) -> Self {
        Entity {
            format,
            species: Species::NONE,
            form: 0,
            form_argument: 0,
            gender: Gender::Male,
            shiny: false,
            alpha: false,
            held_item: 0,
            moves: [0; MOVE_SLOTS],
            level: 1,
            language: LanguageId::English,
            nickname: String::new(),
            is_nicknamed: false,
            version: None,
            ability: 0,
            ability_number: 1,
            ot_name: String::new(),
            tid: 0,
            sid: 0,
            pid: 0,
            encryption_constant: 0,
            current_hp: 0,
            max_hp: 0,
            status_condition: 0,
            height_scalar: 0,
            weight_scalar: 0,
            height_absolute: 0.0,
            weight_absolute: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_none()
    }

    /// Generation of the record layout (the "format").
    pub fn generation(&self) -> u8 {
        self.format.generation()
    }

    /// Generation the entity originates from, if an origin game is set.
    pub fn origin_generation(&self) -> Option<u8> {
        self.version.map(GameVersion::generation)
    }

    /// Personal data for the current species/form in this layout's game family.
    pub fn personal(&self) -> Option<PersonalInfo> {
        personal_info(self.format.context(), self.species, self.form)
    }

    /// A gender the species can actually have, keeping the current one when it is allowed.
    pub fn sane_gender(&self) -> Gender {
        match self.personal().and_then(|info| info.fixed_gender()) {
            Some(fixed) => fixed,
            None if self.gender == Gender::Genderless => Gender::Male,
            None => self.gender,
        }
    }

    pub fn set_moves(&mut self, moves: [u16; MOVE_SLOTS]) {
        self.moves = moves;
    }

    pub fn has_move(&self, move_id: u16) -> bool {
        move_id != 0 && self.moves.contains(&move_id)
    }

    /// Select the ability in slot `index`, keeping slot number and ability id in step.
    pub fn refresh_ability(&mut self, index: u8) {
        let index = index.min(2);
        self.ability_number = 1 << index;
        if let Some(info) = self.personal() {
            self.ability = info.ability_at(usize::from(index));
        }
    }

    /// Restore HP and clear any status condition.
    pub fn heal(&mut self) {
        self.current_hp = self.max_hp;
        self.status_condition = 0;
    }

    /// Copy the original-trainer identity onto this record.
    pub fn apply_trainer(&mut self, trainer: &TrainerInfo) {
        self.ot_name = trainer.ot_name.clone();
        self.tid = trainer.tid;
        self.sid = trainer.sid;
        self.language = trainer.language;
        self.version = Some(trainer.game);
    }

    /// The name the game would show for an un-nicknamed entity of this species.
    pub fn default_nickname(&self) -> String {
        species_name(self.species, self.language, self.generation())
    }

    /// Absolute height derived from the species height and the height scalar.
    pub fn calc_height_absolute(&self) -> f32 {
        let base = self.personal().map(|info| info.height).unwrap_or_default();
        f32::from(base) * size_ratio(self.height_scalar)
    }

    /// Absolute weight derived from the species weight and both scalars.
    pub fn calc_weight_absolute(&self) -> f32 {
        let base = self.personal().map(|info| info.weight).unwrap_or_default();
        f32::from(base) * size_ratio(self.height_scalar) * size_ratio(self.weight_scalar)
    }

    /// Recompute stored absolute sizes for layouts that keep them.
    pub fn refresh_scaled_size(&mut self) {
        if !self.format.has_scaled_size() {
            return;
        }
        self.height_absolute = self.calc_height_absolute();
        self.weight_absolute = self.calc_weight_absolute();
    }
}

fn size_ratio(scalar: u8) -> f32 {
    f32::from(scalar) / 255.0 * 0.40 + 0.80
}

/// Species display name for a language and generation.
/// Only English names are known; other languages use them too.
pub fn species_name(species: Species, _language: LanguageId, generation: u8) -> String {
    let name = species.to_string();
    if generation <= 2 {
        name.to_uppercase()
    } else {
        name
    }
}
