use crate::{Gender, Species};
use serde::{Deserialize, Serialize};

/// Gender ratio value for species that are always male.
pub const RATIO_MALE_ONLY: u8 = 0;
/// Gender ratio value for species that are always female.
pub const RATIO_FEMALE_ONLY: u8 = 254;
/// Gender ratio value for species without gender.
pub const RATIO_GENDERLESS: u8 = 255;

/// Per species/form data entry of a game's personal table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub form_count: u8,
    pub gender: u8,
    #[serde(default = "default_present")]
    pub present: bool,
    #[serde(default)]
    pub height: u16, // centimeters
    #[serde(default)]
    pub weight: u16, // hectograms
    #[serde(default)]
    pub abilities: [u16; 3],
    #[serde(default)]
    pub pre_evolution: Option<Species>,
}

fn default_present() -> bool {
    true
}

impl PersonalInfo {
    pub fn only_male(&self) -> bool {
        self.gender == RATIO_MALE_ONLY
    }

    pub fn only_female(&self) -> bool {
        self.gender == RATIO_FEMALE_ONLY
    }

    pub fn genderless(&self) -> bool {
        self.gender == RATIO_GENDERLESS
    }

    /// The only gender the species can have, if it cannot vary.
    pub fn fixed_gender(&self) -> Option<Gender> {
        match self.gender {
            RATIO_GENDERLESS => Some(Gender::Genderless),
            RATIO_FEMALE_ONLY => Some(Gender::Female),
            RATIO_MALE_ONLY => Some(Gender::Male),
            _ => None,
        }
    }

    /// Ability id for a slot index (0, 1 or 2 for the hidden ability).
    pub fn ability_at(&self, index: usize) -> u16 {
        self.abilities.get(index).copied().unwrap_or_default()
    }
}
