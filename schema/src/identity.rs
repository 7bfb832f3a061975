use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Genderless,
}

impl Gender {
    pub fn from_index(index: u8) -> Option<Gender> {
        match index {
            0 => Some(Gender::Male),
            1 => Some(Gender::Female),
            2 => Some(Gender::Genderless),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Genderless => 2,
        }
    }

    /// Single-letter marker used in set text.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("M"),
            Gender::Female => Some("F"),
            Gender::Genderless => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum LanguageId {
    Japanese,
    #[default]
    English,
    French,
    Italian,
    German,
    Spanish,
    Korean,
    ChineseSimplified,
    ChineseTraditional,
}
