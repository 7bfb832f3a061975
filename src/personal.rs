//! Per-game personal tables: which species and forms exist in each game family.
//!
//! The tables are loaded once into a process-wide store, either from the
//! embedded document or from disk at startup, and are read-only afterwards.

use crate::errors::{ForgeError, ForgeResult};
use schema::{GameContext, PersonalInfo, Species};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, PoisonError, RwLock};
use tracing::info;

const EMBEDDED_PERSONAL: &str = include_str!("../data/personal.ron");

// Global personal data storage - loaded once at startup
static PERSONAL_TABLES: LazyLock<RwLock<HashMap<GameContext, PersonalTable>>> =
    LazyLock::new(|| {
        let tables = parse_document(EMBEDDED_PERSONAL)
            .expect("embedded personal table document must parse");
        RwLock::new(tables)
    });

/// One game family's species/form data.
#[derive(Debug, Clone, Default)]
pub struct PersonalTable {
    pub max_species: u16,
    /// Species obtainable in the game even though the base form is not flagged present.
    pub dex_additions: Vec<Species>,
    entries: HashMap<Species, Vec<PersonalInfo>>,
}

#[derive(Debug, Deserialize)]
struct PersonalDocument {
    contexts: BTreeMap<GameContext, ContextEntry>,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    max_species: u16,
    #[serde(default)]
    dex_additions: Vec<Species>,
    species: BTreeMap<Species, SpeciesEntry>,
}

#[derive(Debug, Deserialize)]
struct SpeciesEntry {
    info: PersonalInfo,
    #[serde(default)]
    absent_forms: Vec<u8>,
    #[serde(default)]
    forms: BTreeMap<u8, PersonalInfo>,
}

impl SpeciesEntry {
    /// Expand the base entry into one entry per form.
    fn expand(self) -> Vec<PersonalInfo> {
        let SpeciesEntry {
            info,
            absent_forms,
            mut forms,
        } = self;
        (0..info.form_count.max(1))
            .map(|form| match forms.remove(&form) {
                Some(specific) => specific,
                None => {
                    let mut entry = info.clone();
                    entry.present = info.present && !absent_forms.contains(&form);
                    entry
                }
            })
            .collect()
    }
}

impl PersonalTable {
    /// Entry for a form, falling back to the base form like the game data does.
    pub fn form_entry(&self, species: Species, form: u8) -> Option<&PersonalInfo> {
        let forms = self.entries.get(&species)?;
        forms.get(usize::from(form)).or_else(|| forms.first())
    }

    pub fn form_count(&self, species: Species) -> u8 {
        self.entries
            .get(&species)
            .and_then(|forms| forms.first())
            .map(|info| info.form_count)
            .unwrap_or(0)
    }

    /// Whether a species/form can be obtained in this game family.
    pub fn is_present(&self, context: GameContext, species: Species, form: u8) -> bool {
        let Some(forms) = self.entries.get(&species) else {
            return false;
        };
        match forms.get(usize::from(form)) {
            Some(entry) if context.has_presence_flags() => entry.present,
            Some(_) => true,
            None => false,
        }
    }
}

fn parse_document(text: &str) -> ForgeResult<HashMap<GameContext, PersonalTable>> {
    let document: PersonalDocument =
        ron::from_str(text).map_err(|e| ForgeError::PersonalData(e.to_string()))?;

    let mut tables = HashMap::new();
    for (context, entry) in document.contexts {
        let entries = entry
            .species
            .into_iter()
            .map(|(species, data)| (species, data.expand()))
            .collect();
        tables.insert(
            context,
            PersonalTable {
                max_species: entry.max_species,
                dex_additions: entry.dex_additions,
                entries,
            },
        );
    }
    Ok(tables)
}

/// Replace the global personal tables with a RON document from disk
pub fn initialize_personal_tables(path: &Path) -> ForgeResult<()> {
    let text = fs::read_to_string(path).map_err(|e| ForgeError::io(path, e))?;
    let tables = parse_document(&text)?;
    info!(contexts = tables.len(), path = %path.display(), "Loaded personal tables");
    let mut global = PERSONAL_TABLES
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *global = tables;
    Ok(())
}

/// Run `f` against one game family's table, if it is loaded.
pub fn with_table<R>(context: GameContext, f: impl FnOnce(&PersonalTable) -> R) -> Option<R> {
    let tables = PERSONAL_TABLES
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    tables.get(&context).map(f)
}

/// Get personal data for a species/form from the global store
pub fn personal_info(context: GameContext, species: Species, form: u8) -> Option<PersonalInfo> {
    with_table(context, |table| table.form_entry(species, form).cloned()).flatten()
}

pub fn form_count(context: GameContext, species: Species) -> u8 {
    with_table(context, |table| table.form_count(species)).unwrap_or(0)
}

pub fn is_present_in_game(context: GameContext, species: Species, form: u8) -> bool {
    with_table(context, |table| table.is_present(context, species, form)).unwrap_or(false)
}

pub fn max_species_id(context: GameContext) -> u16 {
    with_table(context, |table| table.max_species).unwrap_or(0)
}

pub fn dex_additions(context: GameContext) -> Vec<Species> {
    with_table(context, |table| table.dex_additions.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_tables_cover_every_context() {
        use strum::IntoEnumIterator;
        for context in GameContext::iter() {
            assert!(
                max_species_id(context) > 0,
                "{} table should be embedded",
                context
            );
        }
    }

    #[test]
    fn test_presence_flags_only_matter_for_flagged_families() {
        assert!(is_present_in_game(
            GameContext::SwordShield,
            Species::ZACIAN,
            1
        ));
        assert!(!is_present_in_game(
            GameContext::SwordShield,
            Species::RATTATA,
            0
        ));
        assert!(!is_present_in_game(
            GameContext::SwordShield,
            Species::ZACIAN,
            2
        ));
        // Families without flags treat every listed form as present
        assert!(is_present_in_game(GameContext::Gen4, Species::ARCEUS, 9));
    }

    #[test]
    fn test_form_entry_falls_back_to_base_form() {
        let info = personal_info(GameContext::SwordShield, Species::ZACIAN, 7)
            .expect("Zacian should be in the Sword/Shield table");
        assert_eq!(info.form_count, 2);
        assert_eq!(form_count(GameContext::SwordShield, Species(9999)), 0);
    }

    #[test]
    fn test_absent_forms_expand_per_form() {
        let document = r#"(
            contexts: {
                SwordShield: (
                    max_species: 3,
                    species: {
                        3: (info: (form_count: 3, gender: 31), absent_forms: [1]),
                    },
                ),
            },
        )"#;
        let tables = parse_document(document).expect("document should parse");
        let table = &tables[&GameContext::SwordShield];
        assert!(table.is_present(GameContext::SwordShield, Species(3), 0));
        assert!(!table.is_present(GameContext::SwordShield, Species(3), 1));
        assert!(table.is_present(GameContext::SwordShield, Species(3), 2));
    }
}
