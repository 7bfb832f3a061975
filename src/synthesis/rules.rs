//! Hardcoded per-species rule tables, kept as data so each can be tested on
//! its own and extended without touching the control flow.

use schema::{items, moves, GameVersion, Species};

/// Highest Vivillon pattern obtainable from the wild on the 3DS titles.
pub const VIVILLON_MAX_WILD_FORM: u8 = 17;

/// Species whose form is tied to gender.
pub const DUAL_GENDER_FORM_SPECIES: &[Species] = &[Species::MEOWSTIC, Species::INDEEDEE];

/// Species whose regional forms only exist for Gen 7+ origins.
pub const ALOLAN_ORIGIN_SPECIES: &[Species] = &[
    Species::RATTATA,
    Species::RATICATE,
    Species::SANDSHREW,
    Species::SANDSLASH,
    Species::VULPIX,
    Species::NINETALES,
    Species::DIGLETT,
    Species::DUGTRIO,
    Species::MEOWTH,
    Species::PERSIAN,
    Species::GEODUDE,
    Species::GRAVELER,
    Species::GOLEM,
    Species::GRIMER,
    Species::MUK,
];

/// Species/form pairs that can never be shiny.
pub const SHINY_LOCKED: &[(Species, u8)] = &[
    (Species::VICTINI, 0),
    (Species::KELDEO, 0),
    (Species::KELDEO, 1),
    (Species::MELOETTA, 0),
    (Species::HOOPA, 0),
    (Species::HOOPA, 1),
    (Species::VOLCANION, 0),
    (Species::COSMOG, 0),
    (Species::COSMOEM, 0),
    (Species::MAGEARNA, 0),
    (Species::MAGEARNA, 1),
    (Species::MARSHADOW, 0),
    (Species::ZACIAN, 0),
    (Species::ZACIAN, 1),
    (Species::ZAMAZENTA, 0),
    (Species::ZAMAZENTA, 1),
    (Species::ETERNATUS, 0),
    (Species::KUBFU, 0),
    (Species::URSHIFU, 0),
    (Species::URSHIFU, 1),
    (Species::ZARUDE, 0),
    (Species::ZARUDE, 1),
    (Species::GLASTRIER, 0),
    (Species::SPECTRIER, 0),
    (Species::CALYREX, 0),
    (Species::CALYREX, 1),
    (Species::CALYREX, 2),
    (Species::ENAMORUS, 0),
];

/// Forms that only exist during battle.
pub struct BattleOnlyForm {
    pub species: Species,
    pub forms: &'static [u8],
    /// Form the species reverts to outside battle
    pub out_of_battle: u8,
    /// First generation the form exists in
    pub since: u8,
}

pub const BATTLE_ONLY_FORMS: &[BattleOnlyForm] = &[
    BattleOnlyForm { species: Species::VENUSAUR, forms: &[1], out_of_battle: 0, since: 6 },
    BattleOnlyForm { species: Species::MEWTWO, forms: &[1, 2], out_of_battle: 0, since: 6 },
    BattleOnlyForm { species: Species::CASTFORM, forms: &[1, 2, 3], out_of_battle: 0, since: 3 },
    BattleOnlyForm { species: Species::KYOGRE, forms: &[1], out_of_battle: 0, since: 6 },
    BattleOnlyForm { species: Species::GROUDON, forms: &[1], out_of_battle: 0, since: 6 },
    BattleOnlyForm { species: Species::CHERRIM, forms: &[1], out_of_battle: 0, since: 4 },
    BattleOnlyForm { species: Species::DARMANITAN, forms: &[1], out_of_battle: 0, since: 5 },
    BattleOnlyForm { species: Species::DARMANITAN, forms: &[3], out_of_battle: 2, since: 8 },
    BattleOnlyForm { species: Species::MELOETTA, forms: &[1], out_of_battle: 0, since: 5 },
    BattleOnlyForm { species: Species::GRENINJA, forms: &[2], out_of_battle: 1, since: 7 },
    BattleOnlyForm { species: Species::AEGISLASH, forms: &[1], out_of_battle: 0, since: 6 },
    BattleOnlyForm { species: Species::XERNEAS, forms: &[1], out_of_battle: 0, since: 6 },
    BattleOnlyForm { species: Species::WISHIWASHI, forms: &[1], out_of_battle: 0, since: 7 },
    BattleOnlyForm { species: Species::MIMIKYU, forms: &[1], out_of_battle: 0, since: 7 },
    BattleOnlyForm { species: Species::MIMIKYU, forms: &[3], out_of_battle: 2, since: 7 },
    BattleOnlyForm { species: Species::NECROZMA, forms: &[3], out_of_battle: 1, since: 7 },
    BattleOnlyForm { species: Species::CRAMORANT, forms: &[1, 2], out_of_battle: 0, since: 8 },
    BattleOnlyForm { species: Species::EISCUE, forms: &[1], out_of_battle: 0, since: 8 },
    BattleOnlyForm { species: Species::MORPEKO, forms: &[1], out_of_battle: 0, since: 8 },
    BattleOnlyForm { species: Species::ETERNATUS, forms: &[1], out_of_battle: 0, since: 8 },
];

/// Battle-only move ids and the move they are stored as outside battle.
pub struct BattleMoveReplacement {
    pub species: &'static [Species],
    pub battle_moves: &'static [u16],
    pub replacement: u16,
}

pub const BATTLE_MOVE_REPLACEMENTS: &[BattleMoveReplacement] = &[BattleMoveReplacement {
    species: &[Species::ZACIAN, Species::ZAMAZENTA],
    battle_moves: &[moves::BEHEMOTH_BLADE, moves::BEHEMOTH_BASH],
    replacement: moves::IRON_HEAD,
}];

fn battle_only_entry(species: Species, form: u8, generation: u8) -> Option<&'static BattleOnlyForm> {
    BATTLE_ONLY_FORMS
        .iter()
        .find(|entry| entry.species == species && entry.forms.contains(&form) && generation >= entry.since)
}

pub fn is_battle_only_form(species: Species, form: u8, generation: u8) -> bool {
    battle_only_entry(species, form, generation).is_some()
}

/// Form to store instead of a battle-only one; other forms are returned as-is.
pub fn out_of_battle_form(species: Species, form: u8, generation: u8) -> u8 {
    battle_only_entry(species, form, generation)
        .map(|entry| entry.out_of_battle)
        .unwrap_or(form)
}

pub fn is_shiny_locked(species: Species, form: u8) -> bool {
    SHINY_LOCKED.contains(&(species, form))
}

pub fn is_dual_gender_form(species: Species) -> bool {
    DUAL_GENDER_FORM_SPECIES.contains(&species)
}

/// Replacement for a battle-only move of `species`, if `move_id` is one.
pub fn battle_move_replacement(species: Species, move_id: u16) -> Option<u16> {
    BATTLE_MOVE_REPLACEMENTS
        .iter()
        .find(|entry| entry.species.contains(&species) && entry.battle_moves.contains(&move_id))
        .map(|entry| entry.replacement)
}

/// Held item a form needs in `game`. `Some(0)` means the form must hold nothing
/// form-specific; `None` means the form places no requirement.
pub fn form_item(game: GameVersion, species: Species, form: u8) -> Option<u16> {
    if game == GameVersion::LegendsArceus {
        return None;
    }
    let generation = game.generation();
    match species {
        Species::ARCEUS if generation == 4 && form >= 9 => Some(items::arceus_plate(form - 1)),
        Species::ARCEUS => Some(items::arceus_plate(form)),
        Species::SILVALLY => Some(items::silvally_memory(form)),
        Species::GENESECT => Some(items::genesect_drive(form)),
        Species::GIRATINA if form == 1 => Some(items::GRISEOUS_ORB),
        Species::ZACIAN if form == 1 => Some(items::RUSTED_SWORD),
        Species::ZAMAZENTA if form == 1 => Some(items::RUSTED_SHIELD),
        _ => None,
    }
}

/// Move a form must know, with the slot it is placed in.
pub fn form_signature_move(species: Species, form: u8) -> Option<(usize, u16)> {
    match (species, form) {
        (Species::KELDEO, 1) => Some((0, moves::SECRET_SWORD)),
        _ => None,
    }
}

/// Whether a species/form should never be synthesized for a trainer of
/// `trainer_generation`. `origin_generation` is the working record's origin,
/// if one has been stamped.
pub fn is_ignored_form(
    species: Species,
    form: u8,
    trainer_generation: u8,
    origin_generation: Option<u8>,
) -> bool {
    let excluded = match species {
        Species::UNOWN => trainer_generation == 2 && form >= 26,
        Species::SCATTERBUG | Species::SPEWPA => form > VIVILLON_MAX_WILD_FORM,
        Species::FLOETTE => form == 5,
        Species::SHAYMIN | Species::FURFROU | Species::HOOPA => form != 0 && trainer_generation <= 6,
        Species::ARCEUS => trainer_generation == 4 && form == 9,
        _ => false,
    };
    if excluded || is_battle_only_form(species, form, trainer_generation) {
        return true;
    }
    if form == 0 {
        return false;
    }
    let regional = species == Species::PIKACHU || ALOLAN_ORIGIN_SPECIES.contains(&species);
    trainer_generation >= 7 && regional && origin_generation.is_some_and(|origin| origin < 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Species::UNOWN, 26, 2, None, true)]
    #[case(Species::UNOWN, 26, 3, None, false)]
    #[case(Species::UNOWN, 25, 2, None, false)]
    #[case(Species::SCATTERBUG, 18, 8, None, true)]
    #[case(Species::SPEWPA, 17, 8, None, false)]
    #[case(Species::FLOETTE, 5, 6, None, true)]
    #[case(Species::SHAYMIN, 1, 6, None, true)]
    #[case(Species::SHAYMIN, 1, 7, None, false)]
    #[case(Species::HOOPA, 0, 6, None, false)]
    #[case(Species::ARCEUS, 9, 4, None, true)]
    #[case(Species::ARCEUS, 9, 5, None, false)]
    #[case(Species::AEGISLASH, 1, 8, None, true)]
    #[case(Species::VULPIX, 1, 7, Some(6), true)]
    #[case(Species::VULPIX, 1, 7, Some(7), false)]
    #[case(Species::VULPIX, 1, 7, None, false)]
    #[case(Species::PIKACHU, 3, 8, Some(3), true)]
    #[case(Species::VULPIX, 0, 7, Some(6), false)]
    fn test_ignored_forms(
        #[case] species: Species,
        #[case] form: u8,
        #[case] trainer_generation: u8,
        #[case] origin_generation: Option<u8>,
        #[case] expected: bool,
    ) {
        assert_eq!(
            is_ignored_form(species, form, trainer_generation, origin_generation),
            expected
        );
    }

    #[rstest]
    #[case(GameVersion::Sword, Species::ZACIAN, 1, Some(items::RUSTED_SWORD))]
    #[case(GameVersion::Sword, Species::ZACIAN, 0, None)]
    #[case(GameVersion::Shield, Species::ZAMAZENTA, 1, Some(items::RUSTED_SHIELD))]
    #[case(GameVersion::Platinum, Species::GIRATINA, 1, Some(items::GRISEOUS_ORB))]
    #[case(GameVersion::UltraMoon, Species::ARCEUS, 9, Some(298))]
    #[case(GameVersion::Platinum, Species::ARCEUS, 10, Some(298))]
    #[case(GameVersion::UltraMoon, Species::ARCEUS, 0, Some(0))]
    #[case(GameVersion::LegendsArceus, Species::ARCEUS, 9, None)]
    #[case(GameVersion::UltraMoon, Species::SILVALLY, 2, Some(905))]
    #[case(GameVersion::Sword, Species::GENESECT, 3, Some(items::BURN_DRIVE))]
    #[case(GameVersion::Sword, Species::PIKACHU, 0, None)]
    fn test_form_items(
        #[case] game: GameVersion,
        #[case] species: Species,
        #[case] form: u8,
        #[case] expected: Option<u16>,
    ) {
        assert_eq!(form_item(game, species, form), expected);
    }

    #[test]
    fn test_battle_only_forms_respect_generation() {
        assert!(is_battle_only_form(Species::DARMANITAN, 3, 8));
        assert_eq!(out_of_battle_form(Species::DARMANITAN, 3, 8), 2);
        assert_eq!(out_of_battle_form(Species::MIMIKYU, 1, 7), 0);
        assert!(!is_battle_only_form(Species::VENUSAUR, 1, 5));
        assert_eq!(out_of_battle_form(Species::ZACIAN, 1, 8), 1);
    }

    #[test]
    fn test_behemoth_moves_collapse_to_iron_head() {
        assert_eq!(
            battle_move_replacement(Species::ZACIAN, moves::BEHEMOTH_BLADE),
            Some(moves::IRON_HEAD)
        );
        assert_eq!(
            battle_move_replacement(Species::ZAMAZENTA, moves::BEHEMOTH_BLADE),
            Some(moves::IRON_HEAD)
        );
        assert_eq!(
            battle_move_replacement(Species::PIKACHU, moves::BEHEMOTH_BASH),
            None
        );
    }

    #[test]
    fn test_shiny_lock_is_per_form() {
        assert!(is_shiny_locked(Species::ZACIAN, 0));
        assert!(is_shiny_locked(Species::CALYREX, 2));
        assert!(!is_shiny_locked(Species::BULBASAUR, 0));
    }
}
