// Held item ids referenced by the form rule tables.

pub const NONE: u16 = 0;
pub const GRISEOUS_ORB: u16 = 112;
pub const DOUSE_DRIVE: u16 = 116;
pub const SHOCK_DRIVE: u16 = 117;
pub const BURN_DRIVE: u16 = 118;
pub const CHILL_DRIVE: u16 = 119;
pub const RUSTED_SWORD: u16 = 1103;
pub const RUSTED_SHIELD: u16 = 1104;

/// Plates ordered by the Arceus form they produce (form 1 first).
pub const ARCEUS_PLATES: [u16; 17] = [
    303, 306, 304, 305, 309, 308, 310, 313, 298, 299, 301, 300, 307, 302, 311, 312, 644,
];

/// Memory for Silvally form 1; the rest follow consecutively.
pub const FIRST_MEMORY: u16 = 904;
pub const MEMORY_COUNT: u8 = 17;

pub fn arceus_plate(form: u8) -> u16 {
    match form {
        1..=17 => ARCEUS_PLATES[usize::from(form) - 1],
        _ => NONE,
    }
}

pub fn silvally_memory(form: u8) -> u16 {
    match form {
        1..=MEMORY_COUNT => FIRST_MEMORY + u16::from(form) - 1,
        _ => NONE,
    }
}

pub fn genesect_drive(form: u8) -> u16 {
    match form {
        1 => DOUSE_DRIVE,
        2 => SHOCK_DRIVE,
        3 => BURN_DRIVE,
        4 => CHILL_DRIVE,
        _ => NONE,
    }
}
