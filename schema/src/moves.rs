// Move ids referenced by the rule tables.

pub const NONE: u16 = 0;
pub const TACKLE: u16 = 33;
pub const IRON_HEAD: u16 = 442;
pub const SECRET_SWORD: u16 = 548;
pub const BEHEMOTH_BLADE: u16 = 781;
pub const BEHEMOTH_BASH: u16 = 782;
