//! A compact set text format modelled on community set sheets:
//!
//! ```text
//! Nickname (Species-form) (F) @ item
//! Level: 50
//! Shiny: Yes
//! Alpha: Yes
//! - 33
//! ```
//!
//! Species are written by name when known and as `#nnn` otherwise; forms,
//! items and moves are numeric ids.

use crate::entity::{Entity, MOVE_SLOTS};
use crate::regen::{RegenTemplate, DEFAULT_LEVEL};
use crate::services::SetTextCodec;
use schema::{Gender, Species};

/// Generation a parsed set is read as until the caller sets one.
pub const PARSE_FORMAT: u8 = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct SetText;

impl SetTextCodec for SetText {
    fn to_text(&self, entity: &Entity) -> String {
        let mut lines = vec![header_line(entity)];
        if entity.level != DEFAULT_LEVEL {
            lines.push(format!("Level: {}", entity.level));
        }
        if entity.shiny {
            lines.push("Shiny: Yes".to_string());
        }
        if entity.alpha {
            lines.push("Alpha: Yes".to_string());
        }
        lines.extend(
            entity
                .moves
                .iter()
                .filter(|&&m| m != 0)
                .map(|m| format!("- {}", m)),
        );
        lines.join("\n")
    }

    fn parse(&self, text: &str) -> Option<RegenTemplate> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
        let mut set = parse_header(lines.next()?)?;

        let mut slot = 0;
        for line in lines {
            if let Some(level) = line.strip_prefix("Level:") {
                set.level = level.trim().parse().ok()?;
            } else if let Some(flag) = line.strip_prefix("Shiny:") {
                set.shiny = is_yes(flag);
            } else if let Some(flag) = line.strip_prefix("Alpha:") {
                set.alpha = is_yes(flag);
            } else if let Some(move_id) = line.strip_prefix('-') {
                if slot < MOVE_SLOTS {
                    set.moves[slot] = move_id.trim().parse().ok()?;
                    slot += 1;
                }
            }
            // Unknown directives are ignored
        }
        Some(set)
    }
}

fn header_line(entity: &Entity) -> String {
    let mut species = entity.species.to_string();
    if entity.form != 0 {
        species = format!("{}-{}", species, entity.form);
    }
    let mut line = if entity.is_nicknamed && !entity.nickname.is_empty() {
        format!("{} ({})", entity.nickname, species)
    } else {
        species
    };
    if let Some(symbol) = entity.gender.symbol() {
        line.push_str(&format!(" ({})", symbol));
    }
    if entity.held_item != 0 {
        line.push_str(&format!(" @ {}", entity.held_item));
    }
    line
}

fn parse_header(line: &str) -> Option<RegenTemplate> {
    let (rest, item) = match line.split_once(" @ ") {
        Some((rest, item)) => (rest.trim(), item.trim().parse().ok()?),
        None => (line.trim(), 0),
    };

    let (rest, gender) = if let Some(rest) = rest.strip_suffix(" (M)") {
        (rest, Some(Gender::Male))
    } else if let Some(rest) = rest.strip_suffix(" (F)") {
        (rest, Some(Gender::Female))
    } else {
        (rest, None)
    };

    let (nickname, species_token) = match rest.strip_suffix(')').and_then(|r| r.rsplit_once(" (")) {
        Some((nickname, species)) => (Some(nickname.to_string()), species),
        None => (None, rest),
    };

    let (species, form) = parse_species_form(species_token)?;
    let mut set = RegenTemplate::new(species, PARSE_FORMAT);
    set.form = form;
    set.gender = gender;
    set.held_item = item;
    set.nickname = nickname;
    Some(set)
}

fn parse_species_form(token: &str) -> Option<(Species, u8)> {
    if let Some((name, form)) = token.rsplit_once('-') {
        if let Ok(form) = form.parse::<u8>() {
            return Some((parse_species(name)?, form));
        }
    }
    Some((parse_species(token)?, 0))
}

fn parse_species(token: &str) -> Option<Species> {
    match token.strip_prefix('#') {
        Some(id) => id.parse::<u16>().ok().map(Species),
        None => Species::from_name(token),
    }
}

fn is_yes(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("yes")
}
