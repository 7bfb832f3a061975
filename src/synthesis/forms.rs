use crate::entity::Entity;
use crate::personal::{form_count, is_present_in_game};
use crate::request::Rejection;
use crate::trainer::TrainerInfo;
use tracing::debug;

/// Pick the first form of the blank's species that exists in the trainer's game.
///
/// The blank is stamped with the trainer's game. Families whose tables carry
/// no presence flags accept the current form as-is.
pub fn resolve_available_form(mut blank: Entity, trainer: &TrainerInfo) -> Result<Entity, Rejection> {
    let context = trainer.game.context();
    blank.version = Some(trainer.game);

    let count = form_count(context, blank.species);
    if count == 0 {
        debug!(species = %blank.species, game = %trainer.game, "Species has no personal entry");
        return Err(Rejection::Unobtainable);
    }
    if !context.has_presence_flags() {
        return Ok(blank);
    }

    match (0..count).find(|&form| is_present_in_game(context, blank.species, form)) {
        Some(form) => {
            blank.form = form;
            Ok(blank)
        }
        None => {
            debug!(species = %blank.species, game = %trainer.game, "No form present in game");
            Err(Rejection::Unobtainable)
        }
    }
}
