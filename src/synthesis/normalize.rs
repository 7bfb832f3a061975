use super::rules::{battle_move_replacement, is_battle_only_form, out_of_battle_form};
use crate::personal::personal_info;
use crate::regen::RegenTemplate;
use schema::{GameContext, Gender, PersonalInfo};

impl RegenTemplate {
    /// Store battle-only forms as their out-of-battle counterpart.
    pub fn sanitize_form(&mut self) {
        if is_battle_only_form(self.species, self.form, self.format) {
            self.form = out_of_battle_form(self.species, self.form, self.format);
        }
    }

    /// Rewrite moves that only exist mid-battle to the move they are stored as.
    pub fn sanitize_battle_moves(&mut self) {
        for slot in self.moves.iter_mut() {
            if let Some(replacement) = battle_move_replacement(self.species, *slot) {
                *slot = replacement;
            }
        }
    }

    /// Force the gender of single-gender species.
    pub fn fix_gender(&mut self, info: &PersonalInfo) {
        if info.only_male() {
            self.gender = Some(Gender::Male);
        } else if info.only_female() {
            self.gender = Some(Gender::Female);
        }
    }

    /// Apply every sanitization. Each one touches its own fields, so the
    /// order does not matter and repeated calls change nothing.
    pub fn normalize(&mut self, context: GameContext) {
        self.sanitize_form();
        self.sanitize_battle_moves();
        if let Some(info) = personal_info(context, self.species, self.form) {
            self.fix_gender(&info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{moves, Species};

    #[test]
    fn test_behemoth_moves_become_iron_head() {
        let mut template = RegenTemplate::new(Species::ZACIAN, 8);
        template.form = 1;
        template.moves = [moves::BEHEMOTH_BLADE, moves::TACKLE, moves::BEHEMOTH_BASH, 0];
        template.normalize(GameContext::SwordShield);
        assert_eq!(
            template.moves,
            [moves::IRON_HEAD, moves::TACKLE, moves::IRON_HEAD, 0]
        );
        assert_eq!(template.form, 1);
    }

    #[test]
    fn test_battle_only_form_reverts() {
        let mut template = RegenTemplate::new(Species::DARMANITAN, 8);
        template.form = 3;
        template.sanitize_form();
        assert_eq!(template.form, 2);

        // Zen mode was not stored differently before it existed
        let mut template = RegenTemplate::new(Species::VENUSAUR, 5);
        template.form = 1;
        template.sanitize_form();
        assert_eq!(template.form, 1);
    }

    #[test]
    fn test_single_gender_species_are_forced() {
        let mut template = RegenTemplate::new(Species::ENAMORUS, 8);
        template.gender = Some(Gender::Male);
        template.normalize(GameContext::LegendsArceus);
        assert_eq!(template.gender, Some(Gender::Female));

        let mut template = RegenTemplate::new(Species::KUBFU, 8);
        template.gender = Some(Gender::Female);
        template.normalize(GameContext::SwordShield);
        assert_eq!(template.gender, Some(Gender::Female));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut template = RegenTemplate::new(Species::MIMIKYU, 7);
        template.form = 3;
        template.normalize(GameContext::Gen7);
        let once = template.clone();
        template.normalize(GameContext::Gen7);
        assert_eq!(template, once);
        assert_eq!(template.form, 2);
    }
}
