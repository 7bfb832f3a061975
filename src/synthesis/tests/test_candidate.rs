#[cfg(test)]
mod tests {
    use crate::reference::ReferenceBackend;
    use crate::request::{EncounterRequest, Rejection};
    use crate::regen::RegenTemplate;
    use crate::services::{
        LegalityChecker, LegalizationResult, SetPipeline, SetTextCodec, TemplateConverter,
    };
    use crate::synthesis::candidate::{CandidateOutcome, CandidateSynthesizer};
    use crate::synthesis::tests::common::{sword, ScriptedBackend};
    use crate::trainer::TrainerInfo;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{items, moves, Gender, GameVersion, Species};

    fn synthesize(trainer: &TrainerInfo, request: EncounterRequest) -> CandidateOutcome {
        let backend = ReferenceBackend;
        let blank = backend.blank(trainer.generation, trainer.game);
        CandidateSynthesizer::new(&backend).synthesize(blank, trainer, &request)
    }

    fn accepted(outcome: CandidateOutcome) -> crate::entity::Entity {
        match outcome {
            CandidateOutcome::Accepted(entity) => entity,
            other => panic!("Expected an accepted candidate, got {:?}", other),
        }
    }

    #[test]
    fn test_shiny_locked_species_is_built_without_shiny() {
        let trainer = sword();
        let entity = accepted(synthesize(
            &trainer,
            EncounterRequest::new(Species::ZACIAN).shiny(true),
        ));

        assert_eq!(entity.species, Species::ZACIAN);
        assert_eq!(entity.form, 0);
        assert!(!entity.shiny);
        assert!(!entity.moves.contains(&moves::BEHEMOTH_BLADE));
    }

    #[test]
    fn test_shiny_request_is_honored_when_not_locked() {
        let entity = accepted(synthesize(
            &sword(),
            EncounterRequest::new(Species::BULBASAUR).shiny(true),
        ));
        assert!(entity.shiny);
    }

    #[test]
    fn test_explicit_form_carries_its_item() {
        let entity = accepted(synthesize(
            &sword(),
            EncounterRequest::new(Species::GIRATINA).with_form(1),
        ));
        assert_eq!(entity.form, 1);
        assert_eq!(entity.held_item, items::GRISEOUS_ORB);
    }

    #[test]
    fn test_explicit_form_carries_its_signature_move() {
        let entity = accepted(synthesize(
            &sword(),
            EncounterRequest::new(Species::KELDEO).with_form(1),
        ));
        assert_eq!(entity.moves[0], moves::SECRET_SWORD);
    }

    #[test]
    fn test_dual_gender_forms_follow_each_other() {
        let entity = accepted(synthesize(&sword(), EncounterRequest::new(Species::MEOWSTIC)));
        assert_eq!((entity.form, entity.gender), (0, Gender::Male));

        let entity = accepted(synthesize(
            &sword(),
            EncounterRequest::new(Species::INDEEDEE).with_form(1),
        ));
        assert_eq!((entity.form, entity.gender), (1, Gender::Female));
    }

    #[test]
    fn test_alpha_only_where_the_record_supports_it() {
        let legends = TrainerInfo::new(GameVersion::LegendsArceus);
        let entity = accepted(synthesize(
            &legends,
            EncounterRequest::new(Species::WYRDEER).alpha(true),
        ));
        assert!(entity.alpha);
        assert!(entity.height_absolute > 0.0);

        let entity = accepted(synthesize(
            &sword(),
            EncounterRequest::new(Species::BULBASAUR).alpha(true),
        ));
        assert!(!entity.alpha);
    }

    #[test]
    fn test_unobtainable_species_is_rejected_without_an_attempt() {
        let outcome = synthesize(&sword(), EncounterRequest::new(Species::RATTATA));
        assert_eq!(outcome, CandidateOutcome::Rejected(Rejection::Unobtainable));
        assert!(!outcome.consumed_attempt());
    }

    #[test]
    fn test_battle_only_form_is_ignored() {
        let trainer = TrainerInfo::new(GameVersion::UltraMoon);
        let outcome = synthesize(&trainer, EncounterRequest::new(Species::MIMIKYU).with_form(1));
        assert_eq!(outcome, CandidateOutcome::Rejected(Rejection::IgnoredForm));
    }

    #[test]
    fn test_failed_pipeline_declines_with_resolved_blank() {
        let backend = ScriptedBackend::new().failing_pipeline();
        let trainer = sword();
        let blank = backend.blank(trainer.generation, trainer.game);
        let outcome = CandidateSynthesizer::new(&backend).synthesize(
            blank,
            &trainer,
            &EncounterRequest::new(Species::VENUSAUR),
        );

        match outcome {
            CandidateOutcome::Declined(working) => {
                assert_eq!(working.species, Species::VENUSAUR);
                assert_eq!(working.form, 0);
                assert_eq!(working.version, Some(GameVersion::Sword));
            }
            other => panic!("Expected a declined candidate, got {:?}", other),
        }
    }

    fn nicknamed(mut set: RegenTemplate, nickname: &str) -> RegenTemplate {
        set.nickname = Some(nickname.to_string());
        set
    }

    fn with_form(mut set: RegenTemplate, form: u8) -> RegenTemplate {
        set.form = form;
        set
    }

    fn holding(mut set: RegenTemplate, item: u16) -> RegenTemplate {
        set.held_item = item;
        set
    }

    fn knowing(mut set: RegenTemplate, known: &[u16]) -> RegenTemplate {
        set.moves[..known.len()].copy_from_slice(known);
        set
    }

    fn female(mut set: RegenTemplate) -> RegenTemplate {
        set.gender = Some(Gender::Female);
        set
    }

    fn set(species: Species) -> RegenTemplate {
        RegenTemplate::new(species, 8)
    }

    #[rstest]
    #[case::plain(set(Species::BULBASAUR))]
    #[case::nicknamed(nicknamed(set(Species::PIKACHU), "Sparky"))]
    #[case::nickname_with_parens(knowing(
        holding(nicknamed(with_form(set(Species::ZACIAN), 1), "Bob (Pal)"), items::RUSTED_SWORD),
        &[moves::IRON_HEAD, moves::TACKLE],
    ))]
    #[case::form_item(holding(with_form(set(Species::GIRATINA), 1), items::GRISEOUS_ORB))]
    #[case::female_gender_form(female(with_form(set(Species::MEOWSTIC), 1)))]
    #[case::signature_move(knowing(with_form(set(Species::KELDEO), 1), &[moves::SECRET_SWORD]))]
    fn test_set_text_round_trip_stays_legal(#[case] source: RegenTemplate) {
        let backend = ReferenceBackend;
        let trainer = sword();

        let mut template = backend.blank(trainer.generation, trainer.game);
        backend.apply_set_details(&mut template, &source);
        let (result, original) = backend.try_convert(&trainer, &source, &template);
        assert_eq!(result, LegalizationResult::Regenerated);
        assert!(backend.is_valid(&original));

        let text = backend.to_text(&original);
        let mut reparsed = backend.parse(&text).expect("exported text parses");
        reparsed.format = trainer.generation;

        let mut template = backend.blank(trainer.generation, trainer.game);
        backend.apply_set_details(&mut template, &reparsed);
        let (result, rebuilt) = backend.try_convert(&trainer, &reparsed, &template);

        assert_eq!(result, LegalizationResult::Regenerated, "{}", text);
        assert!(backend.is_valid(&rebuilt), "{}", text);
        assert_eq!(
            (rebuilt.species, rebuilt.form, rebuilt.gender, rebuilt.held_item),
            (original.species, original.form, original.gender, original.held_item)
        );
        assert_eq!(rebuilt.nickname, original.nickname);
        assert_eq!(rebuilt.moves, original.moves);
    }
}
