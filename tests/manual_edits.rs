#![forbid(unsafe_code)]
use chrono::NaiveDate;
use pontage::{
    CandidateKind, CandidateMeta, Holiday, Lang, ManualDay, Plan, PlanError, PlanOptions, Planner,
    Preference, Suggestion, SuggestionId,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn norway_2025() -> Vec<Holiday> {
    vec![
        Holiday::new(d(2025, 1, 1), "New Year's Day", "Første nyttårsdag"),
        Holiday::new(d(2025, 4, 13), "Palm Sunday", "Palmesøndag"),
        Holiday::new(d(2025, 4, 17), "Maundy Thursday", "Skjærtorsdag"),
        Holiday::new(d(2025, 4, 18), "Good Friday", "Langfredag"),
        Holiday::new(d(2025, 4, 20), "Easter Sunday", "Første påskedag"),
        Holiday::new(d(2025, 4, 21), "Easter Monday", "Andre påskedag"),
        Holiday::new(d(2025, 5, 1), "Labour Day", "Arbeidernes dag"),
        Holiday::new(d(2025, 5, 17), "Constitution Day", "Grunnlovsdag"),
        Holiday::new(d(2025, 5, 29), "Ascension Day", "Kristi himmelfartsdag"),
        Holiday::new(d(2025, 6, 8), "Whit Sunday", "Første pinsedag"),
        Holiday::new(d(2025, 6, 9), "Whit Monday", "Andre pinsedag"),
        Holiday::new(d(2025, 12, 25), "Christmas Day", "Første juledag"),
        Holiday::new(d(2025, 12, 26), "Boxing Day", "Andre juledag"),
    ]
}

fn premium() -> PlanOptions {
    PlanOptions {
        premium: true,
        lang: Lang::French,
        ..PlanOptions::default()
    }
}

fn generated_block(start: NaiveDate, end: NaiveDate, used: u32, total: u32) -> Suggestion {
    Suggestion {
        id: SuggestionId::random(),
        start_date: start,
        end_date: end,
        vacation_days_used: used,
        total_days_off: total,
        description: "Pont de mai".to_string(),
        reason: None,
        roi: None,
        efficiency: None,
        is_manual: false,
        is_merged: false,
        meta: Some(CandidateMeta {
            kind: CandidateKind::Gap,
            k: 1,
            score: Some(4.0),
        }),
    }
}

#[test]
fn adding_a_day_across_a_workday_stays_separate() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);
    plan.suggestions
        .push(generated_block(d(2025, 5, 1), d(2025, 5, 4), 1, 4));
    plan.recompute_totals();

    // le lundi 5 mai est ouvré : pas de fusion avec le bloc du 1er mai
    let skipped = planner
        .add_manual_days(
            &mut plan,
            &[ManualDay::new(d(2025, 5, 6))],
            &PlanOptions::default(),
        )
        .unwrap();

    assert!(skipped.is_empty());
    assert_eq!(plan.suggestions.len(), 2);
    let added = plan.suggestions.iter().find(|s| s.is_manual).unwrap();
    assert_eq!(added.range(), (d(2025, 5, 6), d(2025, 5, 6)));
    assert_eq!(added.vacation_days_used, 1);
    assert!(!added.is_merged);
    assert_eq!(plan.used_days, 2);
}

#[test]
fn adding_an_adjacent_day_merges_with_the_generated_block() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);
    plan.suggestions
        .push(generated_block(d(2025, 5, 1), d(2025, 5, 4), 1, 4));
    plan.recompute_totals();

    planner
        .add_manual_days(&mut plan, &[ManualDay::new(d(2025, 4, 30))], &premium())
        .unwrap();

    assert_eq!(plan.suggestions.len(), 1);
    let s = &plan.suggestions[0];
    assert!(s.is_manual);
    assert!(s.is_merged);
    assert_eq!(s.range(), (d(2025, 4, 30), d(2025, 5, 4)));
    assert_eq!(s.vacation_days_used, 2);
    assert_eq!(s.total_days_off, 5);
    // apport marginal du bloc généré : 4 jours de repos pour 1 jour posé
    assert_eq!(s.roi.as_deref(), Some("4.0"));
    assert_eq!(plan.used_days, 2);
    assert_eq!(plan.total_days_off, 5);
}

#[test]
fn removing_the_connecting_day_splits_the_block() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 10, Preference::Balanced);
    // samedi 26 avril → dimanche 4 mai : 28, 29, 30 avril et 2 mai ouvrés
    plan.suggestions.push(Suggestion::manual(
        d(2025, 4, 26),
        d(2025, 5, 4),
        4,
        9,
        "Vacances de printemps".to_string(),
    ));
    plan.recompute_totals();
    let id = plan.suggestions[0].id.clone();

    planner
        .remove_day(&mut plan, &id, d(2025, 4, 30), &PlanOptions::default())
        .unwrap();

    assert_eq!(plan.suggestions.len(), 2);
    let first = &plan.suggestions[0];
    let second = &plan.suggestions[1];
    assert_eq!(first.range(), (d(2025, 4, 26), d(2025, 4, 29)));
    assert_eq!(first.vacation_days_used, 2);
    assert_eq!(second.range(), (d(2025, 5, 1), d(2025, 5, 4)));
    assert_eq!(second.vacation_days_used, 1);
    assert!(first.is_manual && second.is_manual);
    assert_eq!(plan.used_days, 3);
}

#[test]
fn remove_then_readd_restores_the_totals() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 10, Preference::Balanced);
    plan.suggestions.push(Suggestion::manual(
        d(2025, 4, 26),
        d(2025, 5, 4),
        4,
        9,
        "Vacances de printemps".to_string(),
    ));
    plan.recompute_totals();
    let (used_before, total_before) = (plan.used_days, plan.total_days_off);
    let id = plan.suggestions[0].id.clone();

    planner
        .remove_day(&mut plan, &id, d(2025, 4, 30), &PlanOptions::default())
        .unwrap();
    planner
        .add_manual_days(
            &mut plan,
            &[ManualDay::new(d(2025, 4, 30))],
            &PlanOptions::default(),
        )
        .unwrap();

    assert_eq!(plan.used_days, used_before);
    assert_eq!(plan.total_days_off, total_before);
    assert_eq!(plan.suggestions.len(), 1);
    assert_eq!(plan.suggestions[0].range(), (d(2025, 4, 26), d(2025, 5, 4)));
}

#[test]
fn removing_the_last_workday_deletes_the_block() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);
    plan.suggestions
        .push(generated_block(d(2025, 5, 29), d(2025, 6, 1), 1, 4));
    plan.recompute_totals();
    let id = plan.suggestions[0].id.clone();

    planner
        .remove_day(&mut plan, &id, d(2025, 5, 30), &PlanOptions::default())
        .unwrap();

    assert!(plan.suggestions.is_empty());
    assert_eq!(plan.used_days, 0);
    assert_eq!(plan.total_days_off, 0);
}

#[test]
fn removing_an_off_day_is_rejected() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);
    plan.suggestions
        .push(generated_block(d(2025, 5, 1), d(2025, 5, 4), 1, 4));
    plan.recompute_totals();
    let id = plan.suggestions[0].id.clone();

    let err = planner
        .remove_day(&mut plan, &id, d(2025, 5, 3), &PlanOptions::default())
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidInput(_)));

    let err = planner
        .remove_day(
            &mut plan,
            &SuggestionId::new("missing"),
            d(2025, 5, 2),
            &PlanOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, PlanError::UnknownSuggestion(_)));
}

#[test]
fn exceeding_the_budget_rolls_back_the_whole_addition() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 1, Preference::Balanced);
    plan.suggestions.push(Suggestion::manual(
        d(2025, 4, 30),
        d(2025, 4, 30),
        1,
        1,
        "Déjà posé".to_string(),
    ));
    plan.recompute_totals();
    let before = plan.clone();

    let err = planner
        .add_manual_days(
            &mut plan,
            &[ManualDay::new(d(2025, 6, 18))],
            &PlanOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, PlanError::BudgetExceeded { .. }));
    assert_eq!(plan.used_days, before.used_days);
    assert_eq!(plan.suggestions.len(), before.suggestions.len());
}

#[test]
fn skipped_days_are_reported_with_their_reason() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);

    // un seul jour recevable sur les trois demandés
    let skipped = planner
        .add_manual_days(
            &mut plan,
            &[
                ManualDay::new(d(2025, 6, 18)),
                ManualDay::new(d(2025, 6, 14)),
                ManualDay::new(d(2025, 5, 29)),
            ],
            &PlanOptions::default(),
        )
        .unwrap();

    assert_eq!(skipped.len(), 2);
    assert_eq!(plan.used_days, 1);

    // tous irrecevables : l'appel échoue en bloc
    let err = planner
        .add_manual_days(
            &mut plan,
            &[ManualDay::new(d(2025, 6, 14)), ManualDay::new(d(2025, 5, 29))],
            &PlanOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, PlanError::AllDaysSkipped(ref list) if list.len() == 2));
}

#[test]
fn removing_a_whole_suggestion_updates_the_totals() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);
    plan.suggestions
        .push(generated_block(d(2025, 5, 1), d(2025, 5, 4), 1, 4));
    plan.suggestions
        .push(generated_block(d(2025, 5, 29), d(2025, 6, 1), 1, 4));
    plan.recompute_totals();
    let id = plan.suggestions[0].id.clone();

    planner
        .remove_suggestion(&mut plan, &id, &PlanOptions::default())
        .unwrap();

    assert_eq!(plan.suggestions.len(), 1);
    assert_eq!(plan.used_days, 1);
    assert_eq!(plan.total_days_off, 4);

    let err = planner
        .remove_suggestion(&mut plan, &id, &PlanOptions::default())
        .unwrap_err();
    assert!(matches!(err, PlanError::UnknownSuggestion(_)));
}

#[test]
fn manual_expansion_is_bounded_by_the_step_cap() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = Plan::new(2025, "NO", 5, Preference::Balanced);

    let opts = PlanOptions {
        max_expand_steps: 2,
        ..PlanOptions::default()
    };
    // le 16 avril précède cinq jours chômés (Pâques) : l'expansion s'arrête à 2 pas
    planner
        .add_manual_days(&mut plan, &[ManualDay::new(d(2025, 4, 16))], &opts)
        .unwrap();

    assert_eq!(plan.suggestions.len(), 1);
    assert_eq!(plan.suggestions[0].range(), (d(2025, 4, 16), d(2025, 4, 18)));
}
