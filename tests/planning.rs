#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate};
use pontage::{Holiday, Lang, Plan, PlanError, PlanOptions, Planner, Preference};

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

fn assert_plan_invariants(plan: &Plan) {
    let used: u32 = plan.suggestions.iter().map(|s| s.vacation_days_used).sum();
    let total: u32 = plan.suggestions.iter().map(|s| s.total_days_off).sum();
    assert_eq!(plan.used_days, used);
    assert_eq!(plan.total_days_off, total);
    assert!(plan.used_days <= plan.available_days);

    for s in &plan.suggestions {
        assert!(s.total_days_off >= s.vacation_days_used);
        assert!(s.start_date <= s.end_date);
    }
    for (i, a) in plan.suggestions.iter().enumerate() {
        for b in plan.suggestions.iter().skip(i + 1) {
            assert!(
                a.end_date < b.start_date || b.end_date < a.start_date,
                "blocks {}..{} and {}..{} overlap",
                a.start_date,
                a.end_date,
                b.start_date,
                b.end_date
            );
        }
    }
}

#[test]
fn few_long_vacations_prefers_long_blocks() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let plan = planner
        .generate(10, Preference::FewLongVacations, &premium())
        .unwrap();

    assert_plan_invariants(&plan);
    assert!(plan.used_days <= 10);
    assert!(
        plan.suggestions.iter().any(|s| s.total_days_off >= 7),
        "expected at least one long block"
    );
}

#[test]
fn summer_preference_concentrates_on_summer_months() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let plan = planner
        .generate(8, Preference::SummerVacation, &premium())
        .unwrap();

    assert_plan_invariants(&plan);
    assert!(plan
        .suggestions
        .iter()
        .any(|s| (6..=8).contains(&s.start_date.month())));
}

#[test]
fn invariants_hold_for_every_preference() {
    let preferences = [
        Preference::Balanced,
        Preference::ManyLongWeekends,
        Preference::FewLongVacations,
        Preference::SummerVacation,
        Preference::SpreadOut,
    ];
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();

    for preference in preferences {
        let plan = planner.generate(12, preference, &premium()).unwrap();
        assert_plan_invariants(&plan);
        assert!(!plan.suggestions.is_empty());
    }
}

#[test]
fn premium_suggestions_carry_roi_and_reason() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let plan = planner
        .generate(5, Preference::Balanced, &premium())
        .unwrap();

    for s in &plan.suggestions {
        assert!(s.roi.is_some());
        assert!(s.reason.is_some());
        assert!(s.efficiency.is_some());
    }
}

#[test]
fn merging_twice_changes_nothing() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let plan = planner
        .generate(8, Preference::Balanced, &premium())
        .unwrap();

    let once = plan.suggestions.clone();
    let twice = planner.merge_suggestions(once.clone(), &premium());

    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_eq!(a.range(), b.range());
        assert_eq!(a.vacation_days_used, b.vacation_days_used);
        assert_eq!(a.total_days_off, b.total_days_off);
    }
}

#[test]
fn optimize_remaining_leaves_existing_blocks_untouched() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = planner
        .generate(3, Preference::Balanced, &premium())
        .unwrap();
    let used_before = plan.used_days;
    let before: Vec<_> = plan.suggestions.iter().map(|s| s.range()).collect();

    plan.available_days = 10;
    let spent = planner.optimize_remaining(&mut plan, &premium()).unwrap();

    assert!(spent > 0);
    assert_eq!(plan.used_days, used_before + spent);
    assert_plan_invariants(&plan);
    for range in &before {
        assert!(
            plan.suggestions.iter().any(|s| s.range() == *range),
            "existing block {range:?} was altered"
        );
    }
}

#[test]
fn optimize_without_remaining_budget_is_an_error() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = planner
        .generate(3, Preference::Balanced, &premium())
        .unwrap();
    plan.available_days = plan.used_days;

    let err = planner.optimize_remaining(&mut plan, &premium()).unwrap_err();
    assert!(matches!(err, PlanError::NoRemainingBudget));
}

#[test]
fn regenerate_keeps_manual_blocks_and_switches_strategy() {
    let planner = Planner::new(2025, "NO", norway_2025()).unwrap();
    let mut plan = planner
        .generate(6, Preference::Balanced, &premium())
        .unwrap();

    plan.available_days = 10;
    let manual_day = d(2025, 9, 17);
    planner
        .add_manual_days(
            &mut plan,
            &[pontage::ManualDay::new(manual_day)],
            &premium(),
        )
        .unwrap();

    planner
        .regenerate_keeping_manual(&mut plan, Preference::FewLongVacations, &premium())
        .unwrap();

    assert_eq!(plan.preference, Preference::FewLongVacations);
    assert_plan_invariants(&plan);
    assert!(
        plan.suggestions
            .iter()
            .any(|s| s.contains(manual_day) && (s.is_manual || s.is_merged)),
        "manual day was lost during regeneration"
    );
}
