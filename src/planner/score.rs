use super::types::Candidate;
use super::util;
use crate::model::Preference;
use chrono::NaiveDate;

/// Ratio à partir duquel un pont d'un seul jour est jugé excellent.
const HIGH_RATIO: f64 = 4.0;

/// Score d'un candidat : ratio repos/posés plus bonus de stratégie.
pub(super) fn score_candidate(c: &Candidate, preference: Preference) -> f64 {
    let mut score = c.ratio();

    score += match preference {
        Preference::ManyLongWeekends => match c.vacation_days_used {
            1 => 2.0,
            2 => 0.5,
            _ => 0.0,
        },
        Preference::FewLongVacations => {
            if c.total_days_off >= 10 {
                3.0
            } else if c.total_days_off >= 8 {
                2.25
            } else if c.total_days_off >= 6 {
                1.25
            } else {
                0.0
            }
        }
        Preference::SummerVacation => {
            if util::is_summer(c.start) {
                if c.total_days_off >= 7 {
                    5.0
                } else {
                    3.0
                }
            } else {
                0.0
            }
        }
        Preference::SpreadOut => {
            if c.vacation_days_used <= 2 {
                0.5
            } else {
                0.0
            }
        }
        Preference::Balanced => 0.0,
    };

    // une rallonge estivale garde un avantage hors stratégie été
    if c.is_extension() && util::is_summer(c.start) && preference != Preference::SummerVacation {
        score += 1.0;
    }

    score
}

pub(super) fn sort_for_selection(pool: &mut [Candidate], preference: Preference) {
    match preference {
        // deux paliers (excellent / normal), puis ordre chronologique
        Preference::ManyLongWeekends => pool.sort_by(|a, b| {
            let tier_a = u8::from(a.score < HIGH_RATIO);
            let tier_b = u8::from(b.score < HIGH_RATIO);
            tier_a.cmp(&tier_b).then(a.start.cmp(&b.start))
        }),
        _ => pool.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(b.total_days_off.cmp(&a.total_days_off))
                .then(a.vacation_days_used.cmp(&b.vacation_days_used))
                .then(a.start.cmp(&b.start))
        }),
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct SelectParams {
    pub preference: Preference,
    pub budget_total: u32,
    pub budget_remaining: u32,
    pub min_days_off: Option<u32>,
}

/// Parcours glouton : accepte les candidats compatibles budget, sans
/// chevauchement avec le contexte, et correctement espacés.
pub(super) fn pick_greedy(
    mut pool: Vec<Candidate>,
    params: SelectParams,
    context: &[(NaiveDate, NaiveDate)],
) -> Vec<Candidate> {
    sort_for_selection(&mut pool, params.preference);

    let mut taken: Vec<(NaiveDate, NaiveDate)> = context.to_vec();
    let mut picked = Vec::new();
    let mut remaining = params.budget_remaining;

    for c in pool {
        if remaining == 0 {
            break;
        }
        if let Some(min) = params.min_days_off {
            if c.total_days_off < min {
                continue;
            }
        }
        if c.vacation_days_used > remaining {
            continue;
        }
        if taken.iter().any(|r| util::ranges_overlap(c.range(), *r)) {
            continue;
        }
        if !well_distributed(&c, &taken, params.preference, params.budget_total, remaining) {
            continue;
        }
        taken.push(c.range());
        remaining -= c.vacation_days_used;
        picked.push(c);
    }

    picked
}

fn base_gap_days(preference: Preference) -> i64 {
    match preference {
        Preference::FewLongVacations => 0,
        Preference::ManyLongWeekends => 21,
        Preference::SpreadOut => 35,
        Preference::SummerVacation => 14,
        Preference::Balanced => 21,
    }
}

/// Espacement minimal entre blocs, adapté à l'avancement du budget.
fn well_distributed(
    c: &Candidate,
    taken: &[(NaiveDate, NaiveDate)],
    preference: Preference,
    budget_total: u32,
    budget_remaining: u32,
) -> bool {
    let distribution_focused = matches!(
        preference,
        Preference::ManyLongWeekends | Preference::SpreadOut
    );
    if c.vacation_days_used == 1 && c.ratio() >= HIGH_RATIO && !distribution_focused {
        return true;
    }

    let base = base_gap_days(preference);
    if base == 0 {
        return true;
    }

    let mut threshold = base;
    if u64::from(budget_remaining) * 2 > u64::from(budget_total) {
        threshold -= 7;
    } else if u64::from(budget_remaining) * 4 < u64::from(budget_total) {
        threshold += 7;
    }
    if threshold <= 0 {
        return true;
    }

    taken
        .iter()
        .all(|r| util::gap_days(c.range(), *r) >= threshold)
}
