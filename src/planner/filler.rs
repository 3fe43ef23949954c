use super::types::Candidate;
use super::util;
use crate::calendar;
use crate::model::{CandidateKind, HolidaySet, Preference};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

/// Plafond mensuel de bouche-trous pour la stratégie de dispersion.
const MONTHLY_FILLER_CAP: u32 = 2;

#[derive(Debug, Clone)]
struct Filler {
    day: NaiveDate,
    bridge: bool,
    candidate: Candidate,
}

/// Dépense le budget restant en jours isolés : ponts d'un jour d'abord,
/// puis lundis/vendredis ordinaires. La fusion qui suit absorbe les
/// bouche-trous collés aux blocs déjà retenus.
pub(super) fn fill_remaining(
    year: i32,
    holidays: &HolidaySet,
    preference: Preference,
    budget_remaining: u32,
    existing: &[(NaiveDate, NaiveDate)],
    boundaries: &[(NaiveDate, NaiveDate)],
) -> Vec<Candidate> {
    if budget_remaining == 0 {
        return Vec::new();
    }

    let (jan1, dec31) = calendar::year_bounds(year);
    let mut pool = Vec::new();

    let mut day = jan1;
    while day <= dec31 {
        if let Some(filler) = qualify(day, year, holidays, existing, boundaries) {
            pool.push(filler);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    let summer_pref = preference == Preference::SummerVacation;
    pool.sort_by(|a, b| {
        let tier_a = u8::from(!(a.bridge && a.candidate.total_days_off >= 4));
        let tier_b = u8::from(!(b.bridge && b.candidate.total_days_off >= 4));
        let mut ord = tier_a
            .cmp(&tier_b)
            .then(b.candidate.total_days_off.cmp(&a.candidate.total_days_off));
        if summer_pref {
            let summer_a = u8::from(!util::is_summer(a.candidate.start));
            let summer_b = u8::from(!util::is_summer(b.candidate.start));
            ord = ord.then(summer_a.cmp(&summer_b));
        }
        ord.then(u8::from(!a.bridge).cmp(&u8::from(!b.bridge)))
            .then(a.candidate.start.cmp(&b.candidate.start))
    });

    let cap_per_month = preference == Preference::ManyLongWeekends;
    let mut monthly: HashMap<u32, u32> = HashMap::new();
    for range in existing {
        *monthly.entry(range.0.month()).or_insert(0) += 1;
    }

    let mut out = Vec::new();
    let mut remaining = budget_remaining;

    for filler in pool {
        if remaining == 0 {
            break;
        }
        if cap_per_month {
            let count = monthly.entry(filler.day.month()).or_insert(0);
            if *count >= MONTHLY_FILLER_CAP {
                continue;
            }
            *count += 1;
        }
        remaining -= 1;
        out.push(filler.candidate);
    }

    out
}

fn qualify(
    day: NaiveDate,
    year: i32,
    holidays: &HolidaySet,
    existing: &[(NaiveDate, NaiveDate)],
    boundaries: &[(NaiveDate, NaiveDate)],
) -> Option<Filler> {
    if calendar::is_off_day(day, holidays) || util::in_any(day, existing) {
        return None;
    }

    let prev_off = day
        .pred_opt()
        .map_or(false, |p| calendar::is_off_day(p, holidays));
    let next_off = day
        .succ_opt()
        .map_or(false, |n| calendar::is_off_day(n, holidays));
    let bridge = prev_off && next_off;
    let traditional = matches!(day.weekday(), Weekday::Mon | Weekday::Fri);
    if !bridge && !traditional {
        return None;
    }

    let (start, end) = util::expand_range(day, day, year, holidays, boundaries, None);
    let total_days_off = util::days_inclusive(start, end);
    let score = f64::from(total_days_off);

    Some(Filler {
        day,
        bridge,
        candidate: Candidate {
            start,
            end,
            vacation_days_used: 1,
            total_days_off,
            kind: CandidateKind::Filler,
            k: 1,
            score,
        },
    })
}
