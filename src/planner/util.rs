use crate::calendar;
use crate::model::HolidaySet;
use chrono::{Datelike, NaiveDate};

pub(crate) fn days_inclusive(start: NaiveDate, end: NaiveDate) -> u32 {
    (end - start).num_days() as u32 + 1
}

pub(crate) fn workdays_between(start: NaiveDate, end: NaiveDate, holidays: &HolidaySet) -> u32 {
    let mut count = 0;
    let mut day = start;
    while day <= end {
        if !calendar::is_off_day(day, holidays) {
            count += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

pub(crate) fn ranges_overlap(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

/// Écart en jours entre deux plages disjointes (0 si elles se touchent ou se chevauchent).
pub(crate) fn gap_days(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> i64 {
    if ranges_overlap(a, b) {
        return 0;
    }
    if a.1 < b.0 {
        (b.0 - a.1).num_days()
    } else {
        (a.0 - b.1).num_days()
    }
}

pub(crate) fn in_any(date: NaiveDate, ranges: &[(NaiveDate, NaiveDate)]) -> bool {
    ranges.iter().any(|r| r.0 <= date && date <= r.1)
}

/// Tous les jours strictement entre `a` et `b` sont chômés.
pub(crate) fn all_off_between(a: NaiveDate, b: NaiveDate, holidays: &HolidaySet) -> bool {
    let mut day = match a.succ_opt() {
        Some(next) => next,
        None => return true,
    };
    while day < b {
        if !calendar::is_off_day(day, holidays) {
            return false;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    true
}

pub(crate) fn is_summer(date: NaiveDate) -> bool {
    (6..=8).contains(&date.month())
}

/// Étend une graine de part et d'autre à travers les jours chômés adjacents.
///
/// L'expansion reste dans l'année, ne traverse jamais une plage de `blocked`
/// et s'arrête après `max_steps` pas par direction quand un plafond est donné.
pub(crate) fn expand_range(
    seed_start: NaiveDate,
    seed_end: NaiveDate,
    year: i32,
    holidays: &HolidaySet,
    blocked: &[(NaiveDate, NaiveDate)],
    max_steps: Option<u32>,
) -> (NaiveDate, NaiveDate) {
    let (jan1, dec31) = calendar::year_bounds(year);

    let mut start = seed_start;
    let mut steps = 0u32;
    while max_steps.map_or(true, |cap| steps < cap) {
        let prev = match start.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
        if prev < jan1 || !calendar::is_off_day(prev, holidays) || in_any(prev, blocked) {
            break;
        }
        start = prev;
        steps += 1;
    }

    let mut end = seed_end;
    let mut steps = 0u32;
    while max_steps.map_or(true, |cap| steps < cap) {
        let next = match end.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if next > dec31 || !calendar::is_off_day(next, holidays) || in_any(next, blocked) {
            break;
        }
        end = next;
        steps += 1;
    }

    (start, end)
}
