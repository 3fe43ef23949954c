use super::types::Candidate;
use super::util;
use crate::calendar::{self, OffBlock};
use crate::model::{CandidateKind, HolidaySet};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Candidat étendu aux jours chômés voisins, ou rien si la plage
/// n'apporte aucun repos au-delà des jours posés.
fn expanded_candidate(
    run_start: NaiveDate,
    run_end: NaiveDate,
    k: u32,
    kind: CandidateKind,
    year: i32,
    holidays: &HolidaySet,
    blocked: &[(NaiveDate, NaiveDate)],
) -> Option<Candidate> {
    let (start, end) = util::expand_range(run_start, run_end, year, holidays, blocked, None);
    let vacation_days_used = util::workdays_between(start, end, holidays);
    let total_days_off = util::days_inclusive(start, end);

    if vacation_days_used == 0 || total_days_off <= vacation_days_used {
        return None;
    }

    Some(Candidate {
        start,
        end,
        vacation_days_used,
        total_days_off,
        kind,
        k,
        score: 0.0,
    })
}

/// Ponts : suites de k jours ouvrés dans le creux entre deux blocs chômés
/// adjacents. Plusieurs graines peuvent s'étendre vers la même plage,
/// d'où la déduplication sur (début, fin).
pub(super) fn gap_candidates(
    off_blocks: &[OffBlock],
    year: i32,
    holidays: &HolidaySet,
    max_k: u32,
    blocked: &[(NaiveDate, NaiveDate)],
) -> Vec<Candidate> {
    let mut seen: HashSet<(NaiveDate, NaiveDate)> = HashSet::new();
    let mut out = Vec::new();

    for pair in off_blocks.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        let gap_start = match left.end.succ_opt() {
            Some(d) => d,
            None => continue,
        };
        let gap_end = match right.start.pred_opt() {
            Some(d) => d,
            None => continue,
        };
        if gap_start > gap_end {
            continue;
        }

        let gap_len = util::days_inclusive(gap_start, gap_end);
        for k in 1..=max_k.min(gap_len) {
            for offset in 0..=(gap_len - k) {
                let run_start = gap_start + Duration::days(i64::from(offset));
                let run_end = run_start + Duration::days(i64::from(k) - 1);
                if let Some(c) = expanded_candidate(
                    run_start,
                    run_end,
                    k,
                    CandidateKind::Gap,
                    year,
                    holidays,
                    blocked,
                ) {
                    if seen.insert(c.range()) {
                        out.push(c);
                    }
                }
            }
        }
    }

    out
}

/// Rallonges : k jours ouvrés collés à un bloc contenant un vrai férié.
/// Un simple week-end ne se rallonge pas.
pub(super) fn extension_candidates(
    off_blocks: &[OffBlock],
    year: i32,
    holidays: &HolidaySet,
    max_k: u32,
    blocked: &[(NaiveDate, NaiveDate)],
) -> Vec<Candidate> {
    let (jan1, dec31) = calendar::year_bounds(year);
    let mut seen: HashSet<(NaiveDate, NaiveDate)> = HashSet::new();
    let mut out = Vec::new();

    for block in off_blocks {
        if !block.contains_holiday(holidays) {
            continue;
        }

        for k in 1..=max_k {
            let run_end = match block.start.pred_opt() {
                Some(d) => d,
                None => break,
            };
            let run_start = run_end - Duration::days(i64::from(k) - 1);
            if run_start < jan1 {
                break;
            }
            // la suite doit être purement ouvrée ; un k plus grand buterait
            // sur le même jour chômé
            if !clean_workday_run(run_start, run_end, holidays) {
                break;
            }
            if let Some(c) = expanded_candidate(
                run_start,
                run_end,
                k,
                CandidateKind::ExtendBefore,
                year,
                holidays,
                blocked,
            ) {
                if seen.insert(c.range()) {
                    out.push(c);
                }
            }
        }

        for k in 1..=max_k {
            let run_start = match block.end.succ_opt() {
                Some(d) => d,
                None => break,
            };
            let run_end = run_start + Duration::days(i64::from(k) - 1);
            if run_end > dec31 {
                break;
            }
            if !clean_workday_run(run_start, run_end, holidays) {
                break;
            }
            if let Some(c) = expanded_candidate(
                run_start,
                run_end,
                k,
                CandidateKind::ExtendAfter,
                year,
                holidays,
                blocked,
            ) {
                if seen.insert(c.range()) {
                    out.push(c);
                }
            }
        }
    }

    out
}

fn clean_workday_run(start: NaiveDate, end: NaiveDate, holidays: &HolidaySet) -> bool {
    let mut day = start;
    while day <= end {
        if calendar::is_off_day(day, holidays) {
            return false;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => return false,
        }
    }
    true
}
