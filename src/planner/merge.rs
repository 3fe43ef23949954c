use super::util;
use crate::description::{self, PhraseTable};
use crate::model::{CandidateKind, CandidateMeta, Efficiency, Holiday, HolidaySet, Suggestion};

/// Normalise une liste de blocs : tri par date, puis fusion de proche en
/// proche des blocs qui se chevauchent, se touchent, ou ne sont séparés
/// que par des jours chômés. Idempotent.
pub(super) fn merge_suggestions(
    mut list: Vec<Suggestion>,
    holidays: &HolidaySet,
    holiday_names: &[Holiday],
    table: &dyn PhraseTable,
    premium: bool,
) -> Vec<Suggestion> {
    list.sort_by_key(|s| s.start_date);

    let mut out: Vec<Suggestion> = Vec::new();
    for next in list {
        match out.last_mut() {
            Some(current) if should_merge(current, &next, holidays) => {
                *current = merge_pair(current, &next, holidays, holiday_names, table, premium);
            }
            _ => out.push(next),
        }
    }
    out
}

fn should_merge(current: &Suggestion, next: &Suggestion, holidays: &HolidaySet) -> bool {
    util::ranges_overlap(current.range(), next.range())
        || util::all_off_between(current.end_date, next.start_date, holidays)
}

fn merge_pair(
    current: &Suggestion,
    next: &Suggestion,
    holidays: &HolidaySet,
    holiday_names: &[Holiday],
    table: &dyn PhraseTable,
    premium: bool,
) -> Suggestion {
    let start_date = current.start_date.min(next.start_date);
    let end_date = current.end_date.max(next.end_date);
    // jamais la somme des deux : les jours chômés partagés compteraient double
    let vacation_days_used = util::workdays_between(start_date, end_date, holidays);
    let total_days_off = util::days_inclusive(start_date, end_date);

    let merged = match (current.is_manual, next.is_manual) {
        (true, true) => {
            let mut s = current.clone();
            s.is_merged = current.is_merged || next.is_merged;
            s
        }
        (true, false) | (false, true) => {
            let (manual, generated) = if current.is_manual {
                (current, next)
            } else {
                (next, current)
            };
            let extra_used = generated.vacation_days_used;
            let gained = total_days_off.saturating_sub(manual.total_days_off);
            let holiday = description::holiday_in_range(start_date, end_date, holiday_names);

            let mut s = manual.clone();
            s.is_merged = true;
            s.description = table.merged_title(holiday);
            s.meta = Some(CandidateMeta {
                kind: CandidateKind::Merged,
                k: generated.meta.as_ref().map_or(0, |m| m.k),
                score: None,
            });
            if premium && extra_used > 0 {
                let marginal = f64::from(gained) / f64::from(extra_used);
                s.reason = Some(table.merged_reason(extra_used, gained));
                s.roi = Some(format!("{marginal:.1}"));
                s.efficiency = Some(Efficiency::from_ratio(marginal));
            }
            s
        }
        (false, false) => {
            let key_current = merge_key(current);
            let key_next = merge_key(next);
            let winner = if key_next > key_current { next } else { current };

            let mut s = winner.clone();
            s.id = current.id.clone();
            s.is_merged = current.is_merged || next.is_merged;
            if premium {
                let ratio = if vacation_days_used == 0 {
                    0.0
                } else {
                    f64::from(total_days_off) / f64::from(vacation_days_used)
                };
                s.reason = Some(table.reason(vacation_days_used, total_days_off));
                s.roi = Some(format!("{ratio:.1}"));
                s.efficiency = Some(Efficiency::from_ratio(ratio));
            }
            s
        }
    };

    Suggestion {
        start_date,
        end_date,
        vacation_days_used,
        total_days_off,
        ..merged
    }
}

/// Clé de départage entre deux blocs générés : score de sélection s'il a
/// été conservé, sinon ratio recalculé.
fn merge_key(s: &Suggestion) -> f64 {
    s.meta
        .as_ref()
        .and_then(|m| m.score)
        .unwrap_or_else(|| s.ratio())
}
