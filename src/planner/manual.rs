use super::types::{ManualDay, PlanError, PlanOptions, SkipReason, SkippedDay};
use super::{merge, ranges_of, util, Planner};
use crate::calendar;
use crate::description;
use crate::model::{Plan, Suggestion, SuggestionId};
use chrono::{Datelike, NaiveDate};

/// Ajoute des jours posés à la main. Les jours irrecevables sont rendus
/// avec leur motif ; si aucun jour ne passe, l'appel échoue en bloc.
pub(super) fn add_manual_days(
    planner: &Planner,
    plan: &mut Plan,
    days: &[ManualDay],
    opts: &PlanOptions,
) -> Result<Vec<SkippedDay>, PlanError> {
    if days.is_empty() {
        return Err(PlanError::InvalidInput("no date supplied"));
    }

    let table = description::phrases_for(opts.lang);
    let mut work = plan.clone();
    let mut skipped = Vec::new();
    let mut added = 0u32;

    for day in days {
        let date = day.date;
        if date.year() != plan.year {
            skipped.push(SkippedDay {
                date,
                reason: SkipReason::OutsideYear,
            });
            continue;
        }
        if calendar::is_weekend(date) {
            skipped.push(SkippedDay {
                date,
                reason: SkipReason::Weekend,
            });
            continue;
        }
        if planner.holiday_set.contains(date) {
            skipped.push(SkippedDay {
                date,
                reason: SkipReason::Holiday,
            });
            continue;
        }
        let blocked = ranges_of(&work.suggestions);
        if util::in_any(date, &blocked) {
            skipped.push(SkippedDay {
                date,
                reason: SkipReason::AlreadyCovered,
            });
            continue;
        }

        let (start, end) = util::expand_range(
            date,
            date,
            planner.year,
            &planner.holiday_set,
            &blocked,
            Some(opts.max_expand_steps),
        );
        let vacation_days_used = util::workdays_between(start, end, &planner.holiday_set);
        let total_days_off = util::days_inclusive(start, end);
        let description = match &day.note {
            Some(note) if !note.trim().is_empty() => note.trim().to_string(),
            _ => table.manual_title(),
        };

        work.suggestions.push(Suggestion::manual(
            start,
            end,
            vacation_days_used,
            total_days_off,
            description,
        ));
        added += 1;
    }

    if added == 0 {
        return Err(PlanError::AllDaysSkipped(skipped));
    }

    work.suggestions = merge::merge_suggestions(
        work.suggestions,
        &planner.holiday_set,
        &planner.holidays,
        table,
        opts.premium,
    );
    work.recompute_totals();
    if work.used_days > work.available_days {
        // rejet en bloc : le plan d'origine reste intact
        return Err(PlanError::BudgetExceeded {
            used: work.used_days,
            available: work.available_days,
        });
    }

    *plan = work;
    Ok(skipped)
}

/// Retire un jour ouvré d'un bloc : le bloc rétrécit, disparaît, ou se
/// scinde en groupes ré-étendus indépendamment.
pub(super) fn remove_day(
    planner: &Planner,
    plan: &mut Plan,
    id: &SuggestionId,
    date: NaiveDate,
    opts: &PlanOptions,
) -> Result<(), PlanError> {
    let index = plan
        .suggestions
        .iter()
        .position(|s| &s.id == id)
        .ok_or_else(|| PlanError::UnknownSuggestion(id.as_str().to_string()))?;

    let original = plan.suggestions[index].clone();
    if !original.contains(date) {
        return Err(PlanError::InvalidInput("date outside the suggestion range"));
    }
    if calendar::is_off_day(date, &planner.holiday_set) {
        return Err(PlanError::InvalidInput("cannot remove a weekend or holiday"));
    }

    let table = description::phrases_for(opts.lang);
    let mut work = plan.clone();
    let remaining = remaining_workdays(&original, date, planner);

    if remaining.is_empty() {
        work.suggestions.remove(index);
    } else {
        let blocked: Vec<(NaiveDate, NaiveDate)> = work
            .suggestions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, s)| s.range())
            .collect();

        let mut replacements = Vec::new();
        for group in contiguous_groups(&remaining, planner) {
            let (start, end) = util::expand_range(
                group.0,
                group.1,
                planner.year,
                &planner.holiday_set,
                &blocked,
                Some(opts.max_expand_steps),
            );
            let vacation_days_used = util::workdays_between(start, end, &planner.holiday_set);
            if vacation_days_used == 0 {
                continue;
            }
            let mut piece = original.clone();
            piece.start_date = start;
            piece.end_date = end;
            piece.vacation_days_used = vacation_days_used;
            piece.total_days_off = util::days_inclusive(start, end);
            if !piece.is_manual {
                description::describe(&mut piece, &planner.holidays, table, opts.premium);
            }
            replacements.push(piece);
        }

        match replacements.len() {
            0 => {
                work.suggestions.remove(index);
            }
            1 => {
                // même identité : le bloc rétrécit en place
                work.suggestions[index] = replacements.remove(0);
            }
            _ => {
                work.suggestions.remove(index);
                for mut piece in replacements {
                    piece.id = SuggestionId::random();
                    piece.is_manual = original.is_manual;
                    work.suggestions.push(piece);
                }
            }
        }
    }

    work.suggestions = merge::merge_suggestions(
        work.suggestions,
        &planner.holiday_set,
        &planner.holidays,
        table,
        opts.premium,
    );
    work.recompute_totals();
    *plan = work;
    Ok(())
}

/// Supprime un bloc entier.
pub(super) fn remove_suggestion(
    planner: &Planner,
    plan: &mut Plan,
    id: &SuggestionId,
    opts: &PlanOptions,
) -> Result<(), PlanError> {
    let index = plan
        .suggestions
        .iter()
        .position(|s| &s.id == id)
        .ok_or_else(|| PlanError::UnknownSuggestion(id.as_str().to_string()))?;
    plan.suggestions.remove(index);

    let table = description::phrases_for(opts.lang);
    let list = std::mem::take(&mut plan.suggestions);
    plan.suggestions = merge::merge_suggestions(
        list,
        &planner.holiday_set,
        &planner.holidays,
        table,
        opts.premium,
    );
    plan.recompute_totals();
    Ok(())
}

fn remaining_workdays(original: &Suggestion, removed: NaiveDate, planner: &Planner) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut day = original.start_date;
    while day <= original.end_date {
        if day != removed && !calendar::is_off_day(day, &planner.holiday_set) {
            out.push(day);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    out
}

/// Partitionne des jours ouvrés triés : deux jours sont du même groupe
/// ssi tout jour strictement entre eux est chômé.
fn contiguous_groups(days: &[NaiveDate], planner: &Planner) -> Vec<(NaiveDate, NaiveDate)> {
    let mut groups: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    for &day in days {
        match groups.last_mut() {
            Some(group) if util::all_off_between(group.1, day, &planner.holiday_set) => {
                group.1 = day;
            }
            _ => groups.push((day, day)),
        }
    }
    groups
}
