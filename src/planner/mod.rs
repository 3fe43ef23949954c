mod candidates;
mod filler;
mod manual;
mod merge;
mod phases;
mod score;
mod types;
mod util;

pub use types::{
    ManualDay, PlanError, PlanOptions, SkipReason, SkippedDay, DEFAULT_EXPAND_STEPS,
};

use crate::calendar;
use crate::description::{self, PhraseTable};
use crate::model::{
    CandidateMeta, Holiday, HolidaySet, Plan, Preference, Suggestion, SuggestionId,
};
use chrono::{Datelike, NaiveDate};
use phases::PhaseKind;
use score::SelectParams;
use types::Candidate;

/// Moteur de planification pour une année et un calendrier de fériés.
///
/// Le moteur est synchrone et déterministe. Il lit et réécrit un `Plan`
/// entier à chaque opération : sérialiser les éditions concurrentes d'un
/// même plan est à la charge de l'appelant.
#[derive(Debug, Clone)]
pub struct Planner {
    year: i32,
    country: String,
    holidays: Vec<Holiday>,
    holiday_set: HolidaySet,
}

impl Planner {
    /// Construit le moteur ; refuse un calendrier sans férié pour l'année.
    pub fn new<C: Into<String>>(
        year: i32,
        country: C,
        holidays: Vec<Holiday>,
    ) -> Result<Self, PlanError> {
        let holidays: Vec<Holiday> = holidays
            .into_iter()
            .filter(|h| h.date.year() == year)
            .collect();
        let holiday_set = HolidaySet::from_holidays(&holidays);
        if holiday_set.is_empty() {
            return Err(PlanError::InvalidInput(
                "holiday list is empty for the requested year",
            ));
        }
        Ok(Self {
            year,
            country: country.into(),
            holidays,
            holiday_set,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn country(&self) -> &str {
        &self.country
    }
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Construit un plan complet à partir d'un budget de jours.
    pub fn generate(
        &self,
        available_days: u32,
        preference: Preference,
        opts: &PlanOptions,
    ) -> Result<Plan, PlanError> {
        if available_days == 0 {
            return Err(PlanError::InvalidInput("available_days must be positive"));
        }
        // l'offre gratuite est ramenée d'office à la stratégie équilibrée
        let preference = if opts.premium {
            preference
        } else {
            Preference::Balanced
        };
        let table = description::phrases_for(opts.lang);

        let picked = self.run_phases(available_days, available_days, preference, opts.premium, &[]);
        let mut suggestions: Vec<Suggestion> = picked
            .into_iter()
            .map(|c| self.suggestion_from(c, table, opts.premium))
            .collect();
        suggestions = merge::merge_suggestions(
            suggestions,
            &self.holiday_set,
            &self.holidays,
            table,
            opts.premium,
        );

        if opts.premium {
            let used: u32 = suggestions.iter().map(|s| s.vacation_days_used).sum();
            let remaining = available_days.saturating_sub(used);
            if remaining > 0 {
                let ranges = ranges_of(&suggestions);
                let fillers = filler::fill_remaining(
                    self.year,
                    &self.holiday_set,
                    preference,
                    remaining,
                    &ranges,
                    &[],
                );
                suggestions.extend(
                    fillers
                        .into_iter()
                        .map(|c| self.suggestion_from(c, table, opts.premium)),
                );
                suggestions = merge::merge_suggestions(
                    suggestions,
                    &self.holiday_set,
                    &self.holidays,
                    table,
                    opts.premium,
                );
            }
        }

        let mut plan = Plan::new(self.year, self.country.clone(), available_days, preference);
        plan.suggestions = suggestions;
        plan.recompute_totals();
        Ok(plan)
    }

    /// Dépense le budget encore libre d'un plan existant sans toucher aux
    /// plages déjà en place.
    pub fn optimize_remaining(&self, plan: &mut Plan, opts: &PlanOptions) -> Result<u32, PlanError> {
        let remaining = plan.remaining_days();
        if remaining == 0 {
            return Err(PlanError::NoRemainingBudget);
        }
        let preference = if opts.premium {
            plan.preference
        } else {
            Preference::Balanced
        };
        let table = description::phrases_for(opts.lang);
        let blocked = ranges_of(&plan.suggestions);

        let picked = self.run_phases(
            plan.available_days,
            remaining,
            preference,
            opts.premium,
            &blocked,
        );
        let mut additions: Vec<Suggestion> = picked
            .into_iter()
            .map(|c| self.suggestion_from(c, table, opts.premium))
            .collect();

        if opts.premium {
            let used: u32 = additions.iter().map(|s| s.vacation_days_used).sum();
            let still = remaining.saturating_sub(used);
            if still > 0 {
                let mut existing = blocked.clone();
                existing.extend(ranges_of(&additions));
                let fillers = filler::fill_remaining(
                    self.year,
                    &self.holiday_set,
                    preference,
                    still,
                    &existing,
                    &blocked,
                );
                additions.extend(
                    fillers
                        .into_iter()
                        .map(|c| self.suggestion_from(c, table, opts.premium)),
                );
            }
        }

        // fusion entre nouveaux blocs uniquement : les plages déjà
        // persistées ne doivent pas bouger
        let additions = merge::merge_suggestions(
            additions,
            &self.holiday_set,
            &self.holidays,
            table,
            opts.premium,
        );
        let spent: u32 = additions.iter().map(|s| s.vacation_days_used).sum();

        plan.suggestions.extend(additions);
        plan.suggestions.sort_by_key(|s| s.start_date);
        plan.recompute_totals();
        Ok(spent)
    }

    /// Régénère la part automatique d'un plan en conservant les blocs manuels.
    pub fn regenerate_keeping_manual(
        &self,
        plan: &mut Plan,
        preference: Preference,
        opts: &PlanOptions,
    ) -> Result<(), PlanError> {
        let preference = if opts.premium {
            preference
        } else {
            Preference::Balanced
        };
        let table = description::phrases_for(opts.lang);

        let manual: Vec<Suggestion> = plan
            .suggestions
            .iter()
            .filter(|s| s.is_manual)
            .cloned()
            .collect();
        let manual_used: u32 = manual.iter().map(|s| s.vacation_days_used).sum();
        let remaining = plan.available_days.saturating_sub(manual_used);
        let blocked = ranges_of(&manual);

        let mut suggestions = manual;
        if remaining > 0 {
            let picked = self.run_phases(
                plan.available_days,
                remaining,
                preference,
                opts.premium,
                &blocked,
            );
            suggestions.extend(
                picked
                    .into_iter()
                    .map(|c| self.suggestion_from(c, table, opts.premium)),
            );

            if opts.premium {
                let used: u32 = suggestions.iter().map(|s| s.vacation_days_used).sum();
                let still = plan.available_days.saturating_sub(used);
                if still > 0 {
                    let existing = ranges_of(&suggestions);
                    let fillers = filler::fill_remaining(
                        self.year,
                        &self.holiday_set,
                        preference,
                        still,
                        &existing,
                        &blocked,
                    );
                    suggestions.extend(
                        fillers
                            .into_iter()
                            .map(|c| self.suggestion_from(c, table, opts.premium)),
                    );
                }
            }
        }

        let mut suggestions = merge::merge_suggestions(
            suggestions,
            &self.holiday_set,
            &self.holidays,
            table,
            opts.premium,
        );
        suggestions.sort_by_key(|s| s.start_date);

        plan.preference = preference;
        plan.suggestions = suggestions;
        plan.recompute_totals();
        Ok(())
    }

    pub fn add_manual_days(
        &self,
        plan: &mut Plan,
        days: &[ManualDay],
        opts: &PlanOptions,
    ) -> Result<Vec<SkippedDay>, PlanError> {
        manual::add_manual_days(self, plan, days, opts)
    }

    pub fn remove_day(
        &self,
        plan: &mut Plan,
        id: &SuggestionId,
        date: NaiveDate,
        opts: &PlanOptions,
    ) -> Result<(), PlanError> {
        manual::remove_day(self, plan, id, date, opts)
    }

    pub fn remove_suggestion(
        &self,
        plan: &mut Plan,
        id: &SuggestionId,
        opts: &PlanOptions,
    ) -> Result<(), PlanError> {
        manual::remove_suggestion(self, plan, id, opts)
    }

    /// Normalise une liste de blocs (tri, fusions). Idempotent.
    pub fn merge_suggestions(
        &self,
        list: Vec<Suggestion>,
        opts: &PlanOptions,
    ) -> Vec<Suggestion> {
        let table = description::phrases_for(opts.lang);
        merge::merge_suggestions(list, &self.holiday_set, &self.holidays, table, opts.premium)
    }

    /// Enchaîne les phases de la stratégie jusqu'à épuisement du budget.
    fn run_phases(
        &self,
        budget_total: u32,
        budget_remaining: u32,
        preference: Preference,
        premium: bool,
        blocked: &[(NaiveDate, NaiveDate)],
    ) -> Vec<Candidate> {
        let off_blocks = calendar::build_off_blocks(self.year, &self.holiday_set);
        let mut picked: Vec<Candidate> = Vec::new();
        let mut remaining = budget_remaining;

        for phase in phases::phase_plan(preference, premium) {
            if remaining == 0 {
                break;
            }

            let mut pool = match phase.kind {
                PhaseKind::Gap => candidates::gap_candidates(
                    &off_blocks,
                    self.year,
                    &self.holiday_set,
                    phase.max_k,
                    blocked,
                ),
                PhaseKind::Extension => candidates::extension_candidates(
                    &off_blocks,
                    self.year,
                    &self.holiday_set,
                    phase.max_k,
                    blocked,
                ),
            };
            pool.retain(|c| c.k >= phase.min_k);
            if phase.summer_only {
                pool.retain(|c| util::is_summer(c.start));
            }
            for c in &mut pool {
                c.score = score::score_candidate(c, preference);
            }

            let mut context = blocked.to_vec();
            context.extend(picked.iter().map(Candidate::range));
            let newly = score::pick_greedy(
                pool,
                SelectParams {
                    preference,
                    budget_total,
                    budget_remaining: remaining,
                    min_days_off: phase.min_days_off,
                },
                &context,
            );

            for c in &newly {
                remaining -= c.vacation_days_used;
            }
            picked.extend(newly);
        }

        picked
    }

    fn suggestion_from(
        &self,
        candidate: Candidate,
        table: &dyn PhraseTable,
        premium: bool,
    ) -> Suggestion {
        let mut suggestion = Suggestion {
            id: SuggestionId::random(),
            start_date: candidate.start,
            end_date: candidate.end,
            vacation_days_used: candidate.vacation_days_used,
            total_days_off: candidate.total_days_off,
            description: String::new(),
            reason: None,
            roi: None,
            efficiency: None,
            is_manual: false,
            is_merged: false,
            meta: Some(CandidateMeta {
                kind: candidate.kind,
                k: candidate.k,
                score: Some(candidate.score),
            }),
        };
        description::describe(&mut suggestion, &self.holidays, table, premium);
        suggestion
    }
}

pub(crate) fn ranges_of(suggestions: &[Suggestion]) -> Vec<(NaiveDate, NaiveDate)> {
    suggestions.iter().map(Suggestion::range).collect()
}
