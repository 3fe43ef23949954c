use crate::description::Lang;
use crate::model::CandidateKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Garde-fou d'expansion manuelle : au-delà, on considère qu'aucune
/// frontière structurelle n'a été rencontrée et on s'arrête.
pub const DEFAULT_EXPAND_STEPS: u32 = 10;

/// Options d'un calcul de plan
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    pub premium: bool,
    pub lang: Lang,
    pub max_expand_steps: u32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            premium: false,
            lang: Lang::English,
            max_expand_steps: DEFAULT_EXPAND_STEPS,
        }
    }
}

/// Demande d'ajout manuel d'un jour de congé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl ManualDay {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, note: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Weekend,
    Holiday,
    AlreadyCovered,
    OutsideYear,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekend => "weekend",
            Self::Holiday => "holiday",
            Self::AlreadyCovered => "already_covered",
            Self::OutsideYear => "outside_year",
        }
    }
}

/// Jour demandé mais non ajouté, avec son motif.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub reason: SkipReason,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("unknown suggestion: {0}")]
    UnknownSuggestion(String),
    #[error("budget exceeded: {used} day(s) used for {available} available")]
    BudgetExceeded { used: u32, available: u32 },
    #[error("no requested day could be added")]
    AllDaysSkipped(Vec<SkippedDay>),
    #[error("no remaining budget to optimize")]
    NoRemainingBudget,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Bloc candidat, vivant seulement le temps d'une génération.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub vacation_days_used: u32,
    pub total_days_off: u32,
    pub kind: CandidateKind,
    pub k: u32,
    pub score: f64,
}

impl Candidate {
    pub fn ratio(&self) -> f64 {
        if self.vacation_days_used == 0 {
            0.0
        } else {
            f64::from(self.total_days_off) / f64::from(self.vacation_days_used)
        }
    }

    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn is_extension(&self) -> bool {
        matches!(
            self.kind,
            CandidateKind::ExtendBefore | CandidateKind::ExtendAfter
        )
    }
}
