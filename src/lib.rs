#![forbid(unsafe_code)]
//! Pontage — bibliothèque d'optimisation de congés locale (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Ponts, rallonges et bouche-trous choisis par stratégie.
//! - Fusion de blocs, édition manuelle jour par jour.
//! - Tout en dates civiles ; parsing `YYYY-MM-DD` aux frontières.

pub mod calendar;
pub mod description;
pub mod io;
pub mod model;
pub mod planner;
pub mod storage;

pub use description::{phrases_for, English, French, Lang, PhraseTable};
pub use model::{
    CandidateKind, CandidateMeta, Efficiency, Holiday, HolidaySet, Plan, Preference, Suggestion,
    SuggestionId,
};
pub use planner::{
    ManualDay, PlanError, PlanOptions, Planner, SkipReason, SkippedDay, DEFAULT_EXPAND_STEPS,
};
pub use storage::{JsonStorage, Storage};
