use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Identifiant fort pour Suggestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionId(String);

impl SuggestionId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Jour férié d'un pays (entrée du moteur, une par date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub local_name: String,
}

impl Holiday {
    pub fn new<N: Into<String>, L: Into<String>>(date: NaiveDate, name: N, local_name: L) -> Self {
        Self {
            date,
            name: name.into(),
            local_name: local_name.into(),
        }
    }

    /// Nom local si présent, sinon nom générique.
    pub fn display_name(&self) -> &str {
        if self.local_name.is_empty() {
            &self.name
        } else {
            &self.local_name
        }
    }
}

/// Ensemble des dates fériées d'une année ; immuable pendant un calcul.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    pub fn from_holidays(holidays: &[Holiday]) -> Self {
        Self(holidays.iter().map(|h| h.date).collect())
    }
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Stratégie de répartition demandée par l'utilisateur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    #[default]
    Balanced,
    ManyLongWeekends,
    FewLongVacations,
    SummerVacation,
    SpreadOut,
}

impl Preference {
    /// Analyse permissive : toute valeur inconnue retombe sur `balanced`.
    pub fn parse<S: AsRef<str>>(s: S) -> Self {
        match s.as_ref() {
            "many_long_weekends" => Self::ManyLongWeekends,
            "few_long_vacations" => Self::FewLongVacations,
            "summer_vacation" => Self::SummerVacation,
            "spread_out" => Self::SpreadOut,
            _ => Self::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::ManyLongWeekends => "many_long_weekends",
            Self::FewLongVacations => "few_long_vacations",
            Self::SummerVacation => "summer_vacation",
            Self::SpreadOut => "spread_out",
        }
    }
}

/// Origine d'un bloc proposé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateKind {
    Gap,
    ExtendBefore,
    ExtendAfter,
    Filler,
    Merged,
}

/// Métadonnées de stratégie conservées sur un bloc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMeta {
    pub kind: CandidateKind,
    pub k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Efficiency {
    High,
    Good,
    Normal,
}

impl Efficiency {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 4.0 {
            Self::High
        } else if ratio >= 3.0 {
            Self::Good
        } else {
            Self::Normal
        }
    }
}

/// Bloc de congés proposé (sortie persistée du moteur).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: SuggestionId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vacation_days_used: u32,
    pub total_days_off: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<Efficiency>,
    #[serde(default)]
    pub is_manual: bool,
    #[serde(default)]
    pub is_merged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<CandidateMeta>,
}

impl Suggestion {
    /// Bloc posé à la main par l'utilisateur.
    pub fn manual(
        start_date: NaiveDate,
        end_date: NaiveDate,
        vacation_days_used: u32,
        total_days_off: u32,
        description: String,
    ) -> Self {
        Self {
            id: SuggestionId::random(),
            start_date,
            end_date,
            vacation_days_used,
            total_days_off,
            description,
            reason: None,
            roi: None,
            efficiency: None,
            is_manual: true,
            is_merged: false,
            meta: None,
        }
    }

    /// Jours de repos obtenus par jour de congé posé.
    pub fn ratio(&self) -> f64 {
        if self.vacation_days_used == 0 {
            0.0
        } else {
            f64::from(self.total_days_off) / f64::from(self.vacation_days_used)
        }
    }

    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date, self.end_date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Plan annuel complet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub year: i32,
    pub country: String,
    pub available_days: u32,
    pub used_days: u32,
    pub total_days_off: u32,
    pub preference: Preference,
    pub suggestions: Vec<Suggestion>,
}

impl Plan {
    pub fn new<C: Into<String>>(
        year: i32,
        country: C,
        available_days: u32,
        preference: Preference,
    ) -> Self {
        Self {
            year,
            country: country.into(),
            available_days,
            used_days: 0,
            total_days_off: 0,
            preference,
            suggestions: Vec::new(),
        }
    }

    pub fn find_suggestion<'a>(&'a self, id: &SuggestionId) -> Option<&'a Suggestion> {
        self.suggestions.iter().find(|s| &s.id == id)
    }
    pub fn find_suggestion_mut(&mut self, id: &SuggestionId) -> Option<&mut Suggestion> {
        self.suggestions.iter_mut().find(|s| &s.id == id)
    }

    pub fn remaining_days(&self) -> u32 {
        self.available_days.saturating_sub(self.used_days)
    }

    /// Invariant : les totaux du plan sont la somme de ses blocs.
    pub fn recompute_totals(&mut self) {
        self.used_days = self.suggestions.iter().map(|s| s.vacation_days_used).sum();
        self.total_days_off = self.suggestions.iter().map(|s| s.total_days_off).sum();
    }
}
