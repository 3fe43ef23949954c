use crate::model::{CandidateKind, Efficiency, Holiday, Suggestion};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Langue des libellés produits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    English,
    French,
}

impl Lang {
    /// Sélection par étiquette de langue (« fr », « fr-FR », sinon anglais).
    pub fn from_tag<S: AsRef<str>>(tag: S) -> Self {
        if tag.as_ref().to_ascii_lowercase().starts_with("fr") {
            Self::French
        } else {
            Self::English
        }
    }
}

/// Gabarits de libellés d'une langue ; permet d'en brancher d'autres.
pub trait PhraseTable {
    fn bridge_title(&self, holiday: Option<&str>) -> String;
    fn extension_title(&self, holiday: Option<&str>) -> String;
    fn filler_title(&self) -> String;
    fn merged_title(&self, holiday: Option<&str>) -> String;
    fn manual_title(&self) -> String;
    fn reason(&self, used: u32, total: u32) -> String;
    fn merged_reason(&self, extra_used: u32, gained: u32) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct English;

impl PhraseTable for English {
    fn bridge_title(&self, holiday: Option<&str>) -> String {
        match holiday {
            Some(name) => format!("Bridge over {name}"),
            None => "Long weekend".to_string(),
        }
    }
    fn extension_title(&self, holiday: Option<&str>) -> String {
        match holiday {
            Some(name) => format!("Extended break around {name}"),
            None => "Extended break".to_string(),
        }
    }
    fn filler_title(&self) -> String {
        "Well-placed day off".to_string()
    }
    fn merged_title(&self, holiday: Option<&str>) -> String {
        match holiday {
            Some(name) => format!("Combined break around {name}"),
            None => "Combined break".to_string(),
        }
    }
    fn manual_title(&self) -> String {
        "Manually added day off".to_string()
    }
    fn reason(&self, used: u32, total: u32) -> String {
        format!("{used} vacation day(s) for {total} days off")
    }
    fn merged_reason(&self, extra_used: u32, gained: u32) -> String {
        format!("{extra_used} extra vacation day(s) for {gained} more days off")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct French;

impl PhraseTable for French {
    fn bridge_title(&self, holiday: Option<&str>) -> String {
        match holiday {
            Some(name) => format!("Pont de {name}"),
            None => "Grand week-end".to_string(),
        }
    }
    fn extension_title(&self, holiday: Option<&str>) -> String {
        match holiday {
            Some(name) => format!("Rallonge autour de {name}"),
            None => "Rallonge de week-end".to_string(),
        }
    }
    fn filler_title(&self) -> String {
        "Journée bien placée".to_string()
    }
    fn merged_title(&self, holiday: Option<&str>) -> String {
        match holiday {
            Some(name) => format!("Bloc combiné autour de {name}"),
            None => "Bloc combiné".to_string(),
        }
    }
    fn manual_title(&self) -> String {
        "Jour posé à la main".to_string()
    }
    fn reason(&self, used: u32, total: u32) -> String {
        format!("{used} jour(s) posé(s) pour {total} jours de repos")
    }
    fn merged_reason(&self, extra_used: u32, gained: u32) -> String {
        format!("{extra_used} jour(s) de plus pour {gained} jours de repos supplémentaires")
    }
}

pub fn phrases_for(lang: Lang) -> &'static dyn PhraseTable {
    match lang {
        Lang::English => &English,
        Lang::French => &French,
    }
}

/// Premier férié tombant dans la plage, pour nommer le bloc.
pub(crate) fn holiday_in_range<'a>(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &'a [Holiday],
) -> Option<&'a str> {
    holidays
        .iter()
        .find(|h| start <= h.date && h.date <= end)
        .map(|h| h.display_name())
}

/// Renseigne libellé, motif et efficacité d'un bloc selon son origine.
/// Hors premium, seuls les libellés sont produits.
pub(crate) fn describe(
    suggestion: &mut Suggestion,
    holidays: &[Holiday],
    table: &dyn PhraseTable,
    premium: bool,
) {
    let holiday = holiday_in_range(suggestion.start_date, suggestion.end_date, holidays);

    suggestion.description = match suggestion.meta.as_ref().map(|m| m.kind) {
        Some(CandidateKind::Gap) => table.bridge_title(holiday),
        Some(CandidateKind::ExtendBefore) | Some(CandidateKind::ExtendAfter) => {
            table.extension_title(holiday)
        }
        Some(CandidateKind::Filler) => table.filler_title(),
        Some(CandidateKind::Merged) => table.merged_title(holiday),
        None => table.manual_title(),
    };

    if premium {
        let ratio = suggestion.ratio();
        suggestion.reason = Some(table.reason(
            suggestion.vacation_days_used,
            suggestion.total_days_off,
        ));
        suggestion.roi = Some(format!("{ratio:.1}"));
        suggestion.efficiency = Some(Efficiency::from_ratio(ratio));
    }
}
