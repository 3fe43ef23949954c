use crate::model::HolidaySet;
use chrono::{Datelike, NaiveDate, Weekday};

/// Samedi ou dimanche.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Week-end ou jour férié.
pub fn is_off_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    is_weekend(date) || holidays.contains(date)
}

/// Bornes de l'année cible (1er janvier, 31 décembre).
pub fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
    let dec31 = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");
    (jan1, dec31)
}

/// Suite maximale de jours chômés consécutifs, bornée à l'année.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffBlock {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl OffBlock {
    pub fn len_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    /// Au moins un vrai jour férié dans le bloc (pas un simple week-end).
    pub fn contains_holiday(&self, holidays: &HolidaySet) -> bool {
        let mut day = self.start;
        while day <= self.end {
            if holidays.contains(day) {
                return true;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        false
    }
}

/// Découpe l'année en blocs chômés ordonnés (du 1er janvier au 31 décembre).
pub fn build_off_blocks(year: i32, holidays: &HolidaySet) -> Vec<OffBlock> {
    let (jan1, dec31) = year_bounds(year);
    let mut blocks = Vec::new();
    let mut current: Option<OffBlock> = None;

    let mut day = jan1;
    while day <= dec31 {
        if is_off_day(day, holidays) {
            current = Some(match current {
                Some(block) => OffBlock {
                    start: block.start,
                    end: day,
                },
                None => OffBlock {
                    start: day,
                    end: day,
                },
            });
        } else if let Some(block) = current.take() {
            blocks.push(block);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}
