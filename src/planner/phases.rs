use crate::model::Preference;

/// Taille minimale d'un « long bloc » de repos.
pub(super) const LONG_BLOCK_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PhaseKind {
    Gap,
    Extension,
}

/// Une étape du déroulé : quel générateur, quelles bornes de k,
/// et ses filtres éventuels.
#[derive(Debug, Clone, Copy)]
pub(super) struct Phase {
    pub kind: PhaseKind,
    pub min_k: u32,
    pub max_k: u32,
    pub min_days_off: Option<u32>,
    pub summer_only: bool,
}

impl Phase {
    const fn gap(min_k: u32, max_k: u32) -> Self {
        Self {
            kind: PhaseKind::Gap,
            min_k,
            max_k,
            min_days_off: None,
            summer_only: false,
        }
    }
    const fn ext(max_k: u32) -> Self {
        Self {
            kind: PhaseKind::Extension,
            min_k: 1,
            max_k,
            min_days_off: None,
            summer_only: false,
        }
    }
}

/// Déroulé des phases d'une stratégie. L'offre gratuite est bornée aux
/// ponts d'un jour, quelle que soit la stratégie demandée.
pub(super) fn phase_plan(preference: Preference, premium: bool) -> Vec<Phase> {
    if !premium {
        return vec![Phase::gap(1, 1)];
    }

    match preference {
        Preference::Balanced => vec![
            Phase::gap(1, 1),
            Phase::gap(2, 2),
            Phase::ext(2),
            Phase::gap(3, 3),
        ],
        Preference::ManyLongWeekends => vec![Phase::gap(1, 1), Phase::ext(1), Phase::gap(2, 2)],
        Preference::FewLongVacations => vec![
            Phase {
                min_days_off: Some(LONG_BLOCK_DAYS),
                ..Phase::ext(4)
            },
            Phase {
                min_days_off: Some(LONG_BLOCK_DAYS),
                ..Phase::gap(1, 4)
            },
            Phase::gap(2, 2),
            Phase::gap(1, 1),
        ],
        Preference::SummerVacation => vec![
            Phase {
                summer_only: true,
                ..Phase::ext(5)
            },
            Phase {
                summer_only: true,
                ..Phase::gap(1, 3)
            },
            Phase::gap(1, 1),
            Phase::ext(2),
        ],
        Preference::SpreadOut => vec![Phase::gap(1, 1), Phase::gap(2, 2), Phase::ext(1)],
    }
}
