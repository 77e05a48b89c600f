//! Dashboard statistics cards.
//!
//! The backend owns every number here. A count the backend did not send is
//! rendered as an explicit unavailable state; the dashboard never invents a
//! placeholder value for it.

use clinilab_core::{Statistics, StudyKind};

/// Value shown on one statistics card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardValue {
    Count(u64),
    /// The backend did not report this figure.
    Unavailable,
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardValue::Count(n) => write!(f, "{n}"),
            CardValue::Unavailable => f.write_str("—"),
        }
    }
}

/// The four headline cards plus the per-study breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsCards {
    pub total_patients: CardValue,
    pub studies_today: CardValue,
    pub pending: CardValue,
    pub in_process: CardValue,
    /// `(panel display name, count)` in stable wire-key order.
    pub by_study: Vec<(String, u64)>,
}

impl StatisticsCards {
    pub fn from_statistics(statistics: &Statistics) -> Self {
        let by_study = statistics
            .by_study_kind
            .iter()
            .map(|(key, count)| {
                let label = StudyKind::from_wire(key)
                    .map(|kind| kind.display_name().to_string())
                    .unwrap_or_else(|| key.clone());
                (label, *count)
            })
            .collect();

        Self {
            total_patients: CardValue::Count(statistics.total_patients),
            studies_today: CardValue::Count(statistics.studies_today),
            pending: statistics
                .pending
                .map(CardValue::Count)
                .unwrap_or(CardValue::Unavailable),
            in_process: statistics
                .in_process
                .map(CardValue::Count)
                .unwrap_or(CardValue::Unavailable),
            by_study,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn absent_workflow_counts_render_unavailable() {
        let cards = StatisticsCards::from_statistics(&Statistics {
            total_patients: 12,
            studies_today: 3,
            by_study_kind: BTreeMap::new(),
            pending: None,
            in_process: None,
        });

        assert_eq!(cards.total_patients, CardValue::Count(12));
        assert_eq!(cards.pending, CardValue::Unavailable);
        assert_eq!(cards.in_process, CardValue::Unavailable);
        assert_eq!(cards.pending.to_string(), "—");
    }

    #[test]
    fn present_workflow_counts_render_numbers() {
        let cards = StatisticsCards::from_statistics(&Statistics {
            pending: Some(5),
            in_process: Some(2),
            ..Statistics::default()
        });
        assert_eq!(cards.pending, CardValue::Count(5));
        assert_eq!(cards.in_process.to_string(), "2");
    }

    #[test]
    fn breakdown_uses_panel_display_names() {
        let mut by_study_kind = BTreeMap::new();
        by_study_kind.insert("biometria_hematica".to_string(), 7);
        by_study_kind.insert("rayos_x".to_string(), 1);

        let cards = StatisticsCards::from_statistics(&Statistics {
            by_study_kind,
            ..Statistics::default()
        });

        assert_eq!(
            cards.by_study,
            vec![
                ("Biometría Hemática Completa".to_string(), 7),
                ("rayos_x".to_string(), 1),
            ]
        );
    }
}
