//! Lab-result classification for display.
//!
//! The backend stores each result with a precomputed `normal` flag; this
//! module derives the presentation tuple (expected-range text, status label,
//! normality) and the per-study summary from it.

use crate::model::LabResult;

/// Display status of a single result.
///
/// For quantitative results the `normal` flag decides Normal vs not; the
/// numeric bounds only choose *which* abnormal label applies. Qualitative
/// results are either Normal or Abnormal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultStatus {
    Normal,
    Low,
    High,
    Abnormal,
}

impl ResultStatus {
    /// Status label shown in the results table.
    pub fn label(self) -> &'static str {
        match self {
            ResultStatus::Normal => "Normal",
            ResultStatus::Low => "Low",
            ResultStatus::High => "High",
            ResultStatus::Abnormal => "Abnormal",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation tuple for one result row.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// `"{min} - {max}"` for quantitative results, the expected value (or
    /// empty) for qualitative ones.
    pub range_text: String,
    pub status: ResultStatus,
    pub is_normal: bool,
}

/// Classify a single result for display.
pub fn classify(result: &LabResult) -> Classification {
    match result {
        LabResult::Quantitative {
            value,
            minimum,
            maximum,
            normal,
            ..
        } => {
            let status = if *normal {
                ResultStatus::Normal
            } else if value < minimum {
                ResultStatus::Low
            } else if value > maximum {
                ResultStatus::High
            } else {
                // The authoritative flag says abnormal even though the value
                // sits inside the recomputed bounds (e.g. gender-adjusted
                // ranges the row does not carry).
                ResultStatus::Abnormal
            };
            Classification {
                range_text: format!("{minimum} - {maximum}"),
                status,
                is_normal: *normal,
            }
        }
        LabResult::Qualitative {
            expected, normal, ..
        } => Classification {
            range_text: expected.clone().unwrap_or_default(),
            status: if *normal {
                ResultStatus::Normal
            } else {
                ResultStatus::Abnormal
            },
            is_normal: *normal,
        },
    }
}

/// Normal/total/percentage summary of a result set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultsSummary {
    pub normal: usize,
    pub total: usize,
    /// Rounded percentage of normal results; 0 for an empty set.
    pub percentage: u32,
}

/// Summarise a result set. An empty set reports 0/0 at 0%, never NaN.
pub fn summarize(results: &[LabResult]) -> ResultsSummary {
    let total = results.len();
    let normal = results.iter().filter(|r| r.is_normal()).count();
    let percentage = if total == 0 {
        0
    } else {
        ((normal as f64 / total as f64) * 100.0).round() as u32
    };
    ResultsSummary {
        normal,
        total,
        percentage,
    }
}
