//! Display models for the patient table and the results modal.

use clinilab_core::dates::{age_in_years_today, format_display_date, DATE_PLACEHOLDER};
use clinilab_core::{classify, summarize, Patient, ResultStatus, ResultsSummary};

/// One row of the registered-patients table.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientRow {
    pub short_id: String,
    pub full_name: String,
    pub age_text: String,
    pub sex: &'static str,
    pub study_name: String,
    pub date_text: String,
}

/// Build the table row for a patient.
pub fn patient_row(patient: &Patient) -> PatientRow {
    PatientRow {
        short_id: patient.short_id(),
        full_name: patient.personal.full_name(),
        age_text: age_in_years_today(&patient.personal.birth_date)
            .map(|age| age.to_string())
            .unwrap_or_else(|| DATE_PLACEHOLDER.to_string()),
        sex: patient.personal.sex.display_name(),
        study_name: patient.study.display_name.clone(),
        date_text: format_display_date(&patient.study.created_at),
    }
}

/// One row of the results table.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    pub range_text: String,
    pub status: ResultStatus,
}

/// Read-only lab-results view for one patient.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsView {
    pub full_name: String,
    pub short_id: String,
    pub age_text: String,
    pub sex: &'static str,
    pub study_name: String,
    pub study_date_text: String,
    pub rows: Vec<ResultRow>,
    pub summary: ResultsSummary,
}

impl ResultsView {
    /// Summary sentence shown next to the results table.
    pub fn summary_text(&self) -> String {
        format!(
            "{} de {} parámetros están en rango normal ({}%)",
            self.summary.normal, self.summary.total, self.summary.percentage
        )
    }
}

/// Build the results view, classifying every result for display.
pub fn results_view(patient: &Patient) -> ResultsView {
    let rows = patient
        .results
        .iter()
        .map(|result| {
            let classification = classify(result);
            ResultRow {
                parameter: result.parameter().to_owned(),
                value: result.value_text(),
                unit: result.unit().to_owned(),
                range_text: classification.range_text,
                status: classification.status,
            }
        })
        .collect();

    ResultsView {
        full_name: patient.personal.full_name(),
        short_id: patient.short_id(),
        age_text: age_in_years_today(&patient.personal.birth_date)
            .map(|age| format!("{age} años"))
            .unwrap_or_else(|| DATE_PLACEHOLDER.to_string()),
        sex: patient.personal.sex.display_name(),
        study_name: patient.study.display_name.clone(),
        study_date_text: format_display_date(&patient.study.created_at),
        rows,
        summary: summarize(&patient.results),
    }
}
