//! Patient-form drafts: validation and payload construction.
//!
//! A draft holds the raw field values exactly as the user typed them. It is
//! only turned into a [`PatientPayload`] after validation, merging in the
//! municipality and state the postal-code lookup derived.

use crate::error::{CoreError, CoreResult};
use crate::model::{Address, PatientPayload, PersonalData, Sex};
use crate::study::StudyKind;
use crate::Patient;
use clinilab_types::{NonEmptyText, PostalCode};

/// Required form fields, named by their wire identifiers for user-facing
/// messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    PaternalSurname,
    BirthDate,
    PostalCode,
    Colony,
}

impl FormField {
    /// Wire identifier, which is also what validation messages show.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Name => "nombre",
            FormField::PaternalSurname => "apellido_paterno",
            FormField::BirthDate => "fecha_nacimiento",
            FormField::PostalCode => "codigo_postal",
            FormField::Colony => "colonia",
        }
    }

    /// Comma-joined field list for error display.
    pub fn join(fields: &[FormField]) -> String {
        fields
            .iter()
            .map(|f| f.wire_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raw form state for creating or editing a patient.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientDraft {
    pub name: String,
    pub paternal_surname: String,
    /// ISO date (`YYYY-MM-DD`).
    pub birth_date: String,
    pub sex: Sex,
    pub postal_code: String,
    pub colony: String,
    pub study_kind: StudyKind,
}

impl PatientDraft {
    /// Pre-populate a draft from an existing record for editing.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.personal.name.clone(),
            paternal_surname: patient.personal.paternal_surname.clone(),
            birth_date: patient.personal.birth_date.clone(),
            sex: patient.personal.sex,
            postal_code: patient.address.postal_code.clone(),
            colony: patient.address.colony.clone(),
            study_kind: patient.study.kind,
        }
    }

    /// Every required field that is missing or malformed, in form order.
    ///
    /// Whitespace-only text counts as missing; a postal code that is not
    /// exactly five digits counts as missing because no address can be
    /// derived from it.
    pub fn missing_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if NonEmptyText::new(&self.name).is_err() {
            missing.push(FormField::Name);
        }
        if NonEmptyText::new(&self.paternal_surname).is_err() {
            missing.push(FormField::PaternalSurname);
        }
        if NonEmptyText::new(&self.birth_date).is_err() {
            missing.push(FormField::BirthDate);
        }
        if PostalCode::parse(&self.postal_code).is_err() {
            missing.push(FormField::PostalCode);
        }
        if NonEmptyText::new(&self.colony).is_err() {
            missing.push(FormField::Colony);
        }
        missing
    }

    /// Validate the draft, reporting every missing field at once.
    pub fn validate(&self) -> CoreResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation { missing })
        }
    }

    /// Build the canonical save payload.
    ///
    /// `municipality` and `state` come from the postal-code lookup, never
    /// from user input.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when any required field is missing;
    /// no payload is produced in that case.
    pub fn build_payload(&self, municipality: &str, state: &str) -> CoreResult<PatientPayload> {
        self.validate()?;
        Ok(PatientPayload {
            personal: PersonalData {
                name: self.name.trim().to_owned(),
                paternal_surname: self.paternal_surname.trim().to_owned(),
                birth_date: self.birth_date.trim().to_owned(),
                sex: self.sex,
                age: None,
            },
            address: Address {
                postal_code: self.postal_code.trim().to_owned(),
                colony: self.colony.trim().to_owned(),
                municipality: municipality.to_owned(),
                state: state.to_owned(),
            },
            study_kind: self.study_kind,
        })
    }
}
