//! Patient form controller.
//!
//! One controller owns one modal: its open/closed lifecycle, the draft being
//! edited, the resolver-backed address sub-form, and the save dispatch. The
//! authoritative patient collection is never touched from here; a successful
//! save only tells the caller to reload it.

use crate::gateway::{PatientGateway, PostalLookup};
use crate::resolver::{AddressResolver, Applied, LookupTicket};
use crate::{DashboardError, DashboardResult};
use api_client::ApiResult;
use clinilab_core::{CoreError, Patient, PatientDraft, PostalCodeInfo, Sex, StudyKind};

/// Modal lifecycle. The only transitions are `Closed -> Creating`,
/// `Closed -> Editing`, and back to `Closed` on cancel or successful save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    /// Editing an existing record; the original identifier is preserved
    /// through the update call.
    Editing {
        id: String,
    },
}

/// State machine behind the create/edit patient modal.
#[derive(Debug, Default)]
pub struct FormController {
    mode: FormMode,
    draft: PatientDraft,
    resolver: AddressResolver,
    notice: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn draft(&self) -> &PatientDraft {
        &self.draft
    }

    /// Resolver-backed address state (colony choices, municipality, state).
    pub fn address(&self) -> &AddressResolver {
        &self.resolver
    }

    /// Last user-visible notice (lookup failure, save failure).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Open the modal with a blank draft for a new patient.
    pub fn open_create(&mut self) {
        self.reset();
        self.mode = FormMode::Creating;
    }

    /// Open the modal pre-populated from an existing record.
    ///
    /// Returns a lookup ticket for the record's postal code so the caller can
    /// refresh the colony choices; the stored municipality and state are
    /// seeded immediately so the sub-form is never blank while the lookup is
    /// in flight.
    pub fn open_edit(&mut self, patient: &Patient) -> Option<LookupTicket> {
        self.reset();
        self.mode = FormMode::Editing {
            id: patient.id.clone(),
        };
        self.draft = PatientDraft::from_patient(patient);
        self.resolver
            .seed(&patient.address.municipality, &patient.address.state);
        self.resolver.ticket_for(&self.draft.postal_code)
    }

    /// Close the modal, dropping the draft.
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn set_name(&mut self, value: &str) {
        self.draft.name = value.to_owned();
    }

    pub fn set_paternal_surname(&mut self, value: &str) {
        self.draft.paternal_surname = value.to_owned();
    }

    pub fn set_birth_date(&mut self, value: &str) {
        self.draft.birth_date = value.to_owned();
    }

    pub fn set_sex(&mut self, value: Sex) {
        self.draft.sex = value;
    }

    pub fn set_colony(&mut self, value: &str) {
        self.draft.colony = value.to_owned();
    }

    pub fn set_study_kind(&mut self, value: StudyKind) {
        self.draft.study_kind = value;
    }

    /// Record a keystroke in the postal-code field.
    ///
    /// Returns a lookup ticket once the field holds a complete five-digit
    /// code; shorter or malformed input changes the draft only.
    pub fn postal_code_input(&mut self, value: &str) -> Option<LookupTicket> {
        self.draft.postal_code = value.to_owned();
        self.resolver.ticket_for(value)
    }

    /// Apply a settled postal lookup to the address sub-form.
    ///
    /// On the first successful resolution the first colony is auto-selected
    /// when the user has not chosen one; on failure the colony selection is
    /// dropped along with the resolved fields. Stale responses change
    /// nothing.
    pub fn apply_lookup(&mut self, ticket: &LookupTicket, outcome: ApiResult<PostalCodeInfo>) {
        match self.resolver.apply(ticket, outcome) {
            Applied::Resolved { first_colony } => {
                if self.draft.colony.trim().is_empty() {
                    if let Some(colony) = first_colony {
                        self.draft.colony = colony;
                    }
                }
            }
            Applied::Failed { notice } => {
                self.draft.colony.clear();
                self.notice = Some(notice);
            }
            Applied::Stale => {}
        }
    }

    /// Drive one postal lookup to completion and apply it.
    pub async fn lookup_postal_code<L: PostalLookup>(
        &mut self,
        lookup: &L,
        ticket: LookupTicket,
    ) {
        let outcome = lookup.resolve(ticket.code()).await;
        self.apply_lookup(&ticket, outcome);
    }

    /// Validate and save the draft.
    ///
    /// Validation failure makes no backend call and keeps the modal open with
    /// the draft intact. Backend failure also keeps everything intact so no
    /// typed data is lost. On success the modal closes, the draft is dropped,
    /// and the returned patient doubles as the signal to reload the list.
    ///
    /// # Errors
    ///
    /// - [`DashboardError::Validation`] listing every missing field
    /// - [`DashboardError::Api`] when the backend rejects the save
    pub async fn submit<G: PatientGateway>(&mut self, gateway: &G) -> DashboardResult<Patient> {
        let mode = self.mode.clone();
        if mode == FormMode::Closed {
            return Err(CoreError::InvalidInput("the patient form is not open".into()).into());
        }

        let payload = self
            .draft
            .build_payload(self.resolver.municipality(), self.resolver.state())?;

        let saved = match &mode {
            FormMode::Creating => gateway.create_patient(&payload).await,
            FormMode::Editing { id } => gateway.update_patient(id, &payload).await,
            FormMode::Closed => unreachable!("checked above"),
        };

        match saved {
            Ok(patient) => {
                tracing::info!(id = %patient.id, "patient saved");
                self.reset();
                Ok(patient)
            }
            Err(err) => {
                tracing::warn!(error = %err, "patient save failed");
                self.notice = Some(format!("No se pudo guardar el paciente: {err}"));
                Err(err.into())
            }
        }
    }

    fn reset(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = PatientDraft::default();
        self.resolver.clear();
        self.notice = None;
    }
}
