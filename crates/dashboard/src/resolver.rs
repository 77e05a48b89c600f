//! Address sub-form state driven by the postal-code directory.
//!
//! A lookup is only initiated once the typed code is a complete five-digit
//! postal code. Because the user can retype the code while a lookup is still
//! in flight, every lookup is tagged with a monotonically increasing sequence
//! number at initiation and a settled response is applied only if it is newer
//! than the last applied one: later-initiated wins, regardless of completion
//! order.

use crate::gateway::PostalLookup;
use api_client::{ApiError, ApiResult};
use clinilab_core::{PostalCode, PostalCodeInfo};

/// Tag for one in-flight lookup. Obtained from
/// [`AddressResolver::ticket_for`] and redeemed with
/// [`AddressResolver::apply`].
#[derive(Debug)]
pub struct LookupTicket {
    seq: u64,
    code: PostalCode,
}

impl LookupTicket {
    pub fn code(&self) -> &PostalCode {
        &self.code
    }
}

/// What applying a settled lookup did to the resolver state.
#[derive(Clone, Debug, PartialEq)]
pub enum Applied {
    /// A newer lookup was already applied; this response was discarded.
    Stale,
    /// Colony choices, municipality and state were replaced.
    Resolved { first_colony: Option<String> },
    /// The lookup failed; colony choices, municipality and state were
    /// cleared. Carries the user-visible notice.
    Failed { notice: String },
}

/// Resolver-backed portion of the address form.
///
/// `municipality` and `state` are only ever written here; the rest of the
/// form cannot touch them.
#[derive(Debug, Default)]
pub struct AddressResolver {
    issued_seq: u64,
    applied_seq: u64,
    colonies: Vec<String>,
    municipality: String,
    state: String,
}

impl AddressResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colony choices from the last applied successful lookup.
    pub fn colonies(&self) -> &[String] {
        &self.colonies
    }

    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// True while a lookup newer than the last applied one is outstanding.
    pub fn is_loading(&self) -> bool {
        self.applied_seq < self.issued_seq
    }

    /// Seed municipality and state from an existing record (edit flow). The
    /// colony list still comes from a fresh lookup.
    pub fn seed(&mut self, municipality: &str, state: &str) {
        self.municipality = municipality.to_owned();
        self.state = state.to_owned();
    }

    /// Issue a lookup ticket if `raw_code` is a complete postal code.
    ///
    /// Incomplete or malformed codes issue nothing: resolution is attempted
    /// only at exactly five digits.
    pub fn ticket_for(&mut self, raw_code: &str) -> Option<LookupTicket> {
        let code = PostalCode::parse(raw_code).ok()?;
        self.issued_seq += 1;
        Some(LookupTicket {
            seq: self.issued_seq,
            code,
        })
    }

    /// Apply a settled lookup.
    ///
    /// Responses for tickets older than the currently applied one are
    /// discarded untouched: the sequence number assigned at initiation
    /// decides, not completion order.
    pub fn apply(
        &mut self,
        ticket: &LookupTicket,
        outcome: ApiResult<PostalCodeInfo>,
    ) -> Applied {
        if ticket.seq <= self.applied_seq {
            tracing::debug!(code = %ticket.code, "discarding stale postal lookup response");
            return Applied::Stale;
        }
        self.applied_seq = ticket.seq;

        match outcome {
            Ok(info) => {
                self.colonies = info.colonies;
                self.municipality = info.municipality;
                self.state = info.state;
                Applied::Resolved {
                    first_colony: self.colonies.first().cloned(),
                }
            }
            Err(err) => {
                tracing::warn!(code = %ticket.code, error = %err, "postal lookup failed");
                self.colonies.clear();
                self.municipality.clear();
                self.state.clear();
                Applied::Failed {
                    notice: match err {
                        ApiError::NotFound(_) => format!(
                            "No se encontró información para el código postal {}",
                            ticket.code
                        ),
                        other => format!("Error al consultar el código postal: {other}"),
                    },
                }
            }
        }
    }

    /// Drive one lookup to completion against a directory service.
    pub async fn run_lookup<L: PostalLookup>(
        &mut self,
        lookup: &L,
        ticket: LookupTicket,
    ) -> Applied {
        let outcome = lookup.resolve(&ticket.code).await;
        self.apply(&ticket, outcome)
    }

    /// Forget all resolved address data (form cancel/close).
    pub fn clear(&mut self) {
        self.colonies.clear();
        self.municipality.clear();
        self.state.clear();
        // Sequence counters survive so a late response from a previous form
        // session can never resurrect cleared data.
        self.applied_seq = self.issued_seq;
    }
}
