/// A single row on the offer ledger.
///
/// The ledger is append-only and unique on (`application_id`, `bank_id`):
/// a bank submits at most one offer per application. `terms` is an opaque,
/// write-once payload defined by the embedding application.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OfferRecord<DateTime, OfferId, ApplicationId, BankId, TermsData> {
    /// Unique identifier for the offer
    pub id: OfferId,
    /// The application this offer responds to
    pub application_id: ApplicationId,
    /// The bank that submitted the offer
    pub bank_id: BankId,
    /// When the offer was accepted onto the ledger
    pub submitted_at: DateTime,
    /// The offered terms, opaque to the core
    pub terms: TermsData,
}

/// The successful result of an offer submission.
///
/// Submission is idempotent per (application, bank): resubmitting returns
/// the offer already on the ledger rather than erroring, so callers can
/// retry blindly. Only `Created` implies the application's counters moved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", tag = "outcome", content = "offer"))]
pub enum OfferSubmission<R> {
    /// A new row was appended to the ledger
    Created(R),
    /// This bank had already offered on this application; the existing row
    /// is returned unchanged
    Existing(R),
}

impl<R> OfferSubmission<R> {
    /// The ledger row, whether it was just created or already present.
    pub fn record(&self) -> &R {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    /// Consume the submission, yielding the ledger row.
    pub fn into_record(self) -> R {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    /// Whether this submission appended a new row.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
