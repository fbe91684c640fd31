use crate::models::{OfferRecord, OfferSubmission};
use std::future::Future;

/// The ways an offer submission can fail at the domain level.
///
/// Both are terminal for the caller: there is no retry-after-close, and an
/// unknown application will not appear by retrying. Races between
/// simultaneous submissions are *not* represented here; the ledger's
/// uniqueness constraint collapses them into an idempotent
/// [`OfferSubmission::Existing`] result.
///
/// [`OfferSubmission::Existing`]: crate::models::OfferSubmission::Existing
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitFailure {
    /// No such application
    #[error("application not found")]
    NotFound,
    /// The auction window has elapsed or the application is already terminal
    #[error("auction closed")]
    AuctionClosed,
}

/// Repository interface for the append-only offer ledger.
///
/// The ledger is the source of truth for who has offered on what; the
/// application's `offer_count` and `purchased_by` are a materialized view
/// of it, maintained inside the same atomic unit as every ledger insert.
///
/// This trait is parameterized by a generic terms type, allowing an
/// application to colocate write-once data alongside the ledger row.
pub trait OfferRepository<TermsData>: super::Repository {
    /// Append a bank's offer to the ledger.
    ///
    /// On the first insert for this (application, bank) pair, in one atomic
    /// unit: the row is appended, `offer_count` is incremented, the bank is
    /// added to `purchased_by` if absent, and the unit fee is collected. A
    /// repeat submission from the same bank returns the existing row and
    /// moves nothing.
    ///
    /// # Returns
    ///
    /// - `Ok(Ok(submission))`: the offer is on the ledger (new or existing)
    /// - `Ok(Err(failure))`: rejected, unknown application or closed window
    /// - `Err(_)`: infrastructure error
    fn submit_offer(
        &self,
        application_id: Self::ApplicationId,
        bank_id: Self::BankId,
        offer_id: Self::OfferId,
        terms: TermsData,
        as_of: Self::DateTime,
    ) -> impl Future<
        Output = Result<
            Result<
                OfferSubmission<
                    OfferRecord<
                        Self::DateTime,
                        Self::OfferId,
                        Self::ApplicationId,
                        Self::BankId,
                        TermsData,
                    >,
                >,
                SubmitFailure,
            >,
            Self::Error,
        >,
    > + Send;

    /// Retrieve a single offer, returning `None` if it does not exist.
    fn get_offer(
        &self,
        offer_id: Self::OfferId,
    ) -> impl Future<
        Output = Result<
            Option<
                OfferRecord<
                    Self::DateTime,
                    Self::OfferId,
                    Self::ApplicationId,
                    Self::BankId,
                    TermsData,
                >,
            >,
            Self::Error,
        >,
    > + Send;

    /// All offers on the ledger for one application, in submission order.
    fn query_offers(
        &self,
        application_id: Self::ApplicationId,
    ) -> impl Future<
        Output = Result<
            Vec<
                OfferRecord<
                    Self::DateTime,
                    Self::OfferId,
                    Self::ApplicationId,
                    Self::BankId,
                    TermsData,
                >,
            >,
            Self::Error,
        >,
    > + Send;
}
