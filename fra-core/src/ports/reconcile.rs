use crate::models::ReconcileReport;
use std::future::Future;

/// Repository interface for the standing repair routine.
///
/// `offer_count` and `purchased_by` are denormalized onto the application
/// for read performance; the offer ledger is the ground truth they must
/// track. Every live mutation path keeps them synchronized inside one
/// atomic unit, but this routine exists so drift introduced by any bug or
/// operational accident can be healed on demand instead of patched by hand.
pub trait ReconcileRepository: super::Repository {
    /// Recompute the cached counters and sets from the ledger, writing only
    /// where they differ.
    ///
    /// Pass `Some(id)` to repair a single application, `None` for all.
    /// Corrections follow the same atomic-update discipline as live
    /// traffic, so this is safe to run concurrently with it. On a quiescent,
    /// healthy system the report's `corrected` count is zero.
    fn reconcile(
        &self,
        application_id: Option<Self::ApplicationId>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<ReconcileReport, Self::Error>> + Send;
}
