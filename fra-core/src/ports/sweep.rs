use crate::models::SweepReport;
use std::future::Future;

/// Repository interface for closing expired auctions.
///
/// A sweep visits every application whose persisted status is still open
/// but whose window has elapsed, and flips each to its terminal status with
/// a conditional write ("set terminal only if still open"). A conditional
/// write that affects zero rows means another sweeper or a crashed-and-
/// resumed cycle got there first; that is counted as processed and skipped,
/// which is what makes the sweep safe to run from multiple concurrent
/// workers under at-least-once scheduling.
pub trait SweepRepository: super::Repository {
    /// The applications a sweep at `as_of` would visit: persisted-open with
    /// `auction_end_at <= as_of`.
    fn query_expired(
        &self,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Vec<Self::ApplicationId>, Self::Error>> + Send;

    /// Run one sweep cycle at `as_of`.
    ///
    /// A failure on a single application must not abort the cycle: the
    /// record is logged and skipped, and the next cycle will retry it since
    /// transitions are conditional.
    fn sweep_expired(
        &self,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<SweepReport, Self::Error>> + Send;
}
