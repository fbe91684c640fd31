use std::future::Future;

/// Repository interface for the idempotent interaction sets.
///
/// Both operations are atomic insert-if-absent: marking a bank that is
/// already present is a no-op, not an error, and concurrent calls (whether
/// from different banks or repeats from the same bank) must never produce
/// duplicate entries. Adapters back these with a uniqueness constraint or
/// conditional update; the "check absence, then append" sequence is never
/// split across statements in application code.
pub trait InteractionRepository: super::Repository {
    /// Record that a bank has viewed the application.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the application exists (whether or not the bank was
    ///   already in the set)
    /// - `Ok(false)` if there is no such application
    fn mark_viewed(
        &self,
        application_id: Self::ApplicationId,
        bank_id: Self::BankId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Record that a bank has committed to the application (purchased the
    /// lead), collecting the unit fee if the bank is newly added.
    ///
    /// Viewing is not a precondition, and terminal applications still accept
    /// the mark: purchase settlement may straggle behind the window close.
    ///
    /// # Returns
    ///
    /// Same contract as [`mark_viewed`](Self::mark_viewed).
    fn mark_purchased(
        &self,
        application_id: Self::ApplicationId,
        bank_id: Self::BankId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
