use crate::models::ApplicationRecord;
use std::future::Future;
use std::time::Duration;

/// Repository interface for the application aggregate.
///
/// An application is created exactly once and never deleted. Every mutation
/// of the aggregate (interaction-set inserts, counter bumps, the terminal
/// status flip) must be applied atomically with respect to concurrent
/// callers; adapters typically use a transaction or a conditional update
/// rather than read-modify-write.
pub trait ApplicationRepository: super::Repository {
    /// Create a new application submitted at `as_of`.
    ///
    /// The auction closes at `as_of + window`; when `window` is `None` the
    /// backend's configured default (48 hours in production) applies. The
    /// window is immutable once set.
    fn create_application(
        &self,
        application_id: Self::ApplicationId,
        window: Option<Duration>,
        as_of: Self::DateTime,
    ) -> impl Future<
        Output = Result<
            ApplicationRecord<Self::DateTime, Self::ApplicationId, Self::BankId>,
            Self::Error,
        >,
    > + Send;

    /// Retrieve an application, returning `None` if it does not exist.
    ///
    /// The record carries the *persisted* status; callers wanting the
    /// effective status at `as_of` derive it with
    /// [`ApplicationRecord::status_as_of`], which never writes. The `as_of`
    /// parameter exists so read paths and tests share one injected clock.
    fn get_application(
        &self,
        application_id: Self::ApplicationId,
        as_of: Self::DateTime,
    ) -> impl Future<
        Output = Result<
            Option<ApplicationRecord<Self::DateTime, Self::ApplicationId, Self::BankId>>,
            Self::Error,
        >,
    > + Send;
}
