mod application;
mod interaction;
mod marketplace;
mod offer;
mod reconcile;
mod sweep;

pub use application::ApplicationRepository;
pub use interaction::InteractionRepository;
pub use marketplace::Marketplace;
pub use offer::{OfferRepository, SubmitFailure};
pub use reconcile::ReconcileRepository;
pub use sweep::SweepRepository;

/// The base trait every storage adapter implements.
///
/// Implementations choose their own identifier and timestamp representations;
/// the domain logic only requires that timestamps be totally ordered so the
/// pure status resolver can compare them. All associated types are expected
/// to be cheap to copy.
pub trait Repository: Clone + Send + Sync + 'static {
    /// The adapter's infrastructure error type. Domain-level failures (a
    /// closed auction, an unknown application) are *not* errors; they travel
    /// in the `Ok` channel of the relevant operations.
    type Error: std::error::Error + Send + Sync + 'static;
    /// The adapter's timestamp representation
    type DateTime: PartialOrd + Clone + Copy + std::fmt::Debug + Send + Sync + Unpin + 'static;
    /// Unique identifier for an application
    type ApplicationId: Clone
        + Copy
        + std::fmt::Debug
        + std::fmt::Display
        + Eq
        + std::hash::Hash
        + Send
        + Sync
        + Unpin
        + 'static;
    /// Unique identifier for a bank
    type BankId: Clone
        + Copy
        + std::fmt::Debug
        + std::fmt::Display
        + Eq
        + std::hash::Hash
        + Send
        + Sync
        + Unpin
        + 'static;
    /// Unique identifier for an offer
    type OfferId: Clone
        + Copy
        + std::fmt::Debug
        + std::fmt::Display
        + Eq
        + std::hash::Hash
        + Send
        + Sync
        + Unpin
        + 'static;
}

/// The "marker" trait for a complete marketplace backend: implementing it
/// asserts support for every operation the collaborator layer calls.
pub trait MarketRepository<TermsData>:
    ApplicationRepository
    + OfferRepository<TermsData>
    + InteractionRepository
    + SweepRepository
    + ReconcileRepository
{
}
