use super::{MarketRepository, Repository};

/// The application-level facade a deployment implements.
///
/// Collaborators (web handlers, admin tools, the sweep scheduler) reach the
/// core through an implementation of this trait rather than holding a bare
/// repository. It centralizes the two things every call site needs injected:
/// the clock and identifier generation. Tests implement it with fixed
/// timestamps to drive the auction lifecycle deterministically.
pub trait Marketplace: Send + Sync + 'static {
    /// The opaque offer-terms payload this deployment stores on the ledger
    type TermsData: Send + Sync + 'static;
    /// The storage backend
    type Repository: MarketRepository<Self::TermsData>;

    /// The storage handle.
    fn database(&self) -> &Self::Repository;

    /// The current time, in the repository's representation.
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Mint an identifier for a new application.
    fn generate_application_id(&self) -> <Self::Repository as Repository>::ApplicationId;

    /// Mint an identifier for a new offer.
    fn generate_offer_id(
        &self,
        terms: &Self::TermsData,
    ) -> <Self::Repository as Repository>::OfferId;
}
