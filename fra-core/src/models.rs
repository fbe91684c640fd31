mod application;
mod config;
mod group;
mod offer;
mod report;
mod status;

pub use application::ApplicationRecord;
pub use config::MarketConfig;
pub use group::BankGroup;
pub use offer::{OfferRecord, OfferSubmission};
pub use report::{ReconcileReport, SweepReport};
pub use status::{ApplicationStatus, ParseStatusError, resolve};
