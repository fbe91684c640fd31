//! Concrete marketplace wiring for the demo deployment.
//!
//! This module provides the concrete implementation of the Marketplace
//! trait, binding the SQLite backend to a wall-clock time source and
//! random identifier generation.

use fra_core::ports::Marketplace;
use fra_sqlite::{
    Db,
    types::{ApplicationId, DateTime, OfferId},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The offer terms stored on the ledger by this deployment.
///
/// The core treats terms as an opaque payload; this is simply what the demo
/// chooses to record about each financing offer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferTerms {
    /// Offered principal, in minor currency units
    pub amount: u64,
    /// Annual interest rate, in basis points
    pub rate_bps: u32,
    /// Repayment term, in months
    pub term_months: u32,
}

/// The demo marketplace: SQLite storage, UTC wall clock, random V4 ids.
#[derive(Clone)]
pub struct MarketApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl Marketplace for MarketApp {
    type TermsData = OfferTerms;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_application_id(&self) -> ApplicationId {
        Uuid::new_v4().into()
    }

    fn generate_offer_id(&self, _terms: &OfferTerms) -> OfferId {
        Uuid::new_v4().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fra_core::{
        models::MarketConfig,
        ports::{ApplicationRepository as _, OfferRepository as _},
    };
    use fra_sqlite::{config::SqliteConfig, types::BankId};

    #[tokio::test]
    async fn offer_flows_through_the_facade() {
        let db = Db::open(&SqliteConfig::default(), MarketConfig::default())
            .await
            .unwrap();
        let app = MarketApp { db };

        let application_id = app.generate_application_id();
        let record = app
            .database()
            .create_application(application_id, None, app.now())
            .await
            .unwrap();
        assert_eq!(record.id, application_id);

        let terms = OfferTerms {
            amount: 2_500_000,
            rate_bps: 725,
            term_months: 12,
        };
        let offer_id = app.generate_offer_id(&terms);
        let bank: BankId = Uuid::new_v4().into();
        let submission = app
            .database()
            .submit_offer(application_id, bank, offer_id, terms, app.now())
            .await
            .unwrap()
            .unwrap();
        assert!(submission.is_new());
        assert_eq!(submission.record().application_id, application_id);
    }
}
