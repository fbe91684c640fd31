use fra_core::models::MarketConfig;
use fra_core::ports::Marketplace;
use fra_sqlite::{
    Db,
    config::SqliteConfig,
    types::{ApplicationId, BankId, DateTime, OfferId},
};

/// The marketplace facade the tests drive: random v4 identifiers, the wall
/// clock, and JSON offer terms. Timestamps are always passed explicitly to
/// the repository calls, so `now()` only anchors each scenario's t0.
pub struct TestApp(pub Db);

impl TestApp {
    pub async fn open(market: MarketConfig) -> anyhow::Result<Self> {
        let db = Db::open(&SqliteConfig::default(), market).await?;
        Ok(Self(db))
    }
}

impl Marketplace for TestApp {
    type TermsData = serde_json::Value;
    type Repository = Db;

    fn database(&self) -> &Db {
        &self.0
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_application_id(&self) -> ApplicationId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_offer_id(&self, _terms: &serde_json::Value) -> OfferId {
        uuid::Uuid::new_v4().into()
    }
}

#[allow(dead_code)]
pub fn bank() -> BankId {
    uuid::Uuid::new_v4().into()
}
