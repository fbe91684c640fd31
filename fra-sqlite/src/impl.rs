//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of all repository traits defined
//! in `fra-core` for the SQLite database backend.

use crate::{
    Db,
    types::{ApplicationId, BankId, DateTime, OfferId},
};
use fra_core::ports::{MarketRepository, Repository};

mod application;
mod interaction;
mod offer;
mod reconcile;
mod sweep;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type ApplicationId = ApplicationId;
    type BankId = BankId;
    type OfferId = OfferId;
}

impl<TermsData> MarketRepository<TermsData> for Db where
    TermsData: Send + Sync + Unpin + serde::Serialize + serde::de::DeserializeOwned + 'static
{
}
