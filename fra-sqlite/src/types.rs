//! Type definitions for the SQLite implementation.
//!
//! This module contains both public types used throughout the crate and
//! internal types used for database row mapping. The public types include
//! strongly-typed IDs and datetime representations that ensure type safety
//! across the system.

use fra_core::models::{ApplicationRecord, ApplicationStatus, BankGroup, OfferRecord};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{ApplicationId, BankId, OfferId};

/// `ApplicationStatus` with a SQLite storage representation (its lowercase
/// name). Kept crate-local so the core stays persistence-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StatusText(pub ApplicationStatus);

impl sqlx::Type<sqlx::Sqlite> for StatusText {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for StatusText {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0.as_str(), args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for StatusText {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let string = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(Self(string.parse()?))
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ApplicationRow {
    pub id: ApplicationId,
    pub submitted_at: DateTime,
    pub auction_end_at: DateTime,
    pub status: StatusText,
    pub offer_count: u32,
    pub revenue_collected: i64,
    pub viewed_by: sqlx::types::Json<BankGroup<BankId>>,
    pub purchased_by: sqlx::types::Json<BankGroup<BankId>>,
}

impl From<ApplicationRow> for ApplicationRecord<DateTime, ApplicationId, BankId> {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: row.id,
            submitted_at: row.submitted_at,
            auction_end_at: row.auction_end_at,
            status: row.status.0,
            offer_count: row.offer_count,
            viewed_by: row.viewed_by.0,
            purchased_by: row.purchased_by.0,
            // non-negative by schema constraint
            revenue_collected: row.revenue_collected as u64,
        }
    }
}

pub(crate) struct OfferRow<TermsData> {
    pub id: OfferId,
    pub application_id: ApplicationId,
    pub bank_id: BankId,
    pub submitted_at: DateTime,
    pub terms: sqlx::types::Json<TermsData>,
}

// Manual impl: the derive cannot see the bound `Json<TermsData>: Decode`
// needs on the generic parameter.
impl<'r, TermsData: serde::de::DeserializeOwned> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow>
    for OfferRow<TermsData>
{
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row as _;
        Ok(Self {
            id: row.try_get("id")?,
            application_id: row.try_get("application_id")?,
            bank_id: row.try_get("bank_id")?,
            submitted_at: row.try_get("submitted_at")?,
            terms: row.try_get("terms")?,
        })
    }
}

impl<TermsData> From<OfferRow<TermsData>>
    for OfferRecord<DateTime, OfferId, ApplicationId, BankId, TermsData>
{
    fn from(row: OfferRow<TermsData>) -> Self {
        Self {
            id: row.id,
            application_id: row.application_id,
            bank_id: row.bank_id,
            submitted_at: row.submitted_at,
            terms: row.terms.0,
        }
    }
}
