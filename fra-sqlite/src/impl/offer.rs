use crate::{
    Db,
    types::{ApplicationId, BankId, DateTime, OfferId, OfferRow, StatusText},
};
use fra_core::{
    models::{OfferRecord, OfferSubmission},
    ports::{OfferRepository, SubmitFailure},
};

const GET_OFFER: &str = r#"
select
    id,
    application_id,
    bank_id,
    submitted_at,
    json(terms) as terms
from
    offer
where
    id = $1
"#;

const GET_OFFER_BY_BANK: &str = r#"
select
    id,
    application_id,
    bank_id,
    submitted_at,
    json(terms) as terms
from
    offer
where
    application_id = $1
and
    bank_id = $2
"#;

impl<TermsData: Send + Sync + Unpin + serde::Serialize + serde::de::DeserializeOwned + 'static>
    OfferRepository<TermsData> for Db
{
    async fn submit_offer(
        &self,
        application_id: Self::ApplicationId,
        bank_id: Self::BankId,
        offer_id: Self::OfferId,
        terms: TermsData,
        as_of: Self::DateTime,
    ) -> Result<
        Result<
            OfferSubmission<OfferRecord<DateTime, OfferId, ApplicationId, BankId, TermsData>>,
            SubmitFailure,
        >,
        Self::Error,
    > {
        let mut tx = self.writer.begin().await?;

        // Gate on the window first; closed auctions reject, they never queue.
        let gate: Option<(DateTime, StatusText)> = sqlx::query_as(
            r#"
            select
                auction_end_at,
                status
            from
                application
            where
                id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((auction_end_at, StatusText(status))) = gate else {
            return Ok(Err(SubmitFailure::NotFound));
        };

        // Strict tie-break: a window ending exactly now is already closed.
        if status.is_terminal() || as_of >= auction_end_at {
            return Ok(Err(SubmitFailure::AuctionClosed));
        }

        // The unique constraint on (application_id, bank_id) collapses a
        // duplicate submission into zero rows here, whoever wins the race.
        let inserted: Option<OfferId> = sqlx::query_scalar(
            r#"
            insert into
                offer (id, application_id, bank_id, submitted_at, terms)
            values
                ($1, $2, $3, $4, jsonb($5))
            on conflict (application_id, bank_id)
                do nothing
            returning
                id
            "#,
        )
        .bind(offer_id)
        .bind(application_id)
        .bind(bank_id)
        .bind(as_of)
        .bind(sqlx::types::Json(&terms))
        .fetch_optional(&mut *tx)
        .await?;

        if inserted.is_none() {
            // This bank already offered; return the existing row untouched.
            let existing: OfferRow<TermsData> = sqlx::query_as(GET_OFFER_BY_BANK)
                .bind(application_id)
                .bind(bank_id)
                .fetch_one(&mut *tx)
                .await?;
            tx.commit().await?;
            return Ok(Ok(OfferSubmission::Existing(existing.into())));
        }

        // First offer from this bank: maintain the materialized view in the
        // same transaction as the ledger append.
        sqlx::query(
            r#"
            update
                application
            set
                offer_count = offer_count + 1
            where
                id = $1
            "#,
        )
        .bind(application_id)
        .execute(&mut *tx)
        .await?;

        let purchased = sqlx::query(
            r#"
            insert into
                purchaser (application_id, bank_id, purchased_at)
            values
                ($1, $2, $3)
            on conflict
                do nothing
            "#,
        )
        .bind(application_id)
        .bind(bank_id)
        .bind(as_of)
        .execute(&mut *tx)
        .await?;

        // The fee is collected once per bank; a bank that purchased the
        // lead earlier already paid it.
        if purchased.rows_affected() == 1 {
            sqlx::query(
                r#"
                update
                    application
                set
                    revenue_collected = revenue_collected + $2
                where
                    id = $1
                "#,
            )
            .bind(application_id)
            .bind(self.market.unit_fee as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Ok(OfferSubmission::Created(OfferRecord {
            id: offer_id,
            application_id,
            bank_id,
            submitted_at: as_of,
            terms,
        })))
    }

    async fn get_offer(
        &self,
        offer_id: Self::OfferId,
    ) -> Result<Option<OfferRecord<DateTime, OfferId, ApplicationId, BankId, TermsData>>, Self::Error>
    {
        let row: Option<OfferRow<TermsData>> = sqlx::query_as(GET_OFFER)
            .bind(offer_id)
            .fetch_optional(&self.reader)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn query_offers(
        &self,
        application_id: Self::ApplicationId,
    ) -> Result<Vec<OfferRecord<DateTime, OfferId, ApplicationId, BankId, TermsData>>, Self::Error>
    {
        let rows: Vec<OfferRow<TermsData>> = sqlx::query_as(
            r#"
            select
                id,
                application_id,
                bank_id,
                submitted_at,
                json(terms) as terms
            from
                offer
            where
                application_id = $1
            order by
                submitted_at, id
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
