use crate::{
    Db,
    types::{ApplicationId, DateTime},
};
use fra_core::{models::ReconcileReport, ports::ReconcileRepository};

impl ReconcileRepository for Db {
    async fn reconcile(
        &self,
        application_id: Option<Self::ApplicationId>,
        as_of: Self::DateTime,
    ) -> Result<ReconcileReport, Self::Error> {
        let ids: Vec<ApplicationId> = match application_id {
            Some(id) => vec![id],
            None => {
                sqlx::query_scalar(
                    r#"
                    select
                        id
                    from
                        application
                    order by
                        submitted_at
                    "#,
                )
                .fetch_all(&self.reader)
                .await?
            }
        };

        let mut report = ReconcileReport::default();
        for id in ids {
            if let Some(corrected) = self.repair(id, as_of).await? {
                report.examined += 1;
                if corrected {
                    report.corrected += 1;
                }
            }
        }

        Ok(report)
    }
}

impl Db {
    /// Re-derive one application's cached counters from the offer ledger.
    ///
    /// Returns `None` if the application does not exist, otherwise whether
    /// anything had drifted and was rewritten. Each repair runs in its own
    /// writer transaction so the routine interleaves safely with live
    /// traffic instead of holding the whole marketplace hostage.
    async fn repair(
        &self,
        application_id: ApplicationId,
        as_of: DateTime,
    ) -> Result<Option<bool>, sqlx::Error> {
        let mut tx = self.writer.begin().await?;

        let cached: Option<u32> = sqlx::query_scalar(
            r#"
            select
                offer_count
            from
                application
            where
                id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(cached) = cached else {
            return Ok(None);
        };

        let actual: u32 = sqlx::query_scalar(
            r#"
            select
                count(distinct bank_id)
            from
                offer
            where
                application_id = $1
            "#,
        )
        .bind(application_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut corrected = false;

        if actual != cached {
            sqlx::query(
                r#"
                update
                    application
                set
                    offer_count = $2
                where
                    id = $1
                "#,
            )
            .bind(application_id)
            .bind(actual)
            .execute(&mut *tx)
            .await?;
            corrected = true;
        }

        // Every bank on the ledger belongs in `purchased_by`. The repair is
        // additive: banks that purchased the lead without offering are
        // legitimate entries the ledger knows nothing about, so nothing is
        // ever removed here.
        let added = sqlx::query(
            r#"
            insert into
                purchaser (application_id, bank_id, purchased_at)
            select
                o.application_id, o.bank_id, $2
            from
                offer o
            where
                o.application_id = $1
            on conflict
                do nothing
            "#,
        )
        .bind(application_id)
        .bind(as_of)
        .execute(&mut *tx)
        .await?;

        if added.rows_affected() > 0 {
            // The fee accrues with set membership, so healing the set heals
            // the accumulator too.
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
            .bind(added.rows_affected() as i64 * self.market.unit_fee as i64)
            .execute(&mut *tx)
            .await?;
            corrected = true;
        }

        tx.commit().await?;

        Ok(Some(corrected))
    }
}
