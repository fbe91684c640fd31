use crate::{
    Db,
    types::{ApplicationId, DateTime, StatusText},
};
use fra_core::{
    models::{ApplicationStatus, SweepReport, resolve},
    ports::SweepRepository,
};

impl SweepRepository for Db {
    async fn query_expired(&self, as_of: Self::DateTime) -> Result<Vec<ApplicationId>, Self::Error> {
        sqlx::query_scalar(
            r#"
            select
                id
            from
                application
            where
                status = 'open'
            and
                auction_end_at <= $1
            order by
                auction_end_at
            "#,
        )
        .bind(as_of)
        .fetch_all(&self.reader)
        .await
    }

    async fn sweep_expired(&self, as_of: Self::DateTime) -> Result<SweepReport, Self::Error> {
        let expired = self.query_expired(as_of).await?;

        let mut report = SweepReport::default();
        for application_id in expired {
            match self.transition(application_id, as_of).await {
                Ok(outcome) => {
                    report.processed += 1;
                    match outcome {
                        Some(ApplicationStatus::Won) => report.won += 1,
                        Some(ApplicationStatus::Abandoned) => report.abandoned += 1,
                        // another sweeper got there between the scan and the
                        // conditional write; their transition counts
                        _ => {}
                    }
                }
                Err(error) => {
                    // One stuck record must not fail the cycle; the next
                    // sweep retries it since transitions are conditional.
                    tracing::warn!(
                        %application_id,
                        %error,
                        "failed to close expired auction, skipping"
                    );
                }
            }
        }

        Ok(report)
    }
}

impl Db {
    /// Flip one expired application to its terminal status.
    ///
    /// Returns the status written, or `None` if the application was no
    /// longer persisted-open (or not actually expired) by the time we
    /// looked; both are no-ops, not errors.
    async fn transition(
        &self,
        application_id: ApplicationId,
        as_of: DateTime,
    ) -> Result<Option<ApplicationStatus>, sqlx::Error> {
        let mut tx = self.writer.begin().await?;

        let row: Option<(DateTime, u32)> = sqlx::query_as(
            r#"
            select
                auction_end_at,
                offer_count
            from
                application
            where
                id = $1
            and
                status = 'open'
            "#,
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((auction_end_at, offer_count)) = row else {
            return Ok(None);
        };

        let terminal = resolve(as_of, auction_end_at, offer_count, ApplicationStatus::Open);
        if !terminal.is_terminal() {
            return Ok(None);
        }

        // "Only if still open" is what makes the sweep idempotent under
        // concurrent workers and at-least-once scheduling.
        let updated = sqlx::query(
            r#"
            update
                application
            set
                status = $2
            where
                id = $1
            and
                status = 'open'
            "#,
        )
        .bind(application_id)
        .bind(StatusText(terminal))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((updated.rows_affected() == 1).then_some(terminal))
    }
}
