use crate::Db;
use fra_core::ports::InteractionRepository;

impl InteractionRepository for Db {
    async fn mark_viewed(
        &self,
        application_id: Self::ApplicationId,
        bank_id: Self::BankId,
        as_of: Self::DateTime,
    ) -> Result<bool, Self::Error> {
        // Single conditional statement: the existence check and the
        // insert-if-absent cannot be separated by a concurrent writer, and
        // a duplicate view from the same bank hits the primary key and
        // inserts nothing.
        let result = sqlx::query(
            r#"
            insert into
                viewer (application_id, bank_id, viewed_at)
            select
                a.id, $2, $3
            from
                application a
            where
                a.id = $1
            on conflict
                do nothing
            "#,
        )
        .bind(application_id)
        .bind(bank_id)
        .bind(as_of)
        .execute(&self.writer)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        // Zero rows is ambiguous between "already viewed" and "no such
        // application"; disambiguate with a read.
        self.application_exists(application_id).await
    }

    async fn mark_purchased(
        &self,
        application_id: Self::ApplicationId,
        bank_id: Self::BankId,
        as_of: Self::DateTime,
    ) -> Result<bool, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let inserted = sqlx::query(
            r#"
            insert into
                purchaser (application_id, bank_id, purchased_at)
            select
                a.id, $2, $3
            from
                application a
            where
                a.id = $1
            on conflict
                do nothing
            "#,
        )
        .bind(application_id)
        .bind(bank_id)
        .bind(as_of)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 1 {
            // Newly committed bank: collect the lead fee atomically with
            // the set insert.
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
            tx.commit().await?;
            return Ok(true);
        }

        tx.commit().await?;
        self.application_exists(application_id).await
    }
}

impl Db {
    async fn application_exists(
        &self,
        application_id: <Db as fra_core::ports::Repository>::ApplicationId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<i64> = sqlx::query_scalar(
            r#"
            select
                1
            from
                application
            where
                id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(found.is_some())
    }
}
