use crate::{
    Db,
    types::{ApplicationId, ApplicationRow, BankId, DateTime},
};
use fra_core::{
    models::{ApplicationRecord, ApplicationStatus, BankGroup},
    ports::ApplicationRepository,
};
use std::time::Duration;

const GET_APPLICATION: &str = r#"
select
    a.id,
    a.submitted_at,
    a.auction_end_at,
    a.status,
    a.offer_count,
    a.revenue_collected,
    coalesce((
        select json_group_array(v.bank_id)
        from viewer v
        where v.application_id = a.id
    ), '[]') as viewed_by,
    coalesce((
        select json_group_array(p.bank_id)
        from purchaser p
        where p.application_id = a.id
    ), '[]') as purchased_by
from
    application a
where
    a.id = $1
"#;

impl ApplicationRepository for Db {
    async fn create_application(
        &self,
        application_id: Self::ApplicationId,
        window: Option<Duration>,
        as_of: Self::DateTime,
    ) -> Result<ApplicationRecord<DateTime, ApplicationId, BankId>, Self::Error> {
        let window = window.unwrap_or(self.market.default_window);
        let auction_end_at = as_of.after(window);

        sqlx::query(
            r#"
            insert into
                application (id, submitted_at, auction_end_at)
            values
                ($1, $2, $3)
            "#,
        )
        .bind(application_id)
        .bind(as_of)
        .bind(auction_end_at)
        .execute(&self.writer)
        .await?;

        Ok(ApplicationRecord {
            id: application_id,
            submitted_at: as_of,
            auction_end_at,
            status: ApplicationStatus::Open,
            offer_count: 0,
            viewed_by: BankGroup::default(),
            purchased_by: BankGroup::default(),
            revenue_collected: 0,
        })
    }

    async fn get_application(
        &self,
        application_id: Self::ApplicationId,
        _as_of: Self::DateTime,
    ) -> Result<Option<ApplicationRecord<DateTime, ApplicationId, BankId>>, Self::Error> {
        let row = sqlx::query_as::<_, ApplicationRow>(GET_APPLICATION)
            .bind(application_id)
            .fetch_optional(&self.reader)
            .await?;

        Ok(row.map(Into::into))
    }
}
