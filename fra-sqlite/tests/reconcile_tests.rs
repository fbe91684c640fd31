mod common;

use common::{TestApp, bank};
use fra_core::{
    models::MarketConfig,
    ports::{
        ApplicationRepository, InteractionRepository, Marketplace, OfferRepository,
        ReconcileRepository,
    },
};
use fra_sqlite::types::DateTime;
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(3600);

fn t0() -> DateTime {
    time::OffsetDateTime::now_utc().into()
}

#[tokio::test]
async fn quiescent_system_needs_no_corrections() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    for _ in 0..3 {
        let created = db
            .create_application(app.generate_application_id(), None, t0)
            .await?;
        for _ in 0..2 {
            let terms = serde_json::json!({ "rate_bps": 420 });
            db.submit_offer(
                created.id,
                bank(),
                app.generate_offer_id(&terms),
                terms,
                t0.after(HOUR),
            )
            .await?
            .unwrap();
        }
    }

    let report = db.reconcile(None, t0.after(2 * HOUR)).await?;
    assert_eq!(report.examined, 3);
    assert_eq!(report.corrected, 0);

    Ok(())
}

#[tokio::test]
async fn heals_manufactured_drift() -> anyhow::Result<()> {
    let market = MarketConfig {
        unit_fee: 10,
        ..MarketConfig::default()
    };
    let app = TestApp::open(market).await?;
    let db = app.database();
    let t0 = t0();

    let created = db
        .create_application(app.generate_application_id(), None, t0)
        .await?;
    for _ in 0..3 {
        let terms = serde_json::json!({ "rate_bps": 475 });
        db.submit_offer(
            created.id,
            bank(),
            app.generate_offer_id(&terms),
            terms,
            t0.after(HOUR),
        )
        .await?
        .unwrap();
    }

    // the class of bug this routine exists for: the cached view lost track
    // of the ledger
    sqlx::query("update application set offer_count = 0, revenue_collected = 0 where id = $1")
        .bind(created.id)
        .execute(&db.writer)
        .await?;
    sqlx::query("delete from purchaser where application_id = $1")
        .bind(created.id)
        .execute(&db.writer)
        .await?;

    let report = db.reconcile(Some(created.id), t0.after(2 * HOUR)).await?;
    assert_eq!(report.examined, 1);
    assert_eq!(report.corrected, 1);

    let healed = db.get_application(created.id, t0.after(2 * HOUR)).await?.unwrap();
    assert_eq!(healed.offer_count, 3);
    assert_eq!(healed.purchased_by.len(), 3);
    assert_eq!(healed.revenue_collected, 30);

    // the repair converges: a second pass finds nothing
    let repeat = db.reconcile(Some(created.id), t0.after(3 * HOUR)).await?;
    assert_eq!(repeat.corrected, 0);

    Ok(())
}

#[tokio::test]
async fn purchases_without_offers_are_retained() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    let created = db
        .create_application(app.generate_application_id(), None, t0)
        .await?;
    let lurker = bank();
    let bidder = bank();

    // the lurker paid for the lead but never offered; the ledger knows
    // nothing about them, and the reconciler must not evict them
    assert!(db.mark_purchased(created.id, lurker, t0.after(HOUR)).await?);

    let terms = serde_json::json!({ "rate_bps": 510 });
    db.submit_offer(
        created.id,
        bidder,
        app.generate_offer_id(&terms),
        terms,
        t0.after(2 * HOUR),
    )
    .await?
    .unwrap();

    let report = db.reconcile(Some(created.id), t0.after(3 * HOUR)).await?;
    assert_eq!(report.corrected, 0);

    let record = db.get_application(created.id, t0.after(3 * HOUR)).await?.unwrap();
    assert_eq!(record.offer_count, 1);
    assert_eq!(record.purchased_by.len(), 2);
    assert!(record.purchased_by.contains(&lurker));
    assert!(record.purchased_by.contains(&bidder));

    Ok(())
}

#[tokio::test]
async fn reconciling_unknown_application_examines_nothing() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    let report = db.reconcile(Some(app.generate_application_id()), t0).await?;
    assert_eq!(report.examined, 0);
    assert_eq!(report.corrected, 0);

    Ok(())
}
