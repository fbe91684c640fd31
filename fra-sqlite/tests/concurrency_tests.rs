//! Race tests: many banks hammering the same application, and competing
//! sweepers. SQLite serializes the actual writes, so these exercise the
//! logical races (duplicate submissions, repeated marks, double sweeps)
//! rather than torn writes.

mod common;

use common::{TestApp, bank};
use fra_core::{
    models::{ApplicationStatus, MarketConfig},
    ports::{
        ApplicationRepository, InteractionRepository, Marketplace, OfferRepository,
        SweepRepository,
    },
};
use fra_sqlite::{Db, types::DateTime};
use std::time::Duration;
use tokio::task::JoinSet;

const HOUR: Duration = Duration::from_secs(3600);

fn t0() -> DateTime {
    time::OffsetDateTime::now_utc().into()
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_duplicate_offers_create_one_row() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    let created = db
        .create_application(app.generate_application_id(), None, t0)
        .await?;
    let bank_a = bank();

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let db = db.clone();
        let application_id = created.id;
        let terms = serde_json::json!({ "rate_bps": 450 });
        let offer_id = app.generate_offer_id(&terms);
        let at = t0.after(HOUR);
        tasks.spawn(async move {
            db.submit_offer(application_id, bank_a, offer_id, terms, at)
                .await
        });
    }

    let mut created_count = 0;
    let mut existing_count = 0;
    while let Some(result) = tasks.join_next().await {
        match result??.unwrap() {
            submission if submission.is_new() => created_count += 1,
            _ => existing_count += 1,
        }
    }
    assert_eq!(created_count, 1);
    assert_eq!(existing_count, 7);

    let record = db.get_application(created.id, t0.after(HOUR)).await?.unwrap();
    assert_eq!(record.offer_count, 1);
    assert_eq!(record.purchased_by.len(), 1);
    assert_eq!(record.revenue_collected, MarketConfig::default().unit_fee);

    let offers = <Db as OfferRepository<serde_json::Value>>::query_offers(db, created.id).await?;
    assert_eq!(offers.len(), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_views_never_duplicate() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    let created = db
        .create_application(app.generate_application_id(), None, t0)
        .await?;
    let bank_a = bank();

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let db = db.clone();
        let application_id = created.id;
        let at = t0.after(HOUR);
        tasks.spawn(async move { db.mark_viewed(application_id, bank_a, at).await });
    }
    while let Some(result) = tasks.join_next().await {
        assert!(result??);
    }

    let record = db.get_application(created.id, t0.after(HOUR)).await?.unwrap();
    assert_eq!(record.viewed_by.len(), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn distinct_banks_all_land() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    let created = db
        .create_application(app.generate_application_id(), None, t0)
        .await?;

    let mut tasks = JoinSet::new();
    for _ in 0..6 {
        let db = db.clone();
        let application_id = created.id;
        let bank_id = bank();
        let terms = serde_json::json!({ "rate_bps": 390 });
        let offer_id = app.generate_offer_id(&terms);
        let at = t0.after(2 * HOUR);
        tasks.spawn(async move {
            db.submit_offer(application_id, bank_id, offer_id, terms, at)
                .await
        });
    }
    while let Some(result) = tasks.join_next().await {
        assert!(result??.unwrap().is_new());
    }

    let record = db.get_application(created.id, t0.after(2 * HOUR)).await?.unwrap();
    assert_eq!(record.offer_count, 6);
    assert_eq!(record.purchased_by.len(), 6);
    assert_eq!(
        record.revenue_collected,
        6 * MarketConfig::default().unit_fee
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn competing_sweepers_transition_once() -> anyhow::Result<()> {
    let app = TestApp::open(MarketConfig::default()).await?;
    let db = app.database();
    let t0 = t0();

    let created = db
        .create_application(app.generate_application_id(), None, t0)
        .await?;
    let terms = serde_json::json!({ "rate_bps": 450 });
    db.submit_offer(
        created.id,
        bank(),
        app.generate_offer_id(&terms),
        terms,
        t0.after(HOUR),
    )
    .await?
    .unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..4 {
        let db = db.clone();
        let at = t0.after(48 * HOUR);
        tasks.spawn(async move { db.sweep_expired(at).await });
    }

    let mut transitions = 0;
    while let Some(result) = tasks.join_next().await {
        let report = result??;
        transitions += report.won + report.abandoned;
        // a lost race still counts as processed, never as an error
        assert!(report.processed >= report.won + report.abandoned);
    }
    assert_eq!(transitions, 1);

    let record = db.get_application(created.id, t0.after(48 * HOUR)).await?.unwrap();
    assert_eq!(record.status, ApplicationStatus::Won);

    Ok(())
}
