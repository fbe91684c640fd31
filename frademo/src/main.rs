use frademo::{AppConfig, Cli, impls::MarketApp};
use fra_core::ports::{Marketplace as _, ReconcileRepository as _, SweepRepository as _};
use fra_sqlite::Db;
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    // Accordingly, we likely want to subscribe to these events so we can
    // write them to stdio and possibly some durable location.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // Create config with proper layering of CLI args
    let AppConfig {
        database,
        market,
        schedule,
    } = AppConfig::load(&cli)?;

    // Open database with config
    let db = Db::open(&database, market).await?;
    let app = MarketApp { db };

    // One-shot consistency repair, then exit
    if cli.reconcile {
        let report = app.database().reconcile(None, app.now()).await?;
        tracing::info!(
            examined = report.examined,
            corrected = report.corrected,
            "reconciliation complete"
        );
        return Ok(());
    }

    if schedule.every.is_some() {
        // Run the expiry sweep on the configured cadence
        schedule
            .schedule(async |now: OffsetDateTime| {
                let report = app.database().sweep_expired(now.into()).await?;
                tracing::info!(
                    processed = report.processed,
                    won = report.won,
                    abandoned = report.abandoned,
                    "sweep complete"
                );
                Ok::<_, anyhow::Error>(())
            })
            .await?;
    } else {
        // No cadence configured: perform a single sweep and exit.
        // This is how cron-driven deployments invoke the daemon.
        let report = app.database().sweep_expired(app.now()).await?;
        tracing::info!(
            processed = report.processed,
            won = report.won,
            abandoned = report.abandoned,
            "sweep complete"
        );
    }

    Ok(())
}
