use anyhow::Result;
use chrono::Local;
use panganscraper::{
    config::Settings,
    dataset::{write_dataset, WriteOutcome},
    portal::WebDriverBrowser,
    run::{close_session, collect_and_close, RunPlan},
};
use std::{env, path::PathBuf};
use tokio::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .init();
    info!("startup");

    // ─── 2) settings: defaults < YAML file < env ─────────────────────
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("PANGAN_CONFIG").ok())
        .map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    info!(
        days = settings.days,
        commodities = settings.commodities.len(),
        output = %settings.output.display(),
        "configured"
    );

    // ─── 3) one browser session for the whole run ────────────────────
    let mut browser = WebDriverBrowser::connect(&settings.webdriver_url, settings.headless).await?;
    if let Err(e) = browser
        .open(&settings.portal_url, settings.initial_load)
        .await
    {
        error!(error = %e, "could not open portal");
        close_session(&mut browser).await;
        return Err(e.into());
    }

    // ─── 4) iterate days × commodities ──────────────────────────────
    let timing = settings.timing();
    let gazetteer = settings.gazetteer();
    let plan = RunPlan {
        days: settings.days,
        commodities: &settings.commodities,
        today: Local::now().date_naive(),
        selectors: &settings.selectors,
        timing: &timing,
        gazetteer: &gazetteer,
    };
    let start = Instant::now();
    let (dataset, summary) = collect_and_close(browser, &plan).await;
    info!(
        records = summary.records,
        iterations = summary.iterations,
        collected = summary.collected,
        empty = summary.empty,
        skipped = summary.skipped,
        elapsed = ?start.elapsed(),
        "run finished"
    );

    // ─── 5) write once ───────────────────────────────────────────────
    match write_dataset(&dataset, &settings.output)? {
        WriteOutcome::Written { path, rows, .. } => {
            info!("saved {} rows to {}", rows, path.display());
        }
        WriteOutcome::NothingCollected => {
            info!("no data was collected; no output file produced");
        }
    }

    info!("all done");
    Ok(())
}
