// src/run.rs

use chrono::NaiveDate;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

use crate::dataset::Dataset;
use crate::extract::{extract_records, Extraction};
use crate::geo::Gazetteer;
use crate::portal::{driver::Timing, Browser, PageDriver, PortalError, Selectors};
use crate::record::{DateWindow, PriceRecord};

/// Result of one (day, commodity) iteration.
#[derive(Debug)]
pub enum IterationOutcome {
    /// The results table was read; may hold zero rows.
    Collected(Vec<PriceRecord>),
    /// The page showed no table at all.
    NoTable,
    /// The form could not be driven; nothing was collected.
    Skipped(PortalError),
}

/// Per-run counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: usize,
    pub collected: usize,
    pub empty: usize,
    pub skipped: usize,
    pub records: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &IterationOutcome) {
        self.iterations += 1;
        match outcome {
            IterationOutcome::Collected(rows) => {
                self.collected += 1;
                self.records += rows.len();
            }
            IterationOutcome::NoTable => self.empty += 1,
            IterationOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// What to collect and how to read it.
pub struct RunPlan<'a> {
    pub days: u32,
    pub commodities: &'a [String],
    /// Day 0; later days count backwards from here.
    pub today: NaiveDate,
    pub selectors: &'a Selectors,
    pub timing: &'a Timing,
    pub gazetteer: &'a Gazetteer,
}

impl RunPlan<'_> {
    /// Every (date, commodity) pair in run order: outer loop days, inner
    /// loop commodities.
    pub fn pairs(&self) -> impl Iterator<Item = (DateWindow, &str)> + '_ {
        (0..self.days).flat_map(move |d| {
            let date = DateWindow::days_back(self.today, d);
            self.commodities.iter().map(move |c| (date, c.as_str()))
        })
    }
}

/// Drive the form for one pair and read whatever table it produced.
pub async fn run_iteration<B: Browser>(
    browser: &mut B,
    plan: &RunPlan<'_>,
    commodity: &str,
    date: &DateWindow,
) -> IterationOutcome {
    let mut driver = PageDriver::new(browser, plan.selectors, plan.timing);

    let html = match driver.load(commodity, date).await {
        Ok(()) => driver.page_source().await,
        Err(e) => Err(e),
    };
    let html = match html {
        Ok(html) => html,
        Err(e) => return IterationOutcome::Skipped(e),
    };

    match extract_records(&html, commodity, date, plan.gazetteer) {
        Extraction::Rows(rows) => IterationOutcome::Collected(rows),
        Extraction::NoTable => IterationOutcome::NoTable,
    }
}

/// Walk every pair of `plan` on one browser session and accumulate the
/// results. A failing pair is logged and skipped; nothing aborts the loop.
pub async fn collect<B: Browser>(browser: &mut B, plan: &RunPlan<'_>) -> (Dataset, RunSummary) {
    let mut dataset = Dataset::new();
    let mut summary = RunSummary::default();
    let mut current_day = None;
    let mut day_idx = 0;

    for (date, commodity) in plan.pairs() {
        if current_day != Some(date) {
            current_day = Some(date);
            day_idx += 1;
            info!("[{}/{}] processing date {}", day_idx, plan.days, date);
        }

        let span = info_span!("iteration", %date, commodity);
        let start = Instant::now();
        let outcome = run_iteration(browser, plan, commodity, &date)
            .instrument(span.clone())
            .await;

        span.in_scope(|| match &outcome {
            IterationOutcome::Collected(rows) => {
                info!(rows = rows.len(), elapsed = ?start.elapsed(), "collected")
            }
            IterationOutcome::NoTable => warn!("no results table"),
            IterationOutcome::Skipped(e) => {
                error!(kind = e.kind(), error = %e, "iteration skipped")
            }
        });

        summary.record(&outcome);
        if let IterationOutcome::Collected(rows) = outcome {
            dataset.extend(rows);
        }
    }

    (dataset, summary)
}

/// Close `browser`, logging rather than propagating a failure. Returns
/// whether the session closed cleanly.
pub async fn close_session<B: Browser>(browser: &mut B) -> bool {
    match browser.close().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to close browser session");
            false
        }
    }
}

/// [`collect`], then close the session whatever happened, including a
/// panic inside the loop (which is re-raised after closing).
pub async fn collect_and_close<B: Browser>(
    mut browser: B,
    plan: &RunPlan<'_>,
) -> (Dataset, RunSummary) {
    let result = AssertUnwindSafe(collect(&mut browser, plan))
        .catch_unwind()
        .await;

    close_session(&mut browser).await;

    match result {
        Ok(out) => out,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_run_days_outer_commodities_inner() {
        let commodities = vec!["A".to_string(), "B".to_string()];
        let selectors = Selectors::default();
        let timing = Timing::default();
        let gazetteer = Gazetteer::indonesia();
        let plan = RunPlan {
            days: 2,
            commodities: &commodities,
            today: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            selectors: &selectors,
            timing: &timing,
            gazetteer: &gazetteer,
        };

        let order: Vec<(String, &str)> = plan.pairs().map(|(d, c)| (d.iso(), c)).collect();
        assert_eq!(
            order,
            vec![
                ("2025-01-01".to_string(), "A"),
                ("2025-01-01".to_string(), "B"),
                ("2024-12-31".to_string(), "A"),
                ("2024-12-31".to_string(), "B"),
            ]
        );
    }

    #[test]
    fn summary_counts_each_outcome() {
        let mut s = RunSummary::default();
        s.record(&IterationOutcome::Collected(vec![]));
        s.record(&IterationOutcome::NoTable);
        s.record(&IterationOutcome::Skipped(PortalError::MenuOptionNotFound {
            commodity: "X".into(),
        }));
        assert_eq!(
            s,
            RunSummary {
                iterations: 3,
                collected: 1,
                empty: 1,
                skipped: 1,
                records: 0
            }
        );
    }
}
