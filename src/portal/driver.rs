// src/portal/driver.rs

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument};

use super::{match_option, Browser, PortalError, Selectors};
use crate::record::DateWindow;

/// Waits used while driving the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// Upper bound on waiting for the commodity dropdown.
    pub element_timeout: Duration,
    /// Settle delay after submitting is drawn uniformly from this range.
    pub settle_min: Duration,
    pub settle_max: Duration,
}

impl Timing {
    /// A random delay in `[settle_min, settle_max]`.
    pub fn settle_delay(&self) -> Duration {
        let lo = self.settle_min.as_millis() as u64;
        let hi = (self.settle_max.as_millis() as u64).max(lo);
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            element_timeout: Duration::from_secs(10),
            settle_min: Duration::from_secs(3),
            settle_max: Duration::from_secs(5),
        }
    }
}

/// Turns one (commodity, date) pair into a rendered results page.
pub struct PageDriver<'a, B: Browser> {
    browser: &'a mut B,
    selectors: &'a Selectors,
    timing: &'a Timing,
}

impl<'a, B: Browser> PageDriver<'a, B> {
    pub fn new(browser: &'a mut B, selectors: &'a Selectors, timing: &'a Timing) -> Self {
        Self {
            browser,
            selectors,
            timing,
        }
    }

    /// Select the commodity, set both date bounds, press search, then wait
    /// out the settle delay. There is no readiness signal from the portal;
    /// the delay is best effort.
    #[instrument(level = "debug", skip(self, date), fields(date = %date))]
    pub async fn load(&mut self, commodity: &str, date: &DateWindow) -> Result<(), PortalError> {
        let sel = self.selectors;

        // 1) dropdown present
        self.browser
            .wait_for(&sel.commodity_select, self.timing.element_timeout)
            .await?;

        // 2) resolve against the live options
        let options = self.browser.menu_options(&sel.commodity_select).await?;
        let option = match_option(commodity, &options)?;
        debug!(option = %option.text, index = option.index, "selecting commodity");
        self.browser.choose(&sel.commodity_select, option).await?;

        // 3) start and end of the range get the same day
        let iso = date.iso();
        let found = self.browser.fill_inputs(&sel.date_inputs, &iso, 2).await?;
        if found < 2 {
            return Err(PortalError::not_ready(
                sel.date_inputs.clone(),
                self.timing.element_timeout,
            ));
        }

        // 4) primary action
        if !self
            .browser
            .click_marked(&sel.buttons, &sel.primary_class)
            .await?
        {
            return Err(PortalError::not_ready(
                format!("{}[class*={}]", sel.buttons, sel.primary_class),
                self.timing.element_timeout,
            ));
        }

        // 5) settle
        let delay = self.timing.settle_delay();
        debug!(?delay, "waiting for results to render");
        sleep(delay).await;
        Ok(())
    }

    pub async fn page_source(&mut self) -> Result<String, PortalError> {
        self.browser.page_source().await
    }
}
