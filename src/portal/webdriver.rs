// src/portal/webdriver.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::{error::CmdError, Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::{Browser, MenuOption, PortalError};

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

// Sets `.value` directly; the portal's date widgets ignore synthetic typing.
const FILL_INPUTS_JS: &str = r#"
const inputs = document.querySelectorAll(arguments[0]);
for (let i = 0; i < inputs.length && i < arguments[2]; i++) {
    inputs[i].value = arguments[1];
}
return inputs.length;
"#;

// Script click, so overlays covering the button cannot intercept it.
const CLICK_MARKED_JS: &str = r#"
for (const el of document.querySelectorAll(arguments[0])) {
    const cls = el.getAttribute("class");
    if (cls && cls.includes(arguments[1])) {
        el.click();
        return true;
    }
}
return false;
"#;

/// A Chrome session behind a WebDriver endpoint (chromedriver, selenium).
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Start a session at `webdriver_url`, retrying a few times while the
    /// driver process comes up.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let caps = chrome_capabilities(headless);
        let mut attempt = 0;

        let client = loop {
            attempt += 1;
            match ClientBuilder::native()
                .capabilities(caps.clone())
                .connect(webdriver_url)
                .await
            {
                Ok(client) => break client,
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(attempt, error = %e, "webdriver not reachable, retrying");
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("connecting to WebDriver at {}", webdriver_url))
                }
            }
        };

        info!(webdriver_url, headless, "webdriver session started");
        Ok(Self { client })
    }

    /// Navigate to the portal and give its scripts `initial_wait` to boot.
    pub async fn open(&mut self, url: &str, initial_wait: Duration) -> Result<(), PortalError> {
        self.client.goto(url).await?;
        // headless sessions may refuse window management
        if let Err(e) = self.client.maximize_window().await {
            debug!(error = %e, "maximize_window unsupported");
        }
        sleep(initial_wait).await;
        info!(url, "portal loaded");
        Ok(())
    }
}

/// XPath to the `index`-th `<option>` under a select, counted the same way
/// `menu_options` numbers them (document order, through any `<optgroup>`).
fn option_xpath(index: usize) -> String {
    format!("(.//option)[{}]", index + 1)
}

fn chrome_capabilities(headless: bool) -> Map<String, Value> {
    let mut args = vec!["--window-size=1920,1080", "--disable-gpu"];
    if headless {
        args.push("--headless=new");
    }
    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), PortalError> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(PortalError::not_ready(css, timeout)),
            Err(e) => Err(e.into()),
        }
    }

    async fn menu_options(&mut self, select_css: &str) -> Result<Vec<MenuOption>, PortalError> {
        let select = self.client.find(Locator::Css(select_css)).await?;
        let mut labels = Vec::new();
        for option in select.find_all(Locator::Css("option")).await? {
            labels.push(option.text().await?);
        }
        Ok(MenuOption::from_labels(labels))
    }

    async fn choose(&mut self, select_css: &str, option: &MenuOption) -> Result<(), PortalError> {
        let select = self.client.find(Locator::Css(select_css)).await?;
        select
            .find(Locator::XPath(&option_xpath(option.index)))
            .await?
            .click()
            .await?;
        Ok(())
    }

    async fn fill_inputs(
        &mut self,
        css: &str,
        value: &str,
        limit: usize,
    ) -> Result<usize, PortalError> {
        let found = self
            .client
            .execute(FILL_INPUTS_JS, vec![json!(css), json!(value), json!(limit)])
            .await?;
        Ok(found.as_u64().unwrap_or(0) as usize)
    }

    async fn click_marked(&mut self, css: &str, class_marker: &str) -> Result<bool, PortalError> {
        let clicked = self
            .client
            .execute(CLICK_MARKED_JS, vec![json!(css), json!(class_marker)])
            .await?;
        Ok(clicked.as_bool().unwrap_or(false))
    }

    async fn page_source(&mut self) -> Result<String, PortalError> {
        Ok(self.client.source().await?)
    }

    async fn close(&mut self) -> Result<(), PortalError> {
        self.client.clone().close().await?;
        info!("webdriver session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_flag_only_when_requested() {
        let caps = chrome_capabilities(true);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless=new"));

        let caps = chrome_capabilities(false);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(!args.iter().any(|a| a == "--headless=new"));
        assert_eq!(caps["browserName"], "chrome");
    }

    #[test]
    fn option_position_spans_optgroups() {
        // positional over all descendant options, not per-parent like :nth-of-type
        assert_eq!(option_xpath(0), "(.//option)[1]");
        assert_eq!(option_xpath(4), "(.//option)[5]");
    }
}
