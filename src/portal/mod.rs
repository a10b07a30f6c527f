// src/portal/mod.rs

pub mod driver;
mod error;
pub mod menu;
pub mod webdriver;

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub use driver::PageDriver;
pub use error::PortalError;
pub use menu::{match_option, MenuOption};
pub use webdriver::WebDriverBrowser;

/// Structural markers used to find the form controls on the price page.
/// None of them depend on visible label text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    /// The commodity `<select>`.
    pub commodity_select: String,
    /// Date text inputs; the first two are the range start and end.
    pub date_inputs: String,
    /// Candidate buttons for the search action.
    pub buttons: String,
    /// Class fragment marking the primary (search) button.
    pub primary_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            commodity_select: "#select-komoditas".to_string(),
            date_inputs: "input.input".to_string(),
            buttons: "button".to_string(),
            primary_class: "primary".to_string(),
        }
    }
}

/// DOM primitives the page driver needs from a scriptable browser.
///
/// [`WebDriverBrowser`] is the production implementation; tests script
/// their own.
#[async_trait]
pub trait Browser: Send {
    /// Block until an element matching `css` exists, for at most `timeout`.
    async fn wait_for(&mut self, css: &str, timeout: Duration) -> Result<(), PortalError>;

    /// Current options of the `<select>` matching `select_css`, in document order.
    async fn menu_options(&mut self, select_css: &str) -> Result<Vec<MenuOption>, PortalError>;

    /// Make `option` the selected entry of the `<select>` matching `select_css`.
    async fn choose(&mut self, select_css: &str, option: &MenuOption) -> Result<(), PortalError>;

    /// Set `value` on the first `limit` inputs matching `css`. Returns how
    /// many matching inputs exist on the page.
    async fn fill_inputs(
        &mut self,
        css: &str,
        value: &str,
        limit: usize,
    ) -> Result<usize, PortalError>;

    /// Click the first element matching `css` whose `class` attribute
    /// contains `class_marker`. Returns `false` when none matched.
    async fn click_marked(&mut self, css: &str, class_marker: &str) -> Result<bool, PortalError>;

    /// Serialized DOM of the current page.
    async fn page_source(&mut self) -> Result<String, PortalError>;

    /// End the session. Called exactly once per run.
    async fn close(&mut self) -> Result<(), PortalError>;
}
