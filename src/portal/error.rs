use std::time::Duration;
use thiserror::Error;

/// Failures of a single (day, commodity) iteration against the portal.
///
/// All variants are recoverable: the orchestrator logs them and moves on
/// to the next pair.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("element `{selector}` not ready after {timeout:?}")]
    ElementNotReady { selector: String, timeout: Duration },

    #[error("no menu option matches commodity `{commodity}`")]
    MenuOptionNotFound { commodity: String },

    #[error("navigation failed: {0}")]
    NavigationFailed(String),
}

impl PortalError {
    pub fn not_ready(selector: impl Into<String>, timeout: Duration) -> Self {
        PortalError::ElementNotReady {
            selector: selector.into(),
            timeout,
        }
    }

    /// Short tag for log fields and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            PortalError::ElementNotReady { .. } => "element_not_ready",
            PortalError::MenuOptionNotFound { .. } => "menu_option_not_found",
            PortalError::NavigationFailed(_) => "navigation_failed",
        }
    }
}

impl From<fantoccini::error::CmdError> for PortalError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        PortalError::NavigationFailed(err.to_string())
    }
}
