// src/portal/menu.rs

use super::PortalError;

/// An `<option>` currently rendered in the commodity dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Zero-based position inside the `<select>`.
    pub index: usize,
    /// Visible label, whitespace-trimmed.
    pub text: String,
}

impl MenuOption {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Wrap raw option labels in document order.
    pub fn from_labels<I, S>(labels: I) -> Vec<MenuOption>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(i, s)| MenuOption::new(i, s.as_ref().trim()))
            .collect()
    }
}

/// Pick the option for `target`.
///
/// An exact (case-sensitive) label match wins outright. Otherwise the first
/// option, in document order, whose label contains `target` ignoring case.
pub fn match_option<'a>(
    target: &str,
    options: &'a [MenuOption],
) -> Result<&'a MenuOption, PortalError> {
    if let Some(exact) = options.iter().find(|o| o.text == target) {
        return Ok(exact);
    }

    let needle = target.to_lowercase();
    options
        .iter()
        .find(|o| o.text.to_lowercase().contains(&needle))
        .ok_or_else(|| PortalError::MenuOptionNotFound {
            commodity: target.to_string(),
        })
}
