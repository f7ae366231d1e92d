use serde::Serialize;

use crate::domain::category::{CategoryCatalog, CategoryOption};

/// Popup state of the category selector.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectorState {
    Closed,
    Open,
}

/// Single-select widget backed by a fixed category list.
///
/// The selection is kept as a string-encoded integer, mirroring what a form
/// control submits. An empty string means nothing is selected.
#[derive(Debug, Clone)]
pub struct CategorySelector {
    options: Vec<CategoryOption>,
    default_value: String,
    selected: String,
    state: SelectorState,
}

impl CategorySelector {
    /// Create a closed selector preselecting the catalog's default category.
    pub fn new(catalog: &CategoryCatalog) -> Self {
        let default_value = catalog.default_value().to_string();
        Self {
            options: catalog.options().to_vec(),
            selected: default_value.clone(),
            default_value,
            state: SelectorState::Closed,
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectorState::Open
    }

    pub fn options(&self) -> &[CategoryOption] {
        &self.options
    }

    /// Currently selected value, empty when the selection was cleared.
    pub fn value(&self) -> &str {
        &self.selected
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Option matching the current selection, if any.
    pub fn selected_option(&self) -> Option<&CategoryOption> {
        let value = self.selected.parse::<i32>().ok()?;
        self.options.iter().find(|option| option.value == value)
    }

    /// Trigger activation: opens a closed popup, closes an open one.
    ///
    /// A selector without options never opens.
    pub fn activate(&mut self) {
        self.state = match self.state {
            SelectorState::Closed if !self.options.is_empty() => SelectorState::Open,
            _ => SelectorState::Closed,
        };
    }

    /// Outside click or escape.
    pub fn dismiss(&mut self) {
        self.state = SelectorState::Closed;
    }

    /// Pick an item from the list.
    ///
    /// Picking the current selection clears it; picking another known value
    /// replaces it. Unknown values leave the selection untouched. The popup
    /// closes in every case.
    pub fn select(&mut self, value: &str) {
        let value = value.trim();
        if value == self.selected {
            self.selected.clear();
        } else if self.is_known(value) {
            self.selected = value.to_string();
        }
        self.state = SelectorState::Closed;
    }

    /// Set the selection directly, as when a submitted form is replayed.
    ///
    /// Unlike [`CategorySelector::select`] this never toggles and keeps
    /// unknown values so validation can report them.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.selected = value.into();
    }

    /// Restore the default selection and close the popup.
    pub fn reset(&mut self) {
        self.selected = self.default_value.clone();
        self.state = SelectorState::Closed;
    }

    fn is_known(&self, value: &str) -> bool {
        value
            .parse::<i32>()
            .map(|value| self.options.iter().any(|option| option.value == value))
            .unwrap_or(false)
    }
}
