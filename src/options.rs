//! Extraction options configuration.

/// Placeholder text that spreadsheets use for "no value".
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Options for turning a sheet into a [`Table`](crate::model::Table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Data-cell text that is replaced by an empty string (None = keep all)
    pub empty_placeholder: Option<String>,

    /// Trim surrounding whitespace from header cells
    pub trim_headers: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            empty_placeholder: Some(DEFAULT_PLACEHOLDER.to_string()),
            trim_headers: false,
        }
    }
}

impl ExtractOptions {
    /// Create new extraction options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder normalized to an empty string.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_placeholder = Some(placeholder.into());
        self
    }

    /// Keep placeholder values as they are.
    pub fn without_placeholder(mut self) -> Self {
        self.empty_placeholder = None;
        self
    }

    /// Trim whitespace around header names.
    pub fn with_trimmed_headers(mut self, trim: bool) -> Self {
        self.trim_headers = trim;
        self
    }

    /// Apply the placeholder rule to a resolved data value.
    pub(crate) fn normalize(&self, value: String) -> String {
        match &self.empty_placeholder {
            Some(placeholder) if *placeholder == value => String::new(),
            _ => value,
        }
    }
}
