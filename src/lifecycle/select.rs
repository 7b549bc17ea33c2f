//! Select input model for enumerated form fields.

use crate::api::ApiError;

/// One choice in a [`SelectField`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A labelled single-choice input bound to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub id: String,
    pub name: String,
    pub label: String,
    pub tooltip: Option<String>,
    pub options: Vec<SelectOption>,
    pub value: String,
    pub disabled: bool,
}

impl SelectField {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            tooltip: None,
            options,
            value: value.into(),
            disabled: false,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        let tooltip = tooltip.into();
        self.tooltip = if tooltip.is_empty() { None } else { Some(tooltip) };
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Change the current value. Only values listed in the options are accepted.
    pub fn select(&mut self, value: &str) -> Result<(), ApiError> {
        if self.disabled {
            return Err(ApiError::Validation(format!("{} cannot be changed", self.label)));
        }
        if !self.options.iter().any(|option| option.value == value) {
            let allowed: Vec<&str> = self.options.iter().map(|option| option.value.as_str()).collect();
            return Err(ApiError::Validation(format!(
                "Invalid {} '{}'. Expected one of: {}",
                self.label.to_lowercase(),
                value,
                allowed.join(", ")
            )));
        }
        self.value = value.to_string();
        Ok(())
    }

    /// Label of the currently selected option
    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == self.value)
            .map(|option| option.label.as_str())
    }

    /// Stable key for an option entry
    pub fn option_key(&self, option: &SelectOption) -> String {
        format!("select-{}-{}", self.name, option.label)
    }
}
