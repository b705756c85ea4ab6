//! Validated scalar and collection fields carried by tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated set of free-form task labels.
///
/// Labels are kept as a typed sequence in the domain. The JSON text form is
/// only produced and consumed at the storage boundary via
/// [`TaskLabels::to_storage_text`] and [`TaskLabels::from_storage_text`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskLabels(Vec<String>);

impl TaskLabels {
    /// Creates a label set, trimming values and dropping blanks and duplicates.
    #[must_use]
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        let mut values: Vec<String> = Vec::new();
        for label in labels {
            let trimmed = label.trim();
            if trimmed.is_empty() || values.iter().any(|existing| existing == trimmed) {
                continue;
            }
            values.push(trimmed.to_owned());
        }
        Self(values)
    }

    /// Returns the labels in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` when no labels are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when any label contains `needle`, ignoring case.
    #[must_use]
    pub fn any_contains_ignore_case(&self, needle: &str) -> bool {
        let lowered = needle.to_lowercase();
        self.0
            .iter()
            .any(|label| label.to_lowercase().contains(&lowered))
    }

    /// Encodes the labels as a JSON array for text columns.
    ///
    /// Returns `None` for an empty set so storage keeps a `NULL`.
    #[must_use]
    pub fn to_storage_text(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        serde_json::to_string(&self.0).ok()
    }

    /// Decodes labels from a stored JSON array.
    ///
    /// Missing or unparsable text yields an empty set.
    #[must_use]
    pub fn from_storage_text(text: Option<&str>) -> Self {
        text.and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .map(Self::new)
            .unwrap_or_default()
    }
}

/// Non-negative, finite effort estimate in hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EstimateHours(f64);

impl EstimateHours {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEstimateHours`] when the value is
    /// negative, `NaN`, or infinite.
    pub fn new(value: f64) -> Result<Self, TaskDomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TaskDomainError::InvalidEstimateHours(value));
        }
        Ok(Self(value))
    }

    /// Returns the estimate in hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for EstimateHours {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EstimateHours> for f64 {
    fn from(value: EstimateHours) -> Self {
        value.0
    }
}

/// Trims a title and rejects blank input.
pub(super) fn normalize_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

/// Collapses blank descriptions to `None`.
pub(super) fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
