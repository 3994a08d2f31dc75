//! Adapter configuration.

use serde::{Deserialize, Serialize};

/// What `create_internal` does when the entity already has an internal
/// component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`AccessError::DuplicateComponent`](crate::AccessError::DuplicateComponent).
    #[default]
    Reject,
    /// Leave the existing component untouched and succeed.
    Keep,
    /// Overwrite the existing component with a fresh default one.
    Replace,
}

/// Configuration for an [`AccessAdapter`](crate::AccessAdapter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl AccessConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Parse a config from JSON, e.g. `{"duplicate_policy": "replace"}`.
    /// Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}
