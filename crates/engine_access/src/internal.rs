//! The internal value component.

use engine_component::Component;
use serde::{Deserialize, Serialize};

use crate::capability::ValueAccess;

/// Holds a single integer value. Fresh components start at
/// [`InternalComponent::DEFAULT_VALUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalComponent {
    value: i32,
}

impl InternalComponent {
    pub const DEFAULT_VALUE: i32 = 100;

    #[must_use]
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl Default for InternalComponent {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VALUE)
    }
}

impl ValueAccess for InternalComponent {
    type Value = i32;

    fn value(&self) -> i32 {
        self.value
    }

    fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    /// Wraps on overflow.
    fn multiply_value(&self, multiplier: i32) -> i32 {
        self.value.wrapping_mul(multiplier)
    }
}

impl Component for InternalComponent {
    fn type_name() -> &'static str {
        "InternalComponent"
    }
}
