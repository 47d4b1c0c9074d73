//! Process-local slot without durability.

use super::{DurableSlot, SlotResult};

/// Slot that keeps its value in memory.
///
/// Useful for tests and for callers that persist snapshots themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    name: String,
    value: Option<String>,
}

impl MemorySlot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates a slot pre-filled with `value`, as if written earlier.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Returns the raw stored value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl DurableSlot for MemorySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> SlotResult<Option<String>> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> SlotResult<()> {
        self.value = Some(value.to_string());
        Ok(())
    }
}
