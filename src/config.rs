use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest accepted `initial_capacity`.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Receiver settings.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Upper bound on queued instructions. `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pending: Option<usize>,
    /// Initial queue allocation.
    pub initial_capacity: usize,
}

impl ReceiverConfig {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(max_pending: usize) -> Self {
        Self {
            max_pending: Some(max_pending),
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pending == Some(0) {
            return Err(Error::InvalidConfig("max_pending must be greater than zero"));
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(Error::InvalidConfig("initial_capacity exceeds 1048576"));
        }
        if self
            .max_pending
            .is_some_and(|max_pending| self.initial_capacity > max_pending)
        {
            return Err(Error::InvalidConfig("initial_capacity exceeds max_pending"));
        }
        Ok(())
    }

    /// Queue allocation actually used, whether or not `validate` ran.
    pub fn effective_capacity(&self) -> usize {
        let capacity = self.initial_capacity.min(MAX_INITIAL_CAPACITY);
        match self.max_pending {
            Some(max_pending) => capacity.min(max_pending),
            None => capacity,
        }
    }
}
