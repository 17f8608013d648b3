//! Dictionary configuration

use serde::{Deserialize, Serialize};

use crate::bound::Capacity;
use crate::error::{Error, Result};

/// Settings for building an [`LruDict`](crate::LruDict) or
/// [`SharedLruDict`](crate::SharedLruDict)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DictConfig {
    /// Entry limit; missing or `null` means unbounded
    #[serde(default)]
    pub capacity: Capacity,
}

impl DictConfig {
    /// Config with the given capacity
    pub fn new(capacity: impl Into<Capacity>) -> Self {
        Self {
            capacity: capacity.into(),
        }
    }

    /// Read the capacity from an environment variable.
    ///
    /// An unset variable yields the default (unbounded) config.
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(raw) => Self::from_value(Some(&raw)),
            Err(std::env::VarError::NotPresent) => Self::from_value(None),
            Err(std::env::VarError::NotUnicode(raw)) => {
                Err(Error::InvalidCapacity(raw.to_string_lossy().into_owned()))
            }
        }
    }

    /// Config from a raw capacity setting; `None` yields the default
    pub fn from_value(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(raw) => Ok(Self::new(raw.parse::<Capacity>()?)),
            None => Ok(Self::default()),
        }
    }
}
