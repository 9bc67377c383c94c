//! Emitter configuration.

use emitkit_core::EmitError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an asynchronous emitter resolves its listeners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// One listener at a time, each awaited before the next starts.
    #[default]
    Sequential,
    /// All listeners started together, joint completion awaited.
    Concurrent,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            _ => Err(EmitError::UnknownDeliveryMode {
                name: s.to_string(),
            }),
        }
    }
}

/// Configuration for an [`AsyncEventEmitter`](crate::AsyncEventEmitter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncEmitterConfig {
    /// Name reported in log records.
    pub name: Option<String>,
    /// Delivery discipline, fixed for the emitter's lifetime.
    pub delivery: DeliveryMode,
}

impl AsyncEmitterConfig {
    /// Configuration with the given delivery mode and no name
    pub fn with_delivery(delivery: DeliveryMode) -> Self {
        Self {
            name: None,
            delivery,
        }
    }

    /// Set the emitter name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
