use serde::{Deserialize, Serialize};
use std::{fmt::Debug, hash::Hash};
/// A tag naming one kind of failure.
///
/// Categories are compared by value, so a plain fieldless enum is the usual
/// implementation. Cancellation categories can never be captured as values.
pub trait Category: Copy + Eq + Hash + Debug {
    fn is_cancellation(&self) -> bool {
        false
    }
}
/// An error that knows which [`Category`] it belongs to.
pub trait Categorized {
    type Category: Category;
    fn category(&self) -> Self::Category;
}
/// Errors raised by the crate itself, never by a wrapped target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterError {
    CancellationCategory { name: String },
    InvalidConfig { field: String, message: String },
}
impl AdapterError {
    pub fn cancellation(name: impl Into<String>) -> Self {
        Self::CancellationCategory {
            name: name.into(),
        }
    }
    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CancellationCategory { name } => {
                write!(f, "cancellation category {} cannot be captured as a value", name)
            }
            Self::InvalidConfig { field, message } => {
                write!(f, "invalid configuration for {}: {}", field, message)
            }
        }
    }
}
impl std::error::Error for AdapterError {}
