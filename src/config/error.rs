//! Condition configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or using a condition table
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// A condition object listed neither done nor undone actions
    #[error("Condition '{name}' has neither a done nor an undone list")]
    EmptyRequirements { name: String },

    /// No condition is defined under this name
    #[error("Unknown condition '{name}'")]
    UnknownCondition { name: String },
}
