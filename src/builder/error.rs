//! Build errors for conditional definitions.

use thiserror::Error;

/// Errors that can occur when building a conditional.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Condition not specified. Call .when(condition) or .always()")]
    MissingCondition,

    #[error("Perform handler not specified. Call .perform(handler)")]
    MissingHandler,

    #[error("Conditional name is empty. Omit .name() for an unnamed conditional")]
    EmptyName,

    #[error("Condition has neither a done nor an undone list. Use .always() instead")]
    EmptyRequirements,
}
