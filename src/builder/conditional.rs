//! Builder for conditional definitions.

use crate::builder::error::BuildError;
use crate::core::Condition;
use crate::effects::{Conditional, Handler, IntoTeardown};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Fluent builder for [`Conditional`].
///
/// Validation accumulates every problem instead of stopping at the first.
pub struct ConditionalBuilder<T> {
    name: Option<String>,
    when: Option<Condition<T>>,
    perform: Option<Handler>,
}

impl<T> ConditionalBuilder<T> {
    pub fn new() -> Self {
        Self {
            name: None,
            when: None,
            perform: None,
        }
    }

    /// Name the conditional so redefinitions find it by name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the condition (required).
    pub fn when(mut self, when: Condition<T>) -> Self {
        self.when = Some(when);
        self
    }

    /// Use a condition that always holds.
    pub fn always(self) -> Self {
        self.when(Condition::Always)
    }

    /// Set the perform handler (required).
    pub fn perform(mut self, handler: Handler) -> Self {
        self.perform = Some(handler);
        self
    }

    /// Set the perform handler from a closure.
    pub fn perform_with<F, R>(self, perform: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoTeardown,
    {
        self.perform(Handler::new(perform))
    }

    /// Check the definition, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        checks.push(match &self.when {
            None => Validation::fail(BuildError::MissingCondition),
            Some(Condition::Requires(requirements)) if requirements.is_empty() => {
                Validation::fail(BuildError::EmptyRequirements)
            }
            Some(_) => Validation::success(()),
        });

        if self.perform.is_none() {
            checks.push(Validation::fail(BuildError::MissingHandler));
        }

        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            checks.push(Validation::fail(BuildError::EmptyName));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the conditional.
    /// Returns every validation error if the definition is incomplete.
    pub fn build(self) -> Result<Conditional<T>, NonEmptyVec<BuildError>> {
        self.validate().into_result()?;

        match (self.when, self.perform) {
            (Some(when), Some(perform)) => Ok(Conditional {
                name: self.name,
                when,
                perform,
            }),
            (None, _) => Err(NonEmptyVec::singleton(BuildError::MissingCondition)),
            (_, None) => Err(NonEmptyVec::singleton(BuildError::MissingHandler)),
        }
    }
}

impl<T> Default for ConditionalBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Requirements;

    #[test]
    fn builder_validates_required_fields() {
        let result = ConditionalBuilder::<&str>::new().build();

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| *e == BuildError::MissingCondition));
        assert!(errors.iter().any(|e| *e == BuildError::MissingHandler));
    }

    #[test]
    fn builder_accumulates_all_errors() {
        let result = ConditionalBuilder::<&str>::new()
            .name("  ")
            .when(Requirements::default().into())
            .validate();

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| *e == BuildError::EmptyName));
                assert!(errors.iter().any(|e| *e == BuildError::EmptyRequirements));
                assert!(errors.iter().any(|e| *e == BuildError::MissingHandler));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn fluent_api_builds_conditional() {
        let conditional = Conditional::builder()
            .name("welcome")
            .when(Condition::done(["signed_in"]).and_undone(["dismissed"]))
            .perform_with(|| {})
            .build()
            .unwrap();

        assert_eq!(conditional.name.as_deref(), Some("welcome"));
        assert_eq!(
            conditional.when,
            Condition::done(["signed_in"]).and_undone(["dismissed"])
        );
    }

    #[test]
    fn always_condition_is_valid() {
        let builder = ConditionalBuilder::<&str>::new().always().perform_with(|| {});

        assert!(builder.validate().is_success());
        assert!(builder.build().unwrap().name.is_none());
    }
}
