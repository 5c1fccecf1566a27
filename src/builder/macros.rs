//! Macros for concise condition literals.

/// Build a [`Condition`](crate::core::Condition) from done/undone lists.
///
/// # Example
///
/// ```
/// use conditional::condition;
/// use conditional::core::Condition;
///
/// let both = condition!(done: ["opened", "scrolled"], undone: ["dismissed"]);
/// assert_eq!(
///     both,
///     Condition::done(["scrolled", "opened"]).and_undone(["dismissed"])
/// );
///
/// let only_undone = condition!(undone: ["dismissed"]);
/// assert_eq!(only_undone, Condition::undone(["dismissed"]));
///
/// let always: Condition<&str> = condition!();
/// assert_eq!(always, Condition::Always);
/// ```
#[macro_export]
macro_rules! condition {
    () => {
        $crate::core::Condition::Always
    };
    (
        done: [$($done:expr),* $(,)?]
        $(, undone: [$($undone:expr),* $(,)?])?
        $(,)?
    ) => {{
        let condition = $crate::core::Condition::done([$($done),*]);
        $(let condition = condition.and_undone([$($undone),*]);)?
        condition
    }};
    (undone: [$($undone:expr),* $(,)?] $(,)?) => {
        $crate::core::Condition::undone([$($undone),*])
    };
}
