//! Perform handlers and their teardowns.

use std::fmt;
use std::rc::Rc;

/// One-shot cleanup returned by a handler.
///
/// Consumed when it runs, so it can run at most once.
pub struct Teardown(Box<dyn FnOnce()>);

impl Teardown {
    pub fn new<F>(cleanup: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Teardown(Box::new(cleanup))
    }

    pub fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Teardown(..)")
    }
}

/// Values a handler may return: nothing, a teardown, or maybe a teardown.
pub trait IntoTeardown {
    fn into_teardown(self) -> Option<Teardown>;
}

impl IntoTeardown for () {
    fn into_teardown(self) -> Option<Teardown> {
        None
    }
}

impl IntoTeardown for Teardown {
    fn into_teardown(self) -> Option<Teardown> {
        Some(self)
    }
}

impl IntoTeardown for Option<Teardown> {
    fn into_teardown(self) -> Option<Teardown> {
        self
    }
}

type HandlerFn = dyn Fn() -> Option<Teardown>;

/// Shared perform callback.
///
/// Clones share the same callback and compare as the same handler with
/// [`Handler::same`]; two handlers built from separate closures never
/// do, even if the closures are identical. Reconciliation relies on this
/// to tell a re-supplied handler apart from a new one.
///
/// # Example
///
/// ```rust
/// use conditional::effects::{Handler, Teardown};
///
/// let show = Handler::new(|| println!("show tooltip"));
/// let with_cleanup = Handler::new(|| Teardown::new(|| println!("hide tooltip")));
///
/// assert!(show.same(&show.clone()));
/// assert!(!show.same(&with_cleanup));
/// ```
#[derive(Clone)]
pub struct Handler(Rc<HandlerFn>);

impl Handler {
    pub fn new<F, R>(perform: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: IntoTeardown,
    {
        Handler(Rc::new(move || perform().into_teardown()))
    }

    /// Run the handler, returning its teardown if it produced one.
    pub fn call(&self) -> Option<Teardown> {
        (self.0)()
    }

    /// Whether both handles refer to the same callback.
    pub fn same(&self, other: &Handler) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn unit_handler_has_no_teardown() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let handler = Handler::new(move || counter.set(counter.get() + 1));

        assert!(handler.call().is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn teardown_runs_once_when_consumed() {
        let cleanups = Rc::new(Cell::new(0));
        let counter = cleanups.clone();
        let handler = Handler::new(move || {
            let counter = counter.clone();
            Teardown::new(move || counter.set(counter.get() + 1))
        });

        let teardown = handler.call().unwrap();
        assert_eq!(cleanups.get(), 0);
        teardown.run();
        assert_eq!(cleanups.get(), 1);
    }

    #[test]
    fn optional_teardown_is_forwarded() {
        let handler = Handler::new(|| None::<Teardown>);
        assert!(handler.call().is_none());

        let handler = Handler::new(|| Some(Teardown::new(|| {})));
        assert!(handler.call().is_some());
    }

    #[test]
    fn identity_follows_clones_not_contents() {
        let first = Handler::new(|| {});
        let second = Handler::new(|| {});

        assert!(first.same(&first.clone()));
        assert!(!first.same(&second));
    }
}
