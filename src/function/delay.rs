//! One-shot deferred calls.
//!
//! [`delay`] hands a single call to a [`Scheduler`] and returns at once.

use std::time::Duration;

use super::scheduler::Scheduler;

/// Calls `function(arguments)` once, after at least `wait`.
///
/// Returns immediately. The result of the deferred call is discarded and
/// the call cannot be cancelled. Several positional arguments are passed as
/// a tuple.
///
/// # Examples
///
/// ```rust
/// use lambdash::function::{delay, ManualScheduler};
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&log);
/// delay(
///     &scheduler,
///     Duration::from_millis(200),
///     move |(level, message): (&str, &str)| sink.borrow_mut().push(format!("{level}: {message}")),
///     ("warn", "disk almost full"),
/// );
/// assert!(log.borrow().is_empty());
///
/// scheduler.advance(Duration::from_millis(200));
/// assert_eq!(*log.borrow(), vec!["warn: disk almost full"]);
/// ```
pub fn delay<S, A, R, F>(scheduler: &S, wait: Duration, function: F, arguments: A)
where
    S: Scheduler + ?Sized,
    A: 'static,
    F: FnOnce(A) -> R + 'static,
{
    tracing::trace!(wait_ms = wait.as_millis(), "delay: call scheduled");
    scheduler.schedule(
        wait,
        Box::new(move || {
            let _ = function(arguments);
        }),
    );
}
