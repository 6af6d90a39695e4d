//! Rate limiting for function calls.
//!
//! A throttled function runs at most once per `wait` window. The first call
//! runs synchronously; calls arriving while a window is open are coalesced
//! into a single pending call, the most recent one, which runs when the
//! window closes and opens the next window.
//!
//! ```text
//!          call              finished
//!   Idle ───────► Executing ─────────► Cooldown
//!    ▲                ▲                   │ window end
//!    │                └─── pending ───────┤
//!    └──────────────────── none ──────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lambdash::function::{throttle, ManualScheduler};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let save = throttle(|draft: &str| draft.len(), Duration::from_millis(100), Rc::clone(&scheduler));
//!
//! assert_eq!(save.call("h"), Some(1));
//! assert_eq!(save.call("he"), Some(1));
//! assert_eq!(save.call("hello"), Some(1));
//! assert_eq!(save.executions(), 1);
//!
//! scheduler.advance(Duration::from_millis(100));
//! assert_eq!(save.executions(), 2);
//! assert_eq!(save.call("hello!"), Some(5));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::scheduler::{ManualScheduler, Scheduler};

/// Configuration for [`throttle_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleOptions {
    trailing: bool,
}

impl ThrottleOptions {
    /// Returns the default options: trailing calls are kept.
    pub const fn new() -> Self {
        Self { trailing: true }
    }

    /// Sets whether a call arriving inside a window is kept for the end of
    /// the window (`true`) or dropped (`false`).
    #[must_use]
    pub const fn with_trailing(self, trailing: bool) -> Self {
        Self { trailing }
    }

    /// Returns whether trailing calls are kept.
    pub const fn trailing(&self) -> bool {
        self.trailing
    }
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a throttle is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottlePhase {
    /// No window is open; the next call runs immediately.
    Idle,
    /// The wrapped function is running.
    Executing,
    /// A window is open; calls are deferred or dropped.
    Cooldown,
}

/// What [`ThrottleState::on_call`] decided for a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallDecision<A> {
    /// Run the function now with these arguments.
    Execute(A),
    /// The arguments were stored as the pending call.
    Defer,
    /// The arguments were discarded.
    Drop,
}

/// The state machine behind [`Throttle`], without any clock or function.
///
/// # Examples
///
/// ```rust
/// use lambdash::function::{CallDecision, ThrottleOptions, ThrottlePhase, ThrottleState};
///
/// let mut state: ThrottleState<i32, i32> = ThrottleState::new(ThrottleOptions::default());
///
/// assert_eq!(state.on_call(1), CallDecision::Execute(1));
/// state.on_executed(10);
/// assert_eq!(state.phase(), ThrottlePhase::Cooldown);
///
/// assert_eq!(state.on_call(2), CallDecision::Defer);
/// assert_eq!(state.on_call(3), CallDecision::Defer);
/// assert_eq!(state.on_window_end(), Some(3));
/// assert_eq!(state.phase(), ThrottlePhase::Executing);
/// ```
#[derive(Debug, Clone)]
pub struct ThrottleState<A, R> {
    phase: ThrottlePhase,
    pending: Option<A>,
    result: Option<R>,
    executions: usize,
    options: ThrottleOptions,
}

impl<A, R> ThrottleState<A, R> {
    /// Creates an idle state.
    pub const fn new(options: ThrottleOptions) -> Self {
        Self {
            phase: ThrottlePhase::Idle,
            pending: None,
            result: None,
            executions: 0,
            options,
        }
    }

    /// Registers a call.
    ///
    /// In `Idle` the call runs and the phase becomes `Executing`. Otherwise
    /// the arguments replace any pending call, or are dropped when trailing
    /// calls are disabled.
    pub fn on_call(&mut self, arguments: A) -> CallDecision<A> {
        match self.phase {
            ThrottlePhase::Idle => {
                self.phase = ThrottlePhase::Executing;
                CallDecision::Execute(arguments)
            }
            ThrottlePhase::Executing | ThrottlePhase::Cooldown if self.options.trailing => {
                self.pending = Some(arguments);
                CallDecision::Defer
            }
            ThrottlePhase::Executing | ThrottlePhase::Cooldown => CallDecision::Drop,
        }
    }

    /// Records a finished execution and opens a window.
    pub fn on_executed(&mut self, result: R) {
        self.result = Some(result);
        self.executions += 1;
        self.phase = ThrottlePhase::Cooldown;
    }

    /// Abandons an execution whose function panicked.
    ///
    /// The phase returns to `Idle` and any pending call is discarded, so the
    /// next call runs immediately.
    pub fn on_failed(&mut self) {
        self.pending = None;
        self.phase = ThrottlePhase::Idle;
    }

    /// Closes the current window.
    ///
    /// Returns the pending arguments, which must now be executed, or
    /// `None` after returning to `Idle`.
    pub fn on_window_end(&mut self) -> Option<A> {
        match self.pending.take() {
            Some(arguments) => {
                self.phase = ThrottlePhase::Executing;
                Some(arguments)
            }
            None => {
                self.phase = ThrottlePhase::Idle;
                None
            }
        }
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> ThrottlePhase {
        self.phase
    }

    /// Returns the pending arguments, if any.
    pub const fn pending(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    /// Returns the result of the latest execution.
    pub const fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    /// Returns how many times the function has run.
    pub const fn executions(&self) -> usize {
        self.executions
    }
}

/// Resets the state to `Idle` unless the execution it guards completes.
struct ResetOnUnwind<'a, A, R> {
    state: &'a RefCell<ThrottleState<A, R>>,
    completed: bool,
}

impl<A, R> Drop for ResetOnUnwind<'_, A, R> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        tracing::trace!("throttle: function panicked, returning to idle");
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.on_failed();
        }
    }
}

struct Inner<A, R, F, S> {
    function: RefCell<F>,
    state: RefCell<ThrottleState<A, R>>,
    wait: Duration,
    scheduler: S,
}

impl<A, R, F, S> Inner<A, R, F, S>
where
    A: 'static,
    R: 'static,
    F: FnMut(A) -> R + 'static,
    S: Scheduler + 'static,
{
    fn execute(this: &Rc<Self>, arguments: A) {
        tracing::trace!(
            executions = this.state.borrow().executions(),
            "throttle: executing"
        );
        // Only the function is borrowed while it runs, so it may call the
        // throttle again; such calls are deferred.
        let mut guard = ResetOnUnwind {
            state: &this.state,
            completed: false,
        };
        let result = {
            let mut function = this.function.borrow_mut();
            (*function)(arguments)
        };
        guard.completed = true;
        drop(guard);
        this.state.borrow_mut().on_executed(result);

        let weak = Rc::downgrade(this);
        this.scheduler
            .schedule(this.wait, Box::new(move || Self::end_window(&weak)));
    }

    fn end_window(weak: &Weak<Self>) {
        let Some(this) = weak.upgrade() else {
            tracing::trace!("throttle: dropped before window end");
            return;
        };
        let next = this.state.borrow_mut().on_window_end();
        match next {
            Some(arguments) => {
                tracing::trace!("throttle: window ended, running pending call");
                Self::execute(&this, arguments);
            }
            None => tracing::trace!("throttle: window ended, idle"),
        }
    }
}

/// A throttled function.
///
/// Clones share the same function, state and scheduler.
///
/// # Type Parameters
///
/// * `A` - The argument type, a tuple for several arguments
/// * `R` - The result type
/// * `F` - The wrapped function
/// * `S` - The scheduler that closes windows
///
/// # Thread Safety
///
/// This type is neither `Send` nor `Sync`.
pub struct Throttle<A, R, F, S> {
    inner: Rc<Inner<A, R, F, S>>,
}

/// Throttles `function` to one execution per `wait`, keeping trailing calls.
///
/// See the [module documentation](self).
pub fn throttle<A, R, F, S>(function: F, wait: Duration, scheduler: S) -> Throttle<A, R, F, S>
where
    A: 'static,
    R: Clone + 'static,
    F: FnMut(A) -> R + 'static,
    S: Scheduler + 'static,
{
    throttle_with_options(function, wait, scheduler, ThrottleOptions::default())
}

/// Throttles `function` with explicit [`ThrottleOptions`].
///
/// # Examples
///
/// ```rust
/// use lambdash::function::{throttle_with_options, ManualScheduler, ThrottleOptions};
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = Rc::new(ManualScheduler::new());
/// let ping = throttle_with_options(
///     |host: &str| host.to_uppercase(),
///     Duration::from_secs(1),
///     Rc::clone(&scheduler),
///     ThrottleOptions::new().with_trailing(false),
/// );
///
/// ping.call("alpha");
/// ping.call("beta");
/// scheduler.run_until_idle();
///
/// assert_eq!(ping.executions(), 1);
/// assert_eq!(ping.call("gamma"), Some("GAMMA".to_string()));
/// ```
pub fn throttle_with_options<A, R, F, S>(
    function: F,
    wait: Duration,
    scheduler: S,
    options: ThrottleOptions,
) -> Throttle<A, R, F, S>
where
    A: 'static,
    R: Clone + 'static,
    F: FnMut(A) -> R + 'static,
    S: Scheduler + 'static,
{
    Throttle {
        inner: Rc::new(Inner {
            function: RefCell::new(function),
            state: RefCell::new(ThrottleState::new(options)),
            wait,
            scheduler,
        }),
    }
}

impl<A, R, F, S> Throttle<A, R, F, S>
where
    A: 'static,
    R: Clone + 'static,
    F: FnMut(A) -> R + 'static,
    S: Scheduler + 'static,
{
    /// Calls the throttled function.
    ///
    /// Returns the result of the most recent execution, which is this call's
    /// own result if it ran immediately. `None` means nothing has finished
    /// running yet.
    pub fn call(&self, arguments: A) -> Option<R> {
        let decision = self.inner.state.borrow_mut().on_call(arguments);
        match decision {
            CallDecision::Execute(arguments) => Inner::execute(&self.inner, arguments),
            CallDecision::Defer => tracing::trace!("throttle: call deferred"),
            CallDecision::Drop => tracing::trace!("throttle: call dropped"),
        }
        self.inner.state.borrow().result().cloned()
    }
}

impl<A, R, F, S> Throttle<A, R, F, S> {
    /// Returns the current phase.
    pub fn phase(&self) -> ThrottlePhase {
        self.inner.state.borrow().phase()
    }

    /// Returns how many times the function has run.
    pub fn executions(&self) -> usize {
        self.inner.state.borrow().executions()
    }

    /// Returns whether a deferred call is waiting for the window to close.
    pub fn has_pending(&self) -> bool {
        self.inner.state.borrow().pending().is_some()
    }

    /// Returns the window length.
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

impl<A, R, F, S> Clone for Throttle<A, R, F, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A, R, F, S> fmt::Debug for Throttle<A, R, F, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Throttle")
            .field("phase", &self.phase())
            .field("executions", &self.executions())
            .field("has_pending", &self.has_pending())
            .field("wait", &self.inner.wait)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_not_impl_any!(Throttle<(), (), fn(()), Rc<ManualScheduler>>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    const WAIT: Duration = Duration::from_millis(100);

    fn recording_throttle(
        options: ThrottleOptions,
    ) -> (
        Rc<ManualScheduler>,
        Rc<RefCell<Vec<i32>>>,
        Throttle<i32, i32, impl FnMut(i32) -> i32, Rc<ManualScheduler>>,
    ) {
        let scheduler = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let throttled = throttle_with_options(
            move |value: i32| {
                sink.borrow_mut().push(value);
                value * 10
            },
            WAIT,
            Rc::clone(&scheduler),
            options,
        );
        (scheduler, log, throttled)
    }

    #[rstest]
    fn test_burst_runs_first_call_synchronously_once() {
        let (_scheduler, log, throttled) = recording_throttle(ThrottleOptions::default());
        for value in 1..=10 {
            assert_eq!(throttled.call(value), Some(10));
        }
        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(throttled.phase(), ThrottlePhase::Cooldown);
        assert!(throttled.has_pending());
    }

    #[rstest]
    fn test_trailing_call_uses_last_arguments() {
        let (scheduler, log, throttled) = recording_throttle(ThrottleOptions::default());
        for value in 1..=10 {
            throttled.call(value);
        }
        scheduler.advance(Duration::from_millis(99));
        assert_eq!(*log.borrow(), vec![1]);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*log.borrow(), vec![1, 10]);
        assert_eq!(throttled.executions(), 2);
        assert_eq!(throttled.phase(), ThrottlePhase::Cooldown);
    }

    #[rstest]
    fn test_executions_never_start_closer_than_wait() {
        let (scheduler, log, throttled) = recording_throttle(ThrottleOptions::default());
        let mut starts = Vec::new();

        throttled.call(1);
        starts.push(scheduler.now());
        scheduler.advance(Duration::from_millis(50));
        throttled.call(2);
        scheduler.advance(Duration::from_millis(50));
        starts.push(scheduler.now());
        scheduler.advance(Duration::from_millis(50));
        throttled.call(3);
        scheduler.advance(Duration::from_millis(49));
        assert_eq!(*log.borrow(), vec![1, 2]);
        scheduler.advance(Duration::from_millis(1));
        starts.push(scheduler.now());

        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert_eq!(
            starts,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200)
            ]
        );
    }

    #[rstest]
    fn test_returns_to_idle_when_window_ends_without_pending_call() {
        let (scheduler, log, throttled) = recording_throttle(ThrottleOptions::default());
        throttled.call(1);
        scheduler.advance(Duration::from_millis(150));
        assert_eq!(throttled.phase(), ThrottlePhase::Idle);

        assert_eq!(throttled.call(2), Some(20));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[rstest]
    fn test_without_trailing_calls_in_window_are_dropped() {
        let (scheduler, log, throttled) =
            recording_throttle(ThrottleOptions::new().with_trailing(false));
        throttled.call(1);
        throttled.call(2);
        assert!(!throttled.has_pending());

        scheduler.run_until_idle();
        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(throttled.phase(), ThrottlePhase::Idle);
    }

    #[rstest]
    fn test_reentrant_call_is_deferred() {
        let scheduler = Rc::new(ManualScheduler::new());
        let handle: Rc<RefCell<Option<Box<dyn Fn(u32)>>>> = Rc::new(RefCell::new(None));
        let runs = Rc::new(Cell::new(0_u32));

        let (callback, counter) = (Rc::clone(&handle), Rc::clone(&runs));
        let throttled = throttle(
            move |depth: u32| {
                counter.set(counter.get() + 1);
                if depth == 0
                    && let Some(again) = callback.borrow().as_ref()
                {
                    again(depth + 1);
                }
            },
            WAIT,
            Rc::clone(&scheduler),
        );
        let reentry = throttled.clone();
        *handle.borrow_mut() = Some(Box::new(move |depth: u32| {
            reentry.call(depth);
        }));

        throttled.call(0);
        assert_eq!(runs.get(), 1);
        assert!(throttled.has_pending());

        scheduler.advance(WAIT);
        assert_eq!(runs.get(), 2);

        handle.borrow_mut().take();
    }

    #[rstest]
    fn test_dropping_throttle_discards_pending_call() {
        let (scheduler, log, throttled) = recording_throttle(ThrottleOptions::default());
        throttled.call(1);
        throttled.call(2);
        drop(throttled);

        assert_eq!(scheduler.run_until_idle(), 1);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[rstest]
    fn test_state_drops_calls_without_trailing() {
        let mut state: ThrottleState<&str, ()> =
            ThrottleState::new(ThrottleOptions::new().with_trailing(false));
        assert_eq!(state.on_call("a"), CallDecision::Execute("a"));
        assert_eq!(state.on_call("b"), CallDecision::Drop);
        state.on_executed(());
        assert_eq!(state.on_call("c"), CallDecision::Drop);
        assert_eq!(state.on_window_end(), None);
        assert_eq!(state.phase(), ThrottlePhase::Idle);
        assert_eq!(state.executions(), 1);
    }

    #[rstest]
    fn test_options_default_keeps_trailing() {
        assert!(ThrottleOptions::default().trailing());
        assert!(!ThrottleOptions::default().with_trailing(false).trailing());
    }

    #[rstest]
    fn test_panicking_call_leaves_throttle_usable() {
        let scheduler = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let throttled = throttle(
            move |value: i32| {
                assert!(value != 0, "zero is rejected");
                sink.borrow_mut().push(value);
            },
            WAIT,
            Rc::clone(&scheduler),
        );

        let outcome = catch_unwind(AssertUnwindSafe(|| throttled.call(0)));
        let message = outcome.unwrap_err();
        assert_eq!(message.downcast_ref::<&str>(), Some(&"zero is rejected"));
        assert_eq!(throttled.phase(), ThrottlePhase::Idle);
        assert_eq!(throttled.executions(), 0);

        scheduler.advance(Duration::from_secs(10));
        throttled.call(1);
        scheduler.advance(Duration::from_secs(10));
        throttled.call(2);
        scheduler.run_until_idle();

        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(throttled.executions(), 2);
    }

    #[rstest]
    fn test_panicking_pending_call_returns_to_idle() {
        let scheduler = Rc::new(ManualScheduler::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let throttled = throttle(
            move |value: i32| {
                assert!(value >= 0, "negative values are rejected");
                sink.borrow_mut().push(value);
            },
            WAIT,
            Rc::clone(&scheduler),
        );

        throttled.call(1);
        throttled.call(-1);
        let outcome = catch_unwind(AssertUnwindSafe(|| scheduler.advance(WAIT)));
        assert!(outcome.is_err());
        assert_eq!(throttled.phase(), ThrottlePhase::Idle);

        assert_eq!(throttled.call(3), Some(()));
        assert_eq!(*log.borrow(), vec![1, 3]);
    }

    #[rstest]
    fn test_state_on_failed_clears_pending() {
        let mut state: ThrottleState<i32, ()> = ThrottleState::new(ThrottleOptions::default());
        assert_eq!(state.on_call(1), CallDecision::Execute(1));
        assert_eq!(state.on_call(2), CallDecision::Defer);
        state.on_failed();
        assert_eq!(state.phase(), ThrottlePhase::Idle);
        assert!(state.pending().is_none());
        assert_eq!(state.on_call(3), CallDecision::Execute(3));
    }
}
