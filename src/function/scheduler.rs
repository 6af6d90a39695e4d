//! The scheduling capability consumed by [`delay`](super::delay) and
//! [`throttle`](super::throttle).
//!
//! Decorators never reach for a global timer. They are handed a
//! [`Scheduler`] that can run a task after a minimum delay, on the same
//! single-threaded queue as every other scheduled task.
//!
//! - [`ManualScheduler`]: a virtual clock that only moves when told to,
//!   for deterministic tests and simulations
//! - `TokioScheduler` (feature `async`): runs tasks on a tokio `LocalSet`

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Runs tasks after a minimum delay.
///
/// Implementations must run each task exactly once, no earlier than `delay`
/// after it was scheduled, and never concurrently with another task.
pub trait Scheduler {
    /// Schedules `task` to run once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn schedule(&self, delay: Duration, task: Task) {
        (**self).schedule(delay, task);
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Task) {
        (**self).schedule(delay, task);
    }
}

struct Entry {
    due: Duration,
    sequence: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so that the max-heap pops the earliest entry first.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_sequence: u64,
    queue: BinaryHeap<Entry>,
}

impl Timeline {
    fn pop_due(&mut self, deadline: Duration) -> Option<Task> {
        if self.queue.peek()?.due > deadline {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }
}

/// A deterministic scheduler driven by a virtual clock.
///
/// Time starts at zero and only advances through [`advance`](Self::advance)
/// or [`run_until_idle`](Self::run_until_idle). Tasks due at the same instant
/// run in the order they were scheduled, and a task scheduled by a running
/// task runs in the same `advance` call if it falls due in time.
///
/// # Examples
///
/// ```rust
/// use lambdash::function::{ManualScheduler, Scheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
///
/// let flag = Rc::clone(&fired);
/// scheduler.schedule(Duration::from_millis(50), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(49));
/// assert!(!fired.get());
///
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// assert_eq!(scheduler.now(), Duration::from_millis(50));
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    timeline: RefCell<Timeline>,
}

impl ManualScheduler {
    /// Creates a scheduler whose clock reads zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    pub fn now(&self) -> Duration {
        self.timeline.borrow().now
    }

    /// Returns the number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.timeline.borrow().queue.len()
    }

    /// Moves the clock forward by `span`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, span: Duration) -> usize {
        let deadline = self.now().saturating_add(span);
        let executed = self.run_due(deadline);
        self.timeline.borrow_mut().now = deadline;
        executed
    }

    /// Runs tasks in due order until none is left, moving the clock to the
    /// due time of each.
    ///
    /// Returns the number of tasks run. A task that keeps rescheduling itself
    /// makes this loop forever.
    pub fn run_until_idle(&self) -> usize {
        self.run_due(Duration::MAX)
    }

    fn run_due(&self, deadline: Duration) -> usize {
        let mut executed = 0;
        loop {
            // The borrow must end before the task runs: tasks may schedule.
            let next = self.timeline.borrow_mut().pop_due(deadline);
            let Some(task) = next else {
                return executed;
            };
            task();
            executed += 1;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut timeline = self.timeline.borrow_mut();
        let entry = Entry {
            due: timeline.now.saturating_add(delay),
            sequence: timeline.next_sequence,
            task,
        };
        timeline.next_sequence += 1;
        timeline.queue.push(entry);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline.borrow();
        formatter
            .debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.queue.len())
            .finish()
    }
}

/// A scheduler backed by tokio timers on the current `LocalSet`.
///
/// Each task is spawned with `tokio::task::spawn_local`, so
/// [`schedule`](Scheduler::schedule) must be called from within a
/// `tokio::task::LocalSet`; it panics otherwise.
///
/// # Examples
///
/// ```rust
/// use lambdash::function::{delay, TokioScheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
/// let local = tokio::task::LocalSet::new();
/// local.block_on(&runtime, async {
///     let fired = Rc::new(Cell::new(false));
///     let flag = Rc::clone(&fired);
///     delay(&TokioScheduler, Duration::from_millis(5), move |()| flag.set(true), ());
///
///     tokio::time::sleep(Duration::from_millis(20)).await;
///     assert!(fired.get());
/// });
/// ```
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[cfg(feature = "async")]
impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| -> Task {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[rstest]
    fn test_tasks_run_in_due_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(30), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("early"));
        scheduler.schedule(Duration::from_millis(10), task("early-second"));

        assert_eq!(scheduler.advance(Duration::from_millis(30)), 3);
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
    }

    #[rstest]
    fn test_task_is_not_run_before_its_delay() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(100), task("tick"));

        assert_eq!(scheduler.advance(Duration::from_millis(99)), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.pending(), 1);
    }

    #[rstest]
    fn test_tasks_scheduled_by_tasks_run_within_the_same_advance() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (log, task) = recorder();
        let inner = Rc::clone(&scheduler);
        let follow_up = task("follow-up");
        let first = task("first");
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                first();
                inner.schedule(Duration::from_millis(10), follow_up);
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(*log.borrow(), vec!["first", "follow-up"]);
        assert_eq!(scheduler.now(), Duration::from_millis(25));
    }

    #[rstest]
    fn test_clock_reads_due_time_while_task_runs() {
        let scheduler = Rc::new(ManualScheduler::new());
        let observed = Rc::new(RefCell::new(None));
        let (clock, sink) = (Rc::clone(&scheduler), Rc::clone(&observed));
        scheduler.schedule(
            Duration::from_millis(40),
            Box::new(move || *sink.borrow_mut() = Some(clock.now())),
        );

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(*observed.borrow(), Some(Duration::from_millis(40)));
    }

    #[rstest]
    fn test_run_until_idle_drains_queue() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_secs(5), task("five"));
        scheduler.schedule(Duration::from_secs(1), task("one"));

        assert_eq!(scheduler.run_until_idle(), 2);
        assert_eq!(scheduler.now(), Duration::from_secs(5));
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(*log.borrow(), vec!["one", "five"]);
    }

    #[rstest]
    fn test_advance_saturates_at_the_end_of_time() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.advance(Duration::from_millis(1));
        scheduler.schedule(Duration::from_secs(60), task("minute"));

        assert_eq!(scheduler.advance(Duration::MAX), 1);
        assert_eq!(scheduler.now(), Duration::MAX);
        assert_eq!(*log.borrow(), vec!["minute"]);
    }
}
