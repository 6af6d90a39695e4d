//! Function decorators.
//!
//! Each decorator wraps a function and owns the state it needs, scoped to
//! that one wrapper:
//!
//! - [`once`]: run on the first call only, then replay the result
//! - [`memoize`], [`memoize_hashed`], [`memoize_recursive`]: cache results
//!   by argument value
//! - [`delay`]: run once after a minimum wait
//! - [`throttle`]: run at most once per window, keeping the latest call
//!
//! Timing is never taken from a global clock. [`delay`] and [`throttle`]
//! receive a [`Scheduler`]; [`ManualScheduler`] gives full control over time
//! in tests.
//!
//! Decorators are single-threaded: they use `Cell`, `RefCell` and `Rc` and
//! are not `Sync`.
//!
//! Functions taking several positional arguments are wrapped as functions
//! of one tuple.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::function::{memoize, once};
//!
//! let connect = once(|url: &str| format!("connected to {url}"));
//! assert_eq!(connect.call("db://primary"), "connected to db://primary");
//! assert_eq!(connect.call("db://replica"), "connected to db://primary");
//!
//! let area = memoize(|(width, height): (u32, u32)| width * height);
//! assert_eq!(area.call((3, 4)), 12);
//! assert!(area.is_cached(&(3, 4)));
//! ```

mod delay;
mod memoize;
mod once;
mod scheduler;
mod throttle;

pub use delay::delay;
pub use memoize::{
    HashedCache, LinearCache, MemoCache, Memoize, RecursiveMemoize, memoize, memoize_hashed,
    memoize_recursive,
};
pub use once::{Once, OnceState, once};
#[cfg(feature = "async")]
pub use scheduler::TokioScheduler;
pub use scheduler::{ManualScheduler, Scheduler, Task};
pub use throttle::{
    CallDecision, Throttle, ThrottleOptions, ThrottlePhase, ThrottleState, throttle,
    throttle_with_options,
};
