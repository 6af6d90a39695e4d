//! A function wrapper that runs its function at most once.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::function::once;
//!
//! let initialize = once(|port: u16| format!("listening on {port}"));
//!
//! assert_eq!(initialize.call(8080), "listening on 8080");
//! // Later calls return the first result, whatever their arguments.
//! assert_eq!(initialize.call(9090), "listening on 8080");
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::marker::PhantomData;

/// The internal state of a [`Once`] wrapper.
///
/// The only transitions are `Uncalled → Called` on the first call, and
/// `Uncalled → Poisoned` if the function panics or the wrapper is called
/// again while the function is still running.
#[derive(Debug)]
pub enum OnceState<F, R> {
    /// The function has not run yet.
    /// Contains the function.
    Uncalled(F),
    /// The function has run.
    /// Contains its result.
    Called(R),
    /// The function panicked, or is still running.
    Poisoned,
}

/// A wrapper that runs a function on its first call only.
///
/// The first [`call`](Self::call) runs the function with that call's
/// arguments and stores the result. Every later call returns the stored
/// result without running anything.
///
/// Several positional arguments are passed as a tuple.
///
/// # Type Parameters
///
/// * `A` - The argument type of the wrapped function
/// * `R` - The result type
/// * `F` - The wrapped function
///
/// # Thread Safety
///
/// This type is NOT thread-safe. It is meant for single-threaded use.
///
/// # Examples
///
/// ```rust
/// use lambdash::function::Once;
/// use std::cell::Cell;
///
/// let calls = Cell::new(0);
/// let wrapped = Once::new(|(left, right): (i32, i32)| {
///     calls.set(calls.get() + 1);
///     left + right
/// });
///
/// assert_eq!(wrapped.call((1, 2)), 3);
/// assert_eq!(wrapped.call((10, 20)), 3);
/// assert_eq!(calls.get(), 1);
/// ```
pub struct Once<A, R, F> {
    state: RefCell<OnceState<F, R>>,
    arguments: PhantomData<fn(A)>,
}

/// Wraps `function` so that it runs at most once.
///
/// See [`Once`].
pub fn once<A, R, F>(function: F) -> Once<A, R, F>
where
    F: FnOnce(A) -> R,
{
    Once::new(function)
}

impl<A, R, F: FnOnce(A) -> R> Once<A, R, F> {
    /// Creates a wrapper around `function`.
    ///
    /// The function will not run until the first call.
    #[inline]
    pub fn new(function: F) -> Self {
        Self {
            state: RefCell::new(OnceState::Uncalled(function)),
            arguments: PhantomData,
        }
    }

    /// Calls the wrapper and returns a reference to the stored result.
    ///
    /// # Panics
    ///
    /// - If the wrapped function panics; the wrapper is poisoned afterwards.
    /// - If the wrapper is already poisoned, including a re-entrant call
    ///   from inside the wrapped function.
    pub fn call_ref(&self, arguments: A) -> Ref<'_, R> {
        let needs_call = {
            let state = self.state.borrow();
            match &*state {
                OnceState::Called(_) => false,
                OnceState::Poisoned => panic!("Once instance has been poisoned"),
                OnceState::Uncalled(_) => true,
            }
        };

        if needs_call {
            self.run(arguments);
        }

        Ref::map(self.state.borrow(), |state| match state {
            OnceState::Called(result) => result,
            _ => unreachable!("Once should hold a result at this point"),
        })
    }

    /// Calls the wrapper and returns a clone of the stored result.
    ///
    /// # Panics
    ///
    /// Same as [`call_ref`](Self::call_ref).
    pub fn call(&self, arguments: A) -> R
    where
        R: Clone,
    {
        self.call_ref(arguments).clone()
    }

    /// Takes the function out, leaving `Poisoned` behind while it runs.
    fn run(&self, arguments: A) {
        let function = {
            let mut state = self.state.borrow_mut();
            match std::mem::replace(&mut *state, OnceState::Poisoned) {
                OnceState::Uncalled(function) => function,
                settled => {
                    *state = settled;
                    return;
                }
            }
        };

        tracing::trace!("once: running wrapped function");
        let result = function(arguments);

        *self.state.borrow_mut() = OnceState::Called(result);
    }
}

impl<A, R, F> Once<A, R, F> {
    /// Returns the stored result if the function has run.
    pub fn get(&self) -> Option<Ref<'_, R>> {
        let state = self.state.borrow();
        if matches!(&*state, OnceState::Called(_)) {
            Some(Ref::map(state, |state| match state {
                OnceState::Called(result) => result,
                _ => unreachable!(),
            }))
        } else {
            None
        }
    }

    /// Returns whether the function has run to completion.
    #[inline]
    pub fn is_called(&self) -> bool {
        matches!(&*self.state.borrow(), OnceState::Called(_))
    }

    /// Returns whether the wrapper has been poisoned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambdash::function::once;
    /// use std::panic::{AssertUnwindSafe, catch_unwind};
    ///
    /// let wrapped = once(|()| -> i32 { panic!("boom") });
    /// let _ = catch_unwind(AssertUnwindSafe(|| wrapped.call(())));
    ///
    /// assert!(wrapped.is_poisoned());
    /// ```
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), OnceState::Poisoned)
    }

    /// Consumes the wrapper and returns the stored result, if any.
    pub fn into_inner(self) -> Option<R> {
        match self.state.into_inner() {
            OnceState::Called(result) => Some(result),
            OnceState::Uncalled(_) | OnceState::Poisoned => None,
        }
    }
}

impl<A, R: fmt::Debug, F> fmt::Debug for Once<A, R, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        match &*state {
            OnceState::Called(result) => formatter.debug_tuple("Once").field(result).finish(),
            OnceState::Uncalled(_) => formatter.debug_tuple("Once").field(&"<uncalled>").finish(),
            OnceState::Poisoned => formatter.debug_tuple("Once").field(&"<poisoned>").finish(),
        }
    }
}

static_assertions::assert_not_impl_any!(Once<(), (), fn(())>: Sync);
