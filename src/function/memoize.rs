//! Argument-keyed result caching.
//!
//! A memoized function remembers the result computed for every argument
//! value it has seen. The argument value itself is the fingerprint: several
//! positional arguments are passed as one tuple, so argument lists of
//! different length have different types and can never be confused.
//!
//! Caches grow monotonically; nothing is ever evicted.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::function::memoize;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let square = memoize(|number: i64| {
//!     calls.set(calls.get() + 1);
//!     number * number
//! });
//!
//! assert_eq!(square.call(3), 9);
//! assert_eq!(square.call(3), 9);
//! assert_eq!(calls.get(), 1);
//!
//! assert_eq!(square.call(4), 16);
//! assert_eq!(calls.get(), 2);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

#[cfg(feature = "fxhash")]
type CacheMap<A, R> = rustc_hash::FxHashMap<A, R>;

#[cfg(not(feature = "fxhash"))]
type CacheMap<A, R> = std::collections::HashMap<A, R>;

/// Storage for memoized results.
pub trait MemoCache<A, R> {
    /// Returns the result stored for arguments equal to `arguments`.
    fn lookup(&self, arguments: &A) -> Option<&R>;

    /// Stores `result` for `arguments`.
    fn store(&mut self, arguments: A, result: R);

    /// Returns the number of stored entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been stored yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A cache that compares arguments with `PartialEq`, one entry at a time.
///
/// Lookup is linear in the number of entries. It works for any comparable
/// argument, including floating point numbers.
#[derive(Debug, Clone)]
pub struct LinearCache<A, R> {
    entries: Vec<(A, R)>,
}

impl<A, R> Default for LinearCache<A, R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A: PartialEq, R> MemoCache<A, R> for LinearCache<A, R> {
    fn lookup(&self, arguments: &A) -> Option<&R> {
        self.entries
            .iter()
            .find(|(stored, _)| stored == arguments)
            .map(|(_, result)| result)
    }

    fn store(&mut self, arguments: A, result: R) {
        if self.lookup(&arguments).is_none() {
            self.entries.push((arguments, result));
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A cache keyed by the hash of the arguments.
///
/// Uses `rustc-hash` when the `fxhash` feature is enabled.
#[derive(Debug, Clone)]
pub struct HashedCache<A, R> {
    entries: CacheMap<A, R>,
}

impl<A, R> Default for HashedCache<A, R> {
    fn default() -> Self {
        Self {
            entries: CacheMap::default(),
        }
    }
}

impl<A: Hash + Eq, R> MemoCache<A, R> for HashedCache<A, R> {
    fn lookup(&self, arguments: &A) -> Option<&R> {
        self.entries.get(arguments)
    }

    fn store(&mut self, arguments: A, result: R) {
        self.entries.entry(arguments).or_insert(result);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn lookup_or_compute<A, R, C>(cache: &RefCell<C>, arguments: A, compute: impl FnOnce(A) -> R) -> R
where
    A: Clone,
    R: Clone,
    C: MemoCache<A, R>,
{
    // The borrow must end before `compute` runs: it may call back in.
    let cached = cache.borrow().lookup(&arguments).cloned();
    if let Some(result) = cached {
        return result;
    }

    tracing::trace!(cached = cache.borrow().len(), "memoize: cache miss");
    let result = compute(arguments.clone());
    cache.borrow_mut().store(arguments, result.clone());
    result
}

/// A function wrapper that caches results by argument value.
///
/// # Type Parameters
///
/// * `A` - The argument type, a tuple for several arguments
/// * `R` - The result type
/// * `F` - The wrapped function
/// * `C` - The cache, [`LinearCache`] unless chosen otherwise
pub struct Memoize<A, R, F, C = LinearCache<A, R>> {
    function: F,
    cache: RefCell<C>,
    signature: PhantomData<fn(A) -> R>,
}

/// Memoizes `function` with a [`LinearCache`].
///
/// See the [module documentation](self).
pub fn memoize<A, R, F>(function: F) -> Memoize<A, R, F>
where
    A: Clone + PartialEq,
    R: Clone,
    F: Fn(A) -> R,
{
    Memoize::with_cache(function, LinearCache::default())
}

/// Memoizes `function` with a [`HashedCache`].
///
/// # Examples
///
/// ```rust
/// use lambdash::function::memoize_hashed;
///
/// let shout = memoize_hashed(|(word, times): (String, usize)| word.to_uppercase().repeat(times));
/// assert_eq!(shout.call(("ab".to_string(), 2)), "ABAB");
/// assert!(shout.is_cached(&("ab".to_string(), 2)));
/// assert!(!shout.is_cached(&("ab".to_string(), 3)));
/// ```
pub fn memoize_hashed<A, R, F>(function: F) -> Memoize<A, R, F, HashedCache<A, R>>
where
    A: Clone + Hash + Eq,
    R: Clone,
    F: Fn(A) -> R,
{
    Memoize::with_cache(function, HashedCache::default())
}

impl<A, R, F, C> Memoize<A, R, F, C>
where
    A: Clone,
    R: Clone,
    F: Fn(A) -> R,
    C: MemoCache<A, R>,
{
    /// Creates a memoized wrapper that stores results in `cache`.
    pub fn with_cache(function: F, cache: C) -> Self {
        Self {
            function,
            cache: RefCell::new(cache),
            signature: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, computing it on a miss.
    pub fn call(&self, arguments: A) -> R {
        lookup_or_compute(&self.cache, arguments, &self.function)
    }

    /// Returns whether a result is cached for `arguments`.
    pub fn is_cached(&self, arguments: &A) -> bool {
        self.cache.borrow().lookup(arguments).is_some()
    }

    /// Returns the number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<A, R, F, C: fmt::Debug> fmt::Debug for Memoize<A, R, F, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoize")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// A memoized function that can call itself through the cache.
///
/// The wrapped function receives a handle to the memoized function as its
/// first argument; recursive calls made through it hit the cache.
///
/// # Examples
///
/// ```rust
/// use lambdash::function::memoize_recursive;
///
/// let fibonacci = memoize_recursive(|fibonacci: &dyn Fn(u64) -> u64, n: u64| {
///     if n < 2 { n } else { fibonacci(n - 1) + fibonacci(n - 2) }
/// });
///
/// assert_eq!(fibonacci.call(80), 23_416_728_348_467_685);
/// assert_eq!(fibonacci.cache_len(), 81);
/// ```
pub struct RecursiveMemoize<A, R, F, C = LinearCache<A, R>> {
    function: F,
    cache: RefCell<C>,
    signature: PhantomData<fn(A) -> R>,
}

/// Memoizes a recursive `function`.
///
/// See [`RecursiveMemoize`].
pub fn memoize_recursive<A, R, F>(function: F) -> RecursiveMemoize<A, R, F>
where
    A: Clone + PartialEq,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, A) -> R,
{
    RecursiveMemoize {
        function,
        cache: RefCell::new(LinearCache::default()),
        signature: PhantomData,
    }
}

impl<A, R, F, C> RecursiveMemoize<A, R, F, C>
where
    A: Clone,
    R: Clone,
    F: Fn(&dyn Fn(A) -> R, A) -> R,
    C: MemoCache<A, R>,
{
    /// Returns the cached result for `arguments`, computing it on a miss.
    pub fn call(&self, arguments: A) -> R {
        lookup_or_compute(&self.cache, arguments, |arguments| {
            (self.function)(&|inner: A| self.call(inner), arguments)
        })
    }

    /// Returns the number of cached results.
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<A, R, F, C: fmt::Debug> fmt::Debug for RecursiveMemoize<A, R, F, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RecursiveMemoize")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
