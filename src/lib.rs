//! # lambdash
//!
//! Functional collection primitives and function decorators for Rust.
//!
//! ## Overview
//!
//! Every collection algorithm in this library is built on two primitives:
//! a traversal kernel ([`each`](collection::each)) that walks sequences and
//! mappings alike, and a strict left fold ([`reduce`](collection::reduce))
//! built on it. It includes:
//!
//! - **Collections**: filter, reject, uniq, map, pluck, invoke, `sort_by`,
//!   zip, flatten, intersection, difference, shuffle, extend, defaults
//! - **Quantifiers**: contains, every, some
//! - **Dynamic values**: a [`Value`](collection::Value) type for data whose
//!   shape is only known at runtime
//! - **Function decorators**: once, memoize, delay, throttle
//! - **Scheduling**: an injectable scheduler with a deterministic virtual
//!   clock
//!
//! ## Feature Flags
//!
//! - `collection`: Collection algorithms (default)
//! - `function`: Function decorators (default)
//! - `async`: A tokio-backed scheduler
//! - `fxhash`: `rustc-hash` for hashed memoization caches
//! - `serde`: Serialization for [`Value`](collection::Value)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambdash::prelude::*;
//!
//! let words = vec!["pear", "fig", "apple", "fig"];
//!
//! let unique = uniq(&words);
//! let sorted = sort_by(&unique, |word| word.len());
//! assert_eq!(sorted, vec!["fig", "pear", "apple"]);
//!
//! let count = once(|candidates: Vec<&str>| candidates.len());
//! assert_eq!(count.call(sorted), 3);
//! assert_eq!(count.call(Vec::new()), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lambdash::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "collection")]
    pub use crate::collection::*;

    #[cfg(feature = "function")]
    pub use crate::function::*;
}

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "function")]
pub mod function;
