//! Functional operations over sequences and mappings.
//!
//! This module is layered:
//!
//! - [`each`]: the traversal kernel over the [`Collection`] sum type
//! - [`reduce`], [`reduce_first`]: the left fold built on the kernel, and the
//!   quantifiers built on the fold ([`contains`], [`every`], [`some`])
//! - Algorithms composed from the two: [`filter`], [`reject`], [`uniq`],
//!   [`map`], [`pluck`], [`invoke`], [`sort_by`], [`zip`], [`flatten`],
//!   [`intersection`], [`difference`], [`shuffle`]
//! - Mapping helpers: [`extend`], [`defaults`]
//! - [`Value`]: a dynamically shaped value for runtime-typed data
//!
//! Any borrowed slice, array, `Vec` or [`Mapping`] can be passed where a
//! collection is expected (see [`IntoCollection`]).
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{filter, map, reduce};
//!
//! let orders = vec![("tea", 3), ("cake", 0), ("scone", 2)];
//!
//! let in_stock = filter(&orders, |(_, count)| *count > 0);
//! let names = map(&in_stock, |(name, _)| *name);
//! let total = reduce(&in_stock, 0, |total, (_, count)| total + count);
//!
//! assert_eq!(names, vec!["tea", "scone"]);
//! assert_eq!(total, 5);
//! ```

mod algorithms;
mod error;
mod kernel;
mod nested;
mod object;
mod reduce;
mod sorting;
mod truthy;
mod value;

pub use algorithms::{
    MethodTarget, difference, filter, first, first_n, identity, intersection, invoke,
    invoke_method, last, last_n, map, map_with_key, pluck, reject, shuffle, shuffle_with, uniq,
    zip, zip2,
};
pub use error::CollectionError;
pub use kernel::{Collection, IntoCollection, Key, Mapping, each};
pub use nested::{Nested, flatten, flatten_values};
pub use object::{defaults, extend};
pub use reduce::{
    contains, every, every_by, index_of, reduce, reduce_first, some, some_by, try_reduce_first,
};
pub use sorting::{SortKey, sort_by, sort_by_property};
pub use truthy::Truthy;
pub use value::{Value, each_value};
