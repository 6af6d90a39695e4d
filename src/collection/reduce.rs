//! The reduction engine: a strict left fold over the traversal kernel.
//!
//! [`reduce`] combines every element into an accumulator, one call per
//! element, in the order [`each`] visits them. The membership test and the
//! quantifiers in this module are all plain folds over it.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{contains, every, reduce, reduce_first, some};
//!
//! let numbers = vec![1, 2, 3];
//! assert_eq!(reduce(&numbers, 0, |total, number| total + number), 6);
//! assert_eq!(reduce_first(&numbers, |total, number| total * number), Some(6));
//!
//! assert!(contains(&numbers, &2));
//! assert!(every(&numbers));
//! assert!(some(&[0, 0, 4]));
//! ```

use super::error::CollectionError;
use super::kernel::{IntoCollection, each, fold_keyed};
use super::truthy::Truthy;

/// Folds the collection from left to right, starting from `initial`.
///
/// `combine` is called exactly once per element, including the first.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::reduce;
///
/// let words = vec!["fold", "from", "the", "left"];
/// let sentence = reduce(&words, String::new(), |mut sentence, word| {
///     if !sentence.is_empty() {
///         sentence.push(' ');
///     }
///     sentence.push_str(word);
///     sentence
/// });
/// assert_eq!(sentence, "fold from the left");
/// ```
pub fn reduce<'a, C, A, F>(collection: C, initial: A, mut combine: F) -> A
where
    C: IntoCollection<'a>,
    F: FnMut(A, &'a C::Item) -> A,
{
    fold_keyed(collection, initial, |accumulator, element, _, _| {
        combine(accumulator, element)
    })
}

/// Folds the collection using its first element as the seed.
///
/// Combining starts at the second element. An empty collection yields
/// `None` without calling `combine`.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::reduce_first;
///
/// assert_eq!(reduce_first(&[4_i32, 9, 2], |maximum, value| maximum.max(*value)), Some(9));
///
/// let empty: Vec<i32> = Vec::new();
/// assert_eq!(reduce_first(&empty, |total, value| total + value), None);
/// ```
pub fn reduce_first<'a, C, F>(collection: C, mut combine: F) -> Option<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    F: FnMut(C::Item, &'a C::Item) -> C::Item,
{
    reduce(collection, None, |accumulator, element| match accumulator {
        None => Some(element.clone()),
        Some(current) => Some(combine(current, element)),
    })
}

/// Like [`reduce_first`], but reports an empty collection as an error.
///
/// # Errors
///
/// Returns [`CollectionError::EmptyCollection`] when there is no element to
/// seed the accumulator with.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{try_reduce_first, CollectionError};
///
/// assert_eq!(try_reduce_first(&[1, 2], |total, value| total + value), Ok(3));
///
/// let empty: [i32; 0] = [];
/// assert_eq!(
///     try_reduce_first(&empty, |total, value| total + value),
///     Err(CollectionError::EmptyCollection)
/// );
/// ```
pub fn try_reduce_first<'a, C, F>(collection: C, combine: F) -> Result<C::Item, CollectionError>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    F: FnMut(C::Item, &'a C::Item) -> C::Item,
{
    reduce_first(collection, combine).ok_or(CollectionError::EmptyCollection)
}

/// Returns whether `target` is an element of the collection.
pub fn contains<'a, C>(collection: C, target: &C::Item) -> bool
where
    C: IntoCollection<'a>,
    C::Item: PartialEq,
{
    reduce(collection, false, |found, element| found || element == target)
}

/// Returns the index of the first element equal to `target`.
///
/// Mappings have no index, so they always yield `None`.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::index_of;
///
/// assert_eq!(index_of(&[10, 20, 10], &10), Some(0));
/// assert_eq!(index_of(&[10, 20, 10], &30), None);
/// ```
pub fn index_of<'a, C>(collection: C, target: &C::Item) -> Option<usize>
where
    C: IntoCollection<'a>,
    C::Item: PartialEq,
{
    let mut position = None;
    each(collection, |element, key, _| {
        if position.is_none() && element == target {
            position = key.as_index();
        }
    });
    position
}

/// Returns whether every element is truthy.
///
/// An empty collection is vacuously `true`.
pub fn every<'a, C>(collection: C) -> bool
where
    C: IntoCollection<'a>,
    C::Item: Truthy,
{
    every_by(collection, Truthy::is_truthy)
}

/// Returns whether `predicate` holds for every element.
///
/// Once an element fails, the outcome is decided: the predicate is not
/// called for the remaining elements.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::every_by;
///
/// assert!(every_by(&[2_i32, 4, 6], |number| number % 2 == 0));
/// assert!(!every_by(&[2_i32, 3, 6], |number| number % 2 == 0));
/// ```
pub fn every_by<'a, C, P>(collection: C, mut predicate: P) -> bool
where
    C: IntoCollection<'a>,
    P: FnMut(&C::Item) -> bool,
{
    reduce(collection, true, |decided, element| {
        decided && predicate(element)
    })
}

/// Returns whether at least one element is truthy.
///
/// An empty collection yields `false`.
pub fn some<'a, C>(collection: C) -> bool
where
    C: IntoCollection<'a>,
    C::Item: Truthy,
{
    some_by(collection, Truthy::is_truthy)
}

/// Returns whether `predicate` holds for at least one element.
///
/// Once an element passes, the predicate is not called again.
pub fn some_by<'a, C, P>(collection: C, mut predicate: P) -> bool
where
    C: IntoCollection<'a>,
    P: FnMut(&C::Item) -> bool,
{
    reduce(collection, false, |decided, element| {
        decided || predicate(element)
    })
}
