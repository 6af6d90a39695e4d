//! The traversal kernel.
//!
//! Every collection operation in this crate is built on one primitive,
//! [`each`], which visits the elements of a [`Collection`] exactly once.
//! A collection is a borrowed view over either an ordered sequence or a
//! string-keyed mapping, so the kernel can never mutate the data it walks.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{each, Key, Mapping};
//!
//! let letters = vec!["a", "b", "c"];
//! let mut visited = Vec::new();
//! each(&letters, |value, key, _| visited.push((key, *value)));
//! assert_eq!(
//!     visited,
//!     vec![(Key::Index(0), "a"), (Key::Index(1), "b"), (Key::Index(2), "c")]
//! );
//!
//! let mut ages = Mapping::new();
//! ages.insert("ada".to_string(), 36);
//! ages.insert("alan".to_string(), 41);
//!
//! let mut total = 0;
//! each(&ages, |age, _, _| total += age);
//! assert_eq!(total, 77);
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// A collection of values indexed by string keys.
///
/// Keys are enumerated in ascending byte order, which makes every traversal
/// of a mapping deterministic.
pub type Mapping<V> = BTreeMap<String, V>;

/// The position of an element inside a [`Collection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// A 0-based index into a sequence.
    Index(usize),
    /// A key of a mapping.
    Name(&'a str),
}

impl<'a> Key<'a> {
    /// Returns the index if this key addresses a sequence element.
    #[inline]
    pub const fn as_index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::Name(_) => None,
        }
    }

    /// Returns the name if this key addresses a mapping entry.
    #[inline]
    pub const fn as_name(self) -> Option<&'a str> {
        match self {
            Self::Index(_) => None,
            Self::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Name(name) => write!(formatter, "{name}"),
        }
    }
}

/// A read-only view over a sequence or a mapping.
///
/// `Collection` is the sum type that replaces runtime inspection of the
/// argument: operations are written once against it and work for both
/// shapes. The view is `Copy`, so it can be handed to every callback
/// invocation.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{Collection, Key};
///
/// let numbers = [10, 20, 30];
/// let collection = Collection::from(&numbers[..]);
///
/// assert_eq!(collection.len(), 3);
/// assert_eq!(collection.get(Key::Index(1)), Some(&20));
/// assert_eq!(collection.get(Key::Name("missing")), None);
/// ```
#[derive(Debug)]
pub enum Collection<'a, T> {
    /// An ordered, index-addressed sequence.
    Sequence(&'a [T]),
    /// A string-keyed mapping.
    Mapping(&'a Mapping<T>),
}

impl<T> Clone for Collection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<'_, T> {}

impl<'a, T> Collection<'a, T> {
    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(elements) => elements.len(),
            Self::Mapping(entries) => entries.len(),
        }
    }

    /// Returns `true` if the collection holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the element stored under `key`.
    ///
    /// An index never addresses a mapping entry and a name never addresses a
    /// sequence element.
    pub fn get(&self, key: Key<'_>) -> Option<&'a T> {
        match (*self, key) {
            (Self::Sequence(elements), Key::Index(index)) => elements.get(index),
            (Self::Mapping(entries), Key::Name(name)) => entries.get(name),
            _ => None,
        }
    }

    /// Returns `true` for the sequence variant.
    #[inline]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

impl<'a, T> From<&'a [T]> for Collection<'a, T> {
    fn from(elements: &'a [T]) -> Self {
        Self::Sequence(elements)
    }
}

impl<'a, T> From<&'a Mapping<T>> for Collection<'a, T> {
    fn from(entries: &'a Mapping<T>) -> Self {
        Self::Mapping(entries)
    }
}

/// Conversion into a [`Collection`] view.
///
/// The element type is an associated type so that the element type of a
/// callback is known as soon as the collection argument is.
pub trait IntoCollection<'a> {
    /// The element type of the collection.
    type Item: 'a;

    /// Borrows `self` as a collection view.
    fn into_collection(self) -> Collection<'a, Self::Item>;
}

impl<'a, T: 'a> IntoCollection<'a> for Collection<'a, T> {
    type Item = T;

    #[inline]
    fn into_collection(self) -> Collection<'a, T> {
        self
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a [T] {
    type Item = T;

    #[inline]
    fn into_collection(self) -> Collection<'a, T> {
        Collection::Sequence(self)
    }
}

impl<'a, T: 'a, const N: usize> IntoCollection<'a> for &'a [T; N] {
    type Item = T;

    #[inline]
    fn into_collection(self) -> Collection<'a, T> {
        Collection::Sequence(self.as_slice())
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a Vec<T> {
    type Item = T;

    #[inline]
    fn into_collection(self) -> Collection<'a, T> {
        Collection::Sequence(self.as_slice())
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a Mapping<T> {
    type Item = T;

    #[inline]
    fn into_collection(self) -> Collection<'a, T> {
        Collection::Mapping(self)
    }
}

/// Calls `iterator(value, key, collection)` once for every element.
///
/// Sequences are visited at indices `0..len` in ascending order. Mappings are
/// visited once per key in ascending key order. The callback's return value
/// is ignored; panics raised by the callback propagate unchanged.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::each;
///
/// let mut indices = Vec::new();
/// each(&[5, 6, 7], |_, key, collection| {
///     indices.push(key.as_index());
///     assert_eq!(collection.len(), 3);
/// });
/// assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
/// ```
pub fn each<'a, C, F>(collection: C, mut iterator: F)
where
    C: IntoCollection<'a>,
    F: FnMut(&'a C::Item, Key<'a>, Collection<'a, C::Item>),
{
    fold_keyed(collection, (), |(), element, key, view| {
        iterator(element, key, view);
    });
}

/// Threads an accumulator through the same visit order as [`each`].
pub(crate) fn fold_keyed<'a, C, A, F>(collection: C, initial: A, mut step: F) -> A
where
    C: IntoCollection<'a>,
    F: FnMut(A, &'a C::Item, Key<'a>, Collection<'a, C::Item>) -> A,
{
    let collection = collection.into_collection();
    match collection {
        Collection::Sequence(elements) => elements
            .iter()
            .enumerate()
            .fold(initial, |accumulator, (index, element)| {
                step(accumulator, element, Key::Index(index), collection)
            }),
        Collection::Mapping(entries) => entries.iter().fold(initial, |accumulator, (name, value)| {
            step(accumulator, value, Key::Name(name.as_str()), collection)
        }),
    }
}
