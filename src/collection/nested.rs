//! Arbitrarily nested sequences and flattening.

use super::kernel::{IntoCollection, each};
use super::value::Value;

/// A value that is either a leaf or a sequence of further nested values.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{flatten, Nested};
///
/// // [1, [2, [3, 4], 5]]
/// let nested = vec![
///     Nested::leaf(1),
///     Nested::sequence([
///         Nested::leaf(2),
///         Nested::sequence([Nested::leaf(3), Nested::leaf(4)]),
///         Nested::leaf(5),
///     ]),
/// ];
/// assert_eq!(flatten(&nested), vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Nested<T> {
    /// A single value.
    Leaf(T),
    /// A sequence whose elements may themselves be nested.
    Sequence(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Creates a leaf.
    #[inline]
    pub const fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }

    /// Creates a nested sequence from any iterable of nested values.
    pub fn sequence(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Sequence(elements.into_iter().collect())
    }

    /// Returns the nesting depth; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Sequence(elements) => {
                1 + elements.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Inlines every nested sequence, at any depth, into one flat sequence.
///
/// Leaves keep their left-to-right order.
pub fn flatten<'a, C, T>(collection: C) -> Vec<T>
where
    C: IntoCollection<'a, Item = Nested<T>>,
    T: Clone + 'a,
{
    let mut flat = Vec::new();
    flatten_into(collection, &mut flat);
    flat
}

fn flatten_into<'a, C, T>(collection: C, flat: &mut Vec<T>)
where
    C: IntoCollection<'a, Item = Nested<T>>,
    T: Clone + 'a,
{
    each(collection, |element, _, _| match element {
        Nested::Leaf(value) => flat.push(value.clone()),
        Nested::Sequence(children) => flatten_into(children, flat),
    });
}

/// Flattens nested [`Value::Sequence`]s into one flat sequence of values.
///
/// Every non-sequence value, mappings included, is a leaf.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{flatten_values, Value};
///
/// let nested = vec![
///     Value::from(1),
///     Value::from(vec![Value::from(2), Value::from(vec![Value::from("three")])]),
/// ];
/// assert_eq!(
///     flatten_values(&nested),
///     vec![Value::from(1), Value::from(2), Value::from("three")]
/// );
/// ```
pub fn flatten_values<'a, C>(collection: C) -> Vec<Value>
where
    C: IntoCollection<'a, Item = Value>,
{
    let mut flat = Vec::new();
    flatten_values_into(collection, &mut flat);
    flat
}

fn flatten_values_into<'a, C>(collection: C, flat: &mut Vec<Value>)
where
    C: IntoCollection<'a, Item = Value>,
{
    each(collection, |element, _, _| match element {
        Value::Sequence(children) => flatten_values_into(children, flat),
        leaf => flat.push(leaf.clone()),
    });
}
