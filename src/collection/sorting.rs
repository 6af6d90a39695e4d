//! Stable sorting by a derived key.
//!
//! Keys only need a total order, expressed by the [`SortKey`] trait rather
//! than [`Ord`] so that floating point keys can be used directly. Numbers
//! compare numerically (`total_cmp` for floats, so `NaN` sorts after every
//! other number), strings compare by byte-lexicographic order, and a missing
//! key (`None`) sorts after every present one.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{sort_by, sort_by_property, Mapping};
//!
//! let words = vec!["ccc", "a", "bb"];
//! assert_eq!(sort_by(&words, |word| word.len()), vec!["a", "bb", "ccc"]);
//!
//! let mut ada = Mapping::new();
//! ada.insert("age".to_string(), 36.0);
//! let mut alan = Mapping::new();
//! alan.insert("age".to_string(), 4.5);
//!
//! let people = vec![ada, alan];
//! let sorted = sort_by_property(&people, "age");
//! assert_eq!(sorted[0]["age"], 4.5);
//! ```

use std::cmp::Ordering;

use super::algorithms::map;
use super::kernel::{IntoCollection, Mapping};

/// A total order used to sort by a derived key.
pub trait SortKey {
    /// Compares two keys.
    fn compare_key(&self, other: &Self) -> Ordering;
}

macro_rules! impl_sort_key_for_ord {
    ($($ordered:ty),* $(,)?) => {
        $(
            impl SortKey for $ordered {
                #[inline]
                fn compare_key(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_sort_key_for_ord!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String
);

impl SortKey for f32 {
    #[inline]
    fn compare_key(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl SortKey for f64 {
    #[inline]
    fn compare_key(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl<K: SortKey> SortKey for Option<K> {
    fn compare_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Some(left), Some(right)) => left.compare_key(right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<K: SortKey + ?Sized> SortKey for &K {
    #[inline]
    fn compare_key(&self, other: &Self) -> Ordering {
        (**self).compare_key(*other)
    }
}

impl<A: SortKey, B: SortKey> SortKey for (A, B) {
    fn compare_key(&self, other: &Self) -> Ordering {
        self.0
            .compare_key(&other.0)
            .then_with(|| self.1.compare_key(&other.1))
    }
}

/// Returns the elements sorted by the key `key_function` derives from each.
///
/// The key is computed once per element. The sort is stable: elements with
/// equal keys keep their relative order.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::sort_by;
///
/// let scores = vec![("eve", 2.5), ("bob", -1.0), ("amy", 2.5)];
/// let sorted = sort_by(&scores, |(_, score)| *score);
/// assert_eq!(sorted, vec![("bob", -1.0), ("eve", 2.5), ("amy", 2.5)]);
/// ```
pub fn sort_by<'a, C, K, F>(collection: C, mut key_function: F) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    K: SortKey,
    F: FnMut(&'a C::Item) -> K,
{
    let mut decorated = map(collection, |element| (key_function(element), element));
    decorated.sort_by(|(left, _), (right, _)| left.compare_key(right));
    decorated
        .into_iter()
        .map(|(_, element)| element.clone())
        .collect()
}

/// Sorts mappings by the value stored under the property `name`.
///
/// Mappings that lack the property sort last, in their original order.
pub fn sort_by_property<'a, C, V>(collection: C, name: &str) -> Vec<Mapping<V>>
where
    C: IntoCollection<'a, Item = Mapping<V>>,
    V: SortKey + Clone + 'a,
{
    sort_by(collection, |entries| entries.get(name))
}
