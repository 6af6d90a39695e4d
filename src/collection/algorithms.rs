//! Collection algorithms derived from the kernel and the reducer.
//!
//! Nothing in this module walks a collection by itself: every operation is
//! a composition of [`each`], [`reduce`] and the other algorithms here.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{difference, filter, intersection, reject, uniq, zip};
//!
//! let numbers = vec![1, 2, 3, 4];
//! assert_eq!(filter(&numbers, |number| number % 2 == 0), vec![2, 4]);
//! assert_eq!(reject(&numbers, |number| number % 2 == 0), vec![1, 3]);
//!
//! assert_eq!(uniq(&[1, 2, 2, 3, 1]), vec![1, 2, 3]);
//! assert_eq!(intersection(&[vec![1, 2, 3], vec![2, 3, 4], vec![2, 5]]), vec![2]);
//! assert_eq!(difference(&[1, 2, 3, 4], &[vec![2], vec![4, 5]]), vec![1, 3]);
//!
//! assert_eq!(
//!     zip(&[vec![1, 2, 3], vec![10]]),
//!     vec![vec![Some(1), Some(10)], vec![Some(2), None], vec![Some(3), None]]
//! );
//! ```

use rand::Rng;

use super::error::CollectionError;
use super::kernel::{Collection, IntoCollection, Key, Mapping, each};
use super::reduce::{contains, every_by, reduce, some_by};

/// Returns its argument unchanged.
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Returns the elements for which `predicate` holds, in traversal order.
pub fn filter<'a, C, P>(collection: C, mut predicate: P) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    reduce(collection, Vec::new(), |mut kept, element| {
        if predicate(element) {
            kept.push(element.clone());
        }
        kept
    })
}

/// Returns the elements for which `predicate` does not hold.
///
/// For any predicate, `filter` and `reject` partition the collection.
pub fn reject<'a, C, P>(collection: C, mut predicate: P) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    filter(collection, |element| !predicate(element))
}

/// Returns the first occurrence of each distinct element, in order.
pub fn uniq<'a, C>(collection: C) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone + PartialEq,
{
    reduce(collection, Vec::new(), |mut seen, element| {
        if !contains(&seen, element) {
            seen.push(element.clone());
        }
        seen
    })
}

/// Transforms every element, preserving order.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::map;
///
/// assert_eq!(map(&[1, 2, 3], |number| number * 10), vec![10, 20, 30]);
/// ```
pub fn map<'a, C, U, F>(collection: C, mut function: F) -> Vec<U>
where
    C: IntoCollection<'a>,
    F: FnMut(&'a C::Item) -> U,
{
    reduce(collection, Vec::new(), |mut mapped, element| {
        mapped.push(function(element));
        mapped
    })
}

/// Transforms every element with access to its key and the whole collection.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{map_with_key, Mapping};
///
/// let mut stock = Mapping::new();
/// stock.insert("apples".to_string(), 3);
/// stock.insert("pears".to_string(), 0);
///
/// let labels = map_with_key(&stock, |count, key, _| format!("{key}={count}"));
/// assert_eq!(labels, vec!["apples=3", "pears=0"]);
/// ```
pub fn map_with_key<'a, C, U, F>(collection: C, mut function: F) -> Vec<U>
where
    C: IntoCollection<'a>,
    F: FnMut(&'a C::Item, Key<'a>, Collection<'a, C::Item>) -> U,
{
    let mut mapped = Vec::new();
    each(collection, |element, key, whole| {
        mapped.push(function(element, key, whole));
    });
    mapped
}

/// Extracts the property `key` from every mapping.
///
/// Mappings without the property yield `None`, the absent marker.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{pluck, Mapping};
///
/// let mut moe = Mapping::new();
/// moe.insert("name".to_string(), "moe");
/// let mut curly = Mapping::new();
/// curly.insert("title".to_string(), "dr");
///
/// assert_eq!(pluck(&vec![moe, curly], "name"), vec![Some("moe"), None]);
/// ```
pub fn pluck<'a, C, V>(collection: C, key: &str) -> Vec<Option<V>>
where
    C: IntoCollection<'a, Item = Mapping<V>>,
    V: Clone + 'a,
{
    map(collection, |entries| entries.get(key).cloned())
}

/// Calls `function` with each element and the shared arguments.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::invoke;
///
/// let words = vec!["left", "right"];
/// let padded = invoke(&words, |word, width: &usize| format!("{word:>0$}", *width), &6);
/// assert_eq!(padded, vec!["  left", " right"]);
/// ```
pub fn invoke<'a, C, A, R, F>(collection: C, mut function: F, arguments: &A) -> Vec<R>
where
    C: IntoCollection<'a>,
    A: ?Sized,
    F: FnMut(&'a C::Item, &A) -> R,
{
    map(collection, |element| function(element, arguments))
}

/// Elements that expose methods by name, for [`invoke_method`].
pub trait MethodTarget<A: ?Sized> {
    /// The result of a method call.
    type Output;

    /// Calls the method called `name`, or returns `None` if there is none.
    fn call_method(&self, name: &str, arguments: &A) -> Option<Self::Output>;
}

/// Calls the method called `name` on each element with the shared arguments.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] for the first element that
/// does not understand `name`; no further element is called after that.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::{invoke_method, MethodTarget};
///
/// struct Counter(i64);
///
/// impl MethodTarget<i64> for Counter {
///     type Output = i64;
///
///     fn call_method(&self, name: &str, amount: &i64) -> Option<i64> {
///         match name {
///             "add" => Some(self.0 + amount),
///             "sub" => Some(self.0 - amount),
///             _ => None,
///         }
///     }
/// }
///
/// let counters = vec![Counter(1), Counter(5)];
/// assert_eq!(invoke_method(&counters, "add", &10), Ok(vec![11, 15]));
/// assert!(invoke_method(&counters, "mul", &10).is_err());
/// ```
pub fn invoke_method<'a, C, A>(
    collection: C,
    name: &str,
    arguments: &A,
) -> Result<Vec<<C::Item as MethodTarget<A>>::Output>, CollectionError>
where
    C: IntoCollection<'a>,
    C::Item: MethodTarget<A>,
    A: ?Sized,
{
    reduce(collection, Ok(Vec::new()), |results, element| {
        results.and_then(|mut outputs| {
            let output = element.call_method(name, arguments).ok_or_else(|| {
                CollectionError::invalid_argument(format!("unknown method `{name}`"))
            })?;
            outputs.push(output);
            Ok(outputs)
        })
    })
}

/// Groups the elements of several sequences by position.
///
/// The result has as many rows as the longest sequence; positions past the
/// end of a shorter sequence hold `None`.
pub fn zip<T, S>(sequences: &[S]) -> Vec<Vec<Option<T>>>
where
    T: Clone,
    S: AsRef<[T]>,
{
    let width = reduce(sequences, 0_usize, |width, sequence| {
        width.max(sequence.as_ref().len())
    });
    (0..width)
        .map(|position| map(sequences, |sequence| sequence.as_ref().get(position).cloned()))
        .collect()
}

/// Pairs the elements of two differently typed sequences by position.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::zip2;
///
/// assert_eq!(
///     zip2(&['a', 'b', 'c'], &[1, 2]),
///     vec![(Some('a'), Some(1)), (Some('b'), Some(2)), (Some('c'), None)]
/// );
/// ```
pub fn zip2<A, B>(left: &[A], right: &[B]) -> Vec<(Option<A>, Option<B>)>
where
    A: Clone,
    B: Clone,
{
    let mut rows = map(left, |element| (Some(element.clone()), None));
    each(right, |element, key, _| {
        if let Some(position) = key.as_index() {
            if position == rows.len() {
                rows.push((None, None));
            }
            rows[position].1 = Some(element.clone());
        }
    });
    rows
}

/// Returns the distinct elements present in every sequence.
///
/// Elements appear in the order of the first sequence. No sequences at all
/// yield an empty result.
pub fn intersection<T, S>(sequences: &[S]) -> Vec<T>
where
    T: Clone + PartialEq,
    S: AsRef<[T]>,
{
    let Some((first, rest)) = sequences.split_first() else {
        return Vec::new();
    };
    let shared = filter(first.as_ref(), |element| {
        every_by(rest, |other| contains(other.as_ref(), element))
    });
    uniq(&shared)
}

/// Returns the elements of `sequence` that are absent from all `others`.
///
/// Duplicates within `sequence` are kept.
pub fn difference<T, S>(sequence: &[T], others: &[S]) -> Vec<T>
where
    T: Clone + PartialEq,
    S: AsRef<[T]>,
{
    filter(sequence, |element| {
        !some_by(others, |other| contains(other.as_ref(), element))
    })
}

/// Returns a uniformly random permutation of the elements.
///
/// The input is left untouched.
pub fn shuffle<'a, C>(collection: C) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
{
    shuffle_with(collection, &mut rand::rng())
}

/// Like [`shuffle`], drawing randomness from `random`.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::shuffle_with;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let cards = vec![1, 2, 3, 4, 5];
/// let first = shuffle_with(&cards, &mut StdRng::seed_from_u64(7));
/// let second = shuffle_with(&cards, &mut StdRng::seed_from_u64(7));
/// assert_eq!(first, second);
/// assert_eq!(cards, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle_with<'a, C, R>(collection: C, random: &mut R) -> Vec<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    R: Rng + ?Sized,
{
    let mut shuffled = map(collection, Clone::clone);
    for index in (1..shuffled.len()).rev() {
        let other = random.random_range(0..=index);
        shuffled.swap(index, other);
    }
    shuffled
}

/// Returns the first element of a sequence.
#[inline]
pub fn first<T>(sequence: &[T]) -> Option<&T> {
    reduce(sequence, None, |found, element| found.or(Some(element)))
}

/// Returns the first `count` elements, or the whole sequence if shorter.
pub fn first_n<T: Clone>(sequence: &[T], count: usize) -> Vec<T> {
    filter_by_position(sequence, |index| index < count)
}

/// Returns the last element of a sequence.
#[inline]
pub fn last<T>(sequence: &[T]) -> Option<&T> {
    reduce(sequence, None, |_, element| Some(element))
}

/// Returns the last `count` elements, or the whole sequence if shorter.
pub fn last_n<T: Clone>(sequence: &[T], count: usize) -> Vec<T> {
    let skipped = sequence.len().saturating_sub(count);
    filter_by_position(sequence, |index| index >= skipped)
}

fn filter_by_position<T: Clone>(sequence: &[T], mut keep: impl FnMut(usize) -> bool) -> Vec<T> {
    let mut kept = Vec::new();
    each(sequence, |element, key, _| {
        if key.as_index().is_some_and(&mut keep) {
            kept.push(element.clone());
        }
    });
    kept
}
