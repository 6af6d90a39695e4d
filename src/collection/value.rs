//! Dynamically shaped values.
//!
//! Most callers work with typed collections and never see this module.
//! [`Value`] exists for data whose shape is only known at runtime, such as
//! decoded configuration or JSON documents. It is also the one place where a
//! "collection" argument can turn out not to be a collection at all, which is
//! reported as [`CollectionError::InvalidArgument`].
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{each_value, Value};
//!
//! let document = Value::from(vec![Value::from(1), Value::from("two")]);
//! let mut kinds = Vec::new();
//! each_value(&document, |value, _, _| kinds.push(value.kind())).unwrap();
//! assert_eq!(kinds, vec!["number", "string"]);
//!
//! assert!(each_value(&Value::from(3), |_, _, _| {}).is_err());
//! ```

use std::cmp::Ordering;

use super::error::CollectionError;
use super::kernel::{Collection, Key, Mapping, each};
use super::sorting::SortKey;
use super::truthy::Truthy;

/// A value whose shape is decided at runtime.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Integers are stored as `f64`.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<Value>),
    /// A string-keyed mapping of values.
    Mapping(Mapping<Value>),
}

impl Value {
    /// Returns a short lowercase name of the variant.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Looks up a property of a mapping value.
    ///
    /// Returns `None` for a missing key or when `self` is not a mapping.
    pub fn get(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Mapping(entries) => entries.get(name),
            _ => None,
        }
    }

    /// Returns the elements if `self` is a sequence.
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(elements) => Some(elements.as_slice()),
            _ => None,
        }
    }

    /// Returns the number if `self` is a number.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string slice if `self` is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Views the value as a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] when the value is neither
    /// a sequence nor a mapping.
    pub fn as_collection(&self) -> Result<Collection<'_, Self>, CollectionError> {
        Collection::try_from(self)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::String(_) => 3,
            Self::Sequence(_) => 4,
            Self::Mapping(_) => 5,
        }
    }
}

impl<'a> TryFrom<&'a Value> for Collection<'a, Value> {
    type Error = CollectionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Sequence(elements) => Ok(Collection::Sequence(elements.as_slice())),
            Value::Mapping(entries) => Ok(Collection::Mapping(entries)),
            other => Err(CollectionError::invalid_argument(format!(
                "expected a sequence or a mapping, found {}",
                other.kind()
            ))),
        }
    }
}

/// Runs the traversal kernel over a dynamic value.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] without calling `iterator`
/// when `value` is neither a sequence nor a mapping.
pub fn each_value<'a, F>(value: &'a Value, iterator: F) -> Result<(), CollectionError>
where
    F: FnMut(&'a Value, Key<'a>, Collection<'a, Value>),
{
    let collection = Collection::try_from(value)?;
    each(collection, iterator);
    Ok(())
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping<Self>> for Value {
    fn from(value: Mapping<Self>) -> Self {
        Self::Mapping(value)
    }
}

impl<V: Into<Self>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(number) => number.is_truthy(),
            Self::String(text) => !text.is_empty(),
            Self::Sequence(_) | Self::Mapping(_) => true,
        }
    }
}

/// Values of different variants order by variant:
/// `Null < Bool < Number < String < Sequence < Mapping`.
/// Within a variant, numbers use `f64::total_cmp`, strings byte order, and
/// sequences and mappings compare element-wise.
impl SortKey for Value {
    fn compare_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::String(left), Self::String(right)) => left.cmp(right),
            (Self::Sequence(left), Self::Sequence(right)) => compare_sequences(left, right),
            (Self::Mapping(left), Self::Mapping(right)) => {
                let mut left_entries = left.iter();
                let mut right_entries = right.iter();
                loop {
                    match (left_entries.next(), right_entries.next()) {
                        (None, None) => return Ordering::Equal,
                        (None, Some(_)) => return Ordering::Less,
                        (Some(_), None) => return Ordering::Greater,
                        (Some((left_key, left_value)), Some((right_key, right_value))) => {
                            let ordering = left_key
                                .cmp(right_key)
                                .then_with(|| left_value.compare_key(right_value));
                            if ordering != Ordering::Equal {
                                return ordering;
                            }
                        }
                    }
                }
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_sequences(left: &[Value], right: &[Value]) -> Ordering {
    for (left_value, right_value) in left.iter().zip(right) {
        let ordering = left_value.compare_key(right_value);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}
