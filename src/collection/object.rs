//! Merging mappings.
//!
//! # Examples
//!
//! ```rust
//! use lambdash::collection::{defaults, extend, Mapping};
//!
//! let mut settings = Mapping::new();
//! settings.insert("color".to_string(), "red");
//!
//! let mut overrides = Mapping::new();
//! overrides.insert("color".to_string(), "blue");
//! overrides.insert("size".to_string(), "large");
//!
//! let extended = extend(settings.clone(), &[&overrides]);
//! assert_eq!(extended["color"], "blue");
//! assert_eq!(extended["size"], "large");
//!
//! let defaulted = defaults(settings, &[&overrides]);
//! assert_eq!(defaulted["color"], "red");
//! assert_eq!(defaulted["size"], "large");
//! ```

use super::kernel::{Key, Mapping, each};

/// Copies every entry of `sources`, left to right, into `target`.
///
/// Later sources overwrite keys set by earlier ones and by `target`.
pub fn extend<V: Clone>(target: Mapping<V>, sources: &[&Mapping<V>]) -> Mapping<V> {
    merge(target, sources, true)
}

/// Copies entries of `sources` into `target` only for keys `target` lacks.
///
/// The first source that provides a key wins.
pub fn defaults<V: Clone>(target: Mapping<V>, sources: &[&Mapping<V>]) -> Mapping<V> {
    merge(target, sources, false)
}

fn merge<V: Clone>(mut target: Mapping<V>, sources: &[&Mapping<V>], overwrite: bool) -> Mapping<V> {
    each(sources, |source, _, _| {
        each(*source, |value, key, _| {
            if let Key::Name(name) = key
                && (overwrite || !target.contains_key(name))
            {
                target.insert(name.to_owned(), value.clone());
            }
        });
    });
    target
}
