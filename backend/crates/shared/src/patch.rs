//! Partial Update Fields
//!
//! [`Patch`] distinguishes a field that was left out of an update payload
//! from one explicitly set to `null` and from one carrying a value.
//!
//! Use it with `#[serde(default)]` so that a missing key becomes
//! [`Patch::Missing`]:
//!
//! ```
//! use kernel::patch::Patch;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Update {
//!     #[serde(default)]
//!     description: Patch<String>,
//! }
//!
//! let u: Update = serde_json::from_str("{}").unwrap();
//! assert_eq!(u.description, Patch::Missing);
//! let u: Update = serde_json::from_str(r#"{"description":null}"#).unwrap();
//! assert_eq!(u.description, Patch::Null);
//! ```

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field absent from the payload: leave the stored value alone
    #[default]
    Missing,
    /// Field explicitly `null`: clear the stored value
    Null,
    /// Field present with a value
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Apply to a nullable slot. `Missing` keeps `current` untouched.
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *current = None,
            Patch::Value(v) => *current = Some(v),
        }
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }

    /// The value about to be written, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the key is present; absence is handled by `#[serde(default)]`.
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
