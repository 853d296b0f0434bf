//! Present/absent/null handling for partial update bodies
//!
//! A patch field is `None` when the key is missing, `Some(None)` when the
//! key is sent as `null`, and `Some(Some(v))` when it carries a value.
//! Use together with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

/// Deserialize a key that is present in the body (possibly `null`).
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Merge one patch field into a nullable column.
pub fn merge<T>(current: &mut Option<T>, incoming: Option<Option<T>>) {
    if let Some(value) = incoming {
        *current = value;
    }
}
