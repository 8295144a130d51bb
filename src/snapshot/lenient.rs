//! Field-level tolerant decoding.
//!
//! Used as `deserialize_with` on optional snapshot fields: a value of the wrong
//! shape decodes as absent instead of failing the whole snapshot.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            log::warn!(
                "dropping malformed {} in snapshot: {err}",
                std::any::type_name::<T>()
            );
            None
        }
    }))
}

/// Like [`deserialize`] for fields with a natural empty value: `null` and
/// malformed values both decode as `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(deserialize(deserializer)?.unwrap_or_default())
}
