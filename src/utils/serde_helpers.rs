use serde::{Deserialize, Deserializer};

/// Deserializes a value, treating `false` as None.
/// Odoo renders null or unset fields as JSON `false` instead of `null`.
pub fn odoo_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FalseOrValue<T> {
        Bool(bool),
        Value(T),
    }

    match Option::<FalseOrValue<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FalseOrValue::Bool(false)) => Ok(None),
        Some(FalseOrValue::Bool(true)) => Err(serde::de::Error::custom(
            "unexpected `true` where a value or `false` was expected",
        )),
        Some(FalseOrValue::Value(v)) => Ok(Some(v)),
    }
}
