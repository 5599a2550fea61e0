use serde::{Deserialize, Deserializer};

/// start.gg serializes `ID` scalars as numbers in some places and strings in others
#[derive(Deserialize)]
#[serde(untagged)]
enum IdInner {
    Number(u64),
    String(String),
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match IdInner::deserialize(deserializer)? {
        IdInner::Number(n) => Ok(n),
        IdInner::String(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {:?}", s))),
    }
}

/// Deserialize `null` as an empty list
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
