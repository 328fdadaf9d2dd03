/// ID types for Teamspace entities
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier
///
/// The backend hands out document ids as strings and some deployments use
/// integer keys. Both forms deserialize into the same opaque value, kept in
/// its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new resource ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for ResourceId {
                fn from(id: $int) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

struct ResourceIdVisitor;

impl<'de> Visitor<'de> for ResourceIdVisitor {
    type Value = ResourceId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ResourceId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ResourceId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ResourceId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ResourceId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ResourceIdVisitor)
    }
}

/// Pick the id of a document that may carry `_id`, `id`, or both.
///
/// Document stores that also emit virtuals send both keys; `_id` wins.
pub(crate) fn document_id(
    document: Option<ResourceId>,
    id: Option<ResourceId>,
) -> Result<ResourceId, &'static str> {
    document.or(id).ok_or("missing field `id` or `_id`")
}
