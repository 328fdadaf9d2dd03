/// User domain type
use super::ids::document_id;
use super::ResourceId;
use serde::{Deserialize, Serialize};

/// Name shown when the server did not send one
const FALLBACK_DISPLAY_NAME: &str = "User";

/// Authenticated account, as reported by the server
///
/// The client only ever holds a read copy; accounts are created server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDocument")]
pub struct User {
    /// Unique user identifier
    pub id: ResourceId,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Login email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// User as it arrives on the wire
#[derive(Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", default)]
    document_id: Option<ResourceId>,
    #[serde(default)]
    id: Option<ResourceId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl TryFrom<UserDocument> for User {
    type Error = &'static str;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(doc.document_id, doc.id)?,
            name: doc.name,
            email: doc.email,
        })
    }
}

impl User {
    /// Create a user with a display name
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            email: None,
        }
    }

    /// Attach an email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }
}
