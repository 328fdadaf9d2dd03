/// Project domain types
use super::ids::document_id;
use super::{ResourceId, User};
use serde::{Deserialize, Serialize};

/// Reference to a project member
///
/// List responses carry bare user ids; populated responses embed the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollaboratorRef {
    /// Member referenced by id only
    Id(ResourceId),
    /// Member embedded with its profile
    User(User),
}

impl CollaboratorRef {
    /// Id of the referenced member
    pub fn id(&self) -> &ResourceId {
        match self {
            CollaboratorRef::Id(id) => id,
            CollaboratorRef::User(user) => &user.id,
        }
    }
}

/// Shared workspace with collaborators
///
/// The authoritative copy lives on the server; this is the client's cached
/// projection of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectDocument")]
pub struct Project {
    /// Unique project identifier
    pub id: ResourceId,

    /// Project name
    pub name: String,

    /// Members of the project
    pub users: Vec<CollaboratorRef>,
}

/// Project as it arrives on the wire
#[derive(Deserialize)]
struct ProjectDocument {
    #[serde(rename = "_id", default)]
    document_id: Option<ResourceId>,
    #[serde(default)]
    id: Option<ResourceId>,
    name: String,
    #[serde(default)]
    users: Vec<CollaboratorRef>,
}

impl TryFrom<ProjectDocument> for Project {
    type Error = &'static str;

    fn try_from(doc: ProjectDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(doc.document_id, doc.id)?,
            name: doc.name,
            users: doc.users,
        })
    }
}

impl Project {
    /// Create a project with no collaborators
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            users: Vec::new(),
        }
    }

    /// Number of members, the owner included
    pub fn collaborator_count(&self) -> usize {
        self.users.len()
    }

    /// Check whether a user is a member
    pub fn has_member(&self, user_id: &ResourceId) -> bool {
        self.users.iter().any(|member| member.id() == user_id)
    }
}
