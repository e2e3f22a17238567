//! Project creation payload.

use crate::codec::{Entity, EntitySchema, FieldKind, FieldSpec};
use crate::model::validation::{validate_https_url, validate_name, ValidationError};
use serde::{Deserialize, Serialize};

/// Permission bit allowing task management.
pub const PERMISSION_MANAGE_TASKS: u64 = 1 << 0;
/// Permission bit allowing project settings management.
pub const PERMISSION_MANAGE_PROJECT: u64 = 1 << 1;
/// Permission bit allowing team management.
pub const PERMISSION_MANAGE_TEAM: u64 = 1 << 2;

/// Payload for `POST /api/v1/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBuilder {
    pub icon_url: String,
    /// 3 to 30 characters.
    pub name: String,
    /// Permission bits granted to non-members; `0` keeps the project private.
    pub public_permissions: u64,
}

pub const PROJECT_BUILDER_SCHEMA: EntitySchema = EntitySchema {
    name: "ProjectBuilder",
    fields: &[
        FieldSpec::required("icon_url", "iconUrl", FieldKind::Text),
        FieldSpec::required("name", "name", FieldKind::Text),
        FieldSpec::required("public_permissions", "publicPermissions", FieldKind::Unsigned),
    ],
};

impl Entity for ProjectBuilder {
    const SCHEMA: &'static EntitySchema = &PROJECT_BUILDER_SCHEMA;
}

impl ProjectBuilder {
    pub fn new(name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        Self {
            icon_url: icon_url.into(),
            name: name.into(),
            public_permissions: 0,
        }
    }

    /// Applies the backend's creation rules before the request is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)?;
        validate_https_url(&self.icon_url)
    }

    pub fn is_public(&self) -> bool {
        self.public_permissions != 0
    }
}
