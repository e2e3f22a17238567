//! Account entities and auth payloads.

use crate::codec::{Entity, EntitySchema, FieldKind, FieldSpec};
use crate::model::validation::{validate_email, validate_name, ValidationError};
use crate::model::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

pub const USER_SCHEMA: EntitySchema = EntitySchema {
    name: "User",
    fields: &[
        FieldSpec::required("id", "id", FieldKind::Text),
        FieldSpec::required("username", "username", FieldKind::Text),
        FieldSpec::required("email", "email", FieldKind::Text),
    ],
};

impl Entity for User {
    const SCHEMA: &'static EntitySchema = &USER_SCHEMA;
}

/// Signup form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub const REGISTER_SCHEMA: EntitySchema = EntitySchema {
    name: "Register",
    fields: &[
        FieldSpec::required("username", "username", FieldKind::Text),
        FieldSpec::required("email", "email", FieldKind::Text),
        FieldSpec::required("password", "password", FieldKind::Text),
    ],
};

impl Entity for Register {
    const SCHEMA: &'static EntitySchema = &REGISTER_SCHEMA;
}

impl Register {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("username", &self.username)?;
        validate_email(&self.email)
    }
}

// Keeps passwords out of debug output and logs.
impl std::fmt::Debug for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Register")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login form; the backend accepts either the username or the email.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub username_or_email: String,
    pub password: String,
}

pub const LOGIN_SCHEMA: EntitySchema = EntitySchema {
    name: "Login",
    fields: &[
        FieldSpec::required("username_or_email", "usernameOrEmail", FieldKind::Text),
        FieldSpec::required("password", "password", FieldKind::Text),
    ],
};

impl Entity for Login {
    const SCHEMA: &'static EntitySchema = &LOGIN_SCHEMA;
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("username_or_email", &self.username_or_email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup/login response: the account plus a bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

pub const AUTHENTICATED_USER_SCHEMA: EntitySchema = EntitySchema {
    name: "AuthenticatedUser",
    fields: &[
        FieldSpec::required("user", "user", FieldKind::Entity(&USER_SCHEMA)),
        FieldSpec::required("token", "token", FieldKind::Text),
    ],
};

impl Entity for AuthenticatedUser {
    const SCHEMA: &'static EntitySchema = &AUTHENTICATED_USER_SCHEMA;
}

impl std::fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}
