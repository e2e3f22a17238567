//! Request descriptors for the Nine Yards REST API.
//!
//! Builders only describe requests; dispatch belongs to a `Transport`.

use crate::auth::Headers;
use crate::codec::{encode, EncodeError};
use crate::model::project::ProjectBuilder;
use crate::model::task::{EditSubTask, EditTaskGroup};
use crate::model::user::{Login, Register};
use serde_json::Value;

/// Versioned API prefix.
pub const API_V1: &str = "/api/v1";
/// Legacy signup route used by the web client.
pub const SIGNUP_PATH: &str = "/api/auth/signup";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One HTTP request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Headers,
    /// Wire-format JSON body.
    pub body: Option<Value>,
    /// Whether the client should attach the bearer token.
    pub authenticated: bool,
}

impl ApiRequest {
    fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            headers: Headers::new(),
            body: None,
            authenticated: true,
        }
    }

    fn with_body(mut self, body: Value) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(body);
        self
    }

    fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn signup(form: &Register) -> Result<Self, EncodeError> {
        Ok(Self::new(Method::Post, SIGNUP_PATH.to_string())
            .with_body(encode(form)?)
            .anonymous())
    }

    pub fn login(form: &Login) -> Result<Self, EncodeError> {
        Ok(Self::new(Method::Post, format!("{API_V1}/users/login"))
            .with_body(encode(form)?)
            .anonymous())
    }

    pub fn current_user() -> Self {
        Self::new(Method::Get, format!("{API_V1}/users"))
    }

    pub fn create_project(builder: &ProjectBuilder) -> Result<Self, EncodeError> {
        Ok(Self::new(Method::Post, format!("{API_V1}/projects")).with_body(encode(builder)?))
    }

    pub fn project_task_groups(project_id: &str) -> Self {
        Self::new(Method::Get, format!("{API_V1}/projects/{project_id}/task-groups"))
    }

    pub fn task_group(id: &str) -> Self {
        Self::new(Method::Get, format!("{API_V1}/task-groups/{id}"))
    }

    pub fn edit_task_group(id: &str, edit: &EditTaskGroup) -> Result<Self, EncodeError> {
        Ok(Self::new(Method::Put, format!("{API_V1}/task-groups/{id}")).with_body(encode(edit)?))
    }

    pub fn task(id: &str) -> Self {
        Self::new(Method::Get, format!("{API_V1}/tasks/{id}"))
    }

    pub fn sub_task(id: &str) -> Self {
        Self::new(Method::Get, format!("{API_V1}/sub-tasks/{id}"))
    }

    pub fn edit_sub_task(id: &str, edit: &EditSubTask) -> Result<Self, EncodeError> {
        Ok(Self::new(Method::Put, format!("{API_V1}/sub-tasks/{id}")).with_body(encode(edit)?))
    }

    pub fn remove_sub_task(id: &str) -> Self {
        Self::new(Method::Delete, format!("{API_V1}/sub-tasks/{id}"))
    }

    pub fn notifications() -> Self {
        Self::new(Method::Get, format!("{API_V1}/notifications"))
    }
}
