//! API client over an injected transport.
//!
//! # Responsibility
//! - Attach the bearer header from the injected `TokenStore`.
//! - Map transport, status, body and decode failures to `ApiError`.
//!
//! # Invariants
//! - Every failure reaches the caller as a typed error; nothing is only logged.

use super::request::ApiRequest;
use crate::auth::{auth_header, TokenStore};
use crate::codec::{decode, decode_list, DecodeError, EncodeError, Entity};
use crate::model::notification::FullNotification;
use crate::model::project::ProjectBuilder;
use crate::model::task::{EditSubTask, EditTaskGroup, FullTask, SubTask, TaskGroup};
use crate::model::user::{AuthenticatedUser, Login, Register, User};
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ApiResult<T> = Result<T, ApiError>;

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to reach the backend at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for TransportError {}

/// Sends requests; implemented by the embedding application (fetch, reqwest, ...).
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug)]
pub enum ApiError {
    Network(TransportError),
    Status { code: u16, message: String },
    MalformedBody(serde_json::Error),
    /// A 2xx response carried no resource where one was required.
    EmptyBody,
    Decode(DecodeError),
    Encode(EncodeError),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network failure: {err}"),
            Self::Status { code, message } => write!(f, "request failed with status {code}: {message}"),
            Self::MalformedBody(err) => write!(f, "response body is not JSON: {err}"),
            Self::EmptyBody => write!(f, "response body is empty"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::MalformedBody(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Status { .. } | Self::EmptyBody => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        Self::Network(value)
    }
}

impl From<DecodeError> for ApiError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<EncodeError> for ApiError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

/// Typed access to the REST API.
pub struct ApiClient<T: Transport, S: TokenStore> {
    transport: T,
    tokens: S,
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(transport: T, tokens: S) -> Self {
        Self { transport, tokens }
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Sends a request and returns the parsed JSON body (`Null` when empty).
    pub fn send(&self, mut request: ApiRequest) -> ApiResult<Value> {
        if request.authenticated {
            request.headers.extend(auth_header(&self.tokens));
        }

        let started_at = Instant::now();
        let response = self.transport.send(&request).map_err(|err| {
            warn!(
                "event=api_request module=api status=error method={} path={} duration_ms={} error_code=network_failure error={}",
                request.method.as_str(),
                request.path,
                started_at.elapsed().as_millis(),
                err
            );
            ApiError::Network(err)
        })?;

        info!(
            "event=api_request module=api status={} method={} path={} http_status={} duration_ms={}",
            if response.is_success() { "ok" } else { "error" },
            request.method.as_str(),
            request.path,
            response.status,
            started_at.elapsed().as_millis()
        );

        if !response.is_success() {
            return Err(ApiError::Status {
                code: response.status,
                message: error_message(&response.body),
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(ApiError::MalformedBody)
    }

    /// Sends a request and decodes a single required entity.
    pub fn fetch<E: Entity>(&self, request: ApiRequest) -> ApiResult<E> {
        let body = self.send(request)?;
        decode::<E>(&body)?.ok_or(ApiError::EmptyBody)
    }

    /// Sends a request and decodes an optional entity; `null` is `None`.
    pub fn fetch_optional<E: Entity>(&self, request: ApiRequest) -> ApiResult<Option<E>> {
        let body = self.send(request)?;
        Ok(decode::<E>(&body)?)
    }

    /// Sends a request and decodes a list of entities.
    pub fn fetch_list<E: Entity>(&self, request: ApiRequest) -> ApiResult<Vec<E>> {
        let body = self.send(request)?;
        Ok(decode_list::<E>(&body)?)
    }

    /// Registers an account. Storing the returned token is up to the caller.
    pub fn signup(&self, form: &Register) -> ApiResult<AuthenticatedUser> {
        self.fetch(ApiRequest::signup(form)?)
    }

    pub fn login(&self, form: &Login) -> ApiResult<AuthenticatedUser> {
        self.fetch(ApiRequest::login(form)?)
    }

    pub fn current_user(&self) -> ApiResult<User> {
        self.fetch(ApiRequest::current_user())
    }

    /// Creates a project and returns the response body untouched.
    pub fn create_project(&self, builder: &ProjectBuilder) -> ApiResult<Value> {
        self.send(ApiRequest::create_project(builder)?)
    }

    pub fn task_groups(&self, project_id: &str) -> ApiResult<Vec<TaskGroup>> {
        self.fetch_list(ApiRequest::project_task_groups(project_id))
    }

    pub fn task_group(&self, id: &str) -> ApiResult<Option<TaskGroup>> {
        self.fetch_optional(ApiRequest::task_group(id))
    }

    pub fn edit_task_group(&self, id: &str, edit: &EditTaskGroup) -> ApiResult<TaskGroup> {
        self.fetch(ApiRequest::edit_task_group(id, edit)?)
    }

    pub fn task(&self, id: &str) -> ApiResult<Option<FullTask>> {
        self.fetch_optional(ApiRequest::task(id))
    }

    pub fn sub_task(&self, id: &str) -> ApiResult<Option<SubTask>> {
        self.fetch_optional(ApiRequest::sub_task(id))
    }

    pub fn edit_sub_task(&self, id: &str, edit: &EditSubTask) -> ApiResult<SubTask> {
        self.fetch(ApiRequest::edit_sub_task(id, edit)?)
    }

    pub fn remove_sub_task(&self, id: &str) -> ApiResult<()> {
        self.send(ApiRequest::remove_sub_task(id)).map(|_| ())
    }

    pub fn notifications(&self) -> ApiResult<Vec<FullNotification>> {
        self.fetch_list(ApiRequest::notifications())
    }
}

/// Extracts `message` from the backend's `{message, data}` error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
