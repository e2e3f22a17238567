//! Typed entities exchanged with the Nine Yards REST API.
//!
//! # Responsibility
//! - Define the in-memory records application code works with.
//! - Attach one wire field table to each record.
//!
//! # Invariants
//! - Every record's serde view uses camelCase keys that match its table.
//! - Identifiers are opaque backend-generated strings.

pub mod notification;
pub mod project;
pub mod task;
pub mod user;
pub mod validation;

/// Backend ids are short base62 strings; aliases keep signatures readable.
pub type UserId = String;
pub type ProjectId = String;
pub type TaskGroupId = String;
pub type TaskId = String;
pub type SubTaskId = String;
pub type NotificationId = String;
pub type NotificationActionId = String;
