//! Client data layer for Nine Yards.
//! Wire codecs, token state and request helpers shared by every front end.

pub mod api;
pub mod auth;
pub mod codec;
pub mod dates;
pub mod logging;
pub mod model;
pub mod storage;

pub use api::{ApiClient, ApiError, ApiRequest, ApiResponse, ApiResult, Transport, TransportError};
pub use auth::{auth_header, PersistedTokenStore, Token, TokenStore};
pub use codec::{
    decode, decode_list, decode_optional, decode_with, encode, encode_list, encode_optional,
    CodecOptions, DecodeError, EncodeError, Entity, Patch, UnknownFieldPolicy,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::notification::{FullNotification, NotificationAction};
pub use model::project::ProjectBuilder;
pub use model::task::{EditSubTask, EditTaskGroup, FullTask, SubTask, Task, TaskGroup};
pub use model::user::{AuthenticatedUser, Login, Register, User};
pub use model::validation::ValidationError;
pub use storage::{MemoryPersistence, PersistencePort, SqlitePersistence, StorageError};

/// Version of the OpenAPI document the entity tables follow.
pub const SCHEMA_VERSION: &str = "0.0.1";

/// Returns the client crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
