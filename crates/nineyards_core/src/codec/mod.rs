//! Model codec: wire JSON <-> typed entities.
//!
//! # Responsibility
//! - Provide `decode`/`encode` for every entity through one generic engine.
//! - Keep per-entity knowledge in declarative `EntitySchema` tables.
//!
//! # Invariants
//! - Required wire keys must be present or decode fails.
//! - `null` top-level input decodes to `None`, never to an error.
//! - Dates leave encode as `YYYY-MM-DDTHH:MM:SS.sssZ` instants.

pub mod date;
pub mod engine;
pub mod error;
pub mod options;
pub mod patch;
pub mod schema;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use error::{DecodeError, EncodeError};
pub use options::{CodecOptions, UnknownFieldPolicy};
pub use patch::Patch;
pub use schema::{EntitySchema, FieldKind, FieldSpec, Presence};

/// A typed record with a wire field table.
///
/// The serde representation of the type is its in-memory (camelCase) view;
/// `SCHEMA` maps that view to the wire.
pub trait Entity: Serialize + DeserializeOwned {
    const SCHEMA: &'static EntitySchema;
}

/// Decodes one wire value with default options.
///
/// Returns `Ok(None)` for JSON `null`.
pub fn decode<E: Entity>(wire: &Value) -> Result<Option<E>, DecodeError> {
    decode_with(wire, &CodecOptions::default())
}

/// Decodes one wire value with explicit options.
pub fn decode_with<E: Entity>(wire: &Value, options: &CodecOptions) -> Result<Option<E>, DecodeError> {
    if wire.is_null() {
        return Ok(None);
    }

    let in_memory = engine::decode_object(E::SCHEMA, wire, options)
        .map_err(|err| log_decode_failure(E::SCHEMA, err))?;
    materialize(E::SCHEMA, in_memory).map(Some)
}

/// Decodes a possibly missing value; a missing resource is not an error.
pub fn decode_optional<E: Entity>(wire: Option<&Value>) -> Result<Option<E>, DecodeError> {
    match wire {
        Some(value) => decode(value),
        None => Ok(None),
    }
}

/// Decodes a top-level JSON array of entities.
pub fn decode_list<E: Entity>(wire: &Value) -> Result<Vec<E>, DecodeError> {
    decode_list_with(wire, &CodecOptions::default())
}

/// Decodes a top-level JSON array of entities with explicit options.
pub fn decode_list_with<E: Entity>(wire: &Value, options: &CodecOptions) -> Result<Vec<E>, DecodeError> {
    let items = engine::decode_array(E::SCHEMA, wire, options)
        .map_err(|err| log_decode_failure(E::SCHEMA, err))?;
    items
        .into_iter()
        .map(|item| materialize(E::SCHEMA, item))
        .collect()
}

/// Encodes one entity into its wire object.
pub fn encode<E: Entity>(entity: &E) -> Result<Value, EncodeError> {
    let in_memory = serde_json::to_value(entity).map_err(|err| EncodeError::Serialize {
        entity: E::SCHEMA.name,
        message: err.to_string(),
    })?;
    engine::encode_object(E::SCHEMA, &in_memory)
}

/// Encodes a possibly missing entity; `None` becomes JSON `null`.
pub fn encode_optional<E: Entity>(entity: Option<&E>) -> Result<Value, EncodeError> {
    entity.map_or(Ok(Value::Null), encode::<E>)
}

/// Encodes a slice of entities into a wire array.
pub fn encode_list<E: Entity>(entities: &[E]) -> Result<Value, EncodeError> {
    entities
        .iter()
        .map(encode::<E>)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn materialize<E: DeserializeOwned>(schema: &'static EntitySchema, in_memory: Value) -> Result<E, DecodeError> {
    serde_json::from_value(in_memory).map_err(|err| {
        log_decode_failure(
            schema,
            DecodeError::Shape {
                entity: schema.name,
                message: err.to_string(),
            },
        )
    })
}

fn log_decode_failure(schema: &EntitySchema, err: DecodeError) -> DecodeError {
    debug!(
        "event=entity_decode module=codec status=error entity={} error_code={} error={}",
        schema.name,
        err.error_code(),
        err
    );
    err
}
