//! Table-driven translation between wire and in-memory JSON objects.
//!
//! # Responsibility
//! - Rename keys between snake_case wire names and camelCase in-memory names.
//! - Enforce presence rules and primitive shapes declared by `EntitySchema`.
//! - Normalize date fields to canonical UTC instant strings in both directions.
//!
//! # Invariants
//! - Decode never returns a partially populated object.
//! - Encode refuses records whose keys are not declared by the table.

use super::date::{format_instant, instant_from_millis, parse_instant};
use super::error::{DecodeError, EncodeError};
use super::options::{CodecOptions, UnknownFieldPolicy};
use super::schema::{EntitySchema, FieldKind, FieldSpec};
use serde_json::{Map, Value};

/// Turns one wire object into its checked in-memory object.
pub fn decode_object(
    schema: &'static EntitySchema,
    wire: &Value,
    options: &CodecOptions,
) -> Result<Value, DecodeError> {
    let object = wire.as_object().ok_or(DecodeError::NotAnObject {
        entity: schema.name,
    })?;

    if options.unknown_fields == UnknownFieldPolicy::Reject {
        if let Some(key) = object.keys().find(|key| schema.field_by_wire(key).is_none()) {
            return Err(DecodeError::UnknownField {
                entity: schema.name,
                key: key.clone(),
            });
        }
    }

    let mut in_memory = Map::with_capacity(schema.fields.len());
    for field in schema.fields {
        match object.get(field.wire) {
            None if field.is_required() => {
                return Err(DecodeError::MissingRequiredField {
                    entity: schema.name,
                    field: field.wire,
                });
            }
            None => {}
            Some(Value::Null) if !field.is_required() => {
                in_memory.insert(field.name.to_string(), Value::Null);
            }
            Some(raw) => {
                let value = decode_field(schema, field, raw, options)?;
                in_memory.insert(field.name.to_string(), value);
            }
        }
    }

    Ok(Value::Object(in_memory))
}

/// Turns a top-level wire array into checked in-memory objects.
pub fn decode_array(
    schema: &'static EntitySchema,
    wire: &Value,
    options: &CodecOptions,
) -> Result<Vec<Value>, DecodeError> {
    let items = wire.as_array().ok_or(DecodeError::InvalidFieldType {
        entity: schema.name,
        field: "<list>",
        expected: "array",
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_object(schema, item, options).map_err(|err| DecodeError::InElement {
                entity: schema.name,
                field: None,
                index,
                source: Box::new(err),
            })
        })
        .collect()
}

fn decode_field(
    schema: &'static EntitySchema,
    field: &'static FieldSpec,
    raw: &Value,
    options: &CodecOptions,
) -> Result<Value, DecodeError> {
    let mismatch = || DecodeError::InvalidFieldType {
        entity: schema.name,
        field: field.wire,
        expected: field.kind.expected(),
    };

    match field.kind {
        FieldKind::Text if raw.is_string() => Ok(raw.clone()),
        FieldKind::Unsigned if raw.as_u64().is_some() => Ok(raw.clone()),
        FieldKind::Boolean if raw.is_boolean() => Ok(raw.clone()),
        FieldKind::DateTime => {
            let instant = match raw {
                Value::String(text) => parse_instant(text),
                Value::Number(number) => number.as_i64().and_then(instant_from_millis),
                _ => return Err(mismatch()),
            };
            let instant = instant.ok_or_else(|| DecodeError::MalformedDate {
                entity: schema.name,
                field: field.wire,
                raw: match raw {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                },
            })?;
            Ok(Value::String(format_instant(&instant)))
        }
        FieldKind::Entity(nested) => decode_object(nested, raw, options),
        FieldKind::EntityList(nested) => {
            let items = raw.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    decode_object(nested, item, options).map_err(|err| DecodeError::InElement {
                        entity: schema.name,
                        field: Some(field.wire),
                        index,
                        source: Box::new(err),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        _ => Err(mismatch()),
    }
}

/// Turns one in-memory object back into its wire object.
pub fn encode_object(schema: &'static EntitySchema, in_memory: &Value) -> Result<Value, EncodeError> {
    let object = in_memory.as_object().ok_or(EncodeError::NotAnObject {
        entity: schema.name,
    })?;

    if let Some(key) = object.keys().find(|key| schema.field_by_name(key).is_none()) {
        return Err(EncodeError::UnmappedField {
            entity: schema.name,
            key: key.clone(),
        });
    }

    let mut wire = Map::with_capacity(schema.fields.len());
    for field in schema.fields {
        match object.get(field.name) {
            None if field.is_required() => {
                return Err(EncodeError::MissingField {
                    entity: schema.name,
                    field: field.name,
                });
            }
            None => {}
            Some(Value::Null) => {
                wire.insert(field.wire.to_string(), Value::Null);
            }
            Some(value) => {
                wire.insert(field.wire.to_string(), encode_field(schema, field, value)?);
            }
        }
    }

    Ok(Value::Object(wire))
}

fn encode_field(
    schema: &'static EntitySchema,
    field: &'static FieldSpec,
    value: &Value,
) -> Result<Value, EncodeError> {
    match field.kind {
        FieldKind::DateTime => {
            let malformed = || EncodeError::MalformedDate {
                entity: schema.name,
                field: field.name,
                raw: value.to_string(),
            };
            let instant = value
                .as_str()
                .and_then(parse_instant)
                .ok_or_else(malformed)?;
            Ok(Value::String(format_instant(&instant)))
        }
        FieldKind::Entity(nested) => encode_object(nested, value),
        FieldKind::EntityList(nested) => match value.as_array() {
            Some(items) => items
                .iter()
                .map(|item| encode_object(nested, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            None => Err(EncodeError::NotAnObject {
                entity: nested.name,
            }),
        },
        FieldKind::Text | FieldKind::Unsigned | FieldKind::Boolean => {
            Ok(value.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_array, decode_object, encode_object};
    use crate::codec::error::{DecodeError, EncodeError};
    use crate::codec::options::CodecOptions;
    use crate::codec::schema::{EntitySchema, FieldKind, FieldSpec};
    use serde_json::json;

    const LEAF: EntitySchema = EntitySchema {
        name: "Leaf",
        fields: &[
            FieldSpec::required("leaf_id", "leafId", FieldKind::Text),
            FieldSpec::optional("seen_at", "seenAt", FieldKind::DateTime),
        ],
    };

    const ROOT: EntitySchema = EntitySchema {
        name: "Root",
        fields: &[
            FieldSpec::required("position", "position", FieldKind::Unsigned),
            FieldSpec::required("leaves", "leaves", FieldKind::EntityList(&LEAF)),
            FieldSpec::optional("note", "note", FieldKind::Text),
        ],
    };

    #[test]
    fn renames_keys_and_recurses_into_lists() {
        let wire = json!({
            "position": 3,
            "leaves": [{ "leaf_id": "a", "seen_at": "2024-01-02T03:04:05Z" }]
        });

        let in_memory = decode_object(&ROOT, &wire, &CodecOptions::default()).unwrap();
        assert_eq!(
            in_memory,
            json!({
                "position": 3,
                "leaves": [{ "leafId": "a", "seenAt": "2024-01-02T03:04:05.000Z" }]
            })
        );

        let back = encode_object(&ROOT, &in_memory).unwrap();
        assert_eq!(
            back,
            json!({
                "position": 3,
                "leaves": [{ "leaf_id": "a", "seen_at": "2024-01-02T03:04:05.000Z" }]
            })
        );
    }

    #[test]
    fn keeps_explicit_null_and_drops_absent_optional_keys() {
        let wire = json!({ "position": 0, "leaves": [], "note": null });
        let in_memory = decode_object(&ROOT, &wire, &CodecOptions::default()).unwrap();
        assert_eq!(in_memory, json!({ "position": 0, "leaves": [], "note": null }));

        let wire = json!({ "position": 0, "leaves": [] });
        let in_memory = decode_object(&ROOT, &wire, &CodecOptions::default()).unwrap();
        assert!(in_memory.get("note").is_none());
    }

    #[test]
    fn reports_nested_failures_with_element_index() {
        let wire = json!({ "position": 1, "leaves": [{ "leaf_id": "a" }, {}] });
        let err = decode_object(&ROOT, &wire, &CodecOptions::default()).unwrap_err();

        match &err {
            DecodeError::InElement { field, index, .. } => {
                assert_eq!(*field, Some("leaves"));
                assert_eq!(*index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.innermost(),
            &DecodeError::MissingRequiredField {
                entity: "Leaf",
                field: "leaf_id",
            }
        );
    }

    #[test]
    fn rejects_negative_unsigned_and_non_array_lists() {
        let err = decode_object(
            &ROOT,
            &json!({ "position": -1, "leaves": [] }),
            &CodecOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFieldType { field: "position", .. }));

        let err = decode_object(
            &ROOT,
            &json!({ "position": 1, "leaves": {} }),
            &CodecOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidFieldType { field: "leaves", expected: "array", .. }));
    }

    #[test]
    fn strict_options_reject_undeclared_keys() {
        let wire = json!({ "position": 1, "leaves": [], "colour": "red" });
        assert!(decode_object(&ROOT, &wire, &CodecOptions::default()).is_ok());

        let err = decode_object(&ROOT, &wire, &CodecOptions::strict()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownField {
                entity: "Root",
                key: "colour".to_string(),
            }
        );
    }

    #[test]
    fn dates_accept_epoch_milliseconds_and_keep_precision() {
        let wire = json!([
            { "leaf_id": "a", "seen_at": 1_709_640_000_250_i64 },
            { "leaf_id": "b", "seen_at": "2024-03-05T12:00:00.000250123" }
        ]);
        let items = decode_array(&LEAF, &wire, &CodecOptions::default()).unwrap();
        assert_eq!(items[0]["seenAt"], "2024-03-05T12:00:00.250Z");
        assert_eq!(items[1]["seenAt"], "2024-03-05T12:00:00.000250123Z");

        let err = decode_array(&LEAF, &json!([{ "leaf_id": "c", "seen_at": 1.5 }]), &CodecOptions::default())
            .unwrap_err();
        assert_eq!(
            err.innermost(),
            &DecodeError::MalformedDate {
                entity: "Leaf",
                field: "seen_at",
                raw: "1.5".to_string(),
            }
        );
    }

    #[test]
    fn top_level_arrays_decode_element_wise() {
        let wire = json!([{ "leaf_id": "a" }, { "leaf_id": "b", "seen_at": null }]);
        let items = decode_array(&LEAF, &wire, &CodecOptions::default()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], json!({ "leafId": "b", "seenAt": null }));
    }

    #[test]
    fn encode_rejects_keys_without_mapping() {
        let err = encode_object(&LEAF, &json!({ "leafId": "a", "extra": 1 })).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnmappedField {
                entity: "Leaf",
                key: "extra".to_string(),
            }
        );
    }
}
