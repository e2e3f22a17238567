//! Declarative field tables for wire entities.
//!
//! # Responsibility
//! - Describe, per entity, how each wire key maps to its in-memory name.
//! - Carry the primitive or nested shape and the presence rule of each field.
//!
//! # Invariants
//! - Wire names and in-memory names are each unique within one table.
//! - The mapping between them is a fixed bijection per entity.

/// Shape of one field value.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// JSON string.
    Text,
    /// JSON integer `>= 0` (positions, weights, permission bits).
    Unsigned,
    /// JSON boolean.
    Boolean,
    /// ISO-8601 string or epoch milliseconds on the wire, canonical UTC
    /// instant string in memory.
    DateTime,
    /// Nested entity object decoded through its own table.
    Entity(&'static EntitySchema),
    /// Array of nested entity objects, decoded element-wise.
    EntityList(&'static EntitySchema),
}

impl FieldKind {
    /// Human-readable description used in type mismatch errors.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Unsigned => "non-negative integer",
            Self::Boolean => "boolean",
            Self::DateTime => "ISO-8601 date string or epoch milliseconds",
            Self::Entity(_) => "object",
            Self::EntityList(_) => "array",
        }
    }
}

/// Whether a wire key must be present for decode to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Absent keys stay absent; explicit `null` is kept as `null`.
    Optional,
}

/// One row of an entity field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// snake_case key used on the wire.
    pub wire: &'static str,
    /// camelCase key used by the in-memory representation.
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(wire: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            wire,
            name,
            kind,
            presence: Presence::Required,
        }
    }

    pub const fn optional(wire: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            wire,
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// Field table for one named entity.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Entity name reported in errors and logs, e.g. `TaskGroup`.
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    /// Looks up a field by its wire key.
    pub fn field_by_wire(&self, wire: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.wire == wire)
    }

    /// Looks up a field by its in-memory key.
    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Iterates over required fields in table order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|field| field.is_required())
    }
}
