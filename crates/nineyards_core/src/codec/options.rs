//! Decode configuration.

/// Handling of wire keys that an entity table does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Skip unknown keys.
    #[default]
    Ignore,
    /// Fail with `DecodeError::UnknownField`; used to detect schema drift.
    Reject,
}

/// Options shared by every entity decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub unknown_fields: UnknownFieldPolicy,
}

impl CodecOptions {
    /// Options that reject any key missing from the entity table.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
        }
    }
}
