use std::fmt;

/// Hook configuration error
///
/// Returned when a hook is constructed. Request-time failures are never
/// errors; they are ordinary `400` responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The schema's top-level `type` is not `"object"`
    UnsupportedSchemaType {
        /// Hook that rejected the schema (e.g. `ValidateQuery`)
        hook: &'static str,
    },
    /// The schema could not be compiled by the validation engine
    InvalidSchema {
        /// Hook that rejected the schema
        hook: &'static str,
        /// Engine message
        reason: String,
    },
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookError::UnsupportedSchemaType { hook } => {
                write!(f, "{hook} only accepts a schema of type \"object\".")
            }
            HookError::InvalidSchema { hook, reason } => {
                write!(f, "{hook} received an invalid JSON Schema: {reason}")
            }
        }
    }
}

impl std::error::Error for HookError {}
