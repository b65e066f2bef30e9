//! Diagnostics emitted during transformation.
//!
//! The engine never fails; anything suspicious is reported as a [`Warning`]
//! alongside the generated IR. Reporting them is up to the caller.

use serde::{Deserialize, Serialize};

/// A non-fatal diagnostic about the generated schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Declaration the warning refers to (e.g. "User.ID", "UserService.GetUser").
    pub location: String,
    /// Classification of the warning.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of transformation warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// A `protobuf:"..."` tag could not be parsed; numbering fell back to position.
    MalformedWireTag { tag: String },
    /// Two fields in one message share a number.
    DuplicateFieldNumber { number: u32 },
    /// Two messages in one document share a name, typically a synthesized
    /// envelope colliding with a declared struct.
    DuplicateMessageName { name: String },
}

impl Warning {
    pub fn new(location: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}
