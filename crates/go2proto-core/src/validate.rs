//! Post-transformation checks.
//!
//! Only name and number uniqueness is checked; all other wire-format rules
//! are left to `protoc`.

use std::collections::BTreeSet;

use crate::ir::{Message, Proto};
use crate::warning::{Warning, WarningKind};

/// One warning per field whose number was already taken in the same message.
pub fn duplicate_field_numbers(message: &Message) -> Vec<Warning> {
    let mut seen = BTreeSet::new();
    message
        .fields
        .iter()
        .filter(|f| !seen.insert(f.number))
        .map(|f| {
            Warning::new(
                format!("{}.{}", message.name, f.name),
                WarningKind::DuplicateFieldNumber { number: f.number },
                format!("field number {} is used more than once", f.number),
            )
        })
        .collect()
}

/// One warning per repeated top-level message name.
pub fn duplicate_message_names(proto: &Proto) -> Vec<Warning> {
    let mut seen = BTreeSet::new();
    proto
        .messages
        .iter()
        .filter(|m| !seen.insert(m.name.as_str()))
        .map(|m| {
            Warning::new(
                m.name.clone(),
                WarningKind::DuplicateMessageName {
                    name: m.name.clone(),
                },
                format!("message `{}` is declared more than once", m.name),
            )
        })
        .collect()
}
