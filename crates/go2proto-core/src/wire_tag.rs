//! Structured wire-tag annotations on struct fields.
//!
//! Format: `protobuf:"wiretype,fieldNumber,opt1,opt2,..."` somewhere in the raw
//! tag text. A well-formed tag fully determines the emitted field. Recognized
//! options are `name=<override>`, `rep` and `opt`; anything else is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static PROTOBUF_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"protobuf:"([^"]*)""#).expect("static regex compiles"));

/// A parsed wire tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTag {
    /// Proto scalar type selected by the wire type.
    pub ty: &'static str,
    pub number: u32,
    pub name: Option<String>,
    pub repeated: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireTagError {
    #[error("expected at least 3 comma-separated parts, found {0}")]
    TooFewParts(usize),
    #[error("field number `{0}` is not a positive integer")]
    BadNumber(String),
    #[error("unknown wire type `{0}`")]
    UnknownWireType(String),
}

/// Proto type for a coarse wire type.
fn scalar_for_wire_type(wire_type: &str) -> Option<&'static str> {
    match wire_type {
        "bytes" => Some("bytes"),
        "varint" => Some("int64"),
        "zigzag32" => Some("sint32"),
        "zigzag64" => Some("sint64"),
        "fixed32" => Some("fixed32"),
        "fixed64" => Some("fixed64"),
        _ => None,
    }
}

/// Extract the `protobuf` annotation from raw tag text.
///
/// Returns `Ok(None)` when the tag carries no `protobuf` key at all.
pub fn parse_wire_tag(raw: &str) -> Result<Option<WireTag>, WireTagError> {
    let raw = raw.trim().trim_matches('`');
    let Some(captures) = PROTOBUF_TAG.captures(raw) else {
        return Ok(None);
    };
    let parts: Vec<&str> = captures[1].split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return Err(WireTagError::TooFewParts(parts.len()));
    }

    let ty = scalar_for_wire_type(parts[0])
        .ok_or_else(|| WireTagError::UnknownWireType(parts[0].to_string()))?;
    let number = match parts[1].parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(WireTagError::BadNumber(parts[1].to_string())),
    };

    let mut tag = WireTag {
        ty,
        number,
        name: None,
        repeated: false,
        optional: false,
    };
    for option in &parts[2..] {
        match *option {
            "rep" => tag.repeated = true,
            "opt" => tag.optional = true,
            other => {
                if let Some(name) = other.strip_prefix("name=") {
                    tag.name = Some(name.to_string());
                }
            }
        }
    }
    Ok(Some(tag))
}
