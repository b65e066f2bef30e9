//! Configuration for the transformation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ANY_TYPE: &str = "google.protobuf.Any";
pub const ANY_IMPORT: &str = "google/protobuf/any.proto";
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";
pub const EMPTY_IMPORT: &str = "google/protobuf/empty.proto";
pub const TIMESTAMP_TYPE: &str = "google.protobuf.Timestamp";
pub const TIMESTAMP_IMPORT: &str = "google/protobuf/timestamp.proto";
pub const DURATION_TYPE: &str = "google.protobuf.Duration";
pub const DURATION_IMPORT: &str = "google/protobuf/duration.proto";

/// Target proto type for one source type, plus the import it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    pub proto: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
}

impl TypeMapping {
    pub fn scalar(proto: &str) -> Self {
        Self {
            proto: proto.to_string(),
            import: None,
        }
    }

    pub fn well_known(proto: &str, import: &str) -> Self {
        Self {
            proto: proto.to_string(),
            import: Some(import.to_string()),
        }
    }
}

/// Source type name → proto type table.
///
/// Keys are basic type names (`int64`) or qualified named types
/// (`time.Time`). The table is an immutable value threaded into the engine;
/// build a different one with [`TypeMappings::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMappings(BTreeMap<String, TypeMapping>);

impl TypeMappings {
    /// A table with no entries; every basic name passes through.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, source: &str) -> Option<&TypeMapping> {
        self.0.get(source)
    }

    /// Layer `overrides` on top of this table. Override entries win.
    pub fn with_overrides(&self, overrides: impl IntoIterator<Item = (String, TypeMapping)>) -> Self {
        let mut table = self.0.clone();
        table.extend(overrides);
        Self(table)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TypeMappings {
    fn default() -> Self {
        let scalars = [
            ("string", "string"),
            ("bool", "bool"),
            ("int", "int64"),
            ("int8", "int32"),
            ("int16", "int32"),
            ("int32", "int32"),
            ("int64", "int64"),
            ("uint", "uint64"),
            ("uint8", "uint32"),
            ("uint16", "uint32"),
            ("uint32", "uint32"),
            ("uint64", "uint64"),
            ("float32", "float"),
            ("float64", "double"),
            ("byte", "uint32"),
            ("rune", "int32"),
            ("error", "string"),
        ];
        let mut table: BTreeMap<String, TypeMapping> = scalars
            .iter()
            .map(|(go, proto)| (go.to_string(), TypeMapping::scalar(proto)))
            .collect();
        table.insert("any".into(), TypeMapping::well_known(ANY_TYPE, ANY_IMPORT));
        table.insert(
            "time.Time".into(),
            TypeMapping::well_known(TIMESTAMP_TYPE, TIMESTAMP_IMPORT),
        );
        table.insert(
            "time.Duration".into(),
            TypeMapping::well_known(DURATION_TYPE, DURATION_IMPORT),
        );
        Self(table)
    }
}

/// Options for a transformation run.
///
/// Fields are serialized in `kebab-case` (e.g. `include-private`) so the same
/// struct can be loaded from a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TransformOptions {
    /// Proto package. Empty: derived from each package's import path.
    pub package_name: String,
    /// `go_package` option. Empty: the package's import path.
    pub go_package: String,
    /// Emit unexported struct fields too.
    pub include_private: bool,
    /// Source → proto type table.
    pub type_mappings: TypeMappings,
}
