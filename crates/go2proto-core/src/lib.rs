//! Translate Go type declarations into proto3 schemas.
//!
//! The pipeline is:
//!
//! 1. A [`TypeGraph`] per package arrives from an external parser (usually as
//!    JSON, see [`load_graphs`]).
//! 2. [`transform`] turns every declaration into an IR fragment and folds the
//!    fragments into one [`Proto`] document, collecting [`Warning`]s.
//! 3. [`render()`] pretty-prints the document as `.proto` text.
//!
//! The transformation never fails. Shapes without a proto counterpart become
//! `google.protobuf.Any`; malformed annotations fall back to inference and
//! are reported as warnings.

pub mod compose;
pub mod config;
pub mod directive;
pub mod error;
pub mod graph;
pub mod ir;
pub mod naming;
pub mod render;
pub mod resolve;
pub mod transform;
pub mod validate;
pub mod warning;
pub mod wire_tag;

use std::path::Path;

use serde::Deserialize;

pub use compose::{Fragment, Monoid};
pub use config::{TransformOptions, TypeMapping, TypeMappings};
pub use error::Go2ProtoError;
pub use graph::{TypeGraph, TypeNode};
pub use ir::Proto;
pub use render::render;
pub use transform::{TransformResult, Transformer};
pub use warning::{Warning, WarningKind};

/// Transform packages into one composed document.
pub fn transform(graphs: &[TypeGraph], options: &TransformOptions) -> TransformResult {
    Transformer::new(options.clone()).transform(graphs)
}

/// Transform and render in one step.
pub fn generate(graphs: &[TypeGraph], options: &TransformOptions) -> (String, Vec<Warning>) {
    let result = transform(graphs, options);
    (render(&result.proto), result.warnings)
}

/// A serialized graph holds either one package or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum GraphDocument {
    Many(Vec<TypeGraph>),
    One(Box<TypeGraph>),
}

/// Parse type graphs from JSON text.
pub fn load_graphs(json: &str) -> Result<Vec<TypeGraph>, Go2ProtoError> {
    let graphs = match serde_json::from_str::<GraphDocument>(json)? {
        GraphDocument::Many(graphs) => graphs,
        GraphDocument::One(graph) => vec![*graph],
    };
    Ok(graphs)
}

/// Read and parse type graphs from a JSON file.
pub fn load_graphs_from_path(path: &Path) -> Result<Vec<TypeGraph>, Go2ProtoError> {
    let text = std::fs::read_to_string(path).map_err(|source| Go2ProtoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_graphs(&text)
}

/// Read a JSON object of extra type mappings, e.g.
/// `{"uuid.UUID": {"proto": "string"}}`.
pub fn load_type_mappings(path: &Path) -> Result<Vec<(String, TypeMapping)>, Go2ProtoError> {
    let text = std::fs::read_to_string(path).map_err(|source| Go2ProtoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table: std::collections::BTreeMap<String, TypeMapping> = serde_json::from_str(&text)?;
    Ok(table.into_iter().collect())
}
