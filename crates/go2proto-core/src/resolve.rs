//! Type Mapping Resolver: one [`TypeNode`] → one proto type reference.
//!
//! Resolution is pure and total. Shapes that have no proto counterpart
//! (interfaces, channels, funcs, anonymous structs) degrade to
//! `google.protobuf.Any` with its import instead of failing. Imports are
//! accumulated as-is; callers de-duplicate.

use std::collections::BTreeSet;

use crate::config::{TypeMappings, ANY_IMPORT, ANY_TYPE};
use crate::graph::TypeNode;

/// Proto scalar type names. Pointer fields resolving to one of these become
/// `optional`.
const SCALARS: &[&str] = &[
    "string", "bool", "bytes", "int32", "int64", "uint32", "uint64", "sint32", "sint64",
    "fixed32", "fixed64", "sfixed32", "sfixed64", "float", "double",
];

/// Read-only lookups in scope for one resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Names of types promoted to enums in the current package.
    pub enum_names: &'a BTreeSet<String>,
    /// Generic parameter names of the enclosing declaration.
    pub generic_params: &'a [String],
    pub mappings: &'a TypeMappings,
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub type_name: String,
    pub imports: Vec<String>,
    pub repeated: bool,
    pub is_map: bool,
    pub map_key: String,
    pub map_value: String,
}

impl Resolved {
    fn named(type_name: impl Into<String>) -> Self {
        Resolved {
            type_name: type_name.into(),
            ..Resolved::default()
        }
    }

    fn with_import(type_name: impl Into<String>, import: Option<&str>) -> Self {
        Resolved {
            type_name: type_name.into(),
            imports: import.map(str::to_string).into_iter().collect(),
            ..Resolved::default()
        }
    }

    fn any() -> Self {
        Resolved::with_import(ANY_TYPE, Some(ANY_IMPORT))
    }
}

pub fn is_scalar(type_name: &str) -> bool {
    SCALARS.contains(&type_name)
}

fn is_byte(node: &TypeNode) -> bool {
    matches!(node, TypeNode::Basic { name } if name == "byte" || name == "uint8")
}

/// Resolve one node.
pub fn resolve(node: &TypeNode, ctx: &ResolveContext<'_>) -> Resolved {
    match node {
        TypeNode::Basic { name } => match ctx.mappings.get(name) {
            Some(mapping) => Resolved::with_import(&mapping.proto, mapping.import.as_deref()),
            None => Resolved::named(name),
        },
        TypeNode::Pointer { elem } => resolve(elem, ctx),
        TypeNode::Slice { elem } if is_byte(elem) => Resolved::named("bytes"),
        TypeNode::Slice { elem } | TypeNode::Array { elem, .. } => {
            let inner = resolve(elem, ctx);
            // Map fields cannot be repeated.
            if inner.is_map {
                return Resolved {
                    repeated: true,
                    ..Resolved::any()
                };
            }
            Resolved {
                type_name: inner.type_name,
                imports: inner.imports,
                repeated: true,
                ..Resolved::default()
            }
        }
        TypeNode::Map { key, value } => {
            let key = resolve(key, ctx);
            let value = resolve(value, ctx);
            let mut imports = key.imports;
            imports.extend(value.imports);
            Resolved {
                type_name: format!("map<{}, {}>", key.type_name, value.type_name),
                imports,
                repeated: false,
                is_map: true,
                map_key: key.type_name,
                map_value: value.type_name,
            }
        }
        TypeNode::Named { name, .. } => resolve_named(node, name, ctx),
        TypeNode::Interface { .. }
        | TypeNode::Struct { .. }
        | TypeNode::Channel { .. }
        | TypeNode::Func { .. } => Resolved::any(),
    }
}

/// Named types: enum, then override table, then generic parameter, then bare name.
fn resolve_named(node: &TypeNode, name: &str, ctx: &ResolveContext<'_>) -> Resolved {
    if ctx.enum_names.contains(name) {
        return Resolved::named(name);
    }
    if let Some(mapping) = ctx.mappings.get(&node.qualified_name()) {
        return Resolved::with_import(&mapping.proto, mapping.import.as_deref());
    }
    if ctx.generic_params.iter().any(|p| p == name) {
        return Resolved::any();
    }
    Resolved::named(name)
}
