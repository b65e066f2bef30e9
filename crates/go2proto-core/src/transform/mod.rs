//! Declaration transformers and the per-package orchestration.
//!
//! Each declaration becomes an independent [`Fragment`]; a package is the
//! fold of its base fragment (syntax, package, options), its enums, its struct
//! messages and its services, in that order. Packages are transformed in
//! parallel and folded back in input order.

mod enums;
mod services;
mod structs;

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::compose::{concat, fold_map, Fragment, Monoid};
use crate::config::TransformOptions;
use crate::directive::filter_doc_comments;
use crate::graph::{TypeGraph, TypeNode};
use crate::ir::{Field, Proto, PROTO3};
use crate::naming::{field_name, proto_package};
use crate::resolve::{is_scalar, resolve, ResolveContext};
use crate::validate::duplicate_message_names;
use crate::warning::Warning;

pub use enums::{collect_const_groups, ConstGroup, ConstValue};

/// Option key carrying the Go import path.
pub const GO_PACKAGE_OPTION: &str = "go_package";

/// Result of a transformation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// The composed schema.
    pub proto: Proto,
    /// Diagnostics collected from every declaration.
    pub warnings: Vec<Warning>,
}

/// Converts type graphs into Proto IR.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

/// Read-only lookups shared by every declaration of one package.
pub(crate) struct Scope<'a> {
    pub options: &'a TransformOptions,
    pub enum_names: &'a BTreeSet<String>,
}

impl Scope<'_> {
    pub fn resolve_context<'b>(&'b self, generic_params: &'b [String]) -> ResolveContext<'b> {
        ResolveContext {
            enum_names: self.enum_names,
            generic_params,
            mappings: &self.options.type_mappings,
        }
    }
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Transform every package and compose the results into one document.
    pub fn transform(&self, graphs: &[TypeGraph]) -> TransformResult {
        let fragments: Vec<Fragment> = graphs
            .par_iter()
            .map(|graph| self.transform_package(graph))
            .collect();
        let Fragment {
            proto,
            mut warnings,
        } = concat(fragments);
        warnings.extend(duplicate_message_names(&proto));
        TransformResult { proto, warnings }
    }

    /// Transform one package into a fragment.
    pub fn transform_package(&self, graph: &TypeGraph) -> Fragment {
        let _span = tracing::debug_span!("package", path = %graph.path).entered();

        let groups = collect_const_groups(&graph.const_blocks);
        let enum_names = enums::enum_names(graph, &groups);
        let scope = Scope {
            options: &self.options,
            enum_names: &enum_names,
        };

        let enums = enums::transform_enums(graph, &groups, &enum_names);
        let messages = fold_map(&graph.structs, |decl| structs::transform_struct(decl, &scope));
        let services = fold_map(&graph.interfaces, |decl| {
            services::transform_interface(decl, &scope)
        });

        tracing::debug!(
            enums = enums.enums.len(),
            messages = messages.proto.messages.len(),
            services = services.proto.services.len(),
            "transformed package"
        );

        concat([self.base(graph).into(), enums.into(), messages, services])
    }

    /// Syntax, package and file options for one package.
    fn base(&self, graph: &TypeGraph) -> Proto {
        let package = if self.options.package_name.is_empty() {
            proto_package(&graph.path)
        } else {
            self.options.package_name.clone()
        };
        let go_package = if self.options.go_package.is_empty() {
            graph.path.clone()
        } else {
            self.options.go_package.clone()
        };

        let mut proto = Proto::empty();
        proto.syntax = PROTO3.to_string();
        proto.package = package;
        if !go_package.is_empty() {
            proto.options.insert(GO_PACKAGE_OPTION.to_string(), go_package);
        }
        proto
    }
}

/// Build one message field from a source type.
///
/// Pointers to scalars become `optional`; pointers to messages already carry
/// presence and stay plain. Repeated fields are never `optional`. Returns the field and the imports it needs.
pub(crate) fn build_field(
    source_name: &str,
    ty: &TypeNode,
    number: u32,
    comments: &[String],
    ctx: &ResolveContext<'_>,
) -> (Field, Vec<String>) {
    let resolved = resolve(ty, ctx);
    let repeated = resolved.repeated && !resolved.is_map;
    let optional =
        !repeated && matches!(ty, TypeNode::Pointer { .. }) && is_scalar(&resolved.type_name);
    let field = Field {
        name: field_name(source_name),
        ty: resolved.type_name,
        number,
        repeated,
        optional,
        map_key: resolved.map_key,
        map_value: resolved.map_value,
        comments: filter_doc_comments(comments),
    };
    (field, resolved.imports)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::{ConstBlock, ConstSpec, FieldDecl, StructDecl};

    fn graph() -> TypeGraph {
        TypeGraph {
            name: "models".into(),
            path: "github.com/acme/user-api/models".into(),
            structs: vec![StructDecl {
                name: "User".into(),
                fields: vec![FieldDecl::new("ID", TypeNode::basic("string"))],
                ..StructDecl::default()
            }],
            const_blocks: vec![ConstBlock {
                specs: vec![
                    ConstSpec {
                        type_name: Some("Role".into()),
                        names: vec!["RoleAdmin".into()],
                        ..ConstSpec::default()
                    },
                    ConstSpec {
                        names: vec!["RoleMember".into()],
                        ..ConstSpec::default()
                    },
                ],
            }],
            ..TypeGraph::default()
        }
    }

    #[test]
    fn test_base_derives_package_and_go_package() {
        let out = Transformer::default().transform_package(&graph());
        assert_eq!(out.proto.syntax, "proto3");
        assert_eq!(out.proto.package, "acme.user_api.models");
        assert_eq!(
            out.proto.options[GO_PACKAGE_OPTION],
            "github.com/acme/user-api/models"
        );
    }

    #[test]
    fn test_explicit_package_options_win() {
        let transformer = Transformer::new(TransformOptions {
            package_name: "acme.v1".into(),
            go_package: "github.com/acme/gen/v1".into(),
            ..TransformOptions::default()
        });
        let out = transformer.transform_package(&graph());
        assert_eq!(out.proto.package, "acme.v1");
        assert_eq!(out.proto.options[GO_PACKAGE_OPTION], "github.com/acme/gen/v1");
    }

    #[test]
    fn test_package_order_is_enums_then_messages() {
        let out = Transformer::default().transform_package(&graph());
        assert_eq!(out.proto.enums.len(), 1);
        assert_eq!(out.proto.enums[0].name, "Role");
        assert_eq!(out.proto.messages[0].name, "User");
    }

    #[test]
    fn test_transform_keeps_package_order_and_first_package_wins() {
        let mut second = graph();
        second.path = "github.com/acme/billing".into();
        second.structs[0].name = "Invoice".into();

        let result = Transformer::default().transform(&[graph(), second]);
        let names: Vec<_> = result.proto.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["User", "Invoice"]);
        assert_eq!(result.proto.package, "acme.user_api.models");
        // Both packages declare `Role`; the duplicate enum is not a message clash.
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_build_field_pointer_optionality() {
        let enums = BTreeSet::new();
        let mappings = crate::config::TypeMappings::default();
        let ctx = ResolveContext {
            enum_names: &enums,
            generic_params: &[],
            mappings: &mappings,
        };

        let (scalar, _) = build_field("Nickname", &TypeNode::pointer(TypeNode::basic("string")), 1, &[], &ctx);
        assert!(scalar.optional);

        let (message, _) = build_field("Manager", &TypeNode::pointer(TypeNode::named("", "User")), 2, &[], &ctx);
        assert!(!message.optional);

        let (plain, _) = build_field("Name", &TypeNode::basic("string"), 3, &[], &ctx);
        assert!(!plain.optional);

        let (list, _) = build_field(
            "Tags",
            &TypeNode::pointer(TypeNode::slice(TypeNode::basic("string"))),
            4,
            &[],
            &ctx,
        );
        assert!(list.repeated);
        assert!(!list.optional);
    }

    #[test]
    fn test_build_field_slice_of_maps_renders_valid_label() {
        let enums = BTreeSet::new();
        let mappings = crate::config::TypeMappings::default();
        let ctx = ResolveContext {
            enum_names: &enums,
            generic_params: &[],
            mappings: &mappings,
        };
        let rows = TypeNode::slice(TypeNode::map(
            TypeNode::basic("string"),
            TypeNode::basic("string"),
        ));
        let (field, imports) = build_field("Rows", &rows, 1, &[], &ctx);
        assert!(field.repeated);
        assert!(!field.is_map());
        assert_eq!(field.ty, crate::config::ANY_TYPE);
        assert_eq!(imports, vec![crate::config::ANY_IMPORT.to_string()]);
    }
}
