//! Struct → Message.

use crate::compose::{unique, Fragment};
use crate::directive::{filter_doc_comments, Directives, EXCLUDE, INCLUDE};
use crate::graph::{is_exported, FieldDecl, StructDecl};
use crate::ir::{Field, Message, Proto};
use crate::naming::field_name;
use crate::resolve::ResolveContext;
use crate::validate::duplicate_field_numbers;
use crate::warning::{Warning, WarningKind};
use crate::wire_tag::parse_wire_tag;

use super::{build_field, Scope};

/// Convert one struct. Returns the empty fragment when the struct is filtered out.
pub(crate) fn transform_struct(decl: &StructDecl, scope: &Scope<'_>) -> Fragment {
    let directives = Directives::parse(&decl.comments);
    if directives.is_set(EXCLUDE) {
        tracing::debug!(name = %decl.name, "struct excluded by directive");
        return Fragment::default();
    }
    if !directives.is_set(INCLUDE) && !is_exported(&decl.name) {
        tracing::debug!(name = %decl.name, "unexported struct skipped");
        return Fragment::default();
    }

    let ctx = scope.resolve_context(&decl.type_params);
    let mut message = Message {
        name: decl.name.clone(),
        comments: filter_doc_comments(&decl.comments),
        ..Message::default()
    };
    let mut imports = Vec::new();
    let mut warnings = Vec::new();
    let mut number = 1;

    for field in &decl.fields {
        if !field.exported && !scope.options.include_private {
            continue;
        }
        // Embedded fields are not flattened into the containing message.
        if field.embedded {
            tracing::debug!(message = %decl.name, field = %field.name, "embedded field dropped");
            continue;
        }
        let location = format!("{}.{}", decl.name, field.name);
        let (emitted, field_imports) = transform_field(field, number, &ctx, &location, &mut warnings);
        message.fields.push(emitted);
        imports.extend(field_imports);
        number += 1;
    }

    warnings.extend(duplicate_field_numbers(&message));
    Fragment::new(
        Proto::with_messages(vec![message], unique(imports)),
        warnings,
    )
}

/// A well-formed wire tag wins outright; otherwise the resolver decides.
fn transform_field(
    field: &FieldDecl,
    number: u32,
    ctx: &ResolveContext<'_>,
    location: &str,
    warnings: &mut Vec<Warning>,
) -> (Field, Vec<String>) {
    match parse_wire_tag(&field.tag) {
        Ok(Some(tag)) => {
            let emitted = Field {
                name: tag.name.unwrap_or_else(|| field_name(&field.name)),
                ty: tag.ty.to_string(),
                number: tag.number,
                repeated: tag.repeated,
                optional: tag.optional,
                comments: filter_doc_comments(&field.comments),
                ..Field::default()
            };
            (emitted, Vec::new())
        }
        Ok(None) => build_field(&field.name, &field.ty, number, &field.comments, ctx),
        Err(err) => {
            warnings.push(Warning::new(
                location,
                WarningKind::MalformedWireTag {
                    tag: field.tag.clone(),
                },
                format!("ignoring malformed wire tag ({err}); using field number {number}"),
            ));
            build_field(&field.name, &field.ty, number, &field.comments, ctx)
        }
    }
}
