//! Interface → Service, with request/response envelope synthesis.
//!
//! Only interfaces marked `+service` are converted. Per method:
//!
//! - `context.Context` parameters are dropped, then a trailing `error` result.
//! - Nothing left → `google.protobuf.Empty`.
//! - A single named message type left → used directly as the RPC type
//!   (a single `*T` result is unwrapped first).
//! - Anything else → a synthesized `<Method>Request` / `<Method>Response`
//!   envelope with one field per parameter, numbered from 1.

use crate::compose::{unique, Fragment};
use crate::config::{EMPTY_IMPORT, EMPTY_TYPE};
use crate::directive::{filter_doc_comments, Directives, EXCLUDE, SERVICE};
use crate::graph::{InterfaceDecl, MethodDecl, Param, TypeNode};
use crate::ir::{Message, Proto, Rpc, Service};
use crate::resolve::{is_scalar, resolve, ResolveContext};
use crate::validate::duplicate_field_numbers;

use super::{build_field, Scope};

/// How one side of an RPC is typed.
#[derive(Debug, PartialEq, Eq)]
enum Envelope {
    /// `google.protobuf.Empty`.
    Empty,
    /// An existing message (or well-known type) reused as-is.
    Reuse { type_name: String, imports: Vec<String> },
    /// A synthesized wrapper message.
    Synthesized { message: Message, imports: Vec<String> },
}

impl Envelope {
    fn type_name(&self) -> &str {
        match self {
            Envelope::Empty => EMPTY_TYPE,
            Envelope::Reuse { type_name, .. } => type_name.as_str(),
            Envelope::Synthesized { message, .. } => message.name.as_str(),
        }
    }

    /// Split into the optional synthesized message and the imports needed.
    fn into_parts(self) -> (Option<Message>, Vec<String>) {
        match self {
            Envelope::Empty => (None, vec![EMPTY_IMPORT.to_string()]),
            Envelope::Reuse { imports, .. } => (None, imports),
            Envelope::Synthesized { message, imports } => (Some(message), imports),
        }
    }
}

pub(crate) fn transform_interface(decl: &InterfaceDecl, scope: &Scope<'_>) -> Fragment {
    let directives = Directives::parse(&decl.comments);
    if !directives.is_set(SERVICE) || directives.is_set(EXCLUDE) {
        return Fragment::default();
    }

    let ctx = scope.resolve_context(&[]);
    let mut service = Service {
        name: decl.name.clone(),
        comments: filter_doc_comments(&decl.comments),
        ..Service::default()
    };
    let mut messages = Vec::new();
    let mut imports = Vec::new();

    for method in &decl.methods {
        let request = request_envelope(method, &ctx);
        let response = response_envelope(method, &ctx);
        service.methods.push(Rpc {
            name: method.name.clone(),
            input_type: request.type_name().to_string(),
            output_type: response.type_name().to_string(),
            comments: filter_doc_comments(&method.comments),
            ..Rpc::default()
        });
        for side in [request, response] {
            let (message, side_imports) = side.into_parts();
            messages.extend(message);
            imports.extend(side_imports);
        }
    }

    tracing::debug!(
        service = %service.name,
        rpcs = service.methods.len(),
        envelopes = messages.len(),
        "transformed service"
    );

    let warnings = messages.iter().flat_map(duplicate_field_numbers).collect();
    let proto = Proto {
        imports: unique(imports),
        messages,
        services: vec![service],
        ..Proto::default()
    };
    Fragment::new(proto, warnings)
}

fn request_envelope(method: &MethodDecl, ctx: &ResolveContext<'_>) -> Envelope {
    let params: Vec<&Param> = method.params.iter().filter(|p| !p.ty.is_context()).collect();
    match params.as_slice() {
        [] => Envelope::Empty,
        [single] => reuse(&single.ty, ctx)
            .unwrap_or_else(|| synthesize(&format!("{}Request", method.name), &params, "arg", ctx)),
        _ => synthesize(&format!("{}Request", method.name), &params, "arg", ctx),
    }
}

fn response_envelope(method: &MethodDecl, ctx: &ResolveContext<'_>) -> Envelope {
    let mut results: Vec<&Param> = method.results.iter().collect();
    if results.last().is_some_and(|r| r.ty.is_error()) {
        results.pop();
    }
    match results.as_slice() {
        [] => Envelope::Empty,
        [single] => {
            let target = match &single.ty {
                TypeNode::Pointer { elem } => elem.as_ref(),
                other => other,
            };
            reuse(target, ctx).unwrap_or_else(|| {
                synthesize(&format!("{}Response", method.name), &results, "result", ctx)
            })
        }
        _ => synthesize(&format!("{}Response", method.name), &results, "result", ctx),
    }
}

/// A named type that resolves to a message can stand in for the envelope.
///
/// Enums and names mapped onto scalars cannot be RPC types and get wrapped.
fn reuse(ty: &TypeNode, ctx: &ResolveContext<'_>) -> Option<Envelope> {
    let TypeNode::Named { name, .. } = ty else {
        return None;
    };
    if ctx.enum_names.contains(name) {
        return None;
    }
    let resolved = resolve(ty, ctx);
    if is_scalar(&resolved.type_name) {
        return None;
    }
    Some(Envelope::Reuse {
        type_name: resolved.type_name,
        imports: resolved.imports,
    })
}

fn synthesize(
    name: &str,
    params: &[&Param],
    fallback: &str,
    ctx: &ResolveContext<'_>,
) -> Envelope {
    let mut message = Message {
        name: name.to_string(),
        ..Message::default()
    };
    let mut imports = Vec::new();
    for (index, param) in params.iter().enumerate() {
        let number = index as u32 + 1;
        let source_name = if param.name.is_empty() {
            format!("{fallback}{number}")
        } else {
            param.name.clone()
        };
        let (field, field_imports) = build_field(&source_name, &param.ty, number, &[], ctx);
        message.fields.push(field);
        imports.extend(field_imports);
    }
    Envelope::Synthesized { message, imports }
}
