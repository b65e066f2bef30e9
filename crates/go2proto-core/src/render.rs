//! Proto IR → `.proto` text.
//!
//! A pure pretty-printer. Output blocks are built as [`Code`] values and
//! glued together with the same [`Monoid`] used for the IR. Option keys and
//! imports are sorted here; everything else keeps IR order.

use crate::compose::{concat, fold_map, Monoid};
use crate::ir::{Enum, Field, Message, Proto, Rpc, Service, PROTO3};

const INDENT: &str = "  ";

/// A block of output lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Code(Vec<String>);

impl Monoid for Code {
    fn empty() -> Self {
        Code(Vec::new())
    }

    fn combine(self, other: Self) -> Self {
        Code(self.0.combine(other.0))
    }
}

impl Code {
    fn line(s: impl Into<String>) -> Self {
        Code(vec![s.into()])
    }

    fn blank() -> Self {
        Code::line("")
    }

    fn indent(self) -> Self {
        Code(
            self.0
                .into_iter()
                .map(|l| if l.is_empty() { l } else { format!("{INDENT}{l}") })
                .collect(),
        )
    }

    /// Append a blank separator line unless the block is empty.
    fn spaced(self) -> Self {
        if self.0.is_empty() {
            self
        } else {
            self.combine(Code::blank())
        }
    }
}

fn comments(lines: &[String]) -> Code {
    fold_map(lines, |c| {
        if c.is_empty() {
            Code::line("//")
        } else {
            Code::line(format!("// {c}"))
        }
    })
}

/// Render a complete document.
pub fn render(proto: &Proto) -> String {
    let syntax = if proto.syntax.is_empty() {
        PROTO3
    } else {
        proto.syntax.as_str()
    };
    let code = concat([
        Code::line(format!("syntax = \"{syntax}\";")).spaced(),
        render_package(proto).spaced(),
        render_options(proto).spaced(),
        render_imports(proto).spaced(),
        fold_map(&proto.enums, render_enum),
        fold_map(&proto.messages, render_message),
        fold_map(&proto.services, render_service),
    ]);
    let mut lines = code.0;
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_package(proto: &Proto) -> Code {
    if proto.package.is_empty() {
        return Code::empty();
    }
    Code::line(format!("package {};", proto.package))
}

fn render_options(proto: &Proto) -> Code {
    // BTreeMap iteration is already key-sorted.
    fold_map(&proto.options, |(key, value)| {
        Code::line(format!("option {key} = \"{value}\";"))
    })
}

fn render_imports(proto: &Proto) -> Code {
    let mut imports: Vec<&String> = proto.imports.iter().collect();
    imports.sort();
    imports.dedup();
    fold_map(imports, |path| Code::line(format!("import \"{path}\";")))
}

fn render_enum(e: &Enum) -> Code {
    let values = fold_map(&e.values, |v| {
        comments(&v.comments)
            .combine(Code::line(format!("{} = {};", v.name, v.number)))
            .indent()
    });
    concat([
        comments(&e.comments),
        Code::line(format!("enum {} {{", e.name)),
        values,
        Code::line("}"),
        Code::blank(),
    ])
}

fn render_message(m: &Message) -> Code {
    let nested_enums = fold_map(&m.enums, |e| render_enum(e).indent());
    let nested_messages = fold_map(&m.nested, |n| render_message(n).indent());
    let fields = fold_map(&m.fields, |f| render_field(f).indent());
    concat([
        comments(&m.comments),
        Code::line(format!("message {} {{", m.name)),
        nested_enums,
        nested_messages,
        fields,
        Code::line("}"),
        Code::blank(),
    ])
}

fn render_field(f: &Field) -> Code {
    let line = if f.is_map() {
        format!("map<{}, {}> {} = {};", f.map_key, f.map_value, f.name, f.number)
    } else {
        let label = if f.repeated {
            "repeated "
        } else if f.optional {
            "optional "
        } else {
            ""
        };
        format!("{label}{} {} = {};", f.ty, f.name, f.number)
    };
    comments(&f.comments).combine(Code::line(line))
}

fn render_service(s: &Service) -> Code {
    let methods = fold_map(&s.methods, |r| render_rpc(r).indent());
    concat([
        comments(&s.comments),
        Code::line(format!("service {} {{", s.name)),
        methods,
        Code::line("}"),
        Code::blank(),
    ])
}

fn render_rpc(r: &Rpc) -> Code {
    let stream = |streaming: bool| if streaming { "stream " } else { "" };
    comments(&r.comments).combine(Code::line(format!(
        "rpc {}({}{}) returns ({}{});",
        r.name,
        stream(r.client_streaming),
        r.input_type,
        stream(r.server_streaming),
        r.output_type
    )))
}
