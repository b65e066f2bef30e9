//! Type graph — the parsed Go declarations handed to the engine.
//!
//! The graph is produced once by an external front-end (usually serialized as
//! JSON) and is never mutated by the engine. Every type reference is a
//! [`TypeNode`], a closed sum type so that resolution is one exhaustive match.

use serde::{Deserialize, Serialize};

/// Resolved shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    /// A predeclared type such as `string`, `int64` or `error`.
    Basic { name: String },
    Pointer { elem: Box<TypeNode> },
    Slice { elem: Box<TypeNode> },
    /// Fixed-length array. The length is kept for logging only.
    Array { elem: Box<TypeNode>, len: u64 },
    Map { key: Box<TypeNode>, value: Box<TypeNode> },
    /// A named type, optionally qualified by its import path (`time.Time`).
    Named {
        #[serde(default)]
        namespace: String,
        name: String,
    },
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Channel {
        elem: Box<TypeNode>,
        #[serde(default)]
        dir: ChanDir,
    },
    Func {
        #[serde(default)]
        params: Vec<Param>,
        #[serde(default)]
        results: Vec<Param>,
    },
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

impl TypeNode {
    pub fn basic(name: impl Into<String>) -> Self {
        TypeNode::Basic { name: name.into() }
    }

    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeNode::Named {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeNode) -> Self {
        TypeNode::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeNode) -> Self {
        TypeNode::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn array(elem: TypeNode, len: u64) -> Self {
        TypeNode::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        TypeNode::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Go-like rendering of the type, e.g. `map[string]*time.Time`.
    ///
    /// For `Named` nodes this is the qualified name used as the key into the
    /// type-mapping override table.
    pub fn qualified_name(&self) -> String {
        match self {
            TypeNode::Basic { name } => name.clone(),
            TypeNode::Pointer { elem } => format!("*{}", elem.qualified_name()),
            TypeNode::Slice { elem } => format!("[]{}", elem.qualified_name()),
            TypeNode::Array { elem, len } => format!("[{len}]{}", elem.qualified_name()),
            TypeNode::Map { key, value } => {
                format!("map[{}]{}", key.qualified_name(), value.qualified_name())
            }
            TypeNode::Named { namespace, name } if namespace.is_empty() => name.clone(),
            TypeNode::Named { namespace, name } => format!("{namespace}.{name}"),
            TypeNode::Interface { .. } => "interface{}".to_string(),
            TypeNode::Struct { .. } => "struct{}".to_string(),
            TypeNode::Channel { elem, dir } => match dir {
                ChanDir::Both => format!("chan {}", elem.qualified_name()),
                ChanDir::Send => format!("chan<- {}", elem.qualified_name()),
                ChanDir::Recv => format!("<-chan {}", elem.qualified_name()),
            },
            TypeNode::Func { .. } => "func()".to_string(),
        }
    }

    /// True for `Named { namespace: "context", name: "Context" }`.
    pub fn is_context(&self) -> bool {
        matches!(self, TypeNode::Named { namespace, name } if namespace == "context" && name == "Context")
    }

    /// True for the predeclared `error` type.
    pub fn is_error(&self) -> bool {
        matches!(self, TypeNode::Basic { name } if name == "error")
    }
}

/// One compilation unit (a Go package).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    /// Package name, e.g. `models`.
    pub name: String,
    /// Import path, e.g. `github.com/acme/api/models`.
    pub path: String,
    #[serde(default)]
    pub structs: Vec<StructDecl>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default)]
    pub aliases: Vec<AliasDecl>,
    #[serde(default)]
    pub const_blocks: Vec<ConstBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// Generic type parameter names, e.g. `["K", "V"]`.
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Raw leading documentation lines, directives included.
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeNode,
    /// Raw struct tag text, e.g. `` `json:"id" protobuf:"varint,1,opt,name=id"` ``.
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub embedded: bool,
    #[serde(default = "default_true")]
    pub exported: bool,
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Param>,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// A method parameter or result. The name is empty when the source omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    pub ty: TypeNode,
}

/// A named type declared over another type, e.g. `type Status int`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: String,
    pub underlying: TypeNode,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// One `const ( ... )` block as written in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstBlock {
    #[serde(default)]
    pub specs: Vec<ConstSpec>,
}

/// One line of a constant block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstSpec {
    /// Declared backing type. `None` when the line inherits the previous type.
    #[serde(default)]
    pub type_name: Option<String>,
    pub names: Vec<String>,
    /// Explicit numeric value; the counter continues from here.
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub comments: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Go's export rule: the first character is an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl FieldDecl {
    /// An exported, non-embedded, untagged field.
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        let name = name.into();
        Self {
            exported: is_exported(&name),
            name,
            ty,
            tag: String::new(),
            embedded: false,
            comments: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}
