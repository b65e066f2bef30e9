//! Proto IR — the render-agnostic schema produced by the engine.
//!
//! These types carry no behavior beyond construction helpers. Aggregation
//! lives in [`crate::compose`], text output in [`crate::render`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Syntax marker for every generated document.
pub const PROTO3: &str = "proto3";

/// A complete `.proto` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proto {
    pub syntax: String,
    pub package: String,
    /// File options such as `go_package`. Sorted by key at render time.
    pub options: BTreeMap<String, String>,
    /// Import paths, unique. Sorted at render time.
    pub imports: Vec<String>,
    pub enums: Vec<Enum>,
    pub messages: Vec<Message>,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    pub fields: Vec<Field>,
    pub nested: Vec<Message>,
    pub enums: Vec<Enum>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Proto type name. For map fields this is `map<K, V>`.
    #[serde(rename = "type")]
    pub ty: String,
    pub number: u32,
    pub repeated: bool,
    pub optional: bool,
    pub map_key: String,
    pub map_value: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i64,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub methods: Vec<Rpc>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rpc {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub comments: Vec<String>,
}

impl Field {
    pub fn is_map(&self) -> bool {
        !self.map_key.is_empty() && !self.map_value.is_empty()
    }
}

impl Proto {
    /// A fragment holding only the given messages and their imports.
    pub fn with_messages(messages: Vec<Message>, imports: Vec<String>) -> Self {
        Proto {
            messages,
            imports,
            ..Proto::default()
        }
    }

    /// True when the document declares nothing worth writing out.
    pub fn has_declarations(&self) -> bool {
        !(self.enums.is_empty() && self.messages.is_empty() && self.services.is_empty())
    }

    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }
}

impl Message {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
