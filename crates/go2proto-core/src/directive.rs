//! Directive mini-language carried in leading documentation.
//!
//! A documentation line whose trimmed text starts with `+` is a directive:
//! `+key=value` sets an explicit value, a bare `+key` means `true`. Directive
//! lines never reach the rendered output; [`filter_doc_comments`] strips them.

use std::collections::BTreeMap;

/// Drop the declaration unconditionally.
pub const EXCLUDE: &str = "exclude";
/// Keep a struct even when its name is not exported.
pub const INCLUDE: &str = "include";
/// Convert an interface into an RPC service.
pub const SERVICE: &str = "service";
/// Treat an alias's backing constants as an enum regardless of their count.
pub const FORCE_ENUM: &str = "force-enum";

/// Flat key → value view of the directives on one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives(BTreeMap<String, String>);

impl Directives {
    /// Parse every directive line out of raw documentation lines.
    ///
    /// Later occurrences of the same key overwrite earlier ones.
    pub fn parse<S: AsRef<str>>(comments: &[S]) -> Self {
        let mut map = BTreeMap::new();
        for line in comments {
            let Some(body) = line.as_ref().trim().strip_prefix('+') else {
                continue;
            };
            let (key, value) = match body.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (body.trim(), "true"),
            };
            if key.is_empty() {
                continue;
            }
            map.insert(key.to_string(), value.to_string());
        }
        Directives(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True when the key is present with the value `true`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Documentation lines with directive lines removed.
pub fn filter_doc_comments(comments: &[String]) -> Vec<String> {
    comments
        .iter()
        .filter(|c| !c.trim().starts_with('+'))
        .cloned()
        .collect()
}
