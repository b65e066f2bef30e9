//! Constant groups → enums.
//!
//! Constants are scanned block by block. Inside a block the counter that
//! assigns numbers resets to 0 whenever the declared backing type changes,
//! so one block may hold several disjoint groups. Unexported constants take
//! a number without emitting a value, keeping the numbering in step with the
//! source. A group becomes an enum when it has at least two exported values
//! or when its alias carries `+force-enum`.

use std::collections::BTreeSet;

use crate::directive::{filter_doc_comments, Directives, EXCLUDE, FORCE_ENUM};
use crate::graph::{is_exported, ConstBlock, TypeGraph};
use crate::ir::{Enum, EnumValue, Proto};
use crate::naming::enum_value_name;

/// Constants sharing one backing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstGroup {
    pub type_name: String,
    pub values: Vec<ConstValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstValue {
    pub name: String,
    pub value: i64,
    pub exported: bool,
    pub comments: Vec<String>,
}

impl ConstGroup {
    pub fn exported(&self) -> impl Iterator<Item = &ConstValue> {
        self.values.iter().filter(|v| v.exported)
    }
}

/// Scan constant blocks into groups keyed by backing type, in first-seen order.
pub fn collect_const_groups(blocks: &[ConstBlock]) -> Vec<ConstGroup> {
    let mut groups: Vec<ConstGroup> = Vec::new();

    for block in blocks {
        let mut current: Option<&str> = None;
        // `None` once the counter has run past `i64::MAX`.
        let mut counter: Option<i64> = Some(0);

        for spec in &block.specs {
            if let Some(declared) = spec.type_name.as_deref() {
                if current != Some(declared) {
                    current = Some(declared);
                    counter = Some(0);
                }
            }
            let Some(type_name) = current else {
                continue;
            };
            if let Some(explicit) = spec.value {
                counter = Some(explicit);
            }

            let index = match groups.iter().position(|g| g.type_name == type_name) {
                Some(i) => i,
                None => {
                    groups.push(ConstGroup {
                        type_name: type_name.to_string(),
                        values: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            for name in &spec.names {
                let Some(value) = counter else {
                    tracing::debug!(name = %name, "constant value out of range, skipped");
                    continue;
                };
                groups[index].values.push(ConstValue {
                    name: name.clone(),
                    value,
                    exported: is_exported(name),
                    comments: spec.comments.clone(),
                });
                counter = value.checked_add(1);
            }
        }
    }
    groups
}

/// Names of every type promoted to an enum in this package.
pub(crate) fn enum_names(graph: &TypeGraph, groups: &[ConstGroup]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for alias in &graph.aliases {
        let directives = Directives::parse(&alias.comments);
        if directives.is_set(FORCE_ENUM) && !directives.is_set(EXCLUDE) {
            names.insert(alias.name.clone());
        }
    }
    for group in groups {
        if group.exported().count() >= 2 && !is_excluded_alias(graph, &group.type_name) {
            names.insert(group.type_name.clone());
        }
    }
    names
}

fn is_excluded_alias(graph: &TypeGraph, name: &str) -> bool {
    graph
        .aliases
        .iter()
        .find(|a| a.name == name)
        .is_some_and(|a| Directives::parse(&a.comments).is_set(EXCLUDE))
}

/// One enum per promoted group, in group order.
pub(crate) fn transform_enums(
    graph: &TypeGraph,
    groups: &[ConstGroup],
    enum_names: &BTreeSet<String>,
) -> Proto {
    let enums = groups
        .iter()
        .filter(|g| enum_names.contains(&g.type_name))
        .filter_map(|g| to_enum(graph, g))
        .collect();
    Proto {
        enums,
        ..Proto::default()
    }
}

fn to_enum(graph: &TypeGraph, group: &ConstGroup) -> Option<Enum> {
    let values: Vec<EnumValue> = group
        .exported()
        .map(|v| EnumValue {
            name: enum_value_name(&group.type_name, &v.name),
            number: v.value,
            comments: filter_doc_comments(&v.comments),
        })
        .collect();
    if values.is_empty() {
        tracing::debug!(name = %group.type_name, "enum has no exported values, skipping");
        return None;
    }
    let comments = graph
        .aliases
        .iter()
        .find(|a| a.name == group.type_name)
        .map(|a| filter_doc_comments(&a.comments))
        .unwrap_or_default();
    Some(Enum {
        name: group.type_name.clone(),
        values,
        comments,
    })
}
