//! Composition of per-declaration fragments into one document.
//!
//! Every aggregation in the engine goes through [`Monoid::combine`] starting
//! from [`Monoid::empty`]. `combine` is associative and `empty` is its
//! identity on both sides, so the grouping of a fold never changes the result
//! and independently produced fragments can be assembled in any grouping as
//! long as their order is kept.

use crate::ir::Proto;
use crate::warning::Warning;

/// Identity plus an associative binary combine.
pub trait Monoid: Sized {
    fn empty() -> Self;
    fn combine(self, other: Self) -> Self;
}

/// Fold values left to right, starting from the identity.
pub fn concat<M: Monoid>(items: impl IntoIterator<Item = M>) -> M {
    items.into_iter().fold(M::empty(), M::combine)
}

/// Map each item to a monoid value and fold in order.
pub fn fold_map<T, M: Monoid>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> M) -> M {
    concat(items.into_iter().map(f))
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Scalars: first non-empty value wins; later fragments never override.
fn coalesce(a: String, b: String) -> String {
    if a.is_empty() {
        b
    } else {
        a
    }
}

/// Order-preserving union; the first occurrence keeps its position.
fn union(a: Vec<String>, b: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    for item in a.into_iter().chain(b) {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Remove duplicates, keeping the first occurrence of each item.
pub fn unique(items: Vec<String>) -> Vec<String> {
    union(items, Vec::new())
}

impl Monoid for Proto {
    fn empty() -> Self {
        Proto::default()
    }

    fn combine(self, other: Self) -> Self {
        let mut options = self.options;
        for (key, value) in other.options {
            let slot = options.entry(key).or_default();
            if slot.is_empty() {
                *slot = value;
            }
        }
        Proto {
            syntax: coalesce(self.syntax, other.syntax),
            package: coalesce(self.package, other.package),
            options,
            imports: union(self.imports, other.imports),
            enums: self.enums.combine(other.enums),
            messages: self.messages.combine(other.messages),
            services: self.services.combine(other.services),
        }
    }
}

/// IR produced for one declaration, together with its diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub proto: Proto,
    pub warnings: Vec<Warning>,
}

impl Fragment {
    pub fn new(proto: Proto, warnings: Vec<Warning>) -> Self {
        Self { proto, warnings }
    }
}

impl From<Proto> for Fragment {
    fn from(proto: Proto) -> Self {
        Fragment {
            proto,
            warnings: Vec::new(),
        }
    }
}

impl Monoid for Fragment {
    fn empty() -> Self {
        Fragment::default()
    }

    fn combine(self, other: Self) -> Self {
        Fragment {
            proto: self.proto.combine(other.proto),
            warnings: self.warnings.combine(other.warnings),
        }
    }
}
