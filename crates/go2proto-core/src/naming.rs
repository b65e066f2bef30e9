//! Name conversions between Go identifiers and proto conventions.

use heck::{ToShoutySnakeCase, ToSnakeCase};

/// Hosting prefixes stripped from import paths when deriving a proto package.
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Field and envelope field names: `CreatedAt` → `created_at`, `UserID` → `user_id`.
pub fn field_name(go_name: &str) -> String {
    go_name.to_snake_case()
}

/// Enum value name, prefixed with the enum's own name unless it already is.
///
/// `("Status", "Active")` → `STATUS_ACTIVE`,
/// `("Status", "StatusActive")` → `STATUS_ACTIVE`.
pub fn enum_value_name(enum_name: &str, value_name: &str) -> String {
    let prefix = enum_name.to_shouty_snake_case();
    let value = value_name.to_shouty_snake_case();
    if value == prefix || value.starts_with(&format!("{prefix}_")) {
        value
    } else {
        format!("{prefix}_{value}")
    }
}

/// Proto package derived from a Go import path.
///
/// `github.com/acme/user-api/models` → `acme.user_api.models`.
pub fn proto_package(import_path: &str) -> String {
    let parts: Vec<&str> = import_path.split('/').filter(|p| !p.is_empty()).collect();
    let start = parts
        .iter()
        .position(|p| CODE_HOSTS.contains(p))
        .map_or(0, |i| i + 1);
    parts[start..].join(".").replace('-', "_")
}

/// Output file stem for a proto package: `acme.api` → `acme_api`.
pub fn file_stem(package: &str) -> String {
    package.replace('.', "_")
}
