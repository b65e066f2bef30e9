//! End-to-end scenarios: type graph in, IR and `.proto` text out.

use go2proto_core::config::{ANY_IMPORT, ANY_TYPE, EMPTY_IMPORT, EMPTY_TYPE, TIMESTAMP_IMPORT, TIMESTAMP_TYPE};
use go2proto_core::graph::{
    AliasDecl, ConstBlock, ConstSpec, FieldDecl, InterfaceDecl, MethodDecl, Param, StructDecl,
};
use go2proto_core::{generate, load_graphs, transform, TransformOptions, TypeGraph, TypeNode};
use pretty_assertions::assert_eq;

// ── Fixtures ────────────────────────────────────────────────────────────────

fn status_consts() -> ConstBlock {
    ConstBlock {
        specs: vec![
            ConstSpec {
                type_name: Some("Status".into()),
                names: vec!["StatusActive".into()],
                ..ConstSpec::default()
            },
            ConstSpec {
                names: vec!["StatusInactive".into()],
                ..ConstSpec::default()
            },
            ConstSpec {
                names: vec!["StatusBanned".into()],
                ..ConstSpec::default()
            },
        ],
    }
}

fn user_struct() -> StructDecl {
    StructDecl {
        name: "User".into(),
        fields: vec![
            FieldDecl::new("ID", TypeNode::basic("string")),
            FieldDecl::new("Email", TypeNode::basic("string")),
            FieldDecl::new("Status", TypeNode::named("", "Status")),
            FieldDecl::new("CreatedAt", TypeNode::named("time", "Time")),
        ],
        comments: vec!["User is an account holder.".into()],
        ..StructDecl::default()
    }
}

fn ctx() -> Param {
    Param::new("ctx", TypeNode::named("context", "Context"))
}

fn err() -> Param {
    Param::new("", TypeNode::basic("error"))
}

fn user_service() -> InterfaceDecl {
    InterfaceDecl {
        name: "UserService".into(),
        methods: vec![
            MethodDecl {
                name: "GetUser".into(),
                params: vec![ctx(), Param::new("id", TypeNode::basic("string"))],
                results: vec![
                    Param::new("", TypeNode::pointer(TypeNode::named("", "User"))),
                    err(),
                ],
                ..MethodDecl::default()
            },
            MethodDecl {
                name: "Ping".into(),
                params: vec![ctx()],
                results: vec![err()],
                ..MethodDecl::default()
            },
        ],
        comments: vec!["+service".into()],
    }
}

fn models() -> TypeGraph {
    TypeGraph {
        name: "models".into(),
        path: "github.com/acme/api/models".into(),
        structs: vec![user_struct()],
        interfaces: vec![user_service()],
        aliases: vec![AliasDecl {
            name: "Status".into(),
            underlying: TypeNode::basic("int"),
            comments: vec!["Status of an account.".into()],
        }],
        const_blocks: vec![status_consts()],
    }
}

// ── Messages ────────────────────────────────────────────────────────────────

#[test]
fn test_user_struct_fields_are_numbered_and_typed() {
    let result = transform(&[models()], &TransformOptions::default());
    let user = result.proto.message("User").expect("User message");

    let fields: Vec<(&str, &str, u32)> = user
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.ty.as_str(), f.number))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("id", "string", 1),
            ("email", "string", 2),
            ("status", "Status", 3),
            ("created_at", TIMESTAMP_TYPE, 4),
        ]
    );
    assert!(result.proto.imports.contains(&TIMESTAMP_IMPORT.to_string()));
    assert_eq!(user.comments, vec!["User is an account holder."]);
}

#[test]
fn test_status_consts_become_enum() {
    let result = transform(&[models()], &TransformOptions::default());
    let status = result.proto.enumeration("Status").expect("Status enum");

    let values: Vec<(&str, i64)> = status
        .values
        .iter()
        .map(|v| (v.name.as_str(), v.number))
        .collect();
    assert_eq!(
        values,
        vec![
            ("STATUS_ACTIVE", 0),
            ("STATUS_INACTIVE", 1),
            ("STATUS_BANNED", 2),
        ]
    );
    assert_eq!(status.comments, vec!["Status of an account."]);
}

#[test]
fn test_byte_slice_is_bytes_not_repeated() {
    let mut graph = models();
    graph.structs[0]
        .fields
        .push(FieldDecl::new("Avatar", TypeNode::slice(TypeNode::basic("byte"))));

    let result = transform(&[graph], &TransformOptions::default());
    let avatar = result.proto.message("User").unwrap().field("avatar").unwrap();
    assert_eq!(avatar.ty, "bytes");
    assert!(!avatar.repeated);
}

#[test]
fn test_generic_parameter_becomes_any() {
    let graph = TypeGraph {
        name: "page".into(),
        path: "github.com/acme/api/page".into(),
        structs: vec![StructDecl {
            name: "Page".into(),
            fields: vec![
                FieldDecl::new("Items", TypeNode::slice(TypeNode::named("", "T"))),
                FieldDecl::new("Total", TypeNode::basic("int64")),
            ],
            type_params: vec!["T".into()],
            ..StructDecl::default()
        }],
        ..TypeGraph::default()
    };

    let result = transform(&[graph], &TransformOptions::default());
    let items = result.proto.message("Page").unwrap().field("items").unwrap();
    assert_eq!(items.ty, ANY_TYPE);
    assert!(items.repeated);
    assert_eq!(result.proto.imports, vec![ANY_IMPORT.to_string()]);
}

#[test]
fn test_pointer_to_scalar_is_optional() {
    let mut graph = models();
    graph.structs[0].fields.push(FieldDecl::new(
        "Nickname",
        TypeNode::pointer(TypeNode::basic("string")),
    ));
    graph.structs[0].fields.push(FieldDecl::new(
        "Manager",
        TypeNode::pointer(TypeNode::named("", "User")),
    ));

    let result = transform(&[graph], &TransformOptions::default());
    let user = result.proto.message("User").unwrap();
    assert!(user.field("nickname").unwrap().optional);
    assert!(!user.field("manager").unwrap().optional);
}

#[test]
fn test_enum_counter_resets_between_types() {
    let graph = TypeGraph {
        name: "models".into(),
        path: "example.com/models".into(),
        const_blocks: vec![ConstBlock {
            specs: vec![
                ConstSpec {
                    type_name: Some("Color".into()),
                    names: vec!["ColorRed".into()],
                    ..ConstSpec::default()
                },
                ConstSpec {
                    names: vec!["ColorBlue".into()],
                    ..ConstSpec::default()
                },
                ConstSpec {
                    type_name: Some("Size".into()),
                    names: vec!["SizeSmall".into()],
                    ..ConstSpec::default()
                },
                ConstSpec {
                    names: vec!["SizeLarge".into()],
                    ..ConstSpec::default()
                },
            ],
        }],
        ..TypeGraph::default()
    };

    let result = transform(&[graph], &TransformOptions::default());
    let size = result.proto.enumeration("Size").unwrap();
    assert_eq!(size.values[0].name, "SIZE_SMALL");
    assert_eq!(size.values[0].number, 0);
    assert_eq!(size.values[1].number, 1);
}

#[test]
fn test_const_at_i64_max_transforms_without_panic() {
    let graph = TypeGraph {
        name: "limits".into(),
        path: "example.com/limits".into(),
        const_blocks: vec![ConstBlock {
            specs: vec![ConstSpec {
                type_name: Some("Code".into()),
                names: vec!["CodeA".into(), "CodeMax".into()],
                value: Some(i64::MAX - 1),
                ..ConstSpec::default()
            }],
        }],
        ..TypeGraph::default()
    };

    let result = transform(&[graph], &TransformOptions::default());
    let code = result.proto.enumeration("Code").unwrap();
    assert_eq!(code.values[0].number, i64::MAX - 1);
    assert_eq!(code.values[1].name, "CODE_MAX");
    assert_eq!(code.values[1].number, i64::MAX);
}

// ── Services ────────────────────────────────────────────────────────────────

#[test]
fn test_get_user_wraps_request_and_reuses_response() {
    let result = transform(&[models()], &TransformOptions::default());
    let service = result.proto.service("UserService").expect("UserService");

    let get_user = &service.methods[0];
    assert_eq!(get_user.name, "GetUser");
    assert_eq!(get_user.input_type, "GetUserRequest");
    assert_eq!(get_user.output_type, "User");

    let request = result.proto.message("GetUserRequest").unwrap();
    assert_eq!(request.fields.len(), 1);
    assert_eq!(request.fields[0].name, "id");
    assert_eq!(request.fields[0].ty, "string");
    assert_eq!(request.fields[0].number, 1);
    assert!(result.proto.message("GetUserResponse").is_none());
}

#[test]
fn test_empty_sides_use_well_known_empty() {
    let result = transform(&[models()], &TransformOptions::default());
    let ping = &result.proto.service("UserService").unwrap().methods[1];
    assert_eq!(ping.input_type, EMPTY_TYPE);
    assert_eq!(ping.output_type, EMPTY_TYPE);
    assert!(result.proto.imports.contains(&EMPTY_IMPORT.to_string()));
}

// ── Whole documents ─────────────────────────────────────────────────────────

#[test]
fn test_generate_is_deterministic() {
    let options = TransformOptions::default();
    let (first, _) = generate(&[models()], &options);
    let (second, _) = generate(&[models()], &options);
    assert_eq!(first, second);
}

#[test]
fn test_clean_input_has_no_warnings() {
    let result = transform(&[models()], &TransformOptions::default());
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_generate_renders_full_document() {
    let (text, warnings) = generate(&[models()], &TransformOptions::default());
    assert!(warnings.is_empty());

    let expected = "\
syntax = \"proto3\";

package acme.api.models;

option go_package = \"github.com/acme/api/models\";

import \"google/protobuf/empty.proto\";
import \"google/protobuf/timestamp.proto\";

// Status of an account.
enum Status {
  STATUS_ACTIVE = 0;
  STATUS_INACTIVE = 1;
  STATUS_BANNED = 2;
}

// User is an account holder.
message User {
  string id = 1;
  string email = 2;
  Status status = 3;
  google.protobuf.Timestamp created_at = 4;
}

message GetUserRequest {
  string id = 1;
}

service UserService {
  rpc GetUser(GetUserRequest) returns (User);
  rpc Ping(google.protobuf.Empty) returns (google.protobuf.Empty);
}
";
    assert_eq!(text, expected);
}

#[test]
fn test_json_fixture_matches_built_graph() {
    let json = include_str!("fixtures/models.json");
    let graphs = load_graphs(json).expect("fixture parses");
    assert_eq!(graphs.len(), 1);

    let from_json = generate(&graphs, &TransformOptions::default()).0;
    let built = generate(&[models()], &TransformOptions::default()).0;
    assert_eq!(from_json, built);
}
