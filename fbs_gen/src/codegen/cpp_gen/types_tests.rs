use super::*;
use crate::codegen::cpp::CppCodeGeneratorOptions;
use crate::codegen::cpp_gen::test_utils::{schema_from_yaml, MIXED_SCOPES};

fn enum_scalar(kind: ScalarKind, name: &str) -> TypeRef {
    TypeRef::Scalar { kind, enum_ref: Some(name.to_string()) }
}

fn plain(kind: ScalarKind) -> TypeRef {
    TypeRef::Scalar { kind, enum_ref: None }
}

#[test]
fn test_basic_spellings() {
    let schema = schema_from_yaml(MIXED_SCOPES);
    let options = CppCodeGeneratorOptions::default();
    let ctx = GenContext::new(&schema, &options);

    assert_eq!(gen_type_basic(&ctx, &plain(ScalarKind::Ushort), true), "uint16_t");
    assert_eq!(gen_type_basic(&ctx, &TypeRef::Bool, true), "bool");
    assert_eq!(gen_type_basic(&ctx, &TypeRef::Bool, false), "uint8_t");
    assert_eq!(gen_type_basic(&ctx, &enum_scalar(ScalarKind::Byte, "Game.Color"), true), "Color");
    assert_eq!(gen_type_basic(&ctx, &enum_scalar(ScalarKind::Byte, "Game.Color"), false), "int8_t");
    assert_eq!(gen_type_basic(&ctx, &enum_scalar(ScalarKind::Short, "Other.Remote"), true), "Other::Remote");
    assert_eq!(gen_type_basic(&ctx, &TypeRef::String, true), "flatbuffers::Offset<void>");
}

#[test]
fn test_wire_spellings() {
    let schema = schema_from_yaml(MIXED_SCOPES);
    let options = CppCodeGeneratorOptions::default();
    let ctx = GenContext::new(&schema, &options);

    let vec3 = TypeRef::Aggregate { target: "Other.Vec3".to_string(), fixed: true };
    let monster = TypeRef::Aggregate { target: "Game.Monster".to_string(), fixed: false };
    let strings = TypeRef::Vector { element: Box::new(TypeRef::String) };
    let structs = TypeRef::Vector { element: Box::new(vec3.clone()) };
    let colors = TypeRef::Vector { element: Box::new(enum_scalar(ScalarKind::Byte, "Game.Color")) };

    assert_eq!(gen_type_wire(&ctx, &plain(ScalarKind::Int), " ", true), "int32_t ");
    assert_eq!(gen_type_wire(&ctx, &vec3, " ", true), "const Other::Vec3 *");
    assert_eq!(gen_type_wire(&ctx, &monster, " ", true), "flatbuffers::Offset<Monster> ");
    assert_eq!(gen_type_wire(&ctx, &TypeRef::String, "", true), "flatbuffers::Offset<flatbuffers::String>");
    assert_eq!(
        gen_type_wire(&ctx, &strings, "", true),
        "flatbuffers::Offset<flatbuffers::Vector<flatbuffers::Offset<flatbuffers::String>>>"
    );
    assert_eq!(
        gen_type_wire(&ctx, &structs, "", true),
        "flatbuffers::Offset<flatbuffers::Vector<const Other::Vec3 *>>"
    );
    /* vector elements are always spelled by storage type */
    assert_eq!(gen_type_pointer(&ctx, &colors), "flatbuffers::Vector<int8_t>");
    assert_eq!(
        gen_type_wire(&ctx, &TypeRef::Union { tag_enum: "Game.Color".to_string() }, " ", true),
        "flatbuffers::Offset<void> "
    );
}

#[test]
fn test_size_spellings() {
    let schema = schema_from_yaml(MIXED_SCOPES);
    let options = CppCodeGeneratorOptions::default();
    let ctx = GenContext::new(&schema, &options);

    let vec3 = TypeRef::Aggregate { target: "Other.Vec3".to_string(), fixed: true };
    let monster = TypeRef::Aggregate { target: "Game.Monster".to_string(), fixed: false };

    assert_eq!(gen_type_size(&ctx, &plain(ScalarKind::Double)), "double");
    assert_eq!(gen_type_size(&ctx, &enum_scalar(ScalarKind::Byte, "Game.Color")), "int8_t");
    assert_eq!(gen_type_size(&ctx, &TypeRef::Bool), "uint8_t");
    assert_eq!(gen_type_size(&ctx, &vec3), "Other::Vec3");
    assert_eq!(gen_type_size(&ctx, &monster), UOFFSET_TYPE);
    assert_eq!(gen_type_size(&ctx, &TypeRef::String), UOFFSET_TYPE);
}

#[test]
fn test_get_spellings_and_casts() {
    let schema = schema_from_yaml(MIXED_SCOPES);
    let options = CppCodeGeneratorOptions::default();
    let ctx = GenContext::new(&schema, &options);

    let color = enum_scalar(ScalarKind::Byte, "Game.Color");
    assert_eq!(gen_type_get(&ctx, &color, " ", "const ", " *", true), "Color ");
    assert_eq!(gen_type_get(&ctx, &TypeRef::String, " ", "const ", " *", true), "const flatbuffers::String *");
    assert_eq!(gen_type_get(&ctx, &TypeRef::String, " ", "", " *", true), "flatbuffers::String *");

    assert_eq!(gen_underlying_cast(&ctx, &color, true, "v"), "static_cast<Color>(v)");
    assert_eq!(gen_underlying_cast(&ctx, &color, false, "v"), "static_cast<int8_t>(v)");
    assert_eq!(gen_underlying_cast(&ctx, &TypeRef::Bool, true, "v"), "static_cast<bool>(v)");
    assert_eq!(gen_underlying_cast(&ctx, &plain(ScalarKind::Int), true, "v"), "v");
    assert_eq!(gen_underlying_cast(&ctx, &TypeRef::String, true, "v"), "v");
}

#[test]
fn test_type_sizes() {
    assert_eq!(type_size(&plain(ScalarKind::Ulong)), 8);
    assert_eq!(type_size(&plain(ScalarKind::Float)), 4);
    assert_eq!(type_size(&TypeRef::Bool), 1);
    assert_eq!(type_size(&TypeRef::String), 4);
    assert_eq!(type_size(&TypeRef::Aggregate { target: "X".to_string(), fixed: true }), 4);
}
