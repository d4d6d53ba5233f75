use super::context::GenContext;
use super::enums::get_enum_val;
use super::helpers::{field_offset_name, gen_comment, translate_namespace};
use super::scope::qualify;
use super::types::{
    LARGEST_SCALAR_SIZE, gen_type_basic, gen_type_get, gen_type_size, gen_type_wire, gen_underlying_cast,
    type_size,
};
use crate::model::types::{AggregateDecl, FieldDecl, TypeRef};

const VERIFY_PREFIX: &str = " &&\n           ";

/* Runtime accessor template used to read a field out of the table */
fn field_accessor(ty: &TypeRef) -> &'static str {
    match ty {
        TypeRef::Scalar { .. } | TypeRef::Bool => "GetField<",
        TypeRef::Aggregate { fixed: true, .. } => "GetStruct<",
        TypeRef::Aggregate { fixed: false, .. }
        | TypeRef::String
        | TypeRef::Vector { .. }
        | TypeRef::Union { .. } => "GetPointer<",
    }
}

fn live_fields(aggregate: &AggregateDecl) -> impl Iterator<Item = &FieldDecl> {
    aggregate.fields.iter().filter(|field| !field.deprecated)
}

fn gen_field_accessors(ctx: &GenContext, aggregate: &AggregateDecl, field: &FieldDecl) -> String {
    let ty = &field.field_type;
    let offset = field_offset_name(field);
    let accessor = field_accessor(ty);
    let mut output = gen_comment(&field.doc, "  ");

    let mut call = format!("{}{}>({}", accessor, gen_type_get(ctx, ty, "", "const ", " *", false), offset);
    if ty.is_scalar() {
        call.push_str(&format!(", {}", field.default_value));
    }
    call.push(')');
    output.push_str(&format!(
        "  {}{}() const {{ return {}; }}\n",
        gen_type_get(ctx, ty, " ", "const ", " *", true),
        field.name,
        gen_underlying_cast(ctx, ty, true, &call)
    ));

    if ctx.options.mutable_buffer {
        if ty.is_scalar() {
            output.push_str(&format!(
                "  bool mutate_{}({} _{}) {{ return SetField({}, {}); }}\n",
                field.name,
                gen_type_basic(ctx, ty, true),
                field.name,
                offset,
                gen_underlying_cast(ctx, ty, false, &format!("_{}", field.name))
            ));
        } else {
            let mutable_type = gen_type_get(ctx, ty, " ", "", " *", true);
            output.push_str(&format!(
                "  {}mutable_{}() {{ return {}; }}\n",
                mutable_type,
                field.name,
                gen_underlying_cast(ctx, ty, true, &format!("{}{}>({})", accessor, mutable_type, offset))
            ));
        }
    }

    if let Some(nested) = &field.nested_root {
        let qualified_name = translate_namespace(&ctx.schema.active_namespace_decl().fully_qualified_name(nested));
        output.push_str(&format!(
            "  const {} *{}_nested_root() const {{ return flatbuffers::GetRoot<{}>({}()->Data()); }}\n",
            qualified_name, field.name, qualified_name, field.name
        ));
    }

    if field.key {
        output.push_str(&gen_key_compare(ctx, aggregate, field));
    }
    output
}

/* Ordering helpers used by the runtime's binary search over sorted vectors */
fn gen_key_compare(ctx: &GenContext, aggregate: &AggregateDecl, field: &FieldDecl) -> String {
    let ty = &field.field_type;
    let name = &field.name;
    match ty {
        TypeRef::String => {
            let mut output = format!(
                "  bool KeyCompareLessThan(const {} *o) const {{ return *{}() < *o->{}(); }}\n",
                aggregate.name, name, name
            );
            output.push_str(&format!(
                "  int KeyCompareWithValue(const char *val) const {{ return strcmp({}()->c_str(), val); }}\n",
                name
            ));
            output
        }
        TypeRef::Scalar { .. }
        | TypeRef::Bool
        | TypeRef::Vector { .. }
        | TypeRef::Aggregate { .. }
        | TypeRef::Union { .. } => {
            let value_type = if ctx.options.scoped_enums && ty.scalar_enum().is_some() {
                gen_type_get(ctx, ty, " ", "const ", " *", true)
            } else {
                format!("{} ", gen_type_basic(ctx, ty, false))
            };
            let mut output = format!(
                "  bool KeyCompareLessThan(const {} *o) const {{ return {}() < o->{}(); }}\n",
                aggregate.name, name, name
            );
            output.push_str(&format!(
                "  int KeyCompareWithValue({}val) const {{ return {}() < val ? -1 : {}() > val; }}\n",
                value_type, name, name
            ));
            output
        }
    }
}

/* Type-specific checks that follow the bounds check of a field */
fn gen_field_verification(ctx: &GenContext, field: &FieldDecl) -> String {
    let name = &field.name;
    match &field.field_type {
        TypeRef::Union { tag_enum } => {
            let enum_decl = ctx.schema.enum_decl(tag_enum);
            format!(
                "{}{}(verifier, {}(), {}_type())",
                VERIFY_PREFIX,
                qualify(ctx, enum_decl.namespace, &format!("Verify{}", enum_decl.name)),
                name,
                name
            )
        }
        TypeRef::Aggregate { fixed: false, .. } => format!("{}verifier.VerifyTable({}())", VERIFY_PREFIX, name),
        TypeRef::String => format!("{}verifier.Verify({}())", VERIFY_PREFIX, name),
        TypeRef::Vector { element } => {
            let mut output = format!("{}verifier.Verify({}())", VERIFY_PREFIX, name);
            match element.as_ref() {
                TypeRef::String => {
                    output.push_str(&format!("{}verifier.VerifyVectorOfStrings({}())", VERIFY_PREFIX, name));
                }
                TypeRef::Aggregate { fixed: false, .. } => {
                    output.push_str(&format!("{}verifier.VerifyVectorOfTables({}())", VERIFY_PREFIX, name));
                }
                TypeRef::Aggregate { fixed: true, .. }
                | TypeRef::Scalar { .. }
                | TypeRef::Bool
                | TypeRef::Vector { .. }
                | TypeRef::Union { .. } => {}
            }
            output
        }
        TypeRef::Aggregate { fixed: true, .. } | TypeRef::Scalar { .. } | TypeRef::Bool => String::new(),
    }
}

fn gen_verifier(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    let mut output = String::from("  bool Verify(flatbuffers::Verifier &verifier) const {\n");
    output.push_str("    return VerifyTableStart(verifier)");
    for field in live_fields(aggregate) {
        output.push_str(&format!(
            "{}VerifyField{}<{}>(verifier, {})",
            VERIFY_PREFIX,
            if field.required { "Required" } else { "" },
            gen_type_size(ctx, &field.field_type),
            field_offset_name(field)
        ));
        output.push_str(&gen_field_verification(ctx, field));
    }
    output.push_str(VERIFY_PREFIX);
    output.push_str("verifier.EndTable();\n  }\n");
    output
}

fn gen_view(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    let mut output = gen_comment(&aggregate.doc, "");
    output.push_str(&format!(
        "struct {} FLATBUFFERS_FINAL_CLASS : private flatbuffers::Table {{\n",
        aggregate.name
    ));

    /* Slot ids stay stable across schema versions, so deprecated fields only drop their constant */
    output.push_str("  enum {\n");
    for field in live_fields(aggregate) {
        output.push_str(&format!("    {} = {},\n", field_offset_name(field), field.slot));
    }
    output.push_str("  };\n");

    for field in live_fields(aggregate) {
        output.push_str(&gen_field_accessors(ctx, aggregate, field));
    }
    output.push_str(&gen_verifier(ctx, aggregate));
    output.push_str("};\n\n");
    output
}

fn gen_builder(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    let name = &aggregate.name;
    let mut output = format!(
        "struct {}Builder {{\n  flatbuffers::FlatBufferBuilder &fbb_;\n  flatbuffers::uoffset_t start_;\n",
        name
    );

    for field in live_fields(aggregate) {
        let ty = &field.field_type;
        let add = match ty {
            TypeRef::Scalar { .. } | TypeRef::Bool => format!("Element<{}>", gen_type_wire(ctx, ty, "", false)),
            TypeRef::Aggregate { fixed: true, .. } => "Struct".to_string(),
            TypeRef::Aggregate { fixed: false, .. }
            | TypeRef::String
            | TypeRef::Vector { .. }
            | TypeRef::Union { .. } => "Offset".to_string(),
        };
        let mut args = format!(
            "{}::{}, {}",
            name,
            field_offset_name(field),
            gen_underlying_cast(ctx, ty, false, &field.name)
        );
        if ty.is_scalar() {
            args.push_str(&format!(", {}", field.default_value));
        }
        output.push_str(&format!(
            "  void add_{}({}{}) {{ fbb_.Add{}({}); }}\n",
            field.name,
            gen_type_wire(ctx, ty, " ", true),
            field.name,
            add,
            args
        ));
    }

    output.push_str(&format!(
        "  {}Builder(flatbuffers::FlatBufferBuilder &_fbb) : fbb_(_fbb) {{ start_ = fbb_.StartTable(); }}\n",
        name
    ));
    output.push_str(&format!("  {}Builder &operator=(const {}Builder &);\n", name, name));
    output.push_str(&format!(
        "  flatbuffers::Offset<{}> Finish() {{\n    auto o = flatbuffers::Offset<{}>(fbb_.EndTable(start_, {}));\n",
        name,
        name,
        aggregate.fields.len()
    ));
    for field in live_fields(aggregate).filter(|field| field.required) {
        output.push_str(&format!(
            "    fbb_.Required(o, {}::{});  // {}\n",
            name,
            field_offset_name(field),
            field.name
        ));
    }
    output.push_str("    return o;\n  }\n};\n\n");
    output
}

/* Default argument of a one-shot create parameter */
fn gen_create_default(ctx: &GenContext, field: &FieldDecl) -> String {
    let ty = &field.field_type;
    if let Some(enum_name) = ty.scalar_enum() {
        let enum_decl = ctx.schema.enum_decl(enum_name);
        let matching = field
            .default_value
            .parse::<i64>()
            .ok()
            .and_then(|value| enum_decl.values.iter().find(|v| v.value == value));
        return match matching {
            Some(enum_val) => qualify(ctx, enum_decl.namespace, &get_enum_val(ctx, enum_decl, enum_val)),
            None => gen_underlying_cast(ctx, ty, true, &field.default_value),
        };
    }
    match ty {
        TypeRef::Bool => {
            if field.default_value == "0" {
                "false".to_string()
            } else {
                "true".to_string()
            }
        }
        TypeRef::Scalar { .. }
        | TypeRef::String
        | TypeRef::Vector { .. }
        | TypeRef::Aggregate { .. }
        | TypeRef::Union { .. } => field.default_value.clone(),
    }
}

/* Order in which the one-shot create function calls the setters. Fields are
 * added last-first; with sort_by_size the widest ones go in first so the
 * builder packs them without interior padding. */
pub fn create_order(aggregate: &AggregateDecl) -> Vec<&FieldDecl> {
    let widths: Vec<Option<usize>> = if aggregate.sort_by_size {
        let mut widths = Vec::new();
        let mut size = LARGEST_SCALAR_SIZE;
        while size > 0 {
            widths.push(Some(size));
            size /= 2;
        }
        widths
    } else {
        vec![None]
    };

    let mut order = Vec::new();
    for width in widths {
        for field in aggregate.fields.iter().rev() {
            if field.deprecated {
                continue;
            }
            if width.is_none_or(|size| type_size(&field.field_type) == size) {
                order.push(field);
            }
        }
    }
    order
}

fn gen_create(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    let name = &aggregate.name;
    let mut output = format!(
        "inline flatbuffers::Offset<{}> Create{}(flatbuffers::FlatBufferBuilder &_fbb",
        name, name
    );
    for field in live_fields(aggregate) {
        output.push_str(&format!(
            ",\n   {}{} = {}",
            gen_type_wire(ctx, &field.field_type, " ", true),
            field.name,
            gen_create_default(ctx, field)
        ));
    }
    output.push_str(&format!(") {{\n  {}Builder builder_(_fbb);\n", name));
    for field in create_order(aggregate) {
        output.push_str(&format!("  builder_.add_{}({});\n", field.name, field.name));
    }
    output.push_str("  return builder_.Finish();\n}\n\n");
    output
}

/* Generate the read view, the incremental builder and the one-shot create function of a table */
pub fn emit_table(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    tracing::debug!("emitting table {}", aggregate.name);

    let mut output = gen_view(ctx, aggregate);
    output.push_str(&gen_builder(ctx, aggregate));
    output.push_str(&gen_create(ctx, aggregate));
    output
}

#[cfg(test)]
#[path = "tables_tests.rs"]
mod tables_tests;
