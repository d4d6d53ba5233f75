use super::context::GenContext;
use super::helpers::gen_comment;
use super::scope::qualify;
use super::types::scalar_to_c_type;
use crate::model::types::{EnumDecl, EnumVal};

/* Average distance between enum values above which no name table is emitted */
pub const DEFAULT_MAX_SPARSENESS: i64 = 5;

/* Output of the enum emitter. The dispatcher body is deferred by the assembler
 * until every aggregate it may cast to has been declared. */
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnumFragment {
    pub declaration: String,
    pub dispatcher_body: Option<String>,
}

fn gen_enum_decl(ctx: &GenContext, enum_decl: &EnumDecl) -> String {
    if ctx.options.scoped_enums {
        format!(
            "enum class {} : {}",
            enum_decl.name,
            scalar_to_c_type(enum_decl.underlying)
        )
    } else {
        format!("enum {}", enum_decl.name)
    }
}

/* Entry name as written in the enum body */
pub fn gen_enum_val(ctx: &GenContext, enum_decl: &EnumDecl, enum_val: &EnumVal) -> String {
    if ctx.options.prefixed_enums {
        format!("{}_{}", enum_decl.name, enum_val.name)
    } else {
        enum_val.name.clone()
    }
}

/* Entry name as referenced from code emitted next to the enum */
pub fn get_enum_val(ctx: &GenContext, enum_decl: &EnumDecl, enum_val: &EnumVal) -> String {
    if ctx.options.scoped_enums {
        format!("{}::{}", enum_decl.name, gen_enum_val(ctx, enum_decl, enum_val))
    } else {
        gen_enum_val(ctx, enum_decl, enum_val)
    }
}

/* Whether the value range is dense enough for a direct-indexed name table */
pub fn has_name_table(enum_decl: &EnumDecl, max_sparseness: i64) -> bool {
    let (Some(first), Some(last)) = (enum_decl.values.first(), enum_decl.values.last()) else {
        return false;
    };
    let range = last.value as i128 - first.value as i128 + 1;
    range / (enum_decl.values.len() as i128) < max_sparseness as i128
}

fn gen_name_table(ctx: &GenContext, enum_decl: &EnumDecl) -> String {
    let name = &enum_decl.name;
    let mut output = format!("inline const char **EnumNames{}() {{\n", name);
    output.push_str("  static const char *names[] = { ");

    /* Gaps between consecutive values get empty placeholders */
    let first = &enum_decl.values[0];
    let mut next = first.value;
    for enum_val in &enum_decl.values {
        while next < enum_val.value {
            output.push_str("\"\", ");
            next += 1;
        }
        output.push_str(&format!("\"{}\", ", enum_val.name));
        next = enum_val.value.saturating_add(1);
    }
    output.push_str("nullptr };\n  return names;\n}\n\n");

    output.push_str(&format!(
        "inline const char *EnumName{}({} e) {{ return EnumNames{}()[static_cast<int>(e)",
        name, name, name
    ));
    if first.value != 0 {
        output.push_str(&format!(
            " - static_cast<int>({})",
            get_enum_val(ctx, enum_decl, first)
        ));
    }
    output.push_str("]; }\n\n");
    output
}

fn dispatcher_signature(enum_decl: &EnumDecl) -> String {
    format!(
        "inline bool Verify{}(flatbuffers::Verifier &verifier, const void *union_obj, {} type)",
        enum_decl.name, enum_decl.name
    )
}

/* Switch routing a union payload to its table verifier. A discriminant outside
 * the declared set fails, so a corrupted type byte cannot select a verifier. */
fn gen_dispatcher_body(ctx: &GenContext, enum_decl: &EnumDecl) -> String {
    let mut output = format!("{} {{\n  switch (type) {{\n", dispatcher_signature(enum_decl));
    for (index, enum_val) in enum_decl.values.iter().enumerate() {
        output.push_str(&format!("    case {}", get_enum_val(ctx, enum_decl, enum_val)));
        if index == 0 {
            output.push_str(": return true;\n");
            continue;
        }
        let target = enum_val.union_type.as_deref().unwrap_or_else(|| {
            panic!("union value {}.{} has no payload type", enum_decl.name, enum_val.name)
        });
        let aggregate = ctx.schema.aggregate(target);
        output.push_str(&format!(
            ": return verifier.VerifyTable(reinterpret_cast<const {} *>(union_obj));\n",
            qualify(ctx, aggregate.namespace, &aggregate.name)
        ));
    }
    output.push_str("    default: return false;\n  }\n}\n\n");
    output
}

/* Generate an enum declaration, its name table and, for unions, the verifier dispatcher */
pub fn emit_enum(ctx: &GenContext, enum_decl: &EnumDecl) -> EnumFragment {
    tracing::debug!("emitting enum {}", enum_decl.name);

    let mut output = gen_comment(&enum_decl.doc, "");
    output.push_str(&gen_enum_decl(ctx, enum_decl));
    output.push_str(" {\n");
    let count = enum_decl.values.len();
    for (index, enum_val) in enum_decl.values.iter().enumerate() {
        output.push_str(&gen_comment(&enum_val.doc, "  "));
        output.push_str(&format!(
            "  {} = {}",
            gen_enum_val(ctx, enum_decl, enum_val),
            enum_val.value
        ));
        output.push_str(if index + 1 != count { ",\n" } else { "\n" });
    }
    output.push_str("};\n\n");

    if has_name_table(enum_decl, ctx.options.max_sparseness) {
        output.push_str(&gen_name_table(ctx, enum_decl));
    }

    let mut dispatcher_body = None;
    if enum_decl.is_union {
        output.push_str(&dispatcher_signature(enum_decl));
        output.push_str(";\n\n");
        dispatcher_body = Some(gen_dispatcher_body(ctx, enum_decl));
    }

    EnumFragment {
        declaration: output,
        dispatcher_body,
    }
}

#[cfg(test)]
#[path = "enums_tests.rs"]
mod enums_tests;
