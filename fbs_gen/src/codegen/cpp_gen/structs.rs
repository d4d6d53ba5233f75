use super::context::GenContext;
use super::helpers::{gen_comment, padding_widths};
use super::types::{gen_type_basic, gen_type_get, gen_underlying_cast};
use crate::model::types::{AggregateDecl, FieldDecl};

/* Padding members of one field, numbered from `next_id` */
fn padding_members(field: &FieldDecl, next_id: &mut usize) -> Vec<(u32, usize)> {
    padding_widths(field.padding)
        .into_iter()
        .map(|bits| {
            let id = *next_id;
            *next_id += 1;
            (bits, id)
        })
        .collect()
}

fn gen_storage(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    let mut output = String::new();
    let mut padding_id = 0;
    for field in &aggregate.fields {
        output.push_str(&format!(
            "  {}{}_;\n",
            gen_type_get(ctx, &field.field_type, " ", "", " ", false),
            field.name
        ));
        for (bits, id) in padding_members(field, &mut padding_id) {
            output.push_str(&format!("  int{}_t __padding{};\n", bits, id));
        }
    }
    output
}

fn gen_constructor(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    let params: Vec<String> = aggregate
        .fields
        .iter()
        .map(|field| {
            format!(
                "{}_{}",
                gen_type_get(ctx, &field.field_type, " ", "const ", " &", true),
                field.name
            )
        })
        .collect();

    let mut padding_id = 0;
    let mut voided = String::new();
    let initializers: Vec<String> = aggregate
        .fields
        .iter()
        .map(|field| {
            let arg = format!("_{}", field.name);
            let mut init = if field.field_type.is_scalar() {
                format!(
                    "{}_(flatbuffers::EndianScalar({}))",
                    field.name,
                    gen_underlying_cast(ctx, &field.field_type, false, &arg)
                )
            } else {
                format!("{}_({})", field.name, arg)
            };
            for (_, id) in padding_members(field, &mut padding_id) {
                init.push_str(&format!(", __padding{}(0)", id));
                voided.push_str(&format!(" (void)__padding{};", id));
            }
            init
        })
        .collect();

    format!(
        "  {}({})\n    : {} {{{} }}\n\n",
        aggregate.name,
        params.join(", "),
        initializers.join(", "),
        voided
    )
}

fn gen_accessors(ctx: &GenContext, field: &FieldDecl) -> String {
    let ty = &field.field_type;
    let is_scalar = ty.is_scalar();
    let mut output = gen_comment(&field.doc, "  ");

    let stored = if is_scalar {
        format!("flatbuffers::EndianScalar({}_)", field.name)
    } else {
        format!("{}_", field.name)
    };
    output.push_str(&format!(
        "  {}{}() const {{ return {}; }}\n",
        gen_type_get(ctx, ty, " ", "const ", " &", true),
        field.name,
        gen_underlying_cast(ctx, ty, true, &stored)
    ));

    if ctx.options.mutable_buffer {
        if is_scalar {
            output.push_str(&format!(
                "  void mutate_{}({} _{}) {{ flatbuffers::WriteScalar(&{}_, {}); }}\n",
                field.name,
                gen_type_basic(ctx, ty, true),
                field.name,
                field.name,
                gen_underlying_cast(ctx, ty, false, &format!("_{}", field.name))
            ));
        } else {
            output.push_str(&format!(
                "  {}mutable_{}() {{ return {}_; }}\n",
                gen_type_get(ctx, ty, "", "", " &", true),
                field.name,
                field.name
            ));
        }
    }
    output
}

/* Generate a fixed-layout struct. Members are private because they hold
 * little-endian data on every platform; accessors convert on the way out. */
pub fn emit_struct(ctx: &GenContext, aggregate: &AggregateDecl) -> String {
    tracing::debug!("emitting struct {}", aggregate.name);

    let mut output = gen_comment(&aggregate.doc, "");
    output.push_str(&format!(
        "MANUALLY_ALIGNED_STRUCT({}) {} FLATBUFFERS_FINAL_CLASS {{\n private:\n",
        aggregate.min_align, aggregate.name
    ));
    output.push_str(&gen_storage(ctx, aggregate));

    output.push_str("\n public:\n");
    output.push_str(&gen_constructor(ctx, aggregate));

    for field in &aggregate.fields {
        output.push_str(&gen_accessors(ctx, field));
    }

    output.push_str(&format!(
        "}};\nSTRUCT_END({}, {});\n\n",
        aggregate.name, aggregate.byte_size
    ));
    output
}
