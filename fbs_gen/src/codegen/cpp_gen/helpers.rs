use crate::model::types::FieldDecl;

/* Emit doc comment lines, each already stripped of its leading "///" */
pub fn gen_comment(doc: &[String], prefix: &str) -> String {
    let mut output = String::new();
    for line in doc {
        output.push_str(&format!("{}///{}\n", prefix, line));
    }
    output
}

/* Name of the slot-id constant for a table field (e.g. "VT_HP") */
pub fn field_offset_name(field: &FieldDecl) -> String {
    format!("VT_{}", field.name.to_uppercase())
}

/* Widths in bits of the padding members implied by a 4-bit mask, low bit first */
pub fn padding_widths(mask: u8) -> Vec<u32> {
    debug_assert!(mask & !0xF == 0, "padding mask {:#x} wider than 4 bits", mask);
    (0..4).filter(|i| mask & (1 << i) != 0).map(|i| 8u32 << i).collect()
}

/* Translate a dotted schema name into a C++ qualified name */
pub fn translate_namespace(qualified_name: &str) -> String {
    qualified_name.replace('.', "::")
}
