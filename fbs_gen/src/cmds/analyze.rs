/* Analyze command - per-schema report of what the generator will emit */

use super::common::load_schemas;
use crate::codegen::cpp::CppCodeGeneratorOptions;
use crate::codegen::cpp_gen::enums::has_name_table;
use crate::codegen::cpp_gen::{plan_forward_declarations, GenContext};
use crate::model::resolved::Schema;
use crate::model::types::{FieldDecl, NamespaceId};
use std::fmt::Write;
use std::path::PathBuf;

/* Execute the analyze command */
pub fn run(files: Vec<PathBuf>, max_sparseness: i64) -> anyhow::Result<()> {
  println!("Schema Compiler - Model Analysis Tool");
  println!("====================================\n");

  let schemas = load_schemas(&files, true)?;
  let options = CppCodeGeneratorOptions { max_sparseness, ..Default::default() };
  for schema in &schemas {
    println!();
    print!("{}", report(schema, &options));
  }
  Ok(())
}

fn namespace_label(schema: &Schema, id: NamespaceId) -> String {
  let components = &schema.namespace(id).components;
  if components.is_empty() { "<root>".to_string() } else { components.join(".") }
}

/* Render the analysis report of one schema */
pub fn report(schema: &Schema, options: &CppCodeGeneratorOptions) -> String {
  let mut out = String::new();
  let ctx = GenContext::new(schema, options);

  writeln!(out, "[~] Schema '{}'", schema.file_name).unwrap();
  writeln!(out, "  Namespaces: {}", schema.namespaces.len()).unwrap();
  for index in 0..schema.namespaces.len() {
    let id = NamespaceId(index);
    let marker = if id == schema.active_namespace() { " (active)" } else { "" };
    writeln!(out, "    #{} {}{}", index, namespace_label(schema, id), marker).unwrap();
  }

  writeln!(out, "  Enums: {}", schema.enums.len()).unwrap();
  for (key, enum_decl) in &schema.enums {
    writeln!(
      out,
      "    - {}: {} values, name table: {}{}{}",
      key,
      enum_decl.values.len(),
      if has_name_table(enum_decl, options.max_sparseness) { "yes" } else { "no" },
      if enum_decl.is_union { ", union" } else { "" },
      if enum_decl.generated { ", already generated" } else { "" },
    )
    .unwrap();
  }

  writeln!(out, "  Aggregates: {}", schema.aggregates.len()).unwrap();
  for (key, aggregate) in &schema.aggregates {
    let count = |pred: fn(&FieldDecl) -> bool| aggregate.fields.iter().filter(|f| pred(f)).count();
    if aggregate.fixed {
      writeln!(
        out,
        "    - {}: struct, size {}, align {}, {} fields{}",
        key,
        aggregate.byte_size,
        aggregate.min_align,
        aggregate.fields.len(),
        if aggregate.generated { ", already generated" } else { "" },
      )
      .unwrap();
    } else {
      writeln!(
        out,
        "    - {}: table, {} fields ({} deprecated, {} required, {} key){}{}",
        key,
        aggregate.fields.len(),
        count(|f| f.deprecated),
        count(|f| f.required),
        count(|f| f.key),
        if aggregate.sort_by_size { ", sorted by size" } else { "" },
        if aggregate.generated { ", already generated" } else { "" },
      )
      .unwrap();
    }
  }

  let forward = plan_forward_declarations(&ctx);
  writeln!(
    out,
    "  Forward declarations: {} in active scope, {} other-scope block(s)",
    forward.active_scope.lines().count(),
    forward.blocks
  )
  .unwrap();

  match schema.root_aggregate() {
    Some(root) => {
      let mut helpers = vec![format!("Get{}", root.name), format!("Verify{}Buffer", root.name)];
      if schema.file_identifier.is_some() {
        helpers.push(format!("{}Identifier", root.name));
        helpers.push(format!("{}BufferHasIdentifier", root.name));
      }
      if schema.file_extension.is_some() {
        helpers.push(format!("{}Extension", root.name));
      }
      helpers.push(format!("Finish{}Buffer", root.name));
      writeln!(out, "  Root type: {} ({})", root.name, helpers.join(", ")).unwrap();
    }
    None => {
      writeln!(out, "  Root type: none").unwrap();
    }
  }

  out
}
