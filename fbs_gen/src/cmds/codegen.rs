/* Codegen command - generate C++ headers from resolved schema models */

use super::common::load_schemas;
use crate::codegen::cpp::{CppCodeGenerator, CppCodeGeneratorOptions};
use anyhow::Context;
use std::path::PathBuf;

/* Execute the codegen command, returning the headers that were written */
pub fn run(
  files: Vec<PathBuf>,
  output_dir: PathBuf,
  options: CppCodeGeneratorOptions,
  verbose: bool,
) -> anyhow::Result<Vec<PathBuf>> {
  if verbose {
    println!("Schema Compiler - C++ Code Generation");
    println!("=====================================\n");
    println!("[~] Configuration:");
    println!("  Output directory: {}", output_dir.display());
    println!("  Mutable buffer: {}", options.mutable_buffer);
    println!("  Scoped enums: {}", options.scoped_enums);
    println!("  Prefixed enums: {}", options.prefixed_enums);
    println!("  Dependence headers: {}", options.include_dependence_headers);
    println!("  Input files: {}", files.len());
    for file in &files {
      println!("    - {}", file.display());
    }
    println!();
  }

  let schemas = load_schemas(&files, verbose)?;

  std::fs::create_dir_all(&output_dir)
    .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

  let generator = CppCodeGenerator::new(options);
  let mut written = Vec::new();
  for schema in &schemas {
    if verbose {
      println!("[~] Generating code for '{}'", schema.file_name);
    }
    match generator.write(schema, &output_dir)? {
      Some(path) => {
        if verbose {
          println!("[✓] Generated {}", path.display());
        }
        written.push(path);
      }
      None => {
        if verbose {
          println!("[~] Nothing to generate for '{}'", schema.file_name);
        }
      }
    }
  }

  println!("[✓] Code generation complete!");
  Ok(written)
}
