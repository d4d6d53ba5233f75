/* Common utilities shared between the analyze, codegen and depends commands */

use crate::model::file::load_schema;
use crate::model::resolved::Schema;
use anyhow::Context;
use std::path::{Path, PathBuf};

/* Load every schema model, in command-line order */
pub fn load_schemas(files: &[PathBuf], verbose: bool) -> anyhow::Result<Vec<Schema>> {
  if verbose {
    println!("[~] Loading {} schema file(s)...", files.len());
  }

  let mut schemas = Vec::with_capacity(files.len());
  for file in files {
    let schema = load_schema(file).with_context(|| format!("failed to load schema model {}", file.display()))?;
    if verbose {
      println!(
        "    - {} ({} enums, {} aggregates)",
        file.display(),
        schema.enums.len(),
        schema.aggregates.len()
      );
    }
    schemas.push(schema);
  }
  Ok(schemas)
}

/* Directory prefix for generated file names, always ending in a separator */
pub fn output_prefix(output_dir: &Path) -> String {
  let mut prefix = output_dir.display().to_string();
  if !prefix.is_empty() && !prefix.ends_with(std::path::MAIN_SEPARATOR) && !prefix.ends_with('/') {
    prefix.push(std::path::MAIN_SEPARATOR);
  }
  prefix
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn test_output_prefix_adds_separator() {
    let prefix = output_prefix(Path::new("out"));
    assert_eq!(prefix, format!("out{}", std::path::MAIN_SEPARATOR));
    assert_eq!(output_prefix(Path::new("out/")), "out/");
    assert_eq!(output_prefix(Path::new("")), "");
  }

  #[test]
  fn test_load_schemas_reports_failing_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.yaml");
    let bad = dir.path().join("bad.yaml");
    fs::write(&good, "file-name: good\n").unwrap();
    fs::write(&bad, "file-name: bad\nroot-type: Missing\n").unwrap();

    let schemas = load_schemas(&[good.clone()], false).unwrap();
    assert_eq!(schemas[0].file_name, "good");

    let err = load_schemas(&[good, bad.clone()], false).unwrap_err();
    assert!(format!("{:#}", err).contains(&bad.display().to_string()));
    assert!(format!("{:#}", err).contains("Missing"));
  }
}
