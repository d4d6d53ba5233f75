/* Depends command - print make rules for the generated headers */

use super::common::{load_schemas, output_prefix};
use crate::codegen::cpp::make_rule;
use std::path::{Path, PathBuf};

/* One rule per schema, in command-line order */
pub fn rules(files: &[PathBuf], output_dir: &Path) -> anyhow::Result<Vec<String>> {
  let prefix = output_prefix(output_dir);
  let schemas = load_schemas(files, false)?;
  Ok(schemas.iter().map(|schema| make_rule(schema, &prefix)).collect())
}

/* Execute the depends command */
pub fn run(files: Vec<PathBuf>, output_dir: PathBuf) -> anyhow::Result<()> {
  for rule in rules(&files, &output_dir)? {
    println!("{}", rule);
  }
  Ok(())
}
