use crate::model::resolved::{Schema, SchemaError};
use crate::model::types::SchemaFile;
use std::fs;
use std::path::Path;

/* Encodings accepted for the resolved schema document */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    /* Pick the format from a file extension */
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(SchemaFormat::Yaml),
            "json" => Ok(SchemaFormat::Json),
            _ => Err(SchemaError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/* Parse a schema document held in memory */
pub fn parse_schema_str(content: &str, format: SchemaFormat) -> Result<Schema, SchemaError> {
    let file: SchemaFile = match format {
        SchemaFormat::Yaml => serde_yml::from_str(content)?,
        SchemaFormat::Json => serde_json::from_str(content)?,
    };
    Schema::from_file(file)
}

/* Read and resolve a schema document from disk */
pub fn load_schema(path: &Path) -> Result<Schema, SchemaError> {
    let format = SchemaFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!("parsing {} as {:?}", path.display(), format);
    parse_schema_str(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::TypeRef;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SchemaFormat::from_path(Path::new("a/monster.yaml")).unwrap(), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("monster.YML")).unwrap(), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("monster.json")).unwrap(), SchemaFormat::Json);
        assert!(matches!(
            SchemaFormat::from_path(Path::new("monster.fbs")),
            Err(SchemaError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_yaml_type_refs() {
        let yaml = r#"
file-name: monster
aggregates:
  - name: Monster
    fixed: false
    fields:
      - name: name
        type: string
        slot: 4
      - name: inventory
        type:
          vector:
            element:
              scalar:
                kind: ubyte
        slot: 6
"#;
        let schema = parse_schema_str(yaml, SchemaFormat::Yaml).unwrap();
        let monster = schema.aggregate("Monster");
        assert_eq!(monster.fields[0].field_type, TypeRef::String);
        assert_eq!(monster.fields[0].default_value, "0");
        assert!(matches!(&monster.fields[1].field_type, TypeRef::Vector { element } if element.is_scalar()));
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{
  "file-name": "point",
  "aggregates": [
    { "name": "Point", "fixed": true, "byte-size": 8, "min-align": 4,
      "fields": [
        { "name": "x", "type": { "scalar": { "kind": "int" } } },
        { "name": "y", "type": { "scalar": { "kind": "int" } } }
      ] }
  ]
}"#;
        let schema = parse_schema_str(json, SchemaFormat::Json).unwrap();
        assert_eq!(schema.aggregate("Point").byte_size, 8);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_schema(Path::new("/nonexistent/schema.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/schema.yaml"));
    }
}
