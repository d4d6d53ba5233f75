use crate::model::file::{parse_schema_str, SchemaFormat};
use crate::model::resolved::Schema;

/* Parse an inline YAML schema, panicking with the loader error on failure */
pub fn schema_from_yaml(yaml: &str) -> Schema {
    parse_schema_str(yaml, SchemaFormat::Yaml).unwrap_or_else(|e| panic!("test schema: {}", e))
}

/* Two scopes, an enum, a struct and a table, shared by the type mapper tests */
pub const MIXED_SCOPES: &str = r#"
file-name: mixed
namespaces:
  - [Other]
  - [Game]
enums:
  - name: Color
    namespace: 1
    underlying: byte
    values:
      - { name: Red, value: 0 }
      - { name: Blue, value: 2 }
  - name: Remote
    namespace: 0
    underlying: short
    values:
      - { name: A, value: 0 }
aggregates:
  - name: Vec3
    namespace: 0
    fixed: true
    byte-size: 12
    min-align: 4
    fields:
      - { name: x, type: { scalar: { kind: float } } }
      - { name: y, type: { scalar: { kind: float } } }
      - { name: z, type: { scalar: { kind: float } } }
  - name: Monster
    namespace: 1
    fixed: false
    fields:
      - { name: name, type: string, slot: 4 }
"#;
