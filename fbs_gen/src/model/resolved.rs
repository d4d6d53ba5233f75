use crate::model::types::{AggregateDecl, DeclName, EnumDecl, FieldDecl, NamespaceId, SchemaFile, TypeRef};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
  pub components: Vec<String>,
}

impl Namespace {
  pub fn new(components: Vec<String>) -> Self {
    Self { components }
  }

  // Names that already carry a dot are taken as fully qualified
  pub fn fully_qualified_name(&self, name: &str) -> String {
    if self.components.is_empty() || name.contains('.') {
      return name.to_string();
    }
    format!("{}.{}", self.components.join("."), name)
  }
}

#[derive(Debug, Error)]
pub enum SchemaError {
  #[error("failed to read schema {path}: {source}")]
  Io { path: String, source: std::io::Error },
  #[error("failed to parse YAML schema: {0}")]
  Yaml(#[from] serde_yml::Error),
  #[error("failed to parse JSON schema: {0}")]
  Json(#[from] serde_json::Error),
  #[error("unsupported schema format '{0}' (expected .yaml, .yml or .json)")]
  UnsupportedFormat(String),
  #[error("'{owner}' references unknown enum '{name}'")]
  UnknownEnum { owner: String, name: String },
  #[error("'{owner}' references unknown aggregate '{name}'")]
  UnknownAggregate { owner: String, name: String },
  #[error("'{owner}' uses namespace #{id} but only {count} namespaces are declared")]
  NamespaceOutOfRange { owner: String, id: usize, count: usize },
  #[error("'{owner}' references '{name}' as fixed={expected} but it is declared fixed={actual}")]
  FixedMismatch { owner: String, name: String, expected: bool, actual: bool },
  #[error("root type '{0}' is not a declared aggregate")]
  UnknownRootType(String),
  #[error("'{0}' is declared more than once")]
  DuplicateDeclaration(String),
  #[error("union value '{0}' does not name the aggregate it selects")]
  MissingUnionType(String),
}

// Immutable, reference-checked view of one schema file. Declarations live in
// arenas keyed by qualified name and keep declaration order.
#[derive(Debug, Clone)]
pub struct Schema {
  pub file_name: String,
  pub source_file: Option<String>,
  pub namespaces: Vec<Namespace>,
  pub enums: IndexMap<DeclName, EnumDecl>,
  pub aggregates: IndexMap<DeclName, AggregateDecl>,
  pub root_type: Option<DeclName>,
  pub file_identifier: Option<String>,
  pub file_extension: Option<String>,
  pub included_files: Vec<String>,
}

impl Schema {
  pub fn from_file(file: SchemaFile) -> Result<Self, SchemaError> {
    let mut namespaces: Vec<Namespace> = file.namespaces.into_iter().map(Namespace::new).collect();
    if namespaces.is_empty() {
      // Declarations outside any namespace statement live in the root scope
      namespaces.push(Namespace::new(Vec::new()));
    }

    let mut schema = Schema {
      file_name: file.file_name,
      source_file: file.source_file,
      namespaces,
      enums: IndexMap::new(),
      aggregates: IndexMap::new(),
      root_type: None,
      file_identifier: file.file_identifier.filter(|s| !s.is_empty()),
      file_extension: file.file_extension.filter(|s| !s.is_empty()),
      included_files: file.included_files,
    };

    for enum_decl in file.enums {
      let key = schema.checked_qualified_name(enum_decl.namespace, &enum_decl.name)?;
      if schema.enums.contains_key(&key) {
        return Err(SchemaError::DuplicateDeclaration(key));
      }
      schema.enums.insert(key, enum_decl);
    }

    for aggregate in file.aggregates {
      let key = schema.checked_qualified_name(aggregate.namespace, &aggregate.name)?;
      if schema.aggregates.contains_key(&key) {
        return Err(SchemaError::DuplicateDeclaration(key));
      }
      schema.aggregates.insert(key, aggregate);
    }

    if let Some(root) = file.root_type {
      let key = schema.active_namespace_decl().fully_qualified_name(&root);
      if !schema.aggregates.contains_key(&key) {
        return Err(SchemaError::UnknownRootType(root));
      }
      schema.root_type = Some(key);
    }

    schema.check_references()?;
    Ok(schema)
  }

  // The scope the generated file is emitted into
  pub fn active_namespace(&self) -> NamespaceId {
    NamespaceId(self.namespaces.len() - 1)
  }

  pub fn active_namespace_decl(&self) -> &Namespace {
    self.namespace(self.active_namespace())
  }

  pub fn namespace(&self, id: NamespaceId) -> &Namespace {
    &self.namespaces[id.0]
  }

  pub fn qualified_name(&self, id: NamespaceId, name: &str) -> DeclName {
    self.namespace(id).fully_qualified_name(name)
  }

  // Lookups below only fail on a model that bypassed `from_file`
  pub fn enum_decl(&self, name: &str) -> &EnumDecl {
    self.enums.get(name).unwrap_or_else(|| panic!("schema model references undeclared enum '{}'", name))
  }

  pub fn aggregate(&self, name: &str) -> &AggregateDecl {
    self.aggregates.get(name).unwrap_or_else(|| panic!("schema model references undeclared aggregate '{}'", name))
  }

  pub fn root_aggregate(&self) -> Option<&AggregateDecl> {
    self.root_type.as_deref().map(|name| self.aggregate(name))
  }

  // True when nothing would be emitted for this file
  pub fn is_empty(&self) -> bool {
    self.enums.values().all(|e| e.generated) && self.aggregates.values().all(|a| a.generated)
  }

  fn checked_qualified_name(&self, id: NamespaceId, name: &str) -> Result<DeclName, SchemaError> {
    if id.0 >= self.namespaces.len() {
      return Err(SchemaError::NamespaceOutOfRange { owner: name.to_string(), id: id.0, count: self.namespaces.len() });
    }
    Ok(self.qualified_name(id, name))
  }

  fn check_references(&self) -> Result<(), SchemaError> {
    for (key, enum_decl) in &self.enums {
      for (index, val) in enum_decl.values.iter().enumerate() {
        let owner = format!("{}.{}", key, val.name);
        match &val.union_type {
          Some(target) if !self.aggregates.contains_key(target) => {
            return Err(SchemaError::UnknownAggregate { owner, name: target.clone() });
          }
          // The first union value is the "no payload" sentinel
          None if enum_decl.is_union && index > 0 => return Err(SchemaError::MissingUnionType(owner)),
          _ => {}
        }
      }
    }

    for (key, aggregate) in &self.aggregates {
      for field in &aggregate.fields {
        let owner = format!("{}.{}", key, field.name);
        self.check_type_ref(&owner, &field.field_type)?;
        self.check_nested_root(&owner, field)?;
      }
    }

    Ok(())
  }

  fn check_type_ref(&self, owner: &str, type_ref: &TypeRef) -> Result<(), SchemaError> {
    match type_ref {
      TypeRef::Scalar { enum_ref, .. } => {
        if let Some(name) = enum_ref {
          self.check_enum(owner, name)?;
        }
        Ok(())
      }
      TypeRef::Bool | TypeRef::String => Ok(()),
      TypeRef::Vector { element } => self.check_type_ref(owner, element),
      TypeRef::Aggregate { target, fixed } => {
        let decl = self
          .aggregates
          .get(target)
          .ok_or_else(|| SchemaError::UnknownAggregate { owner: owner.to_string(), name: target.clone() })?;
        if decl.fixed != *fixed {
          return Err(SchemaError::FixedMismatch {
            owner: owner.to_string(),
            name: target.clone(),
            expected: *fixed,
            actual: decl.fixed,
          });
        }
        Ok(())
      }
      TypeRef::Union { tag_enum } => self.check_enum(owner, tag_enum),
    }
  }

  fn check_enum(&self, owner: &str, name: &str) -> Result<(), SchemaError> {
    if self.enums.contains_key(name) {
      Ok(())
    } else {
      Err(SchemaError::UnknownEnum { owner: owner.to_string(), name: name.to_string() })
    }
  }

  fn check_nested_root(&self, owner: &str, field: &FieldDecl) -> Result<(), SchemaError> {
    if let Some(nested) = &field.nested_root {
      let key = self.active_namespace_decl().fully_qualified_name(nested);
      if !self.aggregates.contains_key(&key) {
        return Err(SchemaError::UnknownAggregate { owner: owner.to_string(), name: key });
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::types::*;

  fn scalar_field(name: &str, kind: ScalarKind, slot: u16) -> FieldDecl {
    FieldDecl {
      name: name.to_string(),
      field_type: TypeRef::Scalar { kind, enum_ref: None },
      slot,
      default_value: "0".to_string(),
      deprecated: false,
      required: false,
      key: false,
      padding: 0,
      nested_root: None,
      doc: Vec::new(),
    }
  }

  fn table(name: &str, namespace: usize, fields: Vec<FieldDecl>) -> AggregateDecl {
    AggregateDecl {
      name: name.to_string(),
      namespace: NamespaceId(namespace),
      fixed: false,
      fields,
      byte_size: 0,
      min_align: 1,
      sort_by_size: false,
      doc: Vec::new(),
      generated: false,
    }
  }

  fn schema_file(namespaces: Vec<Vec<&str>>, aggregates: Vec<AggregateDecl>) -> SchemaFile {
    SchemaFile {
      file_name: "test".to_string(),
      source_file: None,
      namespaces: namespaces.into_iter().map(|ns| ns.into_iter().map(String::from).collect()).collect(),
      enums: Vec::new(),
      aggregates,
      root_type: None,
      file_identifier: None,
      file_extension: None,
      included_files: Vec::new(),
    }
  }

  #[test]
  fn test_root_namespace_synthesized() {
    let schema = Schema::from_file(schema_file(vec![], vec![table("T", 0, vec![])])).unwrap();
    assert_eq!(schema.namespaces.len(), 1);
    assert!(schema.active_namespace_decl().components.is_empty());
    assert!(schema.aggregates.contains_key("T"));
  }

  #[test]
  fn test_keys_are_qualified_and_ordered() {
    let file = schema_file(
      vec![vec!["A"], vec!["A", "B"]],
      vec![table("Second", 1, vec![]), table("First", 0, vec![])],
    );
    let schema = Schema::from_file(file).unwrap();
    let keys: Vec<&String> = schema.aggregates.keys().collect();
    assert_eq!(keys, vec!["A.B.Second", "A.First"]);
    assert_eq!(schema.active_namespace(), NamespaceId(1));
  }

  #[test]
  fn test_same_path_namespaces_stay_distinct() {
    let file = schema_file(vec![vec!["A"], vec!["A"]], vec![table("T", 0, vec![])]);
    let schema = Schema::from_file(file).unwrap();
    assert_ne!(schema.active_namespace(), NamespaceId(0));
    assert_eq!(schema.namespace(NamespaceId(0)), schema.namespace(NamespaceId(1)));
  }

  #[test]
  fn test_unknown_aggregate_rejected() {
    let mut field = scalar_field("pos", ScalarKind::Int, 4);
    field.field_type = TypeRef::Aggregate { target: "Vec3".to_string(), fixed: true };
    let err = Schema::from_file(schema_file(vec![], vec![table("Monster", 0, vec![field])])).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownAggregate { .. }));
  }

  #[test]
  fn test_fixed_mismatch_rejected() {
    let mut field = scalar_field("other", ScalarKind::Int, 4);
    field.field_type = TypeRef::Aggregate { target: "Other".to_string(), fixed: true };
    let file = schema_file(vec![], vec![table("Monster", 0, vec![field]), table("Other", 0, vec![])]);
    let err = Schema::from_file(file).unwrap_err();
    assert!(matches!(err, SchemaError::FixedMismatch { expected: true, actual: false, .. }));
  }

  #[test]
  fn test_namespace_out_of_range_rejected() {
    let err = Schema::from_file(schema_file(vec![vec!["A"]], vec![table("T", 3, vec![])])).unwrap_err();
    assert!(matches!(err, SchemaError::NamespaceOutOfRange { id: 3, count: 1, .. }));
  }

  #[test]
  fn test_duplicate_declaration_rejected() {
    let file = schema_file(vec![], vec![table("T", 0, vec![]), table("T", 0, vec![])]);
    assert!(matches!(Schema::from_file(file).unwrap_err(), SchemaError::DuplicateDeclaration(name) if name == "T"));
  }

  #[test]
  fn test_root_type_resolved_against_active_namespace() {
    let mut file = schema_file(vec![vec!["Game"]], vec![table("Monster", 0, vec![scalar_field("hp", ScalarKind::Short, 4)])]);
    file.root_type = Some("Monster".to_string());
    let schema = Schema::from_file(file).unwrap();
    assert_eq!(schema.root_type.as_deref(), Some("Game.Monster"));

    let mut missing = schema_file(vec![], vec![]);
    missing.root_type = Some("Nope".to_string());
    assert!(matches!(Schema::from_file(missing).unwrap_err(), SchemaError::UnknownRootType(_)));
  }

  #[test]
  fn test_union_value_without_type_rejected() {
    let mut file = schema_file(vec![], vec![]);
    file.enums.push(EnumDecl {
      name: "Any".to_string(),
      namespace: NamespaceId(0),
      underlying: ScalarKind::Utype,
      values: vec![
        EnumVal { name: "NONE".to_string(), value: 0, doc: Vec::new(), union_type: None },
        EnumVal { name: "Monster".to_string(), value: 1, doc: Vec::new(), union_type: None },
      ],
      is_union: true,
      doc: Vec::new(),
      generated: false,
    });
    assert!(matches!(Schema::from_file(file).unwrap_err(), SchemaError::MissingUnionType(owner) if owner == "Any.Monster"));
  }

  #[test]
  fn test_empty_identifier_treated_as_absent() {
    let mut file = schema_file(vec![], vec![]);
    file.file_identifier = Some(String::new());
    let schema = Schema::from_file(file).unwrap();
    assert!(schema.file_identifier.is_none());
    assert!(schema.is_empty());
  }
}
