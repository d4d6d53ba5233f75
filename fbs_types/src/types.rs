use serde_derive::{Deserialize, Serialize};

/* Qualified, dot-separated declaration name (e.g. "MyGame.Example.Monster") */
pub type DeclName = String;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ScalarKind {
    /* Union discriminant storage */
    Utype,
    Byte,
    Ubyte,
    Short,
    Ushort,
    Int,
    Uint,
    Long,
    Ulong,
    Float,
    Double,
}

impl ScalarKind {
    /* Serialized width in bytes */
    pub fn size(self) -> usize {
        match self {
            ScalarKind::Utype | ScalarKind::Byte | ScalarKind::Ubyte => 1,
            ScalarKind::Short | ScalarKind::Ushort => 2,
            ScalarKind::Int | ScalarKind::Uint | ScalarKind::Float => 4,
            ScalarKind::Long | ScalarKind::Ulong | ScalarKind::Double => 8,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum TypeRef {
    Scalar {
        kind: ScalarKind,
        /* Enum whose values this scalar holds, if any */
        #[serde(default, rename = "enum")]
        enum_ref: Option<DeclName>,
    },
    Bool,
    String,
    Vector {
        element: Box<TypeRef>,
    },
    Aggregate {
        target: DeclName,
        fixed: bool,
    },
    Union {
        tag_enum: DeclName,
    },
}

impl TypeRef {
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeRef::Scalar { .. } | TypeRef::Bool)
    }

    /* Fixed aggregates are stored inline rather than behind an offset */
    pub fn is_struct(&self) -> bool {
        matches!(self, TypeRef::Aggregate { fixed: true, .. })
    }

    /* Enum referenced by a scalar, if this is an enum-typed scalar */
    pub fn scalar_enum(&self) -> Option<&str> {
        match self {
            TypeRef::Scalar { enum_ref, .. } => enum_ref.as_deref(),
            _ => None,
        }
    }
}

/* Index into the schema's namespace list. Identity, not path, distinguishes scopes. */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NamespaceId(pub usize);

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumVal {
    pub name: String,
    pub value: i64,
    #[serde(default)]
    pub doc: Vec<String>,
    /* Aggregate selected by this discriminant (union enums only) */
    #[serde(default)]
    pub union_type: Option<DeclName>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: NamespaceId,
    pub underlying: ScalarKind,
    pub values: Vec<EnumVal>,
    #[serde(default)]
    pub is_union: bool,
    #[serde(default)]
    pub doc: Vec<String>,
    /* Already emitted while generating an including file */
    #[serde(default)]
    pub generated: bool,
}

fn default_constant() -> String {
    "0".to_string()
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type", with = "serde_yml::with::singleton_map_recursive")]
    pub field_type: TypeRef,
    /* Vtable offset; meaningless for fixed aggregates */
    #[serde(default)]
    pub slot: u16,
    #[serde(default = "default_constant")]
    pub default_value: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub key: bool,
    /* Bit i set => one padding member of 8 << i bits follows this field */
    #[serde(default)]
    pub padding: u8,
    /* Root type of the schema whose buffer this byte vector holds */
    #[serde(default)]
    pub nested_root: Option<String>,
    #[serde(default)]
    pub doc: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct AggregateDecl {
    pub name: String,
    #[serde(default)]
    pub namespace: NamespaceId,
    pub fixed: bool,
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub byte_size: u64,
    #[serde(default = "default_min_align")]
    pub min_align: u64,
    #[serde(default)]
    pub sort_by_size: bool,
    #[serde(default)]
    pub doc: Vec<String>,
    #[serde(default)]
    pub generated: bool,
}

fn default_min_align() -> u64 {
    1
}

/* Resolved schema document, as handed over by the front end */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaFile {
    /* Basename of the schema, without directory or extension */
    pub file_name: String,
    #[serde(default)]
    pub source_file: Option<String>,
    /* Scope paths in declaration order; the last one is the active scope */
    #[serde(default)]
    pub namespaces: Vec<Vec<String>>,
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
    #[serde(default)]
    pub aggregates: Vec<AggregateDecl>,
    #[serde(default)]
    pub root_type: Option<DeclName>,
    #[serde(default)]
    pub file_identifier: Option<String>,
    #[serde(default)]
    pub file_extension: Option<String>,
    /* Transitive include set */
    #[serde(default)]
    pub included_files: Vec<String>,
}
