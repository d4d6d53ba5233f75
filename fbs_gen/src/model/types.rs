// Re-export from fbs_types so generator code can reach the model through one path
pub use fbs_types::{
    AggregateDecl, DeclName, EnumDecl, EnumVal, FieldDecl, NamespaceId, ScalarKind, SchemaFile,
    TypeRef,
};
