pub mod context;
pub mod enums;
pub mod helpers;
pub mod scope;
pub mod structs;
pub mod tables;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export main public functions
pub use context::GenContext;
pub use enums::{emit_enum, EnumFragment, DEFAULT_MAX_SPARSENESS};
pub use scope::{close_namespace, open_namespace, plan_forward_declarations, qualify, ForwardDeclarations};
pub use structs::emit_struct;
pub use tables::emit_table;
