//! Schema Model Definitions
//!
//! This crate contains the resolved schema model consumed by the code
//! generator: enums, fixed aggregates, tables and unions with their layout
//! facts already computed by the front end. It provides pure data structures
//! without any file I/O or code generation logic.

pub mod types;

// Re-export commonly used types at the crate root
pub use types::*;
