//! C++ header generation for zero-copy binary schemas.
//!
//! A resolved schema model (see [`fbs_types`]) is loaded into a
//! [`model::resolved::Schema`] and turned into a single header by
//! [`codegen::cpp::CppCodeGenerator`].

pub mod cmds;
pub mod codegen;
pub mod model;
