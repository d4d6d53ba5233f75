pub mod cpp;
pub mod cpp_gen;
