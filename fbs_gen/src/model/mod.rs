pub mod file;
pub mod resolved;
pub mod types;
