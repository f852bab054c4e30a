//! Storage primitives for persisted client state.

mod toml_file;

pub use toml_file::TomlFile;
