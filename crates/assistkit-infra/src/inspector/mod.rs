//! Inspector implementations.

pub mod file_state;

pub use file_state::FileStateInspector;
