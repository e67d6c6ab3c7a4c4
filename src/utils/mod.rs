//! Shared utilities

pub mod atomic;
pub mod path;
pub mod strings;

pub use atomic::AtomicWriter;
