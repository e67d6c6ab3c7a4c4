//! # Editors
//!
//! | Editor | Region | Operation |
//! |--------|--------|-----------|
//! | [`ArrayEditor`] | one `NAME=( ... )` declaration | add / remove entries |
//! | [`CommandRewriter`] | install command lines | inject `--exclude=` flags |
//!
//! Both read the whole file, build the new content in memory and hand it to
//! an [`AtomicWriter`](crate::utils::AtomicWriter). Neither keeps state
//! between calls; package lists are always passed in.

pub mod array;
pub mod command;

pub use array::{add_entries_to_text, remove_entries_from_text, ArrayEdit, ArrayEditor};
pub use command::{add_exclusions_to_text, CommandEdit, CommandRewriter};
