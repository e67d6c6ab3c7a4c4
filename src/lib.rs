//! buildtweak - Build Script Customizer
//!
//! Edits bash array declarations and package-manager install commands in
//! the shell scripts of an image build repository.
//!
//! # Features
//!
//! - Locate `NAME=(...)` arrays in block or single-line form
//! - Add and remove entries while keeping indentation and comments
//! - Append `--exclude=<pkg>` flags to matching install commands
//! - Apply configured additions, removals and exclusions across a repository
//! - Dry-run by default, atomic writes, optional timestamped backups

pub mod backup;
pub mod batch;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod parser;
pub mod scan;
pub mod utils;

pub use editor::{ArrayEditor, CommandRewriter};
pub use error::{EditError, Result};
pub use model::{ArrayEditResult, Config, EditEvent, RewriteResult};
pub use utils::AtomicWriter;
