//! Core data models for buildtweak

mod config;
mod result;

pub use config::{BackupConfig, Config, ExclusionConfig, InstallPattern};
pub use result::{ArrayEditResult, EditEvent, RewriteResult};
