//! # Parser Module
//!
//! Line classification for the two constructs buildtweak edits.
//!
//! ## Architecture Overview
//!
//! ```text
//! parser/
//! ├── mod.rs       - This file
//! ├── patterns.rs  - Static regex patterns (ARRAY_*, TOKEN_RE, ...)
//! ├── array.rs     - Array declaration locating, block scanning, entry normalization
//! └── command.rs   - Install command matching and flag injection
//! ```
//!
//! ## Quick Reference
//!
//! | Function | Input | Tagged result |
//! |----------|-------|---------------|
//! | [`array::classify_start_line`] | `NAME=(` line | `Inline` / `Block` |
//! | [`array::classify_block_line`] | line inside a block | `Terminator` / `Entry` |
//! | [`array::scan_block`] | lines after the opening | `Terminated` / `Unterminated` |
//! | [`command::InstallMatcher::classify`] | any line | `Matched` / `NoMatch` |
//!
//! This is not a general bash parser. Arrays must be declared as
//! `NAME=(` with either a closing `)` on the same line or one entry per
//! line and a closing line holding only whitespace and `)`.

pub mod array;
pub mod command;
pub mod patterns;

pub use array::{normalize_entry, ArrayBlock, ArrayForm};
pub use command::{exclusion_flags, InstallMatcher};
