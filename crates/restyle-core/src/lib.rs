//! restyle-core: Core abstractions for TypeScript/TSX style fixing
//!
//! This crate provides:
//! - `Edit`: A range-based code modification
//! - `apply_edits()`: Function to apply edits preserving untouched text
//! - `parse()`: Tree-sitter parsing for TypeScript and TSX
//! - Tree navigation helpers (`walk_tree`, `token_at_or_after`, ...)
//! - Text-range reconstruction (`trailing_extent`, `leading_span`, ...)

mod edit;
pub mod text;
pub mod tree;

pub use edit::{apply_edits, Edit, EditError};
pub use tree::{parse, walk_tree, Dialect, ParseError};
