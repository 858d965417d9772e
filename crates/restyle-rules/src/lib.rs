//! restyle-rules: Style rule implementations
//!
//! Available rules:
//! - consistent_list_newline: Each bracketed list is fully inline or fully
//!   one-element-per-line, following the first element's placement
//! - consistent_chaining: Member/call chains keep one line-break style
//!   across every `.` access
//! - import_sort: Order the leading import block and the named specifiers
//!   inside each declaration
//! - import_dedupe: Drop repeated named specifiers within one declaration

pub mod consistent_chaining;
pub mod consistent_list_newline;
pub mod import_dedupe;
pub mod import_sort;
pub mod layout;
pub mod registry;

pub use consistent_chaining::{check_consistent_chaining, ConsistentChainingRule};
pub use consistent_list_newline::{check_consistent_list_newline, ConsistentListNewlineRule};
pub use import_dedupe::{check_import_dedupe, ImportDedupeRule};
pub use import_sort::{check_import_sort, ImportSortRule};
pub use registry::{Category, Rule, RuleOptions, RuleRegistry};
