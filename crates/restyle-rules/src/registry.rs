//! Rule trait and registry for restyle style rules

use restyle_core::Edit;
use serde::Deserialize;
use std::collections::HashSet;
use tree_sitter::Tree;

use crate::consistent_chaining::{ChainingOptions, ConsistentChainingRule};
use crate::consistent_list_newline::{ConsistentListNewlineRule, ListNewlineOptions};
use crate::import_dedupe::ImportDedupeRule;
use crate::import_sort::{ImportSortOptions, ImportSortRule};

/// Broad grouping of rules, used for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Line-break placement in lists and chains
    Layout,
    /// Ordering and hygiene of import declarations
    Imports,
}

/// A style rule that can detect and fix formatting issues
pub trait Rule: Send + Sync {
    /// The unique identifier for this rule (e.g., "import_sort")
    fn name(&self) -> &'static str;

    /// A short description of what this rule does
    fn description(&self) -> &'static str;

    /// The rule's grouping
    fn category(&self) -> Category;

    /// Check a parsed file and return suggested edits
    fn check(&self, tree: &Tree, source: &str) -> Vec<Edit>;
}

/// Per-rule options, as found under `[rules.options]` in `.restyle.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    pub consistent_list_newline: ListNewlineOptions,
    pub consistent_chaining: ChainingOptions,
    pub import_sort: ImportSortOptions,
}

/// Registry of all available style rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules and default options
    pub fn new() -> Self {
        Self::with_options(RuleOptions::default())
    }

    /// Create a registry with configured rule options
    pub fn with_options(options: RuleOptions) -> Self {
        let mut registry = Self { rules: Vec::new() };

        registry.register(Box::new(ConsistentListNewlineRule::new(
            options.consistent_list_newline,
        )));
        registry.register(Box::new(ConsistentChainingRule::new(
            options.consistent_chaining,
        )));
        registry.register(Box::new(ImportSortRule::new(options.import_sort)));
        registry.register(Box::new(ImportDedupeRule::new()));

        registry
    }

    /// Register a new rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all rule names
    pub fn all_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Get rules filtered by enabled names
    pub fn get_enabled(&self, enabled: &HashSet<String>) -> Vec<&dyn Rule> {
        self.rules
            .iter()
            .filter(|r| enabled.contains(r.name()))
            .map(|r| r.as_ref())
            .collect()
    }

    /// Get all rules with their descriptions (for --list-rules)
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.description()))
            .collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
