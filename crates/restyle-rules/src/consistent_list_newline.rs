//! Rule: consistent_list_newline
//!
//! Enforces consistent line breaks inside bracketed lists: once the first
//! element establishes whether a container is laid out inline or with one
//! element per line, every later element must follow suit.
//!
//! Pattern:
//! ```ts
//! // Before
//! const o = {
//!   a: 1, b: 2
//! }
//!
//! // After
//! const o = {
//!   a: 1,
//!   b: 2
//! }
//! ```
//!
//! Twenty container kinds are covered, each with its own enable toggle:
//! array/object literals and patterns, import/export specifier lists,
//! call/new arguments, the parameter lists of the six function-like kinds,
//! interface bodies, type literals, tuple types, type parameter/argument
//! lists, and JSX attribute lists.

use restyle_core::{tree, walk_tree, Edit};
use serde::Deserialize;
use tree_sitter::{Node, Tree};

use crate::layout::{check_layout, ListLayout};
use crate::registry::{Category, Rule};

/// Per-container-kind enable toggles; unset keys default to enabled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListNewlineOptions {
    pub array: bool,
    pub array_pattern: bool,
    pub object: bool,
    pub object_pattern: bool,
    pub import_specifiers: bool,
    pub export_specifiers: bool,
    pub call_arguments: bool,
    pub new_arguments: bool,
    pub function_declaration: bool,
    pub function_expression: bool,
    pub arrow_function: bool,
    pub method_definition: bool,
    pub function_signature: bool,
    pub function_type: bool,
    pub interface_members: bool,
    pub type_literal: bool,
    pub tuple_type: bool,
    pub type_parameters: bool,
    pub type_arguments: bool,
    pub jsx_attributes: bool,
}

impl Default for ListNewlineOptions {
    fn default() -> Self {
        Self {
            array: true,
            array_pattern: true,
            object: true,
            object_pattern: true,
            import_specifiers: true,
            export_specifiers: true,
            call_arguments: true,
            new_arguments: true,
            function_declaration: true,
            function_expression: true,
            arrow_function: true,
            method_definition: true,
            function_signature: true,
            function_type: true,
            interface_members: true,
            type_literal: true,
            tuple_type: true,
            type_parameters: true,
            type_arguments: true,
            jsx_attributes: true,
        }
    }
}

/// Check a parsed file with default options
pub fn check_consistent_list_newline(tree: &Tree, source: &str) -> Vec<Edit> {
    check_consistent_list_newline_with_options(tree, source, &ListNewlineOptions::default())
}

/// Check a parsed file with configured options
pub fn check_consistent_list_newline_with_options(
    tree: &Tree,
    source: &str,
    options: &ListNewlineOptions,
) -> Vec<Edit> {
    let mut checker = ListNewlineChecker {
        source,
        options,
        edits: Vec::new(),
    };
    walk_tree(tree, |node| checker.check_node(node));
    checker.edits
}

struct ListNewlineChecker<'s, 'o> {
    source: &'s str,
    options: &'o ListNewlineOptions,
    edits: Vec<Edit>,
}

impl<'s, 'o> ListNewlineChecker<'s, 'o> {
    fn check_node(&mut self, node: Node<'_>) {
        let opts = self.options;
        match node.kind() {
            "array" if opts.array => self.bracketed(node, "", false),
            "array_pattern" if opts.array_pattern => self.bracketed(node, "", false),
            "object" if opts.object => self.bracketed(node, "", false),
            "object_pattern" if opts.object_pattern => self.bracketed(node, "", false),
            "named_imports" if opts.import_specifiers => self.bracketed(node, "", true),
            "export_clause" if opts.export_specifiers => self.bracketed(node, "", true),
            "tuple_type" if opts.tuple_type => self.bracketed(node, "", false),
            "type_parameters" if opts.type_parameters => self.bracketed(node, "", false),
            "type_arguments" if opts.type_arguments => self.bracketed(node, "", false),
            // Interface bodies and type literals separate members with
            // newlines as often as with commas; merging must synthesize one
            "interface_body" if opts.interface_members => self.bracketed(node, ",", false),
            "object_type" if opts.type_literal => self.bracketed(node, ",", false),
            "arguments" => self.arguments(node),
            "formal_parameters" => self.parameters(node),
            "jsx_opening_element" | "jsx_self_closing_element" if opts.jsx_attributes => {
                self.jsx_element(node)
            }
            _ => {}
        }
    }

    /// A container whose first and last child tokens are its delimiters
    fn bracketed(&mut self, node: Node<'_>, merge_delimiter: &'static str, enforce_closing: bool) {
        self.bracketed_with_boundary(node, merge_delimiter, enforce_closing, None)
    }

    fn bracketed_with_boundary(
        &mut self,
        node: Node<'_>,
        merge_delimiter: &'static str,
        enforce_closing: bool,
        boundary_row: Option<usize>,
    ) {
        // A broken parse gives unreliable positions; skip the container
        if node.has_error() {
            return;
        }

        let elements = tree::named_children(node);
        if elements.is_empty() {
            return;
        }

        let children = tree::children(node);
        let (Some(open), Some(close)) = (tree::opening_token(node), children.last().copied()) else {
            return;
        };

        self.edits.extend(check_layout(
            &ListLayout {
                open,
                close,
                elements,
                boundary_row,
                merge_delimiter,
                enforce_closing,
            },
            self.source,
        ));
    }

    fn arguments(&mut self, node: Node<'_>) {
        let enabled = match node.parent().map(|p| p.kind()) {
            Some("call_expression") => self.options.call_arguments,
            Some("new_expression") => self.options.new_arguments,
            _ => false,
        };
        if enabled {
            self.bracketed(node, "", false);
        }
    }

    fn parameters(&mut self, node: Node<'_>) {
        let Some(parent) = node.parent() else { return };
        let enabled = match parent.kind() {
            "function_declaration" | "generator_function_declaration" => {
                self.options.function_declaration
            }
            "function_expression" | "function" | "generator_function" => {
                self.options.function_expression
            }
            "arrow_function" => self.options.arrow_function,
            "method_definition" => self.options.method_definition,
            "function_signature" => self.options.function_signature,
            "function_type" => self.options.function_type,
            _ => false,
        };
        if !enabled {
            return;
        }

        // The parameter list conceptually ends where the trailing clause
        // (return type, else body) begins
        let boundary_row = parent
            .child_by_field_name("return_type")
            .or_else(|| parent.child_by_field_name("body"))
            .map(|n| n.start_position().row);

        self.bracketed_with_boundary(node, "", false, boundary_row);
    }

    fn jsx_element(&mut self, node: Node<'_>) {
        if node.has_error() {
            return;
        }

        let elements: Vec<Node<'_>> = tree::named_children(node)
            .into_iter()
            .filter(|n| matches!(n.kind(), "jsx_attribute" | "jsx_expression"))
            .collect();
        if elements.is_empty() {
            return;
        }

        // An attribute that is multi-line by itself makes any layout
        // defensible; leave the whole element alone
        if elements
            .iter()
            .any(|n| n.end_position().row > n.start_position().row)
        {
            return;
        }

        // Mode is anchored on the tag name, not a bracket
        let Some(open) = node.child_by_field_name("name") else {
            return;
        };
        let Some(close) = tree::token_at_or_after(node, elements[elements.len() - 1].end_byte())
        else {
            return;
        };

        self.edits.extend(check_layout(
            &ListLayout {
                open,
                close,
                elements,
                boundary_row: None,
                merge_delimiter: "",
                enforce_closing: false,
            },
            self.source,
        ));
    }
}

/// Registry wrapper
pub struct ConsistentListNewlineRule {
    options: ListNewlineOptions,
}

impl ConsistentListNewlineRule {
    pub fn new(options: ListNewlineOptions) -> Self {
        Self { options }
    }
}

impl Default for ConsistentListNewlineRule {
    fn default() -> Self {
        Self::new(ListNewlineOptions::default())
    }
}

impl Rule for ConsistentListNewlineRule {
    fn name(&self) -> &'static str {
        "consistent_list_newline"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent line breaks inside bracketed lists"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Edit> {
        check_consistent_list_newline_with_options(tree, source, &self.options)
    }
}
