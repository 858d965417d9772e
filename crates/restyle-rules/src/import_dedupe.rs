//! Rule: import_dedupe
//!
//! Removes repeated named specifiers inside a single import declaration,
//! keeping the first occurrence of each local binding.
//!
//! Pattern:
//! ```ts
//! // Before
//! import { a, b, a, a, c, a } from 'x'
//!
//! // After
//! import { a, b, c } from 'x'
//! ```
//!
//! Specifiers are keyed by the name they bind locally, so `a as b`
//! duplicates an earlier `b`, not an earlier `a`. Lists carrying comments
//! are left alone rather than risk detaching one from its specifier.

use restyle_core::{text, tree, Edit};
use tree_sitter::{Node, Tree};

use crate::registry::{Category, Rule};

pub fn check_import_dedupe(tree: &Tree, source: &str) -> Vec<Edit> {
    let mut edits = Vec::new();
    let root = tree.root_node();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() != "import_statement" || child.has_error() {
            continue;
        }
        let Some(named) = find_named_imports(child) else {
            continue;
        };
        if let Some(edit) = dedupe_list(named, source) {
            edits.push(edit);
        }
    }
    edits
}

fn find_named_imports(import: Node<'_>) -> Option<Node<'_>> {
    let clause = tree::children(import)
        .into_iter()
        .find(|c| c.kind() == "import_clause")?;
    tree::children(clause)
        .into_iter()
        .find(|c| c.kind() == "named_imports")
}

fn dedupe_list(named: Node<'_>, source: &str) -> Option<Edit> {
    let children = tree::children(named);
    if children.iter().any(|c| tree::is_comment(*c)) {
        return None;
    }
    let specs: Vec<Node<'_>> = tree::named_children(named)
        .into_iter()
        .filter(|n| n.kind() == "import_specifier")
        .collect();
    if specs.len() < 2 {
        return None;
    }

    let mut seen: Vec<&str> = Vec::new();
    let mut kept: Vec<Node<'_>> = Vec::new();
    let mut duplicate: Option<&str> = None;
    for spec in &specs {
        let binding = local_binding(*spec, source);
        if seen.contains(&binding) {
            duplicate.get_or_insert(binding);
        } else {
            seen.push(binding);
            kept.push(*spec);
        }
    }
    let duplicate = duplicate?;

    let open = children.first()?;
    let close = children.last()?;
    let multi_line = open.end_position().row != close.start_position().row;
    let last_spec = specs[specs.len() - 1];
    let trailing_comma = source[last_spec.end_byte()..close.start_byte()].contains(',');

    let rendered = if multi_line {
        let indent = specs
            .iter()
            .find(|s| s.start_position().row != open.end_position().row)
            .map(|s| text::line_indent(source, s.start_byte()))
            .unwrap_or("  ");
        let close_indent = text::line_indent(source, close.start_byte());

        let mut out = String::from("{\n");
        let count = kept.len();
        for (i, spec) in kept.iter().enumerate() {
            out.push_str(indent);
            out.push_str(tree::node_text(*spec, source));
            if i + 1 < count || trailing_comma {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(close_indent);
        out.push('}');
        out
    } else {
        let pad = if source.as_bytes().get(open.end_byte()) == Some(&b' ') {
            " "
        } else {
            ""
        };
        let specs_text: Vec<&str> = kept.iter().map(|s| tree::node_text(*s, source)).collect();
        let mut out = String::from("{");
        out.push_str(pad);
        out.push_str(&specs_text.join(", "));
        if trailing_comma {
            out.push(',');
        }
        out.push_str(pad);
        out.push('}');
        out
    };

    Some(Edit::new(
        named.start_byte()..named.end_byte(),
        rendered,
        format!("`{duplicate}` is imported more than once"),
    ))
}

/// The name a specifier binds locally: the alias when present, else the
/// imported name itself
fn local_binding<'a>(spec: Node<'_>, source: &'a str) -> &'a str {
    let node = spec
        .child_by_field_name("alias")
        .or_else(|| spec.child_by_field_name("name"))
        .unwrap_or(spec);
    tree::node_text(node, source)
}

pub struct ImportDedupeRule;

impl ImportDedupeRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImportDedupeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ImportDedupeRule {
    fn name(&self) -> &'static str {
        "import_dedupe"
    }

    fn description(&self) -> &'static str {
        "Remove duplicated named specifiers within an import declaration"
    }

    fn category(&self) -> Category {
        Category::Imports
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Edit> {
        check_import_dedupe(tree, source)
    }
}
