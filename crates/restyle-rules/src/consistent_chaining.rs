//! Rule: consistent_chaining
//!
//! Enforces consistent line breaks in member/call chains: either every
//! property access wraps onto its own line, or none does.
//!
//! Pattern:
//! ```ts
//! // Before
//! foo
//!   .bar().baz
//!
//! // After
//! foo
//!   .bar()
//!   .baz
//! ```
//!
//! With `allow_leading_property_access` (default on), the leading run of
//! same-line accesses on a simple base (`foo.bar` before the real chain
//! starts) is exempt from establishing inline mode.

use restyle_core::{tree, walk_tree, Edit};
use serde::Deserialize;
use std::collections::HashSet;
use tree_sitter::{Node, Tree};

use crate::registry::{Category, Rule};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainingOptions {
    /// Let `foo.bar` stay on one line even when the rest of the chain wraps
    pub allow_leading_property_access: bool,
}

impl Default for ChainingOptions {
    fn default() -> Self {
        Self {
            allow_leading_property_access: true,
        }
    }
}

/// Check a parsed file with default options
pub fn check_consistent_chaining(tree: &Tree, source: &str) -> Vec<Edit> {
    check_consistent_chaining_with_options(tree, source, &ChainingOptions::default())
}

/// Check a parsed file with configured options
pub fn check_consistent_chaining_with_options(
    tree: &Tree,
    source: &str,
    options: &ChainingOptions,
) -> Vec<Edit> {
    // Every member node in a chain triggers a visit; the root id set makes
    // sure each chain is processed exactly once per file
    let mut seen_roots: HashSet<usize> = HashSet::new();
    let mut edits = Vec::new();

    walk_tree(tree, |node| {
        if node.kind() != "member_expression" {
            return;
        }
        let root = chain_root(node);
        if seen_roots.insert(root.id()) {
            check_chain(root, source, options, &mut edits);
        }
    });

    edits
}

/// Walk upward to the top of the access/call chain containing `node`
fn chain_root(node: Node<'_>) -> Node<'_> {
    let mut cur = node;
    loop {
        let Some(parent) = cur.parent() else {
            return cur;
        };
        let continues = match parent.kind() {
            "member_expression" | "subscript_expression" => parent
                .child_by_field_name("object")
                .is_some_and(|o| o.id() == cur.id()),
            "call_expression" => parent
                .child_by_field_name("function")
                .is_some_and(|f| f.id() == cur.id()),
            "non_null_expression" => true,
            _ => false,
        };
        if !continues {
            return cur;
        }
        cur = parent;
    }
}

/// Walk back down the chain spine, collecting the property accesses from
/// the base outward. Bracket accesses and non-null assertions are part of
/// the spine but contribute no access point.
fn collect_accesses(root: Node<'_>) -> Vec<Node<'_>> {
    let mut accesses = Vec::new();
    let mut cur = Some(root);
    while let Some(node) = cur {
        match node.kind() {
            "member_expression" => {
                accesses.push(node);
                cur = node.child_by_field_name("object");
            }
            "subscript_expression" => cur = node.child_by_field_name("object"),
            "call_expression" => cur = node.child_by_field_name("function"),
            "non_null_expression" => cur = node.named_child(0),
            _ => break,
        }
    }
    accesses.reverse();
    accesses
}

/// A base simple enough to read as one unit with its first property access
fn is_simple_reference(node: Node<'_>) -> bool {
    let mut node = node;
    while node.kind() == "non_null_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => return false,
        }
    }
    matches!(
        node.kind(),
        "identifier" | "this" | "member_expression" | "string" | "number" | "true" | "false"
            | "null" | "undefined"
    )
}

fn check_chain(root: Node<'_>, source: &str, options: &ChainingOptions, edits: &mut Vec<Edit>) {
    if root.has_error() {
        return;
    }

    let accesses = collect_accesses(root);
    let mut inline_mode: Option<bool> = None;

    for member in accesses {
        let Some(object) = member.child_by_field_name("object") else {
            continue;
        };
        let Some(dot) = tree::children(member)
            .into_iter()
            .find(|c| matches!(c.kind(), "." | "?."))
        else {
            continue;
        };

        let span = &source[object.end_byte()..dot.start_byte()];
        if span.contains("//") || span.contains("/*") {
            // a comment owns this break
            continue;
        }

        let inline = dot.start_position().row == object.end_position().row;
        let property = member
            .child_by_field_name("property")
            .map(|p| tree::node_text(p, source))
            .unwrap_or("");

        match inline_mode {
            None => {
                if inline && options.allow_leading_property_access && is_simple_reference(object) {
                    continue;
                }
                inline_mode = Some(inline);
            }
            Some(true) if !inline => {
                edits.push(Edit::new(
                    object.end_byte()..dot.start_byte(),
                    "",
                    format!("unexpected line break before `.{property}`"),
                ));
            }
            Some(false) if inline => {
                edits.push(Edit::insert(
                    dot.start_byte(),
                    "\n",
                    format!("expected a line break before `.{property}`"),
                ));
            }
            _ => {}
        }
    }
}

/// Registry wrapper
pub struct ConsistentChainingRule {
    options: ChainingOptions,
}

impl ConsistentChainingRule {
    pub fn new(options: ChainingOptions) -> Self {
        Self { options }
    }
}

impl Default for ConsistentChainingRule {
    fn default() -> Self {
        Self::new(ChainingOptions::default())
    }
}

impl Rule for ConsistentChainingRule {
    fn name(&self) -> &'static str {
        "consistent_chaining"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent line breaks in member/call chains"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Edit> {
        check_consistent_chaining_with_options(tree, source, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_core::{apply_edits, parse, Dialect};

    fn check_ts(source: &str) -> Vec<Edit> {
        let tree = parse(source, Dialect::TypeScript).unwrap();
        check_consistent_chaining(&tree, source)
    }

    fn transform(source: &str) -> String {
        let edits = check_ts(source);
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn test_single_line_chain_untouched() {
        assert!(check_ts("foo.bar.baz.qux").is_empty());
    }

    #[test]
    fn test_wrapped_chain_untouched() {
        assert!(check_ts("foo\n  .bar()\n  .baz").is_empty());
    }

    #[test]
    fn test_should_wrap_trailing_access() {
        let source = "foo\n  .bar().baz";
        let edits = check_ts(source);
        assert_eq!(edits.len(), 1);
        assert!(edits[0].message.contains("expected a line break"));
        let fixed = transform(source);
        assert_eq!(fixed, "foo\n  .bar()\n.baz");
        assert!(check_ts(&fixed).is_empty());
    }

    #[test]
    fn test_should_not_wrap_in_inline_chain() {
        // `foo().bar` is not a simple base, so it establishes inline mode
        let source = "foo().bar\n  .baz";
        let edits = check_ts(source);
        assert_eq!(edits.len(), 1);
        let fixed = transform(source);
        assert_eq!(fixed, "foo().bar.baz");
    }

    #[test]
    fn test_leading_property_access_exempt() {
        // `foo.bar` reads as one unit before the chain starts
        assert!(check_ts("foo.bar\n  .baz()\n  .qux()").is_empty());
    }

    #[test]
    fn test_leading_property_access_not_exempt_when_disabled() {
        let options = ChainingOptions {
            allow_leading_property_access: false,
        };
        let source = "foo.bar\n  .baz";
        let tree = parse(source, Dialect::TypeScript).unwrap();
        let edits = check_consistent_chaining_with_options(&tree, source, &options);
        assert_eq!(edits.len(), 1);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "foo.bar.baz");
    }

    #[test]
    fn test_computed_access_skipped_transparently() {
        let source = "foo[0]\n  .bar.baz";
        let edits = check_ts(source);
        assert_eq!(edits.len(), 1);
        let fixed = transform(source);
        assert_eq!(fixed, "foo[0]\n  .bar\n.baz");
    }

    #[test]
    fn test_chain_processed_once() {
        // three member nodes trigger the visitor, but the chain yields a
        // single pass and exactly the one violation
        let source = "foo\n  .a()\n  .b().c()\n  .d()";
        let edits = check_ts(source);
        assert_eq!(edits.len(), 1);
    }

    #[test]
    fn test_comment_owns_break() {
        assert!(check_ts("foo().bar // note\n  .baz").is_empty());
    }

    #[test]
    fn test_non_null_assertion_transparent() {
        assert!(check_ts("foo!.bar\n  .baz()\n  .qux()").is_empty());
    }
}
