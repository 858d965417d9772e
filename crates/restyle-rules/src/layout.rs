//! Layout mode detection shared by the list and chain rules
//!
//! A bracketed list of sibling nodes is classified as `inline` or
//! `newline` from where its first element sits relative to the opening
//! delimiter. That mode is authoritative for every later element in the
//! list; deviations are reported with a fix that inserts a line break or
//! collapses the wrapping whitespace.

use restyle_core::{text, Edit};
use tree_sitter::Node;

/// Binary layout classification for one container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Elements share a line with the opening delimiter
    Inline,
    /// Every element starts on its own line
    Newline,
}

/// One container's element sequence plus the tokens bracketing it
pub struct ListLayout<'t> {
    /// Opening delimiter token (or anchor node for JSX elements)
    pub open: Node<'t>,
    /// Token immediately after the last element (the closing delimiter)
    pub close: Node<'t>,
    /// The sibling elements, in source order
    pub elements: Vec<Node<'t>>,
    /// Start row of a trailing clause (return type, body) that marks where
    /// the sequence conceptually ends; overrides the closing token's row
    /// for the single-physical-line check
    pub boundary_row: Option<usize>,
    /// Separator synthesized when merging elements whose span carries none
    pub merge_delimiter: &'static str,
    /// Enforce closing-delimiter placement even after a multi-line element
    pub enforce_closing: bool,
}

fn span_has_comment(span: &str) -> bool {
    span.contains("//") || span.contains("/*")
}

/// Shorten an element's text for diagnostics
fn snippet(node: Node<'_>, source: &str) -> String {
    let text = restyle_core::tree::node_text(node, source);
    let first_line = text.lines().next().unwrap_or("");
    if first_line.len() > 30 || text.lines().count() > 1 {
        let cut = first_line
            .char_indices()
            .take_while(|(i, _)| *i < 30)
            .map(|(i, c)| i + c.len_utf8())
            .last()
            .unwrap_or(0);
        format!("{}...", &first_line[..cut])
    } else {
        first_line.to_string()
    }
}

fn should_wrap(node: Node<'_>, source: &str) -> Edit {
    Edit::insert(
        node.start_byte(),
        "\n",
        format!("expected a line break before `{}`", snippet(node, source)),
    )
}

fn should_not_wrap(
    prev_end: usize,
    node: Node<'_>,
    source: &str,
    delimiter: &str,
) -> Edit {
    let span = &source[prev_end..node.start_byte()];
    let mut merged = text::collapse_whitespace(span);
    if merged.is_empty() {
        merged = delimiter.to_string();
    }
    Edit::new(
        prev_end..node.start_byte(),
        merged,
        format!("unexpected line break before `{}`", snippet(node, source)),
    )
}

/// Check one container against the mode established by its first element
pub fn check_layout(layout: &ListLayout<'_>, source: &str) -> Vec<Edit> {
    let elements = &layout.elements;
    if elements.is_empty() {
        return Vec::new();
    }

    let open_row = layout.open.end_position().row;
    let unit_end_row = layout
        .boundary_row
        .unwrap_or_else(|| layout.close.start_position().row);

    // Already a single physical line, nothing to enforce
    if open_row == unit_end_row {
        return Vec::new();
    }

    let mode = if elements[0].start_position().row == open_row {
        LayoutMode::Inline
    } else {
        LayoutMode::Newline
    };

    let mut edits = Vec::new();

    for pair in elements.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let same_row = cur.start_position().row == prev.end_position().row;

        match mode {
            LayoutMode::Newline if same_row => {
                edits.push(should_wrap(cur, source));
            }
            LayoutMode::Inline if !same_row => {
                // A comment between elements forces the break; leave it alone
                let span = &source[prev.end_byte()..cur.start_byte()];
                if !span_has_comment(span) {
                    edits.push(should_not_wrap(
                        prev.end_byte(),
                        cur,
                        source,
                        layout.merge_delimiter,
                    ));
                }
            }
            _ => {}
        }
    }

    // Closing delimiter placement
    let last = elements[elements.len() - 1];
    let multiline_last = last.end_position().row > last.start_position().row;
    if multiline_last && !layout.enforce_closing {
        return edits;
    }

    let close_same_row = layout.close.start_position().row == last.end_position().row;
    match mode {
        LayoutMode::Newline if close_same_row => {
            edits.push(should_wrap(layout.close, source));
        }
        LayoutMode::Inline if !close_same_row => {
            let span = &source[last.end_byte()..layout.close.start_byte()];
            if !span_has_comment(span) {
                edits.push(should_not_wrap(last.end_byte(), layout.close, source, ""));
            }
        }
        _ => {}
    }

    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_core::{apply_edits, parse, walk_tree, Dialect};

    fn array_layout(source: &str) -> Vec<Edit> {
        let tree = parse(source, Dialect::TypeScript).unwrap();
        let mut edits = Vec::new();
        walk_tree(&tree, |node| {
            if node.kind() == "array" {
                let children = restyle_core::tree::children(node);
                let elements = restyle_core::tree::named_children(node);
                let open = children[0];
                let close = *children.last().unwrap();
                edits.extend(check_layout(
                    &ListLayout {
                        open,
                        close,
                        elements,
                        boundary_row: None,
                        merge_delimiter: "",
                        enforce_closing: false,
                    },
                    source,
                ));
            }
        });
        edits
    }

    #[test]
    fn test_single_line_untouched() {
        assert!(array_layout("const a = [1, 2, 3]").is_empty());
    }

    #[test]
    fn test_newline_mode_consistent() {
        assert!(array_layout("const a = [\n  1,\n  2,\n]").is_empty());
    }

    #[test]
    fn test_newline_mode_violation() {
        let source = "const a = [\n  1, 2,\n]";
        let edits = array_layout(source);
        assert_eq!(edits.len(), 1);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "const a = [\n  1, \n2,\n]");
    }

    #[test]
    fn test_inline_mode_violation_collapses() {
        let source = "const a = [1,\n  2]";
        let edits = array_layout(source);
        assert_eq!(edits.len(), 1);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "const a = [1,2]");
    }

    #[test]
    fn test_inline_comment_exemption() {
        // the comment forces the break, so no report for element 2
        let source = "const a = [1, // one\n  2]";
        assert!(array_layout(source).is_empty());
    }

    #[test]
    fn test_multiline_element_lets_closing_trail() {
        let source = "const a = [[\n  1,\n]]";
        assert!(array_layout(source).is_empty());
    }

    #[test]
    fn test_closing_joins_in_inline_mode() {
        let source = "const a = [1, 2\n]";
        let edits = array_layout(source);
        assert_eq!(edits.len(), 1);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "const a = [1, 2]");
    }
}
