//! Tree-sitter parsing and navigation helpers for TypeScript/TSX

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Grammar dialect used to parse a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Pick a dialect from a file extension (`ts`, `tsx`, `js`, ...)
    pub fn from_extension(ext: &str) -> Option<Dialect> {
        match ext {
            "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => Some(Dialect::TypeScript),
            "tsx" | "jsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    fn language(self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Errors that can occur while producing a syntax tree
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser returned no tree")]
    NoTree,
}

/// Parse source text into a syntax tree
pub fn parse(source: &str, dialect: Dialect) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&dialect.language())?;
    parser.parse(source, None).ok_or(ParseError::NoTree)
}

/// Get the source text covered by a node
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Whether a node is a comment (tree-sitter models them as extras)
pub fn is_comment(node: Node<'_>) -> bool {
    node.kind() == "comment" || node.kind() == "html_comment"
}

/// All children of a node, including anonymous tokens
pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named, non-comment children of a node
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| !n.is_extra() && !is_comment(*n))
        .collect()
}

/// First non-comment child, i.e. the opening delimiter of a bracketed list
pub fn opening_token<'t>(node: Node<'t>) -> Option<Node<'t>> {
    children(node).into_iter().find(|n| !is_comment(*n))
}

/// First non-comment child starting at or after `offset`, i.e. the token
/// that follows the last element of a bracketed list
pub fn token_at_or_after<'t>(node: Node<'t>, offset: usize) -> Option<Node<'t>> {
    children(node)
        .into_iter()
        .find(|n| !is_comment(*n) && n.start_byte() >= offset)
}

/// Pre-order traversal over every node in the tree
pub fn walk_tree<'t, F: FnMut(Node<'t>)>(tree: &'t Tree, mut f: F) {
    let mut cursor = tree.walk();
    loop {
        f(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typescript() {
        let tree = parse("const a: number = 1", Dialect::TypeScript).unwrap();
        assert_eq!(tree.root_node().kind(), "program");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_parse_tsx() {
        let tree = parse("const a = <div id=\"x\" />", Dialect::Tsx).unwrap();
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_dialect_from_extension() {
        assert_eq!(Dialect::from_extension("ts"), Some(Dialect::TypeScript));
        assert_eq!(Dialect::from_extension("tsx"), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_extension("jsx"), Some(Dialect::Tsx));
        assert_eq!(Dialect::from_extension("rs"), None);
    }

    #[test]
    fn test_walk_visits_all_imports() {
        let tree = parse("import a from 'a'\nimport b from 'b'\n", Dialect::TypeScript).unwrap();
        let mut imports = 0;
        walk_tree(&tree, |node| {
            if node.kind() == "import_statement" {
                imports += 1;
            }
        });
        assert_eq!(imports, 2);
    }

    #[test]
    fn test_named_children_skip_comments() {
        let source = "[1, /* x */ 2]";
        let tree = parse(&format!("const a = {source}"), Dialect::TypeScript).unwrap();
        let mut array = None;
        walk_tree(&tree, |node| {
            if node.kind() == "array" {
                array = Some(node);
            }
        });
        let array = array.unwrap();
        assert_eq!(named_children(array).len(), 2);
        assert_eq!(opening_token(array).unwrap().kind(), "[");
    }
}
