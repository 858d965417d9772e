//! Rule: import_sort
//!
//! Reorders the leading contiguous block of import declarations plus the
//! named-specifier lists inside each of them, then replaces the whole
//! block with one atomic text edit that replays every comment, blank line
//! and trailing comma byte-for-byte.
//!
//! Pattern:
//! ```ts
//! // Before
//! import { foo } from 'ab'
//! import { bar } from 'aa'
//!
//! // After
//! import { bar } from 'aa'
//! import { foo } from 'ab'
//! ```
//!
//! Whole declarations are compared by type-only handling, module path
//! category (builtin < absolute < parent < sibling < index < external <
//! side-effect < unknown, with user regex groups checked first), then
//! declaration category, normalized length, alphabetic key, and finally
//! original position as the stable tie-break. Side-effect imports are
//! barriers by default: the runs between them sort independently, so a
//! polyfill never floats past the stylesheet that depends on it.

use restyle_core::{text, tree, Edit};
use regex::Regex;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use tree_sitter::{Node, Tree};

use crate::registry::{Category, Rule};

/// Node.js module names resolved without a path prefix
const NODE_BUILTINS: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
    "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http", "http2",
    "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "timers", "tls",
    "trace_events", "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

/// Classification of an import's module specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathCategory {
    Builtin,
    Absolute,
    Parent,
    Sibling,
    Index,
    External,
    SideEffect,
    Unknown,
}

impl PathCategory {
    fn priority(self) -> u8 {
        match self {
            PathCategory::Builtin => 0,
            PathCategory::Absolute => 1,
            PathCategory::Parent => 2,
            PathCategory::Sibling => 3,
            PathCategory::Index => 4,
            PathCategory::External => 5,
            PathCategory::SideEffect => 6,
            PathCategory::Unknown => 7,
        }
    }
}

impl fmt::Display for PathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PathCategory::Builtin => "builtin",
            PathCategory::Absolute => "absolute",
            PathCategory::Parent => "parent",
            PathCategory::Sibling => "sibling",
            PathCategory::Index => "index",
            PathCategory::External => "external",
            PathCategory::SideEffect => "side-effect",
            PathCategory::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Shape of one import declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ImportKind {
    Namespace,
    Default,
    Named,
    SideEffect,
}

/// Where type-only imports sort relative to value imports of the same path
/// category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeImportHandling {
    Ignore,
    #[default]
    Before,
    After,
}

/// Comparator toggles shared by the outer and inner passes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SortKeyOptions {
    pub enable_length: bool,
    pub enable_alphabet: bool,
    pub case_sensitive: bool,
}

impl Default for SortKeyOptions {
    fn default() -> Self {
        Self {
            enable_length: true,
            enable_alphabet: true,
            case_sensitive: true,
        }
    }
}

/// A user regex mapped to a path category, checked before the default
/// classification
#[derive(Debug, Clone, Deserialize)]
pub struct PathGroup {
    pub pattern: String,
    pub group: PathCategory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSortOptions {
    pub outer: SortKeyOptions,
    pub inner: SortKeyOptions,
    /// Keep side-effect imports in place and treat them as run barriers
    pub ignore_side_effect_imports: bool,
    pub type_import_handling: TypeImportHandling,
    pub path_groups: Vec<PathGroup>,
}

impl Default for ImportSortOptions {
    fn default() -> Self {
        Self {
            outer: SortKeyOptions::default(),
            inner: SortKeyOptions::default(),
            ignore_side_effect_imports: true,
            type_import_handling: TypeImportHandling::default(),
            path_groups: Vec::new(),
        }
    }
}

/// One import declaration, with its comparison keys and the text needed to
/// replay it elsewhere in the block
struct ImportEntry {
    /// Rendered declaration, trailing same-line comments included, possibly
    /// rewritten by the inner specifier pass
    text: String,
    /// Whitespace/comment span between the previous entry and this one
    leading: String,
    range: Range<usize>,
    specifier: String,
    is_type: bool,
    kind: ImportKind,
    /// Bytes of `text` past the declaration node's own end (absorbed
    /// punctuation and same-line comments); excluded from comparison keys
    tail_len: usize,
    path_category: PathCategory,
    length_score: usize,
    alpha_key: String,
    original_index: usize,
}

/// One named specifier inside an import's brace list
struct SpecifierEntry {
    text: String,
    leading_comments: Vec<String>,
    /// Comments after the specifier on its line, in source order; all of
    /// them travel with the specifier when it moves
    trailing_comments: Vec<String>,
    length_score: usize,
    alpha_key: String,
    original_index: usize,
}

/// Check a parsed file with default options
pub fn check_import_sort(tree: &Tree, source: &str) -> Vec<Edit> {
    ImportSortRule::new(ImportSortOptions::default()).check(tree, source)
}

/// Check a parsed file with configured options
pub fn check_import_sort_with_options(
    tree: &Tree,
    source: &str,
    options: &ImportSortOptions,
) -> Vec<Edit> {
    ImportSortRule::new(options.clone()).check(tree, source)
}

pub struct ImportSortRule {
    options: ImportSortOptions,
    /// Compiled `path_groups`; malformed patterns are dropped one by one so
    /// the remaining ones still apply
    groups: Vec<(Regex, PathCategory)>,
}

impl ImportSortRule {
    pub fn new(options: ImportSortOptions) -> Self {
        let groups = options
            .path_groups
            .iter()
            .filter_map(|g| Regex::new(&g.pattern).ok().map(|re| (re, g.group)))
            .collect();
        Self { options, groups }
    }

    fn run(&self, tree: &Tree, source: &str) -> Vec<Edit> {
        let imports = leading_import_block(tree.root_node());
        if imports.is_empty() {
            return Vec::new();
        }

        let Some((mut entries, inner_changed)) = self.build_entries(&imports, source) else {
            return Vec::new();
        };

        self.score_entries(&mut entries);
        let order = self.sorted_order(&entries);

        let order_changed = order.iter().enumerate().any(|(slot, &i)| i != slot);
        if !order_changed && !inner_changed {
            return Vec::new();
        }
        if entries.len() < 2 && !inner_changed {
            return Vec::new();
        }

        let message = if order_changed {
            divergence_message(&entries, &order)
        } else {
            "named import specifiers are not sorted".to_string()
        };

        let block_range = entries[0].range.start..entries[entries.len() - 1].range.end;
        let replacement = render_block(&entries, &order);
        if replacement == source[block_range.clone()] {
            return Vec::new();
        }

        vec![Edit::new(block_range, replacement, message)]
    }

    /// Build entries for the whole block; `None` aborts enforcement for the
    /// block (broken parse, comment that cannot be re-attached)
    fn build_entries<'t>(
        &self,
        imports: &[Node<'t>],
        source: &str,
    ) -> Option<(Vec<ImportEntry>, bool)> {
        let mut entries = Vec::with_capacity(imports.len());
        let mut inner_changed = false;
        let mut prev_end: Option<usize> = None;

        for (index, &import) in imports.iter().enumerate() {
            if import.has_error() || import.is_missing() {
                return None;
            }

            let start = import.start_byte();
            let end = text::trailing_extent(source, import.end_byte());
            let leading = match prev_end {
                None => String::new(),
                Some(prev) => text::leading_span(source, prev, start).to_string(),
            };
            prev_end = Some(end);

            let mut entry_text = source[start..end].to_string();
            let clause = tree::children(import)
                .into_iter()
                .find(|c| c.kind() == "import_clause");
            let kind = match clause {
                None => ImportKind::SideEffect,
                Some(clause) => {
                    let kinds: Vec<&str> =
                        tree::children(clause).iter().map(|c| c.kind()).collect();
                    if kinds.contains(&"identifier") {
                        ImportKind::Default
                    } else if kinds.contains(&"namespace_import") {
                        ImportKind::Namespace
                    } else {
                        ImportKind::Named
                    }
                }
            };

            if let Some(named) = clause.and_then(|c| {
                tree::children(c)
                    .into_iter()
                    .find(|n| n.kind() == "named_imports")
            }) {
                match self.sort_specifiers(named, source) {
                    InnerPass::Unchanged => {}
                    InnerPass::Rewritten(rendered) => {
                        let offset = named.start_byte() - start;
                        entry_text.replace_range(offset..named.end_byte() - start, &rendered);
                        inner_changed = true;
                    }
                    InnerPass::Skip => {}
                }
            }

            let specifier = import
                .child_by_field_name("source")
                .map(|s| unquote(tree::node_text(s, source)))
                .unwrap_or_default();
            let is_type = tree::children(import).iter().any(|c| c.kind() == "type");
            let path_category = self.classify(&specifier, kind == ImportKind::SideEffect);

            entries.push(ImportEntry {
                text: entry_text,
                leading,
                range: start..end,
                specifier,
                is_type,
                kind,
                tail_len: end - import.end_byte(),
                path_category,
                length_score: 0,
                alpha_key: String::new(),
                original_index: index,
            });
        }

        Some((entries, inner_changed))
    }

    /// Comparison keys are computed from the declaration text as rewritten
    /// by the inner pass, so the outer pass sees what will actually be
    /// emitted. The absorbed comment tail does not count: a `// note` on an
    /// import must not change where it sorts.
    fn score_entries(&self, entries: &mut [ImportEntry]) {
        for entry in entries {
            let body = &entry.text[..entry.text.len() - entry.tail_len];
            let normalized = text::normalize_inline(body);
            entry.length_score = normalized.chars().count();
            entry.alpha_key = if self.options.outer.case_sensitive {
                normalized
            } else {
                normalized.to_lowercase()
            };
        }
    }

    fn classify(&self, specifier: &str, side_effect: bool) -> PathCategory {
        for (re, category) in &self.groups {
            if re.is_match(specifier) {
                return *category;
            }
        }
        if side_effect {
            return PathCategory::SideEffect;
        }
        classify_path(specifier)
    }

    /// Final entry order: indexes into `entries`, side-effect barriers kept
    /// in place when configured
    fn sorted_order(&self, entries: &[ImportEntry]) -> Vec<usize> {
        let mut order = Vec::with_capacity(entries.len());

        if self.options.ignore_side_effect_imports {
            let mut run: Vec<usize> = Vec::new();
            for (i, entry) in entries.iter().enumerate() {
                if entry.kind == ImportKind::SideEffect {
                    self.sort_run(&mut run, entries);
                    order.append(&mut run);
                    order.push(i);
                } else {
                    run.push(i);
                }
            }
            self.sort_run(&mut run, entries);
            order.append(&mut run);
        } else {
            order.extend(0..entries.len());
            self.sort_run(&mut order, entries);
        }

        order
    }

    fn sort_run(&self, run: &mut [usize], entries: &[ImportEntry]) {
        run.sort_by(|&a, &b| self.compare(&entries[a], &entries[b]));
    }

    fn compare(&self, a: &ImportEntry, b: &ImportEntry) -> Ordering {
        let handling = self.options.type_import_handling;

        // With custom path groups the type-only key is primary; otherwise
        // it is an offset layered onto the path category
        let primary = if !self.groups.is_empty() {
            type_rank(a, handling)
                .cmp(&type_rank(b, handling))
                .then(a.path_category.priority().cmp(&b.path_category.priority()))
        } else {
            adjusted_priority(a, handling).cmp(&adjusted_priority(b, handling))
        };

        primary
            .then(a.kind.cmp(&b.kind))
            .then_with(|| {
                if self.options.outer.enable_length {
                    a.length_score.cmp(&b.length_score)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| {
                if self.options.outer.enable_alphabet {
                    a.alpha_key.cmp(&b.alpha_key)
                } else {
                    Ordering::Equal
                }
            })
            .then(a.original_index.cmp(&b.original_index))
    }

    /// Reorder the brace list of named specifiers, re-attaching comments to
    /// the specifier they describe
    fn sort_specifiers(&self, named: Node<'_>, source: &str) -> InnerPass {
        let specs: Vec<Node<'_>> = tree::named_children(named)
            .into_iter()
            .filter(|n| n.kind() == "import_specifier")
            .collect();
        if specs.len() < 2 {
            return InnerPass::Unchanged;
        }

        let children = tree::children(named);
        let (Some(&open), Some(&close)) = (children.first(), children.last()) else {
            return InnerPass::Skip;
        };
        let multi_line = open.end_position().row != close.start_position().row;

        let mut entries: Vec<SpecifierEntry> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let spec_text = tree::node_text(*spec, source);
                let normalized = text::normalize_inline(spec_text);
                SpecifierEntry {
                    text: spec_text.to_string(),
                    leading_comments: Vec::new(),
                    trailing_comments: Vec::new(),
                    length_score: normalized.chars().count(),
                    alpha_key: if self.options.inner.case_sensitive {
                        normalized
                    } else {
                        normalized.to_lowercase()
                    },
                    original_index: i,
                }
            })
            .collect();

        // Re-associate each comment with its specifier: trailing iff
        // non-whitespace precedes it on its line, else leading
        for comment in children.iter().filter(|c| tree::is_comment(**c)) {
            let comment_text = tree::node_text(*comment, source).to_string();
            if !multi_line && comment_text.starts_with("//") {
                // a moved line comment would swallow the rest of the line
                return InnerPass::Skip;
            }
            if text::is_trailing_comment(source, comment.start_byte(), named.start_byte()) {
                match specs.iter().rposition(|s| s.end_byte() <= comment.start_byte()) {
                    Some(i) => entries[i].trailing_comments.push(comment_text),
                    None => return InnerPass::Skip,
                }
            } else {
                match specs.iter().position(|s| s.start_byte() >= comment.end_byte()) {
                    Some(i) => entries[i].leading_comments.push(comment_text),
                    None => return InnerPass::Skip,
                }
            }
        }

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| {
            let (ea, eb) = (&entries[a], &entries[b]);
            let mut ord = Ordering::Equal;
            if self.options.inner.enable_length {
                ord = ea.length_score.cmp(&eb.length_score);
            }
            if self.options.inner.enable_alphabet {
                ord = ord.then(ea.alpha_key.cmp(&eb.alpha_key));
            }
            ord.then(ea.original_index.cmp(&eb.original_index))
        });

        if order.iter().enumerate().all(|(slot, &i)| i == slot) {
            return InnerPass::Unchanged;
        }

        let last_spec = specs[specs.len() - 1];
        let trailing_comma = source[last_spec.end_byte()..close.start_byte()].contains(',');

        let rendered = if multi_line {
            let indent = specs
                .iter()
                .find(|s| s.start_position().row != open.end_position().row)
                .map(|s| text::line_indent(source, s.start_byte()))
                .unwrap_or("  ");
            let close_line = text::line_indent(source, close.start_byte());
            let close_indent = if text::is_trailing_comment(source, close.start_byte(), 0) {
                ""
            } else {
                close_line
            };

            let mut out = String::from("{\n");
            let count = order.len();
            for (slot, &i) in order.iter().enumerate() {
                let entry = &entries[i];
                for comment in &entry.leading_comments {
                    out.push_str(indent);
                    out.push_str(comment);
                    out.push('\n');
                }
                out.push_str(indent);
                out.push_str(&entry.text);
                if slot + 1 < count || trailing_comma {
                    out.push(',');
                }
                for comment in &entry.trailing_comments {
                    out.push(' ');
                    out.push_str(comment);
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
            let count = order.len();
            let mut out = String::from("{");
            out.push_str(pad);
            for (slot, &i) in order.iter().enumerate() {
                let entry = &entries[i];
                for comment in &entry.leading_comments {
                    out.push_str(comment);
                    out.push(' ');
                }
                out.push_str(&entry.text);
                for comment in &entry.trailing_comments {
                    out.push(' ');
                    out.push_str(comment);
                }
                if slot + 1 < count {
                    out.push_str(", ");
                } else if trailing_comma {
                    out.push(',');
                }
            }
            out.push_str(pad);
            out.push('}');
            out
        };

        if rendered == tree::node_text(named, source) {
            InnerPass::Unchanged
        } else {
            InnerPass::Rewritten(rendered)
        }
    }
}

enum InnerPass {
    Unchanged,
    Rewritten(String),
    Skip,
}

impl Rule for ImportSortRule {
    fn name(&self) -> &'static str {
        "import_sort"
    }

    fn description(&self) -> &'static str {
        "Group and order import declarations and their named specifiers"
    }

    fn category(&self) -> Category {
        Category::Imports
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Edit> {
        self.run(tree, source)
    }
}

/// The leading contiguous run of import statements; directives and
/// comments before the first import are left in place, anything else ends
/// the block
fn leading_import_block(root: Node<'_>) -> Vec<Node<'_>> {
    let mut imports = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "import_statement" => imports.push(child),
            "comment" | "html_comment" | "hash_bang_line" => {}
            "expression_statement" if imports.is_empty() && is_directive(child) => {}
            _ => break,
        }
    }
    imports
}

fn is_directive(node: Node<'_>) -> bool {
    node.named_child_count() == 1
        && node
            .named_child(0)
            .is_some_and(|c| c.kind() == "string")
}

fn unquote(literal: &str) -> String {
    let trimmed = literal.trim();
    if trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

fn classify_path(specifier: &str) -> PathCategory {
    if specifier.starts_with("node:") {
        return PathCategory::Builtin;
    }
    let first_segment = specifier.split('/').next().unwrap_or(specifier);
    if NODE_BUILTINS.contains(&first_segment) {
        return PathCategory::Builtin;
    }
    if specifier.starts_with('/') {
        return PathCategory::Absolute;
    }
    if specifier == ".." || specifier.starts_with("../") {
        return PathCategory::Parent;
    }
    if is_index_path(specifier) {
        return PathCategory::Index;
    }
    if specifier.starts_with("./") {
        return PathCategory::Sibling;
    }
    let leading_char = specifier.chars().next();
    if leading_char.is_some_and(|c| c.is_ascii_alphanumeric() || c == '@' || c == '_') {
        PathCategory::External
    } else {
        PathCategory::Unknown
    }
}

fn is_index_path(specifier: &str) -> bool {
    if specifier == "." || specifier == "./" {
        return true;
    }
    let Some(name) = specifier.strip_prefix("./") else {
        return false;
    };
    matches!(
        name,
        "index" | "index.js" | "index.mjs" | "index.cjs" | "index.ts" | "index.jsx" | "index.tsx"
    )
}

fn type_rank(entry: &ImportEntry, handling: TypeImportHandling) -> u8 {
    match handling {
        TypeImportHandling::Ignore => 0,
        TypeImportHandling::Before => u8::from(!entry.is_type),
        TypeImportHandling::After => u8::from(entry.is_type),
    }
}

fn adjusted_priority(entry: &ImportEntry, handling: TypeImportHandling) -> i32 {
    let base = i32::from(entry.path_category.priority()) * 3 + 1;
    let offset = match handling {
        TypeImportHandling::Before if entry.is_type => -1,
        TypeImportHandling::After if entry.is_type => 1,
        _ => 0,
    };
    base + offset
}

fn divergence_message(entries: &[ImportEntry], order: &[usize]) -> String {
    let slot = order
        .iter()
        .enumerate()
        .find(|(slot, &i)| i != *slot)
        .map(|(slot, _)| slot)
        .unwrap_or(0);
    let expected = &entries[order[slot]];
    let actual = &entries[slot];
    format!(
        "`{}` ({}) should come before `{}` ({})",
        expected.specifier, expected.path_category, actual.specifier, actual.path_category
    )
}

/// Replay the block in its new order: each entry carries its own leading
/// span; the entry emitted first sheds leading whitespace, and an entry
/// whose leading span has no newline gets one synthesized so declarations
/// never merge onto one line
fn render_block(entries: &[ImportEntry], order: &[usize]) -> String {
    let mut out = String::new();
    for (slot, &i) in order.iter().enumerate() {
        let entry = &entries[i];
        if slot == 0 {
            out.push_str(entry.leading.trim_start());
        } else if entry.leading.contains('\n') {
            out.push_str(&entry.leading);
        } else {
            out.push('\n');
            out.push_str(entry.leading.trim_start());
        }
        out.push_str(&entry.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_core::{apply_edits, parse, Dialect};

    fn check_src(source: &str) -> Vec<Edit> {
        let tree = parse(source, Dialect::TypeScript).unwrap();
        check_import_sort(&tree, source)
    }

    fn check_with(source: &str, options: &ImportSortOptions) -> Vec<Edit> {
        let tree = parse(source, Dialect::TypeScript).unwrap();
        check_import_sort_with_options(&tree, source, options)
    }

    fn transform(source: &str) -> String {
        let edits = check_src(source);
        apply_edits(source, &edits).unwrap()
    }

    fn non_whitespace_sorted(s: &str) -> Vec<char> {
        let mut chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn test_outer_sort_by_length_then_alpha() {
        let source = "import { foo } from 'ab'\nimport { bar } from 'aa'\n";
        let fixed = transform(source);
        assert_eq!(fixed, "import { bar } from 'aa'\nimport { foo } from 'ab'\n");
        assert!(check_src(&fixed).is_empty());
    }

    #[test]
    fn test_already_sorted_no_report() {
        let source = "import fs from 'fs'\nimport { x } from './x'\n";
        assert!(check_src(source).is_empty());
    }

    #[test]
    fn test_single_import_no_report() {
        assert!(check_src("import { a } from 'x'\n").is_empty());
    }

    #[test]
    fn test_type_import_sorts_before() {
        let source = "import { bar } from './bar'\nimport type { Foo } from './types'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "import type { Foo } from './types'\nimport { bar } from './bar'\n"
        );
    }

    #[test]
    fn test_type_import_handling_after() {
        let options = ImportSortOptions {
            type_import_handling: TypeImportHandling::After,
            ..ImportSortOptions::default()
        };
        let source = "import type { Foo } from './types'\nimport { bar } from './bar'\n";
        let edits = check_with(source, &options);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(
            fixed,
            "import { bar } from './bar'\nimport type { Foo } from './types'\n"
        );
    }

    #[test]
    fn test_builtin_sorts_before_external() {
        let source = "import express from 'express'\nimport fs from 'node:fs'\n";
        let fixed = transform(source);
        assert_eq!(fixed, "import fs from 'node:fs'\nimport express from 'express'\n");
    }

    #[test]
    fn test_path_category_order() {
        let source = "import a from 'pkg'\nimport b from './sib'\nimport c from '../up'\nimport d from 'path'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "import d from 'path'\nimport c from '../up'\nimport b from './sib'\nimport a from 'pkg'\n"
        );
    }

    #[test]
    fn test_side_effect_imports_are_barriers() {
        let source = "import './polyfill'\nimport { b } from 'b'\nimport { a } from 'a'\nimport './styles.css'\nimport { d } from 'd'\nimport { c } from 'c'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "import './polyfill'\nimport { a } from 'a'\nimport { b } from 'b'\nimport './styles.css'\nimport { c } from 'c'\nimport { d } from 'd'\n"
        );
    }

    #[test]
    fn test_side_effect_participates_when_configured() {
        let options = ImportSortOptions {
            ignore_side_effect_imports: false,
            ..ImportSortOptions::default()
        };
        let source = "import './z.css'\nimport { a } from 'a'\n";
        let edits = check_with(source, &options);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "import { a } from 'a'\nimport './z.css'\n");
    }

    #[test]
    fn test_inner_specifier_sort() {
        let source = "import { ccc, bb, a } from 'x'\n";
        let edits = check_src(source);
        assert_eq!(edits.len(), 1);
        assert!(edits[0].message.contains("specifiers"));
        let fixed = transform(source);
        assert_eq!(fixed, "import { a, bb, ccc } from 'x'\n");
        assert!(check_src(&fixed).is_empty());
    }

    #[test]
    fn test_inner_multiline_with_comments() {
        let source = "import {\n  ccc, // charlie\n  // alpha docs\n  a,\n  bb,\n} from 'x'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "import {\n  // alpha docs\n  a,\n  bb,\n  ccc, // charlie\n} from 'x'\n"
        );
        assert!(check_src(&fixed).is_empty());
    }

    #[test]
    fn test_multiple_trailing_comments_all_kept() {
        // both comments stay attached to `bb` when it moves
        let source = "import {\n  bb, /* x */ /* y */\n  a,\n} from 'm'\n";
        let fixed = transform(source);
        assert_eq!(fixed, "import {\n  a,\n  bb, /* x */ /* y */\n} from 'm'\n");
        assert_eq!(non_whitespace_sorted(source), non_whitespace_sorted(&fixed));
        assert!(check_src(&fixed).is_empty());
    }

    #[test]
    fn test_trailing_comment_excluded_from_sort_keys() {
        // the comment would out-length the second import if it counted
        let source = "import { b } from 'x' // a very long trailing note\nimport { cc } from 'x'\n";
        assert!(check_src(source).is_empty());
    }

    #[test]
    fn test_text_fidelity() {
        let source = "import { foo } from 'ab' // keep me\nimport { bar, a } from 'aa'\n\nimport type { T } from './t'\n";
        let fixed = transform(source);
        assert_eq!(non_whitespace_sorted(source), non_whitespace_sorted(&fixed));
    }

    #[test]
    fn test_trailing_comment_travels_with_import() {
        let source = "import { foo } from 'zz' // zz comment\nimport { bar } from 'aa'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "import { bar } from 'aa'\nimport { foo } from 'zz' // zz comment\n"
        );
    }

    #[test]
    fn test_leading_comment_travels_with_import() {
        let source = "import { foo } from 'zz'\n// aa docs\nimport { bar } from 'aa'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "// aa docs\nimport { bar } from 'aa'\nimport { foo } from 'zz'\n"
        );
    }

    #[test]
    fn test_header_comment_stays_put() {
        let source = "// app entry\nimport { foo } from 'zz'\nimport { bar } from 'aa'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "// app entry\nimport { bar } from 'aa'\nimport { foo } from 'zz'\n"
        );
    }

    #[test]
    fn test_directive_before_block() {
        let source = "'use client'\nimport { foo } from 'zz'\nimport { bar } from 'aa'\n";
        let fixed = transform(source);
        assert_eq!(
            fixed,
            "'use client'\nimport { bar } from 'aa'\nimport { foo } from 'zz'\n"
        );
    }

    #[test]
    fn test_block_stops_at_first_statement() {
        let source = "import { foo } from 'zz'\nconst x = 1\nimport { bar } from 'aa'\n";
        assert!(check_src(source).is_empty());
    }

    #[test]
    fn test_path_groups_override() {
        let options = ImportSortOptions {
            path_groups: vec![PathGroup {
                pattern: "^@corp/".to_string(),
                group: PathCategory::Builtin,
            }],
            ..ImportSortOptions::default()
        };
        let source = "import { z } from 'zzz-lib'\nimport { x } from '@corp/x'\n";
        let edits = check_with(source, &options);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "import { x } from '@corp/x'\nimport { z } from 'zzz-lib'\n");
    }

    #[test]
    fn test_malformed_path_group_dropped() {
        let options = ImportSortOptions {
            path_groups: vec![PathGroup {
                pattern: "([".to_string(),
                group: PathCategory::Builtin,
            }],
            ..ImportSortOptions::default()
        };
        // falls through to default classification without aborting the rule
        let source = "import { foo } from 'ab'\nimport { bar } from 'aa'\n";
        let edits = check_with(source, &options);
        let fixed = apply_edits(source, &edits).unwrap();
        assert_eq!(fixed, "import { bar } from 'aa'\nimport { foo } from 'ab'\n");
    }

    #[test]
    fn test_stable_tie_break_case_insensitive() {
        let options = ImportSortOptions {
            outer: SortKeyOptions {
                case_sensitive: false,
                ..SortKeyOptions::default()
            },
            ..ImportSortOptions::default()
        };
        // equal length, equal case-normalized key: input order wins
        let source = "import { B } from 'x'\nimport { b } from 'x'\n";
        assert!(check_with(source, &options).is_empty());
    }

    #[test]
    fn test_category_rank_namespace_default_named() {
        let source = "import * as ns from 'x'\nimport def1 from 'x'\nimport { na } from 'x'\n";
        assert!(check_src(source).is_empty());
    }

    #[test]
    fn test_same_line_imports_get_separator() {
        let source = "import { foo } from 'zz'; import { bar } from 'aa'\n";
        let fixed = transform(source);
        assert_eq!(fixed, "import { bar } from 'aa'\nimport { foo } from 'zz';\n");
    }
}
