//! File processing logic for restyle

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use restyle_core::{apply_edits, parse, Dialect};
use restyle_rules::{RuleOptions, RuleRegistry};

use crate::output::EditInfo;

/// A rule's fixes can expose further violations of the same rule, so each
/// rule reruns until its output settles. The cap guards against a fix that
/// never converges.
const MAX_PASSES: usize = 16;

/// Result of processing a single file
pub struct ProcessResult {
    /// Edits that were found/applied
    pub edits: Vec<EditInfo>,
    /// Original source code
    pub old_source: String,
    /// New source code after edits (only if edits were found)
    pub new_source: Option<String>,
}

/// Process a single source file and return the edits found
pub fn process_file(
    path: &Path,
    enabled_rules: &HashSet<String>,
    options: &RuleOptions,
) -> Result<Option<ProcessResult>> {
    let source_code = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let Some(dialect) = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Dialect::from_extension)
    else {
        return Ok(None);
    };

    let registry = RuleRegistry::with_options(options.clone());
    let mut current = source_code.clone();
    let mut edit_infos: Vec<EditInfo> = Vec::new();

    // Rules run one after another against a fresh parse, so edits from
    // different rules can never overlap
    for rule in registry.get_enabled(enabled_rules) {
        for _ in 0..MAX_PASSES {
            let Ok(tree) = parse(&current, dialect) else {
                return Ok(None);
            };
            if tree.root_node().has_error() && current == source_code {
                return Ok(None);
            }
            let edits = rule.check(&tree, &current);
            if edits.is_empty() {
                break;
            }
            for edit in &edits {
                let (line, column) = offset_to_line_column(&current, edit.start_offset());
                edit_infos.push(EditInfo {
                    rule: rule.name().to_string(),
                    line,
                    column,
                    message: edit.message.clone(),
                });
            }
            current = apply_edits(&current, &edits)
                .with_context(|| format!("Failed to apply edits to {}", path.display()))?;
        }
    }

    if edit_infos.is_empty() {
        return Ok(Some(ProcessResult {
            edits: vec![],
            old_source: source_code,
            new_source: None,
        }));
    }

    Ok(Some(ProcessResult {
        edits: edit_infos,
        old_source: source_code,
        new_source: Some(current),
    }))
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Convert byte offset to line and column numbers (1-based)
fn offset_to_line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
