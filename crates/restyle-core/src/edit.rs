//! Range-based source code editing

use std::ops::Range;
use thiserror::Error;

/// Errors that can occur during edit application
#[derive(Error, Debug)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit range {start}..{end} out of bounds for source length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

/// Represents a single code edit operation
#[derive(Debug, Clone)]
pub struct Edit {
    /// The byte range to replace (half-open)
    pub range: Range<usize>,
    /// The replacement text
    pub replacement: String,
    /// Human-readable description of the edit
    pub message: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(range: Range<usize>, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Create a pure insertion at `offset`
    pub fn insert(offset: usize, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(offset..offset, text, message)
    }

    /// Get the byte offset where this edit starts
    pub fn start_offset(&self) -> usize {
        self.range.start
    }

    /// Get the byte offset where this edit ends
    pub fn end_offset(&self) -> usize {
        self.range.end
    }
}

/// Apply edits to source code.
///
/// Edits are applied in reverse order (from end to start) to maintain
/// valid offsets throughout the process. Replacement text is spliced in
/// verbatim: whitespace in the replacement is exactly what the rule asked
/// for, since layout is the very thing the rules fix.
///
/// # Arguments
/// * `source` - The original source code
/// * `edits` - Slice of edits to apply
///
/// # Returns
/// * `Ok(String)` - The modified source code
/// * `Err(EditError)` - If edits overlap or are out of bounds
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    // Sort edits by start position (descending) for safe replacement
    let mut sorted_edits: Vec<&Edit> = edits.iter().collect();
    sorted_edits.sort_by(|a, b| b.start_offset().cmp(&a.start_offset()));

    // Validate: check for overlapping edits and bounds
    let source_len = source.len();
    let mut prev_start: Option<usize> = None;

    for edit in &sorted_edits {
        let start = edit.start_offset();
        let end = edit.end_offset();

        if end > source_len || start > end {
            return Err(EditError::RangeOutOfBounds {
                start,
                end,
                len: source_len,
            });
        }

        if let Some(prev) = prev_start {
            if end > prev {
                return Err(EditError::OverlappingEdits(start));
            }
        }

        prev_start = Some(start);
    }

    // Apply edits from end to start
    let mut result = source.to_string();

    for edit in sorted_edits {
        result.replace_range(edit.range.clone(), &edit.replacement);
    }

    Ok(result)
}
