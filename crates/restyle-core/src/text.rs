//! Text-range reconstruction around tree nodes
//!
//! Rules that reorder nodes must replay the original whitespace and
//! comments around each node byte-for-byte. The helpers here compute how
//! far a node's range reaches once trailing punctuation and same-line
//! comments are absorbed, and classify comments as leading or trailing.

/// Extend a node's end offset over trailing content it owns: optional
/// horizontal whitespace, at most one `,`/`;` delimiter, and any same-line
/// comments. Stops at the first line break or at non-whitespace that is
/// none of the above, whichever comes first. Pure trailing spaces that are
/// not followed by owned content are not claimed.
pub fn trailing_extent(source: &str, end: usize) -> usize {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = end;
    let mut claimed = end;
    let mut punct_seen = false;

    loop {
        while pos < len && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
            pos += 1;
        }
        if pos >= len {
            break;
        }
        if !punct_seen && (bytes[pos] == b',' || bytes[pos] == b';') {
            pos += 1;
            punct_seen = true;
            claimed = pos;
            continue;
        }
        if source[pos..].starts_with("//") {
            while pos < len && bytes[pos] != b'\n' {
                pos += 1;
            }
            claimed = pos;
            break;
        }
        if source[pos..].starts_with("/*") {
            match source[pos..].find("*/") {
                Some(close) if !source[pos..pos + close].contains('\n') => {
                    pos += close + 2;
                    claimed = pos;
                    continue;
                }
                _ => break,
            }
        }
        break;
    }

    claimed
}

/// The leading span of a node: everything between the previous sibling's
/// (extended) end and this node's start
pub fn leading_span<'a>(source: &'a str, prev_end: usize, start: usize) -> &'a str {
    &source[prev_end..start]
}

/// A comment is trailing iff non-whitespace precedes it on its source line
/// within the enclosing container; otherwise it is leading
pub fn is_trailing_comment(source: &str, comment_start: usize, container_start: usize) -> bool {
    let line_start = source[..comment_start]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0)
        .max(container_start);
    source[line_start..comment_start]
        .chars()
        .any(|c| !c.is_whitespace())
}

/// Drop every whitespace character from a span, keeping separators and any
/// other non-whitespace content in order
pub fn collapse_whitespace(span: &str) -> String {
    span.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalize a node's rendered text for comparison keys: whitespace runs
/// become a single space and the ends are trimmed
pub fn normalize_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_ws = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            in_ws = true;
        } else {
            if in_ws && !out.is_empty() {
                out.push(' ');
            }
            in_ws = false;
            out.push(c);
        }
    }
    out
}

/// The indentation of the line containing `offset`
pub fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let rest = &source[line_start..];
    let ws_len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    &rest[..ws_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_extent_semicolon() {
        let source = "import a from 'a'; // keep\nnext";
        // node ends before the semicolon
        let end = trailing_extent(source, 17);
        assert_eq!(&source[17..end], "; // keep");
    }

    #[test]
    fn test_trailing_extent_comma_only() {
        let source = "a,\nb";
        assert_eq!(trailing_extent(source, 1), 2);
    }

    #[test]
    fn test_trailing_extent_stops_at_code() {
        let source = "a b";
        // the space before `b` is not claimed
        assert_eq!(trailing_extent(source, 1), 1);
    }

    #[test]
    fn test_trailing_extent_block_comment() {
        let source = "a, /* one */ /* two */\n";
        let end = trailing_extent(source, 1);
        assert_eq!(&source[1..end], ", /* one */ /* two */");
    }

    #[test]
    fn test_trailing_extent_multiline_block_not_claimed() {
        let source = "a, /* one\ntwo */";
        let end = trailing_extent(source, 1);
        assert_eq!(&source[1..end], ",");
    }

    #[test]
    fn test_is_trailing_comment() {
        let source = "{\n  a, // after a\n  // before b\n  b\n}";
        let trailing = source.find("// after").unwrap();
        let leading = source.find("// before").unwrap();
        assert!(is_trailing_comment(source, trailing, 0));
        assert!(!is_trailing_comment(source, leading, 0));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace(",\n    "), ",");
        assert_eq!(collapse_whitespace("\n  "), "");
    }

    #[test]
    fn test_normalize_inline() {
        assert_eq!(
            normalize_inline("import {\n  a,\n  b,\n} from 'x'"),
            "import { a, b, } from 'x'"
        );
    }

    #[test]
    fn test_line_indent() {
        let source = "{\n    a: 1\n}";
        let offset = source.find('a').unwrap();
        assert_eq!(line_indent(source, offset), "    ");
    }
}
