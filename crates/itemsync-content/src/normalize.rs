//! Text normalization
//!
//! Two independent normalizations live here:
//!
//! - [`canonical`] collapses all whitespace and is used only to decide
//!   whether two contents are equal. Its output is never written anywhere.
//! - [`normalize_formatting`] unifies line endings and leading indentation
//!   and is applied to every text that is diffed or written.

/// Canonical comparison form: trimmed, every whitespace run collapsed to one space.
pub fn canonical(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert line endings to `\n` and each group of `tab_width` spaces in a
/// line's indentation to one tab.
///
/// Tabs and space groups may be mixed; the run ends at the first character
/// that is neither a tab nor a full space group. A `tab_width` of zero leaves
/// indentation alone.
pub fn normalize_formatting(text: &str, tab_width: usize) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if tab_width == 0 {
        return text;
    }

    let group = " ".repeat(tab_width);
    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let mut rest = line;
        loop {
            if let Some(stripped) = rest.strip_prefix('\t') {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix(group.as_str()) {
                rest = stripped;
            } else {
                break;
            }
            out.push('\t');
        }
        out.push_str(rest);
    }
    out
}

/// Prefix every non-blank line with `indent`; blank lines become empty.
pub fn reindent(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove the indentation shared by all non-blank lines.
pub fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(|acc, indent| common_prefix(acc, indent))
        .unwrap_or("");

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(common).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..end]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    // Both sides are ASCII whitespace, so byte positions are char boundaries.
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  <price>5</price>  ", "<price>5</price>")]
    #[case("a\n\t\tb\r\n   c", "a b c")]
    #[case("", "")]
    #[case(" \n\t ", "")]
    fn test_canonical(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(canonical(input), expected);
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let once = canonical("\n\t<a>\n    <b/>  </a>\n");
        assert_eq!(canonical(&once), once);
    }

    #[test]
    fn test_normalize_formatting_line_endings() {
        assert_eq!(normalize_formatting("a\r\nb\rc\n", 4), "a\nb\nc\n");
    }

    #[test]
    fn test_normalize_formatting_space_groups() {
        let input = "<a>\n    <b>\n        <c/>\n      <d/>\n    </b>\n</a>";
        let expected = "<a>\n\t<b>\n\t\t<c/>\n\t  <d/>\n\t</b>\n</a>";
        assert_eq!(normalize_formatting(input, 4), expected);
    }

    #[test]
    fn test_normalize_formatting_mixed_indentation() {
        assert_eq!(normalize_formatting("\t    x", 4), "\t\tx");
        assert_eq!(normalize_formatting("    \t  x", 4), "\t\t  x");
        assert_eq!(normalize_formatting("x    y", 4), "x    y");
    }

    #[test]
    fn test_normalize_formatting_custom_width() {
        assert_eq!(normalize_formatting("    x", 2), "\t\tx");
        assert_eq!(normalize_formatting("    x", 0), "    x");
    }

    #[test]
    fn test_reindent() {
        assert_eq!(reindent("<a/>\n\n<b/>", "\t\t"), "\t\t<a/>\n\n\t\t<b/>");
        assert_eq!(reindent("  \n<a/>", "\t"), "\n\t<a/>");
    }

    #[test]
    fn test_dedent() {
        assert_eq!(dedent("\n\t\t<a/>\n\t\t\t<b/>\n\t"), "\n<a/>\n\t<b/>\n");
        assert_eq!(dedent("<a/>\n\t\t<b/>"), "<a/>\n\t\t<b/>");
        assert_eq!(dedent("    x\n  y"), "  x\ny");
    }
}
