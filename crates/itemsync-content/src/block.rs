//! Pattern-based block extraction
//!
//! Blocks are located by scanning raw text for an opening tag of the
//! designated name at the start of a line and the first matching closing tag
//! after it. No document tree is built, so comments, stray tags and other
//! non-well-formed markup elsewhere in the document are irrelevant.
//!
//! ```text
//! <indent><Item attributes>inner</Item>
//! ```
//!
//! Known limitation: a block tag nested inside another block of the same tag
//! is not supported. Such openers are rejected (left as passthrough text)
//! rather than matched partially.

use regex::Regex;
use std::ops::Range;

use crate::error::{Result, validate_name};

/// A block located in a document.
///
/// Borrows from the scanned source and only lives for one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock<'a> {
    /// Leading whitespace on the line of the opening tag
    pub indent: &'a str,
    /// Raw text between the tag name and the `>` of the opening tag
    pub attributes: &'a str,
    /// Everything between the opening and closing tags
    pub inner: &'a str,
    /// Byte range of the whole block, indentation included
    pub span: Range<usize>,
    /// Byte range of `inner` in the source
    pub inner_span: Range<usize>,
}

/// Scans documents for blocks of one tag.
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    tag: String,
    /// Opener at the start of a line, capturing indentation and attributes
    line_opener: Regex,
    /// Opener anywhere, used to reject blocks that swallow another opener
    any_opener: Regex,
    closer: Regex,
    comment: Regex,
}

impl BlockExtractor {
    /// Create an extractor for `<tag ...>...</tag>` blocks.
    pub fn new(tag: &str) -> Result<Self> {
        validate_name("tag", tag)?;
        let tag_pattern = regex::escape(tag);
        // Attributes either are pure whitespace or start with whitespace and
        // do not end in '/', so self-closing tags and longer tag names that
        // share the prefix never open a block.
        let opener = format!(r"<{tag_pattern}(?P<attrs>\s[^>]*[^/>]|\s*)>");

        Ok(Self {
            tag: tag.to_string(),
            line_opener: Regex::new(&format!(r"(?m)^(?P<indent>[ \t]*){opener}"))?,
            any_opener: Regex::new(&opener)?,
            closer: Regex::new(&format!(r"</{tag_pattern}\s*>"))?,
            comment: Regex::new(r"(?s)<!--.*?-->")?,
        })
    }

    /// The tag name this extractor looks for.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Extract every block of the configured tag, in document order.
    ///
    /// An opener whose closing tag is missing, or whose body would contain
    /// another opener of the same tag, is skipped.
    pub fn extract<'a>(&self, source: &'a str) -> Vec<ContentBlock<'a>> {
        let mut blocks = Vec::new();
        let mut cursor = 0;

        for caps in self.line_opener.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() < cursor {
                continue;
            }
            let (Some(indent), Some(attrs)) = (caps.name("indent"), caps.name("attrs")) else {
                continue;
            };

            let inner_start = whole.end();
            let Some(close) = self.closer.find_at(source, inner_start) else {
                tracing::warn!(
                    tag = %self.tag,
                    offset = whole.start(),
                    "Unterminated block, leaving it untouched"
                );
                continue;
            };

            let inner = &source[inner_start..close.start()];
            if self.contains_opener(inner) {
                tracing::warn!(
                    tag = %self.tag,
                    offset = whole.start(),
                    "Block contains another opening tag, leaving it untouched"
                );
                continue;
            }

            blocks.push(ContentBlock {
                indent: indent.as_str(),
                attributes: attrs.as_str(),
                inner,
                span: whole.start()..close.end(),
                inner_span: inner_start..close.start(),
            });
            cursor = close.end();
        }

        blocks
    }

    /// Whether `inner` holds an opener outside of `<!-- -->` comments.
    fn contains_opener(&self, inner: &str) -> bool {
        if !self.any_opener.is_match(inner) {
            return false;
        }
        self.any_opener.is_match(&self.comment.replace_all(inner, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items() -> BlockExtractor {
        BlockExtractor::new("Item").unwrap()
    }

    #[test]
    fn test_extract_empty() {
        assert!(items().extract("no blocks here").is_empty());
    }

    #[test]
    fn test_extract_single_block() {
        let source = "<Items>\n\t<Item identifier=\"rope\">\n\t\t<price>5</price>\n\t</Item>\n</Items>\n";
        let blocks = items().extract(source);

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.indent, "\t");
        assert_eq!(block.attributes, " identifier=\"rope\"");
        assert_eq!(block.inner, "\n\t\t<price>5</price>\n\t");
        assert_eq!(&source[block.span.clone()], "\t<Item identifier=\"rope\">\n\t\t<price>5</price>\n\t</Item>");
        assert_eq!(&source[block.inner_span.clone()], block.inner);
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let source = "<Item identifier=\"a\">1</Item>\n<Item identifier=\"b\">2</Item>\n";
        let inners: Vec<_> = items().extract(source).iter().map(|b| b.inner).collect();
        assert_eq!(inners, vec!["1", "2"]);
    }

    #[test]
    fn test_extract_tolerates_unrelated_markup() {
        let source = "<!-- stray comment <Item> -->\n<Broken attr=>\n<Item identifier=\"a\">\n  <!-- note -->\n  <Sprite texture=\"x.png\"/>\n</Item>\n</Unclosed>";
        let blocks = items().extract(source);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].inner.contains("<Sprite texture=\"x.png\"/>"));
    }

    #[test]
    fn test_extract_allows_tag_mentioned_in_comment() {
        let source = "<Item identifier=\"a\">\n\t<!-- copied from <Item identifier=\"old\"> -->\n\t<price>5</price>\n</Item>\n";
        let blocks = items().extract(source);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attributes, " identifier=\"a\"");
    }

    #[test]
    fn test_extract_rejects_opener_outside_comment() {
        let source = "<Item identifier=\"a\">\n\t<!-- note -->\n\t<Item identifier=\"b\">\n</Item>\n";
        let blocks = items().extract(source);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attributes, " identifier=\"b\"");
    }

    #[test]
    fn test_extract_ignores_self_closing_and_longer_tag_names() {
        let source = "<Item identifier=\"solo\"/>\n<ItemContainer capacity=\"2\">\n</ItemContainer>\n<Item identifier=\"real\">x</Item>";
        let blocks = items().extract(source);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attributes, " identifier=\"real\"");
    }

    #[test]
    fn test_extract_requires_opener_at_line_start() {
        let source = "<Items><Item identifier=\"inline\">x</Item></Items>";
        assert!(items().extract(source).is_empty());
    }

    #[test]
    fn test_extract_skips_unterminated_opener_without_swallowing_next() {
        let source = "<Item identifier=\"open\">\n\t<price>1</price>\n<Item identifier=\"closed\">\n\t<price>2</price>\n</Item>\n";
        let blocks = items().extract(source);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attributes, " identifier=\"closed\"");
    }

    #[test]
    fn test_extract_skips_trailing_unterminated_opener() {
        let source = "<Item identifier=\"a\">x</Item>\n<Item identifier=\"b\">\n";
        let blocks = items().extract(source);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].inner, "x");
    }

    #[test]
    fn test_extract_bare_tag_without_attributes() {
        let blocks = items().extract("<Item>body</Item>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attributes, "");
    }

    #[test]
    fn test_extract_custom_tag() {
        let extractor = BlockExtractor::new("Character").unwrap();
        let blocks = extractor.extract("<Character speciesname=\"crawler\">\n</Character>\n<Item identifier=\"x\"></Item>");
        assert_eq!(extractor.tag(), "Character");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_new_rejects_invalid_tag() {
        assert!(BlockExtractor::new("").is_err());
        assert!(BlockExtractor::new("It em").is_err());
    }
}
