//! Identifier lookup in opening-tag attribute text

use regex::Regex;

use crate::error::{Result, validate_name};

/// Extracts the value of one identifying attribute from attribute text.
#[derive(Debug, Clone)]
pub struct IdentifierResolver {
    attribute: String,
    pattern: Regex,
}

impl IdentifierResolver {
    /// Create a resolver for `attribute="value"` (single quotes also accepted).
    pub fn new(attribute: &str) -> Result<Self> {
        validate_name("attribute", attribute)?;
        let pattern = Regex::new(&format!(
            r#"(?:^|\s){}\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#,
            regex::escape(attribute)
        ))?;
        Ok(Self {
            attribute: attribute.to_string(),
            pattern,
        })
    }

    /// The attribute name this resolver reads.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Resolve the identifier, or `None` when the attribute is absent or empty.
    pub fn resolve<'a>(&self, attributes: &'a str) -> Option<&'a str> {
        let caps = self.pattern.captures(attributes)?;
        let value = caps.name("dq").or_else(|| caps.name("sq"))?.as_str();
        (!value.is_empty()).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#" identifier="rope_1""#, Some("rope_1"))]
    #[case(r#" tags="smallitem" identifier="plank" category="Material""#, Some("plank"))]
    #[case(" identifier='quoted'", Some("quoted"))]
    #[case(" identifier = \"spaced\"", Some("spaced"))]
    #[case("\n\tidentifier=\"multiline\"", Some("multiline"))]
    #[case(r#" name="no id""#, None)]
    #[case(r#" identifier="""#, None)]
    #[case(r#" variantidentifier="other""#, None)]
    #[case("", None)]
    fn test_resolve(#[case] attributes: &str, #[case] expected: Option<&str>) {
        let resolver = IdentifierResolver::new("identifier").unwrap();
        assert_eq!(resolver.resolve(attributes), expected);
    }

    #[test]
    fn test_resolve_custom_attribute() {
        let resolver = IdentifierResolver::new("speciesname").unwrap();
        assert_eq!(resolver.attribute(), "speciesname");
        assert_eq!(resolver.resolve(r#" speciesname="crawler""#), Some("crawler"));
        assert_eq!(resolver.resolve(r#" identifier="crawler""#), None);
    }

    #[test]
    fn test_new_rejects_invalid_attribute() {
        assert!(IdentifierResolver::new("").is_err());
        assert!(IdentifierResolver::new("a=b").is_err());
    }
}
