//! The XML suppression format.
//!
//! ```xml
//! <suppressions>
//!   <suppress>
//!     <id>uninitvar</id>
//!     <fileName>src/file1.c</fileName>
//!     <lineNumber>10</lineNumber>
//!     <symbolName>var</symbolName>
//!   </suppress>
//! </suppressions>
//! ```
//!
//! Only `<suppress>` children of the root element are read. Unknown tags are
//! ignored, missing text is treated as empty.

use crate::error::SuppressionError;
use crate::suppression::Suppression;
use crate::utils::numbers::parse_line_number;

const SUPPRESS_TAG: &str = "suppress";

/// Reads every `<suppress>` element of an XML document.
///
/// Ids are not validated here.
///
/// # Errors
///
/// Returns [`SuppressionError::Xml`] if the document is malformed.
pub fn parse_document(content: &str) -> Result<Vec<Suppression>, SuppressionError> {
    let doc = roxmltree::Document::parse(content).map_err(|e| SuppressionError::Xml {
        message: e.to_string(),
    })?;

    let rules = doc
        .root_element()
        .children()
        .filter(|node| node.is_element() && node.has_tag_name(SUPPRESS_TAG))
        .map(|node| parse_suppress_element(&node))
        .collect();

    Ok(rules)
}

fn parse_suppress_element(node: &roxmltree::Node<'_, '_>) -> Suppression {
    let mut rule = Suppression::default();

    for child in node.children().filter(roxmltree::Node::is_element) {
        let text = child.text().unwrap_or_default();
        match child.tag_name().name() {
            "id" => rule.error_id = text.to_string(),
            "fileName" => rule.file_name = text.to_string(),
            "lineNumber" => rule.line_number = parse_line_number(text),
            "symbolName" => rule.symbol_name = text.to_string(),
            other => tracing::debug!("Ignoring <{other}> in <{SUPPRESS_TAG}>"),
        }
    }

    rule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_fields() {
        let xml = r"<suppressions>
  <suppress>
    <id>uninitvar</id>
    <fileName>src/file1.c</fileName>
    <lineNumber>10</lineNumber>
    <symbolName>var</symbolName>
  </suppress>
</suppressions>";
        let rules = parse_document(xml).unwrap();
        assert_eq!(
            rules,
            vec![Suppression::new("uninitvar")
                .with_file_name("src/file1.c")
                .with_line_number(10)
                .with_symbol_name("var")]
        );
    }

    #[test]
    fn test_only_suppress_elements_are_read() {
        let xml = r"<suppressions>
  <other><id>skipped</id></other>
  <suppress><id>kept</id></suppress>
</suppressions>";
        let rules = parse_document(xml).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].error_id, "kept");
    }

    #[test]
    fn test_missing_and_bad_values_default() {
        let xml = r"<suppressions>
  <suppress>
    <id>a</id>
    <fileName/>
    <lineNumber>ten</lineNumber>
    <unknown>x</unknown>
  </suppress>
  <suppress>
    <id>b</id>
    <lineNumber>-3</lineNumber>
  </suppress>
</suppressions>";
        let rules = parse_document(xml).unwrap();
        assert_eq!(rules[0], Suppression::new("a"));
        assert_eq!(rules[1], Suppression::new("b"));
    }

    #[test]
    fn test_empty_suppress_element() {
        let rules = parse_document("<suppressions><suppress/></suppressions>").unwrap();
        assert_eq!(rules, vec![Suppression::default()]);
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_document("<suppressions><suppress>").unwrap_err();
        assert!(matches!(err, SuppressionError::Xml { .. }));
    }
}
