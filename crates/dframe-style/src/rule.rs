//! Style rules and declaration validation.

use std::fmt::Write as _;

use cssparser::{Parser, ParserInput, Token};

use crate::error::{Error, Result};
use crate::selector::Selector;

/// A selector and its ordered declarations.
///
/// Each property appears at most once. Setting an existing property replaces
/// its value in place, so the first insertion fixes a property's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// The selector this rule applies to.
    pub selector: Selector,
    declarations: Vec<(String, String)>,
}

impl StyleRule {
    /// Create a rule with no declarations.
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            declarations: Vec::new(),
        }
    }

    /// Set a property, keeping its position if already present.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Get a property's value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property. Returns whether it was present.
    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|(p, _)| p != property);
        self.declarations.len() != before
    }

    /// Declarations in insertion order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the rule has no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Append this rule's CSS text to `out`.
    pub fn write_css(&self, out: &mut String) {
        let _ = writeln!(out, "{} {{", self.selector);
        for (property, value) in &self.declarations {
            let _ = writeln!(out, "  {}: {};", property, value);
        }
        out.push_str("}\n");
    }

    /// This rule's CSS text.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_css(&mut out);
        out
    }
}

/// Validate and normalize one declaration.
///
/// The property must be a single identifier; the value must be non-empty
/// and must not be able to end the declaration or the rule it is written
/// into. Both are returned trimmed.
pub(crate) fn validate_declaration(property: &str, value: &str) -> Result<(String, String)> {
    let property = property.trim();
    let value = value.trim();

    // The tokenizer drops comments, so an opener would otherwise swallow the
    // rest of the sheet once written out.
    for text in [property, value] {
        if text.contains("/*") || text.contains("*/") {
            return Err(Error::invalid_value(property, "Comments are not allowed in a declaration"));
        }
    }

    {
        let mut input = ParserInput::new(property);
        let mut parser = Parser::new(&mut input);
        let is_ident = matches!(parser.next_including_whitespace(), Ok(Token::Ident(_)));
        if !is_ident || !parser.is_exhausted() {
            return Err(Error::invalid_value(
                property,
                "Property name must be a single identifier",
            ));
        }
    }

    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut tokens = 0usize;
    loop {
        let rejected = match parser.next() {
            Ok(Token::Semicolon) => Some("';' is not allowed in a value"),
            Ok(Token::CurlyBracketBlock) | Ok(Token::CloseCurlyBracket) => {
                Some("Braces are not allowed in a value")
            }
            Ok(Token::CloseParenthesis) | Ok(Token::CloseSquareBracket) => {
                Some("Unbalanced bracket in value")
            }
            Ok(Token::BadString(_)) | Ok(Token::BadUrl(_)) => Some("Malformed string or url"),
            Ok(_) => None,
            Err(_) => break,
        };
        if let Some(message) = rejected {
            return Err(Error::invalid_value(property, message));
        }
        tokens += 1;
    }
    if tokens == 0 {
        return Err(Error::invalid_value(property, "Value must not be empty"));
    }

    Ok((property.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_merges_in_place() {
        let mut rule = StyleRule::new(Selector::class("QPushButton"));
        rule.set("color", "white");
        rule.set("padding", "4px");
        rule.set("color", "black");

        assert_eq!(
            rule.declarations().collect::<Vec<_>>(),
            vec![("color", "black"), ("padding", "4px")]
        );
        assert_eq!(rule.get("padding"), Some("4px"));
        assert!(rule.remove("padding"));
        assert!(!rule.remove("padding"));
    }

    #[test]
    fn css_text_format() {
        let mut rule = StyleRule::new(Selector::class("QPushButton"));
        rule.set("color", "white");
        assert_eq!(rule.to_css(), ".QPushButton {\n  color: white;\n}\n");
        assert_eq!(StyleRule::new(Selector::type_selector("span")).to_css(), "span {\n}\n");
    }

    #[test]
    fn accepts_ordinary_declarations() {
        for (p, v) in [
            ("color", "white"),
            ("background-color", "rgb(10, 20, 30)"),
            (" margin ", " 0 auto "),
            ("font-family", "\"Fira Sans\", sans-serif"),
            ("--accent", "#ff0"),
            ("width", "calc(100% - 4px) !important"),
        ] {
            assert!(validate_declaration(p, v).is_ok(), "{p}: {v}");
        }
        assert_eq!(
            validate_declaration(" margin ", " 0 auto ").unwrap(),
            ("margin".to_string(), "0 auto".to_string())
        );
    }

    #[test]
    fn rejects_bad_declarations() {
        for (p, v) in [
            ("", "red"),
            ("two words", "red"),
            ("color:", "red"),
            ("color", ""),
            ("color", "   "),
            ("color", "red; background: blue"),
            ("color", "red } body { color: blue"),
            ("color", "red)"),
            ("content", "\"broken\nstring\""),
            ("color", "red /*"),
            ("color", "red */ body { color: blue }"),
            ("color", "red /* note */"),
            ("color/*", "red"),
        ] {
            assert!(
                matches!(validate_declaration(p, v), Err(Error::InvalidValue { .. })),
                "{p:?}: {v:?} should be rejected"
            );
        }
    }
}
