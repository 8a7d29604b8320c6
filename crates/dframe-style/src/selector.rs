//! Flat selectors.
//!
//! Only two selector forms exist: a bare type name (`QLabel`) and a single
//! class (`.QPushButton`). Matching is left to the render substrate; these
//! types only validate and print selectors.

use std::fmt;
use std::str::FromStr;

use cssparser::{Parser, ParserInput, Token};

use crate::error::{Error, Result};

/// A flat type-name or class selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Matches surfaces by element type, e.g. `button`.
    Type(String),
    /// Matches surfaces carrying a class, e.g. `.QPushButton`.
    Class(String),
}

impl Selector {
    /// Create a type selector.
    pub fn type_selector(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    /// Create a class selector.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Parse a selector, rejecting anything but a single flat identifier.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// ```
    /// use dframe_style::Selector;
    ///
    /// assert_eq!(Selector::parse(".QPushButton").unwrap(), Selector::class("QPushButton"));
    /// assert!(Selector::parse("QWidget > QLabel").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let mut input = ParserInput::new(trimmed);
        let mut parser = Parser::new(&mut input);

        let selector = match parser.next_including_whitespace().cloned() {
            Ok(Token::Ident(name)) => Self::Type(name.to_string()),
            Ok(Token::Delim('.')) => match parser.next_including_whitespace().cloned() {
                Ok(Token::Ident(name)) => Self::Class(name.to_string()),
                _ => {
                    return Err(Error::invalid_selector(text, "Expected class name after '.'"));
                }
            },
            Ok(_) => {
                return Err(Error::invalid_selector(
                    text,
                    "Expected a type name or a '.class' selector",
                ));
            }
            Err(_) => return Err(Error::invalid_selector(text, "Empty selector")),
        };

        if !parser.is_exhausted() {
            return Err(Error::invalid_selector(
                text,
                "Only flat type or class selectors are supported",
            ));
        }
        Ok(selector)
    }

    /// The identifier without any `.` prefix.
    pub fn name(&self) -> &str {
        match self {
            Self::Type(name) | Self::Class(name) => name,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => cssparser::serialize_identifier(name, f),
            Self::Class(name) => {
                f.write_str(".")?;
                cssparser::serialize_identifier(name, f)
            }
        }
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_type_and_class() {
        assert_eq!(Selector::parse("QLabel").unwrap(), Selector::type_selector("QLabel"));
        assert_eq!(Selector::parse("  .primary ").unwrap(), Selector::class("primary"));
        assert_eq!(Selector::parse("button").unwrap().name(), "button");
    }

    #[test]
    fn display_round_trips_source() {
        for source in ["QWidget", ".QPushButton", ".big-title"] {
            assert_eq!(Selector::parse(source).unwrap().to_string(), source);
        }
    }

    #[test]
    fn display_escapes_identifiers() {
        let escaped = Selector::parse(r".a\:hover").unwrap();
        assert_eq!(escaped, Selector::class("a:hover"));
        assert_eq!(escaped.to_string(), r".a\:hover");
        assert_eq!(Selector::class("x{}").to_string(), r".x\{\}");
        assert_eq!(Selector::type_selector("1st").to_string(), r"\31 st");
    }

    #[test]
    fn rejects_compound_and_complex_selectors() {
        for bad in [
            "",
            "   ",
            ".",
            ". QLabel",
            "#id",
            "QWidget QLabel",
            "QWidget > QLabel",
            "QPushButton:hover",
            "QPushButton.primary",
            ".a.b",
            "*",
            "a,b",
        ] {
            let err = Selector::parse(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidSelector { .. }),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
