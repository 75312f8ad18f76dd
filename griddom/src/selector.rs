//! CSS-style selectors evaluated against the live element tree.
//!
//! Supports the subset delegated grid handlers are written in: type, universal,
//! class, id and attribute (`[attr]`, `[attr=value]`) selectors, the
//! descendant and child combinators, and comma-separated lists.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::element::Element;

/// Errors from parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected '{ch}' at position {position} in selector '{selector}'")]
    UnexpectedChar {
        selector: String,
        ch: char,
        position: usize,
    },
    #[error("unterminated attribute filter in selector '{0}'")]
    UnterminatedAttribute(String),
    #[error("combinator without a following selector in '{0}'")]
    DanglingCombinator(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrFilter {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrFilter>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        if element.is_text() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != element.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.get_attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|filter| match &filter.value {
            Some(value) => element.get_attr(&filter.name) == Some(value.as_str()),
            None => element.get_attr(&filter.name).is_some(),
        })
    }
}

/// A chain of compounds. Each combinator relates a compound to the one before it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse_list()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the last element of `path` matches.
    ///
    /// `path` is the chain from the tree root down to the candidate element;
    /// ancestors outside it are never consulted.
    pub fn matches(&self, path: &[&Element]) -> bool {
        self.alternatives
            .iter()
            .any(|complex| matches_at(&complex.parts, path))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn matches_at(parts: &[(Combinator, Compound)], path: &[&Element]) -> bool {
    let Some(((combinator, compound), rest)) = parts.split_last() else {
        return true;
    };
    let Some((element, ancestors)) = path.split_last() else {
        return false;
    };

    if !compound.matches(element) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    match combinator {
        Combinator::Child => matches_at(rest, ancestors),
        Combinator::Descendant => (0..ancestors.len())
            .rev()
            .any(|end| matches_at(rest, &ancestors[..=end])),
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self, ch: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.source.to_string(),
            ch,
            position: self.pos,
        }
    }

    fn parse_list(mut self) -> Result<Selector, SelectorError> {
        let mut alternatives = Vec::new();

        loop {
            self.skip_ws();
            alternatives.push(self.parse_complex()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                }
                Some(ch) => return Err(self.unexpected(ch)),
            }
        }

        Ok(Selector {
            source: self.source.trim().to_string(),
            alternatives,
        })
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let first = self.parse_compound()?;
        if first.is_empty() {
            return match self.peek() {
                Some(ch) => Err(self.unexpected(ch)),
                None => Err(SelectorError::Empty),
            };
        }

        let mut parts = vec![(Combinator::Descendant, first)];
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    Combinator::Child
                }
                Some(_) if had_ws => Combinator::Descendant,
                Some(ch) => return Err(self.unexpected(ch)),
            };

            let compound = self.parse_compound()?;
            if compound.is_empty() {
                return match self.peek() {
                    Some(ch) if ch != ',' => Err(self.unexpected(ch)),
                    _ => Err(SelectorError::DanglingCombinator(self.source.to_string())),
                };
            }
            parts.push((combinator, compound));
        }

        Ok(Complex { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.pos += 1;
            compound.tag = Some("*".to_string());
        } else if let Some(tag) = self.ident() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    let class = self.ident().ok_or_else(|| self.unexpected('.'))?;
                    compound.classes.push(class);
                }
                Some('#') => {
                    self.pos += 1;
                    let id = self.ident().ok_or_else(|| self.unexpected('#'))?;
                    compound.id = Some(id);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attr_filter()?);
                }
                _ => break,
            }
        }

        Ok(compound)
    }

    fn attr_filter(&mut self) -> Result<AttrFilter, SelectorError> {
        let source = self.source;
        let unterminated = || SelectorError::UnterminatedAttribute(source.to_string());

        self.skip_ws();
        let name = self.ident().ok_or_else(unterminated)?.to_ascii_lowercase();
        self.skip_ws();

        let value = match self.bump() {
            Some(']') => return Ok(AttrFilter { name, value: None }),
            Some('=') => {
                self.skip_ws();
                self.attr_value().ok_or_else(unterminated)?
            }
            _ => return Err(unterminated()),
        };

        self.skip_ws();
        match self.bump() {
            Some(']') => Ok(AttrFilter {
                name,
                value: Some(value),
            }),
            _ => Err(unterminated()),
        }
    }

    fn attr_value(&mut self) -> Option<String> {
        match self.peek()? {
            quote @ ('"' | '\'') => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.bump()? {
                        ch if ch == quote => return Some(value),
                        ch => value.push(ch),
                    }
                }
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|ch| ch != ']' && !ch.is_whitespace())
                {
                    self.pos += 1;
                }
                (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
            }
        }
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
        {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }
}
