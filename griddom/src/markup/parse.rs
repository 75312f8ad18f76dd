use log::trace;

use super::{decode_entities, is_void, MarkupError};
use crate::element::Element;

/// Parse a markup fragment into a list of top-level elements.
///
/// Whitespace-only text between tags is dropped.
pub fn parse_fragment(markup: &str) -> Result<Vec<Element>, MarkupError> {
    let mut parser = FragmentParser {
        src: markup,
        pos: 0,
        open: Vec::new(),
        roots: Vec::new(),
    };
    parser.run()?;
    trace!(
        "[markup] parsed {} top-level nodes from {} bytes",
        parser.roots.len(),
        markup.len()
    );
    Ok(parser.roots)
}

impl Element {
    /// Replace all children with the parsed `markup` in one write.
    ///
    /// The element is left untouched when the markup does not parse.
    pub fn set_inner_markup(&mut self, markup: &str) -> Result<(), MarkupError> {
        let children = parse_fragment(markup)?;
        self.set_children(children);
        Ok(())
    }
}

struct FragmentParser<'a> {
    src: &'a str,
    pos: usize,
    open: Vec<Element>,
    roots: Vec<Element>,
}

impl FragmentParser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn byte(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    fn run(&mut self) -> Result<(), MarkupError> {
        while self.pos < self.src.len() {
            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else if self.rest().starts_with("</") {
                self.close_tag()?;
            } else if self.byte(0) == Some(b'<')
                && self.byte(1).is_some_and(|b| b.is_ascii_alphabetic())
            {
                self.open_tag()?;
            } else {
                self.text();
            }
        }

        match self.open.pop() {
            Some(element) => Err(MarkupError::Unclosed(element.tag)),
            None => Ok(()),
        }
    }

    fn append(&mut self, element: Element) {
        match self.open.last_mut() {
            Some(parent) => parent.push_child(element),
            None => self.roots.push(element),
        }
    }

    fn skip_comment(&mut self) -> Result<(), MarkupError> {
        let start = self.pos;
        match self.rest()[4..].find("-->") {
            Some(end) => {
                self.pos += 4 + end + 3;
                Ok(())
            }
            None => Err(MarkupError::UnterminatedComment(start)),
        }
    }

    fn text(&mut self) {
        // A '<' that did not start a tag is literal text.
        let skip = usize::from(self.byte(0) == Some(b'<'));
        let len = self.rest()[skip..]
            .find('<')
            .map_or(self.rest().len(), |i| i + skip);
        let raw = &self.src[self.pos..self.pos + len];
        self.pos += len;

        if !raw.trim().is_empty() {
            self.append(Element::text(decode_entities(raw)));
        }
    }

    fn close_tag(&mut self) -> Result<(), MarkupError> {
        let start = self.pos;
        let end = self
            .rest()
            .find('>')
            .ok_or(MarkupError::UnterminatedTag(start))?;
        let tag = self.rest()[2..end].trim().to_ascii_lowercase();
        self.pos += end + 1;

        if is_void(&tag) {
            return Ok(());
        }

        match self.open.pop() {
            Some(element) if element.tag == tag => {
                self.append(element);
                Ok(())
            }
            Some(element) => Err(MarkupError::MismatchedClose {
                expected: element.tag,
                found: tag,
                offset: start,
            }),
            None => Err(MarkupError::UnexpectedClose { tag, offset: start }),
        }
    }

    fn open_tag(&mut self) -> Result<(), MarkupError> {
        let start = self.pos;
        self.pos += 1;

        let name = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        let mut element = Element::new(name);
        let mut self_closing = false;

        loop {
            self.skip_ws();
            match self.byte(0) {
                None => return Err(MarkupError::UnterminatedTag(start)),
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') if self.byte(1) == Some(b'>') => {
                    self.pos += 2;
                    self_closing = true;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                }
                Some(_) => {
                    let (name, value) = self.attribute();
                    if !name.is_empty() {
                        element.set_attr(name, value);
                    }
                }
            }
        }

        if self_closing || is_void(&element.tag) {
            self.append(element);
        } else {
            self.open.push(element);
        }
        Ok(())
    }

    fn attribute(&mut self) -> (String, String) {
        let name = self
            .take_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'))
            .to_ascii_lowercase();
        if name.is_empty() {
            // Lone '=' or similar junk; step over it.
            self.pos += 1;
            return (name, String::new());
        }

        self.skip_ws();
        if self.byte(0) != Some(b'=') {
            return (name, String::new());
        }
        self.pos += 1;
        self.skip_ws();

        let value = match self.byte(0) {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let raw = self.take_while(|b| b != quote);
                if self.byte(0) == Some(quote) {
                    self.pos += 1;
                }
                raw
            }
            _ => self.take_while(|b| !b.is_ascii_whitespace() && b != b'>'),
        };

        (name, decode_entities(&value))
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while self.byte(0).is_some_and(&pred) {
            self.pos += 1;
        }
        self.src[start..self.pos].to_string()
    }

    fn skip_ws(&mut self) {
        while self.byte(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }
}
