use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::InlineStyle;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity. Taken from the `id` attribute when present, generated otherwise.
    pub id: String,
    /// Lower-case tag name, or `#text` for text nodes.
    pub tag: String,

    // Attributes in source order. `style` is never stored here.
    pub attrs: Vec<(String, String)>,
    pub style: InlineStyle,

    pub content: Content,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self {
            id: generate_id(&tag),
            tag,
            attrs: Vec::new(),
            style: InlineStyle::default(),
            content: Content::None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: TEXT_TAG.to_string(),
            attrs: Vec::new(),
            style: InlineStyle::default(),
            content: Content::Text(content.into()),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.set_attr("id", id);
        self
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    ///
    /// `id` also becomes the element id, `style` is parsed into `self.style`.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();

        if name == "style" {
            self.style = InlineStyle::parse(&value);
            return;
        }
        if name == "id" {
            self.id = value.clone();
        }

        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    pub fn set_children(&mut self, children: Vec<Element>) {
        self.content = if children.is_empty() {
            Content::None
        } else {
            Content::Children(children)
        };
    }

    pub fn clear_children(&mut self) {
        self.content = Content::None;
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }
}
