use super::{escape_attr, escape_text, is_void};
use crate::element::{Content, Element};

impl Element {
    /// Outer markup of this element.
    ///
    /// Generated ids are not emitted; only an explicit `id` attribute is.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }

    /// Markup of this element's children.
    pub fn inner_markup(&self) -> String {
        let mut out = String::new();
        write_content(&self.content, &mut out);
        out
    }
}

fn write_element(element: &Element, out: &mut String) {
    if element.is_text() {
        if let Content::Text(text) = &element.content {
            out.push_str(&escape_text(text));
        }
        return;
    }

    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    if !element.style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_attr(&element.style.to_css())));
    }
    out.push('>');

    if is_void(&element.tag) {
        return;
    }

    write_content(&element.content, out);
    out.push_str(&format!("</{}>", element.tag));
}

fn write_content(content: &Content, out: &mut String) {
    match content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }
}
