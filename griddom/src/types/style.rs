use super::Overflow;

/// Inline style of an element.
///
/// Only the properties the grid writes are typed. Everything else found in a
/// `style` attribute is kept verbatim in `other` so it survives a
/// parse/serialize cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub top: Option<i32>,
    pub overflow: Option<Overflow>,
    pub other: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn top(mut self, top: i32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.top.is_none()
            && self.overflow.is_none()
            && self.other.is_empty()
    }

    /// Parse the contents of a `style` attribute (`width:80px; overflow:hidden`).
    ///
    /// Pixel properties that do not parse as plain pixel values are kept in
    /// `other` rather than dropped.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::default();

        for declaration in text.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() {
                continue;
            }

            // A later declaration of the same property replaces an earlier one.
            style.other.retain(|(other, _)| *other != name);
            let known = match name.as_str() {
                "width" => assign(&mut style.width, parse_px(value)),
                "height" => assign(&mut style.height, parse_px(value)),
                "top" => assign(&mut style.top, parse_signed_px(value)),
                "overflow" => assign(&mut style.overflow, value.parse().ok()),
                _ => false,
            };

            if !known {
                style.other.push((name, value.to_string()));
            }
        }

        style
    }

    /// Serialize to `style` attribute syntax. Empty when no property is set.
    pub fn to_css(&self) -> String {
        let mut parts = Vec::new();
        if let Some(width) = self.width {
            parts.push(format!("width:{width}px"));
        }
        if let Some(height) = self.height {
            parts.push(format!("height:{height}px"));
        }
        if let Some(top) = self.top {
            parts.push(format!("top:{top}px"));
        }
        if let Some(overflow) = self.overflow {
            parts.push(format!("overflow:{overflow}"));
        }
        // A typed value set after parsing shadows the raw declaration.
        for (name, value) in &self.other {
            if !self.is_typed_set(name) {
                parts.push(format!("{name}:{value}"));
            }
        }
        parts.join(";")
    }

    fn is_typed_set(&self, name: &str) -> bool {
        match name {
            "width" => self.width.is_some(),
            "height" => self.height.is_some(),
            "top" => self.top.is_some(),
            "overflow" => self.overflow.is_some(),
            _ => false,
        }
    }
}

/// Store a parsed typed value. An unparsable one clears the slot and the raw
/// declaration lives in `other`.
fn assign<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    let parsed = value.is_some();
    *slot = value;
    parsed
}

fn parse_px(value: &str) -> Option<u32> {
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

fn parse_signed_px(value: &str) -> Option<i32> {
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}
