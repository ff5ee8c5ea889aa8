// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;
use std::ops::Range;

use pathdata::Stream;

/// Elements that actually draw something.
pub const DRAWABLE_ELEMENTS: &[&str] = &[
    "path", "circle", "rect", "ellipse", "polygon", "polyline", "line",
];

/// Parses an icon markup.
pub(crate) fn parse_document(text: &str) -> Result<roxmltree::Document, roxmltree::Error> {
    let xml_opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    roxmltree::Document::parse_with_options(text, xml_opt)
}

#[inline]
pub(crate) fn is_drawable(node: roxmltree::Node) -> bool {
    node.is_element() && DRAWABLE_ELEMENTS.contains(&node.tag_name().name())
}

#[inline]
pub(crate) fn is_element(node: roxmltree::Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Returns all drawable elements in the document order.
pub(crate) fn drawables<'a, 'input: 'a>(
    root: roxmltree::Node<'a, 'input>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    root.descendants().filter(|n| is_drawable(*n))
}

/// Returns a presentation property value.
///
/// A `style` declaration overrides an attribute with the same name.
pub(crate) fn property<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<&'a str> {
    if let Some(value) = style_declaration(node, name) {
        return Some(value);
    }

    node.attribute(name).map(str::trim)
}

/// Returns a declaration value from the `style` attribute.
pub(crate) fn style_declaration<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<&'a str> {
    let style = node.attribute("style")?;
    simplecss::DeclarationTokenizer::from(style)
        .filter(|d| d.name == name)
        .last()
        .map(|d| d.value)
}

/// Parses a length in user units.
///
/// Only unitless and `px` values are supported.
pub(crate) fn parse_length(value: &str) -> Option<f64> {
    let mut s = Stream::from(value.trim());
    let n = s.parse_number().ok()?;
    match s.slice_tail().trim() {
        "" | "px" => Some(n),
        _ => None,
    }
}

/// Parses a `viewBox` attribute into `[x, y, width, height]`.
pub(crate) fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let mut s = Stream::from(value.trim());
    let mut numbers = [0.0; 4];
    for n in &mut numbers {
        *n = s.parse_list_number().ok()?;
    }

    if !s.at_end() || numbers[2] <= 0.0 || numbers[3] <= 0.0 {
        return None;
    }

    Some(numbers)
}

/// Collects attribute edits and applies them to the original markup.
///
/// Untouched parts of the markup are preserved byte-for-byte.
pub(crate) struct Editor<'a> {
    text: &'a str,
    // Element start position -> attributes to set.
    patches: BTreeMap<usize, Vec<(String, String)>>,
}

impl<'a> Editor<'a> {
    pub fn new(text: &'a str) -> Self {
        Editor {
            text,
            patches: BTreeMap::new(),
        }
    }

    /// Sets an attribute on an element.
    ///
    /// The same property will be removed from the element's `style`.
    pub fn set_attribute(&mut self, node: roxmltree::Node, name: &str, value: &str) {
        let patch = self.patches.entry(node.range().start).or_default();
        match patch.iter_mut().find(|(n, _)| n == name) {
            Some(item) => item.1 = value.to_string(),
            None => patch.push((name.to_string(), value.to_string())),
        }
    }

    pub fn apply(self) -> String {
        if self.patches.is_empty() {
            return self.text.to_string();
        }

        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        for (pos, attrs) in &self.patches {
            let tag = match StartTag::parse(self.text, *pos) {
                Some(v) => v,
                None => {
                    log::warn!("Failed to locate an element at {}. Skipped.", pos);
                    continue;
                }
            };

            let mut inserted = String::new();
            for (name, value) in attrs {
                match tag.attribute(self.text, name) {
                    Some(attr) => edits.push((attr.value.clone(), escape(value))),
                    None => {
                        inserted.push(' ');
                        inserted.push_str(name);
                        inserted.push_str("=\"");
                        inserted.push_str(&escape(value));
                        inserted.push('"');
                    }
                }
            }

            if let Some(style) = tag.attribute(self.text, "style") {
                let names: Vec<&str> = attrs.iter().map(|(n, _)| n.as_str()).collect();
                if let Some(new_style) = strip_declarations(&self.text[style.value.clone()], &names)
                {
                    if new_style.is_empty() {
                        edits.push((style.full.clone(), String::new()));
                    } else {
                        edits.push((style.value.clone(), new_style));
                    }
                }
            }

            if !inserted.is_empty() {
                edits.push((tag.insert_at..tag.insert_at, inserted));
            }
        }

        // Apply from the end, so earlier ranges stay valid.
        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

        let mut text = self.text.to_string();
        for (range, value) in edits {
            text.replace_range(range, &value);
        }

        text
    }
}

// Returns `None` when nothing was removed.
fn strip_declarations(style: &str, names: &[&str]) -> Option<String> {
    let mut removed = false;
    let mut kept = Vec::new();
    for d in simplecss::DeclarationTokenizer::from(style) {
        if names.contains(&d.name) {
            removed = true;
        } else if d.important {
            kept.push(format!("{}:{} !important", d.name, d.value));
        } else {
            kept.push(format!("{}:{}", d.name, d.value));
        }
    }

    if removed {
        Some(kept.join(";"))
    } else {
        None
    }
}

fn escape(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(c),
        }
    }

    s
}

#[derive(Clone, Debug)]
struct AttributeSpan {
    name: Range<usize>,
    value: Range<usize>,
    // Includes the leading whitespace.
    full: Range<usize>,
}

/// Attribute positions inside an element start tag.
#[derive(Clone, Debug)]
struct StartTag {
    attributes: Vec<AttributeSpan>,
    // Right after the last attribute.
    insert_at: usize,
}

impl StartTag {
    fn parse(text: &str, pos: usize) -> Option<StartTag> {
        if pos >= text.len() {
            return None;
        }

        let mut s = Stream::from(text);
        s.advance(pos);

        if !s.is_curr_byte_eq(b'<') {
            return None;
        }

        s.advance(1);
        s.skip_bytes(|_, c| !is_tag_delimiter(c));

        let mut attributes = Vec::new();
        let mut insert_at = s.pos();
        loop {
            let ws_start = s.pos();
            s.skip_spaces();

            let c = s.curr_byte().ok()?;
            if c == b'/' || c == b'>' {
                break;
            }

            let name_start = s.pos();
            s.skip_bytes(|_, c| !is_tag_delimiter(c) && c != b'=');
            let name_end = s.pos();
            if name_start == name_end {
                return None;
            }

            s.skip_spaces();
            if !s.is_curr_byte_eq(b'=') {
                return None;
            }
            s.advance(1);
            s.skip_spaces();

            let quote = s.curr_byte().ok()?;
            if quote != b'"' && quote != b'\'' {
                return None;
            }
            s.advance(1);

            let value_start = s.pos();
            s.skip_bytes(|_, c| c != quote);
            if s.at_end() {
                return None;
            }
            let value_end = s.pos();
            s.advance(1);

            attributes.push(AttributeSpan {
                name: name_start..name_end,
                value: value_start..value_end,
                full: ws_start..s.pos(),
            });
            insert_at = s.pos();
        }

        Some(StartTag {
            attributes,
            insert_at,
        })
    }

    fn attribute(&self, text: &str, name: &str) -> Option<&AttributeSpan> {
        self.attributes
            .iter()
            .find(|a| &text[a.name.clone()] == name)
    }
}

#[inline]
fn is_tag_delimiter(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b'/' || c == b'>'
}
