// crates/ethercat-esi/src/xml.rs

//! A small owned element tree built with the `quick-xml` pull reader.
//!
//! The object dictionary is made of records whose child tags are not known in
//! advance (vendors add their own), so it is read generically here instead of
//! through the `serde` model used for devices.

use crate::error::EsiError;
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One XML element with its attributes, direct text content and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local tag name (namespace prefix removed).
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Text and CDATA directly inside this element before its first child,
    /// trimmed. Tails after a child element are dropped.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Returns the value of the attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Returns the text of the first direct child with the given tag.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(|c| c.text.as_str())
    }

    /// Collects every `child_tag` element whose parent is a `parent_tag` element,
    /// searching the whole subtree in document order (`.//Parent/Child`).
    pub fn find_nested<'a>(&'a self, parent_tag: &str, child_tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_nested(parent_tag, child_tag, &mut found);
        found
    }

    fn collect_nested<'a>(&'a self, parent_tag: &str, child_tag: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if self.tag == parent_tag && child.tag == child_tag {
                out.push(child);
            }
            child.collect_nested(parent_tag, child_tag, out);
        }
    }
}

/// Parses a complete XML document and returns its root element.
pub fn parse_document(xml_content: &str) -> Result<Element, EsiError> {
    let mut reader = Reader::from_str(xml_content);

    // The bottom of the stack is a synthetic holder for the root element.
    let mut stack: Vec<Element> = Vec::from([Element::default()]);

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open_element(&e)?),
            Event::Empty(e) => {
                let element = open_element(&e)?;
                push_child(&mut stack, element);
            }
            Event::End(_) => {
                // The reader verifies end names, so the holder is never popped here.
                if stack.len() > 1 {
                    if let Some(mut element) = stack.pop() {
                        let trimmed = element.text.trim();
                        if trimmed.len() != element.text.len() {
                            element.text = trimmed.to_owned();
                        }
                        push_child(&mut stack, element);
                    }
                }
            }
            Event::Text(e) => {
                let text = e.decode().map_err(quick_xml::Error::from)?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = e.decode().map_err(quick_xml::Error::from)?;
                append_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref().map_err(quick_xml::Error::from)? {
                    let mut buf = [0u8; 4];
                    append_text(&mut stack, ch.encode_utf8(&mut buf));
                } else {
                    let name = e.decode().map_err(quick_xml::Error::from)?;
                    let resolved = quick_xml::escape::resolve_predefined_entity(&name)
                        .map(|s| s.to_owned())
                        .unwrap_or_else(|| alloc::format!("&{};", name));
                    append_text(&mut stack, &resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(EsiError::MissingElement { element: "end tag" });
    }

    stack
        .pop()
        .and_then(|holder| holder.children.into_iter().next())
        .ok_or(EsiError::MissingElement {
            element: "document root",
        })
}

fn open_element(event: &BytesStart<'_>) -> Result<Element, EsiError> {
    let tag = String::from_utf8_lossy(event.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in event.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
        attributes.push((key, value.trim().to_owned()));
    }
    Ok(Element {
        tag,
        attributes,
        ..Default::default()
    })
}

fn push_child(stack: &mut [Element], element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        if current.children.is_empty() {
            current.text.push_str(text);
        }
    }
}
