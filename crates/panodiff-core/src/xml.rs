// Owned XML tree built on quick-xml.
//
// Panorama config responses are small (one document per request), so the
// whole payload is materialized into an owned tree. Filtering consumes the
// tree by value, which lets the selector move the matched element into a
// wrapper root without cloning.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

use crate::error::CoreError;

/// A child of an element: nested element or text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in document order (text nodes skipped).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

/// A parsed XML document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse a document from XML text.
    ///
    /// Whitespace-only text between elements is dropped, so two documents
    /// that differ only in formatting parse to equal trees. Comments,
    /// processing instructions, and the XML declaration are ignored.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event().map_err(CoreError::from_xml)? {
                Event::Start(e) => {
                    stack.push(element_from_start(&e)?);
                }
                Event::Empty(e) => {
                    let el = element_from_start(&e)?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::End(_) => {
                    let el = stack.pop().ok_or_else(|| CoreError::Parse {
                        message: "unexpected closing tag".into(),
                    })?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(CoreError::from_xml)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text));
                    }
                }
                Event::Eof => break,
                // Declaration, comments, PIs, DOCTYPE carry no config data.
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(CoreError::Parse {
                message: "unclosed element at end of document".into(),
            });
        }

        root.ok_or_else(|| CoreError::Parse {
            message: "document has no root element".into(),
        })
        .map(|root| Self { root })
    }

    /// Serialize with deterministic two-space indentation.
    ///
    /// Elements whose only children are text render inline
    /// (`<member>any</member>`), matching the usual pretty-printed form of
    /// PAN-OS configuration dumps. Output always ends with a newline.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, &self.root, 0);
        out
    }
}

fn element_from_start(e: &quick_xml::events::BytesStart<'_>) -> Result<Element, CoreError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut el = Element::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| CoreError::Parse {
            message: format!("malformed attribute: {err}"),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| CoreError::Parse {
                message: format!("malformed attribute value: {err}"),
            })?
            .into_owned();
        el.attributes.push((key, value));
    }

    Ok(el)
}

/// Attach a finished element to its parent, or install it as the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), CoreError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(el));
        return Ok(());
    }
    if root.is_some() {
        return Err(CoreError::Parse {
            message: "multiple root elements".into(),
        });
    }
    *root = Some(el);
    Ok(())
}

// ── Pretty printer ──────────────────────────────────────────────────

fn write_element(out: &mut String, el: &Element, depth: usize) {
    let indent = "  ".repeat(depth);

    out.push_str(&indent);
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if el.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    let text_only = el.children.iter().all(|n| matches!(n, Node::Text(_)));
    if text_only {
        out.push('>');
        for node in &el.children {
            if let Node::Text(text) = node {
                out.push_str(&escape(text.as_str()));
            }
        }
        out.push_str("</");
        out.push_str(&el.name);
        out.push_str(">\n");
        return;
    }

    out.push_str(">\n");
    for node in &el.children {
        match node {
            Node::Element(child) => write_element(out, child, depth + 1),
            Node::Text(text) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&escape(text.as_str()));
                out.push('\n');
            }
        }
    }
    out.push_str(&indent);
    out.push_str("</");
    out.push_str(&el.name);
    out.push_str(">\n");
}
