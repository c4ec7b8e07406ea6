use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::core::{InterpretError, Result};

/// Deepest element nesting [`Document::parse`] accepts.
pub const MAX_NESTING_DEPTH: usize = 256;

/// A fully parsed XML document.
///
/// Only ever constructed from well-formed input; [`Document::parse`]
/// never hands out a partial tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

/// An element with its resolved namespace URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

enum Binding {
    Bound(String),
    Unbound,
    Unknown(String),
}

fn binding(resolved: ResolveResult<'_>) -> Binding {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => {
            Binding::Bound(String::from_utf8_lossy(uri).into_owned())
        }
        ResolveResult::Unbound => Binding::Unbound,
        ResolveResult::Unknown(prefix) => {
            Binding::Unknown(String::from_utf8_lossy(&prefix).into_owned())
        }
    }
}

impl Document {
    /// Parse `xml` into a tree with namespace URIs resolved.
    ///
    /// Fails with [`InterpretError::MalformedXml`] on any well-formedness
    /// problem: mismatched or unclosed tags, bad entities, undeclared
    /// prefixes on elements or attributes, more than one root element or
    /// text outside the root. Nesting deeper than [`MAX_NESTING_DEPTH`]
    /// is rejected the same way.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut element_count = 0usize;

        loop {
            let step = reader
                .read_resolved_event()
                .map(|(resolved, event)| (binding(resolved), event));
            let (ns, event) = match step {
                Ok(step) => step,
                Err(e) => {
                    return Err(InterpretError::malformed(format!(
                        "{e} (at byte {})",
                        reader.buffer_position()
                    )));
                }
            };

            match event {
                Event::Start(ref e) => {
                    check_depth(open.len())?;
                    let element = Element::open(ns, e, &reader)?;
                    if open.is_empty() && root.is_some() {
                        return Err(InterpretError::malformed(format!(
                            "extra content after the root element: <{}>",
                            element.local_name
                        )));
                    }
                    element_count += 1;
                    open.push(element);
                }
                Event::Empty(ref e) => {
                    check_depth(open.len())?;
                    let element = Element::open(ns, e, &reader)?;
                    element_count += 1;
                    close(&mut open, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| InterpretError::malformed("unexpected closing tag"))?;
                    close(&mut open, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(InterpretError::malformed)?;
                    push_text(&mut open, &text)?;
                }
                Event::CData(ref e) => {
                    push_text(&mut open, &String::from_utf8_lossy(e))?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(InterpretError::malformed(format!(
                "unexpected end of document: element <{}> is not closed",
                unclosed.local_name
            )));
        }
        let root = root.ok_or_else(|| InterpretError::malformed("no root element found"))?;
        tracing::debug!(elements = element_count, root = %root.local_name, "parsed XML document");
        Ok(Self { root })
    }

    /// The document element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Every element in document order, starting with the root.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }

    /// Every element with the given namespace URI and local name, in
    /// document order, at any depth.
    pub fn elements_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements()
            .filter(move |e| e.is_named(namespace, local_name))
    }
}

fn check_depth(open: usize) -> Result<()> {
    if open >= MAX_NESTING_DEPTH {
        return Err(InterpretError::malformed(format!(
            "maximum nesting depth of {MAX_NESTING_DEPTH} exceeded"
        )));
    }
    Ok(())
}

fn close(open: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(InterpretError::malformed(format!(
                "extra content after the root element: <{}>",
                element.local_name
            )));
        }
    }
    Ok(())
}

fn push_text(open: &mut [Element], text: &str) -> Result<()> {
    match open.last_mut() {
        Some(parent) => match parent.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => parent.children.push(Node::Text(text.to_string())),
        },
        None if text.trim().is_empty() => {}
        None => return Err(InterpretError::malformed("text outside of the root element")),
    }
    Ok(())
}

impl Element {
    fn open(ns: Binding, start: &BytesStart<'_>, reader: &NsReader<&[u8]>) -> Result<Self> {
        let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let namespace = match ns {
            Binding::Bound(uri) => Some(uri),
            Binding::Unbound => None,
            Binding::Unknown(prefix) => {
                return Err(InterpretError::malformed(format!(
                    "undeclared namespace prefix `{prefix}` on <{local_name}>"
                )));
            }
        };

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(InterpretError::malformed)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let reserved = matches!(
                attr.key.prefix().map(|p| p.into_inner()),
                Some(b"xml" | b"xmlns")
            );
            let (resolved, _) = reader.resolve_attribute(attr.key);
            if !reserved && matches!(resolved, ResolveResult::Unknown(_)) {
                return Err(InterpretError::malformed(format!(
                    "undeclared namespace prefix on attribute `{key}` of <{local_name}>"
                )));
            }
            let value = attr
                .unescape_value()
                .map_err(InterpretError::malformed)?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            namespace,
            local_name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Whether this element has exactly this namespace URI and local name.
    pub fn is_named(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }

    /// Value of the attribute with this qualified name, as written.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements (not including `self`), pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Concatenated text of every descendant text node, untrimmed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self.children.iter()];
        while let Some(top) = stack.last_mut() {
            match top.next() {
                Some(Node::Text(t)) => out.push_str(t),
                Some(Node::Element(e)) => stack.push(e.children.iter()),
                None => {
                    stack.pop();
                }
            }
        }
        out
    }
}

// Subtrees are flattened onto the heap so dropping never recurses.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(Node::Element(e)) => {
                    self.stack.push(e.children.iter());
                    return Some(e);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
