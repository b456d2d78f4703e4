//! A small element tree built on top of `quick-xml`.
//!
//! The command-table and manifest schemas only need element names,
//! attributes and text, so documents are loaded into this generic tree and
//! the parsers walk it. Every element keeps the namespace its name resolved
//! to. Child lookups only match elements in the parent's namespace, so a
//! foreign or misprefixed element never stands in for a schema element.
//! Attribute lookups only match unqualified attributes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use thiserror::Error;

use crate::base::{LineCol, LineIndex};

/// Markup that could not be loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (at {position})")]
pub struct XmlError {
    pub message: String,
    pub position: LineCol,
}

/// One element with its attributes, text and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    position: LineCol,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Attribute {
    namespace: Option<String>,
    name: String,
    value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    /// Local name of the element (no namespace prefix).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI the element name resolved to, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up an unqualified attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.namespace.is_none() && attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Attribute value, or the empty string when the attribute is absent.
    pub fn attribute_or_empty(&self, name: &str) -> &str {
        self.attribute(name).unwrap_or_default()
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Child elements with the given local name in this element's namespace.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| self.is_schema_child(element, name))
    }

    /// First child element with the given local name in this element's namespace.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| self.is_schema_child(element, name))
    }

    fn is_schema_child(&self, element: &Element, name: &str) -> bool {
        element.name == name && element.namespace == self.namespace
    }

    /// Concatenated text of this element and all its descendants.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Line/column of the start tag.
    pub fn position(&self) -> LineCol {
        self.position
    }
}

/// A loaded document: exactly one root element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Load `text` into an element tree.
///
/// Fails on anything `quick-xml` rejects, on undeclared namespace prefixes,
/// on unbalanced or missing root elements and on non-whitespace text outside
/// the root.
pub fn parse(text: &str) -> Result<Document, XmlError> {
    let index = LineIndex::new(text);
    let mut reader = NsReader::from_str(text);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    let fail = |message: String, offset: usize| XmlError {
        message,
        position: index.line_col(offset),
    };

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|err| fail(err.to_string(), reader.error_position() as usize))?;

        match event {
            Event::Start(start) => {
                let element = open_element(&reader, &start, index.line_col(offset))
                    .map_err(|message| fail(message, offset))?;
                if root.is_some() && stack.is_empty() {
                    return Err(fail("multiple root elements".into(), offset));
                }
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start, index.line_col(offset))
                    .map_err(|message| fail(message, offset))?;
                close_element(element, &mut stack, &mut root)
                    .map_err(|message| fail(message, offset))?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| fail("unexpected end tag".into(), offset))?;
                close_element(element, &mut stack, &mut root)
                    .map_err(|message| fail(message, offset))?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| fail(err.to_string(), offset))?;
                push_text(&mut stack, &text).map_err(|message| fail(message, offset))?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let data = std::str::from_utf8(&bytes)
                    .map_err(|err| fail(err.to_string(), offset))?;
                push_text(&mut stack, data).map_err(|message| fail(message, offset))?;
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(fail(
            "unexpected end of document: unclosed element".into(),
            reader.buffer_position() as usize,
        ));
    }

    root.map(|root| Document { root })
        .ok_or_else(|| fail("root element is missing".into(), reader.buffer_position() as usize))
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    position: LineCol,
) -> Result<Element, String> {
    let (namespace, name) = reader.resolve_element(start.name());
    let namespace = resolved_namespace(namespace)?;
    let name = utf8(name.as_ref())?;

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| err.to_string())?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let (namespace, name) = reader.resolve_attribute(attribute.key);
        let namespace = resolved_namespace(namespace)?;
        let name = utf8(name.as_ref())?;
        let value = attribute.unescape_value().map_err(|err| err.to_string())?;
        attributes.push(Attribute {
            namespace,
            name,
            value: value.into_owned(),
        });
    }

    Ok(Element {
        name,
        namespace,
        attributes,
        children: Vec::new(),
        position,
    })
}

fn resolved_namespace(result: ResolveResult<'_>) -> Result<Option<String>, String> {
    match result {
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Bound(namespace) => utf8(namespace.as_ref()).map(Some),
        ResolveResult::Unknown(prefix) => Err(format!(
            "undeclared namespace prefix `{}`",
            String::from_utf8_lossy(&prefix)
        )),
    }
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err("multiple root elements".into()),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Text(text.to_owned())),
        None if text.trim().is_empty() => {}
        None => return Err("text is not allowed outside the root element".into()),
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<String, String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let doc = parse(
            "<?xml version='1.0' encoding='utf-8'?>\n\
             <Root xmlns='urn:test' xmlns:x='urn:x' a='1'>\n\
               <Child name='one'/>\n\
               <Child name='two'>text</Child>\n\
               <Other/>\n\
             </Root>",
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.name(), "Root");
        assert_eq!(root.attribute("a"), Some("1"));
        assert_eq!(root.attribute("xmlns"), None);
        assert_eq!(root.attribute("x"), None);

        let names: Vec<_> = root
            .children_named("Child")
            .map(|c| c.attribute_or_empty("name"))
            .collect();
        assert_eq!(names, ["one", "two"]);
        assert_eq!(root.elements().count(), 3);
        assert_eq!(root.child("Other").map(Element::name), Some("Other"));
    }

    #[test]
    fn test_prefixed_names_resolve_to_namespace() {
        let doc = parse("<x:Root xmlns:x='urn:x'><x:Item id='7' x:id='8'/></x:Root>").unwrap();
        let root = doc.root();
        assert_eq!(root.name(), "Root");
        assert_eq!(root.namespace(), Some("urn:x"));

        let item = root.child("Item").unwrap();
        assert_eq!(item.namespace(), Some("urn:x"));
        assert_eq!(item.attribute("id"), Some("7"));
    }

    #[test]
    fn test_qualified_attribute_is_not_matched_by_local_name() {
        let doc = parse("<Root xmlns='urn:a' xmlns:d='urn:d'><Item d:Id='x'/></Root>").unwrap();
        let item = doc.root().child("Item").unwrap();
        assert_eq!(item.attribute("Id"), None);
        assert_eq!(item.attribute_or_empty("Id"), "");
    }

    #[test]
    fn test_foreign_namespace_children_are_not_matched() {
        let doc = parse(
            "<Root xmlns='urn:a' xmlns:f='urn:foreign'>\
               <f:Item name='foreign'/>\
               <Item name='own'/>\
               <Item xmlns='urn:other' name='redeclared'/>\
             </Root>",
        )
        .unwrap();
        let root = doc.root();
        assert_eq!(root.elements().count(), 3);

        let names: Vec<_> = root
            .children_named("Item")
            .map(|item| item.attribute_or_empty("name"))
            .collect();
        assert_eq!(names, ["own"]);
        assert_eq!(root.child("Item").map(|item| item.attribute_or_empty("name")), Some("own"));
    }

    #[test]
    fn test_unprefixed_document_has_no_namespace() {
        let doc = parse("<a><b/></a>").unwrap();
        assert_eq!(doc.root().namespace(), None);
        assert!(doc.root().child("b").is_some());
    }

    #[test]
    fn test_undeclared_prefix_is_an_error() {
        let err = parse("<a>\n  <p:b/>\n</a>").unwrap_err();
        assert!(err.message.contains("`p`"), "{err}");
        assert_eq!(err.position, LineCol::new(1, 2));
    }

    #[test]
    fn test_inner_text_decodes_entities_and_cdata() {
        let doc = parse("<a> one &amp; <b>two</b><![CDATA[ <three> ]]></a>").unwrap();
        assert_eq!(doc.root().inner_text(), " one & two <three> ");
    }

    #[test]
    fn test_attribute_entities() {
        let doc = parse("<a v='&quot;x&quot; &lt; y'/>").unwrap();
        assert_eq!(doc.root().attribute("v"), Some("\"x\" < y"));
    }

    #[test]
    fn test_element_position() {
        let doc = parse("<a>\n  <b/>\n</a>").unwrap();
        let b = doc.root().child("b").unwrap();
        assert_eq!(b.position(), LineCol::new(1, 2));
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(parse("<a><b></a>").is_err());
    }

    #[test]
    fn test_unclosed_root() {
        let err = parse("<a><b/>").unwrap_err();
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_multiple_roots() {
        assert!(parse("<a/><b/>").is_err());
    }

    #[test]
    fn test_text_outside_root() {
        assert!(parse("junk <a/>").is_err());
    }
}
