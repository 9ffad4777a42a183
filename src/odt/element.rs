//! Mutable element tree for ODF XML parts.
//!
//! Every structured part of the package is parsed into an [`Element`] tree
//! that the binders mutate in place. Nodes are either elements (tag name,
//! ordered attributes, ordered children) or text leaves, so mixed content
//! such as `<text:p>Dear <text:database-display>…</text:database-display>,
//! </text:p>` survives a parse/serialize round trip with its interleaving
//! intact.

use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A node in a parsed XML part: an element or a text leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A nested element
    Element(Element),
    /// A run of character data
    Text(String),
}

/// An XML element with ordered attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag_name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create a new element with no attributes or children
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get the tag name of this element
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set attribute value, keeping the attribute's original position if it
    /// already exists
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        for (key, existing) in &mut self.attributes {
            if key == name {
                *existing = value.to_string();
                return;
            }
        }
        self.attributes.push((name.to_string(), value.to_string()));
    }

    /// Get the ordered child nodes
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Append a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Get the first child that is an element
    pub fn first_child_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Get the first child that is an element, mutably
    pub fn first_child_element_mut(&mut self) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all descendants, in document
    /// order
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Element(el) => el.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }

    /// Replace all children with a single text leaf
    pub fn set_text_content(&mut self, text: &str) {
        self.children.clear();
        self.children.push(Node::Text(text.to_string()));
    }

    /// All elements with the given tag in this subtree, in document order.
    /// Includes this element itself if it matches, and descends into matches.
    pub fn elements_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect_by_tag(tag, &mut out);
        out
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        if self.tag_name == tag {
            out.push(self);
        }
        for child in &self.children {
            if let Node::Element(el) = child {
                el.collect_by_tag(tag, out);
            }
        }
    }

    /// Visit every element with the given tag in this subtree mutably, in
    /// document order, failing fast on the first error the visitor returns.
    ///
    /// Children appended by the visitor are visited too, since the visitor
    /// runs before its element's subtree is descended into.
    pub fn for_each_element_mut<F>(&mut self, tag: &str, f: &mut F) -> Result<()>
    where
        F: FnMut(&mut Element) -> Result<()>,
    {
        if self.tag_name == tag {
            f(self)?;
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.for_each_element_mut(tag, f)?;
            }
        }
        Ok(())
    }

    /// First element with the given tag in this subtree, mutably
    pub fn find_first_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.tag_name == tag {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if let Some(found) = el.find_first_mut(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Parse an XML part into its root element.
    ///
    /// The XML declaration, comments, and processing instructions are
    /// dropped; the declaration is regenerated on write.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(Self::from_start_tag(&e)?);
                },
                Ok(Event::Empty(e)) => {
                    let element = Self::from_start_tag(&e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => return Ok(element),
                    }
                },
                Ok(Event::Text(t)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = t.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                },
                Ok(Event::CData(t)) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8(t.into_inner().into_owned())
                            .map_err(|_| Error::Xml("invalid UTF-8 in CDATA".to_string()))?;
                        parent.children.push(Node::Text(text));
                    }
                },
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(Node::Element(element)),
                            None => return Ok(element),
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => return Err(Error::Xml(e.to_string())),
            }
            buf.clear();
        }

        Err(Error::Xml("no root element found".to_string()))
    }

    fn from_start_tag(e: &BytesStart) -> Result<Element> {
        let tag_name = String::from_utf8(e.name().as_ref().to_vec())
            .map_err(|_| Error::Xml("invalid UTF-8 in tag name".to_string()))?;
        let mut element = Element::new(&tag_name);

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Xml(e.to_string()))?;
            let key = String::from_utf8(attr.key.as_ref().to_vec())
                .map_err(|_| Error::Xml("invalid UTF-8 in attribute name".to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(e.to_string()))?;
            element.attributes.push((key, value.into_owned()));
        }

        Ok(element)
    }

    /// Serialize this element and its subtree to XML, without a declaration
    pub fn to_xml_string(&self) -> String {
        let mut xml = String::new();
        self.write_xml(&mut xml);
        xml
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag_name);

        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            push_escaped_attribute(out, value);
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Element(el) => el.write_xml(out),
                Node::Text(text) => push_escaped_text(out, text),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag_name);
        out.push('>');
    }
}

fn push_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attribute(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_mixed_content() {
        let xml = b"<text:p>Dear <text:span>John</text:span>, hello</text:p>";
        let root = Element::from_bytes(xml).unwrap();

        assert_eq!(root.tag_name(), "text:p");
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.text_content(), "Dear John, hello");
        assert_eq!(root.to_xml_string(), String::from_utf8_lossy(xml));
    }

    #[test]
    fn test_parse_preserves_attribute_order() {
        let xml = br#"<draw:frame draw:name="Image1" draw:z-index="3" svg:width="2cm"/>"#;
        let root = Element::from_bytes(xml).unwrap();

        assert_eq!(root.get_attribute("draw:name"), Some("Image1"));
        assert_eq!(root.to_xml_string(), String::from_utf8_lossy(xml));
    }

    #[test]
    fn test_set_attribute_keeps_position() {
        let xml = br#"<a x="1" y="2"/>"#;
        let mut root = Element::from_bytes(xml).unwrap();

        root.set_attribute("x", "9");
        root.set_attribute("z", "3");
        assert_eq!(root.to_xml_string(), r#"<a x="9" y="2" z="3"/>"#);
    }

    #[test]
    fn test_entities_round_trip() {
        let xml = b"<f>&lt;name&gt; &amp; co</f>";
        let root = Element::from_bytes(xml).unwrap();

        assert_eq!(root.text_content(), "<name> & co");
        assert_eq!(root.to_xml_string(), String::from_utf8_lossy(xml));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let mut root = Element::from_bytes(b"<f>old <b>bold</b></f>").unwrap();
        root.set_text_content("new");

        assert_eq!(root.to_xml_string(), "<f>new</f>");
    }

    #[test]
    fn test_elements_by_tag_is_recursive_and_ordered() {
        let xml = b"<t><r><c>1</c><c>2</c></r><g><r><c>3</c></r></g></t>";
        let root = Element::from_bytes(xml).unwrap();

        let cells = root.elements_by_tag("c");
        let texts: Vec<String> = cells.iter().map(|c| c.text_content()).collect();
        assert_eq!(texts, ["1", "2", "3"]);
    }

    #[test]
    fn test_for_each_element_mut_fails_fast() {
        let mut root = Element::from_bytes(b"<t><c>1</c><c>2</c><c>3</c></t>").unwrap();
        let mut visited = 0;
        let result = root.for_each_element_mut("c", &mut |cell| {
            visited += 1;
            if cell.text_content() == "2" {
                return Err(Error::Xml("stop".to_string()));
            }
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_find_first_mut_returns_document_order_match() {
        let mut root = Element::from_bytes(b"<t><a><p>first</p></a><p>second</p></t>").unwrap();
        root.find_first_mut("p").unwrap().set_text_content("patched");

        assert_eq!(root.to_xml_string(), "<t><a><p>patched</p></a><p>second</p></t>");
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(Element::from_bytes(b"<a><b></a>").is_err());
        assert!(Element::from_bytes(b"").is_err());
    }
}
