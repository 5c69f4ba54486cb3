//! Lossless XML tree for package parts.
//!
//! WordprocessingML parts are read into a plain element tree so the checks can
//! edit a handful of nodes and write everything else back untouched. Names are
//! kept qualified (`w:tc`, `w:rPr`) exactly as they appear in the part.

use super::DocxError;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True when this node is an element with the given qualified name
    pub fn is_element(&self, name: &str) -> bool {
        self.as_element().is_some_and(|element| element.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(XmlNode::Text(text.to_string()));
        self
    }

    /// Parse a standalone element, e.g. `<w:tc>...</w:tc>`.
    ///
    /// Namespace prefixes don't need to be declared; the reader works on
    /// qualified names only.
    pub fn parse_fragment(xml: &str) -> Result<Self, DocxError> {
        Ok(XmlDocument::parse(xml.as_bytes())?.root)
    }

    /// Same element with its children dropped (name and attributes only)
    pub fn shell(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children
            .iter_mut()
            .filter_map(XmlNode::as_element_mut)
            .find(|element| element.name == name)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|node| node.is_element(name))
    }

    pub fn remove_child(&mut self, name: &str) -> Option<XmlElement> {
        let index = self.position_of(name)?;
        match self.children.remove(index) {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Insert `child` before the first element child that sorts after it in
    /// `order`. Names missing from `order` sort after every listed name.
    /// Returns the index the child landed at.
    pub fn insert_ordered(&mut self, child: XmlElement, order: &[&str]) -> usize {
        let rank = |name: &str| {
            order
                .iter()
                .position(|candidate| *candidate == name)
                .unwrap_or(order.len())
        };
        let child_rank = rank(&child.name);
        let index = self
            .children
            .iter()
            .position(|node| {
                node.as_element()
                    .is_some_and(|existing| rank(&existing.name) > child_rank)
            })
            .unwrap_or(self.children.len());
        self.children.insert(index, XmlNode::Element(child));
        index
    }

    /// Get the named child, inserting an empty one in schema order if absent
    pub fn ensure_child(&mut self, name: &str, order: &[&str]) -> &mut XmlElement {
        let index = match self.position_of(name) {
            Some(index) => index,
            None => self.insert_ordered(XmlElement::new(name), order),
        };
        match &mut self.children[index] {
            XmlNode::Element(element) => element,
            _ => unreachable!("position_of and insert_ordered only return element indices"),
        }
    }

    /// Concatenated text of direct text and CDATA children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A parsed XML part: whatever precedes the root (declaration, doctype,
/// whitespace, comments) plus the root element itself.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    prolog: Vec<Event<'static>>,
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, DocxError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = Reader::from_str(text);
        reader.trim_text(false);

        let mut prolog = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event()?;
            let node = match event {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                    continue;
                }
                Event::Empty(start) => XmlNode::Element(element_from_start(&start)?),
                Event::End(_) => XmlNode::Element(stack.pop().ok_or(DocxError::Unbalanced)?),
                Event::Eof => break,
                other if stack.is_empty() => {
                    // Outside the root element: keep the prolog verbatim and
                    // drop anything trailing the root.
                    if root.is_none() {
                        prolog.push(other.into_owned());
                    }
                    continue;
                }
                Event::Text(text) => XmlNode::Text(text.unescape()?.into_owned()),
                Event::CData(data) => {
                    XmlNode::CData(String::from_utf8_lossy(&data.into_inner()).into_owned())
                }
                Event::Comment(comment) => {
                    XmlNode::Comment(String::from_utf8_lossy(&comment).into_owned())
                }
                Event::PI(instruction) => {
                    XmlNode::ProcessingInstruction(String::from_utf8_lossy(&instruction).into_owned())
                }
                Event::Decl(_) | Event::DocType(_) => continue,
            };

            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    if let XmlNode::Element(element) = node {
                        root = Some(element);
                    }
                }
            }
        }

        if !stack.is_empty() {
            return Err(DocxError::Unbalanced);
        }

        Ok(Self {
            prolog,
            root: root.ok_or(DocxError::MissingRoot)?,
        })
    }

    /// Same prolog, different root
    pub fn with_root(&self, root: XmlElement) -> Self {
        Self {
            prolog: self.prolog.clone(),
            root,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut writer = Writer::new(Vec::new());
        for event in &self.prolog {
            writer.write_event(event)?;
        }
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }
}

fn element_from_start(start: &BytesStart) -> Result<XmlElement, DocxError> {
    let mut element = XmlElement::new(&String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), DocxError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            XmlNode::CData(data) => {
                writer.write_event(Event::CData(BytesCData::new(data.as_str())))?
            }
            XmlNode::Comment(comment) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
            }
            XmlNode::ProcessingInstruction(instruction) => {
                writer.write_event(Event::PI(BytesText::from_escaped(instruction.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
