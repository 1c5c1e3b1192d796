use quick_xml::{
    Reader, Writer,
    events::{BytesCData, BytesEnd, BytesStart, BytesText, Event},
};

use crate::foundation::error::{MoviepackError, MoviepackResult};

/// Tag given to elements whose asset could not be resolved.
pub const PLACEHOLDER_TAG: &str = "ELEMENT";

#[derive(Clone, Debug, PartialEq, Eq)]
/// One child of an [`XmlElement`].
pub enum XmlNode {
    /// Nested element.
    Element(XmlElement),
    /// Unescaped character data.
    Text(String),
    /// `<![CDATA[...]]>` section, kept verbatim.
    CData(String),
    /// Comment body.
    Comment(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Owned, order-preserving XML element.
pub struct XmlElement {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Empty element named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute append.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Builder-style text append.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute, keeping its original position when replacing.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Iterate child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|n| match n {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.name == name)
    }

    /// Concatenated text and CDATA of the direct children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                _ => {}
            }
        }
        out
    }

    /// Trimmed text of the first child named `name`, if present and non-empty.
    pub fn child_text(&self, name: &str) -> Option<String> {
        let text = self.child(name)?.text();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Depth-first search for the first descendant named `name`.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for el in self.elements() {
            if el.name == name {
                return Some(el);
            }
            if let Some(found) = el.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Inert stand-in for an element whose asset failed to resolve.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TAG)
    }

    /// Whether this element is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_TAG && self.attributes.is_empty() && self.children.is_empty()
    }

    /// Parse a complete document and return its root element.
    pub fn parse(bytes: &[u8]) -> MoviepackResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MoviepackError::malformed_xml(format!("document is not utf-8: {e}")))?;
        let mut reader = Reader::from_str(text);

        let mut stack = Vec::<XmlElement>::new();
        let mut root = None::<XmlElement>;
        loop {
            let event = reader
                .read_event()
                .map_err(|e| MoviepackError::malformed_xml(e.to_string()))?;
            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let el = element_from_start(&start)?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::End(_) => {
                    let el = stack
                        .pop()
                        .ok_or_else(|| MoviepackError::malformed_xml("unbalanced end tag"))?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::Text(t) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| MoviepackError::malformed_xml(e.to_string()))?;
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Event::CData(c) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::CData(utf8(c.into_inner().into_owned())?));
                    }
                }
                Event::Comment(c) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(XmlNode::Comment(utf8(c.into_inner().into_owned())?));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(MoviepackError::malformed_xml(format!(
                "element '{}' is never closed",
                open.name
            )));
        }
        root.ok_or_else(|| MoviepackError::malformed_xml("document has no root element"))
    }

    /// Serialize this element (no declaration).
    pub fn to_fragment(&self) -> MoviepackResult<String> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self)?;
        utf8(writer.into_inner())
    }

    /// Serialize as a full document with `header` in front.
    pub fn to_document(&self, header: &str) -> MoviepackResult<Vec<u8>> {
        let mut out = header.as_bytes().to_vec();
        out.extend_from_slice(self.to_fragment()?.as_bytes());
        Ok(out)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> MoviepackResult<XmlElement> {
    let name = utf8(start.name().as_ref().to_vec())?;
    let mut el = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| MoviepackError::malformed_xml(e.to_string()))?;
        let key = utf8(attr.key.as_ref().to_vec())?;
        let value = attr
            .unescape_value()
            .map_err(|e| MoviepackError::malformed_xml(e.to_string()))?;
        el.attributes.push((key, value.into_owned()));
    }
    Ok(el)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    el: XmlElement,
) -> MoviepackResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(el));
        return Ok(());
    }
    if root.is_some() {
        return Err(MoviepackError::malformed_xml(format!(
            "second root element '{}'",
            el.name
        )));
    }
    *root = Some(el);
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &XmlElement) -> MoviepackResult<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for (k, v) in &el.attributes {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    if el.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &el.children {
        match child {
            XmlNode::Element(c) => write_element(writer, c)?,
            XmlNode::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
            XmlNode::CData(c) => emit(writer, Event::CData(BytesCData::new(c.as_str())))?,
            XmlNode::Comment(c) => {
                emit(writer, Event::Comment(BytesText::from_escaped(c.as_str())))?
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(el.name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> MoviepackResult<()> {
    writer
        .write_event(event)
        .map_err(|e| MoviepackError::Other(anyhow::anyhow!("write xml: {e}")))
}

fn utf8(bytes: Vec<u8>) -> MoviepackResult<String> {
    String::from_utf8(bytes).map_err(|e| MoviepackError::malformed_xml(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/document/xml.rs"]
mod tests;
