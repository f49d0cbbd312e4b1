// XML tree used to build request documents and to read vendor responses
use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use serde_json::{Map, Value};

use crate::error::{Result, ShippingError};

/// Renders an entity as an element labeled with its vendor tag.
pub trait ToNode {
    fn to_node(&self) -> XmlNode;
}

/// Populates an entity from a response element.
pub trait FromNode: Sized {
    fn from_node(node: &XmlNode) -> Result<Self>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(XmlNode::text)
    }

    // Slash separated path relative to this node, e.g. "Response/Error/ErrorCode"
    pub fn find(&self, path: &str) -> Option<&XmlNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(XmlNode::text)
    }

    pub fn push(&mut self, child: XmlNode) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn push_text(&mut self, name: &str, text: impl Into<String>) -> &mut Self {
        self.push(XmlNode::with_text(name, text))
    }

    pub fn push_opt_text<S: AsRef<str>>(&mut self, name: &str, value: Option<S>) -> &mut Self {
        if let Some(value) = value {
            self.push_text(name, value.as_ref());
        }
        self
    }

    // Indicator elements carry no content, only presence
    pub fn push_flag(&mut self, name: &str, flag: bool) -> &mut Self {
        if flag {
            self.push(XmlNode::new(name));
        }
        self
    }

    pub fn push_node<T: ToNode>(&mut self, value: &T) -> &mut Self {
        self.push(value.to_node())
    }

    pub fn push_opt<T: ToNode>(&mut self, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            self.push_node(value);
        }
        self
    }

    pub fn push_all<'a, T: ToNode + 'a>(&mut self, values: impl IntoIterator<Item = &'a T>) -> &mut Self {
        for value in values {
            self.push_node(value);
        }
        self
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| ShippingError::Xml(e.to_string()))?;
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| ShippingError::Xml(e.to_string()))
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| ShippingError::Xml(e.to_string()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| ShippingError::Xml(e.to_string()))?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| ShippingError::Xml(e.to_string()))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| ShippingError::Xml(e.to_string()))
    }

    pub fn parse(input: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<(XmlNode, String)> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push((node_from_start(&e)?, String::new())),
                Ok(Event::Empty(e)) => {
                    let node = node_from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let (mut node, text) = stack
                        .pop()
                        .ok_or_else(|| ShippingError::Xml("unexpected closing tag".to_string()))?;
                    let text = text.trim();
                    if !text.is_empty() {
                        node.text = Some(text.to_string());
                    }
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    let raw = utf8(&e)?;
                    let text = unescape(raw).map_err(|e| ShippingError::Xml(e.to_string()))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(e)) => {
                    let raw = utf8(&e)?;
                    append_text(&mut stack, raw);
                }
                Ok(Event::GeneralRef(e)) => {
                    let reference = format!("&{};", utf8(&e)?);
                    let text = unescape(&reference).map_err(|e| ShippingError::Xml(e.to_string()))?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ShippingError::Xml(format!(
                        "error at position {}: {}",
                        reader.error_position(),
                        e
                    )))
                }
            }
        }

        if let Some((node, _)) = stack.last() {
            return Err(ShippingError::Xml(format!("unclosed element <{}>", node.name)));
        }
        root.ok_or_else(|| ShippingError::Xml("document has no root element".to_string()))
    }

    // Generic structure: leaf text becomes a string, empty elements an empty object,
    // repeated siblings an array, attributes live under "@attributes".
    pub fn to_value(&self) -> Value {
        if self.children.is_empty() && self.attributes.is_empty() {
            return match &self.text {
                Some(text) => Value::String(text.clone()),
                None => Value::Object(Map::new()),
            };
        }

        let mut map = Map::new();
        if !self.attributes.is_empty() {
            let attributes = self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            map.insert("@attributes".to_string(), Value::Object(attributes));
        }
        if let Some(text) = &self.text {
            map.insert("#text".to_string(), Value::String(text.clone()));
        }
        for child in &self.children {
            let value = child.to_value();
            match map.get_mut(child.name()) {
                None => {
                    map.insert(child.name.clone(), value);
                }
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            }
        }
        Value::Object(map)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| ShippingError::Xml(e.to_string()))
}

fn node_from_start(start: &BytesStart) -> Result<XmlNode> {
    let mut node = XmlNode::new(utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ShippingError::Xml(e.to_string()))?;
        let key = utf8(attribute.key.as_ref())?;
        let value = unescape(utf8(&attribute.value)?)
            .map_err(|e| ShippingError::Xml(e.to_string()))?;
        node.attributes.push((key.to_string(), value.into_owned()));
    }
    Ok(node)
}

fn append_text(stack: &mut [(XmlNode, String)], text: &str) {
    // Text outside the root element is ignored
    if let Some((_, buffer)) = stack.last_mut() {
        buffer.push_str(text);
    }
}

fn attach(stack: &mut [(XmlNode, String)], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some((parent, _)) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(ShippingError::Xml("document has more than one root element".to_string())),
    }
}
