// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! A small XML element tree for web service responses.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Encountered when a document cannot be parsed or serialized.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The underlying XML reader or writer failed.
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),
    /// An attribute could not be parsed.
    #[error(transparent)]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    /// Writing the document failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A name or text is not valid UTF-8.
    #[error("Invalid UTF-8 in document")]
    Utf8(#[from] std::str::Utf8Error),
    /// An end tag does not match the currently open element.
    #[error("Unexpected closing tag </{0}>")]
    UnexpectedEndTag(String),
    /// The document ended before all elements were closed.
    #[error("Unclosed element <{0}>")]
    UnclosedElement(String),
    /// The document does not have a root element.
    #[error("Document has no root element")]
    MissingRoot,
}

/// Diagnostic information about the HTTP exchange a document was fetched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    /// The requested URL.
    pub url: String,
    /// The HTTP status code.
    pub status: u16,
    /// The content type reported by the server.
    pub content_type: Option<String>,
    /// Time between sending the request and receiving the complete body.
    pub elapsed: Duration,
}

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A child element.
    Element(Element),
    /// Character data.
    Text(String),
}

/// An XML element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified name (including the namespace prefix, if any).
    pub name: String,
    /// Attributes in document order, keyed by qualified name.
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

/// Strip the namespace prefix from a qualified name.
fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl Element {
    /// Create an element without attributes and children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The element name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Get an attribute value by its local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == name)
            .map(|(_, value)| value.as_str())
    }

    /// Yields the child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Yields the child elements with the given local name.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements()
            .filter(move |element| element.local_name() == name)
    }

    /// Get the first child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.local_name() == name)
    }

    /// Follow a path of child element names.
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Yields all descendant elements with the given local name (depth-first, in document order).
    pub fn descendants<'a>(&'a self, name: &'a str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    /// Helper for [`Self::descendants`].
    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for element in self.elements() {
            if element.local_name() == name {
                found.push(element);
            }
            element.collect_descendants(name, found);
        }
    }

    /// The concatenated character data of this element (without descendants).
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// The text of the first child element with the given local name, if it is not empty.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(Element::text)
            .filter(|text| !text.is_empty())
    }

    /// Serialize this element (and its descendants).
    fn write<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write(writer)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The root element.
    pub root: Element,
    /// Information about the response this document was parsed from.
    pub response_info: Option<ResponseInfo>,
}

/// Create an element from a start tag.
fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let attributes = start
        .attributes()
        .map(|attribute| {
            let attribute = attribute?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, XmlError>>()?;
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

impl Document {
    /// Parse a document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed or has no root element.
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        // Attach a finished element to its parent, or make it the root.
        let mut attach = |stack: &mut Vec<Element>, element: Element| {
            if let Some(parent) = stack.last_mut() {
                parent.children.push(Node::Element(element));
            } else if root.is_none() {
                root = Some(element);
            }
        };

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, element);
                }
                Event::End(end) => {
                    let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                    match stack.pop() {
                        Some(element) if element.name == name => attach(&mut stack, element),
                        _ => return Err(XmlError::UnexpectedEndTag(name)),
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if let Some(parent) = stack.last_mut() {
                        if !text.trim().is_empty() {
                            parent.children.push(Node::Text(text.into_owned()));
                        }
                    }
                }
                Event::CData(data) => {
                    let data = std::str::from_utf8(&data)?.to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(data));
                    }
                }
                Event::Eof => break,
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => (),
            }
        }

        if let Some(unclosed) = stack.pop() {
            return Err(XmlError::UnclosedElement(unclosed.name));
        }

        root.map(|root| Self {
            root,
            response_info: None,
        })
        .ok_or(XmlError::MissingRoot)
    }

    /// Attach response information to this document.
    #[must_use]
    pub fn with_response_info(mut self, response_info: ResponseInfo) -> Self {
        self.response_info = Some(response_info);
        self
    }

    /// The URL this document was fetched from, if known.
    pub fn uri(&self) -> Option<&str> {
        self.response_info.as_ref().map(|info| info.url.as_str())
    }

    /// Write the document as indented XML.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the underlying writer fails.
    pub fn write_pretty<W: io::Write>(&self, writer: W) -> Result<(), XmlError> {
        let mut writer = Writer::new_with_indent(writer, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.root.write(&mut writer)?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Return the document as indented XML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_string(&self) -> Result<String, XmlError> {
        let mut buffer = Vec::new();
        self.write_pretty(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
