//! XML reader that builds [`Element`] trees.
//!
//! Only the constrained subset used by IDE project files is kept: elements,
//! attributes and text. Declarations, comments, processing instructions and
//! doctypes are skipped. Whitespace-only text between elements is dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::element::Element;
use crate::error::{Error, Result};

/// Parse an XML document into its root element.
///
/// # Example
///
/// ```
/// use ide_xml::parse;
///
/// let root = parse(r#"<project version="4"><component name="PhpServers"/></project>"#).unwrap();
/// assert_eq!(root.tag(), "project");
/// assert_eq!(root.children()[0].attribute("name"), Some("PhpServers"));
/// ```
///
/// # Errors
///
/// Returns an error if the document is malformed, has no root element or
/// has more than one.
pub fn parse(content: &str) -> Result<Element> {
    TreeBuilder::new(content).build()
}

struct TreeBuilder<'a> {
    reader: Reader<&'a [u8]>,
    /// Open elements, innermost last.
    stack: Vec<OpenElement>,
    root: Option<Element>,
}

/// An element whose end tag has not been read yet.
struct OpenElement {
    element: Element,
    /// Every text piece seen so far, whitespace included
    raw: String,
    /// Only the pieces that are not whitespace-only
    significant: String,
}

impl OpenElement {
    fn new(element: Element) -> Self {
        Self {
            element,
            raw: String::new(),
            significant: String::new(),
        }
    }

    /// Leaf elements keep their text exactly, even when empty, so that
    /// `<a></a>` and `<a> </a>` read back the way they were written. Elements
    /// with children only keep text that is not indentation.
    fn finish(self) -> Element {
        let mut element = self.element;
        if element.children().is_empty() {
            element.set_text(self.raw);
        } else if !self.significant.is_empty() {
            element.set_text(self.significant);
        }
        element
    }
}

impl<'a> TreeBuilder<'a> {
    fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            stack: Vec::new(),
            root: None,
        }
    }

    fn build(mut self) -> Result<Element> {
        loop {
            let position = self.reader.buffer_position();

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let element = self.open_element(&e, position)?;
                    self.stack.push(OpenElement::new(element));
                }
                Ok(Event::Empty(e)) => {
                    let element = self.open_element(&e, position)?;
                    self.close_element(element)?;
                }
                Ok(Event::End(e)) => {
                    let found = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let open = self.stack.pop().ok_or_else(|| {
                        Error::syntax(format!("unexpected closing tag </{}>", found), position)
                    })?;
                    let element = open.finish();
                    if element.tag() != found {
                        return Err(Error::MismatchedEndTag {
                            expected: element.tag().to_string(),
                            found,
                        });
                    }
                    self.close_element(element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::syntax(format!("invalid text: {}", err), position))?;
                    self.append_text(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    self.append_text(&text);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::syntax(e.to_string(), self.reader.error_position()));
                }
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", open.element.tag()),
            });
        }

        self.root.ok_or(Error::EmptyDocument)
    }

    fn open_element(&self, start: &BytesStart<'_>, position: u64) -> Result<Element> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = Element::new(tag);

        for attribute in start.attributes() {
            let attribute = attribute
                .map_err(|err| Error::syntax(format!("invalid attribute: {}", err), position))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(|err| {
                Error::syntax(format!("invalid value for attribute {}: {}", key, err), position)
            })?;
            element.set_attribute(key, value.into_owned());
        }

        Ok(element)
    }

    fn close_element(&mut self, element: Element) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.element.push_child(element),
            None if self.root.is_some() => return Err(Error::MultipleRoots),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn append_text(&mut self, text: &str) {
        // Text outside the root element is not representable; skip it.
        if let Some(current) = self.stack.last_mut() {
            current.raw.push_str(text);
            if !text.trim().is_empty() {
                current.significant.push_str(text);
            }
        }
    }
}
