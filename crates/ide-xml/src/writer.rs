//! Serialization of element trees in the layout the IDE itself writes.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::element::Element;
use crate::error::{Error, Result};

const INDENT_SIZE: usize = 2;

/// Render an element tree as a complete XML document.
///
/// The output starts with a UTF-8 declaration, indents nested elements by two
/// spaces, self-closes elements without text or children and ends with a
/// newline.
///
/// # Example
///
/// ```
/// use ide_xml::{Element, to_string};
///
/// let xml = to_string(&Element::project()).unwrap();
/// assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project version=\"4\"/>\n");
/// ```
pub fn to_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::Write(e.to_string()))?;
    write_element(&mut writer, root)?;

    let mut output =
        String::from_utf8(writer.into_inner()).map_err(|e| Error::Write(e.to_string()))?;
    output.push('\n');
    Ok(output)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.tag());
    for attribute in element.attributes() {
        start.push_attribute(attribute);
    }

    if element.text().is_none() && element.children().is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::Write(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| Error::Write(e.to_string()))?;

    // Indentation-only text next to children is layout, not content.
    let text = element
        .text()
        .filter(|text| element.children().is_empty() || !text.trim().is_empty());
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| Error::Write(e.to_string()))?;
    }

    for child in element.children() {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.tag())))
        .map_err(|e| Error::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_stays_inline() {
        let root = Element::new("data-source")
            .with_child(Element::new("driver-ref").with_text("mysql"));

        let xml = to_string(&root).unwrap();

        assert!(xml.contains("<driver-ref>mysql</driver-ref>"));
    }

    #[test]
    fn test_empty_and_blank_text_read_back_unchanged() {
        let root = Element::new("data-source")
            .with_child(Element::new("user-name").with_text(""))
            .with_child(Element::new("comment").with_text(" "))
            .with_child(Element::new("flag"));

        let xml = to_string(&root).unwrap();

        assert!(xml.contains("<user-name></user-name>"));
        assert!(xml.contains("<comment> </comment>"));
        assert!(xml.contains("<flag/>"));
        assert_eq!(crate::parse(&xml).unwrap(), root);
    }

    #[test]
    fn test_indentation_text_beside_children_is_not_written() {
        let root = Element::new("servers")
            .with_text("\n    ")
            .with_child(Element::new("server"));

        let xml = to_string(&root).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<servers>\n  <server/>\n</servers>\n"
        );
        assert_eq!(crate::parse(&xml).unwrap().text(), None);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let root = Element::new("mapping").with_attribute("remote-root", "/srv/\"quoted\" & more");

        let xml = to_string(&root).unwrap();

        assert!(xml.contains("&quot;quoted&quot; &amp; more"));
    }
}
