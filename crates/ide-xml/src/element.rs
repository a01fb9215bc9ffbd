//! In-memory element tree
//!
//! The merge engine only ever appends children or overwrites attributes and
//! text on elements it has matched. Nothing here removes or reorders children.

use indexmap::IndexMap;

/// Tag of the root element of every IDE project file.
pub const PROJECT_TAG: &str = "project";

/// Project file format version written into fresh files.
pub const PROJECT_VERSION: &str = "4";

/// A single XML element.
///
/// Attribute keys are unique and keep their insertion order; overwriting an
/// attribute keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes, text or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// The root of an empty IDE project file: `<project version="4"/>`.
    pub fn project() -> Self {
        Self::new(PROJECT_TAG).with_attribute("version", PROJECT_VERSION)
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder form of [`Element::push_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Iterate over attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute, returning the previous value if there was one.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the text content of this element.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Append a child after all existing children.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Check whether this element has the given tag and carries every
    /// attribute of `match_attrs` with an equal value.
    ///
    /// Attributes not listed in `match_attrs` are ignored.
    pub fn matches(&self, tag: &str, match_attrs: &[(&str, &str)]) -> bool {
        self.tag == tag
            && match_attrs
                .iter()
                .all(|(key, value)| self.attribute(key) == Some(*value))
    }

    /// Find the first child matching `tag` and `match_attrs`.
    pub fn find_child(&self, tag: &str, match_attrs: &[(&str, &str)]) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.matches(tag, match_attrs))
    }

    /// Return the first child matching `tag` and `match_attrs`, appending a new
    /// one initialized from `match_attrs` when there is none.
    ///
    /// An existing match is returned exactly as found. Siblings are never
    /// touched.
    ///
    /// # Example
    ///
    /// ```
    /// use ide_xml::Element;
    ///
    /// let mut manager = Element::new("component");
    /// manager
    ///     .find_or_create_child("data-source", &[("name", "app_db")])
    ///     .set_attribute("uuid", "1234");
    ///
    /// // Second lookup finds the same element instead of adding another.
    /// let source = manager.find_or_create_child("data-source", &[("name", "app_db")]);
    /// assert_eq!(source.attribute("uuid"), Some("1234"));
    /// assert_eq!(manager.children().len(), 1);
    /// ```
    pub fn find_or_create_child(&mut self, tag: &str, match_attrs: &[(&str, &str)]) -> &mut Element {
        let index = match self
            .children
            .iter()
            .position(|child| child.matches(tag, match_attrs))
        {
            Some(index) => index,
            None => {
                tracing::trace!(parent = %self.tag, tag, ?match_attrs, "Appending new child");
                let mut child = Element::new(tag);
                for (key, value) in match_attrs {
                    child.set_attribute(*key, *value);
                }
                self.children.push(child);
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Shorthand for a child addressed by tag alone, such as `<jdbc-url>`.
    pub fn named_child(&mut self, tag: &str) -> &mut Element {
        self.find_or_create_child(tag, &[])
    }
}
