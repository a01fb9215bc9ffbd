//! Element tree for IDE project metadata files
//!
//! A deliberately narrow XML model: elements with ordered attributes, optional
//! text content and ordered children. Children are addressed by tag plus an
//! attribute match, which is all the project merge engine needs.
//!
//! ```
//! use ide_xml::Element;
//!
//! let mut project = Element::project();
//! let component = project.find_or_create_child("component", &[("name", "PhpServers")]);
//! component.set_attribute("format", "xml");
//!
//! assert_eq!(project.children().len(), 1);
//! ```

pub mod element;
pub mod error;
pub mod parser;
pub mod writer;

pub use element::Element;
pub use error::{Error, Result};
pub use parser::parse;
pub use writer::to_string;
