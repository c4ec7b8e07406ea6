//! UBL document parsing, path resolution, and invoice projection.
//!
//! # Example
//!
//! ```
//! use peppol_interpreter::ubl::{Document, Resolver, project};
//!
//! let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
//!     <cbc:ID>INV-1</cbc:ID>
//! </Invoice>"#;
//!
//! let doc = Document::parse(xml).unwrap();
//! let view = project(&doc, &Resolver::default());
//! assert_eq!(view.header.id.as_str(), Some("INV-1"));
//! assert!(view.lines.is_empty());
//! ```

mod document;
mod path;
mod projection;

pub use document::{Descendants, Document, Element, MAX_NESTING_DEPTH, Node};
pub use path::{Path, Resolver, Step};
pub use projection::{Header, InvoiceView, LineView, PartyView, Totals, project};

use crate::core::Result;

/// Parse `xml` and project it with the standard UBL namespace table.
pub fn interpret_str(xml: &str) -> Result<InvoiceView> {
    let document = Document::parse(xml)?;
    Ok(project(&document, &Resolver::default()))
}
