//! # peppol-interpreter
//!
//! Read Peppol UBL invoices and pull out what a person wants to see:
//! header fields, parties, invoice lines, totals, and the embedded PDF.
//!
//! Fields are located by direct-child, namespace-qualified paths such as
//! `cac:Price/cbc:PriceAmount`. A field that cannot be resolved is never
//! an error; it is [`Field::Missing`] and displays as `—`.
//!
//! ## Quick Start
//!
//! ```rust
//! use peppol_interpreter::ubl::interpret_str;
//!
//! let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!     xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
//!     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
//!   <cbc:ID>INV-1</cbc:ID>
//!   <cac:InvoiceLine>
//!     <cbc:ID>1</cbc:ID>
//!     <cbc:InvoicedQuantity unitCode="C62">10</cbc:InvoicedQuantity>
//!     <cbc:LineExtensionAmount currencyID="EUR">25.00</cbc:LineExtensionAmount>
//!     <cac:Price><cbc:PriceAmount currencyID="EUR">2.50</cbc:PriceAmount></cac:Price>
//!   </cac:InvoiceLine>
//! </Invoice>"#;
//!
//! let invoice = interpret_str(xml).unwrap();
//! assert_eq!(invoice.header.id.as_str(), Some("INV-1"));
//! assert_eq!(invoice.lines[0].unit_price.as_str(), Some("2.50"));
//! assert_eq!(invoice.header.due_date.to_string(), "—");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Parsing, path resolution, projection, PDF decoding |
//! | `loader` (default) | Async size-bounded file loading and [`loader::Session`] |
//! | `inspect` | Page count and version of the decoded PDF via `lopdf` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod ubl;

#[cfg(feature = "core")]
pub mod pdf;

#[cfg(feature = "loader")]
pub mod loader;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
