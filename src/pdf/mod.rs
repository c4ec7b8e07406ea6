//! Embedded PDF handling.
//!
//! A UBL invoice may carry its visual representation as a base64 PDF in
//! `cac:AdditionalDocumentReference/cac:Attachment/cbc:EmbeddedDocumentBinaryObject`.
//! This module finds that payload, decodes it, and tracks the transient
//! in-memory resource it is exposed through.

mod blob;
#[cfg(feature = "inspect")]
mod inspect;
mod payload;

pub use blob::{BlobRegistry, BlobUrl, PdfHandle};
#[cfg(feature = "inspect")]
pub use inspect::{PdfSummary, inspect_pdf};
pub use payload::{DEFAULT_PDF_FILENAME, PDF_MIME_TYPE, PdfPayload, decode_base64, locate_pdf};
