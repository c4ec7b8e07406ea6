use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::core::{Namespaces, Prefix, Result};
use crate::ubl::Document;

/// MIME type an embedded document must declare to be treated as the PDF.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Filename used when the embedded object has none.
pub const DEFAULT_PDF_FILENAME: &str = "document.pdf";

/// Standard alphabet, padding optional, non-zero trailing bits ignored.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A still-encoded PDF found in `cbc:EmbeddedDocumentBinaryObject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPayload {
    filename: String,
    content: String,
}

impl PdfPayload {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The base64 text as it appeared in the document.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// No encoded content at all.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_base64(&self.content)
    }
}

/// Find the embedded PDF: the first `cbc:EmbeddedDocumentBinaryObject`
/// in document order whose `mimeCode` is exactly `application/pdf`.
pub fn locate_pdf(document: &Document, namespaces: &Namespaces) -> Option<PdfPayload> {
    document
        .elements_named(namespaces.uri(Prefix::Cbc), "EmbeddedDocumentBinaryObject")
        .find(|e| e.attribute("mimeCode") == Some(PDF_MIME_TYPE))
        .map(|e| {
            let filename = e
                .attribute("filename")
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_PDF_FILENAME);
            PdfPayload::new(filename, e.text_content())
        })
}

/// Decode base64 text after dropping every whitespace character.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(LENIENT.decode(cleaned)?)
}
