use lopdf::Document;

use crate::core::{InterpretError, Result};

/// Basic structure of a decoded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfSummary {
    /// Header version, e.g. `"1.7"`.
    pub version: String,
    pub page_count: usize,
    /// Whether the PDF itself carries embedded files (e.g. a Factur-X XML).
    pub has_embedded_files: bool,
}

/// Load decoded PDF bytes and report their structure.
pub fn inspect_pdf(bytes: &[u8]) -> Result<PdfSummary> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| InterpretError::InvalidPdf(format!("failed to load PDF: {e}")))?;

    let has_embedded_files = doc
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Names").ok())
        .and_then(|names| match names {
            lopdf::Object::Reference(id) => doc.get_dictionary(*id).ok(),
            lopdf::Object::Dictionary(d) => Some(d),
            _ => None,
        })
        .is_some_and(|names| names.has(b"EmbeddedFiles"));

    Ok(PdfSummary {
        version: doc.version.clone(),
        page_count: doc.get_pages().len(),
        has_embedded_files,
    })
}
