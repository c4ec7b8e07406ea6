use super::source::{FileSource, MAX_FILE_SIZE, XmlLoader, decode_text};
use crate::core::{InterpretError, Namespaces, Result};
use crate::pdf::{BlobRegistry, PdfHandle};
use crate::ubl::{Document, InvoiceView, Resolver, project};

/// Holds the loaded invoice text and the one live PDF handle.
///
/// ```
/// use peppol_interpreter::loader::{MemoryFile, Session};
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let mut session = Session::new();
/// rt.block_on(session.load(MemoryFile::new("inv.xml", "<Invoice/>"))).unwrap();
/// let view = session.interpret().unwrap();
/// assert!(view.lines.is_empty());
/// assert!(session.pdf().is_none());
/// ```
pub struct Session {
    loader: XmlLoader,
    resolver: Resolver,
    blobs: BlobRegistry,
    loaded: Option<String>,
    pdf: Option<PdfHandle>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        SessionBuilder::new().build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Load a new file, discarding the previous text and PDF handle first.
    ///
    /// On failure the session is left empty.
    pub async fn load<S: FileSource>(&mut self, source: S) -> Result<()> {
        self.reset();
        let text = self.loader.load(source).await?;
        self.loaded = Some(text);
        Ok(())
    }

    /// Load text that is already in memory, with the same size limit.
    pub fn load_text(&mut self, text: &str) -> Result<()> {
        self.reset();
        self.loader.check_size(text.len() as u64)?;
        self.loaded = Some(decode_text(text.as_bytes()));
        Ok(())
    }

    /// Parse and project the loaded text.
    ///
    /// The previous PDF handle is released before anything else happens.
    /// When the invoice embeds a non-empty PDF it is decoded and a new
    /// handle issued; a decode failure fails the whole call.
    pub fn interpret(&mut self) -> Result<InvoiceView> {
        self.release_pdf();

        let text = self
            .loaded
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(InterpretError::NoInputLoaded)?;
        let document = Document::parse(text)?;
        let view = project(&document, &self.resolver);

        if let Some(payload) = view.pdf.as_ref().filter(|p| !p.is_blank()) {
            let bytes = payload.decode().inspect_err(|e| {
                tracing::warn!(filename = payload.filename(), error = %e, "embedded PDF failed to decode");
            })?;
            self.pdf = Some(PdfHandle::issue(&mut self.blobs, bytes, payload.filename()));
        }

        Ok(view)
    }

    /// Release the live PDF handle, if any. Returns whether one was live.
    pub fn release_pdf(&mut self) -> bool {
        match self.pdf.take() {
            Some(handle) => {
                handle.release(&mut self.blobs);
                true
            }
            None => false,
        }
    }

    /// Forget the loaded text and release the PDF handle.
    pub fn reset(&mut self) {
        self.loaded = None;
        self.release_pdf();
    }

    pub fn loaded_text(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Whether [`Session::interpret`] has any text to work on.
    pub fn has_input(&self) -> bool {
        self.loaded.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn pdf(&self) -> Option<&PdfHandle> {
        self.pdf.as_ref()
    }

    /// Decoded bytes behind the live handle.
    pub fn pdf_bytes(&self) -> Option<&[u8]> {
        self.pdf.as_ref().and_then(|h| self.blobs.get(h.url()))
    }

    pub fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    /// Structure of the live PDF, if there is one.
    #[cfg(feature = "inspect")]
    pub fn pdf_summary(&self) -> Result<Option<crate::pdf::PdfSummary>> {
        self.pdf_bytes().map(crate::pdf::inspect_pdf).transpose()
    }
}

/// Configures a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    max_file_size: u64,
    namespaces: Namespaces,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            namespaces: Namespaces::ubl(),
        }
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn build(self) -> Session {
        Session {
            loader: XmlLoader::with_limit(self.max_file_size),
            resolver: Resolver::new(self.namespaces),
            blobs: BlobRegistry::new(),
            loaded: None,
            pdf: None,
        }
    }
}
