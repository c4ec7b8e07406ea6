use std::collections::HashMap;
use std::fmt;

/// Address of an in-memory resource, `blob:<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobUrl(String);

impl BlobUrl {
    fn generate() -> Self {
        BlobUrl(format!("blob:{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Blob {
    mime_type: &'static str,
    bytes: Vec<u8>,
}

/// Table of live in-memory resources.
///
/// Entries stay alive until revoked; whoever creates one is responsible
/// for revoking it.
#[derive(Default)]
pub struct BlobRegistry {
    live: HashMap<BlobUrl, Blob>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under a fresh, unique URL.
    pub fn create(&mut self, bytes: Vec<u8>, mime_type: &'static str) -> BlobUrl {
        let url = loop {
            let candidate = BlobUrl::generate();
            if !self.live.contains_key(&candidate) {
                break candidate;
            }
        };
        tracing::debug!(url = %url, bytes = bytes.len(), mime_type, "created blob");
        self.live.insert(url.clone(), Blob { mime_type, bytes });
        url
    }

    /// Drop the resource behind `url`. Returns whether it was live.
    pub fn revoke(&mut self, url: &BlobUrl) -> bool {
        let revoked = self.live.remove(url).is_some();
        if revoked {
            tracing::debug!(url = %url, "revoked blob");
        }
        revoked
    }

    pub fn get(&self, url: &BlobUrl) -> Option<&[u8]> {
        self.live.get(url).map(|b| b.bytes.as_slice())
    }

    pub fn mime_type(&self, url: &BlobUrl) -> Option<&'static str> {
        self.live.get(url).map(|b| b.mime_type)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// The single live handle to a decoded PDF.
///
/// Not `Clone`: exactly one owner holds it and releases it through
/// [`PdfHandle::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct PdfHandle {
    url: BlobUrl,
    filename: String,
    len: usize,
}

impl PdfHandle {
    /// Register `bytes` in `registry` and take ownership of the new entry.
    pub fn issue(registry: &mut BlobRegistry, bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let len = bytes.len();
        let url = registry.create(bytes, super::PDF_MIME_TYPE);
        Self {
            url,
            filename: filename.into(),
            len,
        }
    }

    pub fn url(&self) -> &BlobUrl {
        &self.url
    }

    /// Suggested download name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Size of the decoded PDF in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Revoke the underlying registry entry.
    pub fn release(self, registry: &mut BlobRegistry) {
        registry.revoke(&self.url);
    }
}
