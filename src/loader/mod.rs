//! File loading and the interpreter session.
//!
//! Reading the file is the only asynchronous step; everything after it
//! (parsing, projection, PDF decoding) runs synchronously on the loaded
//! text.

mod session;
mod source;

pub use session::{Session, SessionBuilder};
pub use source::{FileSource, LocalFile, MAX_FILE_SIZE, MemoryFile, XmlLoader, decode_text};
