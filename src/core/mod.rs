//! Core value types shared by the parser, the projector and the loader.
//!
//! Errors, the sentinel-aware [`Field`], and the injected UBL
//! namespace table.

mod error;
mod field;
pub mod namespace;

pub use error::*;
pub use field::*;
pub use namespace::{Namespaces, Prefix, ubl_ns};
