//! UBL namespace prefixes and the table that maps them to URIs.

use std::fmt;
use std::str::FromStr;

/// UBL 2.1 namespace URIs.
pub mod ubl_ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}

/// Namespace prefix usable in a path expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// CommonBasicComponents (leaf values).
    Cbc,
    /// CommonAggregateComponents (groups).
    Cac,
}

impl Prefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Cbc => "cbc",
            Prefix::Cac => "cac",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prefix {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cbc" => Ok(Prefix::Cbc),
            "cac" => Ok(Prefix::Cac),
            _ => Err(()),
        }
    }
}

/// Immutable prefix → URI table.
///
/// Built once and handed to whatever resolves paths; nothing in the crate
/// reads a global table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespaces {
    cbc: &'static str,
    cac: &'static str,
}

impl Namespaces {
    /// The standard UBL 2.1 table.
    pub const fn ubl() -> Self {
        Self {
            cbc: ubl_ns::CBC,
            cac: ubl_ns::CAC,
        }
    }

    /// A table with custom URIs.
    pub const fn new(cbc: &'static str, cac: &'static str) -> Self {
        Self { cbc, cac }
    }

    pub const fn uri(&self, prefix: Prefix) -> &'static str {
        match prefix {
            Prefix::Cbc => self.cbc,
            Prefix::Cac => self.cac,
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::ubl()
    }
}
