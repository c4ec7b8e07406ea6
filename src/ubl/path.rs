use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::document::Element;
use crate::core::{Field, InterpretError, Namespaces, Prefix, Result};

/// One `prefix:LocalName` step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    prefix: Prefix,
    local_name: Cow<'static, str>,
}

impl Step {
    pub const fn new(prefix: Prefix, local_name: &'static str) -> Self {
        Self {
            prefix,
            local_name: Cow::Borrowed(local_name),
        }
    }

    pub const fn cbc(local_name: &'static str) -> Self {
        Self::new(Prefix::Cbc, local_name)
    }

    pub const fn cac(local_name: &'static str) -> Self {
        Self::new(Prefix::Cac, local_name)
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    fn matches(&self, element: &Element, namespaces: &Namespaces) -> bool {
        element.is_named(namespaces.uri(self.prefix), &self.local_name)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local_name)
    }
}

/// A direct-child descent such as `cac:Price/cbc:PriceAmount`.
///
/// Each step must match a direct child of the previous element; deeper
/// descendants are never searched. Paths are validated when built, so an
/// unknown prefix is rejected here rather than failing to match later.
///
/// Static paths are written with [`path!`](crate::path):
///
/// ```
/// use peppol_interpreter::path;
/// use peppol_interpreter::ubl::Path;
///
/// const PRICE: Path = path!(cac:Price/cbc:PriceAmount);
/// assert_eq!(PRICE.to_string(), "cac:Price/cbc:PriceAmount");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Cow<'static, [Step]>,
}

impl Path {
    pub const fn from_static(steps: &'static [Step]) -> Self {
        Self {
            steps: Cow::Borrowed(steps),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = InterpretError;

    fn from_str(expr: &str) -> Result<Self> {
        if expr.is_empty() {
            return Err(InterpretError::invalid_path(expr, "empty expression"));
        }

        let mut steps = Vec::new();
        for segment in expr.split('/') {
            let (prefix, local_name) = segment.split_once(':').ok_or_else(|| {
                InterpretError::invalid_path(expr, format!("segment `{segment}` has no prefix"))
            })?;
            let prefix = prefix.parse::<Prefix>().map_err(|()| {
                InterpretError::invalid_path(expr, format!("unknown prefix `{prefix}`"))
            })?;
            if local_name.is_empty()
                || local_name.contains(':')
                || local_name.chars().any(char::is_whitespace)
            {
                return Err(InterpretError::invalid_path(
                    expr,
                    format!("invalid local name in segment `{segment}`"),
                ));
            }
            steps.push(Step {
                prefix,
                local_name: Cow::Owned(local_name.to_string()),
            });
        }

        Ok(Self {
            steps: Cow::Owned(steps),
        })
    }
}

/// Build a `const`-friendly [`Path`] from `prefix:Name` steps separated by `/`.
#[macro_export]
macro_rules! path {
    ($($prefix:ident : $local:ident)/+) => {{
        const STEPS: &[$crate::ubl::Step] = &[$($crate::ubl::Step::$prefix(stringify!($local))),+];
        $crate::ubl::Path::from_static(STEPS)
    }};
}

/// Resolves paths against elements using an injected namespace table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    namespaces: Namespaces,
}

impl Resolver {
    pub const fn new(namespaces: Namespaces) -> Self {
        Self { namespaces }
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// The element reached from `root` by following `path`, or `None` as
    /// soon as a step has no matching direct child. The first matching
    /// child in document order is taken at each step.
    pub fn node<'a>(&self, root: &'a Element, path: &Path) -> Option<&'a Element> {
        path.steps().iter().try_fold(root, |node, step| {
            node.children().find(|child| step.matches(child, &self.namespaces))
        })
    }

    /// Trimmed text at `path`. Absent and blank nodes are both
    /// [`Field::Missing`].
    pub fn text(&self, root: &Element, path: &Path) -> Field {
        self.node(root, path)
            .map(|node| Field::from_text(&node.text_content()))
            .unwrap_or_default()
    }

    /// Like [`Resolver::text`], parsing `expr` first.
    pub fn text_at(&self, root: &Element, expr: &str) -> Result<Field> {
        let path: Path = expr.parse()?;
        Ok(self.text(root, &path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ubl_ns;
    use crate::ubl::Document;

    fn doc(body: &str) -> Document {
        Document::parse(&format!(
            r#"<Invoice xmlns="{}" xmlns:cac="{}" xmlns:cbc="{}">{body}</Invoice>"#,
            ubl_ns::INVOICE,
            ubl_ns::CAC,
            ubl_ns::CBC
        ))
        .unwrap()
    }

    #[test]
    fn macro_paths_display_like_their_source() {
        const P: Path = path!(cac:AccountingSupplierParty/cac:Party/cbc:EndpointID);
        assert_eq!(P.to_string(), "cac:AccountingSupplierParty/cac:Party/cbc:EndpointID");
        assert_eq!(P.steps().len(), 3);
        assert_eq!(P.steps()[2].prefix(), Prefix::Cbc);
        assert_eq!(P.steps()[2].local_name(), "EndpointID");
    }

    #[test]
    fn parsed_and_macro_paths_agree() {
        let parsed: Path = "cac:Price/cbc:PriceAmount".parse().unwrap();
        assert_eq!(parsed, path!(cac:Price/cbc:PriceAmount));
    }

    #[test]
    fn rejects_bad_expressions() {
        for expr in ["", "ID", "ubl:ID", "cbc:", "cbc:ID/", "/cbc:ID", "cbc:a:b", "cbc:A B"] {
            assert!(
                matches!(expr.parse::<Path>(), Err(InterpretError::InvalidPath { .. })),
                "{expr:?} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_prefix_is_named_in_error() {
        let err = "xyz:ID".parse::<Path>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid path expression `xyz:ID`: unknown prefix `xyz`"
        );
    }

    #[test]
    fn resolves_nested_path() {
        let d = doc("<cac:Price><cbc:PriceAmount> 2.50 </cbc:PriceAmount></cac:Price>");
        let r = Resolver::default();
        assert_eq!(
            r.text(d.root(), &path!(cac:Price/cbc:PriceAmount)),
            Field::Value("2.50".into())
        );
    }

    #[test]
    fn first_match_wins() {
        let d = doc("<cbc:Note>first</cbc:Note><cbc:Note>second</cbc:Note>");
        let r = Resolver::default();
        assert_eq!(r.text(d.root(), &path!(cbc:Note)).as_str(), Some("first"));
    }

    #[test]
    fn does_not_skip_levels() {
        let d = doc("<cac:Wrapper><cac:Price><cbc:PriceAmount>9</cbc:PriceAmount></cac:Price></cac:Wrapper>");
        let r = Resolver::default();
        assert!(r.node(d.root(), &path!(cac:Price/cbc:PriceAmount)).is_none());
        assert!(r.text(d.root(), &path!(cac:Price/cbc:PriceAmount)).is_missing());
        assert!(r.text(d.root(), &path!(cbc:PriceAmount)).is_missing());
    }

    #[test]
    fn namespace_must_match() {
        let d = doc("<cac:ID>wrong ns</cac:ID><ID>no ns prefix</ID>");
        let r = Resolver::default();
        assert!(r.text(d.root(), &path!(cbc:ID)).is_missing());
    }

    #[test]
    fn absent_and_empty_both_missing() {
        let d = doc("<cbc:Note>   </cbc:Note><cbc:DueDate/>");
        let r = Resolver::default();
        assert!(r.node(d.root(), &path!(cbc:Note)).is_some());
        assert!(r.text(d.root(), &path!(cbc:Note)).is_missing());
        assert!(r.text(d.root(), &path!(cbc:DueDate)).is_missing());
        assert!(r.node(d.root(), &path!(cbc:IssueDate)).is_none());
        assert!(r.text(d.root(), &path!(cbc:IssueDate)).is_missing());
    }

    #[test]
    fn injected_table_drives_matching() {
        let d = Document::parse(r#"<r xmlns:a="urn:a" xmlns:b="urn:b"><a:X><b:Y>ok</b:Y></a:X></r>"#)
            .unwrap();
        let r = Resolver::new(Namespaces::new("urn:b", "urn:a"));
        assert_eq!(r.text(d.root(), &path!(cac:X/cbc:Y)).as_str(), Some("ok"));
        assert!(Resolver::default().text(d.root(), &path!(cac:X/cbc:Y)).is_missing());
    }

    #[test]
    fn text_at_parses_then_resolves() {
        let d = doc("<cbc:ID>INV-9</cbc:ID>");
        let r = Resolver::default();
        assert_eq!(r.text_at(d.root(), "cbc:ID").unwrap().as_str(), Some("INV-9"));
        assert!(r.text_at(d.root(), "foo:ID").is_err());
    }
}
