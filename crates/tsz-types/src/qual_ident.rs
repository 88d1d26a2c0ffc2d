//! Qualified identifiers — dotted names (`a.b.c`) referenced by
//! `Type::TypeRef` and `Type::TypeOf`, and used as keys into [`crate::Namespace`].

use std::fmt;

/// A dotted identifier, represented as a recursive left-associative
/// structure: `a.b.c` is `Member(Member(Ident(a), b), c)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QualIdent {
    Ident(String),
    Member(Box<QualIdent>, String),
}

impl QualIdent {
    pub fn ident(name: impl Into<String>) -> Self {
        QualIdent::Ident(name.into())
    }

    pub fn member(self, name: impl Into<String>) -> Self {
        QualIdent::Member(Box::new(self), name.into())
    }

    /// Build a `QualIdent` from a non-empty sequence of segments, e.g.
    /// `["a", "b", "c"]` becomes `a.b.c`.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty; a qualified identifier always names
    /// at least one segment.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = segments.into_iter();
        let first = iter
            .next()
            .expect("QualIdent::from_segments requires at least one segment");
        let mut ident = QualIdent::Ident(first.into());
        for segment in iter {
            ident = ident.member(segment);
        }
        ident
    }

    /// The rightmost segment, e.g. `c` for `a.b.c`.
    pub fn tail(&self) -> &str {
        match self {
            QualIdent::Ident(name) => name,
            QualIdent::Member(_, name) => name,
        }
    }

    /// All segments left-to-right, e.g. `["a", "b", "c"]` for `a.b.c`.
    pub fn segments(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_segments(&mut out);
        out
    }

    fn collect_segments<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let QualIdent::Member(left, _) = self {
            left.collect_segments(out);
        }
        out.push(self.tail());
    }
}

impl fmt::Display for QualIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualIdent::Ident(name) => write!(f, "{name}"),
            QualIdent::Member(left, name) => write!(f, "{left}.{name}"),
        }
    }
}
