//! Destructuring patterns used in function parameter slots.
//!
//! Patterns carry no types of their own; they pair with a [`crate::ty::Type`]
//! in [`crate::ty::FuncParam`].

use crate::lit::Lit;
use std::fmt;

/// A destructuring shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Pat {
    /// Binds a name.
    Ident { name: String },
    /// `{ a, b: c, ...rest }`
    Object { elems: Vec<ObjectPatElem> },
    /// `[a, b, c]`
    Tuple { elems: Vec<Pat> },
    /// `...rest`
    Rest { inner: Box<Pat> },
    /// A custom extractor pattern applied to named arguments, e.g. a tagged
    /// destructure `Some(x)`.
    Extractor { name: String, args: Vec<Pat> },
    /// A literal pattern, e.g. matching the exact value `"get"`.
    Lit { lit: Lit },
    /// `_`
    Wildcard,
}

/// One element of an [`Pat::Object`] pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatElem {
    /// `{ key: inner_pat }`
    Kv { key: String, inner: Box<Pat> },
    /// `{ key }`, a shorthand binding where the binding name matches the key.
    Shorthand { key: String },
    /// `{ ...inner_pat }`
    RestInner { inner: Box<Pat> },
}

impl Pat {
    pub fn ident(name: impl Into<String>) -> Self {
        Pat::Ident { name: name.into() }
    }

    pub fn wildcard() -> Self {
        Pat::Wildcard
    }

    pub fn rest(inner: Pat) -> Self {
        Pat::Rest {
            inner: Box::new(inner),
        }
    }
}

impl fmt::Display for Pat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pat::Ident { name } => write!(f, "{name}"),
            Pat::Object { elems } => {
                write!(f, "{{ ")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match elem {
                        ObjectPatElem::Kv { key, inner } => write!(f, "{key}: {inner}")?,
                        ObjectPatElem::Shorthand { key } => write!(f, "{key}")?,
                        ObjectPatElem::RestInner { inner } => write!(f, "...{inner}")?,
                    }
                }
                write!(f, " }}")
            }
            Pat::Tuple { elems } => {
                write!(f, "[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, "]")
            }
            Pat::Rest { inner } => write!(f, "...{inner}"),
            Pat::Extractor { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Pat::Lit { lit } => write!(f, "{lit}"),
            Pat::Wildcard => write!(f, "_"),
        }
    }
}
