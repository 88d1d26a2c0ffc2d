//! Error taxonomy for the type-system core.
//!
//! The only fallible operation exposed by this crate is literal-regex
//! compilation ([`crate::regex_lit::new_regex_type`]); everything else is
//! total. Two further error categories from the design ("a new `Lit`
//! variant added without updating a renderer", "a visitor substitutes a
//! child of the wrong shape") are not represented here at all — Rust's
//! exhaustive `match` and its static type system rule both out at compile
//! time rather than at runtime. See `DESIGN.md` for the reasoning.

use thiserror::Error;

/// Errors the type-system core can report to a caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A source-level regex literal (`/pattern/flags`) could not be turned
    /// into a [`crate::ty::Type::Regex`]: either its slash-delimited shape
    /// was malformed, or the host regex engine rejected the translated
    /// pattern.
    #[error("invalid regex literal `{source_text}`: {reason}")]
    InvalidRegex {
        /// The original source text that failed to compile.
        source_text: String,
        /// Why it failed.
        reason: String,
    },
}
