//! Literal-regex compilation: turning a source-level `/pattern/flags`
//! literal into a host-engine [`regex::Regex`] plus the named-group types
//! it exposes.

use crate::error::TypeError;
use crate::provenance::Provenance;
use crate::ty::{PrimKind, Type};
use indexmap::IndexMap;

/// A compiled literal regex, carried by `Type::Regex`.
///
/// Equality and rendering only ever consult [`CompiledRegex::source`] — the
/// canonical, already-flag-prefixed pattern text handed to the host engine,
/// not the original slash-delimited source literal.
#[derive(Debug, Clone)]
pub struct CompiledRegex {
    source: String,
    regex: regex::Regex,
}

impl CompiledRegex {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn named_groups(&self) -> Vec<String> {
        self.regex.capture_names().flatten().map(str::to_string).collect()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

const RECOGNIZED_FLAGS: [char; 3] = ['i', 'm', 's'];

/// Compile a source-level regex literal (`/pattern/flags`) into a
/// `Type::Regex`.
///
/// Translates `i`/`m`/`s` to the host engine's inline flag group, silently
/// drops `g`/`u`/`y` (documented as lossy), and rewrites `(?<name>` to
/// `(?P<name>` without touching lookbehind (`(?<=`, `(?<!`).
pub fn new_regex_type(provenance: Provenance, literal: &str) -> Result<Type, TypeError> {
    let invalid = |reason: &str| TypeError::InvalidRegex {
        source_text: literal.to_string(),
        reason: reason.to_string(),
    };

    let rest = literal.strip_prefix('/').ok_or_else(|| invalid("missing opening `/`"))?;
    let last_slash = rest.rfind('/').ok_or_else(|| invalid("missing closing `/`"))?;
    let pattern = &rest[..last_slash];
    let flags = &rest[last_slash + 1..];

    let mut kept_flags = String::new();
    for c in flags.chars() {
        if RECOGNIZED_FLAGS.contains(&c) && !kept_flags.contains(c) {
            kept_flags.push(c);
        } else if matches!(c, 'g' | 'u' | 'y') {
            tracing::debug!(flag = %c, literal, "dropping regex flag with no host-engine equivalent");
        }
    }

    let rewritten = rewrite_named_groups(pattern);
    let final_pattern = if kept_flags.is_empty() {
        rewritten
    } else {
        format!("(?{kept_flags}){rewritten}")
    };

    let regex = regex::Regex::new(&final_pattern).map_err(|err| {
        tracing::warn!(pattern = %final_pattern, error = %err, "literal regex failed to compile");
        invalid(&err.to_string())
    })?;

    let mut groups = IndexMap::new();
    for name in regex.capture_names().flatten() {
        groups.insert(name.to_string(), Type::prim(PrimKind::String, provenance));
    }

    let compiled = CompiledRegex {
        source: final_pattern,
        regex,
    };
    Ok(Type::regex(compiled, groups, provenance))
}

/// Replace `(?<name>` with `(?P<name>`, leaving lookbehind (`(?<=`, `(?<!`)
/// untouched.
fn rewrite_named_groups(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    while let Some(idx) = rest.find("(?<") {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 3..];
        match after.chars().next() {
            Some('=') | Some('!') => out.push_str("(?<"),
            _ => out.push_str("(?P<"),
        }
        rest = after;
    }
    out.push_str(rest);
    out
}
