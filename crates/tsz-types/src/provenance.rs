//! Provenance — an opaque origin-tracking token attached to every type node.
//!
//! The core only carries this value around; it never reads or mutates its
//! interior, and it is excluded from [`crate::equality::equals`]. A
//! collaborator (the parser, a future inference engine) is free to treat it
//! as a source span, which is why it is a re-export of `tsz_common::Span`
//! rather than a bespoke type: the parser already knows how to build spans.

pub use tsz_common::Span as Provenance;
