//! Centralized limits and thresholds shared across the workspace.
//!
//! Centralizing these values prevents duplicate definitions with
//! inconsistent values and documents the rationale for each one in a single
//! place instead of scattered at each call site.

/// Inline capacity for the small-vector backing of ordered type lists
/// (union/intersection members, tuple elements, function parameters,
/// template-literal interpolations).
///
/// Most unions, tuples and parameter lists in real source are small (2-6
/// members); spilling to the heap only past this threshold avoids an
/// allocation for the overwhelming common case.
pub const TYPE_LIST_INLINE: usize = 8;

/// Maximum recursion depth for the type visitor (`Type::accept`).
///
/// Types form a DAG, not a tree with unbounded depth in practice, but a
/// pathological input (or a bug upstream that builds a self-referential
/// `Union`/`Intersection` without going through a `TypeVar`) should fail
/// loudly with a panic rather than overflow the stack.
pub const MAX_TYPE_VISIT_DEPTH: u32 = 4_096;
