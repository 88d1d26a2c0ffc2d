//! Type-system core for a TypeScript-like structural/nominal hybrid
//! compiler front-end.
//!
//! This crate is the in-memory representation of types, the algebraic
//! constructions over them (union, intersection, mutability), and the
//! traversal/rewrite machinery later compiler phases (inference,
//! substitution, simplification, code generation) build on. None of those
//! later phases live here: no parser, no unifier, no codegen, no diagnostic
//! formatting beyond a single canonical [`std::fmt::Display`] form.
//!
//! Start at [`ty::Type`] for the recursive type sum, [`visitor`] for the
//! pre/post-order rewrite protocol, and [`normalize`] for the union and
//! intersection constructors.

pub mod equality;
pub mod error;
pub mod lit;
pub mod namespace;
pub mod normalize;
pub mod obj;
pub mod pat;
pub mod provenance;
pub mod qual_ident;
pub mod regex_lit;
pub mod render;
pub mod ty;
pub mod visitor;

pub use equality::equals;
pub use error::TypeError;
pub use lit::Lit;
pub use namespace::{Binding, Namespace, TypeAlias};
pub use normalize::{make_intersection, make_union};
pub use obj::{MappedData, Modifier, ObjTypeElem, ObjTypeKey};
pub use pat::{ObjectPatElem, Pat};
pub use provenance::Provenance;
pub use qual_ident::QualIdent;
pub use regex_lit::{CompiledRegex, new_regex_type};
pub use ty::{
    ExpressionHandle, FuncData, FuncParam, MutabilityKind, ObjectFlags, PrimKind, Type, TypeKind,
    TypeParam, TypeRefData, TypeVarData, prune,
};
pub use visitor::TypeVisitor;
