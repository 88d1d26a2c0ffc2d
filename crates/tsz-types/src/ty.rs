//! `Type` — the recursive sum of type variants at the heart of the core.
//!
//! `Type` is a cheap-to-clone handle (`Rc`-backed) around a [`TypeKind`]
//! plus the [`Provenance`] it was built with. Children are plain `Type`
//! values rather than indices into an arena; structural sharing across
//! rewrites (see [`crate::visitor`]) is achieved by handing back the same
//! `Rc` — compared with [`Type::ptr_eq`] — rather than by deep-cloning on
//! every descent.

use crate::lit::Lit;
use crate::namespace::{Namespace, TypeAlias};
use crate::obj::ObjTypeElem;
use crate::pat::Pat;
use crate::provenance::Provenance;
use crate::qual_ident::QualIdent;
use crate::regex_lit::CompiledRegex;
use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ordered list of child types, inlined up to
/// [`tsz_common::limits::TYPE_LIST_INLINE`] members before spilling to the
/// heap.
pub type TypeList = SmallVec<[Type; tsz_common::limits::TYPE_LIST_INLINE]>;

/// An opaque handle into the expression AST, used only as a value inside
/// [`ObjectData::symbol_key_map`]. The core never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpressionHandle(pub u32);

/// The five ECMAScript primitive kinds the core tracks as their own types
/// (as opposed to being expressed as unions of literal types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimKind {
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
}

impl fmt::Display for PrimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimKind::Boolean => "boolean",
            PrimKind::Number => "number",
            PrimKind::String => "string",
            PrimKind::BigInt => "bigint",
            PrimKind::Symbol => "symbol",
        };
        write!(f, "{s}")
    }
}

/// `Mutability` wraps another type to mark it as mutable, or uncertainly so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutabilityKind {
    Mutable,
    Uncertain,
}

bitflags! {
    /// Flags on [`Type::Object`]. Kept as a bitflags struct (the same
    /// pattern the rest of this workspace's AST/binder layers use for
    /// small closed flag sets) rather than five separate `bool` fields.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// Closed shape: no extra properties, cannot extend or implement.
        const EXACT = 1 << 0;
        const IMMUTABLE = 1 << 1;
        const MUTABLE = 1 << 2;
        /// Identified by `id` rather than by shape.
        const NOMINAL = 1 << 3;
        const INTERFACE = 1 << 4;
    }
}

/// A type parameter binder, e.g. `<T extends U = V>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Option<Type>,
    pub default: Option<Type>,
}

/// A union-find cell. `instance` is the representative once bound; binding
/// happens exactly once (see [`bind_type_var`]), but [`prune`] is allowed to
/// rewrite it in place for path compression.
#[derive(Debug, Clone)]
pub struct TypeVarData {
    pub id: u32,
    pub instance: RefCell<Option<Type>>,
    pub constraint: Option<Type>,
    pub default: Option<Type>,
    pub from_binding: bool,
}

/// A (possibly unresolved) reference to a named type, e.g. `Array<T>`.
#[derive(Debug, Clone)]
pub struct TypeRefData {
    pub name: QualIdent,
    pub type_args: TypeList,
    /// Filled in during resolution; excluded from both the visitor and
    /// structural equality (it's a memoized cache, not observable data).
    pub alias: RefCell<Option<TypeAlias>>,
}

/// One parameter slot of a [`FuncData`].
#[derive(Debug, Clone, PartialEq)]
pub struct FuncParam {
    pub pat: Pat,
    pub ty: Type,
    pub optional: bool,
}

/// A function signature, shared between `Type::Func` and the
/// `Callable`/`Constructor`/`Method`/`Getter`/`Setter` object elements.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncData {
    pub type_params: Vec<TypeParam>,
    pub params: Vec<FuncParam>,
    pub return_type: Type,
    pub throws: Type,
    pub self_type: Option<Type>,
}

/// The payload of a `Type::Object`.
#[derive(Debug, Clone)]
pub struct ObjectData {
    /// Process-unique for nominal objects (`flags.contains(NOMINAL)`); `0`
    /// for structural objects.
    pub id: u64,
    pub elems: Vec<ObjTypeElem>,
    pub flags: ObjectFlags,
    /// Each entry is expected to be a `Type::TypeRef` node.
    pub extends: Vec<Type>,
    /// Each entry is expected to be a `Type::TypeRef` node.
    pub implements: Vec<Type>,
    /// Populated during elaboration; excluded from equality like `alias`.
    pub symbol_key_map: RefCell<FxHashMap<u32, ExpressionHandle>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexData {
    pub target: Type,
    pub index: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondData {
    pub check: Type,
    pub extends: Type,
    pub then_branch: Type,
    pub else_branch: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutabilityData {
    pub inner: Type,
    pub kind: MutabilityKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorData {
    pub extractor: Type,
    pub args: TypeList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLitData {
    pub quasis: Vec<String>,
    pub types: TypeList,
}

/// A compiled literal-regex type, built by [`crate::regex_lit::new_regex_type`].
#[derive(Debug, Clone)]
pub struct RegexData {
    pub compiled: CompiledRegex,
    pub groups: IndexMap<String, Type>,
}

/// The closed sum of type variants.
///
/// See the module doc for why children are `Type` values rather than arena
/// indices, and [`crate::visitor`] for the traversal contract over this
/// enum's children.
#[derive(Debug, Clone)]
pub enum TypeKind {
    TypeVar(TypeVarData),
    TypeRef(TypeRefData),
    Prim(PrimKind),
    Lit(Lit),
    UniqueSymbol(i64),
    Unknown,
    Never,
    Void,
    Any,
    GlobalThis,
    Func(FuncData),
    Object(ObjectData),
    Tuple(TypeList),
    RestSpread(Type),
    Union(TypeList),
    Intersection(TypeList),
    KeyOf(Type),
    TypeOf(QualIdent),
    Index(IndexData),
    Cond(CondData),
    Infer(String),
    Mutability(MutabilityData),
    Wildcard,
    Extractor(ExtractorData),
    TemplateLit(TemplateLitData),
    Intrinsic(String),
    Namespace(Namespace),
    Regex(RegexData),
}

struct TypeNode {
    kind: TypeKind,
    provenance: Provenance,
}

/// A type node. Cloning is an `Rc` bump, not a deep copy.
#[derive(Clone)]
pub struct Type(Rc<TypeNode>);

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate the next process-unique nominal-object id.
pub fn next_nominal_object_id() -> u64 {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Reset the nominal-object id counter. Test-only: real callers share one
/// counter for the lifetime of the process.
#[cfg(test)]
pub fn reset_object_id_counter_for_test() {
    NEXT_OBJECT_ID.store(1, Ordering::Relaxed);
}

impl Type {
    fn new(kind: TypeKind, provenance: Provenance) -> Self {
        Type(Rc::new(TypeNode { kind, provenance }))
    }

    /// Build a node directly from an already-assembled [`TypeKind`],
    /// bypassing the per-variant smart constructors (and, notably, nominal
    /// id allocation). Used by the visitor to rebuild a node whose children
    /// changed while preserving everything else about it verbatim —
    /// including a `TypeVar`'s `instance` cell, a `TypeRef`'s `alias`
    /// cache, and an `Object`'s `id`/`symbol_key_map`.
    pub(crate) fn from_kind(kind: TypeKind, provenance: Provenance) -> Self {
        Type::new(kind, provenance)
    }

    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    pub fn provenance(&self) -> Provenance {
        self.0.provenance
    }

    /// Reference-identity comparison, used by structural-sharing tests and
    /// by the visitor to decide whether a rewrite actually touched a node.
    pub fn ptr_eq(a: &Type, b: &Type) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Whether `a` and `b` are the same `TypeKind` variant, ignoring their
    /// payloads. Used by the visitor to decide whether `enter`'s
    /// replacement continues traversal in place or restarts from scratch.
    pub fn same_variant(a: &Type, b: &Type) -> bool {
        std::mem::discriminant(a.kind()) == std::mem::discriminant(b.kind())
    }

    // ---- nullary / leaf constructors ----

    pub fn unknown(provenance: Provenance) -> Self {
        Type::new(TypeKind::Unknown, provenance)
    }

    pub fn never(provenance: Provenance) -> Self {
        Type::new(TypeKind::Never, provenance)
    }

    pub fn void(provenance: Provenance) -> Self {
        Type::new(TypeKind::Void, provenance)
    }

    pub fn any(provenance: Provenance) -> Self {
        Type::new(TypeKind::Any, provenance)
    }

    pub fn global_this(provenance: Provenance) -> Self {
        Type::new(TypeKind::GlobalThis, provenance)
    }

    pub fn wildcard(provenance: Provenance) -> Self {
        Type::new(TypeKind::Wildcard, provenance)
    }

    pub fn prim(kind: PrimKind, provenance: Provenance) -> Self {
        Type::new(TypeKind::Prim(kind), provenance)
    }

    pub fn lit(lit: Lit, provenance: Provenance) -> Self {
        Type::new(TypeKind::Lit(lit), provenance)
    }

    pub fn unique_symbol(value: i64, provenance: Provenance) -> Self {
        Type::new(TypeKind::UniqueSymbol(value), provenance)
    }

    pub fn infer(name: impl Into<String>, provenance: Provenance) -> Self {
        Type::new(TypeKind::Infer(name.into()), provenance)
    }

    pub fn intrinsic(name: impl Into<String>, provenance: Provenance) -> Self {
        Type::new(TypeKind::Intrinsic(name.into()), provenance)
    }

    pub fn type_of(ident: QualIdent, provenance: Provenance) -> Self {
        Type::new(TypeKind::TypeOf(ident), provenance)
    }

    pub fn namespace(ns: Namespace, provenance: Provenance) -> Self {
        Type::new(TypeKind::Namespace(ns), provenance)
    }

    pub fn regex(compiled: CompiledRegex, groups: IndexMap<String, Type>, provenance: Provenance) -> Self {
        Type::new(TypeKind::Regex(RegexData { compiled, groups }), provenance)
    }

    // ---- composite constructors ----

    pub fn type_var(
        id: u32,
        constraint: Option<Type>,
        default: Option<Type>,
        from_binding: bool,
        provenance: Provenance,
    ) -> Self {
        Type::new(
            TypeKind::TypeVar(TypeVarData {
                id,
                instance: RefCell::new(None),
                constraint,
                default,
                from_binding,
            }),
            provenance,
        )
    }

    pub fn type_ref(name: QualIdent, type_args: TypeList, provenance: Provenance) -> Self {
        Type::new(
            TypeKind::TypeRef(TypeRefData {
                name,
                type_args,
                alias: RefCell::new(None),
            }),
            provenance,
        )
    }

    pub fn func(
        type_params: Vec<TypeParam>,
        params: Vec<FuncParam>,
        return_type: Type,
        throws: Type,
        self_type: Option<Type>,
        provenance: Provenance,
    ) -> Self {
        Type::new(
            TypeKind::Func(FuncData {
                type_params,
                params,
                return_type,
                throws,
                self_type,
            }),
            provenance,
        )
    }

    /// `id` is computed from `flags`, not taken as a parameter: nominal
    /// objects (`flags.contains(ObjectFlags::NOMINAL)`) get the next
    /// process-unique id; structural objects always get `0`.
    pub fn object(
        elems: Vec<ObjTypeElem>,
        flags: ObjectFlags,
        extends: Vec<Type>,
        implements: Vec<Type>,
        provenance: Provenance,
    ) -> Self {
        let id = if flags.contains(ObjectFlags::NOMINAL) {
            next_nominal_object_id()
        } else {
            0
        };
        Type::new(
            TypeKind::Object(ObjectData {
                id,
                elems,
                flags,
                extends,
                implements,
                symbol_key_map: RefCell::new(FxHashMap::default()),
            }),
            provenance,
        )
    }

    pub fn tuple(elems: TypeList, provenance: Provenance) -> Self {
        Type::new(TypeKind::Tuple(elems), provenance)
    }

    pub fn rest_spread(inner: Type, provenance: Provenance) -> Self {
        Type::new(TypeKind::RestSpread(inner), provenance)
    }

    pub fn key_of(inner: Type, provenance: Provenance) -> Self {
        Type::new(TypeKind::KeyOf(inner), provenance)
    }

    pub fn index(target: Type, index: Type, provenance: Provenance) -> Self {
        Type::new(TypeKind::Index(IndexData { target, index }), provenance)
    }

    pub fn cond(
        check: Type,
        extends: Type,
        then_branch: Type,
        else_branch: Type,
        provenance: Provenance,
    ) -> Self {
        Type::new(
            TypeKind::Cond(CondData {
                check,
                extends,
                then_branch,
                else_branch,
            }),
            provenance,
        )
    }

    pub fn mutability(inner: Type, kind: MutabilityKind, provenance: Provenance) -> Self {
        Type::new(TypeKind::Mutability(MutabilityData { inner, kind }), provenance)
    }

    pub fn extractor(extractor: Type, args: TypeList, provenance: Provenance) -> Self {
        Type::new(TypeKind::Extractor(ExtractorData { extractor, args }), provenance)
    }

    pub fn template_lit(quasis: Vec<String>, types: TypeList, provenance: Provenance) -> Self {
        Type::new(TypeKind::TemplateLit(TemplateLitData { quasis, types }), provenance)
    }

    /// Build a raw, non-normalized union. Used internally by
    /// [`crate::normalize::make_union`] once it has already applied the
    /// flattening/dedup/absorption laws; direct callers should almost
    /// always reach for `make_union` instead.
    pub fn union_raw(types: TypeList, provenance: Provenance) -> Self {
        Type::new(TypeKind::Union(types), provenance)
    }

    /// Build a raw, non-normalized intersection. See [`Type::union_raw`].
    pub fn intersection_raw(types: TypeList, provenance: Provenance) -> Self {
        Type::new(TypeKind::Intersection(types), provenance)
    }
}

/// `prune(t)`: if `t` is a bound `TypeVar`, recursively resolve its
/// `instance` chain and write the fully-resolved value back (path
/// compression), then return it. Otherwise return `t` unchanged.
///
/// This is the only legal in-place mutation of a type besides the one-time
/// binding in [`bind_type_var`] and resolution's [`TypeRefData::alias`]/
/// [`ObjectData::symbol_key_map`] writes.
pub fn prune(t: &Type) -> Type {
    let TypeKind::TypeVar(data) = t.kind() else {
        return t.clone();
    };
    let instance = data.instance.borrow().clone();
    match instance {
        Some(instance) => {
            let resolved = prune(&instance);
            *data.instance.borrow_mut() = Some(resolved.clone());
            resolved
        }
        None => t.clone(),
    }
}

/// Bind a `TypeVar` to its representative. Per the data model, this happens
/// exactly once per variable.
///
/// # Panics
///
/// Panics if `var` is not a `TypeVar`, or if it is already bound.
pub fn bind_type_var(var: &Type, instance: Type) {
    let TypeKind::TypeVar(data) = var.kind() else {
        panic!("bind_type_var called on a non-TypeVar type");
    };
    let mut slot = data.instance.borrow_mut();
    assert!(slot.is_none(), "TypeVar {} is already bound", data.id);
    *slot = Some(instance);
}
