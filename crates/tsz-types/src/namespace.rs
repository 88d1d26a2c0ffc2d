//! Namespace/binding bookkeeping for qualified identifiers referenced by
//! `Type::TypeRef` and `Type::TypeOf`.

use crate::provenance::Provenance;
use crate::qual_ident::QualIdent;
use crate::ty::{Type, TypeParam};
use indexmap::IndexMap;

/// A value binding: a name bound to a type, with whether it was declared
/// mutable (`let`) or not (`const`).
#[derive(Debug, Clone)]
pub struct Binding {
    pub source: Provenance,
    pub ty: Type,
    pub mutable: bool,
}

/// `Binding` equality ignores `source`, matching the crate-wide rule that
/// provenance never participates in structural equality.
impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.mutable == other.mutable
    }
}

/// A type alias binding: `type Name<T> = ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub ty: Type,
    pub type_params: Vec<TypeParam>,
}

/// A scope of value bindings, type aliases, and nested namespaces, keyed by
/// bare (undotted) name. Lookups by dotted [`QualIdent`] walk through
/// `namespaces` one segment at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    pub values: IndexMap<String, Binding>,
    pub types: IndexMap<String, TypeAlias>,
    pub namespaces: IndexMap<String, Namespace>,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    pub fn insert_value(&mut self, name: impl Into<String>, binding: Binding) {
        self.values.insert(name.into(), binding);
    }

    pub fn insert_type(&mut self, name: impl Into<String>, alias: TypeAlias) {
        self.types.insert(name.into(), alias);
    }

    pub fn insert_namespace(&mut self, name: impl Into<String>, namespace: Namespace) {
        self.namespaces.insert(name.into(), namespace);
    }

    /// Resolve a dotted name to a value binding. `a.b.c` resolves `a.b` as
    /// a namespace, then looks up `c` in its `values`.
    pub fn lookup_value(&self, ident: &QualIdent) -> Option<&Binding> {
        match ident {
            QualIdent::Ident(name) => self.values.get(name),
            QualIdent::Member(left, name) => self.lookup_namespace(left)?.values.get(name),
        }
    }

    /// Resolve a dotted name to a type alias. See [`Namespace::lookup_value`].
    pub fn lookup_type(&self, ident: &QualIdent) -> Option<&TypeAlias> {
        match ident {
            QualIdent::Ident(name) => self.types.get(name),
            QualIdent::Member(left, name) => self.lookup_namespace(left)?.types.get(name),
        }
    }

    /// Resolve a dotted name to a nested namespace.
    pub fn lookup_namespace(&self, ident: &QualIdent) -> Option<&Namespace> {
        match ident {
            QualIdent::Ident(name) => self.namespaces.get(name),
            QualIdent::Member(left, name) => self.lookup_namespace(left)?.namespaces.get(name),
        }
    }
}

/// Rewrite every `values[*].ty` then `types[*].ty` through `visit`, leaving
/// `namespaces` untouched — the visitor contract deliberately does not
/// recurse into nested namespaces, to avoid unbounded traversal through
/// re-exports.
pub(crate) fn visit_namespace_bindings(ns: &Namespace, visit: &mut dyn FnMut(&Type) -> Type) -> (Namespace, bool) {
    let mut changed = false;

    let values: IndexMap<String, Binding> = ns
        .values
        .iter()
        .map(|(name, binding)| {
            let new_ty = visit(&binding.ty);
            changed |= !Type::ptr_eq(&binding.ty, &new_ty);
            (
                name.clone(),
                Binding {
                    source: binding.source,
                    ty: new_ty,
                    mutable: binding.mutable,
                },
            )
        })
        .collect();

    let types: IndexMap<String, TypeAlias> = ns
        .types
        .iter()
        .map(|(name, alias)| {
            let new_ty = visit(&alias.ty);
            changed |= !Type::ptr_eq(&alias.ty, &new_ty);
            (
                name.clone(),
                TypeAlias {
                    ty: new_ty,
                    type_params: alias.type_params.clone(),
                },
            )
        })
        .collect();

    (
        Namespace {
            values,
            types,
            namespaces: ns.namespaces.clone(),
        },
        changed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::PrimKind;

    fn p() -> Provenance {
        Provenance::dummy()
    }

    fn binding(ty: Type) -> Binding {
        Binding {
            source: p(),
            ty,
            mutable: false,
        }
    }

    #[test]
    fn test_lookup_bare_name() {
        let mut ns = Namespace::new();
        ns.insert_value("x", binding(Type::prim(PrimKind::String, p())));
        let found = ns.lookup_value(&QualIdent::ident("x"));
        assert!(found.is_some());
        assert!(ns.lookup_value(&QualIdent::ident("missing")).is_none());
    }

    #[test]
    fn test_lookup_dotted_name_walks_nested_namespaces() {
        let mut inner = Namespace::new();
        inner.insert_value("y", binding(Type::prim(PrimKind::Number, p())));

        let mut outer = Namespace::new();
        outer.insert_namespace("a", inner);

        let found = outer.lookup_value(&QualIdent::ident("a").member("y"));
        assert!(matches!(found.unwrap().ty.kind(), crate::ty::TypeKind::Prim(PrimKind::Number)));
    }

    #[test]
    fn test_lookup_type_alias() {
        let mut ns = Namespace::new();
        ns.insert_type(
            "Id",
            TypeAlias {
                ty: Type::prim(PrimKind::String, p()),
                type_params: vec![],
            },
        );
        assert!(ns.lookup_type(&QualIdent::ident("Id")).is_some());
    }

    #[test]
    fn test_lookup_through_missing_namespace_segment_is_none() {
        let ns = Namespace::new();
        assert!(ns.lookup_value(&QualIdent::ident("a").member("b")).is_none());
    }

    #[test]
    fn test_visit_namespace_bindings_does_not_recurse_into_nested_namespaces() {
        let mut inner = Namespace::new();
        inner.insert_value("y", binding(Type::prim(PrimKind::Number, p())));

        let mut outer = Namespace::new();
        outer.insert_value("x", binding(Type::prim(PrimKind::String, p())));
        outer.insert_namespace("inner", inner.clone());

        let (rewritten, changed) = visit_namespace_bindings(&outer, &mut |t| Type::any(t.provenance()));
        assert!(changed);
        assert!(matches!(
            rewritten.values.get("x").unwrap().ty.kind(),
            crate::ty::TypeKind::Any
        ));
        // Nested namespace is untouched: its binding is still `number`, not `any`.
        let untouched = rewritten.namespaces.get("inner").unwrap();
        assert!(matches!(
            untouched.values.get("y").unwrap().ty.kind(),
            crate::ty::TypeKind::Prim(PrimKind::Number)
        ));
    }
}
