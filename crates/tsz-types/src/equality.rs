//! Deep structural equality over [`crate::ty::Type`], modulo provenance and
//! the handful of memoized/cache fields the data model calls out as mutable
//! after construction.

use crate::ty::{ObjectData, Type, TypeKind, TypeRefData};

/// Deep structural equality. Same variant tag, pointwise-equal fields,
/// ignoring `provenance`, nominal-object `id`, and memoized aliases.
///
/// Reflexive, symmetric, and transitive over any tree built purely from
/// this crate's constructors.
pub fn equals(a: &Type, b: &Type) -> bool {
    if !Type::same_variant(a, b) {
        return false;
    }
    match (a.kind(), b.kind()) {
        (TypeKind::TypeVar(x), TypeKind::TypeVar(y)) => x.id == y.id,
        (TypeKind::TypeRef(x), TypeKind::TypeRef(y)) => x == y,
        (TypeKind::Prim(x), TypeKind::Prim(y)) => x == y,
        (TypeKind::Lit(x), TypeKind::Lit(y)) => x == y,
        (TypeKind::UniqueSymbol(x), TypeKind::UniqueSymbol(y)) => x == y,
        (TypeKind::Unknown, TypeKind::Unknown)
        | (TypeKind::Never, TypeKind::Never)
        | (TypeKind::Void, TypeKind::Void)
        | (TypeKind::Any, TypeKind::Any)
        | (TypeKind::GlobalThis, TypeKind::GlobalThis)
        | (TypeKind::Wildcard, TypeKind::Wildcard) => true,
        (TypeKind::Func(x), TypeKind::Func(y)) => x == y,
        (TypeKind::Object(x), TypeKind::Object(y)) => object_eq(x, y),
        (TypeKind::Tuple(x), TypeKind::Tuple(y)) => x == y,
        (TypeKind::RestSpread(x), TypeKind::RestSpread(y)) => x == y,
        (TypeKind::Union(x), TypeKind::Union(y)) => x == y,
        (TypeKind::Intersection(x), TypeKind::Intersection(y)) => x == y,
        (TypeKind::KeyOf(x), TypeKind::KeyOf(y)) => x == y,
        (TypeKind::TypeOf(x), TypeKind::TypeOf(y)) => x == y,
        (TypeKind::Index(x), TypeKind::Index(y)) => x == y,
        (TypeKind::Cond(x), TypeKind::Cond(y)) => x == y,
        (TypeKind::Infer(x), TypeKind::Infer(y)) => x == y,
        (TypeKind::Mutability(x), TypeKind::Mutability(y)) => x == y,
        (TypeKind::Extractor(x), TypeKind::Extractor(y)) => x == y,
        (TypeKind::TemplateLit(x), TypeKind::TemplateLit(y)) => x == y,
        (TypeKind::Intrinsic(x), TypeKind::Intrinsic(y)) => x == y,
        (TypeKind::Namespace(x), TypeKind::Namespace(y)) => x == y,
        (TypeKind::Regex(x), TypeKind::Regex(y)) => x.compiled.source() == y.compiled.source(),
        _ => unreachable!("same_variant already matched the tags above"),
    }
}

/// `TypeRef` equality ignores the memoized `alias` cell.
impl PartialEq for TypeRefData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_args == other.type_args
    }
}

/// `Type`'s `==` *is* structural equality (`equals`). This is what lets
/// every other struct in the crate derive `PartialEq` and compose
/// correctly: a derived impl on e.g. `FuncData` calls `==` on its `Type`
/// fields, which lands here.
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

/// `Object` equality ignores `id` (nominal identity isn't structural) and
/// `symbol_key_map` (an elaboration-time cache, like `TypeRef.alias`).
fn object_eq(a: &ObjectData, b: &ObjectData) -> bool {
    a.flags == b.flags && a.elems == b.elems && a.extends == b.extends && a.implements == b.implements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Lit;
    use crate::provenance::Provenance;
    use crate::ty::{ObjectFlags, PrimKind};

    fn p() -> Provenance {
        Provenance::dummy()
    }

    fn other_p() -> Provenance {
        Provenance::new(10, 20)
    }

    #[test]
    fn test_reflexive_and_symmetric() {
        let t = Type::prim(PrimKind::String, p());
        let u = Type::lit(Lit::Str("hi".into()), p());
        assert!(equals(&t, &t));
        assert!(equals(&u, &u));
        assert_eq!(equals(&t, &u), equals(&u, &t));
    }

    #[test]
    fn test_provenance_is_invisible() {
        let a = Type::prim(PrimKind::Number, p());
        let b = Type::prim(PrimKind::Number, other_p());
        assert!(equals(&a, &b));
    }

    #[test]
    fn test_type_var_compares_by_id_only_never_derefs_instance() {
        let bound = Type::type_var(1, None, None, false, p());
        crate::ty::bind_type_var(&bound, Type::any(p()));
        let unbound_same_id = Type::type_var(1, None, None, false, p());
        assert!(equals(&bound, &unbound_same_id));

        let different_id = Type::type_var(2, None, None, false, p());
        assert!(!equals(&bound, &different_id));
    }

    #[test]
    fn test_nominal_object_id_is_excluded() {
        crate::ty::reset_object_id_counter_for_test();
        let a = Type::object(vec![], ObjectFlags::NOMINAL, vec![], vec![], p());
        let b = Type::object(vec![], ObjectFlags::NOMINAL, vec![], vec![], p());
        assert!(equals(&a, &b));
    }

    #[test]
    fn test_different_variants_are_unequal() {
        assert!(!equals(&Type::any(p()), &Type::unknown(p())));
    }

    #[test]
    fn test_sequence_order_matters() {
        let a = Type::tuple(smallvec::smallvec![Type::prim(PrimKind::String, p()), Type::prim(PrimKind::Number, p())], p());
        let b = Type::tuple(smallvec::smallvec![Type::prim(PrimKind::Number, p()), Type::prim(PrimKind::String, p())], p());
        assert!(!equals(&a, &b));
    }
}
