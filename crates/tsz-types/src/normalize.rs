//! Smart constructors for `Union` and `Intersection` that apply the
//! normalization laws rather than building a raw node.

use crate::equality::equals;
use crate::provenance::Provenance;
use crate::ty::{MutabilityKind, PrimKind, Type, TypeKind, TypeList};

/// Build a normalized union: flatten nested unions, absorb `Any`, drop
/// `Never`, dedupe by structural equality (first occurrence wins), and
/// collapse to the sole member or to `Never` when applicable.
pub fn make_union(types: impl IntoIterator<Item = Type>, provenance: Provenance) -> Type {
    let mut flat: TypeList = TypeList::new();
    flatten_into(types, &mut flat, |k| matches!(k, TypeKind::Union(_)));

    if flat.iter().any(|t| matches!(t.kind(), TypeKind::Any)) {
        return Type::any(provenance);
    }

    flat.retain(|t| !matches!(t.kind(), TypeKind::Never));

    let deduped = dedupe(flat);

    match deduped.len() {
        0 => Type::never(provenance),
        1 => deduped.into_iter().next().unwrap(),
        _ => Type::union_raw(deduped, provenance),
    }
}

/// Build a normalized intersection: flatten nested intersections, short
/// circuit on `Never`/`Any`, drop `Unknown`, dedupe, collapse distinct
/// primitives to `Never`, absorb `Mutability{inner=T, Mutable}` into a
/// present `T`, and collapse to the sole member or `Never`.
pub fn make_intersection(types: impl IntoIterator<Item = Type>, provenance: Provenance) -> Type {
    let mut flat: TypeList = TypeList::new();
    flatten_into(types, &mut flat, |k| matches!(k, TypeKind::Intersection(_)));

    if flat.iter().any(|t| matches!(t.kind(), TypeKind::Never)) {
        return Type::never(provenance);
    }

    flat.retain(|t| !matches!(t.kind(), TypeKind::Unknown));

    if flat.iter().any(|t| matches!(t.kind(), TypeKind::Any)) {
        return Type::any(provenance);
    }

    let deduped = dedupe(flat);

    if has_distinct_primitives(&deduped) {
        return Type::never(provenance);
    }

    let absorbed = absorb_mutability(deduped);

    match absorbed.len() {
        0 => Type::never(provenance),
        1 => absorbed.into_iter().next().unwrap(),
        _ => Type::intersection_raw(absorbed, provenance),
    }
}

fn flatten_into(
    types: impl IntoIterator<Item = Type>,
    out: &mut TypeList,
    is_same_kind: impl Fn(&TypeKind) -> bool + Copy,
) {
    for t in types {
        let members: Option<TypeList> = match t.kind() {
            TypeKind::Union(members) if is_same_kind(t.kind()) => Some(members.clone()),
            TypeKind::Intersection(members) if is_same_kind(t.kind()) => Some(members.clone()),
            _ => None,
        };
        match members {
            Some(members) => flatten_into(members, out, is_same_kind),
            None => out.push(t),
        }
    }
}

fn dedupe(types: TypeList) -> TypeList {
    let mut out: TypeList = TypeList::new();
    for t in types {
        if !out.iter().any(|seen| equals(seen, &t)) {
            out.push(t);
        }
    }
    out
}

fn has_distinct_primitives(types: &TypeList) -> bool {
    let mut seen: Option<PrimKind> = None;
    for t in types {
        if let TypeKind::Prim(kind) = t.kind() {
            match seen {
                None => seen = Some(*kind),
                Some(prev) if prev != *kind => return true,
                Some(_) => {}
            }
        }
    }
    false
}

/// If both `T` and `Mutability{inner=T, Mutable}` are present, keep only
/// the plain (immutable-view) `T`.
fn absorb_mutability(types: TypeList) -> TypeList {
    let snapshot = types.clone();
    let plain_present = |inner: &Type| snapshot.iter().any(|t| equals(t, inner));
    types
        .into_iter()
        .filter(|t| match t.kind() {
            TypeKind::Mutability(data) if data.kind == MutabilityKind::Mutable => !plain_present(&data.inner),
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::{ObjTypeElem, ObjTypeKey};
    use crate::ty::ObjectFlags;

    fn p() -> Provenance {
        Provenance::dummy()
    }

    fn string_ty() -> Type {
        Type::prim(PrimKind::String, p())
    }

    fn number_ty() -> Type {
        Type::prim(PrimKind::Number, p())
    }

    fn boolean_ty() -> Type {
        Type::prim(PrimKind::Boolean, p())
    }

    #[test]
    fn test_union_any_absorbs() {
        let result = make_union([string_ty(), Type::any(p())], p());
        assert!(matches!(result.kind(), TypeKind::Any));
    }

    #[test]
    fn test_union_drops_never() {
        let result = make_union([string_ty(), Type::never(p())], p());
        assert!(equals(&result, &string_ty()));
    }

    #[test]
    fn test_union_of_one_collapses() {
        let result = make_union([string_ty()], p());
        assert!(equals(&result, &string_ty()));
    }

    #[test]
    fn test_union_of_none_is_never() {
        let result = make_union([], p());
        assert!(matches!(result.kind(), TypeKind::Never));
    }

    #[test]
    fn test_union_self_absorbs_duplicate() {
        let result = make_union([string_ty(), string_ty()], p());
        assert!(equals(&result, &string_ty()));
    }

    #[test]
    fn test_union_flattening_preserves_post_dedup_order() {
        let inner = make_union([string_ty(), number_ty()], p());
        let result = make_union([inner, boolean_ty()], p());
        match result.kind() {
            TypeKind::Union(members) => {
                assert_eq!(members.len(), 3);
                assert!(equals(&members[0], &string_ty()));
                assert!(equals(&members[1], &number_ty()));
                assert!(equals(&members[2], &boolean_ty()));
            }
            _ => panic!("expected union"),
        }
    }

    #[test]
    fn test_intersection_never_wins_over_any() {
        let result = make_intersection([Type::never(p()), Type::any(p())], p());
        assert!(matches!(result.kind(), TypeKind::Never));
    }

    #[test]
    fn test_intersection_unknown_absorbed() {
        let result = make_intersection([string_ty(), Type::unknown(p())], p());
        assert!(equals(&result, &string_ty()));
    }

    #[test]
    fn test_intersection_any_absorbs() {
        let result = make_intersection([string_ty(), Type::any(p())], p());
        assert!(matches!(result.kind(), TypeKind::Any));
    }

    #[test]
    fn test_intersection_distinct_primitives_is_never() {
        let result = make_intersection([string_ty(), number_ty()], p());
        assert!(matches!(result.kind(), TypeKind::Never));
    }

    #[test]
    fn test_intersection_mutability_absorption() {
        let obj = |name: &str| {
            Type::object(
                vec![ObjTypeElem::Property {
                    name: ObjTypeKey::Str(name.into()),
                    optional: false,
                    readonly: false,
                    value: string_ty(),
                }],
                ObjectFlags::empty(),
                vec![],
                vec![],
                p(),
            )
        };
        let immutable = obj("a");
        let mutable = Type::mutability(obj("a"), MutabilityKind::Mutable, p());
        let result = make_intersection([mutable, immutable.clone()], p());
        assert!(equals(&result, &immutable));
    }

    #[test]
    fn test_intersection_of_none_is_never() {
        let result = make_intersection([], p());
        assert!(matches!(result.kind(), TypeKind::Never));
    }

    #[test]
    fn test_distinct_object_types_survive_after_unknown_removed_and_dup_collapsed() {
        let a = Type::object(
            vec![ObjTypeElem::Property {
                name: ObjTypeKey::Str("a".into()),
                optional: false,
                readonly: false,
                value: string_ty(),
            }],
            ObjectFlags::empty(),
            vec![],
            vec![],
            p(),
        );
        let b = Type::object(
            vec![ObjTypeElem::Property {
                name: ObjTypeKey::Str("b".into()),
                optional: false,
                readonly: false,
                value: number_ty(),
            }],
            ObjectFlags::empty(),
            vec![],
            vec![],
            p(),
        );
        let result = make_intersection([a.clone(), Type::unknown(p()), b.clone(), a.clone()], p());
        match result.kind() {
            TypeKind::Intersection(members) => {
                assert_eq!(members.len(), 2);
                assert!(equals(&members[0], &a));
                assert!(equals(&members[1], &b));
            }
            _ => panic!("expected intersection of two distinct object types"),
        }
    }
}
