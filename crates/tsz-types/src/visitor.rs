//! The pre/post-order rewrite protocol over [`crate::ty::Type`] trees.
//!
//! See the traversal order documented per-variant below; it is part of the
//! external contract (tests depend on it), not an implementation detail.

use crate::obj::{MappedData, MappedTypeParam, ObjTypeElem};
use crate::ty::{
    CondData, ExtractorData, FuncData, FuncParam, IndexData, MutabilityData, ObjectData, TemplateLitData, Type,
    TypeKind, TypeList, TypeRefData, prune,
};
use std::cell::Cell;

thread_local! {
    static DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Tracks recursion depth across nested `accept` calls and panics past
/// [`tsz_common::limits::MAX_TYPE_VISIT_DEPTH`] rather than overflowing the
/// stack on a pathological (cyclic, non-`TypeVar`-mediated) tree.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        let depth = DEPTH.with(|d| {
            let next = d.get() + 1;
            d.set(next);
            next
        });
        assert!(
            depth <= tsz_common::limits::MAX_TYPE_VISIT_DEPTH,
            "type visitor exceeded max recursion depth ({}); check for a cycle outside TypeVar.instance",
            tsz_common::limits::MAX_TYPE_VISIT_DEPTH
        );
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get() - 1));
    }
}

/// A rewriting visitor over `Type` trees.
///
/// Both hooks default to doing nothing (`None`), so a visitor only needs to
/// override the ones it cares about. The visitor is synchronous,
/// single-threaded, and safe to reuse across independent trees.
pub trait TypeVisitor {
    /// Called on descent, before recursing into `t`'s children.
    ///
    /// - `Some(u)` where `u` has the same variant tag as `t`: traversal
    ///   continues using `u`'s children.
    /// - `Some(u)` of a *different* variant: traversal restarts on `u`
    ///   (`u.accept(self)`); `t`'s original children and `exit` are
    ///   skipped entirely.
    /// - `None`: traversal proceeds into `t`'s own children.
    fn enter(&mut self, t: &Type) -> Option<Type> {
        let _ = t;
        None
    }

    /// Called after children have been rewritten. `t` already reflects any
    /// child substitutions. Returning `Some(u)` replaces the result;
    /// `None` keeps `t`.
    fn exit(&mut self, t: &Type) -> Option<Type> {
        let _ = t;
        None
    }
}

impl Type {
    /// Run a visitor over this tree, returning the rewritten result.
    /// Subtrees with no changed descendants and no hook substitution are
    /// returned by reference identity (see [`Type::ptr_eq`]).
    pub fn accept<V: TypeVisitor + ?Sized>(&self, visitor: &mut V) -> Type {
        accept(self, visitor)
    }
}

fn accept<V: TypeVisitor + ?Sized>(t: &Type, visitor: &mut V) -> Type {
    let _guard = DepthGuard::enter();
    if matches!(t.kind(), TypeKind::TypeVar(_)) {
        let pruned = prune(t);
        if !Type::ptr_eq(t, &pruned) {
            return accept(&pruned, visitor);
        }
    }

    match visitor.enter(t) {
        Some(u) if Type::same_variant(t, &u) => finish(&u, visitor),
        Some(u) => accept(&u, visitor),
        None => finish(t, visitor),
    }
}

fn finish<V: TypeVisitor + ?Sized>(t: &Type, visitor: &mut V) -> Type {
    let rebuilt = rebuild_children(t, visitor);
    visitor.exit(&rebuilt).unwrap_or(rebuilt)
}

fn visit_seq<V: TypeVisitor + ?Sized>(types: &TypeList, visitor: &mut V) -> (TypeList, bool) {
    let mut changed = false;
    let out: TypeList = types
        .iter()
        .map(|t| {
            let new_t = accept(t, visitor);
            changed |= !Type::ptr_eq(t, &new_t);
            new_t
        })
        .collect();
    (out, changed)
}

fn visit_list<V: TypeVisitor + ?Sized>(types: &[Type], visitor: &mut V) -> (Vec<Type>, bool) {
    let mut changed = false;
    let out: Vec<Type> = types
        .iter()
        .map(|t| {
            let new_t = accept(t, visitor);
            changed |= !Type::ptr_eq(t, &new_t);
            new_t
        })
        .collect();
    (out, changed)
}

fn visit_func<V: TypeVisitor + ?Sized>(data: &FuncData, visitor: &mut V) -> (FuncData, bool) {
    let mut changed = false;
    let params: Vec<FuncParam> = data
        .params
        .iter()
        .map(|param| {
            let new_ty = accept(&param.ty, visitor);
            changed |= !Type::ptr_eq(&param.ty, &new_ty);
            FuncParam {
                pat: param.pat.clone(),
                ty: new_ty,
                optional: param.optional,
            }
        })
        .collect();
    let return_type = accept(&data.return_type, visitor);
    changed |= !Type::ptr_eq(&data.return_type, &return_type);
    let throws = accept(&data.throws, visitor);
    changed |= !Type::ptr_eq(&data.throws, &throws);
    (
        FuncData {
            type_params: data.type_params.clone(),
            params,
            return_type,
            throws,
            self_type: data.self_type.clone(),
        },
        changed,
    )
}

fn visit_elem<V: TypeVisitor + ?Sized>(elem: &ObjTypeElem, visitor: &mut V) -> (ObjTypeElem, bool) {
    match elem {
        ObjTypeElem::Callable { func } => {
            let (func, changed) = visit_func(func, visitor);
            (ObjTypeElem::Callable { func }, changed)
        }
        ObjTypeElem::Constructor { func } => {
            let (func, changed) = visit_func(func, visitor);
            (ObjTypeElem::Constructor { func }, changed)
        }
        ObjTypeElem::Method { name, func, mut_self } => {
            let (func, changed) = visit_func(func, visitor);
            (
                ObjTypeElem::Method {
                    name: name.clone(),
                    func,
                    mut_self: *mut_self,
                },
                changed,
            )
        }
        ObjTypeElem::Getter { name, func } => {
            let (func, changed) = visit_func(func, visitor);
            (
                ObjTypeElem::Getter {
                    name: name.clone(),
                    func,
                },
                changed,
            )
        }
        ObjTypeElem::Setter { name, func } => {
            let (func, changed) = visit_func(func, visitor);
            (
                ObjTypeElem::Setter {
                    name: name.clone(),
                    func,
                },
                changed,
            )
        }
        ObjTypeElem::Property {
            name,
            optional,
            readonly,
            value,
        } => {
            let new_value = accept(value, visitor);
            let changed = !Type::ptr_eq(value, &new_value);
            (
                ObjTypeElem::Property {
                    name: name.clone(),
                    optional: *optional,
                    readonly: *readonly,
                    value: new_value,
                },
                changed,
            )
        }
        ObjTypeElem::Mapped { data } => {
            let mut changed = false;
            let constraint = accept(&data.type_param.constraint, visitor);
            changed |= !Type::ptr_eq(&data.type_param.constraint, &constraint);
            let rename = data.rename.as_ref().map(|r| {
                let new_r = accept(r, visitor);
                changed |= !Type::ptr_eq(r, &new_r);
                new_r
            });
            let value = accept(&data.value, visitor);
            changed |= !Type::ptr_eq(&data.value, &value);
            let check = data.check.as_ref().map(|c| {
                let new_c = accept(c, visitor);
                changed |= !Type::ptr_eq(c, &new_c);
                new_c
            });
            let extends = data.extends.as_ref().map(|e| {
                let new_e = accept(e, visitor);
                changed |= !Type::ptr_eq(e, &new_e);
                new_e
            });
            let new_data = MappedData {
                type_param: MappedTypeParam {
                    name: data.type_param.name.clone(),
                    constraint,
                },
                rename,
                value,
                optional_mod: data.optional_mod,
                readonly_mod: data.readonly_mod,
                check,
                extends,
            };
            (ObjTypeElem::Mapped { data: new_data }, changed)
        }
        ObjTypeElem::RestSpread { value } => {
            let new_value = accept(value, visitor);
            let changed = !Type::ptr_eq(value, &new_value);
            (ObjTypeElem::RestSpread { value: new_value }, changed)
        }
    }
}

fn rebuild_children<V: TypeVisitor + ?Sized>(t: &Type, visitor: &mut V) -> Type {
    match t.kind() {
        // TypeVar has already been pruned to a final representative by the
        // time we get here; it has no further children to recurse into.
        TypeKind::TypeVar(_)
        | TypeKind::Prim(_)
        | TypeKind::Lit(_)
        | TypeKind::UniqueSymbol(_)
        | TypeKind::Unknown
        | TypeKind::Never
        | TypeKind::Void
        | TypeKind::Any
        | TypeKind::GlobalThis
        | TypeKind::Infer(_)
        | TypeKind::Wildcard
        | TypeKind::Intrinsic(_)
        | TypeKind::TypeOf(_)
        | TypeKind::Regex(_) => t.clone(),

        TypeKind::TypeRef(data) => {
            let (type_args, changed) = visit_seq(&data.type_args, visitor);
            if !changed {
                return t.clone();
            }
            Type::from_kind(
                TypeKind::TypeRef(TypeRefData {
                    name: data.name.clone(),
                    type_args,
                    alias: data.alias.clone(),
                }),
                t.provenance(),
            )
        }

        TypeKind::Func(data) => {
            let (new_data, changed) = visit_func(data, visitor);
            if !changed {
                return t.clone();
            }
            Type::from_kind(TypeKind::Func(new_data), t.provenance())
        }

        TypeKind::Object(data) => {
            let (elems, elems_changed) = {
                let mut changed = false;
                let elems: Vec<ObjTypeElem> = data
                    .elems
                    .iter()
                    .map(|elem| {
                        let (new_elem, elem_changed) = visit_elem(elem, visitor);
                        changed |= elem_changed;
                        new_elem
                    })
                    .collect();
                (elems, changed)
            };
            let (extends, extends_changed) = visit_list(&data.extends, visitor);
            let (implements, implements_changed) = visit_list(&data.implements, visitor);
            if !elems_changed && !extends_changed && !implements_changed {
                return t.clone();
            }
            Type::from_kind(
                TypeKind::Object(ObjectData {
                    id: data.id,
                    elems,
                    flags: data.flags,
                    extends,
                    implements,
                    symbol_key_map: data.symbol_key_map.clone(),
                }),
                t.provenance(),
            )
        }

        TypeKind::Tuple(types) => {
            let (new_types, changed) = visit_seq(types, visitor);
            if !changed {
                return t.clone();
            }
            Type::from_kind(TypeKind::Tuple(new_types), t.provenance())
        }
        TypeKind::Union(types) => {
            let (new_types, changed) = visit_seq(types, visitor);
            if !changed {
                return t.clone();
            }
            Type::from_kind(TypeKind::Union(new_types), t.provenance())
        }
        TypeKind::Intersection(types) => {
            let (new_types, changed) = visit_seq(types, visitor);
            if !changed {
                return t.clone();
            }
            Type::from_kind(TypeKind::Intersection(new_types), t.provenance())
        }

        TypeKind::RestSpread(inner) => {
            let new_inner = accept(inner, visitor);
            if Type::ptr_eq(inner, &new_inner) {
                return t.clone();
            }
            Type::from_kind(TypeKind::RestSpread(new_inner), t.provenance())
        }
        TypeKind::KeyOf(inner) => {
            let new_inner = accept(inner, visitor);
            if Type::ptr_eq(inner, &new_inner) {
                return t.clone();
            }
            Type::from_kind(TypeKind::KeyOf(new_inner), t.provenance())
        }

        TypeKind::Index(data) => {
            let target = accept(&data.target, visitor);
            let index = accept(&data.index, visitor);
            if Type::ptr_eq(&data.target, &target) && Type::ptr_eq(&data.index, &index) {
                return t.clone();
            }
            Type::from_kind(TypeKind::Index(IndexData { target, index }), t.provenance())
        }

        TypeKind::Cond(data) => {
            let check = accept(&data.check, visitor);
            let extends = accept(&data.extends, visitor);
            let then_branch = accept(&data.then_branch, visitor);
            let else_branch = accept(&data.else_branch, visitor);
            if Type::ptr_eq(&data.check, &check)
                && Type::ptr_eq(&data.extends, &extends)
                && Type::ptr_eq(&data.then_branch, &then_branch)
                && Type::ptr_eq(&data.else_branch, &else_branch)
            {
                return t.clone();
            }
            Type::from_kind(
                TypeKind::Cond(CondData {
                    check,
                    extends,
                    then_branch,
                    else_branch,
                }),
                t.provenance(),
            )
        }

        TypeKind::Mutability(data) => {
            let inner = accept(&data.inner, visitor);
            if Type::ptr_eq(&data.inner, &inner) {
                return t.clone();
            }
            Type::from_kind(
                TypeKind::Mutability(MutabilityData { inner, kind: data.kind }),
                t.provenance(),
            )
        }

        TypeKind::Extractor(data) => {
            let extractor = accept(&data.extractor, visitor);
            let (args, args_changed) = visit_seq(&data.args, visitor);
            if Type::ptr_eq(&data.extractor, &extractor) && !args_changed {
                return t.clone();
            }
            Type::from_kind(TypeKind::Extractor(ExtractorData { extractor, args }), t.provenance())
        }

        TypeKind::TemplateLit(data) => {
            let (types, changed) = visit_seq(&data.types, visitor);
            if !changed {
                return t.clone();
            }
            Type::from_kind(
                TypeKind::TemplateLit(TemplateLitData {
                    quasis: data.quasis.clone(),
                    types,
                }),
                t.provenance(),
            )
        }

        TypeKind::Namespace(ns) => {
            let (new_ns, changed) = crate::namespace::visit_namespace_bindings(ns, &mut |ty| accept(ty, visitor));
            if !changed {
                return t.clone();
            }
            Type::from_kind(TypeKind::Namespace(new_ns), t.provenance())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Lit;
    use crate::provenance::Provenance;
    use crate::ty::PrimKind;
    use smallvec::smallvec;

    fn p() -> Provenance {
        Provenance::dummy()
    }

    struct NoOp;
    impl TypeVisitor for NoOp {}

    #[test]
    fn test_identity_visitor_preserves_reference() {
        let t = Type::tuple(smallvec![Type::prim(PrimKind::String, p()), Type::any(p())], p());
        let result = t.accept(&mut NoOp);
        assert!(Type::ptr_eq(&t, &result));
    }

    struct ReplacePrim {
        from: PrimKind,
        to: PrimKind,
    }
    impl TypeVisitor for ReplacePrim {
        fn enter(&mut self, t: &Type) -> Option<Type> {
            match t.kind() {
                TypeKind::Prim(k) if *k == self.from => Some(Type::prim(self.to, t.provenance())),
                _ => None,
            }
        }
    }

    #[test]
    fn test_substitution_inside_union_preserves_original_and_returns_new_union() {
        let original = Type::union_raw(
            smallvec![Type::prim(PrimKind::Number, p()), Type::prim(PrimKind::Boolean, p())],
            p(),
        );
        let mut visitor = ReplacePrim {
            from: PrimKind::Number,
            to: PrimKind::String,
        };
        let rewritten = original.accept(&mut visitor);

        assert!(!Type::ptr_eq(&original, &rewritten));
        match original.kind() {
            TypeKind::Union(members) => {
                assert!(matches!(members[0].kind(), TypeKind::Prim(PrimKind::Number)));
                assert!(matches!(members[1].kind(), TypeKind::Prim(PrimKind::Boolean)));
            }
            _ => panic!("expected union"),
        }
        match rewritten.kind() {
            TypeKind::Union(members) => {
                assert!(matches!(members[0].kind(), TypeKind::Prim(PrimKind::String)));
                assert!(matches!(members[1].kind(), TypeKind::Prim(PrimKind::Boolean)));
            }
            _ => panic!("expected union"),
        }
    }

    struct ReplaceWithDifferentVariant;
    impl TypeVisitor for ReplaceWithDifferentVariant {
        fn enter(&mut self, t: &Type) -> Option<Type> {
            match t.kind() {
                TypeKind::Prim(PrimKind::Number) => Some(Type::lit(Lit::Num(0.0), t.provenance())),
                _ => None,
            }
        }
    }

    #[test]
    fn test_enter_with_different_variant_restarts_traversal() {
        let t = Type::prim(PrimKind::Number, p());
        let result = t.accept(&mut ReplaceWithDifferentVariant);
        assert!(matches!(result.kind(), TypeKind::Lit(Lit::Num(_))));
    }

    struct CountExits(u32);
    impl TypeVisitor for CountExits {
        fn exit(&mut self, t: &Type) -> Option<Type> {
            self.0 += 1;
            let _ = t;
            None
        }
    }

    #[test]
    fn test_exit_called_once_per_visited_node() {
        let t = Type::tuple(smallvec![Type::prim(PrimKind::String, p()), Type::any(p())], p());
        let mut counter = CountExits(0);
        t.accept(&mut counter);
        // tuple + its two leaf members
        assert_eq!(counter.0, 3);
    }

    #[test]
    fn test_type_var_is_pruned_before_entering() {
        let terminal = Type::prim(PrimKind::String, p());
        let var = Type::type_var(1, None, None, false, p());
        crate::ty::bind_type_var(&var, terminal.clone());
        let result = var.accept(&mut NoOp);
        assert!(Type::ptr_eq(&result, &terminal));
    }
}
