//! Nominal object identity, `extends`/`implements` traversal, and equality
//! interplay — the object-type scenarios most sensitive to the `id`
//! exclusion rules documented in `DESIGN.md`.

use tsz_types::{equals, ObjTypeElem, ObjTypeKey, ObjectFlags, PrimKind, Provenance, Type, TypeKind, TypeVisitor};

fn p() -> Provenance {
    Provenance::dummy()
}

fn base_ref() -> Type {
    Type::type_ref(tsz_types::QualIdent::ident("Base"), Default::default(), p())
}

fn interface_extending_base() -> Type {
    Type::object(
        vec![ObjTypeElem::Property {
            name: ObjTypeKey::Str("name".into()),
            optional: false,
            readonly: false,
            value: Type::prim(PrimKind::String, p()),
        }],
        ObjectFlags::NOMINAL | ObjectFlags::INTERFACE,
        vec![base_ref()],
        vec![],
        p(),
    )
}

#[test]
fn two_separately_constructed_nominal_interfaces_are_structurally_equal() {
    let a = interface_extending_base();
    let b = interface_extending_base();
    assert!(equals(&a, &b), "nominal id must not leak into equality");

    let TypeKind::Object(a_data) = a.kind() else { unreachable!() };
    let TypeKind::Object(b_data) = b.kind() else { unreachable!() };
    assert_ne!(a_data.id, b_data.id, "ids should still differ physically");
}

#[test]
fn extends_list_is_visited_like_any_other_child() {
    struct RenameBase;
    impl TypeVisitor for RenameBase {
        fn enter(&mut self, t: &Type) -> Option<Type> {
            match t.kind() {
                TypeKind::TypeRef(data) if data.name == tsz_types::QualIdent::ident("Base") => {
                    Some(Type::type_ref(tsz_types::QualIdent::ident("Renamed"), Default::default(), t.provenance()))
                }
                _ => None,
            }
        }
    }

    let iface = interface_extending_base();
    let rewritten = iface.accept(&mut RenameBase);
    let TypeKind::Object(data) = rewritten.kind() else { unreachable!() };
    assert_eq!(data.extends[0].to_string(), "Renamed");
}

#[test]
fn differing_extends_target_breaks_equality() {
    let a = interface_extending_base();
    let other_ref = Type::type_ref(tsz_types::QualIdent::ident("Other"), Default::default(), p());
    let b = Type::object(
        vec![ObjTypeElem::Property {
            name: ObjTypeKey::Str("name".into()),
            optional: false,
            readonly: false,
            value: Type::prim(PrimKind::String, p()),
        }],
        ObjectFlags::NOMINAL | ObjectFlags::INTERFACE,
        vec![other_ref],
        vec![],
        p(),
    );
    assert!(!equals(&a, &b));
}
