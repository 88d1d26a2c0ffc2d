//! Object-type elements — the members that make up a `Type::Object`.

use crate::ty::{FuncData, Type};

/// A property/method key: a string name, a numeric index, or a computed
/// symbol identified by a small integer id.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjTypeKey {
    Str(String),
    Num(f64),
    SymbolId(u32),
}

impl std::fmt::Display for ObjTypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjTypeKey::Str(s) => write!(f, "{s}"),
            ObjTypeKey::Num(n) => write!(f, "{n}"),
            ObjTypeKey::SymbolId(id) => write!(f, "[Symbol#{id}]"),
        }
    }
}

/// `Add`/`Remove` modifier attached to `Mapped`'s `optional`/`readonly`
/// positions, e.g. the `+?`/`-?`/`+readonly`/`-readonly` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Add,
    Remove,
}

/// The `{name, constraint}` binder of a `Mapped` element's `[K in C]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedTypeParam {
    pub name: String,
    pub constraint: Type,
}

/// The payload of [`ObjTypeElem::Mapped`]: `[K in C as R]?: V` with optional
/// modifiers and an optional `check extends` filter.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedData {
    pub type_param: MappedTypeParam,
    pub rename: Option<Type>,
    pub value: Type,
    pub optional_mod: Option<Modifier>,
    pub readonly_mod: Option<Modifier>,
    pub check: Option<Type>,
    pub extends: Option<Type>,
}

/// One member of a `Type::Object`.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjTypeElem {
    Callable { func: FuncData },
    Constructor { func: FuncData },
    Method { name: ObjTypeKey, func: FuncData, mut_self: Option<bool> },
    Getter { name: ObjTypeKey, func: FuncData },
    Setter { name: ObjTypeKey, func: FuncData },
    Property { name: ObjTypeKey, optional: bool, readonly: bool, value: Type },
    Mapped { data: MappedData },
    RestSpread { value: Type },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::Provenance;
    use crate::ty::PrimKind;

    fn p() -> Provenance {
        Provenance::dummy()
    }

    #[test]
    fn test_property_equality_is_structural() {
        let a = ObjTypeElem::Property {
            name: ObjTypeKey::Str("x".into()),
            optional: false,
            readonly: false,
            value: Type::prim(PrimKind::String, p()),
        };
        let b = ObjTypeElem::Property {
            name: ObjTypeKey::Str("x".into()),
            optional: false,
            readonly: false,
            value: Type::prim(PrimKind::String, p()),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_rendering() {
        assert_eq!(ObjTypeKey::Str("a".into()).to_string(), "a");
        assert_eq!(ObjTypeKey::Num(3.0).to_string(), "3");
        assert_eq!(ObjTypeKey::SymbolId(7).to_string(), "[Symbol#7]");
    }
}
