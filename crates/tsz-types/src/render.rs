//! Canonical textual rendering (`Display`) for every `Type` variant.
//!
//! This is the crate's only rendering surface — there is no
//! precedence-aware pretty-printer; mixed union/intersection nesting
//! renders without disambiguating parentheses (callers add their own, see
//! `DESIGN.md`).

use crate::namespace::Namespace;
use crate::obj::{MappedData, Modifier, ObjTypeElem};
use crate::ty::{FuncData, FuncParam, MutabilityKind, ObjectData, TemplateLitData, Type, TypeKind, TypeList, TypeParam};
use std::fmt;

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeKind::TypeVar(data) => write!(f, "T{}", data.id),
            TypeKind::TypeRef(data) => {
                write!(f, "{}", data.name)?;
                if !data.type_args.is_empty() {
                    write!(f, "<{}>", join(&data.type_args))?;
                }
                Ok(())
            }
            TypeKind::Prim(kind) => write!(f, "{kind}"),
            TypeKind::Lit(lit) => write!(f, "{lit}"),
            TypeKind::UniqueSymbol(value) => write!(f, "unique symbol({value})"),
            TypeKind::Unknown => write!(f, "unknown"),
            TypeKind::Never => write!(f, "never"),
            TypeKind::Void => write!(f, "void"),
            TypeKind::Any => write!(f, "any"),
            TypeKind::GlobalThis => write!(f, "globalThis"),
            TypeKind::Func(data) => write!(f, "fn {}{}", render_type_params(&data.type_params), render_func_tail(data)),
            TypeKind::Object(data) => render_object(f, data),
            TypeKind::Tuple(types) => write!(f, "[{}]", join(types)),
            TypeKind::RestSpread(inner) => write!(f, "...{inner}"),
            TypeKind::Union(types) => write!(f, "{}", join_with(types, " | ")),
            TypeKind::Intersection(types) => write!(f, "{}", join_with(types, " & ")),
            TypeKind::KeyOf(inner) => write!(f, "keyof {inner}"),
            TypeKind::TypeOf(ident) => write!(f, "typeof {ident}"),
            TypeKind::Index(data) => write!(f, "{}[{}]", data.target, data.index),
            TypeKind::Cond(data) => write!(
                f,
                "if {} : {} {{ {} }} else {{ {} }}",
                data.check, data.extends, data.then_branch, data.else_branch
            ),
            TypeKind::Infer(name) => write!(f, "infer {name}"),
            TypeKind::Mutability(data) => match data.kind {
                MutabilityKind::Mutable => write!(f, "mut {}", data.inner),
                MutabilityKind::Uncertain => write!(f, "mut? {}", data.inner),
            },
            TypeKind::Wildcard => write!(f, "*"),
            TypeKind::Extractor(data) => write!(f, "{}({})", data.extractor, join(&data.args)),
            TypeKind::TemplateLit(data) => render_template_lit(f, data),
            TypeKind::Intrinsic(name) => write!(f, "{name}"),
            TypeKind::Namespace(ns) => render_namespace(f, ns),
            TypeKind::Regex(data) => write!(f, "/{}/", data.compiled.source()),
        }
    }
}

fn join(types: &TypeList) -> String {
    join_with(types, ", ")
}

fn join_with(types: &TypeList, sep: &str) -> String {
    types.iter().map(ToString::to_string).collect::<Vec<_>>().join(sep)
}

fn render_type_params(type_params: &[TypeParam]) -> String {
    if type_params.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = type_params
        .iter()
        .map(|tp| {
            let mut s = tp.name.clone();
            if let Some(constraint) = &tp.constraint {
                s.push_str(&format!(" extends {constraint}"));
            }
            if let Some(default) = &tp.default {
                s.push_str(&format!(" = {default}"));
            }
            s
        })
        .collect();
    format!("<{}>", parts.join(", "))
}

fn render_param(param: &FuncParam) -> String {
    if param.optional {
        format!("{}?: {}", param.pat, param.ty)
    } else {
        format!("{}: {}", param.pat, param.ty)
    }
}

/// `(params) -> R throws E`, shared by `Type::Func` and the callable-shaped
/// object elements.
fn render_func_tail(func: &FuncData) -> String {
    let params = func.params.iter().map(render_param).collect::<Vec<_>>().join(", ");
    format!("({params}) -> {} throws {}", func.return_type, func.throws)
}

fn render_object(f: &mut fmt::Formatter<'_>, data: &ObjectData) -> fmt::Result {
    write!(f, "{{")?;
    for (i, elem) in data.elems.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        render_elem(f, elem)?;
    }
    write!(f, "}}")
}

fn render_elem(f: &mut fmt::Formatter<'_>, elem: &ObjTypeElem) -> fmt::Result {
    match elem {
        ObjTypeElem::Callable { func } => write!(f, "{}", render_func_tail(func)),
        ObjTypeElem::Constructor { func } => write!(f, "new {}", render_func_tail(func)),
        ObjTypeElem::Method { name, func, .. } => write!(f, "{name}{}", render_func_tail(func)),
        ObjTypeElem::Getter { name, func } => write!(f, "get {name}() -> {}", func.return_type),
        ObjTypeElem::Setter { name, func } => match func.params.first() {
            Some(param) => write!(f, "set {name}({}: {}) -> undefined", param.pat, param.ty),
            None => write!(f, "set {name}() -> undefined"),
        },
        ObjTypeElem::Property {
            name,
            optional,
            readonly,
            value,
        } => {
            if *readonly {
                write!(f, "readonly ")?;
            }
            if *optional {
                write!(f, "{name}?: {value}")
            } else {
                write!(f, "{name}: {value}")
            }
        }
        ObjTypeElem::Mapped { data } => render_mapped(f, data),
        ObjTypeElem::RestSpread { value } => write!(f, "...{value}"),
    }
}

fn modifier_sign(m: Modifier) -> &'static str {
    match m {
        Modifier::Add => "+",
        Modifier::Remove => "-",
    }
}

fn render_mapped(f: &mut fmt::Formatter<'_>, data: &MappedData) -> fmt::Result {
    if let Some(m) = data.readonly_mod {
        write!(f, "{}readonly ", modifier_sign(m))?;
    }
    write!(f, "[{} in {}", data.type_param.name, data.type_param.constraint)?;
    if let Some(extends) = &data.extends {
        write!(f, " extends {extends}")?;
    }
    if let Some(check) = &data.check {
        write!(f, " if {check}")?;
    }
    write!(f, "]")?;
    if let Some(rename) = &data.rename {
        write!(f, " as {rename}")?;
    }
    match data.optional_mod {
        Some(m) => write!(f, "{}?: {}", modifier_sign(m), data.value),
        None => write!(f, ": {}", data.value),
    }
}

fn render_template_lit(f: &mut fmt::Formatter<'_>, data: &TemplateLitData) -> fmt::Result {
    write!(f, "`")?;
    for (i, quasi) in data.quasis.iter().enumerate() {
        write!(f, "{quasi}")?;
        if let Some(ty) = data.types.get(i) {
            write!(f, "${{{ty}}}")?;
        }
    }
    write!(f, "`")
}

fn render_namespace(f: &mut fmt::Formatter<'_>, ns: &Namespace) -> fmt::Result {
    write!(f, "namespace {{ ")?;
    let mut first = true;
    for (name, binding) in &ns.values {
        if !first {
            write!(f, ", ")?;
        }
        first = false;
        write!(f, "{name}: {}", binding.ty)?;
    }
    for (name, alias) in &ns.types {
        if !first {
            write!(f, ", ")?;
        }
        first = false;
        write!(f, "type {name} = {}", alias.ty)?;
    }
    write!(f, " }}")
}
