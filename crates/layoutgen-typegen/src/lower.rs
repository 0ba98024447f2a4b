//! Lowering canonical field kinds into type and validator nodes.
//!
//! | kind                | type             | validator                                  |
//! |---------------------|------------------|--------------------------------------------|
//! | String              | `string`         | `z.string()`                               |
//! | FmNumber            | `number \| string` | `z.union([z.string(), z.number()])`      |
//! | FmNumber (strict)   | `number \| null` | `z.coerce.number().nullable().catch(null)` |
//! | ValueList           | `"a" \| "b"`     | `z.enum(["a", "b"])`                       |
//!
//! A value list without members lowers like `String`.

use crate::ir::{Backend, FieldKind, SchemaEntry};
use layoutgen_syntax::{Expr, Type};

/// Lowered form of one schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Lowered {
    pub ty: Type,
    /// Present only for [`Backend::Validator`].
    pub validator: Option<Expr>,
}

pub fn lower(entry: &SchemaEntry, strict: bool, backend: Backend) -> Lowered {
    Lowered {
        ty: lower_type(&entry.kind, strict),
        validator: match backend {
            Backend::Validator => Some(lower_validator(&entry.kind, strict)),
            Backend::TypesOnly => None,
        },
    }
}

fn lower_type(kind: &FieldKind, strict: bool) -> Type {
    match kind {
        FieldKind::String => Type::String,
        FieldKind::FmNumber if strict => Type::Union(vec![Type::Number, Type::Null]),
        FieldKind::FmNumber => Type::Union(vec![Type::Number, Type::String]),
        FieldKind::ValueList { values } if values.is_empty() => Type::String,
        FieldKind::ValueList { values } => value_list_type(values),
    }
}

fn lower_validator(kind: &FieldKind, strict: bool) -> Expr {
    match kind {
        FieldKind::String => z("string", vec![]),
        FieldKind::FmNumber if strict => {
            let coerced = Expr::method(Expr::member(Expr::ident("z"), "coerce"), "number", vec![]);
            Expr::method(
                Expr::method(coerced, "nullable", vec![]),
                "catch",
                vec![Expr::null()],
            )
        }
        FieldKind::FmNumber => z(
            "union",
            vec![Expr::array(vec![z("string", vec![]), z("number", vec![])])],
        ),
        FieldKind::ValueList { values } if values.is_empty() => z("string", vec![]),
        FieldKind::ValueList { values } => value_list_validator(values),
    }
}

/// `"a" | "b" | ...`
pub(crate) fn value_list_type(values: &[String]) -> Type {
    Type::Union(values.iter().map(Type::string_literal).collect())
}

/// `z.enum(["a", "b", ...])`
pub(crate) fn value_list_validator(values: &[String]) -> Expr {
    z(
        "enum",
        vec![Expr::array(values.iter().map(Expr::string).collect())],
    )
}

/// `z.<method>(args)`
pub(crate) fn z(method: &str, args: Vec<Expr>) -> Expr {
    Expr::method(Expr::ident("z"), method, args)
}
