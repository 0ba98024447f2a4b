//! Node model for generated TypeScript modules.
//!
//! A [`Document`] is an ordered list of top-level statements. Builders in
//! `layoutgen-typegen` assemble documents; the writer in
//! [`output::typescript`](crate::output::typescript) prints them. Nothing here
//! knows about schemas or backends.

/// A complete generated module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub body: Vec<Stmt>,
}

/// A top-level or nested statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `import { a, b } from "source";`
    Import { names: Vec<String>, source: String },

    /// `export type Name = ty;`
    TypeAlias { name: String, ty: Type },

    /// `export const name = init;`
    Const { name: String, init: Expr },

    /// `if (test) consequent`
    If { test: Expr, consequent: Box<Stmt> },

    /// `throw expr;`
    Throw(Expr),

    /// `export { local as exported } from "source";`
    ExportFrom {
        specifiers: Vec<ExportSpecifier>,
        source: String,
    },
}

/// One entry of an `export { ... } from` list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),

    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },

    /// `callee<type_args>(args)`
    Call {
        callee: Box<Expr>,
        type_args: Vec<Type>,
        args: Vec<Expr>,
    },

    /// `new callee(args)`
    New { callee: Box<Expr>, args: Vec<Expr> },

    /// `!expr`
    Not(Box<Expr>),

    Array(Vec<Expr>),

    /// Object literal. `multiline` puts one property per line.
    Object {
        props: Vec<(String, Expr)>,
        multiline: bool,
    },

    /// Source text carried over verbatim from a user-authored file.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    String(String),
}

/// Type nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    String,
    Number,
    Null,
    Any,
    StringLiteral(String),
    Union(Vec<Type>),
    Array(Box<Type>),
    /// Named reference with optional type arguments (`z.infer<...>`).
    Ref { name: String, args: Vec<Type> },
    /// `typeof name`
    TypeOf(String),
    /// Object type literal, always printed one member per line.
    Object(Vec<(String, Type)>),
}

impl Document {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }

    pub fn extend(&mut self, stmts: impl IntoIterator<Item = Stmt>) {
        self.body.extend(stmts);
    }
}

impl Stmt {
    pub fn import(names: Vec<String>, source: impl Into<String>) -> Self {
        Stmt::Import {
            names,
            source: source.into(),
        }
    }

    pub fn export_type(name: impl Into<String>, ty: Type) -> Self {
        Stmt::TypeAlias {
            name: name.into(),
            ty,
        }
    }

    pub fn export_const(name: impl Into<String>, init: Expr) -> Self {
        Stmt::Const {
            name: name.into(),
            init,
        }
    }

    pub fn if_stmt(test: Expr, consequent: Stmt) -> Self {
        Stmt::If {
            test,
            consequent: Box::new(consequent),
        }
    }

    pub fn throw(expr: Expr) -> Self {
        Stmt::Throw(expr)
    }

    /// `export { local as exported } from "source";`
    pub fn export_from(
        local: impl Into<String>,
        exported: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Stmt::ExportFrom {
            specifiers: vec![ExportSpecifier {
                local: local.into(),
                exported: exported.into(),
            }],
            source: source.into(),
        }
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Member chain from dotted path: `path("process.env.X")`.
    pub fn path(dotted: &str) -> Self {
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap_or_default();
        parts.fold(Expr::ident(first), |object, part| Expr::member(object, part))
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            type_args: Vec::new(),
            args,
        }
    }

    pub fn call_generic(callee: Expr, type_args: Vec<Type>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            type_args,
            args,
        }
    }

    /// `object.method(args)`
    pub fn method(object: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::call(Expr::member(object, method), args)
    }

    pub fn new_expr(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::New {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn array(items: Vec<Expr>) -> Self {
        Expr::Array(items)
    }

    pub fn object(props: Vec<(String, Expr)>) -> Self {
        Expr::Object {
            props,
            multiline: false,
        }
    }

    pub fn object_multiline(props: Vec<(String, Expr)>) -> Self {
        Expr::Object {
            props,
            multiline: true,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }
}

impl Type {
    pub fn string_literal(s: impl Into<String>) -> Self {
        Type::StringLiteral(s.into())
    }

    pub fn array(inner: Type) -> Self {
        Type::Array(Box::new(inner))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Type::Ref {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<Type>) -> Self {
        Type::Ref {
            name: name.into(),
            args,
        }
    }

    pub fn type_of(name: impl Into<String>) -> Self {
        Type::TypeOf(name.into())
    }
}
