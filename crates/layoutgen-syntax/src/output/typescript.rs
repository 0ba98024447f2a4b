//! TypeScript writer for generated modules.
//!
//! Prints a [`Document`] statement by statement in build order. The output is a
//! pure function of the document: nothing is sorted, nothing is cached.

use crate::ir::*;
use crate::traits::Writer;
use std::fmt::Write;

/// Header prepended to every generated file.
pub const GENERATED_BANNER: &str = "/**
 * Generated by layoutgen
 * DO NOT EDIT THIS FILE DIRECTLY. Changes may be overwritten
 */

// @generated
// prettier-ignore
/* eslint-disable */
";

/// Static instance of the TypeScript writer.
pub static TYPESCRIPT_WRITER: TypeScriptWriterImpl = TypeScriptWriterImpl;

/// TypeScript writer implementing the Writer trait.
pub struct TypeScriptWriterImpl;

impl Writer for TypeScriptWriterImpl {
    fn extension(&self) -> &'static str {
        "ts"
    }

    fn write(&self, document: &Document) -> String {
        TypeScriptWriter::emit_module(document)
    }
}

/// Emits documents as TypeScript source code.
pub struct TypeScriptWriter {
    output: String,
    indent: usize,
}

impl TypeScriptWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Emit a document without the banner.
    pub fn emit(document: &Document) -> String {
        let mut writer = Self::new();
        writer.write_document(document);
        writer.output
    }

    /// Emit a document as a complete generated file, banner first.
    pub fn emit_module(document: &Document) -> String {
        let mut writer = Self::new();
        writer.output.push_str(GENERATED_BANNER);
        writer.write_document(document);
        writer.output
    }

    fn write_document(&mut self, document: &Document) {
        for stmt in &document.body {
            self.write_stmt(stmt);
            self.output.push('\n');
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    fn write_stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        self.write_stmt_inline(stmt);
    }

    fn write_stmt_inline(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Import { names, source } => {
                self.output.push_str("import { ");
                self.output.push_str(&names.join(", "));
                write!(self.output, " }} from \"{}\";", escape_string(source)).unwrap();
            }

            Stmt::TypeAlias { name, ty } => {
                write!(self.output, "export type {} = ", name).unwrap();
                self.write_type(ty);
                self.output.push(';');
            }

            Stmt::Const { name, init } => {
                write!(self.output, "export const {} = ", name).unwrap();
                self.write_expr(init);
                self.output.push(';');
            }

            Stmt::If { test, consequent } => {
                self.output.push_str("if (");
                self.write_expr(test);
                self.output.push_str(") ");
                self.write_stmt_inline(consequent);
            }

            Stmt::Throw(expr) => {
                self.output.push_str("throw ");
                self.write_expr(expr);
                self.output.push(';');
            }

            Stmt::ExportFrom { specifiers, source } => {
                self.output.push_str("export { ");
                for (i, spec) in specifiers.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(&spec.local);
                    if spec.exported != spec.local {
                        write!(self.output, " as {}", spec.exported).unwrap();
                    }
                }
                write!(self.output, " }} from \"{}\";", escape_string(source)).unwrap();
            }
        }
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.write_literal(lit),

            Expr::Ident(name) => self.output.push_str(name),

            Expr::Member { object, property } => {
                self.write_expr(object);
                self.output.push('.');
                self.output.push_str(property);
            }

            Expr::Call {
                callee,
                type_args,
                args,
            } => {
                self.write_expr(callee);
                if !type_args.is_empty() {
                    self.output.push('<');
                    for (i, ty) in type_args.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.write_type(ty);
                    }
                    self.output.push('>');
                }
                self.write_args(args);
            }

            Expr::New { callee, args } => {
                self.output.push_str("new ");
                self.write_expr(callee);
                self.write_args(args);
            }

            Expr::Not(inner) => {
                self.output.push('!');
                self.write_expr(inner);
            }

            Expr::Array(items) => {
                self.output.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_expr(item);
                }
                self.output.push(']');
            }

            Expr::Object { props, multiline } => {
                if props.is_empty() {
                    self.output.push_str("{}");
                } else if *multiline {
                    self.output.push_str("{\n");
                    self.indent += 1;
                    for (key, value) in props {
                        self.write_indent();
                        self.write_key(key);
                        self.output.push_str(": ");
                        self.write_expr(value);
                        self.output.push_str(",\n");
                    }
                    self.indent -= 1;
                    self.write_indent();
                    self.output.push('}');
                } else {
                    self.output.push_str("{ ");
                    for (i, (key, value)) in props.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.write_key(key);
                        self.output.push_str(": ");
                        self.write_expr(value);
                    }
                    self.output.push_str(" }");
                }
            }

            Expr::Raw(text) => self.output.push_str(text),
        }
    }

    fn write_args(&mut self, args: &[Expr]) {
        self.output.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_expr(arg);
        }
        self.output.push(')');
    }

    fn write_key(&mut self, key: &str) {
        if is_valid_identifier(key) {
            self.output.push_str(key);
        } else {
            write!(self.output, "\"{}\"", escape_string(key)).unwrap();
        }
    }

    fn write_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Null => self.output.push_str("null"),
            Literal::String(s) => write!(self.output, "\"{}\"", escape_string(s)).unwrap(),
        }
    }

    fn write_type(&mut self, ty: &Type) {
        match ty {
            Type::String => self.output.push_str("string"),
            Type::Number => self.output.push_str("number"),
            Type::Null => self.output.push_str("null"),
            Type::Any => self.output.push_str("any"),

            Type::StringLiteral(s) => write!(self.output, "\"{}\"", escape_string(s)).unwrap(),

            Type::Union(members) => {
                if members.is_empty() {
                    self.output.push_str("never");
                }
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(" | ");
                    }
                    self.write_type(member);
                }
            }

            Type::Array(inner) => {
                if matches!(inner.as_ref(), Type::Union(_)) {
                    self.output.push('(');
                    self.write_type(inner);
                    self.output.push(')');
                } else {
                    self.write_type(inner);
                }
                self.output.push_str("[]");
            }

            Type::Ref { name, args } => {
                self.output.push_str(name);
                if !args.is_empty() {
                    self.output.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.write_type(arg);
                    }
                    self.output.push('>');
                }
            }

            Type::TypeOf(name) => write!(self.output, "typeof {}", name).unwrap(),

            Type::Object(members) => {
                if members.is_empty() {
                    self.output.push_str("{}");
                    return;
                }
                self.output.push_str("{\n");
                self.indent += 1;
                for (key, member) in members {
                    self.write_indent();
                    self.write_key(key);
                    self.output.push_str(": ");
                    self.write_type(member);
                    self.output.push_str(";\n");
                }
                self.indent -= 1;
                self.write_indent();
                self.output.push('}');
            }
        }
    }
}

impl Default for TypeScriptWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '_' && first != '$' {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
