//! Tree-sitter based reflection over a user-authored TypeScript config file.
//!
//! The file is parsed, never executed. Only one pattern is recognized: a
//! top-level binding named `config` initialized with an object literal, and one
//! property of that object. Every missing piece along the way yields `None`.
//!
//! Syntax errors elsewhere in the file are tolerated; only a binding or
//! property value that is itself broken counts as missing.

use crate::ir::Expr;
use crate::traits::ReadError;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Name of the top-level binding searched for.
pub const CONFIG_BINDING: &str = "config";

/// Property holding the token store factory.
pub const TOKEN_STORE_PROPERTY: &str = "tokenStore";

/// Look up the token store expression in the config file at `path`.
///
/// Unreadable files are reported at debug level and treated the same as a
/// file without a `tokenStore` property.
pub fn reflect_token_store(path: &Path) -> Option<Expr> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "config file not readable");
            return None;
        }
    };
    match read_token_store(&source) {
        Ok(found) => found,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "config file not reflectable");
            None
        }
    }
}

/// Look up `config.tokenStore` in TypeScript source and normalize it to a
/// reusable construction expression.
///
/// - `tokenStore: makeStore` becomes `makeStore()`
/// - `tokenStore: () => makeStore(opts)` becomes `makeStore(opts)`
/// - anything else is reused verbatim
pub fn read_token_store(source: &str) -> Result<Option<Expr>, ReadError> {
    let tree = parse(source)?;
    let ctx = ReflectContext::new(source);
    Ok(ctx
        .find_property(&tree, CONFIG_BINDING, TOKEN_STORE_PROPERTY)
        .map(|value| ctx.construction_expr(value)))
}

fn parse(source: &str) -> Result<Tree, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))
}

/// Value of a property: either the node after the colon, or the identifier of
/// a shorthand property.
#[derive(Clone, Copy)]
enum PropertyValue<'t> {
    Assigned(Node<'t>),
    Shorthand(Node<'t>),
}

struct ReflectContext<'a> {
    source: &'a str,
}

impl<'a> ReflectContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn find_property<'t>(
        &self,
        tree: &'t Tree,
        binding: &str,
        property: &str,
    ) -> Option<PropertyValue<'t>> {
        let init = self.find_binding(tree.root_node(), binding)?;
        let object = unwrap_expression(init);
        if object.kind() != "object" {
            return None;
        }
        self.object_property(object, property)
    }

    /// Initializer of the first top-level `const`/`let`/`var` binding named `name`.
    fn find_binding<'t>(&self, root: Node<'t>, name: &str) -> Option<Node<'t>> {
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.is_error() {
                continue;
            }
            let declaration = match child.kind() {
                "lexical_declaration" | "variable_declaration" => child,
                "export_statement" => match child.child_by_field_name("declaration") {
                    Some(decl)
                        if matches!(decl.kind(), "lexical_declaration" | "variable_declaration") =>
                    {
                        decl
                    }
                    _ => continue,
                },
                _ => continue,
            };
            if let Some(init) = self.declarator_value(declaration, name) {
                return Some(init);
            }
        }
        None
    }

    fn declarator_value<'t>(&self, declaration: Node<'t>, name: &str) -> Option<Node<'t>> {
        let mut cursor = declaration.walk();
        for declarator in declaration.named_children(&mut cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(id) = declarator.child_by_field_name("name") else {
                continue;
            };
            if id.kind() == "identifier" && !id.is_missing() && self.node_text(id) == name {
                return declarator
                    .child_by_field_name("value")
                    .filter(|value| !value.is_error() && !value.is_missing());
            }
        }
        None
    }

    fn object_property<'t>(&self, object: Node<'t>, property: &str) -> Option<PropertyValue<'t>> {
        let mut cursor = object.walk();
        for member in object.named_children(&mut cursor) {
            match member.kind() {
                "pair" => {
                    let Some(key) = member.child_by_field_name("key") else {
                        continue;
                    };
                    if self.key_name(key) == Some(property) {
                        return member
                            .child_by_field_name("value")
                            .filter(is_intact)
                            .map(PropertyValue::Assigned);
                    }
                }
                "shorthand_property_identifier" => {
                    if self.node_text(member) == property {
                        return Some(PropertyValue::Shorthand(member));
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn key_name<'n>(&'n self, key: Node) -> Option<&'n str> {
        let text = self.node_text(key);
        match key.kind() {
            "property_identifier" => Some(text),
            "string" => text
                .strip_prefix(['"', '\''])
                .and_then(|s| s.strip_suffix(['"', '\''])),
            _ => None,
        }
    }

    fn construction_expr(&self, value: PropertyValue) -> Expr {
        let node = match value {
            PropertyValue::Shorthand(id) => {
                return Expr::call(Expr::ident(self.node_text(id)), vec![]);
            }
            PropertyValue::Assigned(node) => node,
        };
        match node.kind() {
            "identifier" => Expr::call(Expr::ident(self.node_text(node)), vec![]),
            "arrow_function" => match node.child_by_field_name("body") {
                Some(body) if body.kind() == "call_expression" => {
                    Expr::raw(self.node_text(body))
                }
                _ => Expr::raw(self.node_text(node)),
            },
            _ => Expr::raw(self.node_text(node)),
        }
    }
}

/// True when the node holds no error or recovery-inserted nodes.
fn is_intact(node: &Node) -> bool {
    !node.has_error()
}

/// Strip parentheses and `as`/`satisfies` wrappers around an expression.
fn unwrap_expression(mut node: Node) -> Node {
    while matches!(
        node.kind(),
        "parenthesized_expression" | "as_expression" | "satisfies_expression"
    ) {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}
