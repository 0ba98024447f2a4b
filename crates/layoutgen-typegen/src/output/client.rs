//! Client module builder.

use super::{
    AuthEnvNames, ClientTarget, EnvNames, GenerationUnit, portals_type_name,
    portals_validator_name, type_name, validator_name,
};
use crate::ir::Backend;
use layoutgen_syntax::{Document, Expr, Stmt, Type};

/// Package the generated client is built on.
pub const CLIENT_PACKAGE: &str = "@proofgeist/fmdapi";

/// Entry point of the client package for web viewer code.
pub const WEBVIEWER_CLIENT_PACKAGE: &str = "@proofgeist/fmdapi/dist/wv";

/// Build the client module for `unit`.
///
/// The standard target guards every required environment variable before
/// constructing the client. The web viewer target reads no environment and
/// never carries a token store.
pub fn build_client_module(unit: &GenerationUnit) -> Document {
    let package = match unit.target {
        ClientTarget::Standard { .. } => CLIENT_PACKAGE,
        ClientTarget::WebViewer { .. } => WEBVIEWER_CLIENT_PACKAGE,
    };

    let mut doc = Document::new(vec![
        Stmt::import(vec!["DataApi".into()], package),
        Stmt::import(schema_imports(unit), format!("../{}", unit.schema_name)),
    ]);

    if let ClientTarget::Standard { .. } = unit.target {
        doc.extend(required_env(&unit.env_names).into_iter().map(guard));
    }

    let mut type_args = vec![Type::Any, Type::reference(type_name(&unit.schema_name))];
    if unit.has_portals() {
        type_args.push(Type::reference(portals_type_name(&unit.schema_name)));
    }

    let mut args = vec![Expr::object_multiline(client_options(unit))];
    if unit.backend == Backend::Validator {
        let mut validators = vec![(
            "fieldData".to_string(),
            Expr::ident(validator_name(&unit.schema_name)),
        )];
        if unit.has_portals() {
            validators.push((
                "portalData".to_string(),
                Expr::ident(portals_validator_name(&unit.schema_name)),
            ));
        }
        args.push(Expr::object_multiline(validators));
    }

    doc.push(Stmt::export_const(
        "client",
        Expr::call_generic(Expr::ident("DataApi"), type_args, args),
    ));
    doc
}

/// Names imported from the schema module, types first.
fn schema_imports(unit: &GenerationUnit) -> Vec<String> {
    let mut names = vec![type_name(&unit.schema_name)];
    if unit.has_portals() {
        names.push(portals_type_name(&unit.schema_name));
    }
    if unit.backend == Backend::Validator {
        names.push(validator_name(&unit.schema_name));
        if unit.has_portals() {
            names.push(portals_validator_name(&unit.schema_name));
        }
    }
    names
}

fn client_options(unit: &GenerationUnit) -> Vec<(String, Expr)> {
    let layout = ("layout".to_string(), Expr::string(&unit.layout_name));
    match &unit.target {
        ClientTarget::WebViewer { script_name } => vec![
            layout,
            ("scriptName".to_string(), Expr::string(script_name)),
        ],
        ClientTarget::Standard { token_store } => {
            let env = &unit.env_names;
            let auth = match &env.auth {
                AuthEnvNames::ApiKey { api_key } => vec![("apiKey".to_string(), env_var(api_key))],
                AuthEnvNames::UserPassword { username, password } => vec![
                    ("username".to_string(), env_var(username)),
                    ("password".to_string(), env_var(password)),
                ],
            };
            let mut options = vec![
                ("auth".to_string(), Expr::object(auth)),
                ("db".to_string(), env_var(&env.db)),
                ("server".to_string(), env_var(&env.server)),
                layout,
            ];
            if let Some(store) = token_store {
                options.push(("tokenStore".to_string(), store.clone()));
            }
            options
        }
    }
}

/// Variables checked before the client is constructed, in guard order.
pub fn required_env(env: &EnvNames) -> Vec<&str> {
    let mut names = vec![env.db.as_str(), env.server.as_str()];
    match &env.auth {
        AuthEnvNames::ApiKey { api_key } => names.push(api_key),
        AuthEnvNames::UserPassword { username, password } => {
            names.push(username);
            names.push(password);
        }
    }
    names
}

/// `process.env.<name>`
fn env_var(name: &str) -> Expr {
    Expr::path(&format!("process.env.{name}"))
}

/// `if (!process.env.<name>) throw new Error("Missing env var: <name>");`
fn guard(name: &str) -> Stmt {
    Stmt::if_stmt(
        Expr::not(env_var(name)),
        Stmt::throw(Expr::new_expr(
            Expr::ident("Error"),
            vec![Expr::string(format!("Missing env var: {name}"))],
        )),
    )
}
