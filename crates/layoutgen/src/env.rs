//! Environment resolution.
//!
//! Connection settings are read from environment variables whose names come
//! from [`EnvNameConfig`]. The run refuses to start unless the server, the
//! database and one complete set of credentials are present.

use crate::config::EnvNameConfig;
use layoutgen_dataapi::Auth;
use layoutgen_typegen::{AuthEnvNames, EnvNames};

/// Connection settings plus the variable names generated clients read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnv {
    pub server: String,
    pub db: String,
    pub auth: Auth,
    pub env_names: EnvNames,
}

/// Required variables that are unset or empty, in report order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required environment variables: {}", .missing.join(", "))]
pub struct MissingEnv {
    pub missing: Vec<String>,
}

/// Resolve connection settings through `lookup`.
///
/// An API key wins over username/password. `otto_port` is optional; an
/// unparsable port falls back to the default with a warning.
pub fn resolve_env(
    names: &EnvNameConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedEnv, MissingEnv> {
    let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

    let server = get(&names.server);
    let db = get(&names.db);
    let auth = match (get(&names.api_key), get(&names.username), get(&names.password)) {
        (Some(key), _, _) => Some((
            Auth::ApiKey {
                key,
                otto_port: otto_port(names, &get),
            },
            AuthEnvNames::ApiKey {
                api_key: names.api_key.clone(),
            },
        )),
        (None, Some(username), Some(password)) => Some((
            Auth::UserPassword { username, password },
            AuthEnvNames::UserPassword {
                username: names.username.clone(),
                password: names.password.clone(),
            },
        )),
        _ => None,
    };

    match (server, db, auth) {
        (Some(server), Some(db), Some((auth, auth_names))) => Ok(ResolvedEnv {
            server,
            db,
            auth,
            env_names: EnvNames {
                server: names.server.clone(),
                db: names.db.clone(),
                auth: auth_names,
            },
        }),
        (server, db, auth) => {
            let mut missing = Vec::new();
            if server.is_none() {
                missing.push(names.server.clone());
            }
            if db.is_none() {
                missing.push(names.db.clone());
            }
            if auth.is_none() {
                missing.push(format!(
                    "{} (or {} and {})",
                    names.api_key, names.username, names.password
                ));
            }
            Err(MissingEnv { missing })
        }
    }
}

/// Resolve against the process environment.
pub fn resolve_from_process(names: &EnvNameConfig) -> Result<ResolvedEnv, MissingEnv> {
    resolve_env(names, |name| std::env::var(name).ok())
}

fn otto_port(names: &EnvNameConfig, get: &impl Fn(&str) -> Option<String>) -> Option<u16> {
    let raw = get(&names.otto_port)?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!(variable = %names.otto_port, value = %raw, "ignoring invalid port");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_api_key() {
        let env = resolve_env(
            &EnvNameConfig::default(),
            lookup(&[
                ("FM_SERVER", "fm.example.com"),
                ("FM_DATABASE", "Contacts"),
                ("OTTO_API_KEY", "KEY_abc"),
                ("OTTO_PORT", "4040"),
                ("FM_USERNAME", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(env.server, "fm.example.com");
        assert_eq!(
            env.auth,
            Auth::ApiKey {
                key: "KEY_abc".into(),
                otto_port: Some(4040)
            }
        );
        assert_eq!(env.env_names, EnvNames::default());
    }

    #[test]
    fn test_username_password() {
        let env = resolve_env(
            &EnvNameConfig::default(),
            lookup(&[
                ("FM_SERVER", "fm.example.com"),
                ("FM_DATABASE", "Contacts"),
                ("FM_USERNAME", "admin"),
                ("FM_PASSWORD", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(env.auth, Auth::user_password("admin", "secret"));
        assert_eq!(
            env.env_names.auth,
            AuthEnvNames::UserPassword {
                username: "FM_USERNAME".into(),
                password: "FM_PASSWORD".into(),
            }
        );
    }

    #[test]
    fn test_custom_names() {
        let names = EnvNameConfig {
            server: "HOST".into(),
            db: "DB".into(),
            api_key: "KEY".into(),
            ..Default::default()
        };
        let env = resolve_env(
            &names,
            lookup(&[("HOST", "h"), ("DB", "d"), ("KEY", "dk_1")]),
        )
        .unwrap();
        assert_eq!(env.env_names.server, "HOST");
        assert_eq!(
            env.env_names.auth,
            AuthEnvNames::ApiKey {
                api_key: "KEY".into()
            }
        );
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let err = resolve_env(&EnvNameConfig::default(), lookup(&[("FM_DATABASE", "")]))
            .unwrap_err();
        assert_eq!(
            err.missing,
            vec![
                "FM_SERVER".to_string(),
                "FM_DATABASE".to_string(),
                "OTTO_API_KEY (or FM_USERNAME and FM_PASSWORD)".to_string(),
            ]
        );
    }

    #[test]
    fn test_username_without_password_is_missing_auth() {
        let err = resolve_env(
            &EnvNameConfig::default(),
            lookup(&[
                ("FM_SERVER", "fm.example.com"),
                ("FM_DATABASE", "Contacts"),
                ("FM_USERNAME", "admin"),
            ]),
        )
        .unwrap_err();
        assert_eq!(err.missing.len(), 1);
        assert!(err.missing[0].starts_with("OTTO_API_KEY"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let env = resolve_env(
            &EnvNameConfig::default(),
            lookup(&[
                ("FM_SERVER", "s"),
                ("FM_DATABASE", "d"),
                ("OTTO_API_KEY", "KEY_abc"),
                ("OTTO_PORT", "not-a-port"),
            ]),
        )
        .unwrap();
        assert_eq!(
            env.auth,
            Auth::ApiKey {
                key: "KEY_abc".into(),
                otto_port: None
            }
        );
    }
}
