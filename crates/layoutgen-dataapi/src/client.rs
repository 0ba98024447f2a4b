//! Data API client.

use crate::error::DataApiError;
use crate::types::{Envelope, LayoutMetadataResponse, SessionResponse};
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Port of the Otto proxy for `KEY_` API keys when none is configured.
pub const DEFAULT_OTTO_PORT: u16 = 3030;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// How to authenticate against the server.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// FileMaker account; a session is opened on first use.
    UserPassword { username: String, password: String },
    /// Otto API key, sent as a bearer token through the proxy.
    ApiKey { key: String, otto_port: Option<u16> },
}

impl Auth {
    pub fn api_key(key: impl Into<String>) -> Self {
        Auth::ApiKey {
            key: key.into(),
            otto_port: None,
        }
    }

    pub fn user_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::UserPassword {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::UserPassword { username, .. } => f
                .debug_struct("UserPassword")
                .field("username", username)
                .finish_non_exhaustive(),
            Auth::ApiKey { otto_port, .. } => f
                .debug_struct("ApiKey")
                .field("otto_port", otto_port)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host name or `https://` URL of the FileMaker server.
    pub server: String,
    /// Database (file) name.
    pub db: String,
    pub auth: Auth,
}

/// Blocking Data API client holding at most one session token.
pub struct DataApiClient {
    agent: ureq::Agent,
    base_url: String,
    auth: Auth,
    session: Option<String>,
}

/// Database endpoint for `server`/`db`, routed by the kind of credentials.
///
/// - account: `https://server/fmi/data/vLatest/databases/{db}`
/// - `KEY_` key: `https://server:{otto_port}/fmi/data/vLatest/databases/{db}`
/// - `dk_` key: `https://server/otto/fmi/data/vLatest/databases/{db}`
pub fn base_url(server: &str, db: &str, auth: &Auth) -> Result<String, DataApiError> {
    let origin = server_origin(server)?;
    let db = urlencoding::encode(db);
    match auth {
        Auth::UserPassword { .. } => Ok(format!("{origin}/fmi/data/vLatest/databases/{db}")),
        Auth::ApiKey { key, .. } if key.starts_with("dk_") => {
            Ok(format!("{origin}/otto/fmi/data/vLatest/databases/{db}"))
        }
        Auth::ApiKey { key, otto_port } if key.starts_with("KEY_") => {
            let port = otto_port.unwrap_or(DEFAULT_OTTO_PORT);
            Ok(format!("{origin}:{port}/fmi/data/vLatest/databases/{db}"))
        }
        Auth::ApiKey { .. } => Err(DataApiError::InvalidApiKey),
    }
}

/// `https://host` from a bare host or URL, without trailing slashes.
fn server_origin(server: &str) -> Result<String, DataApiError> {
    let trimmed = server.trim().trim_end_matches('/');
    let host = match trimmed.split_once("://") {
        Some(("https", host)) => host,
        Some(_) => return Err(DataApiError::InvalidServer(server.to_string())),
        None => trimmed,
    };
    if host.is_empty() || host.contains('/') {
        return Err(DataApiError::InvalidServer(server.to_string()));
    }
    Ok(format!("https://{host}"))
}

impl DataApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, DataApiError> {
        let base_url = base_url(&config.server, &config.db, &config.auth)?;
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Ok(Self {
            agent,
            base_url,
            auth: config.auth,
            session: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Field, portal and value-list metadata of `layout`.
    ///
    /// A missing layout surfaces as [`DataApiError::Api`] with code
    /// [`LAYOUT_MISSING`](crate::LAYOUT_MISSING).
    pub fn layout_metadata(&mut self, layout: &str) -> Result<LayoutMetadataResponse, DataApiError> {
        let bearer = self.bearer()?;
        let url = format!("{}/layouts/{}", self.base_url, urlencoding::encode(layout));
        tracing::debug!(%url, "fetching layout metadata");

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {bearer}"))
            .call();
        let response = read_envelope(&url, result)?;
        decode(&url, response)
    }

    /// Close the session opened for account credentials. No-op for API keys.
    pub fn logout(&mut self) -> Result<(), DataApiError> {
        let Some(token) = self.session.take() else {
            return Ok(());
        };
        let url = format!("{}/sessions/{}", self.base_url, token);
        tracing::debug!(base_url = %self.base_url, "closing Data API session");
        let result = self.agent.delete(&url).call();
        read_envelope(&url, result).map(|_| ())
    }

    fn bearer(&mut self) -> Result<String, DataApiError> {
        match &self.auth {
            Auth::ApiKey { key, .. } => Ok(key.clone()),
            Auth::UserPassword { username, password } => {
                if let Some(token) = &self.session {
                    return Ok(token.clone());
                }
                let token = self.login(username, password)?;
                self.session = Some(token.clone());
                Ok(token)
            }
        }
    }

    fn login(&self, username: &str, password: &str) -> Result<String, DataApiError> {
        let url = format!("{}/sessions", self.base_url);
        tracing::debug!(%url, %username, "opening Data API session");

        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        let result = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Basic {credentials}"))
            .set("Content-Type", "application/json")
            .send_string("{}");
        let response = read_envelope(&url, result)?;
        match decode::<SessionResponse>(&url, response) {
            Ok(session) if !session.token.is_empty() => Ok(session.token),
            Ok(_) | Err(DataApiError::Decode { .. }) => Err(DataApiError::MissingToken { url }),
            Err(err) => Err(err),
        }
    }
}

impl Drop for DataApiClient {
    fn drop(&mut self) {
        if self.session.is_some() {
            if let Err(err) = self.logout() {
                tracing::warn!(%err, "failed to close Data API session");
            }
        }
    }
}

/// Read the body of a finished request and unwrap its envelope.
fn read_envelope(
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<Value, DataApiError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => {
            return Err(DataApiError::Transport {
                url: url.to_string(),
                source: Box::new(transport),
            });
        }
    };
    let status = response.status();
    let body = response.into_string().map_err(|source| DataApiError::Io {
        url: url.to_string(),
        source,
    })?;
    parse_envelope(url, status, &body)
}

/// Check the message codes of a Data API envelope and return its `response`.
pub(crate) fn parse_envelope(url: &str, status: u16, body: &str) -> Result<Value, DataApiError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if status >= 400 => {
            return Err(DataApiError::Http {
                status,
                url: url.to_string(),
            });
        }
        Err(source) => {
            return Err(DataApiError::Decode {
                url: url.to_string(),
                source,
            });
        }
    };

    if let Some(message) = envelope.messages.into_iter().find(|m| m.code != "0") {
        return Err(DataApiError::Api {
            code: message.code,
            message: message.message,
        });
    }
    if status >= 400 {
        return Err(DataApiError::Http {
            status,
            url: url.to_string(),
        });
    }
    Ok(envelope.response.unwrap_or(Value::Null))
}

fn decode<T: DeserializeOwned>(url: &str, response: Value) -> Result<T, DataApiError> {
    serde_json::from_value(response).map_err(|source| DataApiError::Decode {
        url: url.to_string(),
        source,
    })
}
