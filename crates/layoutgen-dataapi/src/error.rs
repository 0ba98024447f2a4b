//! Data API errors.

/// FileMaker message code for "Layout is missing".
pub const LAYOUT_MISSING: &str = "105";

#[derive(Debug, thiserror::Error)]
pub enum DataApiError {
    /// FileMaker answered with a non-zero message code.
    #[error("FileMaker error {code}: {message}")]
    Api { code: String, message: String },

    /// Non-success status without a readable Data API envelope.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("failed to read response from {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("login to {url} returned no session token")]
    MissingToken { url: String },

    #[error("invalid server {0:?}: expected a host name or https:// URL")]
    InvalidServer(String),

    #[error("unrecognized API key: expected a key starting with \"KEY_\" or \"dk_\"")]
    InvalidApiKey,
}

impl DataApiError {
    /// FileMaker message code, if the server sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            DataApiError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The requested layout does not exist.
    pub fn is_layout_missing(&self) -> bool {
        self.code() == Some(LAYOUT_MISSING)
    }
}
