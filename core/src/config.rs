//! Client configuration.

use crate::error::TransportError;

/// Fixed API host. Not configurable; tests redirect traffic at the transport.
pub const BASE_URL: &str = "https://api.typeform.com";

/// Environment variable read by [`ClientConfig::from_env`].
pub const API_KEY_ENV: &str = "TYPEFORM_API_KEY";

/// How the client treats the HTTP status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Decode every body regardless of status. A JSON error body from the
    /// API decodes into a zero-valued result.
    #[default]
    Ignore,
    /// Map 404 to `ApiError::NotFound` and any other non-2xx status to
    /// `ApiError::Remote` before decoding.
    Strict,
}

/// Client configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Personal access token, sent as a bearer token.
    pub api_key: String,

    /// User agent string.
    pub user_agent: String,

    /// Whether non-2xx responses become errors before decoding.
    pub status_policy: StatusPolicy,
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_agent: format!("typeform-core/{}", env!("CARGO_PKG_VERSION")),
            status_policy: StatusPolicy::default(),
        }
    }

    /// Reads the API key from `TYPEFORM_API_KEY`.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    /// Checks that the key and user agent can be sent as header values.
    ///
    /// An empty key is allowed; the API answers it with 401.
    pub fn validate(&self) -> Result<(), TransportError> {
        if !is_header_safe(&self.api_key) {
            return Err(TransportError::new(
                "api key contains characters not allowed in a header",
            ));
        }
        if !is_header_safe(&self.user_agent) {
            return Err(TransportError::new(
                "user agent contains characters not allowed in a header",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("status_policy", &self.status_policy)
            .finish()
    }
}

fn is_header_safe(value: &str) -> bool {
    value.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b))
}
