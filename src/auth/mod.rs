pub mod credentials;
pub mod extractors;
pub mod middleware;
pub mod token;

use serde::{Deserialize, Serialize};

pub use credentials::Credentials;
pub use extractors::AuthenticatedUser;
pub use middleware::AuthGate;
pub use token::{Claims, TokenError, TokenService, SESSION_IDENTITY, TOKEN_TTL_SECS};

/// Represents the payload of a login request.
///
/// Both fields are optional on the wire; a missing field simply never matches
/// the configured credentials.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Reads a login body.
    ///
    /// Only a non-empty body declared as JSON is parsed; anything else reads as
    /// an empty request, which then fails the credential check.
    pub fn from_body(declared_json: bool, body: &[u8]) -> Result<Self, serde_json::Error> {
        if !declared_json || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// True when both fields are present and equal to `credentials`.
    pub fn is_accepted_by(&self, credentials: &Credentials) -> bool {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => credentials.matches(username, password),
            _ => false,
        }
    }
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed session token.
    pub token: String,
}
