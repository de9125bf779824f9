//! Authentication against the Forge OAuth2 servers.
//!
//! Only the two-legged client-credentials flow is supported: one
//! form-encoded POST exchanging a [`Credential`] for a bearer [`Token`].
//! Token renewal is up to the caller; nothing here refreshes automatically,
//! and the POST is sent without the transport retry layer.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ForgeError, Result};

/// Default Forge authentication endpoint.
pub const DEFAULT_AUTH_URL: &str =
    "https://developer.api.autodesk.com/authentication/v2/token";

const AUTH_TIMEOUT: Duration = Duration::from_secs(12);

/// Client credentials for a Forge app.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Client id of the Forge app.
    pub client_id: String,
    /// Client secret of the Forge app.
    pub client_secret: String,
    /// API access scopes requested in the authentication.
    pub scopes: Vec<String>,
    /// Address of the authentication server.
    pub web_address: String,
}

impl Credential {
    /// Create a credential against the default authentication server.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes,
            web_address: DEFAULT_AUTH_URL.to_string(),
        }
    }

    /// Scopes joined the way the auth server expects them.
    fn scope_field(&self) -> String {
        self.scopes.join(" ")
    }
}

/// A bearer token issued by the auth server.
///
/// Immutable once issued; expires `expires_in` seconds after `issued_at`.
#[derive(Debug, Clone)]
pub struct Token {
    /// The access token value sent in the Authorization header.
    pub value: String,
    /// Lifetime in seconds, as reported by the auth server.
    pub expires_in: u64,
    /// When the token was obtained.
    pub issued_at: DateTime<Utc>,
}

impl Token {
    /// Whether the token's reported lifetime has elapsed.
    pub fn is_expired(&self) -> bool {
        let age = Utc::now().signed_duration_since(self.issued_at);
        age.num_seconds() >= self.expires_in as i64
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Exchange client credentials for a bearer token.
///
/// Issues one POST with a form-encoded body `{client_id, client_secret,
/// grant_type: "client_credentials", scope}`.
///
/// # Errors
///
/// - 429/500 → [`ForgeError::Transient`]: the auth server asks to try again.
/// - any other non-200 → [`ForgeError::Api`] with status and body.
#[tracing::instrument(skip(credential), fields(client_id = %credential.client_id))]
pub async fn get_token(credential: &Credential) -> Result<Token> {
    let http = reqwest::Client::builder()
        .timeout(AUTH_TIMEOUT)
        .build()
        .map_err(ForgeError::Http)?;

    let form = [
        ("client_id", credential.client_id.as_str()),
        ("client_secret", credential.client_secret.as_str()),
        ("grant_type", "client_credentials"),
        ("scope", &credential.scope_field()),
    ];

    let issued_at = Utc::now();
    let response = http
        .post(&credential.web_address)
        .form(&form)
        .send()
        .await
        .map_err(ForgeError::Http)?;

    let status = response.status();
    if status.as_u16() == 200 {
        let parsed: TokenResponse = response.json().await.map_err(ForgeError::Http)?;
        return Ok(Token {
            value: parsed.access_token,
            expires_in: parsed.expires_in,
            issued_at,
        });
    }

    let body = response.text().await.unwrap_or_default();
    if matches!(status.as_u16(), 429 | 500) {
        return Err(ForgeError::Transient {
            status: status.as_u16(),
            body,
        });
    }
    Err(ForgeError::Api {
        status: status.as_u16(),
        body,
        endpoint: credential.web_address.clone(),
    })
}

/// Three-legged authorization-code flow.
///
/// # Errors
///
/// Always fails with [`ForgeError::NotImplemented`].
pub async fn get_token_authorization_code(_credential: &Credential) -> Result<Token> {
    Err(ForgeError::NotImplemented(
        "three-legged authorization-code flow",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_field_joins_with_spaces() {
        let cred = Credential::new(
            "id",
            "secret",
            vec!["data:read".to_string(), "data:write".to_string()],
        );
        assert_eq!(cred.scope_field(), "data:read data:write");
    }

    #[test]
    fn token_expiry() {
        let fresh = Token {
            value: "t".to_string(),
            expires_in: 3600,
            issued_at: Utc::now(),
        };
        assert!(!fresh.is_expired());

        let stale = Token {
            value: "t".to_string(),
            expires_in: 10,
            issued_at: Utc::now() - chrono::Duration::seconds(11),
        };
        assert!(stale.is_expired());
    }
}
