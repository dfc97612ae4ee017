//! Epic web OAuth client.
//!
//! Produces the credential the SDK's auth login consumes: preferably a game
//! refresh token minted for the title's deployment, otherwise an exchange
//! code. Sessions are cached to `dumper_oauth.json` between runs and resumed
//! by verify-or-refresh.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CliError;

const OAUTH_HOST: &str = "account-public-service-prod03.ol.epicgames.com";

/// The launcher client every retail install authenticates as.
const LAUNCHER_CLIENT_ID: &str = "34a02cf8f4414e29b15921876da36f9a";
const LAUNCHER_CLIENT_SECRET: &str = "daafbccc737745039dffe53d94fc76cf";

const USER_AGENT: &str =
    "UELauncher/11.0.1-14907503+++Portal+Release-Live Windows/10.0.19041.1.256.64bit";

/// URL the user visits to obtain an authorization code for the launcher
/// client.
pub const AUTHORIZATION_CODE_URL: &str = "https://www.epicgames.com/id/api/redirect?clientId=34a02cf8f4414e29b15921876da36f9a&responseType=code";

/// Cached OAuth state, round-tripped through `dumper_oauth.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthSession {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub refresh_expires_at: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

pub struct EpicWebClient {
    http: reqwest::blocking::Client,
    session: Option<OAuthSession>,
}

impl EpicWebClient {
    pub fn new() -> Result<Self, CliError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            session: None,
        })
    }

    /// The live session, once a login succeeded.
    pub fn session(&self) -> Option<&OAuthSession> {
        self.session.as_ref()
    }

    /// Resume a cached session: keep the access token if the backend still
    /// accepts it, otherwise redeem the refresh token.
    pub fn resume(&mut self, cached: OAuthSession) -> Result<(), CliError> {
        if cached.access_token.is_empty() && cached.refresh_token.is_empty() {
            return Err(CliError::Login("cached session is empty".to_owned()));
        }

        if !cached.access_token.is_empty() && self.verify(&cached.access_token)? {
            tracing::debug!("cached access token still valid");
            self.session = Some(cached);
            return Ok(());
        }

        if cached.refresh_token.is_empty() {
            return Err(CliError::Login(
                "cached access token expired and no refresh token".to_owned(),
            ));
        }
        tracing::debug!("refreshing cached session");
        let session = self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", &cached.refresh_token),
        ])?;
        self.session = Some(session);
        Ok(())
    }

    /// Interactive login with an authorization code.
    pub fn login_with_authorization_code(&mut self, code: &str) -> Result<(), CliError> {
        let session = self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
        ])?;
        self.session = Some(session);
        Ok(())
    }

    /// Generate an exchange code from the live session.
    pub fn app_exchange_code(&self) -> Result<String, CliError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| CliError::Login("not logged in".to_owned()))?;

        let response: Value = self
            .http
            .get(format!("https://{OAUTH_HOST}/account/api/oauth/exchange"))
            .bearer_auth(&session.access_token)
            .send()?
            .error_for_status()?
            .json()?;
        response
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| CliError::Login("exchange response carried no code".to_owned()))
    }

    /// Redeem an exchange code against the title's own client for a game
    /// refresh token scoped to its deployment.
    pub fn game_refresh_token(
        &self,
        exchange_code: &str,
        deployment_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, CliError> {
        let response: Value = self
            .http
            .post(format!("https://{OAUTH_HOST}/account/api/oauth/token"))
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("grant_type", "exchange_code"),
                ("exchange_code", exchange_code),
                ("token_type", "eg1"),
                ("deployment_id", deployment_id),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        response
            .get("refresh_token")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| CliError::Login("token response carried no refresh_token".to_owned()))
    }

    fn verify(&self, access_token: &str) -> Result<bool, CliError> {
        let response = self
            .http
            .get(format!("https://{OAUTH_HOST}/account/api/oauth/verify"))
            .bearer_auth(access_token)
            .send()?;
        Ok(response.status().is_success())
    }

    fn token_request(&self, form: &[(&str, &str)]) -> Result<OAuthSession, CliError> {
        let response = self
            .http
            .post(format!("https://{OAUTH_HOST}/account/api/oauth/token"))
            .basic_auth(LAUNCHER_CLIENT_ID, Some(LAUNCHER_CLIENT_SECRET))
            .form(form)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Value = response.json().unwrap_or_default();
            let message = body
                .get("errorMessage")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(CliError::Login(format!("{status}: {message}")));
        }
        Ok(response.json()?)
    }
}

/// Decode the claims segment of a JWT without verifying it. Good enough to
/// recover the deployment/product/sandbox ids a game refresh token carries.
pub fn decode_jwt_payload(token: &str) -> Option<Value> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) => payload,
        _ => return None,
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_jwt_payload() {
        let claims = json!({
            "pfdid": "deployment",
            "pfsid": "sandbox",
            "aud": "client",
        });
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("header.{payload}.signature");

        let decoded = decode_jwt_payload(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_malformed_tokens() {
        assert!(decode_jwt_payload("no-dots-here").is_none());
        assert!(decode_jwt_payload("a.!!!.b").is_none());
    }

    #[test]
    fn test_session_round_trips_unknown_fields_tolerantly() {
        let session: OAuthSession = serde_json::from_value(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "unknown_field": 42,
        }))
        .unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.refresh_token, "rt");
        assert!(session.account_id.is_none());
    }
}
