use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::app_error::{AppError, Result};
use crate::steam::AUTH_PROBE_API;

/// Fixed per-request deadline. Steam answers these endpoints fast or not at
/// all; a timeout is surfaced to the caller, never retried here.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Client for the Steam Community Market web endpoints. Holds one reqwest
/// client and the session `Cookie` header, which is written once by
/// `set_steam_auth` and only read afterwards.
pub struct SteamClient {
    client: Client,
    cookie: String,
}

impl Default for SteamClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SteamClient {
    /// Unauthenticated client; only the catalog and search endpoints work
    /// until `set_steam_auth` succeeds.
    pub fn new() -> Self {
        SteamClient {
            client: Client::new(),
            cookie: String::new(),
        }
    }

    /// Build a client and validate the session cookie in one step.
    pub async fn connect(steam_login_secure: &str) -> Result<Self> {
        let mut client = SteamClient::new();
        client.set_steam_auth(steam_login_secure).await?;
        Ok(client)
    }

    /// Validate a steamLoginSecure cookie value against a known-good endpoint
    /// and store it as the Cookie header for all later calls. Steam answers
    /// the probe with an empty body when the cookie is not accepted.
    pub async fn set_steam_auth(&mut self, steam_login_secure: &str) -> Result<()> {
        let header = format!("steamLoginSecure={};", steam_login_secure);

        let response = self
            .client
            .get(AUTH_PROBE_API)
            .header(COOKIE, &header)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::SessionUnauthorized(format!("auth probe failed: {}", e)))?;
        let body = response
            .text()
            .await
            .map_err(|e| AppError::SessionUnauthorized(format!("auth probe failed: {}", e)))?;

        if body.is_empty() || body == "[]" || body == "null" {
            return Err(AppError::SessionUnauthorized(
                "the steamLoginSecure cookie was not accepted".to_string(),
            ));
        }

        self.cookie = header;
        Ok(())
    }

    /// Authenticated entry points call this before issuing any request, so a
    /// missing session fails fast instead of as a rejected remote call.
    pub(crate) fn ensure_auth(&self) -> Result<()> {
        if self.cookie.is_empty() {
            return Err(AppError::SessionUnauthorized(
                "cookie not set, call set_steam_auth first".to_string(),
            ));
        }
        Ok(())
    }

    /// One GET with query parameters and the session cookie, body parsed as
    /// JSON.
    pub(crate) async fn request_json(&self, api: &str, params: &[(&str, String)]) -> Result<Value> {
        let mut request = self.client.get(api).timeout(REQUEST_TIMEOUT);
        if !params.is_empty() {
            request = request.query(params);
        }
        if !self.cookie.is_empty() {
            request = request.header(COOKIE, &self.cookie);
        }

        let response = request.send().await?;
        let body = response.text().await?;
        debug!("GET {} -> {} bytes", api, body.len());

        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }
}
