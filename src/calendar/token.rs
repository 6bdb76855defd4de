use crate::config::Config;
use crate::error::{token_error, AgendaResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

/// Manages the cached OAuth token on disk
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<Config>,
    cache_path: PathBuf,
    client: Client,
}

impl TokenManager {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        let cache_path = config.token_cache_path.clone();

        Self {
            config,
            cache_path,
            client,
        }
    }

    /// Get OAuth token, either from the cache file or by refreshing an expired one
    pub async fn get_token(&self) -> AgendaResult<Value> {
        let token_str = fs::read_to_string(&self.cache_path).await.map_err(|_| {
            token_error(&format!(
                "No token cache at {}. Provision one with a refresh token first.",
                self.cache_path.display()
            ))
        })?;

        let token: Value = serde_json::from_str(&token_str)
            .map_err(|e| token_error(&format!("Failed to parse token JSON: {}", e)))?;

        // Check if token is expired
        if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
            let now = Utc::now().timestamp();
            if expiry > now {
                return Ok(token);
            }
        }

        // Token is expired or carries no expiry, refresh it
        self.refresh_token(&token).await
    }

    /// Refresh an expired token and rewrite the cache file
    async fn refresh_token(&self, token: &Value) -> AgendaResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| token_error("No refresh token in token data"))?;

        let params = [
            ("client_id", self.config.google_client_id.clone()),
            ("client_secret", self.config.google_client_secret.clone()),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| token_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(token_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| token_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| token_error("Token response missing 'access_token' field"))?;

        // Combine new access token with existing refresh token
        let mut token_data = serde_json::Map::new();
        token_data.insert("access_token".to_string(), json!(access_token));
        token_data.insert("refresh_token".to_string(), json!(refresh_token));

        // Calculate expiry
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        let expires_at = Utc::now().timestamp() + expires_in;
        token_data.insert("expires_at".to_string(), json!(expires_at));

        let token_json = Value::Object(token_data);
        fs::write(&self.cache_path, token_json.to_string())
            .await
            .map_err(|e| token_error(&format!("Failed to write token cache: {}", e)))?;

        Ok(token_json)
    }
}
