use crate::config::UpstreamConfig;
use crate::credentials::Credentials;
use crate::errors::AppError;
use crate::models::{EtablissementResponse, TokenResponse};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Sirene API and its OAuth2 token endpoint.
///
/// Built for a single inbound request. Idle connections are not kept, so
/// dropping the client releases everything it opened.
pub struct SireneClient {
    client: reqwest::Client,
    upstream: UpstreamConfig,
}

impl SireneClient {
    /// Creates a new `SireneClient`.
    ///
    /// # Arguments
    ///
    /// * `upstream` - Endpoints, scope and timeout to use.
    pub fn new(upstream: &UpstreamConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(upstream.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(upstream.timeout))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create Sirene client: {:?}", e)))?;

        Ok(Self {
            client,
            upstream: upstream.clone(),
        })
    }

    /// Exchanges the client credentials for a bearer token.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - A non-empty access token.
    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<String, AppError> {
        tracing::info!("Requesting Sirene access token from {}", self.upstream.token_url);

        let mut form = vec![("grant_type", "client_credentials")];
        if let Some(ref scope) = self.upstream.token_scope {
            form.push(("scope", scope.as_str()));
        }

        let response = self
            .client
            .post(&self.upstream.token_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Token request to {} failed: {:?}", self.upstream.token_url, e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Token endpoint returned {}: {}", status, error_text);
            return Err(AppError::token_rejected(status));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {:?}", e);
            AppError::invalid_token_response()
        })?;

        match body.token() {
            Some(token) => {
                tracing::debug!("Sirene access token obtained");
                Ok(token)
            }
            None => {
                tracing::error!("Token endpoint answered {} without an access_token", status);
                Err(AppError::missing_token())
            }
        }
    }

    /// Fetches the establishment identified by `siret`.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Bearer token from [`SireneClient::fetch_token`].
    /// * `siret` - Registry identifier, used as-is.
    pub async fn fetch_etablissement(
        &self,
        access_token: &str,
        siret: &str,
    ) -> Result<EtablissementResponse, AppError> {
        let url = self
            .upstream
            .lookup_url(siret)
            .map_err(|e| AppError::Internal(format!("Failed to build lookup URL: {:#}", e)))?;
        tracing::info!("Fetching establishment {} from Sirene", siret);

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Sirene lookup for {} failed: {:?}", siret, e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("INSEE error: {} {}", status.as_u16(), error_text);
            return Err(AppError::UpstreamLookup { status });
        }

        let data = response.json().await.map_err(|e| {
            AppError::Internal(format!("Failed to parse Sirene response: {:?}", e))
        })?;

        Ok(data)
    }
}
