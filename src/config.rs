use serde::Deserialize;
use std::time::Duration;
use url::Url;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TOKEN_URL: &str = "https://api.insee.fr/oauth2/token";
const DEFAULT_API_BASE_URL: &str = "https://api.insee.fr/entreprises/sirene";
const DEFAULT_API_VERSION: &str = "V3.11";
const DEFAULT_LOOKUP_FIELDS: &str = "uniteLegale";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide configuration, built once at startup.
///
/// API credentials are deliberately absent: they are resolved on every
/// request through a [`crate::credentials::CredentialsProvider`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Explicit CORS allow-list. `None` means any origin is accepted.
    pub cors_allowed_origins: Option<Vec<String>>,
    pub upstream: UpstreamConfig,
}

/// Endpoints and call parameters of the Sirene API.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub token_url: String,
    pub api_base_url: String,
    pub api_version: String,
    pub token_scope: Option<String>,
    pub lookup_fields: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token_scope: None,
            lookup_fields: DEFAULT_LOOKUP_FIELDS.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl UpstreamConfig {
    /// Builds the establishment lookup URL for `siret`.
    ///
    /// The identifier is pushed as a single path segment, so it can never
    /// escape into the query string or traverse to another resource.
    pub fn lookup_url(&self, siret: &str) -> anyhow::Result<Url> {
        if siret.is_empty() || siret == "." || siret == ".." {
            anyhow::bail!("invalid establishment identifier: {:?}", siret);
        }
        let mut url = Url::parse(&self.api_base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API base URL cannot be a base"))?
            .pop_if_empty()
            .push(&self.api_version)
            .push("siret")
            .push(siret);
        url.query_pairs_mut()
            .append_pair("champs", &self.lookup_fields);
        Ok(url)
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            None => DEFAULT_PORT,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS").and_then(|raw| {
            let origins: Vec<String> = raw
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if origins.is_empty() || origins.iter().any(|o| o == "*") {
                None
            } else {
                Some(origins)
            }
        });

        let token_url = http_url(
            "SIRENE_TOKEN_URL",
            var("SIRENE_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
        )?;
        let api_base_url = http_url(
            "SIRENE_API_BASE_URL",
            var("SIRENE_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let api_version = var("SIRENE_API_VERSION")
            .map(|v| v.trim().trim_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        if api_version.contains('/') {
            anyhow::bail!("SIRENE_API_VERSION must be a single path segment");
        }

        let timeout_secs = match var("SIRENE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => anyhow::bail!("SIRENE_TIMEOUT_SECS must be a positive integer"),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            port,
            cors_allowed_origins,
            upstream: UpstreamConfig {
                token_url,
                api_base_url,
                api_version,
                token_scope: var("SIRENE_TOKEN_SCOPE"),
                lookup_fields: var("SIRENE_LOOKUP_FIELDS")
                    .unwrap_or_else(|| DEFAULT_LOOKUP_FIELDS.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        };

        tracing::debug!("Token URL: {}", config.upstream.token_url);
        tracing::debug!(
            "Sirene API: {}/{}",
            config.upstream.api_base_url,
            config.upstream.api_version
        );
        match config.cors_allowed_origins {
            Some(ref origins) => tracing::info!("CORS restricted to {:?}", origins),
            None => tracing::info!("CORS allows any origin"),
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn http_url(name: &str, value: String) -> anyhow::Result<String> {
    let value = value.trim().trim_end_matches('/').to_string();
    if !value.starts_with("http://") && !value.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Url::parse(&value).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    Ok(value)
}
