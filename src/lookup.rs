use crate::config::UpstreamConfig;
use crate::credentials::CredentialsProvider;
use crate::errors::AppError;
use crate::models::LookupResult;
use crate::sirene_client::SireneClient;

/// Resolves a SIRET into a [`LookupResult`].
///
/// One instance serves one request: credentials are resolved, a fresh
/// client is opened, then the token and establishment calls run in order.
pub struct LookupService<'a> {
    upstream: &'a UpstreamConfig,
    credentials: &'a dyn CredentialsProvider,
}

impl<'a> LookupService<'a> {
    pub fn new(upstream: &'a UpstreamConfig, credentials: &'a dyn CredentialsProvider) -> Self {
        Self {
            upstream,
            credentials,
        }
    }

    pub async fn lookup(&self, siret: &str) -> Result<LookupResult, AppError> {
        // No I/O happens before the credentials are known to be present.
        let credentials = self.credentials.credentials()?;

        let client = SireneClient::new(self.upstream)?;
        let access_token = client.fetch_token(&credentials).await?;
        let response = client.fetch_etablissement(&access_token, siret).await?;

        let result = LookupResult::from(response);
        tracing::info!(
            "Sirene lookup for {} succeeded (naf: {:?})",
            siret,
            result.naf_code
        );
        Ok(result)
    }
}
