use crate::errors::AppError;
use std::fmt;

pub const CLIENT_ID_VAR: &str = "INSEE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "INSEE_CLIENT_SECRET";

/// OAuth2 client-credentials pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of the API credentials, consulted once per request.
pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials, AppError>;
}

/// Reads the credentials from the process environment on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    id_var: String,
    secret_var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::with_vars(CLIENT_ID_VAR, CLIENT_SECRET_VAR)
    }
}

impl EnvCredentials {
    pub fn with_vars(id_var: impl Into<String>, secret_var: impl Into<String>) -> Self {
        Self {
            id_var: id_var.into(),
            secret_var: secret_var.into(),
        }
    }

    fn read(&self, name: &str) -> Result<String, AppError> {
        std::env::var(name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Configuration(format!("{} is not set", name)))
    }
}

impl CredentialsProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, AppError> {
        let client_id = self.read(&self.id_var)?;
        let client_secret = self.read(&self.secret_var)?;
        Ok(Credentials {
            client_id,
            client_secret,
        })
    }
}

/// Fixed credentials, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<Credentials>);

impl StaticCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self(Some(Credentials::new(client_id, client_secret)))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialsProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, AppError> {
        match &self.0 {
            Some(creds)
                if !creds.client_id.trim().is_empty() && !creds.client_secret.trim().is_empty() =>
            {
                Ok(creds.clone())
            }
            _ => Err(AppError::Configuration(
                "static credentials are empty".to_string(),
            )),
        }
    }
}
