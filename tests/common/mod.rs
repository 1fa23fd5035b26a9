// Shared helpers for the integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sirene_relay::config::{Config, UpstreamConfig};
use sirene_relay::credentials::{CredentialsProvider, StaticCredentials};
use sirene_relay::handlers::{build_router, AppState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test-id";
pub const CLIENT_SECRET: &str = "test-secret";
/// `Basic base64("test-id:test-secret")`
pub const BASIC_AUTH: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const SIRET: &str = "12345678901234";
pub const LOOKUP_PATH: &str = "/V3.11/siret/12345678901234";

/// Upstream configuration pointing both endpoints at the mock server.
pub fn upstream_for(server: &MockServer) -> UpstreamConfig {
    UpstreamConfig {
        token_url: format!("{}{}", server.uri(), TOKEN_PATH),
        api_base_url: server.uri(),
        api_version: "V3.11".to_string(),
        token_scope: None,
        lookup_fields: "uniteLegale".to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn test_credentials() -> StaticCredentials {
    StaticCredentials::new(CLIENT_ID, CLIENT_SECRET)
}

pub fn app_with(
    upstream: UpstreamConfig,
    credentials: impl CredentialsProvider + 'static,
    cors_allowed_origins: Option<Vec<String>>,
) -> Router {
    let state = Arc::new(AppState {
        config: Config {
            port: 0,
            cors_allowed_origins,
            upstream,
        },
        credentials: Arc::new(credentials),
    });
    build_router(state)
}

pub fn app(server: &MockServer) -> Router {
    app_with(upstream_for(server), test_credentials(), None)
}

/// Sends a GET through the router and returns status and raw body.
pub async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn full_unite_legale() -> serde_json::Value {
    serde_json::json!({
        "header": {"statut": 200, "message": "ok"},
        "etablissement": {
            "siret": SIRET,
            "uniteLegale": {
                "activitePrincipale": "62.01Z",
                "nomenclatureActivitePrincipale": "NAFRev2",
                "denominationUniteLegale": "ACME SAS"
            }
        }
    })
}

/// In-memory log sink.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes this thread's log output into a buffer until the guard drops.
/// Works with the default current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
