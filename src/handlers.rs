use crate::config::Config;
use crate::credentials::CredentialsProvider;
use crate::errors::AppError;
use crate::lookup::LookupService;
use crate::models::LookupResult;
use crate::openapi;
use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration.
    pub config: Config,
    /// Where the INSEE credentials come from on each request.
    pub credentials: Arc<dyn CredentialsProvider>,
}

/// Health check endpoint.
///
/// Returns the service status and version. Does not contact the upstream.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "sirene-relay",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /siret/:siret
///
/// Looks up an establishment in the Sirene registry and returns its NAF
/// code, NAF nomenclature and legal name.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `siret` - The establishment identifier, taken verbatim from the path.
#[utoipa::path(
    get,
    path = "/siret/{siret}",
    params(("siret" = String, Path, description = "SIRET of the establishment")),
    responses(
        (status = 200, description = "Establishment found", body = LookupResult),
        (status = 401, description = "Token endpoint rejected the credentials", body = crate::models::ErrorBody),
        (status = 404, description = "Unknown SIRET", body = crate::models::ErrorBody),
        (status = 500, description = "Missing credentials, missing token or transport failure", body = crate::models::ErrorBody),
        (status = 503, description = "Sirene unavailable, status mirrored", body = crate::models::ErrorBody)
    )
)]
pub async fn get_siret(
    State(state): State<Arc<AppState>>,
    Path(siret): Path<String>,
) -> Result<Json<LookupResult>, AppError> {
    tracing::info!("GET /siret/{}", siret);

    let service = LookupService::new(&state.config.upstream, state.credentials.as_ref());
    let result = service.lookup(&siret).await?;

    Ok(Json(result))
}

/// Builds the CORS layer from the configured allow-list.
///
/// Without an allow-list every origin, method and header is accepted.
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(config: &Config) -> CorsLayer {
    match config.cors_allowed_origins {
        None => CorsLayer::permissive(),
        Some(ref origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Assembles the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .route("/siret/:siret", get(get_siret))
        .route("/docs", get(openapi::serve_swagger_ui))
        .route("/api-docs/openapi.json", get(openapi::serve_openapi_spec))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
