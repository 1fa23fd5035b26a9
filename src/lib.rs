//! Sirene Relay Library
//!
//! Relays establishment lookups to the INSEE Sirene API. The relay obtains
//! an OAuth2 token with client credentials, fetches the establishment and
//! reduces it to the NAF code, NAF label and legal name used by the mobile
//! client.
//!
//! # Modules
//!
//! - `api`: HTTP layer.
//! - `core`: Lookup pipeline, models and errors.
//! - `integrations`: Sirene API client.
//! - `config`: Startup configuration.
//! - `credentials`: Per-request credential resolution.
//! - `errors`: Error kinds and their HTTP mapping.
//! - `handlers`: HTTP handlers and router.
//! - `lookup`: The token-then-lookup pipeline.
//! - `models`: Upstream and relay payloads.
//! - `openapi`: Generated API documentation.
//! - `sirene_client`: Sirene and token endpoint client.

pub mod api;
pub mod core;
pub mod integrations;

pub mod config;
pub mod credentials;
pub mod errors;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod openapi;
pub mod sirene_client;
