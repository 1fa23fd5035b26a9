//! External service integrations.

pub mod sirene_client {
    pub use crate::sirene_client::*;
}
