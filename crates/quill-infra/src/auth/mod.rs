//! Editor access implementations.

mod shared_secret;

pub use shared_secret::{AccessConfig, DEFAULT_ADMIN_TOKEN, SharedSecretGate};
