//! Shared-secret access gate.

use subtle::ConstantTimeEq;

use quill_core::ports::{AccessError, AccessGate};

/// Placeholder secret used when none is configured.
pub const DEFAULT_ADMIN_TOKEN: &str = "changeme";

/// Access gate configuration.
#[derive(Clone)]
pub struct AccessConfig {
    pub admin_token: String,
}

impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("admin_token", &"<redacted>")
            .finish()
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            admin_token: DEFAULT_ADMIN_TOKEN.to_string(),
        }
    }
}

impl AccessConfig {
    pub fn uses_default_token(&self) -> bool {
        self.admin_token == DEFAULT_ADMIN_TOKEN
    }
}

/// Authorizes editors holding the configured admin token.
///
/// The comparison runs in constant time over the token bytes.
pub struct SharedSecretGate {
    secret: Vec<u8>,
}

impl SharedSecretGate {
    pub fn new(config: AccessConfig) -> Self {
        Self {
            secret: config.admin_token.into_bytes(),
        }
    }
}

impl AccessGate for SharedSecretGate {
    fn authorize(&self, presented: Option<&str>) -> Result<(), AccessError> {
        let token = match presented {
            Some(token) if !token.is_empty() => token,
            _ => {
                tracing::warn!("Rejected editor request without token");
                return Err(AccessError::MissingToken);
            }
        };

        if !bool::from(token.as_bytes().ct_eq(self.secret.as_slice())) {
            tracing::warn!("Rejected editor request with invalid token");
            return Err(AccessError::InvalidToken);
        }

        Ok(())
    }
}
