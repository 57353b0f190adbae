//! Admin-key verification for destructive calendar operations.
//!
//! Keys are supplied via EXAMPLAN_ADMIN_KEY / EXAMPLAN_MASTER_KEY, or as
//! SHA-256 hex digests in the config file (env wins). Candidates are hashed
//! before comparison so raw keys never take part in the equality check.

use sha2::{Digest, Sha256};

use crate::config::AuthConfig;

const ADMIN_KEY_ENV: &str = "EXAMPLAN_ADMIN_KEY";
const MASTER_KEY_ENV: &str = "EXAMPLAN_MASTER_KEY";

/// Resolved admin/master key digests.
#[derive(Debug, Clone, Default)]
pub struct AdminKeys {
    admin_digest: Option<String>,
    master_digest: Option<String>,
}

fn digest_hex(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

impl AdminKeys {
    /// Resolve keys from the environment, falling back to config digests.
    pub fn resolve(config: &AuthConfig) -> Self {
        let admin_digest = std::env::var(ADMIN_KEY_ENV)
            .ok()
            .map(|k| digest_hex(&k))
            .or_else(|| config.admin_key_sha256.clone());
        let master_digest = std::env::var(MASTER_KEY_ENV)
            .ok()
            .map(|k| digest_hex(&k))
            .or_else(|| config.master_key_sha256.clone());
        Self {
            admin_digest,
            master_digest,
        }
    }

    /// Build directly from plaintext keys (tests and embedding callers).
    pub fn from_keys(admin: Option<&str>, master: Option<&str>) -> Self {
        Self {
            admin_digest: admin.map(digest_hex),
            master_digest: master.map(digest_hex),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.admin_digest.is_some() || self.master_digest.is_some()
    }

    /// The master key opens admin operations too.
    pub fn verify_admin(&self, candidate: &str) -> bool {
        let candidate = digest_hex(candidate);
        self.admin_digest.as_deref() == Some(candidate.as_str())
            || self.master_digest.as_deref() == Some(candidate.as_str())
    }

    pub fn verify_master(&self, candidate: &str) -> bool {
        self.master_digest.as_deref() == Some(digest_hex(candidate).as_str())
    }
}
