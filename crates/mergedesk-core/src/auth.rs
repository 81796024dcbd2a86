//! Admin credential check.
//!
//! Only the SHA-256 digest of the admin password is configured. This is a
//! convenience gate for a static site, not server-side authentication.

use sha2::{Digest, Sha256};

/// Configured admin credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    admin_id: String,
    password_digest: [u8; 32],
}

impl Credentials {
    /// Build from the admin id and the hex-encoded SHA-256 of the password.
    ///
    /// Returns `None` when the id is blank or the digest is not 32 hex bytes.
    pub fn from_hex(admin_id: &str, password_sha256_hex: &str) -> Option<Self> {
        let admin_id = admin_id.trim();
        if admin_id.is_empty() {
            return None;
        }
        let bytes = hex::decode(password_sha256_hex.trim()).ok()?;
        let password_digest: [u8; 32] = bytes.try_into().ok()?;
        Some(Self {
            admin_id: admin_id.to_string(),
            password_digest,
        })
    }

    pub fn admin_id(&self) -> &str {
        &self.admin_id
    }

    /// Check a login attempt.
    pub fn verify(&self, admin_id: &str, password: &str) -> bool {
        let digest = password_digest(password);
        let id_ok = admin_id.trim() == self.admin_id;
        let password_ok = constant_time_eq(&digest, &self.password_digest);
        id_ok & password_ok
    }
}

fn password_digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

/// Hex SHA-256 of a password, the form expected in configuration.
pub fn password_digest_hex(password: &str) -> String {
    hex::encode(password_digest(password))
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
