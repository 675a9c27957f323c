// src/auth/token.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

/// A bearer token as handed to the client, plus the digest the database keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    raw: String,
    digest: [u8; 32],
}

impl SessionToken {
    pub fn issue() -> Self {
        Self::issue_with(&mut OsRng)
    }

    /// 32 random bytes, URL-safe base64 without padding (43 chars).
    pub fn issue_with<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rng.fill_bytes(&mut bytes);
        Self::from_raw(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Rebuild from a token presented by a client.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let digest = token_digest(&raw);
        Self { raw, digest }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}

fn token_digest(raw: &str) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(raw.as_bytes()));
    digest
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
