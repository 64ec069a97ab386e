// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared HMAC signing secret.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use super::AuthError;

/// The only algorithm tokens are signed and verified with.
///
/// Fixed in code so a token header can never pick the verification algorithm.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Symmetric secret used by both the issuer and the verifier.
///
/// Built once at startup and shared read-only (behind an `Arc`) afterward.
pub struct SigningSecret {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningSecret {
    /// Create a signing secret from raw bytes.
    ///
    /// An empty secret is refused: HMAC would accept it, but every token
    /// would then be forgeable.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(AuthError::SigningUnavailable(
                "signing secret is empty".to_string(),
            ));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}
