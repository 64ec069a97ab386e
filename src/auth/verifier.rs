// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stateless access token verification.
//!
//! Verification order:
//!
//! 1. Signature, recomputed with the pinned HS256 algorithm
//! 2. Payload shape (`sub`, `iat`, `exp`, `jti`)
//! 3. Expiration against the caller-supplied `now`
//!
//! Expiry is checked here rather than by `jsonwebtoken`, which would read the
//! system clock and apply its own leeway.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Validation};

use super::{AccessClaims, AuthError, SigningSecret, SIGNING_ALGORITHM};

/// Decodes and authenticates presented tokens.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    secret: Arc<SigningSecret>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self { secret, validation }
    }

    /// Verify `token` at instant `now`.
    ///
    /// Returns the embedded claims unmodified, [`AuthError::InvalidToken`]
    /// for forged, tampered or malformed tokens, and
    /// [`AuthError::ExpiredToken`] once `now` reaches `exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, AuthError> {
        let token_data = decode::<AccessClaims>(token, self.secret.decoding_key(), &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token failed signature or format check");
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;
        if !claims.is_valid_at(now) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ClientIdentity, TokenIssuer};
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    const SECRET: &str = "mi_clave_super_secreta";

    fn secret() -> Arc<SigningSecret> {
        Arc::new(SigningSecret::new(SECRET).unwrap())
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    const ISSUED_AT: i64 = 1_700_000_000;

    fn issue(client_id: &str) -> String {
        TokenIssuer::new(secret())
            .issue(&ClientIdentity::new(client_id), at(ISSUED_AT))
            .unwrap()
            .access_token
    }

    #[test]
    fn issued_token_verifies_with_subject() {
        let verifier = TokenVerifier::new(secret());
        for client in ["acme", "test_client", "other"] {
            let claims = verifier.verify(&issue(client), at(ISSUED_AT)).unwrap();
            assert_eq!(claims.sub, client);
            assert_eq!(claims.exp, ISSUED_AT + 3600);
        }
    }

    #[test]
    fn expiry_boundary() {
        let verifier = TokenVerifier::new(secret());
        let token = issue("acme");

        assert!(verifier.verify(&token, at(ISSUED_AT + 3599)).is_ok());
        assert_eq!(
            verifier.verify(&token, at(ISSUED_AT + 3600)),
            Err(AuthError::ExpiredToken)
        );
        assert_eq!(
            verifier.verify(&token, at(ISSUED_AT + 3601)),
            Err(AuthError::ExpiredToken)
        );
    }

    #[test]
    fn garbage_is_invalid() {
        let verifier = TokenVerifier::new(secret());
        for token in ["", "garbage", "a.b.c", "a.b", "...."] {
            assert_eq!(
                verifier.verify(token, at(ISSUED_AT)),
                Err(AuthError::InvalidToken),
                "{token:?}"
            );
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let forged = TokenIssuer::new(Arc::new(SigningSecret::new("another-secret").unwrap()))
            .issue(&ClientIdentity::new("acme"), at(ISSUED_AT))
            .unwrap()
            .access_token;

        assert_eq!(
            TokenVerifier::new(secret()).verify(&forged, at(ISSUED_AT)),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn tampering_with_any_byte_is_detected() {
        let verifier = TokenVerifier::new(secret());
        let token = issue("acme");

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(
                verifier.verify(&tampered, at(ISSUED_AT)),
                Err(AuthError::InvalidToken),
                "tampering at byte {i} went unnoticed"
            );
        }
    }

    #[test]
    fn expired_and_tampered_reports_invalid() {
        let verifier = TokenVerifier::new(secret());
        let mut token = issue("acme");
        token.push('x');

        assert_eq!(
            verifier.verify(&token, at(ISSUED_AT + 7200)),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn other_algorithms_are_refused() {
        let claims = AccessClaims {
            sub: "acme".into(),
            iat: ISSUED_AT,
            exp: ISSUED_AT + 3600,
            jti: "jti".into(),
        };
        let hs384 = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            TokenVerifier::new(secret()).verify(&hs384, at(ISSUED_AT)),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn unsigned_none_token_is_refused() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"sub":"acme","iat":{ISSUED_AT},"exp":{},"jti":"x"}}"#,
                ISSUED_AT + 3600
            )
            .as_bytes(),
        );

        for token in [format!("{header}.{payload}."), format!("{header}.{payload}")] {
            assert_eq!(
                TokenVerifier::new(secret()).verify(&token, at(ISSUED_AT)),
                Err(AuthError::InvalidToken)
            );
        }
    }

    #[test]
    fn payload_missing_claims_is_invalid() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "acme".into(),
                exp: ISSUED_AT + 3600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            TokenVerifier::new(secret()).verify(&token, at(ISSUED_AT)),
            Err(AuthError::InvalidToken)
        );
    }
}
