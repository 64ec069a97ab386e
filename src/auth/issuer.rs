// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token issuance.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Header};
use uuid::Uuid;

use super::{AccessClaims, AuthError, ClientIdentity, SigningSecret, SIGNING_ALGORITHM};

/// Default grant lifetime (1 hour).
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::seconds(3600);

/// Token type reported to clients.
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// A freshly signed token plus the metadata returned to the client.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub claims: AccessClaims,
}

/// Signs time-bounded access tokens for validated clients.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: Arc<SigningSecret>,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: Arc<SigningSecret>) -> Self {
        Self {
            secret,
            lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Override the grant lifetime. Non-positive values are ignored.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        if lifetime > Duration::zero() {
            self.lifetime = lifetime;
        }
        self
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Build and sign claims for `identity`, valid from `now` for one
    /// grant lifetime.
    ///
    /// Fails only with [`AuthError::SigningUnavailable`]; no token is
    /// returned unless it was signed.
    pub fn issue(&self, identity: &ClientIdentity, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let iat = now.timestamp();
        let claims = AccessClaims {
            sub: identity.client_id().to_string(),
            iat,
            exp: iat.saturating_add(self.lifetime.num_seconds()),
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(
            &Header::new(SIGNING_ALGORITHM),
            &claims,
            self.secret.encoding_key(),
        )
        .map_err(|e| AuthError::SigningUnavailable(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER,
            expires_in: self.lifetime.num_seconds(),
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(Arc::new(SigningSecret::new("test-secret").unwrap()))
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn claims_carry_subject_and_one_hour_expiry() {
        let issued = issuer()
            .issue(&ClientIdentity::new("acme"), at(1_700_000_000))
            .unwrap();

        assert_eq!(issued.claims.sub, "acme");
        assert_eq!(issued.claims.iat, 1_700_000_000);
        assert_eq!(issued.claims.exp, 1_700_003_600);
        assert_eq!(issued.token_type, "bearer");
        assert_eq!(issued.expires_in, 3600);
        assert!(!issued.access_token.is_empty());
    }

    #[test]
    fn token_is_a_three_part_hs256_jwt() {
        let issued = issuer()
            .issue(&ClientIdentity::new("acme"), at(1_700_000_000))
            .unwrap();

        assert_eq!(issued.access_token.split('.').count(), 3);
        let header = jsonwebtoken::decode_header(&issued.access_token).unwrap();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::HS256);
    }

    #[test]
    fn custom_lifetime_is_applied() {
        let issued = issuer()
            .with_lifetime(Duration::seconds(60))
            .issue(&ClientIdentity::new("acme"), at(100))
            .unwrap();
        assert_eq!(issued.claims.exp, 160);
        assert_eq!(issued.expires_in, 60);
    }

    #[test]
    fn non_positive_lifetime_keeps_default() {
        let issuer = issuer().with_lifetime(Duration::zero());
        assert_eq!(issuer.lifetime(), DEFAULT_TOKEN_LIFETIME);
    }

    #[test]
    fn token_ids_are_unique_across_many_issuances() {
        let issuer = issuer();
        let identity = ClientIdentity::new("acme");
        let now = at(1_700_000_000);

        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let issued = issuer.issue(&identity, now).unwrap();
            assert!(seen.insert(issued.claims.jti), "duplicate jti");
        }
    }
}
