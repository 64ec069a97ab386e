// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication service wiring the registry, issuer, verifier and clock.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::Duration;

use super::middleware::extract_bearer;
use super::{
    AccessClaims, AuthError, Clock, ClientRegistry, IssuedToken, SigningSecret, TokenIssuer,
    TokenVerifier,
};

/// Explicitly constructed authentication context.
///
/// Everything inside is immutable after construction; one instance is shared
/// across all requests through `AppState`.
#[derive(Clone)]
pub struct AuthService {
    registry: Arc<ClientRegistry>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        registry: ClientRegistry,
        secret: SigningSecret,
        lifetime: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let secret = Arc::new(secret);
        Self {
            registry: Arc::new(registry),
            issuer: TokenIssuer::new(Arc::clone(&secret)).with_lifetime(lifetime),
            verifier: TokenVerifier::new(secret),
            clock,
        }
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Client-credentials grant: validate the pair, then issue a token.
    pub fn grant(&self, client_id: &str, client_secret: &str) -> Result<IssuedToken, AuthError> {
        let identity = self
            .registry
            .validate(client_id, client_secret)
            .inspect_err(|_| {
                tracing::warn!(client_id, "Token request with invalid client credentials");
            })?;

        let issued = self
            .issuer
            .issue(&identity, self.clock.now())
            .inspect_err(|e| {
                tracing::error!(error = %e, client_id, "Failed to sign access token");
            })?;

        tracing::info!(
            client_id,
            jti = %issued.claims.jti,
            exp = issued.claims.exp,
            "Issued access token"
        );
        Ok(issued)
    }

    /// Extract and verify the bearer token carried by `headers`.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<AccessClaims, AuthError> {
        let token = extract_bearer(headers)?;
        self.verifier.verify(token, self.clock.now())
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("registry", &self.registry)
            .field("lifetime", &self.issuer.lifetime())
            .finish_non_exhaustive()
    }
}
