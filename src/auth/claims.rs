// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token claims and the validated client identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A client whose credentials have been accepted by the registry.
///
/// Only [`ClientRegistry::validate`](super::ClientRegistry::validate) hands
/// these out, so holding one means the credential check already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    client_id: String,
}

impl ClientIdentity {
    pub(crate) fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Claims signed into every access token.
///
/// Never mutated after issuance. Validity is recomputed from the signature
/// and `exp` on every request; nothing is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessClaims {
    /// Subject: the client id that obtained the token
    pub sub: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,

    /// Unique token id (UUIDv4)
    pub jti: String,
}

impl AccessClaims {
    /// Whether the token is still valid at `now`.
    ///
    /// A token is expired from its `exp` second onward.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.exp > now.timestamp()
    }
}
