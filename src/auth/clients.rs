// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registered clients and credential validation.
//!
//! Clients are provisioned from configuration at startup. Validation never
//! compares secrets directly: both sides are hashed with SHA-256 and the
//! digests are compared in constant time, so timing reveals neither the
//! content nor the length of a stored secret.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::{AuthError, ClientIdentity};

type SecretDigest = [u8; 32];

fn digest(secret: &str) -> SecretDigest {
    Sha256::digest(secret.as_bytes()).into()
}

/// A client allowed to obtain tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisteredClient {
    pub client_id: String,
    pub client_secret: String,
}

impl RegisteredClient {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for RegisteredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredClient")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Error raised when building a registry from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("client id must not be empty")]
    EmptyClientId,
    #[error("client secret for '{0}' must not be empty")]
    EmptyClientSecret(String),
    #[error("client '{0}' is registered more than once")]
    DuplicateClient(String),
}

/// Immutable allow-list of registered clients.
#[derive(Clone)]
pub struct ClientRegistry {
    clients: HashMap<String, SecretDigest>,
    // Compared against when the client id is unknown.
    decoy: SecretDigest,
}

impl ClientRegistry {
    /// Build a registry, rejecting empty values and duplicate identifiers.
    pub fn new(clients: impl IntoIterator<Item = RegisteredClient>) -> Result<Self, RegistryError> {
        let mut map = HashMap::new();
        for client in clients {
            if client.client_id.is_empty() {
                return Err(RegistryError::EmptyClientId);
            }
            if client.client_secret.is_empty() {
                return Err(RegistryError::EmptyClientSecret(client.client_id));
            }
            if map.contains_key(&client.client_id) {
                return Err(RegistryError::DuplicateClient(client.client_id));
            }
            map.insert(client.client_id, digest(&client.client_secret));
        }

        Ok(Self {
            clients: map,
            decoy: digest(&uuid::Uuid::new_v4().to_string()),
        })
    }

    /// Number of registered clients.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Check a presented credential pair.
    ///
    /// Identifier lookup is exact; the secret is compared in constant time.
    /// An unknown identifier still performs one digest comparison.
    pub fn validate(&self, client_id: &str, client_secret: &str) -> Result<ClientIdentity, AuthError> {
        let presented = digest(client_secret);
        let (expected, known) = match self.clients.get(client_id) {
            Some(stored) => (stored, true),
            None => (&self.decoy, false),
        };

        let matches: bool = presented.as_slice().ct_eq(expected.as_slice()).into();
        if known && matches {
            Ok(ClientIdentity::new(client_id))
        } else {
            Err(AuthError::InvalidClient)
        }
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.clients.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ClientRegistry")
            .field("client_ids", &ids)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClientRegistry {
        ClientRegistry::new([
            RegisteredClient::new("acme", "s3cr3t"),
            RegisteredClient::new("test_client", "test_secret"),
        ])
        .unwrap()
    }

    #[test]
    fn valid_credentials_yield_identity() {
        let identity = registry().validate("acme", "s3cr3t").unwrap();
        assert_eq!(identity.client_id(), "acme");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let registry = registry();
        for secret in ["", "s3cr3", "s3cr3t ", "S3CR3T", "test_secret", "s3cr3t\0"] {
            assert_eq!(
                registry.validate("acme", secret),
                Err(AuthError::InvalidClient),
                "secret {secret:?} must not validate"
            );
        }
    }

    #[test]
    fn unknown_client_is_rejected() {
        assert_eq!(
            registry().validate("nobody", "s3cr3t"),
            Err(AuthError::InvalidClient)
        );
    }

    #[test]
    fn client_id_match_is_exact() {
        let registry = registry();
        assert_eq!(registry.validate("ACME", "s3cr3t"), Err(AuthError::InvalidClient));
        assert_eq!(registry.validate(" acme", "s3cr3t"), Err(AuthError::InvalidClient));
    }

    #[test]
    fn duplicate_client_ids_are_refused() {
        let err = ClientRegistry::new([
            RegisteredClient::new("acme", "one"),
            RegisteredClient::new("acme", "two"),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateClient("acme".into()));
    }

    #[test]
    fn empty_values_are_refused() {
        assert_eq!(
            ClientRegistry::new([RegisteredClient::new("", "x")]).unwrap_err(),
            RegistryError::EmptyClientId
        );
        assert_eq!(
            ClientRegistry::new([RegisteredClient::new("acme", "")]).unwrap_err(),
            RegistryError::EmptyClientSecret("acme".into())
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let printed = format!("{:?}", RegisteredClient::new("acme", "s3cr3t"));
        assert!(!printed.contains("s3cr3t"));
    }
}
