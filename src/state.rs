// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthService;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// The auth service is immutable after startup; only the catalog store sits
/// behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthService) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(auth),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{DateTime, Duration};

    use super::AppState;
    use crate::auth::{AuthService, ClientRegistry, ManualClock, RegisteredClient, SigningSecret};
    use crate::store::InMemoryStore;

    pub const TEST_CLIENT_ID: &str = "acme";
    pub const TEST_CLIENT_SECRET: &str = "s3cr3t";

    /// State with one registered client and a hand-driven clock.
    pub fn test_state() -> (AppState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let auth = AuthService::new(
            ClientRegistry::new([RegisteredClient::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET)])
                .unwrap(),
            SigningSecret::new("test-signing-secret").unwrap(),
            Duration::seconds(3600),
            clock.clone(),
        );
        (AppState::new(InMemoryStore::new(), auth), clock)
    }
}
