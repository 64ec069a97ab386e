// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Client-credentials token issuance and the bearer-token gate guarding the
//! catalog API.
//!
//! ## Auth Flow
//!
//! 1. Client sends `POST /token` with `client_id` / `client_secret`
//! 2. Server:
//!    - Validates the pair against the registered clients (constant time)
//!    - Signs an HS256 JWT with `sub`, `iat`, `exp` (+1 hour), `jti`
//! 3. Client sends `Authorization: Bearer <token>` on every `/v1` call
//! 4. Gate:
//!    - Verifies signature with the pinned algorithm
//!    - Checks `exp` against the server clock
//!    - Runs the wrapped handler, or rejects with 401
//!
//! ## Security
//!
//! - Tokens are stateless: nothing is stored, nothing can be revoked early
//! - The algorithm is fixed in code, never read from the token header
//! - Secrets and tokens are never logged

pub mod claims;
pub mod clients;
pub mod clock;
pub mod error;
pub mod issuer;
pub mod middleware;
pub mod secret;
pub mod service;
pub mod verifier;

pub use claims::{AccessClaims, ClientIdentity};
pub use clients::{ClientRegistry, RegisteredClient, RegistryError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AuthError;
pub use issuer::{IssuedToken, TokenIssuer, DEFAULT_TOKEN_LIFETIME, TOKEN_TYPE_BEARER};
pub use middleware::{extract_bearer, require_bearer};
pub use secret::{SigningSecret, SIGNING_ALGORITHM};
pub use service::AuthService;
pub use verifier::TokenVerifier;
