// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog Server - Token-Gated Book Catalog Service
//!
//! Registered clients exchange their credentials for a short-lived HS256
//! bearer token at `POST /token`; every `/v1` catalog route checks that token
//! before running.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and the OpenAPI document
//! - `auth` - Credential validation, token issuance/verification, the gate
//! - `config` - Environment configuration
//! - `store` - In-memory book / author / genre store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;
