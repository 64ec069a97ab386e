// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Token**: client-credentials request and the issued token response
//! - **Authors**, **Genres**, **Books**: catalog records and their
//!   create/update payloads
//!
//! Catalog records are soft-deleted: `deleted` is set and the row stays in
//! the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Identifier of a catalog record, assigned sequentially per table.
pub type RecordId = i64;

// =============================================================================
// Token Models
// =============================================================================

/// Client-credentials token request.
///
/// Missing fields are treated as wrong credentials, not as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// Issued access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TokenResponse {
    /// Signed bearer token
    #[serde(rename = "token_acceso")]
    pub access_token: String,
    /// Always `bearer`
    #[serde(rename = "tipo_token")]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(rename = "expira_en")]
    pub expires_in: i64,
}

// =============================================================================
// Shared Query Parameters
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Also return soft-deleted records.
    #[serde(default)]
    pub include_deleted: bool,
}

// =============================================================================
// Author Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Author {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAuthorRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
}

/// Partial author update; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAuthorRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
}

// =============================================================================
// Genre Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Genre {
    pub id: RecordId,
    /// Short unique code, e.g. `FIC`
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGenreRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial genre update; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateGenreRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Book Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    /// Code of the book's genre
    pub genre_code: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    /// Authors linked to this book
    pub author_ids: Vec<RecordId>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub genre_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub author_ids: Vec<RecordId>,
}

/// Partial book update; absent fields keep their value.
///
/// When `author_ids` is present it replaces the book's author links.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub genre_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub author_ids: Option<Vec<RecordId>>,
}
