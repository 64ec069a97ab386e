// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Rejection reasons produced by credential validation, token issuance,
/// token verification and the authorization gate.
///
/// Every request-facing variant terminates the request where it is detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Client id / secret pair does not match a registered client
    #[error("Invalid client credentials")]
    InvalidClient,
    /// No extractable bearer token on a protected request
    #[error("Authorization header with a bearer token is required (expected 'Bearer <token>')")]
    MissingToken,
    /// Signature mismatch or malformed token
    #[error("Token is invalid")]
    InvalidToken,
    /// Signature is valid but the token is past its expiration instant
    #[error("Token has expired")]
    ExpiredToken,
    /// The signing secret could not be used to sign a token
    #[error("Token signing is unavailable: {0}")]
    SigningUnavailable(String),
}

/// JSON body returned for every authentication failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthErrorBody {
    /// Machine-readable reason code
    pub error: String,
    /// Human-readable explanation
    pub error_description: String,
}

impl AuthError {
    /// Get the wire code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidClient => "cliente_invalido",
            AuthError::MissingToken => "token_faltante",
            AuthError::InvalidToken => "token_invalido",
            AuthError::ExpiredToken => "token_expirado",
            AuthError::SigningUnavailable(_) => "error_interno",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidClient
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::SigningUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal details stay in the logs.
        let error_description = match &self {
            AuthError::SigningUnavailable(_) => "Token could not be issued".to_string(),
            other => other.to_string(),
        };
        let body = Json(AuthErrorBody {
            error: self.error_code().to_string(),
            error_description,
        });
        (status, body).into_response()
    }
}
