// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token authorization gate for Axum.
//!
//! Every protected route is wrapped with [`require_bearer`]:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/books", get(books::list_books))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.auth.clone(),
//!         require_bearer,
//!     ));
//! ```
//!
//! Per request: header present → token extracted → token verified → wrapped
//! handler invoked. Any failed step returns the rejection immediately and the
//! wrapped handler never runs.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthService};

/// Authentication scheme accepted in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The header must hold exactly two whitespace-separated parts. The scheme is
/// matched case-insensitively; the token is returned as-is. Anything else is
/// [`AuthError::MissingToken`].
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            Ok(token)
        }
        _ => Err(AuthError::MissingToken),
    }
}

/// Authorization gate middleware.
///
/// The request reaches `next` untouched; claims are not forwarded.
pub async fn require_bearer(
    State(auth): State<Arc<AuthService>>,
    request: Request,
    next: Next,
) -> Response {
    match auth.authorize(request.headers()) {
        Ok(claims) => {
            tracing::debug!(client_id = %claims.sub, jti = %claims.jti, "Bearer token accepted");
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                reason = e.error_code(),
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected unauthorized request"
            );
            e.into_response()
        }
    }
}
