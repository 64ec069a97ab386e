// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client-credentials token endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::{
    auth::AuthError,
    error::ApiError,
    models::{TokenRequest, TokenResponse},
    state::AppState,
};

/// Issue an access token.
///
/// The body must be a JSON object. Missing or non-string credential fields
/// are rejected as invalid credentials.
#[utoipa::path(
    post,
    path = "/token",
    request_body = TokenRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Body missing or not a JSON object", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid client credentials", body = crate::auth::error::AuthErrorBody),
        (status = 500, description = "Token could not be signed", body = crate::auth::error::AuthErrorBody)
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TokenResponse>, Response> {
    let body = match payload {
        Ok(Json(body @ Value::Object(_))) => body,
        Ok(Json(_)) => {
            return Err(ApiError::bad_request("Request body must be a JSON object").into_response())
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable token request body");
            return Err(ApiError::bad_request("No data provided").into_response());
        }
    };

    let request: TokenRequest =
        serde_json::from_value(body).map_err(|_| AuthError::InvalidClient.into_response())?;
    let (Some(client_id), Some(client_secret)) = (request.client_id, request.client_secret) else {
        return Err(AuthError::InvalidClient.into_response());
    };

    let issued = state
        .auth
        .grant(&client_id, &client_secret)
        .map_err(IntoResponse::into_response)?;

    Ok(Json(TokenResponse {
        access_token: issued.access_token,
        token_type: issued.token_type.to_string(),
        expires_in: issued.expires_in,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode},
    };
    use serde_json::json;

    use crate::state::test_support::{test_state, TEST_CLIENT_ID, TEST_CLIENT_SECRET};

    async fn error_code(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"].clone()
    }

    #[tokio::test]
    async fn valid_credentials_yield_bearer_token() {
        let (state, _clock) = test_state();
        let Json(token) = issue_token(
            State(state.clone()),
            Ok(Json(json!({
                "client_id": TEST_CLIENT_ID,
                "client_secret": TEST_CLIENT_SECRET
            }))),
        )
        .await
        .unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 3600);
        assert!(!token.access_token.is_empty());

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.access_token)).unwrap(),
        );
        let claims = state.auth.authorize(&headers).unwrap();
        assert_eq!(claims.sub, TEST_CLIENT_ID);
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid_client() {
        let (state, _clock) = test_state();
        let response = issue_token(
            State(state),
            Ok(Json(json!({ "client_id": TEST_CLIENT_ID, "client_secret": "nope" }))),
        )
        .await
        .unwrap_err();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "cliente_invalido");
    }

    #[tokio::test]
    async fn missing_or_mistyped_fields_are_invalid_client() {
        for body in [
            json!({}),
            json!({ "client_id": TEST_CLIENT_ID }),
            json!({ "client_secret": TEST_CLIENT_SECRET }),
            json!({ "client_id": 7, "client_secret": TEST_CLIENT_SECRET }),
        ] {
            let (state, _clock) = test_state();
            let response = issue_token(State(state), Ok(Json(body.clone())))
                .await
                .unwrap_err();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{body}");
            assert_eq!(error_code(response).await, "cliente_invalido");
        }
    }

    #[tokio::test]
    async fn non_object_body_is_bad_request() {
        for body in [json!([]), json!("acme"), json!(null), json!(42)] {
            let (state, _clock) = test_state();
            let response = issue_token(State(state), Ok(Json(body.clone())))
                .await
                .unwrap_err();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        }
    }
}
