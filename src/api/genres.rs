// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{ApiError, ApiJson},
    models::{Book, CreateGenreRequest, Genre, ListQuery, RecordId, UpdateGenreRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/genres",
    params(ListQuery),
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 200, body = [Genre]))
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Genre>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_genres(params.include_deleted)))
}

#[utoipa::path(
    get,
    path = "/v1/genres/{genre_id}",
    params(("genre_id" = i64, Path, description = "Genre identifier")),
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 200, body = Genre), (status = 404))
)]
pub async fn get_genre(
    Path(genre_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<Json<Genre>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_genre(genre_id)?))
}

#[utoipa::path(
    get,
    path = "/v1/genres/code/{code}",
    params(("code" = String, Path, description = "Genre code")),
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 200, body = Genre), (status = 404))
)]
pub async fn get_genre_by_code(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Genre>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.genre_by_code(&code)?))
}

#[utoipa::path(
    post,
    path = "/v1/genres",
    request_body = CreateGenreRequest,
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 201, body = Genre), (status = 400), (status = 409))
)]
pub async fn create_genre(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateGenreRequest>,
) -> Result<(StatusCode, Json<Genre>), ApiError> {
    let mut store = state.store.write().await;
    let genre = store.create_genre(request)?;
    tracing::info!(genre_id = genre.id, code = %genre.code, "Genre created");
    Ok((StatusCode::CREATED, Json(genre)))
}

#[utoipa::path(
    put,
    path = "/v1/genres/{genre_id}",
    params(("genre_id" = i64, Path, description = "Genre identifier")),
    request_body = UpdateGenreRequest,
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 200, body = Genre), (status = 400), (status = 404), (status = 409))
)]
pub async fn update_genre(
    Path(genre_id): Path<RecordId>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateGenreRequest>,
) -> Result<Json<Genre>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_genre(genre_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/genres/{genre_id}",
    params(("genre_id" = i64, Path, description = "Genre identifier")),
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 204), (status = 400), (status = 404), (status = 409))
)]
pub async fn delete_genre(
    Path(genre_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_genre(genre_id)?;
    tracing::info!(genre_id, "Genre soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/genres/{genre_id}/books",
    params(("genre_id" = i64, Path, description = "Genre identifier")),
    tag = "Genres",
    security(("bearer" = [])),
    responses((status = 200, body = [Book]), (status = 400), (status = 404))
)]
pub async fn list_genre_books(
    Path(genre_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.books_by_genre(genre_id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    fn request(code: &str, name: &str) -> CreateGenreRequest {
        CreateGenreRequest {
            code: code.into(),
            name: name.into(),
            description: Some("Stories".into()),
        }
    }

    #[tokio::test]
    async fn create_and_lookup_by_code() {
        let (state, _clock) = test_state();
        let (status, Json(genre)) = create_genre(State(state.clone()), ApiJson(request("FIC", "Fiction")))
            .await
            .expect("genre creation succeeds");
        assert_eq!(status, StatusCode::CREATED);

        let Json(found) = get_genre_by_code(Path("FIC".to_string()), State(state))
            .await
            .unwrap();
        assert_eq!(found, genre);
    }

    #[tokio::test]
    async fn duplicate_code_conflicts() {
        let (state, _clock) = test_state();
        create_genre(State(state.clone()), ApiJson(request("FIC", "Fiction")))
            .await
            .unwrap();
        let err = create_genre(State(state), ApiJson(request("FIC", "Fiction II")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn deleted_genre_books_listing_is_bad_request() {
        let (state, _clock) = test_state();
        let (_, Json(genre)) = create_genre(State(state.clone()), ApiJson(request("POE", "Poetry")))
            .await
            .unwrap();
        assert_eq!(
            delete_genre(Path(genre.id), State(state.clone())).await.unwrap(),
            StatusCode::NO_CONTENT
        );

        let err = list_genre_books(Path(genre.id), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = get_genre(Path(genre.id), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
