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
    models::{Author, Book, CreateAuthorRequest, ListQuery, RecordId, UpdateAuthorRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/authors",
    params(ListQuery),
    tag = "Authors",
    security(("bearer" = [])),
    responses((status = 200, body = [Author]))
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_authors(params.include_deleted)))
}

#[utoipa::path(
    get,
    path = "/v1/authors/{author_id}",
    params(("author_id" = i64, Path, description = "Author identifier")),
    tag = "Authors",
    security(("bearer" = [])),
    responses((status = 200, body = Author), (status = 404))
)]
pub async fn get_author(
    Path(author_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<Json<Author>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_author(author_id)?))
}

#[utoipa::path(
    post,
    path = "/v1/authors",
    request_body = CreateAuthorRequest,
    tag = "Authors",
    security(("bearer" = [])),
    responses((status = 201, body = Author), (status = 400))
)]
pub async fn create_author(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let mut store = state.store.write().await;
    let author = store.create_author(request)?;
    tracing::info!(author_id = author.id, "Author created");
    Ok((StatusCode::CREATED, Json(author)))
}

#[utoipa::path(
    put,
    path = "/v1/authors/{author_id}",
    params(("author_id" = i64, Path, description = "Author identifier")),
    request_body = UpdateAuthorRequest,
    tag = "Authors",
    security(("bearer" = [])),
    responses((status = 200, body = Author), (status = 400), (status = 404))
)]
pub async fn update_author(
    Path(author_id): Path<RecordId>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateAuthorRequest>,
) -> Result<Json<Author>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_author(author_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/authors/{author_id}",
    params(("author_id" = i64, Path, description = "Author identifier")),
    tag = "Authors",
    security(("bearer" = [])),
    responses((status = 204), (status = 400), (status = 404))
)]
pub async fn delete_author(
    Path(author_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_author(author_id)?;
    tracing::info!(author_id, "Author soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/authors/{author_id}/books",
    params(("author_id" = i64, Path, description = "Author identifier")),
    tag = "Authors",
    security(("bearer" = [])),
    responses((status = 200, body = [Book]), (status = 400), (status = 404))
)]
pub async fn list_author_books(
    Path(author_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.books_by_author(author_id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    fn request(first: &str, last: &str) -> CreateAuthorRequest {
        CreateAuthorRequest {
            first_name: first.into(),
            last_name: last.into(),
            birth_date: None,
            nationality: None,
        }
    }

    #[tokio::test]
    async fn create_author_success() {
        let (state, _clock) = test_state();
        let (status, Json(author)) =
            create_author(State(state.clone()), ApiJson(request("Jorge Luis", "Borges")))
                .await
                .expect("author creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(author.first_name, "Jorge Luis");
        assert!(!author.deleted);

        let Json(fetched) = get_author(Path(author.id), State(state)).await.unwrap();
        assert_eq!(fetched, author);
    }

    #[tokio::test]
    async fn create_author_without_last_name_is_rejected() {
        let (state, _clock) = test_state();
        let err = create_author(State(state), ApiJson(request("Homer", " ")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_author_hides_it_from_default_listing() {
        let (state, _clock) = test_state();
        let (_, Json(author)) = create_author(State(state.clone()), ApiJson(request("Ada", "Lovelace")))
            .await
            .unwrap();

        let status = delete_author(Path(author.id), State(state.clone()))
            .await
            .expect("author deletion succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(live) = list_authors(State(state.clone()), Query(ListQuery::default()))
            .await
            .unwrap();
        assert!(live.is_empty());

        let Json(all) = list_authors(
            State(state),
            Query(ListQuery {
                include_deleted: true,
            }),
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].deleted);
    }

    #[tokio::test]
    async fn missing_author_is_not_found() {
        let (state, _clock) = test_state();
        let err = get_author(Path(404), State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = list_author_books(Path(404), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
