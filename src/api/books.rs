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
    models::{Book, CreateBookRequest, ListQuery, RecordId, UpdateBookRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/books",
    params(ListQuery),
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 200, body = [Book]))
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_books(params.include_deleted)))
}

#[utoipa::path(
    get,
    path = "/v1/books/{book_id}",
    params(("book_id" = i64, Path, description = "Book identifier")),
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 200, body = Book), (status = 404))
)]
pub async fn get_book(
    Path(book_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_book(book_id)?))
}

#[utoipa::path(
    post,
    path = "/v1/books",
    request_body = CreateBookRequest,
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 201, body = Book), (status = 400), (status = 409))
)]
pub async fn create_book(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut store = state.store.write().await;
    let book = store.create_book(request)?;
    tracing::info!(book_id = book.id, "Book created");
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/v1/books/{book_id}",
    params(("book_id" = i64, Path, description = "Book identifier")),
    request_body = UpdateBookRequest,
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 200, body = Book), (status = 400), (status = 404), (status = 409))
)]
pub async fn update_book(
    Path(book_id): Path<RecordId>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_book(book_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/books/{book_id}",
    params(("book_id" = i64, Path, description = "Book identifier")),
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 204), (status = 400), (status = 404))
)]
pub async fn delete_book(
    Path(book_id): Path<RecordId>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_book(book_id)?;
    tracing::info!(book_id, "Book soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/books/{book_id}/authors/{author_id}",
    params(
        ("book_id" = i64, Path, description = "Book identifier"),
        ("author_id" = i64, Path, description = "Author to link")
    ),
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 200, body = Book), (status = 400), (status = 404), (status = 409))
)]
pub async fn add_book_author(
    Path((book_id, author_id)): Path<(RecordId, RecordId)>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.add_book_author(book_id, author_id)?))
}

#[utoipa::path(
    delete,
    path = "/v1/books/{book_id}/authors/{author_id}",
    params(
        ("book_id" = i64, Path, description = "Book identifier"),
        ("author_id" = i64, Path, description = "Author to unlink")
    ),
    tag = "Books",
    security(("bearer" = [])),
    responses((status = 200, body = Book), (status = 400), (status = 404))
)]
pub async fn remove_book_author(
    Path((book_id, author_id)): Path<(RecordId, RecordId)>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.remove_book_author(book_id, author_id)?))
}
