// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{error::AuthErrorBody, require_bearer},
    error::ErrorBody,
    models::{
        Author, Book, CreateAuthorRequest, CreateBookRequest, CreateGenreRequest, Genre,
        TokenRequest, TokenResponse, UpdateAuthorRequest, UpdateBookRequest, UpdateGenreRequest,
    },
    state::AppState,
};

pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod token;

/// Build the application router.
///
/// `/token`, the health probes and the docs are public. Every `/v1` route
/// sits behind the bearer-token gate.
pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{book_id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route(
            "/books/{book_id}/authors/{author_id}",
            post(books::add_book_author).delete(books::remove_book_author),
        )
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/authors/{author_id}",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route("/authors/{author_id}/books", get(authors::list_author_books))
        .route("/genres", get(genres::list_genres).post(genres::create_genre))
        .route(
            "/genres/{genre_id}",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
        .route("/genres/{genre_id}/books", get(genres::list_genre_books))
        .route("/genres/code/{code}", get(genres::get_genre_by_code))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/token", post(token::issue_token))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        token::issue_token,
        health::health,
        health::liveness,
        health::readiness,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::add_book_author,
        books::remove_book_author,
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        authors::list_author_books,
        genres::list_genres,
        genres::get_genre,
        genres::get_genre_by_code,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        genres::list_genre_books
    ),
    components(
        schemas(
            TokenRequest,
            TokenResponse,
            AuthErrorBody,
            ErrorBody,
            Book,
            Author,
            Genre,
            CreateBookRequest,
            UpdateBookRequest,
            CreateAuthorRequest,
            UpdateAuthorRequest,
            CreateGenreRequest,
            UpdateGenreRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Client-credentials token issuance"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Books", description = "Book catalog"),
        (name = "Authors", description = "Author catalog"),
        (name = "Genres", description = "Genre catalog")
    )
)]
pub struct ApiDoc;
