// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory catalog store.
//!
//! Holds authors, genres and books behind the `RwLock` in `AppState`. Ids are
//! assigned sequentially from 1 per table and never reused. Deletion is soft:
//! the row keeps its id and is hidden from reads unless `include_deleted` is
//! requested.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{
    Author, Book, CreateAuthorRequest, CreateBookRequest, CreateGenreRequest, Genre, RecordId,
    UpdateAuthorRequest, UpdateBookRequest, UpdateGenreRequest,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    authors: BTreeMap<RecordId, Author>,
    genres: BTreeMap<RecordId, Genre>,
    books: BTreeMap<RecordId, Book>,
    last_author_id: RecordId,
    last_genre_id: RecordId,
    last_book_id: RecordId,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Authors
    // =========================================================================

    pub fn list_authors(&self, include_deleted: bool) -> Vec<Author> {
        self.authors
            .values()
            .filter(|author| include_deleted || !author.deleted)
            .cloned()
            .collect()
    }

    pub fn get_author(&self, author_id: RecordId) -> Result<Author, ApiError> {
        self.authors
            .get(&author_id)
            .filter(|author| !author.deleted)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Author not found"))
    }

    pub fn create_author(&mut self, request: CreateAuthorRequest) -> Result<Author, ApiError> {
        let first_name = required("first_name", &request.first_name)?;
        let last_name = required("last_name", &request.last_name)?;

        let id = next_id(&mut self.last_author_id);
        let author = Author {
            id,
            first_name,
            last_name,
            birth_date: request.birth_date,
            nationality: optional(request.nationality),
            deleted: false,
        };
        self.authors.insert(id, author.clone());
        Ok(author)
    }

    pub fn update_author(
        &mut self,
        author_id: RecordId,
        request: UpdateAuthorRequest,
    ) -> Result<Author, ApiError> {
        let author = self
            .authors
            .get_mut(&author_id)
            .ok_or_else(|| ApiError::not_found("Author not found"))?;
        if author.deleted {
            return Err(ApiError::bad_request("Cannot update a deleted author"));
        }

        let first_name = request
            .first_name
            .map(|v| required("first_name", &v))
            .transpose()?;
        let last_name = request
            .last_name
            .map(|v| required("last_name", &v))
            .transpose()?;

        if let Some(first_name) = first_name {
            author.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            author.last_name = last_name;
        }
        if request.birth_date.is_some() {
            author.birth_date = request.birth_date;
        }
        if request.nationality.is_some() {
            author.nationality = optional(request.nationality);
        }
        Ok(author.clone())
    }

    pub fn delete_author(&mut self, author_id: RecordId) -> Result<(), ApiError> {
        let author = self
            .authors
            .get_mut(&author_id)
            .ok_or_else(|| ApiError::not_found("Author not found"))?;
        if author.deleted {
            return Err(ApiError::bad_request("Author is already deleted"));
        }
        author.deleted = true;
        Ok(())
    }

    /// Live books linked to a live author.
    pub fn books_by_author(&self, author_id: RecordId) -> Result<Vec<Book>, ApiError> {
        let author = self
            .authors
            .get(&author_id)
            .ok_or_else(|| ApiError::not_found("Author not found"))?;
        if author.deleted {
            return Err(ApiError::bad_request("Author is deleted"));
        }

        Ok(self
            .books
            .values()
            .filter(|book| !book.deleted && book.author_ids.contains(&author_id))
            .cloned()
            .collect())
    }

    // =========================================================================
    // Genres
    // =========================================================================

    pub fn list_genres(&self, include_deleted: bool) -> Vec<Genre> {
        self.genres
            .values()
            .filter(|genre| include_deleted || !genre.deleted)
            .cloned()
            .collect()
    }

    pub fn get_genre(&self, genre_id: RecordId) -> Result<Genre, ApiError> {
        self.genres
            .get(&genre_id)
            .filter(|genre| !genre.deleted)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Genre not found"))
    }

    pub fn genre_by_code(&self, code: &str) -> Result<Genre, ApiError> {
        let code = code.trim();
        self.genres
            .values()
            .find(|genre| !genre.deleted && genre.code == code)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Genre not found"))
    }

    pub fn create_genre(&mut self, request: CreateGenreRequest) -> Result<Genre, ApiError> {
        let code = required("code", &request.code)?;
        let name = required("name", &request.name)?;
        if self.genres.values().any(|genre| genre.code == code) {
            return Err(ApiError::conflict(format!(
                "Genre code '{code}' is already in use"
            )));
        }

        let id = next_id(&mut self.last_genre_id);
        let genre = Genre {
            id,
            code,
            name,
            description: optional(request.description),
            deleted: false,
        };
        self.genres.insert(id, genre.clone());
        Ok(genre)
    }

    /// Partial update. A code change is carried over to every book filed
    /// under the old code.
    pub fn update_genre(
        &mut self,
        genre_id: RecordId,
        request: UpdateGenreRequest,
    ) -> Result<Genre, ApiError> {
        let current = self
            .genres
            .get(&genre_id)
            .ok_or_else(|| ApiError::not_found("Genre not found"))?;
        if current.deleted {
            return Err(ApiError::bad_request("Cannot update a deleted genre"));
        }

        let code = request.code.map(|v| required("code", &v)).transpose()?;
        let name = request.name.map(|v| required("name", &v)).transpose()?;
        if let Some(code) = &code {
            if self
                .genres
                .values()
                .any(|genre| genre.id != genre_id && &genre.code == code)
            {
                return Err(ApiError::conflict(format!(
                    "Genre code '{code}' is already in use"
                )));
            }
        }

        let old_code = current.code.clone();
        if let Some(new_code) = &code {
            for book in self.books.values_mut() {
                if book.genre_code.as_deref() == Some(old_code.as_str()) {
                    book.genre_code = Some(new_code.clone());
                }
            }
        }

        let genre = self
            .genres
            .get_mut(&genre_id)
            .ok_or_else(|| ApiError::not_found("Genre not found"))?;
        if let Some(code) = code {
            genre.code = code;
        }
        if let Some(name) = name {
            genre.name = name;
        }
        if request.description.is_some() {
            genre.description = optional(request.description);
        }
        Ok(genre.clone())
    }

    pub fn delete_genre(&mut self, genre_id: RecordId) -> Result<(), ApiError> {
        let genre = self
            .genres
            .get(&genre_id)
            .ok_or_else(|| ApiError::not_found("Genre not found"))?;
        if genre.deleted {
            return Err(ApiError::bad_request("Genre is already deleted"));
        }
        let in_use = self
            .books
            .values()
            .any(|book| !book.deleted && book.genre_code.as_deref() == Some(genre.code.as_str()));
        if in_use {
            return Err(ApiError::conflict("Genre is still used by one or more books"));
        }

        if let Some(genre) = self.genres.get_mut(&genre_id) {
            genre.deleted = true;
        }
        Ok(())
    }

    /// Live books filed under a live genre.
    pub fn books_by_genre(&self, genre_id: RecordId) -> Result<Vec<Book>, ApiError> {
        let genre = self
            .genres
            .get(&genre_id)
            .ok_or_else(|| ApiError::not_found("Genre not found"))?;
        if genre.deleted {
            return Err(ApiError::bad_request("Genre is deleted"));
        }

        Ok(self
            .books
            .values()
            .filter(|book| !book.deleted && book.genre_code.as_deref() == Some(genre.code.as_str()))
            .cloned()
            .collect())
    }

    // =========================================================================
    // Books
    // =========================================================================

    pub fn list_books(&self, include_deleted: bool) -> Vec<Book> {
        self.books
            .values()
            .filter(|book| include_deleted || !book.deleted)
            .cloned()
            .collect()
    }

    pub fn get_book(&self, book_id: RecordId) -> Result<Book, ApiError> {
        self.books
            .get(&book_id)
            .filter(|book| !book.deleted)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Book not found"))
    }

    pub fn create_book(&mut self, request: CreateBookRequest) -> Result<Book, ApiError> {
        let title = required("title", &request.title)?;
        let isbn = optional(request.isbn).map(|raw| normalize_isbn(&raw)).transpose()?;
        let genre_code = optional(request.genre_code);
        if let Some(code) = &genre_code {
            self.require_live_genre(code)?;
        }
        check_page_count(request.page_count)?;
        let author_ids = self.live_author_ids(&request.author_ids)?;
        if let Some(isbn) = &isbn {
            self.require_unique_isbn(isbn, None)?;
        }

        let id = next_id(&mut self.last_book_id);
        let book = Book {
            id,
            title,
            isbn,
            published_year: request.published_year,
            genre_code,
            description: optional(request.description),
            page_count: request.page_count,
            author_ids,
            deleted: false,
        };
        self.books.insert(id, book.clone());
        Ok(book)
    }

    pub fn update_book(
        &mut self,
        book_id: RecordId,
        request: UpdateBookRequest,
    ) -> Result<Book, ApiError> {
        self.require_live_book(book_id)?;

        let title = request.title.map(|v| required("title", &v)).transpose()?;
        let isbn = request
            .isbn
            .map(|raw| normalize_isbn(raw.trim()))
            .transpose()?;
        let genre_code = request.genre_code.map(|v| v.trim().to_string());
        if let Some(code) = &genre_code {
            if code.is_empty() {
                return Err(ApiError::bad_request("genre_code must not be empty"));
            }
            self.require_live_genre(code)?;
        }
        check_page_count(request.page_count)?;
        let author_ids = request
            .author_ids
            .map(|ids| self.live_author_ids(&ids))
            .transpose()?;
        if let Some(isbn) = &isbn {
            self.require_unique_isbn(isbn, Some(book_id))?;
        }

        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| ApiError::not_found("Book not found"))?;
        if let Some(title) = title {
            book.title = title;
        }
        if isbn.is_some() {
            book.isbn = isbn;
        }
        if request.published_year.is_some() {
            book.published_year = request.published_year;
        }
        if genre_code.is_some() {
            book.genre_code = genre_code;
        }
        if request.description.is_some() {
            book.description = optional(request.description);
        }
        if request.page_count.is_some() {
            book.page_count = request.page_count;
        }
        if let Some(author_ids) = author_ids {
            book.author_ids = author_ids;
        }
        Ok(book.clone())
    }

    pub fn delete_book(&mut self, book_id: RecordId) -> Result<(), ApiError> {
        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| ApiError::not_found("Book not found"))?;
        if book.deleted {
            return Err(ApiError::bad_request("Book is already deleted"));
        }
        book.deleted = true;
        Ok(())
    }

    pub fn add_book_author(
        &mut self,
        book_id: RecordId,
        author_id: RecordId,
    ) -> Result<Book, ApiError> {
        self.require_live_book(book_id)?;
        self.require_live_author(author_id)?;

        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| ApiError::not_found("Book not found"))?;
        if book.author_ids.contains(&author_id) {
            return Err(ApiError::conflict("Author is already linked to this book"));
        }
        book.author_ids.push(author_id);
        Ok(book.clone())
    }

    pub fn remove_book_author(
        &mut self,
        book_id: RecordId,
        author_id: RecordId,
    ) -> Result<Book, ApiError> {
        self.require_live_book(book_id)?;

        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| ApiError::not_found("Book not found"))?;
        let before = book.author_ids.len();
        book.author_ids.retain(|id| *id != author_id);
        if book.author_ids.len() == before {
            return Err(ApiError::not_found("Author is not linked to this book"));
        }
        Ok(book.clone())
    }

    // =========================================================================
    // Referential checks
    // =========================================================================

    fn require_live_book(&self, book_id: RecordId) -> Result<(), ApiError> {
        match self.books.get(&book_id) {
            None => Err(ApiError::not_found("Book not found")),
            Some(book) if book.deleted => Err(ApiError::bad_request("Book is deleted")),
            Some(_) => Ok(()),
        }
    }

    fn require_live_author(&self, author_id: RecordId) -> Result<(), ApiError> {
        match self.authors.get(&author_id) {
            None => Err(ApiError::not_found(format!("Author {author_id} not found"))),
            Some(author) if author.deleted => Err(ApiError::bad_request(format!(
                "Author {author_id} is deleted"
            ))),
            Some(_) => Ok(()),
        }
    }

    fn require_live_genre(&self, code: &str) -> Result<(), ApiError> {
        match self.genres.values().find(|genre| genre.code == code) {
            Some(genre) if !genre.deleted => Ok(()),
            Some(_) => Err(ApiError::bad_request(format!("Genre '{code}' is deleted"))),
            None => Err(ApiError::bad_request(format!("Genre '{code}' does not exist"))),
        }
    }

    fn require_unique_isbn(&self, isbn: &str, except: Option<RecordId>) -> Result<(), ApiError> {
        let taken = self
            .books
            .values()
            .any(|book| Some(book.id) != except && book.isbn.as_deref() == Some(isbn));
        if taken {
            Err(ApiError::conflict(format!("ISBN {isbn} is already registered")))
        } else {
            Ok(())
        }
    }

    /// Deduplicate `ids` keeping first occurrence; every id must be a live
    /// author. Unknown ids are a validation error here, not a 404.
    fn live_author_ids(&self, ids: &[RecordId]) -> Result<Vec<RecordId>, ApiError> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            match self.authors.get(id) {
                Some(author) if !author.deleted => {
                    if !out.contains(id) {
                        out.push(*id);
                    }
                }
                Some(_) => {
                    return Err(ApiError::bad_request(format!("Author {id} is deleted")));
                }
                None => {
                    return Err(ApiError::bad_request(format!("Author {id} does not exist")));
                }
            }
        }
        Ok(out)
    }
}

fn next_id(last: &mut RecordId) -> RecordId {
    *last += 1;
    *last
}

fn required(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ApiError::bad_request(format!("{field} is required")))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_page_count(page_count: Option<u32>) -> Result<(), ApiError> {
    if page_count == Some(0) {
        Err(ApiError::bad_request("page_count must be greater than zero"))
    } else {
        Ok(())
    }
}

/// Strip `-` and spaces; the rest must be 10 or 13 ASCII digits.
fn normalize_isbn(raw: &str) -> Result<String, ApiError> {
    let digits: String = raw.chars().filter(|c| *c != '-' && *c != ' ').collect();
    let valid = matches!(digits.len(), 10 | 13) && digits.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(digits)
    } else {
        Err(ApiError::bad_request(format!("Invalid ISBN '{raw}'")))
    }
}
