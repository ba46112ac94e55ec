pub mod models;
pub mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use lendr_db::{load_seed, DocumentId};
use lendr_http::{ApiResponse, AppError, AppResult};
use lendr_kernel::{InitCtx, Module};
use time::OffsetDateTime;

use models::{Book, CreateBook};
use repository::BookRepository;

pub const BOOK_NOT_FOUND: &str = "book not found";

/// Catalogue module: the books that borrows point at
pub struct BooksModule {
    books: Arc<dyn BookRepository>,
}

impl BooksModule {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let Some(seed_file) = ctx.settings.database.seed_file.as_deref() else {
            tracing::info!(module = self.name(), "books module initialized without seed data");
            return Ok(());
        };

        let seed: Vec<CreateBook> = load_seed(seed_file)?;
        let now = OffsetDateTime::now_utc();
        let mut inserted = 0usize;
        for entry in seed {
            if let Err(err) = entry.validate() {
                tracing::warn!(module = self.name(), title = %entry.title, error = %err, "skipping invalid seed book");
                continue;
            }
            self.books.create(entry.into_book(now)).await?;
            inserted += 1;
        }

        tracing::info!(
            module = self.name(),
            seed = %seed_file.display(),
            inserted,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books).post(create_book))
            .route("/{id}", get(get_book))
            .with_state(Arc::clone(&self.books))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Every book in insertion order" }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": { "description": "Book created" },
                            "400": {
                                "description": "Invalid book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Fetch a book",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": { "description": "The book" },
                            "404": {
                                "description": "No such book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "isbn": { "type": "string" },
                            "copies": { "type": "integer", "minimum": 0 },
                            "availableCopies": { "type": "integer" },
                            "available": { "type": "boolean" },
                            "createdAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "title", "author", "isbn", "copies", "availableCopies", "available"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "isbn": { "type": "string" },
                            "copies": { "type": "integer", "minimum": 0 },
                            "availableCopies": { "type": "integer", "minimum": 0 }
                        },
                        "required": ["title", "author", "isbn", "copies"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

async fn list_books(State(books): State<Arc<dyn BookRepository>>) -> AppResult<ApiResponse<Vec<Book>>> {
    let all = books
        .list()
        .await
        .map_err(|err| AppError::internal("Failed to retrieve books", err))?;
    Ok(ApiResponse::ok("Books retrieved successfully", all))
}

async fn get_book(
    State(books): State<Arc<dyn BookRepository>>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Book>> {
    let book = books
        .find_by_id(&DocumentId::from(id))
        .await
        .map_err(|err| AppError::internal("Failed to retrieve book", err))?
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;
    Ok(ApiResponse::ok("Book retrieved successfully", book))
}

async fn create_book(
    State(books): State<Arc<dyn BookRepository>>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<ApiResponse<Book>> {
    let Json(request) = payload?;
    request.validate()?;

    let book = books
        .create(request.into_book(OffsetDateTime::now_utc()))
        .await
        .map_err(|err| AppError::internal("Failed to create book", err))?;
    tracing::info!(book = %book.id, copies = book.copies, "book created");
    Ok(ApiResponse::created("Book created successfully", book))
}

/// Create a new instance of the books module
pub fn create_module(books: Arc<dyn BookRepository>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(books))
}
