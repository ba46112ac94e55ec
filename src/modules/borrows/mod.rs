pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use lendr_kernel::{InitCtx, Module};

use service::BorrowService;

/// Borrow transactions and the borrowed-quantity summary
pub struct BorrowModule {
    service: Arc<BorrowService>,
}

impl BorrowModule {
    pub fn new(service: BorrowService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[async_trait]
impl Module for BorrowModule {
    fn name(&self) -> &'static str {
        "borrow"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            stock_check = ?self.service.stock_check(),
            "borrow module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.service))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = serde_json::json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        });

        Some(serde_json::json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Borrow copies of a book",
                        "tags": ["Borrow"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBorrow" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Borrow recorded",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Borrow" }
                                    }
                                }
                            },
                            "400": { "description": "Not enough copies available", "content": error.clone() },
                            "404": { "description": "Book not found", "content": error.clone() },
                            "500": { "description": "Failed to borrow book", "content": error.clone() }
                        }
                    },
                    "get": {
                        "summary": "Borrowed quantity per book",
                        "tags": ["Borrow"],
                        "parameters": [
                            { "name": "page", "in": "query", "schema": { "type": "integer", "default": 1 } },
                            { "name": "limit", "in": "query", "schema": { "type": "integer", "default": 5 } }
                        ],
                        "responses": {
                            "200": {
                                "description": "One page of the summary",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/BorrowSummary" }
                                        }
                                    }
                                }
                            },
                            "500": { "description": "Failed to retrieve summary", "content": error }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "CreateBorrow": {
                        "type": "object",
                        "properties": {
                            "book": { "type": "string" },
                            "quantity": { "type": "integer", "minimum": 1 },
                            "dueDate": { "type": "string", "format": "date-time" }
                        },
                        "required": ["book", "quantity", "dueDate"]
                    },
                    "Borrow": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "book": { "type": "string" },
                            "quantity": { "type": "integer" },
                            "dueDate": { "type": "string", "format": "date-time" },
                            "createdAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "book", "quantity", "dueDate"]
                    },
                    "BorrowSummary": {
                        "type": "object",
                        "properties": {
                            "book": {
                                "type": "object",
                                "properties": {
                                    "title": { "type": "string" },
                                    "isbn": { "type": "string" }
                                }
                            },
                            "totalQuantity": { "type": "integer" }
                        },
                        "required": ["book", "totalQuantity"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "borrow module stopped");
        Ok(())
    }
}

/// Create a new instance of the borrow module
pub fn create_module(service: BorrowService) -> Arc<dyn Module> {
    Arc::new(BorrowModule::new(service))
}
