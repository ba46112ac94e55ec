use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use lendr_http::{ApiResponse, AppResult, PageQuery, Pagination};

use super::models::{Borrow, BorrowSummary, CreateBorrow};
use super::service::BorrowService;

pub fn router(service: Arc<BorrowService>) -> Router {
    Router::new()
        .route("/", post(create_borrow).get(borrow_summary))
        .with_state(service)
}

async fn create_borrow(
    State(service): State<Arc<BorrowService>>,
    payload: Result<Json<CreateBorrow>, JsonRejection>,
) -> AppResult<ApiResponse<Borrow>> {
    let Json(request) = payload?;
    let borrow = service.borrow(request).await?;
    Ok(ApiResponse::ok("Borrowed Books Successfully", borrow))
}

async fn borrow_summary(
    State(service): State<Arc<BorrowService>>,
    query: PageQuery,
) -> AppResult<ApiResponse<Vec<BorrowSummary>>> {
    let (page, meta) = service.summary(Pagination::from(&query)).await?;
    Ok(
        ApiResponse::ok("Borrowed books summary retrieved successfully", page)
            .with_meta(meta),
    )
}
