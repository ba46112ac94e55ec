//! Borrow creation and the borrowed-quantity summary.

use std::sync::Arc;

use lendr_http::{paginate, AppError, AppResult, PageMeta, Pagination};
use lendr_kernel::settings::StockCheck;
use time::OffsetDateTime;

use super::models::{Borrow, BorrowSummary, CreateBorrow};
use super::repository::BorrowRepository;
use crate::modules::books::models::Book;
use crate::modules::books::repository::{BookRepository, Reservation};
use crate::modules::books::BOOK_NOT_FOUND;

pub const NOT_ENOUGH_COPIES: &str = "Not enough copies available";
pub const BORROW_FAILED: &str = "Failed to borrow book";
pub const SUMMARY_FAILED: &str = "Failed to retrieve summary";

pub struct BorrowService {
    books: Arc<dyn BookRepository>,
    borrows: Arc<dyn BorrowRepository>,
    stock_check: StockCheck,
}

impl BorrowService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        borrows: Arc<dyn BorrowRepository>,
        stock_check: StockCheck,
    ) -> Self {
        Self {
            books,
            borrows,
            stock_check,
        }
    }

    pub fn stock_check(&self) -> StockCheck {
        self.stock_check
    }

    /// Take copies of the requested book off the shelf and record the borrow.
    pub async fn borrow(&self, request: CreateBorrow) -> AppResult<Borrow> {
        if request.quantity == 0 {
            return Err(AppError::bad_request("quantity must be a positive integer"));
        }

        let book = match self.stock_check {
            StockCheck::Strict => self.reserve(&request).await?,
            StockCheck::Legacy => self.take_then_check(&request).await?,
        };

        let borrow = self
            .borrows
            .create(Borrow::new(request, OffsetDateTime::now_utc()))
            .await
            .map_err(|err| AppError::internal(BORROW_FAILED, err))?;

        tracing::info!(
            borrow = %borrow.id,
            book = %book.id,
            quantity = borrow.quantity,
            remaining = book.available_copies,
            "book borrowed"
        );
        Ok(borrow)
    }

    async fn reserve(&self, request: &CreateBorrow) -> AppResult<Book> {
        let reservation = self
            .books
            .reserve_copies(&request.book, request.quantity)
            .await
            .map_err(|err| AppError::internal(BORROW_FAILED, err))?;

        match reservation {
            Reservation::Reserved(book) => Ok(book),
            Reservation::Missing => Err(AppError::not_found(BOOK_NOT_FOUND)),
            Reservation::Insufficient { available } => {
                tracing::warn!(
                    book = %request.book,
                    requested = request.quantity,
                    available,
                    "borrow rejected: not enough copies"
                );
                Err(AppError::bad_request(NOT_ENOUGH_COPIES))
            }
        }
    }

    /// Decrement first, compare afterwards. A failed comparison keeps the
    /// decrement.
    async fn take_then_check(&self, request: &CreateBorrow) -> AppResult<Book> {
        let book = self
            .books
            .take_copies(&request.book, request.quantity)
            .await
            .map_err(|err| AppError::internal(BORROW_FAILED, err))?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

        if book.available_copies < i64::from(request.quantity) {
            tracing::warn!(
                book = %book.id,
                requested = request.quantity,
                remaining = book.available_copies,
                "borrow rejected after stock was decremented"
            );
            return Err(AppError::bad_request(NOT_ENOUGH_COPIES));
        }
        Ok(book)
    }

    /// One page of the per-book borrowed totals.
    pub async fn summary(
        &self,
        pagination: Pagination,
    ) -> AppResult<(Vec<BorrowSummary>, PageMeta)> {
        let groups = self
            .borrows
            .summarize_by_book()
            .await
            .map_err(|err| AppError::internal(SUMMARY_FAILED, err))?;
        Ok(paginate(groups, pagination))
    }
}
