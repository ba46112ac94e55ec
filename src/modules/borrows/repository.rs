use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use lendr_db::{Collection, DocumentId};

use super::models::{BookRef, Borrow, BorrowSummary};
use crate::modules::books::models::Book;

#[async_trait]
pub trait BorrowRepository: Send + Sync {
    async fn create(&self, borrow: Borrow) -> anyhow::Result<Borrow>;

    /// Total borrowed quantity per book, joined with the book's title and ISBN.
    ///
    /// Groups come out in the order their book was first referenced. Groups
    /// whose book no longer exists are dropped.
    async fn summarize_by_book(&self) -> anyhow::Result<Vec<BorrowSummary>>;
}

pub struct MemoryBorrowRepository {
    borrows: Collection<Borrow>,
    books: Collection<Book>,
}

impl MemoryBorrowRepository {
    pub fn new(borrows: Collection<Borrow>, books: Collection<Book>) -> Self {
        Self { borrows, books }
    }
}

#[async_trait]
impl BorrowRepository for MemoryBorrowRepository {
    async fn create(&self, borrow: Borrow) -> anyhow::Result<Borrow> {
        self.borrows
            .insert(borrow)
            .await
            .context("failed to insert borrow")
    }

    async fn summarize_by_book(&self) -> anyhow::Result<Vec<BorrowSummary>> {
        let groups = group_quantities(&self.borrows.all().await);

        let mut summary = Vec::with_capacity(groups.len());
        for (book_id, total_quantity) in groups {
            // lookup + unwind: a dangling reference yields no row
            let Some(book) = self.books.find_by_id(&book_id).await else {
                tracing::debug!(book = %book_id, "dropping summary group for missing book");
                continue;
            };
            summary.push(BorrowSummary {
                book: BookRef {
                    title: book.title,
                    isbn: book.isbn,
                },
                total_quantity,
            });
        }
        Ok(summary)
    }
}

/// Sum quantities per referenced book, in first-seen order.
fn group_quantities(borrows: &[Borrow]) -> Vec<(DocumentId, u64)> {
    let mut order: Vec<(DocumentId, u64)> = Vec::new();
    let mut index: HashMap<&DocumentId, usize> = HashMap::new();

    for borrow in borrows {
        match index.get(&borrow.book).copied() {
            Some(slot) => order[slot].1 += u64::from(borrow.quantity),
            None => {
                index.insert(&borrow.book, order.len());
                order.push((borrow.book.clone(), u64::from(borrow.quantity)));
            }
        }
    }
    order
}
