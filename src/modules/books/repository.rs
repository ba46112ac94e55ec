use anyhow::Context;
use async_trait::async_trait;
use lendr_db::{Collection, DocumentId};
use time::OffsetDateTime;

use super::models::Book;

/// Result of an atomic check-and-take on a book's stock.
#[derive(Debug, Clone, PartialEq)]
pub enum Reservation {
    Reserved(Book),
    Insufficient { available: i64 },
    Missing,
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: &DocumentId) -> anyhow::Result<Option<Book>>;

    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    async fn create(&self, book: Book) -> anyhow::Result<Book>;

    /// Take `quantity` copies only if that many are on the shelf, in a single
    /// read-modify-write. Nothing is written when the check fails.
    async fn reserve_copies(&self, id: &DocumentId, quantity: u32)
        -> anyhow::Result<Reservation>;

    /// Take `quantity` copies unconditionally and return the updated book.
    async fn take_copies(&self, id: &DocumentId, quantity: u32) -> anyhow::Result<Option<Book>>;
}

pub struct MemoryBookRepository {
    books: Collection<Book>,
}

impl MemoryBookRepository {
    pub fn new(books: Collection<Book>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_by_id(&self, id: &DocumentId) -> anyhow::Result<Option<Book>> {
        Ok(self.books.find_by_id(id).await)
    }

    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        Ok(self.books.all().await)
    }

    async fn create(&self, book: Book) -> anyhow::Result<Book> {
        self.books.insert(book).await.context("failed to insert book")
    }

    async fn reserve_copies(
        &self,
        id: &DocumentId,
        quantity: u32,
    ) -> anyhow::Result<Reservation> {
        let now = OffsetDateTime::now_utc();
        let outcome = self
            .books
            .update(id, |book| {
                if book.available_copies < i64::from(quantity) {
                    return Err(book.available_copies);
                }
                book.take_copies(quantity, now);
                Ok(book.clone())
            })
            .await;

        Ok(match outcome {
            None => Reservation::Missing,
            Some(Ok(book)) => Reservation::Reserved(book),
            Some(Err(available)) => Reservation::Insufficient { available },
        })
    }

    async fn take_copies(&self, id: &DocumentId, quantity: u32) -> anyhow::Result<Option<Book>> {
        let Some(mut book) = self.books.find_by_id(id).await else {
            return Ok(None);
        };
        book.take_copies(quantity, OffsetDateTime::now_utc());
        let book = self
            .books
            .replace(book)
            .await
            .context("failed to update book stock")?;
        Ok(Some(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::CreateBook;

    async fn repo_with(copies: u32) -> (MemoryBookRepository, DocumentId) {
        let repo = MemoryBookRepository::new(Collection::new("books"));
        let book = CreateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            copies,
            available_copies: None,
        }
        .into_book(OffsetDateTime::now_utc());
        let id = book.id.clone();
        repo.create(book).await.unwrap();
        (repo, id)
    }

    #[tokio::test]
    async fn reserve_decrements_when_stock_suffices() {
        let (repo, id) = repo_with(5).await;

        let outcome = repo.reserve_copies(&id, 3).await.unwrap();
        let Reservation::Reserved(book) = outcome else {
            panic!("expected reservation, got {outcome:?}");
        };
        assert_eq!(book.available_copies, 2);
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().available_copies, 2);
    }

    #[tokio::test]
    async fn reserve_leaves_stock_alone_when_short() {
        let (repo, id) = repo_with(2).await;

        let outcome = repo.reserve_copies(&id, 3).await.unwrap();
        assert_eq!(outcome, Reservation::Insufficient { available: 2 });
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.available_copies, 2);
        assert!(stored.available);
    }

    #[tokio::test]
    async fn reserve_reports_missing_books() {
        let (repo, _) = repo_with(1).await;
        let outcome = repo
            .reserve_copies(&DocumentId::from("missing"), 1)
            .await
            .unwrap();
        assert_eq!(outcome, Reservation::Missing);
    }

    #[tokio::test]
    async fn take_copies_can_go_negative() {
        let (repo, id) = repo_with(1).await;
        let book = repo.take_copies(&id, 3).await.unwrap().unwrap();
        assert_eq!(book.available_copies, -2);
        assert!(!book.available);
    }
}
