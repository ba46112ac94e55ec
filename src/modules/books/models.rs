use lendr_db::{Document, DocumentId};
use lendr_http::AppError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalogue entry and its lending stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: DocumentId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Copies the library owns
    pub copies: u32,
    /// Copies currently on the shelf. Signed so that the legacy stock check
    /// can drive it below zero.
    pub available_copies: i64,
    /// Derived from `available_copies`; see [`Book::update_availability`]
    pub available: bool,
    #[serde(with = "crate::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "crate::timestamp")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Recompute the availability flag from the copy counter.
    pub fn update_availability(&mut self) {
        self.available = self.available_copies > 0;
    }

    /// Remove `quantity` copies from the shelf and refresh availability.
    pub fn take_copies(&mut self, quantity: u32, now: OffsetDateTime) {
        self.available_copies -= i64::from(quantity);
        self.update_availability();
        self.updated_at = now;
    }
}

impl Document for Book {
    fn id(&self) -> &DocumentId {
        &self.id
    }
}

/// Request body for adding a book to the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub copies: u32,
    #[serde(default)]
    pub available_copies: Option<u32>,
}

impl CreateBook {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("isbn", &self.isbn),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::bad_request(format!("{field} is required")));
            }
        }
        if self.available_copies.is_some_and(|available| available > self.copies) {
            return Err(AppError::bad_request(
                "availableCopies cannot exceed copies",
            ));
        }
        Ok(())
    }

    pub fn into_book(self, now: OffsetDateTime) -> Book {
        let available_copies = i64::from(self.available_copies.unwrap_or(self.copies));
        let mut book = Book {
            id: DocumentId::generate(),
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            copies: self.copies,
            available_copies,
            available: false,
            created_at: now,
            updated_at: now,
        };
        book.update_availability();
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(copies: u32, available: Option<u32>) -> CreateBook {
        CreateBook {
            title: " The Hobbit ".to_string(),
            author: "J. R. R. Tolkien".to_string(),
            isbn: "9780547928227".to_string(),
            copies,
            available_copies: available,
        }
    }

    #[test]
    fn new_book_defaults_to_all_copies_available() {
        let book = request(4, None).into_book(OffsetDateTime::now_utc());
        assert_eq!(book.title, "The Hobbit");
        assert_eq!(book.available_copies, 4);
        assert!(book.available);
    }

    #[test]
    fn book_without_copies_is_unavailable() {
        let book = request(0, None).into_book(OffsetDateTime::now_utc());
        assert!(!book.available);
    }

    #[test]
    fn taking_last_copy_clears_availability() {
        let mut book = request(2, None).into_book(OffsetDateTime::now_utc());
        book.take_copies(2, OffsetDateTime::now_utc());
        assert_eq!(book.available_copies, 0);
        assert!(!book.available);
    }

    #[test]
    fn validation_rejects_blank_fields_and_excess_availability() {
        let mut blank = request(1, None);
        blank.isbn = "  ".to_string();
        assert!(matches!(blank.validate(), Err(AppError::BadRequest { .. })));

        assert!(request(1, Some(2)).validate().is_err());
        assert!(request(3, Some(2)).validate().is_ok());
    }

    #[test]
    fn serializes_camel_case() {
        let book = request(1, None).into_book(OffsetDateTime::now_utc());
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["availableCopies"], 1);
        assert!(value["createdAt"].is_string());
    }
}
