use lendr_db::{Document, DocumentId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One lending transaction against a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: DocumentId,
    /// Referenced book, not embedded
    pub book: DocumentId,
    pub quantity: u32,
    #[serde(with = "crate::timestamp")]
    pub due_date: OffsetDateTime,
    #[serde(with = "crate::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "crate::timestamp")]
    pub updated_at: OffsetDateTime,
}

impl Borrow {
    pub fn new(request: CreateBorrow, now: OffsetDateTime) -> Self {
        Self {
            id: DocumentId::generate(),
            book: request.book,
            quantity: request.quantity,
            due_date: request.due_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Borrow {
    fn id(&self) -> &DocumentId {
        &self.id
    }
}

/// `POST /api/borrow` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrow {
    pub book: DocumentId,
    pub quantity: u32,
    #[serde(with = "crate::timestamp")]
    pub due_date: OffsetDateTime,
}

/// Title and ISBN pulled from the joined book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRef {
    pub title: String,
    pub isbn: String,
}

/// Total quantity borrowed for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowSummary {
    pub book: BookRef,
    pub total_quantity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn create_borrow_accepts_plain_due_date() {
        let request: CreateBorrow = serde_json::from_value(serde_json::json!({
            "book": "book-1",
            "quantity": 2,
            "dueDate": "2025-07-18"
        }))
        .unwrap();
        assert_eq!(request.due_date, datetime!(2025-07-18 00:00:00 UTC));
        assert_eq!(request.book, DocumentId::from("book-1"));
    }

    #[test]
    fn negative_quantity_is_rejected_at_parse_time() {
        let parsed = serde_json::from_value::<CreateBorrow>(serde_json::json!({
            "book": "book-1",
            "quantity": -1,
            "dueDate": "2025-07-18"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn summary_serializes_like_the_aggregate() {
        let summary = BorrowSummary {
            book: BookRef {
                title: "Emma".to_string(),
                isbn: "9780141439587".to_string(),
            },
            total_quantity: 7,
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            serde_json::json!({
                "book": {"title": "Emma", "isbn": "9780141439587"},
                "totalQuantity": 7
            })
        );
    }
}
