pub mod books;
pub mod borrows;

use std::sync::Arc;

use lendr_db::Collection;
use lendr_kernel::{settings::Settings, ModuleRegistry};

use books::repository::{BookRepository, MemoryBookRepository};
use borrows::repository::{BorrowRepository, MemoryBorrowRepository};
use borrows::service::BorrowService;

/// Register every module with the registry, sharing one set of collections.
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    let book_docs = Collection::new("books");
    let borrow_docs = Collection::new("borrows");

    let book_repo: Arc<dyn BookRepository> =
        Arc::new(MemoryBookRepository::new(book_docs.clone()));
    let borrow_repo: Arc<dyn BorrowRepository> =
        Arc::new(MemoryBorrowRepository::new(borrow_docs, book_docs));

    let service = BorrowService::new(
        Arc::clone(&book_repo),
        borrow_repo,
        settings.borrow.stock_check,
    );

    registry.register(books::create_module(book_repo));
    registry.register(borrows::create_module(service));
}
