pub mod books_db;
pub mod ledger_db;
pub mod metrics;

pub use books_db::BooksDb;
pub use ledger_db::LedgerDb;
pub use metrics::{get_metrics, init_metrics};
