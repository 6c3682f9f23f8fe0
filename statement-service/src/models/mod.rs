//! Domain models for statement-service.

mod account;
mod books;
mod journal;
mod movement;

pub use account::{Account, CostCenter};
pub use books::{DeductionRow, ExpenseRow, InvoiceRow, PayrollRow};
pub use journal::JournalEntry;
pub use movement::{CostCenterRef, NormalizedMovement, Source, SourceFilter};
