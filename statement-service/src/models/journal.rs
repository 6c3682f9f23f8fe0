//! Posted journal entries from the ledger store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A posted debit/credit movement against an account. Entries are immutable
/// once posted; the recording flows (invoices, vouchers, payroll migrations)
/// stamp their origin into `source_type`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub account_id: i64,
    pub cost_center_id: Option<i64>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub entry_date: NaiveDate,
    pub source_type: Option<String>,
}

impl JournalEntry {
    /// Source tag for per-source row counts, defaulting untagged entries
    /// to plain journal postings.
    pub fn source_tag(&self) -> &str {
        self.source_type.as_deref().filter(|s| !s.is_empty()).unwrap_or("journal")
    }
}
