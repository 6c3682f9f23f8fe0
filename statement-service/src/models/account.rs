//! Reference data from the ledger store: accounts and cost centers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Chart-of-accounts entry. The type label is free text maintained in the
/// settings UI (localized, inconsistent spellings); classification into a
/// semantic category happens in `reporting::classifier`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub account_code: String,
    pub account_name: String,
    #[sqlx(rename = "type")]
    pub account_type: String,
    pub opening_balance: Decimal,
    pub balance_type: Option<String>,
}

/// Grouping dimension for sub-reporting. Carries no behavior of its own.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: i64,
    pub center_code: String,
    pub center_name: String,
}
