//! Transactional rows from the books store (MySQL).
//!
//! Each row type is fetched LEFT JOINed against the books-side `accounts`
//! and `cost_centers` mirrors, so the account code/name/type label and the
//! center display name arrive pre-resolved and nullable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Operational expense row (`monthly_expenses`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub account_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub expense_type: Option<String>,
    pub account_code: Option<String>,
    pub account_name: Option<String>,
    pub account_type: Option<String>,
    pub center_name: Option<String>,
}

/// Salary deduction row (`monthly_deductions`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DeductionRow {
    pub id: i64,
    pub account_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub deduction_type: Option<String>,
    pub account_code: Option<String>,
    pub account_name: Option<String>,
    pub account_type: Option<String>,
    pub center_name: Option<String>,
}

/// Posted (non-draft) payroll run (`salary_payrolls`). The period is kept
/// as the raw `YYYY-MM` month the run was issued for.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PayrollRow {
    pub id: i64,
    pub account_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub total_amount: Option<Decimal>,
    pub payroll_month: String,
    pub account_code: Option<String>,
    pub account_name: Option<String>,
    pub account_type: Option<String>,
    pub center_name: Option<String>,
}

impl PayrollRow {
    /// First day of the payroll month, when the stored month parses.
    pub fn period_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.payroll_month), "%Y-%m-%d").ok()
    }
}

/// Issued sales invoice (`sales_invoices`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id: i64,
    pub account_id: Option<i64>,
    pub cost_center_id: Option<i64>,
    pub total_amount: Option<Decimal>,
    pub issue_date: NaiveDate,
    pub invoice_number: Option<String>,
    pub client_name: Option<String>,
    pub account_code: Option<String>,
    pub account_name: Option<String>,
    pub account_type: Option<String>,
    pub center_name: Option<String>,
}
