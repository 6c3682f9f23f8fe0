//! Common test utilities: row builders for the pure reporting core.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use statement_service::models::{
    Account, CostCenter, DeductionRow, ExpenseRow, InvoiceRow, JournalEntry, PayrollRow,
};

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("invalid decimal literal")
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("invalid date literal")
}

pub fn account(id: i64, code: &str, name: &str, account_type: &str) -> Account {
    Account {
        id,
        account_code: code.to_string(),
        account_name: name.to_string(),
        account_type: account_type.to_string(),
        opening_balance: Decimal::ZERO,
        balance_type: None,
    }
}

pub fn account_with_opening(
    id: i64,
    code: &str,
    name: &str,
    account_type: &str,
    opening: &str,
) -> Account {
    Account {
        opening_balance: dec(opening),
        ..account(id, code, name, account_type)
    }
}

pub fn cost_center(id: i64, code: &str, name: &str) -> CostCenter {
    CostCenter {
        id,
        center_code: code.to_string(),
        center_name: name.to_string(),
    }
}

pub fn journal_entry(
    id: i64,
    account_id: i64,
    debit: &str,
    credit: &str,
    entry_date: &str,
) -> JournalEntry {
    JournalEntry {
        id,
        account_id,
        cost_center_id: None,
        debit: dec(debit),
        credit: dec(credit),
        entry_date: date(entry_date),
        source_type: None,
    }
}

pub fn expense_row(id: i64, amount: Option<&str>, expense_date: &str) -> ExpenseRow {
    ExpenseRow {
        id,
        account_id: None,
        cost_center_id: None,
        amount: amount.map(dec),
        expense_date: date(expense_date),
        description: None,
        expense_type: Some("rent".to_string()),
        account_code: None,
        account_name: None,
        account_type: None,
        center_name: None,
    }
}

pub fn expense_row_on_account(
    id: i64,
    amount: &str,
    expense_date: &str,
    account: &Account,
) -> ExpenseRow {
    ExpenseRow {
        account_id: Some(account.id),
        account_code: Some(account.account_code.clone()),
        account_name: Some(account.account_name.clone()),
        account_type: Some(account.account_type.clone()),
        ..expense_row(id, Some(amount), expense_date)
    }
}

pub fn deduction_row(id: i64, amount: Option<&str>, expense_date: &str) -> DeductionRow {
    DeductionRow {
        id,
        account_id: None,
        cost_center_id: None,
        amount: amount.map(dec),
        expense_date: date(expense_date),
        description: None,
        deduction_type: Some("insurance".to_string()),
        account_code: None,
        account_name: None,
        account_type: None,
        center_name: None,
    }
}

pub fn deduction_row_on_account(
    id: i64,
    amount: &str,
    expense_date: &str,
    account: &Account,
) -> DeductionRow {
    DeductionRow {
        account_id: Some(account.id),
        account_code: Some(account.account_code.clone()),
        account_name: Some(account.account_name.clone()),
        account_type: Some(account.account_type.clone()),
        ..deduction_row(id, Some(amount), expense_date)
    }
}

pub fn payroll_row(id: i64, total_amount: Option<&str>, month: &str) -> PayrollRow {
    PayrollRow {
        id,
        account_id: None,
        cost_center_id: None,
        total_amount: total_amount.map(dec),
        payroll_month: month.to_string(),
        account_code: None,
        account_name: None,
        account_type: None,
        center_name: None,
    }
}

pub fn invoice_row(id: i64, total_amount: Option<&str>, issue_date: &str) -> InvoiceRow {
    InvoiceRow {
        id,
        account_id: None,
        cost_center_id: None,
        total_amount: total_amount.map(dec),
        issue_date: date(issue_date),
        invoice_number: Some(format!("INV-{:04}", id)),
        client_name: None,
        account_code: None,
        account_name: None,
        account_type: None,
        center_name: None,
    }
}

pub fn invoice_row_on_account(
    id: i64,
    total_amount: &str,
    issue_date: &str,
    account: &Account,
) -> InvoiceRow {
    InvoiceRow {
        account_id: Some(account.id),
        account_code: Some(account.account_code.clone()),
        account_name: Some(account.account_name.clone()),
        account_type: Some(account.account_type.clone()),
        ..invoice_row(id, Some(total_amount), issue_date)
    }
}
