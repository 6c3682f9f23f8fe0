//! Accumulation of normalized movements into statement line items.
//!
//! The five ingest methods are the row ingestors: each one owns the sign
//! and side convention for its source, normalizes rows into
//! [`NormalizedMovement`] values and feeds them through a single
//! accumulation path. Aggregation is sequential over already-fetched rows;
//! every map is request-scoped.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{
    Account, CostCenterRef, DeductionRow, ExpenseRow, InvoiceRow, JournalEntry,
    NormalizedMovement, PayrollRow, Source,
};
use crate::reporting::classifier::{classify, Category};
use crate::reporting::ReferenceData;

/// Hide-below threshold shared by line filtering, opening-balance
/// application and the balance check.
pub const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Which statement the aggregator is feeding. The two variants route
/// movements differently (see the ingest methods).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    Balance,
}

/// Per-cost-center sub-total on a line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterTotal {
    pub name: String,
    pub amount: Decimal,
}

/// Aggregated statement row for one account code.
///
/// The first movement seen for a code fixes the account id, name and type
/// label; later movements with the same code never overwrite them.
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub account_id: Option<i64>,
    pub account_code: String,
    pub account_name: String,
    pub account_type: String,
    pub category: Category,
    pub net: Decimal,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
    pub entries_count: u64,
    pub source_types: Vec<String>,
    pub by_center: BTreeMap<String, CenterTotal>,
}

impl LineItem {
    fn new(
        account_id: Option<i64>,
        account_code: &str,
        account_name: &str,
        account_type: &str,
        category: Category,
    ) -> Self {
        Self {
            account_id,
            account_code: account_code.to_string(),
            account_name: account_name.to_string(),
            account_type: account_type.to_string(),
            category,
            net: Decimal::ZERO,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            entries_count: 0,
            source_types: Vec::new(),
            by_center: BTreeMap::new(),
        }
    }
}

/// Month bucket for the income-statement trend chart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyBucket {
    pub revenue: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug)]
pub struct StatementAggregator {
    kind: StatementKind,
    buckets: BTreeMap<Category, BTreeMap<String, LineItem>>,
    bare_revenue: Decimal,
    bare_expense: Decimal,
    source_counts: BTreeMap<String, u64>,
    unclassified_rows: u64,
    monthly: BTreeMap<String, MonthlyBucket>,
}

impl StatementAggregator {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            buckets: BTreeMap::new(),
            bare_revenue: Decimal::ZERO,
            bare_expense: Decimal::ZERO,
            source_counts: BTreeMap::new(),
            unclassified_rows: 0,
            monthly: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Line items for a category, in account-code order.
    pub fn items(&self, category: Category) -> Vec<LineItem> {
        self.buckets
            .get(&category)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Revenue accumulated outside line items (balance sheet net income).
    pub fn bare_revenue(&self) -> Decimal {
        self.bare_revenue
    }

    /// Expense accumulated outside line items (balance sheet net income).
    pub fn bare_expense(&self) -> Decimal {
        self.bare_expense
    }

    pub fn source_counts(&self) -> &BTreeMap<String, u64> {
        &self.source_counts
    }

    pub fn unclassified_rows(&self) -> u64 {
        self.unclassified_rows
    }

    /// Month buckets in ascending `YYYY-MM` order.
    pub fn monthly(&self) -> &BTreeMap<String, MonthlyBucket> {
        &self.monthly
    }

    fn count_source(&mut self, tag: &str) {
        *self.source_counts.entry(tag.to_string()).or_insert(0) += 1;
    }

    fn mark_unclassified(&mut self, code: &str, label: &str) {
        self.unclassified_rows += 1;
        debug!(
            account_code = %code,
            label = %label,
            "account type label matches no known category, row excluded"
        );
    }

    /// Accumulate one normalized movement into its line item.
    fn apply(&mut self, movement: NormalizedMovement) {
        if self.kind == StatementKind::Income {
            if let Some(date) = movement.date {
                let bucket = self
                    .monthly
                    .entry(date.format("%Y-%m").to_string())
                    .or_default();
                match movement.category {
                    Category::Revenue => bucket.revenue += movement.net,
                    Category::Expense => bucket.expenses += movement.net,
                    _ => {}
                }
            }
        }

        let item = self
            .buckets
            .entry(movement.category)
            .or_default()
            .entry(movement.account_code.clone())
            .or_insert_with(|| {
                LineItem::new(
                    movement.account_id,
                    &movement.account_code,
                    &movement.account_name,
                    &movement.account_type,
                    movement.category,
                )
            });

        item.debit_total += movement.debit;
        item.credit_total += movement.credit;
        item.net += movement.net;
        item.entries_count += 1;
        if !item.source_types.contains(&movement.source) {
            item.source_types.push(movement.source.clone());
        }
        if let Some(center) = movement.cost_center {
            let sub = item
                .by_center
                .entry(center.id.to_string())
                .or_insert_with(|| CenterTotal {
                    name: center.name,
                    amount: Decimal::ZERO,
                });
            sub.amount += movement.net;
        }
    }

    /// Journal entries use their own debit/credit columns; the net follows
    /// the category's normal side. Every resolvable row counts toward its
    /// source tag, whatever its category.
    pub fn ingest_journal(&mut self, entries: &[JournalEntry], refs: &ReferenceData) {
        for entry in entries {
            let Some(account) = refs.account(entry.account_id) else {
                continue;
            };
            let tag = entry.source_tag().to_string();
            self.count_source(&tag);

            let Some(category) = classify(&account.account_type) else {
                self.mark_unclassified(&account.account_code, &account.account_type);
                continue;
            };

            let net = if category.is_debit_normal() {
                entry.debit - entry.credit
            } else {
                entry.credit - entry.debit
            };

            let makes_line = match (self.kind, category) {
                (StatementKind::Balance, Category::Revenue) => {
                    self.bare_revenue += net;
                    false
                }
                (StatementKind::Balance, Category::Expense) => {
                    self.bare_expense += net;
                    false
                }
                (StatementKind::Balance, _) => true,
                (StatementKind::Income, Category::Revenue | Category::Expense) => true,
                (StatementKind::Income, _) => false,
            };
            if !makes_line {
                continue;
            }

            let cost_center = entry.cost_center_id.map(|id| CostCenterRef {
                id,
                name: refs.center_name(id).unwrap_or("Unknown").to_string(),
            });

            self.apply(NormalizedMovement {
                account_id: Some(account.id),
                account_code: account.account_code.clone(),
                account_name: account.account_name.clone(),
                account_type: account.account_type.clone(),
                category,
                debit: entry.debit,
                credit: entry.credit,
                net,
                cost_center,
                source: tag,
                date: Some(entry.entry_date),
            });
        }
    }

    /// Operational expenses are debit-increasing expense movements, except
    /// on the balance sheet where a row tied to an asset account reduces
    /// that asset instead. On the income statement, rows settling an
    /// asset or liability directly contribute nothing.
    pub fn ingest_expenses(&mut self, rows: &[ExpenseRow]) {
        for row in rows {
            let Some(amount) = positive_amount(row.amount) else {
                continue;
            };
            let label = row.account_type.as_deref().unwrap_or("expense");
            let category = classify(label);
            self.count_source(Source::Expense.as_str());

            match self.kind {
                StatementKind::Balance => {
                    if category == Some(Category::Asset) {
                        let code = row
                            .account_code
                            .clone()
                            .unwrap_or_else(|| format!("EXP-ASSET-{}", fallback_id(row.account_id)));
                        let name = row
                            .account_name
                            .clone()
                            .or_else(|| row.expense_type.clone())
                            .unwrap_or_else(|| "أصل".to_string());
                        self.apply(NormalizedMovement {
                            account_id: row.account_id,
                            account_code: code,
                            account_name: name,
                            account_type: label.to_string(),
                            category: Category::Asset,
                            debit: Decimal::ZERO,
                            credit: amount,
                            net: -amount,
                            cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                            source: Source::Expense.to_string(),
                            date: Some(row.expense_date),
                        });
                    } else {
                        self.bare_expense += amount;
                    }
                }
                StatementKind::Income => {
                    if matches!(category, Some(Category::Asset) | Some(Category::Liability)) {
                        continue;
                    }
                    let code = row
                        .account_code
                        .clone()
                        .unwrap_or_else(|| format!("EXP-{}", fallback_id(row.account_id)));
                    let name = row
                        .account_name
                        .clone()
                        .or_else(|| row.expense_type.clone())
                        .or_else(|| row.description.clone())
                        .unwrap_or_else(|| "مصروفات أخرى".to_string());
                    self.apply(NormalizedMovement {
                        account_id: row.account_id,
                        account_code: code,
                        account_name: name,
                        account_type: label.to_string(),
                        category: Category::Expense,
                        debit: amount,
                        credit: Decimal::ZERO,
                        net: amount,
                        cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                        source: Source::Expense.to_string(),
                        date: Some(row.expense_date),
                    });
                }
            }
        }
    }

    /// Deductions are expense movements, except on the balance sheet where
    /// a row tied to a liability account increases that liability.
    pub fn ingest_deductions(&mut self, rows: &[DeductionRow]) {
        for row in rows {
            let Some(amount) = positive_amount(row.amount) else {
                continue;
            };
            let label = row.account_type.as_deref().unwrap_or("deduction");
            let category = classify(label);
            self.count_source(Source::Deduction.as_str());

            match self.kind {
                StatementKind::Balance => {
                    if category == Some(Category::Liability) {
                        let code = row
                            .account_code
                            .clone()
                            .unwrap_or_else(|| format!("DED-LIAB-{}", fallback_id(row.account_id)));
                        let name = row
                            .account_name
                            .clone()
                            .or_else(|| row.deduction_type.clone())
                            .unwrap_or_else(|| "التزام".to_string());
                        self.apply(NormalizedMovement {
                            account_id: row.account_id,
                            account_code: code,
                            account_name: name,
                            account_type: label.to_string(),
                            category: Category::Liability,
                            debit: Decimal::ZERO,
                            credit: amount,
                            net: amount,
                            cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                            source: Source::Deduction.to_string(),
                            date: Some(row.expense_date),
                        });
                    } else {
                        self.bare_expense += amount;
                    }
                }
                StatementKind::Income => {
                    if matches!(category, Some(Category::Asset) | Some(Category::Liability)) {
                        continue;
                    }
                    let code = row
                        .account_code
                        .clone()
                        .unwrap_or_else(|| format!("DED-{}", fallback_id(row.account_id)));
                    let name = row
                        .account_name
                        .clone()
                        .or_else(|| row.deduction_type.clone())
                        .or_else(|| row.description.clone())
                        .unwrap_or_else(|| "استقطاعات أخرى".to_string());
                    self.apply(NormalizedMovement {
                        account_id: row.account_id,
                        account_code: code,
                        account_name: name,
                        account_type: label.to_string(),
                        category: Category::Expense,
                        debit: amount,
                        credit: Decimal::ZERO,
                        net: amount,
                        cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                        source: Source::Deduction.to_string(),
                        date: Some(row.expense_date),
                    });
                }
            }
        }
    }

    /// Posted payroll runs behave like deductions: accrued-salary rows on a
    /// liability account increase it on the balance sheet, everything else
    /// is payroll expense.
    pub fn ingest_payrolls(&mut self, rows: &[PayrollRow]) {
        for row in rows {
            let Some(amount) = positive_amount(row.total_amount) else {
                continue;
            };
            let label = row.account_type.as_deref().unwrap_or("payroll");
            let category = classify(label);
            self.count_source(Source::Payroll.as_str());

            match self.kind {
                StatementKind::Balance => {
                    if category == Some(Category::Liability) {
                        let code = row
                            .account_code
                            .clone()
                            .unwrap_or_else(|| format!("PAY-LIAB-{}", fallback_id(row.account_id)));
                        let name = row
                            .account_name
                            .clone()
                            .unwrap_or_else(|| "رواتب مستحقة".to_string());
                        self.apply(NormalizedMovement {
                            account_id: row.account_id,
                            account_code: code,
                            account_name: name,
                            account_type: label.to_string(),
                            category: Category::Liability,
                            debit: Decimal::ZERO,
                            credit: amount,
                            net: amount,
                            cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                            source: Source::Payroll.to_string(),
                            date: row.period_date(),
                        });
                    } else {
                        self.bare_expense += amount;
                    }
                }
                StatementKind::Income => {
                    if matches!(category, Some(Category::Asset) | Some(Category::Liability)) {
                        continue;
                    }
                    let code = row
                        .account_code
                        .clone()
                        .unwrap_or_else(|| format!("PAY-{}", fallback_id(row.account_id)));
                    let name = row
                        .account_name
                        .clone()
                        .unwrap_or_else(|| "مصروفات الرواتب والأجور".to_string());
                    self.apply(NormalizedMovement {
                        account_id: row.account_id,
                        account_code: code,
                        account_name: name,
                        account_type: label.to_string(),
                        category: Category::Expense,
                        debit: amount,
                        credit: Decimal::ZERO,
                        net: amount,
                        cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                        source: Source::Payroll.to_string(),
                        date: row.period_date(),
                    });
                }
            }
        }
    }

    /// Sales invoices are revenue, except a row tied to an asset account,
    /// which is a receivable increase on the balance sheet and contributes
    /// nothing on the income statement.
    pub fn ingest_invoices(&mut self, rows: &[InvoiceRow]) {
        for row in rows {
            let Some(amount) = positive_amount(row.total_amount) else {
                continue;
            };
            let label = row.account_type.as_deref().unwrap_or("revenue");
            let category = classify(label);
            self.count_source(Source::Invoice.as_str());

            match self.kind {
                StatementKind::Balance => {
                    if category == Some(Category::Asset) {
                        let code = row
                            .account_code
                            .clone()
                            .unwrap_or_else(|| format!("INV-ASSET-{}", fallback_id(row.account_id)));
                        let name = row
                            .account_name
                            .clone()
                            .unwrap_or_else(|| "عملاء".to_string());
                        self.apply(NormalizedMovement {
                            account_id: row.account_id,
                            account_code: code,
                            account_name: name,
                            account_type: label.to_string(),
                            category: Category::Asset,
                            debit: amount,
                            credit: Decimal::ZERO,
                            net: amount,
                            cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                            source: Source::Invoice.to_string(),
                            date: Some(row.issue_date),
                        });
                    } else {
                        self.bare_revenue += amount;
                    }
                }
                StatementKind::Income => {
                    if category == Some(Category::Asset) {
                        continue;
                    }
                    let code = row
                        .account_code
                        .clone()
                        .unwrap_or_else(|| format!("INV-{}", fallback_id(row.account_id)));
                    let name = row
                        .account_name
                        .clone()
                        .unwrap_or_else(|| "مبيعات".to_string());
                    self.apply(NormalizedMovement {
                        account_id: row.account_id,
                        account_code: code,
                        account_name: name,
                        account_type: label.to_string(),
                        category: Category::Revenue,
                        debit: Decimal::ZERO,
                        credit: amount,
                        net: amount,
                        cost_center: row_center(row.cost_center_id, row.center_name.as_deref()),
                        source: Source::Invoice.to_string(),
                        date: Some(row.issue_date),
                    });
                }
            }
        }
    }

    /// Fold account opening balances into balance-sheet line items. Opening
    /// balances shift the net only: no entry count, no debit/credit totals,
    /// no source tag.
    pub fn apply_opening_balances(&mut self, accounts: &[Account]) {
        if self.kind != StatementKind::Balance {
            return;
        }
        for account in accounts {
            let opening = account.opening_balance;
            if opening.abs() < EPSILON {
                continue;
            }
            let Some(category) = classify(&account.account_type) else {
                continue;
            };
            if matches!(category, Category::Revenue | Category::Expense) {
                continue;
            }
            let item = self
                .buckets
                .entry(category)
                .or_default()
                .entry(account.account_code.clone())
                .or_insert_with(|| {
                    LineItem::new(
                        Some(account.id),
                        &account.account_code,
                        &account.account_name,
                        &account.account_type,
                        category,
                    )
                });
            item.net += opening;
        }
    }
}

fn positive_amount(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|a| *a > Decimal::ZERO)
}

fn fallback_id(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "NA".to_string())
}

fn row_center(id: Option<i64>, name: Option<&str>) -> Option<CostCenterRef> {
    id.map(|id| CostCenterRef {
        id,
        name: name
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
            .to_string(),
    })
}
