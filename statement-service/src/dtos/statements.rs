use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SourceFilter;
use crate::reporting::aggregator::{CenterTotal, LineItem};
use crate::reporting::classifier::Category;
use crate::reporting::SourceFailure;

#[derive(Debug, Deserialize)]
pub struct IncomeStatementParams {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub search: Option<String>,
    #[serde(default)]
    pub source: SourceFilter,
}

#[derive(Debug, Deserialize)]
pub struct BalanceSheetParams {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub source: SourceFilter,
}

/// Reporting period, inclusive both ends.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Period {
    /// Default to January 1 of the current year through today.
    pub fn resolve(from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        let today = Utc::now().date_naive();
        let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self {
            from_date: from_date.unwrap_or(year_start),
            to_date: to_date.unwrap_or(today),
        }
    }
}

/// Income statement line for one revenue or expense account.
#[derive(Debug, Clone, Serialize)]
pub struct IncomeLine {
    pub account_id: Option<i64>,
    pub account_code: String,
    pub account_name: String,
    pub account_type: String,
    pub net_amount: Decimal,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
    pub entries_count: u64,
    pub source_types: Vec<String>,
    pub by_center: BTreeMap<String, CenterTotal>,
}

impl From<LineItem> for IncomeLine {
    fn from(item: LineItem) -> Self {
        Self {
            account_id: item.account_id,
            account_code: item.account_code,
            account_name: item.account_name,
            account_type: item.account_type,
            net_amount: item.net,
            debit_total: item.debit_total,
            credit_total: item.credit_total,
            entries_count: item.entries_count,
            source_types: item.source_types,
            by_center: item.by_center,
        }
    }
}

/// Balance sheet line for one asset, liability or equity account.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceLine {
    pub account_id: Option<i64>,
    pub account_code: String,
    pub account_name: String,
    pub account_type: String,
    pub category: Category,
    pub net_balance: Decimal,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
    pub entries_count: u64,
    pub source_types: Vec<String>,
    pub by_center: BTreeMap<String, CenterTotal>,
}

impl From<LineItem> for BalanceLine {
    fn from(item: LineItem) -> Self {
        Self {
            account_id: item.account_id,
            account_code: item.account_code,
            account_name: item.account_name,
            account_type: item.account_type,
            category: item.category,
            net_balance: item.net,
            debit_total: item.debit_total,
            credit_total: item.credit_total,
            entries_count: item.entries_count,
            source_types: item.source_types,
            by_center: item.by_center,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementStats {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub is_profit: bool,
    pub profit_margin: Decimal,
    pub revenue_accounts_count: usize,
    pub expense_accounts_count: usize,
    pub total_entries: u64,
    pub unclassified_accounts: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetStats {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equities: Decimal,
    pub net_income: Decimal,
    pub total_revenue_amount: Decimal,
    pub total_expense_amount: Decimal,
    pub total_equities_with_income: Decimal,
    pub difference: Decimal,
    pub is_balanced: bool,
    pub assets_count: usize,
    pub liabilities_count: usize,
    pub equities_count: usize,
    pub total_entries: u64,
    pub unclassified_accounts: u64,
}

/// Named magnitude slice for composition and top-N charts.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendPoint {
    pub month: String,
    pub revenue: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeChartData {
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub top_revenues: Vec<ChartSlice>,
    pub top_expenses: Vec<ChartSlice>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChartData {
    pub asset_composition: Vec<ChartSlice>,
    pub liability_composition: Vec<ChartSlice>,
    pub summary: Vec<ChartSlice>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementResponse {
    pub revenues: Vec<IncomeLine>,
    pub expenses: Vec<IncomeLine>,
    pub stats: IncomeStatementStats,
    pub chart_data: IncomeChartData,
    pub source_type_counts: BTreeMap<String, u64>,
    pub period: Period,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetResponse {
    pub assets: Vec<BalanceLine>,
    pub liabilities: Vec<BalanceLine>,
    pub equities: Vec<BalanceLine>,
    pub stats: BalanceSheetStats,
    pub chart_data: BalanceChartData,
    pub source_type_counts: BTreeMap<String, u64>,
    pub period: Period,
    pub failures: Vec<SourceFailure>,
}
