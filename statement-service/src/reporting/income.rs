//! Income statement builder.

use rust_decimal::Decimal;

use crate::dtos::{
    IncomeChartData, IncomeLine, IncomeStatementResponse, IncomeStatementStats, MonthlyTrendPoint,
    Period,
};
use crate::reporting::aggregator::{LineItem, StatementAggregator, EPSILON};
use crate::reporting::classifier::Category;
use crate::reporting::SourceFailure;

const TOP_ACCOUNTS: usize = 5;

/// Assemble the income statement from an aggregator fed by the ingestors.
///
/// Near-zero lines are hidden, the optional search narrows by account
/// code/name, and ordering is net descending with the account code as the
/// tie break so identical requests serialize identically.
pub fn build_income_statement(
    agg: StatementAggregator,
    period: Period,
    search: Option<&str>,
    failures: Vec<SourceFailure>,
) -> IncomeStatementResponse {
    let revenues = surviving_lines(agg.items(Category::Revenue), search);
    let expenses = surviving_lines(agg.items(Category::Expense), search);

    let total_revenue: Decimal = revenues.iter().map(|item| item.net).sum();
    let total_expenses: Decimal = expenses.iter().map(|item| item.net).sum();
    let net_income = total_revenue - total_expenses;
    let profit_margin = if total_revenue > Decimal::ZERO {
        net_income / total_revenue * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    let total_entries = revenues
        .iter()
        .chain(expenses.iter())
        .map(|item| item.entries_count)
        .sum();

    let chart_data = IncomeChartData {
        monthly_trend: agg
            .monthly()
            .iter()
            .map(|(month, bucket)| MonthlyTrendPoint {
                month: month.clone(),
                revenue: bucket.revenue,
                expenses: bucket.expenses,
            })
            .collect(),
        top_revenues: top_by_magnitude(&revenues),
        top_expenses: top_by_magnitude(&expenses),
    };

    let stats = IncomeStatementStats {
        total_revenue,
        total_expenses,
        net_income,
        is_profit: net_income >= Decimal::ZERO,
        profit_margin,
        revenue_accounts_count: revenues.len(),
        expense_accounts_count: expenses.len(),
        total_entries,
        unclassified_accounts: agg.unclassified_rows(),
    };

    IncomeStatementResponse {
        revenues: revenues.into_iter().map(IncomeLine::from).collect(),
        expenses: expenses.into_iter().map(IncomeLine::from).collect(),
        stats,
        chart_data,
        source_type_counts: agg.source_counts().clone(),
        period,
        failures,
    }
}

fn surviving_lines(mut items: Vec<LineItem>, search: Option<&str>) -> Vec<LineItem> {
    items.retain(|item| item.net.abs() > EPSILON);

    if let Some(needle) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        items.retain(|item| {
            item.account_code.to_lowercase().contains(&needle)
                || item.account_name.to_lowercase().contains(&needle)
        });
    }

    items.sort_by(|a, b| {
        b.net
            .cmp(&a.net)
            .then_with(|| a.account_code.cmp(&b.account_code))
    });
    items
}

fn top_by_magnitude(items: &[LineItem]) -> Vec<crate::dtos::ChartSlice> {
    let mut ranked: Vec<&LineItem> = items.iter().collect();
    ranked.sort_by(|a, b| {
        b.net
            .abs()
            .cmp(&a.net.abs())
            .then_with(|| a.account_code.cmp(&b.account_code))
    });
    ranked
        .into_iter()
        .take(TOP_ACCOUNTS)
        .map(|item| crate::dtos::ChartSlice {
            name: item.account_name.clone(),
            amount: item.net.abs(),
        })
        .collect()
}
