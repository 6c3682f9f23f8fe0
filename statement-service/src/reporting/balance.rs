//! Balance sheet builder.

use rust_decimal::Decimal;

use crate::dtos::{
    BalanceChartData, BalanceLine, BalanceSheetResponse, BalanceSheetStats, ChartSlice, Period,
};
use crate::reporting::aggregator::{LineItem, StatementAggregator, EPSILON};
use crate::reporting::classifier::Category;
use crate::reporting::SourceFailure;

const COMPOSITION_SLICES: usize = 8;

/// Assemble the balance sheet from an aggregator fed by the ingestors
/// (opening balances already applied).
///
/// Net income is recomputed from the revenue/expense totals gathered
/// during ingestion and folded into the equity side; the asset-vs-
/// liability difference is reported rather than enforced.
pub fn build_balance_sheet(
    agg: StatementAggregator,
    period: Period,
    failures: Vec<SourceFailure>,
) -> BalanceSheetResponse {
    let assets = surviving_lines(agg.items(Category::Asset));
    let liabilities = surviving_lines(agg.items(Category::Liability));
    let equities = surviving_lines(agg.items(Category::Equity));

    let total_assets: Decimal = assets.iter().map(|item| item.net).sum();
    let total_liabilities: Decimal = liabilities.iter().map(|item| item.net).sum();
    let total_equities: Decimal = equities.iter().map(|item| item.net).sum();

    let total_revenue_amount = agg.bare_revenue();
    let total_expense_amount = agg.bare_expense();
    let net_income = total_revenue_amount - total_expense_amount;
    let total_equities_with_income = total_equities + net_income;
    let difference = total_assets - (total_liabilities + total_equities_with_income);

    let total_entries = assets
        .iter()
        .chain(liabilities.iter())
        .chain(equities.iter())
        .map(|item| item.entries_count)
        .sum();

    let chart_data = BalanceChartData {
        asset_composition: composition(&assets),
        liability_composition: composition(&liabilities),
        summary: vec![
            ChartSlice {
                name: "assets".to_string(),
                amount: total_assets,
            },
            ChartSlice {
                name: "liabilities".to_string(),
                amount: total_liabilities,
            },
            ChartSlice {
                name: "equity".to_string(),
                amount: total_equities_with_income,
            },
        ],
    };

    let stats = BalanceSheetStats {
        total_assets,
        total_liabilities,
        total_equities,
        net_income,
        total_revenue_amount,
        total_expense_amount,
        total_equities_with_income,
        difference,
        is_balanced: difference.abs() < EPSILON,
        assets_count: assets.len(),
        liabilities_count: liabilities.len(),
        equities_count: equities.len(),
        total_entries,
        unclassified_accounts: agg.unclassified_rows(),
    };

    BalanceSheetResponse {
        assets: assets.into_iter().map(BalanceLine::from).collect(),
        liabilities: liabilities.into_iter().map(BalanceLine::from).collect(),
        equities: equities.into_iter().map(BalanceLine::from).collect(),
        stats,
        chart_data,
        source_type_counts: agg.source_counts().clone(),
        period,
        failures,
    }
}

fn surviving_lines(mut items: Vec<LineItem>) -> Vec<LineItem> {
    items.retain(|item| item.net.abs() > EPSILON);
    items.sort_by(|a, b| {
        b.net
            .abs()
            .cmp(&a.net.abs())
            .then_with(|| a.account_code.cmp(&b.account_code))
    });
    items
}

fn composition(items: &[LineItem]) -> Vec<ChartSlice> {
    items
        .iter()
        .take(COMPOSITION_SLICES)
        .map(|item| ChartSlice {
            name: item.account_name.clone(),
            amount: item.net.abs(),
        })
        .collect()
}
