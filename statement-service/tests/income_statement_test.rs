//! Income statement builder: line survival, ordering, stats and charts.

mod common;

use common::*;
use rust_decimal::Decimal;
use statement_service::dtos::Period;
use statement_service::models::Source;
use statement_service::reporting::income::build_income_statement;
use statement_service::reporting::{
    ReferenceData, SourceFailure, StatementAggregator, StatementKind,
};

fn period() -> Period {
    Period {
        from_date: date("2024-01-01"),
        to_date: date("2024-12-31"),
    }
}

#[test]
fn single_revenue_entry_yields_full_margin() {
    let accounts = vec![account(1, "4001", "Sales", "revenue")];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&[journal_entry(1, 1, "0", "1000", "2024-03-15")], &refs);

    let response = build_income_statement(agg, period(), None, vec![]);

    assert_eq!(response.revenues.len(), 1);
    assert_eq!(response.revenues[0].net_amount, dec("1000"));
    assert_eq!(response.stats.total_revenue, dec("1000"));
    assert_eq!(response.stats.total_expenses, Decimal::ZERO);
    assert_eq!(response.stats.net_income, dec("1000"));
    assert_eq!(response.stats.profit_margin, dec("100"));
    assert!(response.stats.is_profit);
}

#[test]
fn sign_convention_holds_on_every_line() {
    let accounts = vec![
        account(1, "4001", "Sales", "revenue"),
        account(2, "5100", "Office rent", "expense"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "100", "900", "2024-02-01"),
            journal_entry(2, 2, "400", "50", "2024-02-01"),
        ],
        &refs,
    );

    let response = build_income_statement(agg, period(), None, vec![]);

    for line in &response.revenues {
        assert_eq!(line.net_amount, line.credit_total - line.debit_total);
    }
    for line in &response.expenses {
        assert_eq!(line.net_amount, line.debit_total - line.credit_total);
    }
    assert_eq!(response.stats.net_income, dec("800") - dec("350"));
}

#[test]
fn near_zero_lines_are_hidden() {
    let accounts = vec![
        account(1, "4001", "Sales", "revenue"),
        account(2, "4002", "Rebates", "revenue"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "0", "0.01", "2024-02-01"),
            journal_entry(2, 2, "0", "0.02", "2024-02-01"),
        ],
        &refs,
    );

    let response = build_income_statement(agg, period(), None, vec![]);

    assert_eq!(response.revenues.len(), 1);
    assert_eq!(response.revenues[0].account_code, "4002");
}

#[test]
fn search_narrows_by_code_or_name_case_insensitively() {
    let accounts = vec![
        account(1, "4001", "Product sales", "revenue"),
        account(2, "4002", "Service fees", "revenue"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "0", "100", "2024-02-01"),
            journal_entry(2, 2, "0", "200", "2024-02-01"),
        ],
        &refs,
    );

    let response = build_income_statement(agg, period(), Some("SERVICE"), vec![]);

    assert_eq!(response.revenues.len(), 1);
    assert_eq!(response.revenues[0].account_code, "4002");
}

#[test]
fn equal_amounts_order_by_account_code() {
    let accounts = vec![
        account(2, "4002", "Fees", "revenue"),
        account(1, "4001", "Sales", "revenue"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    // Ingest in reverse code order; the tie must still break by code
    agg.ingest_journal(
        &[
            journal_entry(1, 2, "0", "500", "2024-02-01"),
            journal_entry(2, 1, "0", "500", "2024-02-01"),
        ],
        &refs,
    );

    let response = build_income_statement(agg, period(), None, vec![]);

    let codes: Vec<&str> = response
        .revenues
        .iter()
        .map(|line| line.account_code.as_str())
        .collect();
    assert_eq!(codes, vec!["4001", "4002"]);
}

#[test]
fn monthly_trend_buckets_sort_ascending() {
    let accounts = vec![
        account(1, "4001", "Sales", "revenue"),
        account(2, "5100", "Office rent", "expense"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "0", "50", "2024-02-10"),
            journal_entry(2, 1, "0", "100", "2024-01-20"),
            journal_entry(3, 2, "30", "0", "2024-01-05"),
        ],
        &refs,
    );

    let response = build_income_statement(agg, period(), None, vec![]);
    let trend = &response.chart_data.monthly_trend;

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].month, "2024-01");
    assert_eq!(trend[0].revenue, dec("100"));
    assert_eq!(trend[0].expenses, dec("30"));
    assert_eq!(trend[1].month, "2024-02");
    assert_eq!(trend[1].revenue, dec("50"));
    assert_eq!(trend[1].expenses, Decimal::ZERO);
}

#[test]
fn expense_row_on_asset_account_contributes_nothing() {
    let asset = account(1, "1100", "Equipment", "asset");

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_expenses(&[expense_row_on_account(1, "500", "2024-02-01", &asset)]);

    let response = build_income_statement(agg, period(), None, vec![]);

    assert!(response.expenses.is_empty());
    assert_eq!(response.stats.total_expenses, Decimal::ZERO);
    // The row was still seen by the expense ingestor
    assert_eq!(response.source_type_counts.get("expense"), Some(&1));
}

#[test]
fn invoice_on_asset_account_contributes_nothing() {
    let receivable = account(1, "1300", "Receivables", "asset");

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_invoices(&[invoice_row_on_account(1, "900", "2024-02-01", &receivable)]);

    let response = build_income_statement(agg, period(), None, vec![]);

    assert!(response.revenues.is_empty());
    assert_eq!(response.stats.total_revenue, Decimal::ZERO);
}

#[test]
fn unattached_invoices_become_revenue_lines() {
    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_invoices(&[
        invoice_row(1, Some("300"), "2024-02-01"),
        invoice_row(2, Some("200"), "2024-02-15"),
    ]);

    let response = build_income_statement(agg, period(), None, vec![]);

    assert_eq!(response.revenues.len(), 1);
    assert_eq!(response.revenues[0].account_code, "INV-NA");
    assert_eq!(response.revenues[0].net_amount, dec("500"));
    assert_eq!(response.stats.total_revenue, dec("500"));
}

#[test]
fn top_accounts_are_capped_at_five() {
    let accounts: Vec<_> = (1..=7)
        .map(|i| account(i, &format!("40{:02}", i), &format!("Stream {}", i), "revenue"))
        .collect();
    let refs = ReferenceData::new(accounts, vec![]);

    let entries: Vec<_> = (1..=7)
        .map(|i| journal_entry(i, i, "0", &format!("{}00", i), "2024-02-01"))
        .collect();

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&entries, &refs);

    let response = build_income_statement(agg, period(), None, vec![]);

    assert_eq!(response.chart_data.top_revenues.len(), 5);
    assert_eq!(response.chart_data.top_revenues[0].name, "Stream 7");
    assert_eq!(response.chart_data.top_revenues[0].amount, dec("700"));
}

#[test]
fn source_failures_are_reported_alongside_results() {
    let accounts = vec![account(1, "4001", "Sales", "revenue")];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&[journal_entry(1, 1, "0", "1000", "2024-03-15")], &refs);

    let failures = vec![SourceFailure::new(Source::Payroll, "connection refused")];
    let response = build_income_statement(agg, period(), None, failures);

    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].source, Source::Payroll);
    assert_eq!(response.failures[0].error, "connection refused");
    // Degradation does not hide what the other sources produced
    assert_eq!(response.stats.total_revenue, dec("1000"));
}

#[test]
fn unclassified_rows_surface_in_stats() {
    let accounts = vec![account(1, "9999", "Suspense", "misc")];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&[journal_entry(1, 1, "100", "0", "2024-02-01")], &refs);

    let response = build_income_statement(agg, period(), None, vec![]);

    assert!(response.revenues.is_empty());
    assert!(response.expenses.is_empty());
    assert_eq!(response.stats.unclassified_accounts, 1);
}
