//! Aggregator accumulation rules over normalized movements.

mod common;

use common::*;
use rust_decimal::Decimal;
use statement_service::reporting::classifier::Category;
use statement_service::reporting::{ReferenceData, StatementAggregator, StatementKind};

#[test]
fn first_movement_fixes_account_identity() {
    let mut agg = StatementAggregator::new(StatementKind::Income);

    let first = account(10, "5100", "Office rent", "expense");
    let renamed = account(10, "5100", "Rent and utilities", "expense");

    agg.ingest_expenses(&[
        expense_row_on_account(1, "100", "2024-01-10", &first),
        expense_row_on_account(2, "50", "2024-01-20", &renamed),
    ]);

    let items = agg.items(Category::Expense);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].account_name, "Office rent");
    assert_eq!(items[0].net, dec("150"));
    assert_eq!(items[0].entries_count, 2);
}

#[test]
fn source_tags_are_deduplicated_per_line() {
    let accounts = vec![account(1, "5100", "Office rent", "expense")];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "100", "0", "2024-01-05"),
            journal_entry(2, 1, "200", "0", "2024-01-15"),
        ],
        &refs,
    );

    let items = agg.items(Category::Expense);
    assert_eq!(items[0].source_types, vec!["journal".to_string()]);
    assert_eq!(agg.source_counts().get("journal"), Some(&2));
}

#[test]
fn tagged_journal_entries_count_under_their_own_tag() {
    let accounts = vec![account(1, "4001", "Sales", "revenue")];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut entries = vec![journal_entry(1, 1, "0", "100", "2024-01-05")];
    entries[0].source_type = Some("invoice".to_string());

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&entries, &refs);

    assert_eq!(agg.source_counts().get("invoice"), Some(&1));
    assert_eq!(agg.source_counts().get("journal"), None);
    assert_eq!(
        agg.items(Category::Revenue)[0].source_types,
        vec!["invoice".to_string()]
    );
}

#[test]
fn vanished_cost_center_falls_back_to_unknown() {
    let accounts = vec![account(1, "5100", "Office rent", "expense")];
    let centers = vec![cost_center(7, "CC-07", "Riyadh branch")];
    let refs = ReferenceData::new(accounts, centers);

    let mut entries = vec![
        journal_entry(1, 1, "100", "0", "2024-01-05"),
        journal_entry(2, 1, "40", "0", "2024-01-06"),
    ];
    entries[0].cost_center_id = Some(7);
    entries[1].cost_center_id = Some(99);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&entries, &refs);

    let items = agg.items(Category::Expense);
    let by_center = &items[0].by_center;
    assert_eq!(by_center.get("7").unwrap().name, "Riyadh branch");
    assert_eq!(by_center.get("7").unwrap().amount, dec("100"));
    assert_eq!(by_center.get("99").unwrap().name, "Unknown");
    assert_eq!(by_center.get("99").unwrap().amount, dec("40"));
}

#[test]
fn non_positive_or_missing_amounts_are_skipped() {
    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_expenses(&[
        expense_row(1, None, "2024-01-05"),
        expense_row(2, Some("0"), "2024-01-05"),
        expense_row(3, Some("-25"), "2024-01-05"),
    ]);

    assert!(agg.items(Category::Expense).is_empty());
    assert_eq!(agg.source_counts().get("expense"), None);
}

#[test]
fn journal_rows_without_resolvable_account_are_dropped() {
    let refs = ReferenceData::new(vec![], vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(&[journal_entry(1, 42, "100", "0", "2024-01-05")], &refs);

    assert!(agg.items(Category::Expense).is_empty());
    assert_eq!(agg.source_counts().get("journal"), None);
    assert_eq!(agg.unclassified_rows(), 0);
}

#[test]
fn journal_net_follows_the_normal_balance_side() {
    let accounts = vec![
        account(1, "1100", "Cash", "asset"),
        account(2, "2100", "Loans payable", "liability"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Balance);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "1000", "300", "2024-01-05"),
            journal_entry(2, 2, "200", "900", "2024-01-05"),
        ],
        &refs,
    );

    let assets = agg.items(Category::Asset);
    assert_eq!(assets[0].net, dec("700"));
    assert_eq!(assets[0].net, assets[0].debit_total - assets[0].credit_total);

    let liabilities = agg.items(Category::Liability);
    assert_eq!(liabilities[0].net, dec("700"));
    assert_eq!(
        liabilities[0].net,
        liabilities[0].credit_total - liabilities[0].debit_total
    );
}

#[test]
fn unclassified_journal_rows_are_counted_not_dropped_silently() {
    let accounts = vec![account(1, "9999", "Suspense", "misc")];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_journal(
        &[
            journal_entry(1, 1, "100", "0", "2024-01-05"),
            journal_entry(2, 1, "50", "0", "2024-01-06"),
        ],
        &refs,
    );

    assert_eq!(agg.unclassified_rows(), 2);
    for category in [
        Category::Asset,
        Category::Liability,
        Category::Equity,
        Category::Revenue,
        Category::Expense,
    ] {
        assert!(agg.items(category).is_empty());
    }
    // The rows still count toward their source tag
    assert_eq!(agg.source_counts().get("journal"), Some(&2));
}

#[test]
fn payroll_without_account_uses_placeholder_code() {
    let mut agg = StatementAggregator::new(StatementKind::Income);
    agg.ingest_payrolls(&[payroll_row(1, Some("12000"), "2024-03")]);

    let items = agg.items(Category::Expense);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].account_code, "PAY-NA");
    assert_eq!(items[0].net, dec("12000"));
    assert_eq!(items[0].account_id, None);
}

#[test]
fn opening_balance_shifts_net_without_touching_totals() {
    let accounts = vec![
        account_with_opening(1, "1100", "Cash", "asset", "750"),
        account_with_opening(2, "1200", "Bank", "asset", "0.005"),
    ];
    let refs = ReferenceData::new(accounts, vec![]);

    let mut agg = StatementAggregator::new(StatementKind::Balance);
    agg.ingest_journal(&[journal_entry(1, 1, "100", "0", "2024-01-05")], &refs);
    agg.apply_opening_balances(refs.accounts());

    let assets = agg.items(Category::Asset);
    assert_eq!(assets.len(), 1, "sub-epsilon opening creates no line");
    assert_eq!(assets[0].net, dec("850"));
    assert_eq!(assets[0].debit_total, dec("100"));
    assert_eq!(assets[0].credit_total, Decimal::ZERO);
    assert_eq!(assets[0].entries_count, 1);
}
