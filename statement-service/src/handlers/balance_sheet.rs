use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;

use crate::dtos::{BalanceSheetParams, Period};
use crate::middleware::TenantContext;
use crate::models::Source;
use crate::reporting::balance::build_balance_sheet;
use crate::reporting::{ReferenceData, SourceFailure, StatementAggregator, StatementKind};
use crate::startup::AppState;

/// GET /api/balance-sheet
///
/// Asset, liability and equity lines for the tenant over an inclusive
/// date range, opening balances folded in, net income recomputed from
/// revenue/expense movements, and the asset-vs-liability difference
/// reported rather than enforced.
pub async fn balance_sheet(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<BalanceSheetParams>,
) -> Result<impl IntoResponse, AppError> {
    let period = Period::resolve(params.from_date, params.to_date);
    let filter = params.source;

    let (accounts, centers) = tokio::try_join!(
        state.ledger_db.fetch_accounts(tenant.company_id),
        state.ledger_db.fetch_cost_centers(tenant.company_id),
    )?;
    let refs = ReferenceData::new(accounts, centers);

    let mut agg = StatementAggregator::new(StatementKind::Balance);
    let mut failures: Vec<SourceFailure> = Vec::new();

    if filter.includes(Source::Journal) {
        match state
            .ledger_db
            .fetch_journal_entries(tenant.company_id, period.from_date, period.to_date)
            .await
        {
            Ok(entries) => agg.ingest_journal(&entries, &refs),
            Err(e) => {
                tracing::error!(error = %e, "Journal entries fetch failed");
                failures.push(SourceFailure::new(Source::Journal, &e));
            }
        }
    }

    if filter.includes(Source::Expense) {
        match state
            .books_db
            .fetch_expenses(tenant.company_id, period.from_date, period.to_date)
            .await
        {
            Ok(rows) => agg.ingest_expenses(&rows),
            Err(e) => {
                tracing::error!(error = %e, "Expenses fetch failed");
                failures.push(SourceFailure::new(Source::Expense, &e));
            }
        }
    }

    if filter.includes(Source::Deduction) {
        match state
            .books_db
            .fetch_deductions(tenant.company_id, period.from_date, period.to_date)
            .await
        {
            Ok(rows) => agg.ingest_deductions(&rows),
            Err(e) => {
                tracing::error!(error = %e, "Deductions fetch failed");
                failures.push(SourceFailure::new(Source::Deduction, &e));
            }
        }
    }

    if filter.includes(Source::Payroll) {
        match state
            .books_db
            .fetch_payrolls(tenant.company_id, period.from_date, period.to_date)
            .await
        {
            Ok(rows) => agg.ingest_payrolls(&rows),
            Err(e) => {
                tracing::error!(error = %e, "Payrolls fetch failed");
                failures.push(SourceFailure::new(Source::Payroll, &e));
            }
        }
    }

    if filter.includes(Source::Invoice) {
        match state
            .books_db
            .fetch_invoices(tenant.company_id, period.from_date, period.to_date)
            .await
        {
            Ok(rows) => agg.ingest_invoices(&rows),
            Err(e) => {
                tracing::error!(error = %e, "Invoices fetch failed");
                failures.push(SourceFailure::new(Source::Invoice, &e));
            }
        }
    }

    agg.apply_opening_balances(refs.accounts());

    let response = build_balance_sheet(agg, period, failures);

    tracing::info!(
        company_id = tenant.company_id,
        from_date = %period.from_date,
        to_date = %period.to_date,
        asset_lines = response.assets.len(),
        liability_lines = response.liabilities.len(),
        equity_lines = response.equities.len(),
        is_balanced = response.stats.is_balanced,
        degraded_sources = response.failures.len(),
        "Balance sheet generated"
    );
    counter!("statements_generated_total", "kind" => "balance").increment(1);

    Ok(Json(response))
}
