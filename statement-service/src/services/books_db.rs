//! Books store gateway (MySQL): expenses, deductions, payrolls, invoices.
//!
//! Every fetch LEFT JOINs the books-side `accounts` and `cost_centers`
//! mirrors so rows arrive with their account code/name/type label and
//! center name pre-resolved (all nullable).

use chrono::NaiveDate;
use metrics::histogram;
use service_core::error::AppError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::models::{DeductionRow, ExpenseRow, InvoiceRow, PayrollRow};

/// Connection pool wrapper for the books store.
#[derive(Clone)]
pub struct BooksDb {
    pool: MySqlPool,
}

impl BooksDb {
    /// Create a new connection pool against the books store.
    #[instrument(skip(database_url), fields(service = "statement-service"))]
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to books store (MySQL)"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to connect to books store: {}", e))
            })?;

        info!("Books store connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check books store health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Operational expense rows within an inclusive date range.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_expenses(
        &self,
        company_id: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<ExpenseRow>, AppError> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT e.id, e.account_id, e.cost_center_id, e.amount, e.expense_date,
                   e.description, e.expense_type,
                   a.account_code, a.account_name, a.type AS account_type, c.center_name
            FROM monthly_expenses e
            LEFT JOIN accounts a ON e.account_id = a.id
            LEFT JOIN cost_centers c ON e.cost_center_id = c.id
            WHERE e.company_id = ? AND e.expense_date >= ? AND e.expense_date <= ?
            "#,
        )
        .bind(company_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch expenses: {}", e)))?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_expenses")
            .record(start.elapsed().as_secs_f64());

        Ok(rows)
    }

    /// Salary deduction rows within an inclusive date range.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_deductions(
        &self,
        company_id: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<DeductionRow>, AppError> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, DeductionRow>(
            r#"
            SELECT d.id, d.account_id, d.cost_center_id, d.amount, d.expense_date,
                   d.description, d.deduction_type,
                   a.account_code, a.account_name, a.type AS account_type, c.center_name
            FROM monthly_deductions d
            LEFT JOIN accounts a ON d.account_id = a.id
            LEFT JOIN cost_centers c ON d.cost_center_id = c.id
            WHERE d.company_id = ? AND d.expense_date >= ? AND d.expense_date <= ?
            "#,
        )
        .bind(company_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch deductions: {}", e))
        })?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_deductions")
            .record(start.elapsed().as_secs_f64());

        Ok(rows)
    }

    /// Posted (non-draft) payroll runs whose month falls in the range.
    /// The month column is `YYYY-MM`; it is pinned to the first of the
    /// month for the range comparison.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_payrolls(
        &self,
        company_id: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<PayrollRow>, AppError> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, PayrollRow>(
            r#"
            SELECT p.id, p.account_id, p.cost_center_id, p.total_amount, p.payroll_month,
                   a.account_code, a.account_name, a.type AS account_type, c.center_name
            FROM salary_payrolls p
            LEFT JOIN accounts a ON p.account_id = a.id
            LEFT JOIN cost_centers c ON p.cost_center_id = c.id
            WHERE p.company_id = ?
              AND (p.is_draft = 0 OR p.is_draft IS NULL)
              AND CONCAT(p.payroll_month, '-01') >= ?
              AND CONCAT(p.payroll_month, '-01') <= ?
            "#,
        )
        .bind(company_id)
        .bind(from_date.to_string())
        .bind(to_date.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch payrolls: {}", e)))?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_payrolls")
            .record(start.elapsed().as_secs_f64());

        Ok(rows)
    }

    /// Issued sales invoices within an inclusive date range.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_invoices(
        &self,
        company_id: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<InvoiceRow>, AppError> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT si.id, si.account_id, si.cost_center_id, si.total_amount, si.issue_date,
                   si.invoice_number, si.client_name,
                   a.account_code, a.account_name, a.type AS account_type, c.center_name
            FROM sales_invoices si
            LEFT JOIN accounts a ON si.account_id = a.id
            LEFT JOIN cost_centers c ON si.cost_center_id = c.id
            WHERE si.company_id = ? AND si.issue_date >= ? AND si.issue_date <= ?
            "#,
        )
        .bind(company_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch invoices: {}", e)))?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_invoices")
            .record(start.elapsed().as_secs_f64());

        Ok(rows)
    }
}
