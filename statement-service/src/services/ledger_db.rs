//! Ledger store gateway (Postgres): accounts, cost centers, journal entries.

use chrono::NaiveDate;
use metrics::histogram;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::models::{Account, CostCenter, JournalEntry};

/// Connection pool wrapper for the ledger store.
#[derive(Clone)]
pub struct LedgerDb {
    pool: PgPool,
}

impl LedgerDb {
    /// Create a new connection pool against the ledger store.
    #[instrument(skip(database_url), fields(service = "statement-service"))]
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to ledger store (PostgreSQL)"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to connect to ledger store: {}", e))
            })?;

        info!("Ledger store connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check ledger store health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Chart of accounts for a company, in account-code order.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_accounts(&self, company_id: i64) -> Result<Vec<Account>, AppError> {
        let start = Instant::now();

        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_code, account_name, "type",
                   COALESCE(opening_balance, 0) AS opening_balance, balance_type
            FROM accounts
            WHERE company_id = $1
            ORDER BY account_code
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to fetch accounts: {}", e)))?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_accounts")
            .record(start.elapsed().as_secs_f64());

        Ok(accounts)
    }

    /// Cost centers for a company, in center-code order.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_cost_centers(&self, company_id: i64) -> Result<Vec<CostCenter>, AppError> {
        let start = Instant::now();

        let centers = sqlx::query_as::<_, CostCenter>(
            r#"
            SELECT id, center_code, center_name
            FROM cost_centers
            WHERE company_id = $1
            ORDER BY center_code
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch cost centers: {}", e))
        })?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_cost_centers")
            .record(start.elapsed().as_secs_f64());

        Ok(centers)
    }

    /// Journal entries for a company within an inclusive date range.
    #[instrument(skip(self), fields(company_id = company_id))]
    pub async fn fetch_journal_entries(
        &self,
        company_id: i64,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, AppError> {
        let start = Instant::now();

        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT id, account_id, cost_center_id,
                   COALESCE(debit, 0) AS debit, COALESCE(credit, 0) AS credit,
                   entry_date, source_type
            FROM journal_entries
            WHERE company_id = $1
              AND entry_date >= $2
              AND entry_date <= $3
            "#,
        )
        .bind(company_id)
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to fetch journal entries: {}", e))
        })?;

        histogram!("db_query_duration_seconds", "operation" => "fetch_journal_entries")
            .record(start.elapsed().as_secs_f64());

        Ok(entries)
    }
}
