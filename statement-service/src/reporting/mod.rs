//! Financial statement computation: classification, aggregation and the
//! two statement builders. Everything here is a pure function of rows
//! already fetched by the database gateways.

pub mod aggregator;
pub mod balance;
pub mod classifier;
pub mod income;

pub use aggregator::{StatementAggregator, StatementKind, EPSILON};

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Account, CostCenter, Source};

/// Accounts and cost centers resolved once per request, before ingestion.
#[derive(Debug, Default)]
pub struct ReferenceData {
    accounts: Vec<Account>,
    by_id: HashMap<i64, usize>,
    centers: HashMap<i64, CostCenter>,
}

impl ReferenceData {
    pub fn new(accounts: Vec<Account>, centers: Vec<CostCenter>) -> Self {
        let by_id = accounts
            .iter()
            .enumerate()
            .map(|(idx, account)| (account.id, idx))
            .collect();
        let centers = centers.into_iter().map(|c| (c.id, c)).collect();
        Self {
            accounts,
            by_id,
            centers,
        }
    }

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.by_id.get(&id).map(|idx| &self.accounts[*idx])
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn center_name(&self, id: i64) -> Option<&str> {
        self.centers.get(&id).map(|c| c.center_name.as_str())
    }
}

/// A source whose fetch failed. The report still returns whatever the
/// other sources produced; failures are carried in the response so
/// callers can tell degradation from an empty period.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub source: Source,
    pub error: String,
}

impl SourceFailure {
    pub fn new(source: Source, error: impl ToString) -> Self {
        Self {
            source,
            error: error.to_string(),
        }
    }
}
