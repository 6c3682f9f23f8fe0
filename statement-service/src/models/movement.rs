//! The normalized contract every row ingestor produces.

use crate::reporting::classifier::Category;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Report source identities. Journal entries additionally carry their own
/// free-text `source_type` tag; the other four always report under their
/// fixed tag below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Journal,
    Expense,
    Deduction,
    Payroll,
    Invoice,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Journal => "journal",
            Source::Expense => "expense",
            Source::Deduction => "deduction",
            Source::Payroll => "payroll",
            Source::Invoice => "invoice",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query-parameter source filter: `all` runs every ingestor, a named
/// source runs only that one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    #[default]
    All,
    Journal,
    Expense,
    Deduction,
    Payroll,
    Invoice,
}

impl SourceFilter {
    pub fn includes(self, source: Source) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Journal => source == Source::Journal,
            SourceFilter::Expense => source == Source::Expense,
            SourceFilter::Deduction => source == Source::Deduction,
            SourceFilter::Payroll => source == Source::Payroll,
            SourceFilter::Invoice => source == Source::Invoice,
        }
    }
}

/// Cost-center reference attached to a movement, with the display name
/// already resolved (falling back to "Unknown" when the center is gone).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCenterRef {
    pub id: i64,
    pub name: String,
}

/// One source row, normalized. The signed `net` is already expressed in
/// the target category's "increase" direction; the per-source sign
/// conventions live in the ingestors, never in the aggregator.
#[derive(Debug, Clone)]
pub struct NormalizedMovement {
    pub account_id: Option<i64>,
    pub account_code: String,
    pub account_name: String,
    pub account_type: String,
    pub category: Category,
    pub debit: Decimal,
    pub credit: Decimal,
    pub net: Decimal,
    pub cost_center: Option<CostCenterRef>,
    pub source: String,
    pub date: Option<NaiveDate>,
}
