//! Account type classification.
//!
//! Account type labels are free text maintained by users in two languages
//! with inconsistent spellings; both statement builders share this single
//! synonym table so the lists cannot drift apart.

use serde::{Deserialize, Serialize};

/// Semantic account categories with their normal balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Asset => "asset",
            Category::Liability => "liability",
            Category::Equity => "equity",
            Category::Revenue => "revenue",
            Category::Expense => "expense",
        }
    }

    /// Asset and expense accounts increase on the debit side; the rest
    /// increase on the credit side.
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, Category::Asset | Category::Expense)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const ASSET_LABELS: &[&str] = &["اصل", "أصل", "asset", "assets"];
const LIABILITY_LABELS: &[&str] = &["التزام", "الالتزام", "liability", "liabilities"];
const EQUITY_LABELS: &[&str] = &[
    "حقوق ملكية",
    "حقوق الملكية",
    "equity",
    "owner's equity",
    "capital",
];
const REVENUE_LABELS: &[&str] = &["ايراد", "إيراد", "revenue", "income"];
const EXPENSE_LABELS: &[&str] = &["مصروف", "مصاريف", "expense", "payroll", "deduction"];

/// Map a free-text account type label to its category.
///
/// Matching is case-insensitive over the literal synonym lists; spelling or
/// spacing variants outside the lists return `None` and are surfaced by the
/// aggregator as unclassified rows rather than silently dropped.
pub fn classify(label: &str) -> Option<Category> {
    let normalized = label.trim().to_lowercase();
    let label = normalized.as_str();

    if ASSET_LABELS.contains(&label) {
        Some(Category::Asset)
    } else if LIABILITY_LABELS.contains(&label) {
        Some(Category::Liability)
    } else if EQUITY_LABELS.contains(&label) {
        Some(Category::Equity)
    } else if REVENUE_LABELS.contains(&label) {
        Some(Category::Revenue)
    } else if EXPENSE_LABELS.contains(&label) {
        Some(Category::Expense)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_english_labels() {
        assert_eq!(classify("asset"), Some(Category::Asset));
        assert_eq!(classify("liabilities"), Some(Category::Liability));
        assert_eq!(classify("owner's equity"), Some(Category::Equity));
        assert_eq!(classify("income"), Some(Category::Revenue));
        assert_eq!(classify("payroll"), Some(Category::Expense));
    }

    #[test]
    fn test_classify_arabic_labels() {
        assert_eq!(classify("أصل"), Some(Category::Asset));
        assert_eq!(classify("التزام"), Some(Category::Liability));
        assert_eq!(classify("حقوق الملكية"), Some(Category::Equity));
        assert_eq!(classify("إيراد"), Some(Category::Revenue));
        assert_eq!(classify("مصاريف"), Some(Category::Expense));
    }

    #[test]
    fn test_classify_is_case_insensitive_and_trims() {
        assert_eq!(classify("ASSET"), Some(Category::Asset));
        assert_eq!(classify("  Revenue  "), Some(Category::Revenue));
        assert_eq!(classify("Capital"), Some(Category::Equity));
    }

    #[test]
    fn test_unknown_label_is_unclassified() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("misc"), None);
        // Spelling variants outside the literal lists are not guessed at
        assert_eq!(classify("assetts"), None);
    }

    #[test]
    fn test_normal_balance_side() {
        assert!(Category::Asset.is_debit_normal());
        assert!(Category::Expense.is_debit_normal());
        assert!(!Category::Liability.is_debit_normal());
        assert!(!Category::Equity.is_debit_normal());
        assert!(!Category::Revenue.is_debit_normal());
    }
}
