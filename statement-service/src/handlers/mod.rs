pub mod balance_sheet;
pub mod health;
pub mod income_statement;

pub use balance_sheet::balance_sheet;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use income_statement::income_statement;
