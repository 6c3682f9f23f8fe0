pub mod statements;

pub use statements::{
    BalanceChartData, BalanceLine, BalanceSheetParams, BalanceSheetResponse, BalanceSheetStats,
    ChartSlice, IncomeChartData, IncomeLine, IncomeStatementParams, IncomeStatementResponse,
    IncomeStatementStats, MonthlyTrendPoint, Period,
};
