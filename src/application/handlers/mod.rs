//! Command handlers orchestrating the advisor, the factor tree, and the
//! repositories.

mod analyze_decision;
mod break_down_factor;
mod generate_factors;

pub use analyze_decision::{
    AnalyzeDecisionCommand, AnalyzeDecisionHandler, AnalyzeDecisionResult, AnalyzeError,
};
pub use break_down_factor::{
    BreakDownError, BreakDownFactorCommand, BreakDownFactorHandler, BreakDownOutcome,
};
pub use generate_factors::{GenerateFactorsCommand, GenerateFactorsHandler};
