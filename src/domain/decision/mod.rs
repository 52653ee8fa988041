//! Decision module - Saved decisions and their analysis.

mod analysis;
mod context;
mod record;

pub use analysis::{
    AgentPerspective, Assumption, Contingency, DecisionAnalysis, ExecutiveSummary,
    ImplementationPlan, InferredContext, RiskLevel, ShadowDecision, StrategicPillar, Tradeoff,
    Verdict,
};
pub use context::{DecisionContext, DecisionFile};
pub use record::DecisionRecord;
