//! The advisor's structured analysis of a decision.
//!
//! These are the typed shapes the generative-AI collaborator returns; the
//! core neither builds the prompt that produces them nor parses the
//! service's wire format.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Weight;

/// Situation / Complication / Resolution framing of the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub situation: String,
    pub complication: String,
    pub resolution: String,
}

/// One pillar of the strategic rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategicPillar {
    pub title: String,
    pub content: String,
}

/// Concrete execution guidance for the recommended option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub immediate_actions: Vec<String>,
    pub resource_implications: String,
    pub communication_strategy: String,
}

/// What the advisor inferred about the decision's setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredContext {
    pub stakes: String,
    pub time_horizon: String,
    pub key_constraints: Vec<String>,
}

/// Severity band for an assumption's downside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// A load-bearing assumption behind the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assumption {
    pub statement: String,
    pub validity_score: Weight,
    pub risk_level: RiskLevel,
    pub impact_if_false: String,
}

/// A gain/loss pair the recommendation trades on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub gain: String,
    pub loss: String,
    pub impact_score: Weight,
    pub winner: String,
}

/// An agent's stance on the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approve,
    Reject,
    Caution,
    Dissent,
}

/// One simulated perspective, standard archetype or the user's own custom
/// voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPerspective {
    pub name: String,
    pub archetype: String,
    pub verdict: Verdict,
    pub reasoning: String,
    pub key_concern: String,
    pub score: Weight,
    #[serde(default)]
    pub is_custom: bool,
}

/// A condition under which the decision breaks, with its mitigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contingency {
    pub trigger_condition: String,
    pub probability: String,
    pub impact: String,
    pub mitigation_plan: String,
}

/// The strongest rejected counter-option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowDecision {
    pub alternative_option: String,
    pub reasoning: String,
    pub why_rejected: String,
}

/// The advisor's full analysis of a decision against the user's weighted
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionAnalysis {
    pub executive_summary: ExecutiveSummary,
    pub strategic_pillars: Vec<StrategicPillar>,
    pub implementation_plan: ImplementationPlan,
    pub confidence_score: Weight,
    pub values_alignment_score: Weight,
    pub inferred_context: InferredContext,
    /// Compressed essential logic of the recommendation.
    pub summary: String,
    pub assumptions: Vec<Assumption>,
    pub tradeoffs: Vec<Tradeoff>,
    pub agents: Vec<AgentPerspective>,
    pub contingencies: Vec<Contingency>,
    pub shadow_decision: ShadowDecision,
}
