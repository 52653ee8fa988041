//! Scripted advisor for testing.
//!
//! A configurable implementation of the [`DecisionAdvisor`] port: responses
//! are queued up front and consumed in order, errors can be injected, and
//! every call is recorded for verification. Tests run without any real AI
//! service behind them.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::decision::{DecisionAnalysis, DecisionContext};
use crate::domain::factor::{FactorNode, FactorTree};
use crate::domain::voice::VoiceRecord;
use crate::ports::{AdvisorError, DecisionAdvisor};

/// Which advisor operation was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorCall {
    SuggestFactors,
    BreakDownFactor,
    Analyze,
}

/// Scripted advisor: pre-configured outcomes, consumed in order.
///
/// An operation whose queue is empty fails `Unavailable`, which keeps a
/// test honest about how many calls it expected.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAdvisor {
    suggestions: Arc<Mutex<VecDeque<Result<Vec<FactorNode>, AdvisorError>>>>,
    breakdowns: Arc<Mutex<VecDeque<Result<Vec<FactorNode>, AdvisorError>>>>,
    analyses: Arc<Mutex<VecDeque<Result<DecisionAnalysis, AdvisorError>>>>,
    calls: Arc<Mutex<Vec<AdvisorCall>>>,
}

impl ScriptedAdvisor {
    /// Creates an advisor with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful factor suggestion.
    pub fn with_suggestions(self, factors: Vec<FactorNode>) -> Self {
        self.suggestions.lock().unwrap().push_back(Ok(factors));
        self
    }

    /// Queues a failed factor suggestion.
    pub fn with_suggestions_error(self, error: AdvisorError) -> Self {
        self.suggestions.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a successful breakdown.
    pub fn with_breakdown(self, factors: Vec<FactorNode>) -> Self {
        self.breakdowns.lock().unwrap().push_back(Ok(factors));
        self
    }

    /// Queues a failed breakdown.
    pub fn with_breakdown_error(self, error: AdvisorError) -> Self {
        self.breakdowns.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a successful analysis.
    pub fn with_analysis(self, analysis: DecisionAnalysis) -> Self {
        self.analyses.lock().unwrap().push_back(Ok(analysis));
        self
    }

    /// Queues a failed analysis.
    pub fn with_analysis_error(self, error: AdvisorError) -> Self {
        self.analyses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<AdvisorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AdvisorCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, AdvisorError>>>) -> Result<T, AdvisorError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdvisorError::Unavailable("no scripted response".to_string())))
    }
}

#[async_trait]
impl DecisionAdvisor for ScriptedAdvisor {
    async fn suggest_factors(
        &self,
        _context: &DecisionContext,
    ) -> Result<Vec<FactorNode>, AdvisorError> {
        self.record(AdvisorCall::SuggestFactors);
        Self::next(&self.suggestions)
    }

    async fn break_down_factor(
        &self,
        _factor: &FactorNode,
        _context: &DecisionContext,
    ) -> Result<Vec<FactorNode>, AdvisorError> {
        self.record(AdvisorCall::BreakDownFactor);
        Self::next(&self.breakdowns)
    }

    async fn analyze(
        &self,
        _context: &DecisionContext,
        _value_tree: &FactorTree,
        _voices: &[VoiceRecord],
    ) -> Result<DecisionAnalysis, AdvisorError> {
        self.record(AdvisorCall::Analyze);
        Self::next(&self.analyses)
    }
}
