//! A single node of the recursive decision-factor tree.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TreeError;
use crate::domain::foundation::{FactorId, Weight};

/// First-person narrative statements for the low/mid/high bands of a
/// factor's weight range, usually authored by the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStatements {
    pub low: String,
    pub mid: String,
    pub high: String,
}

/// One factor of a decision's value tree.
///
/// A node with no children is in *leaf state*: its weight is directly
/// settable. A node with children is in *derived state*: its weight always
/// equals the half-up-rounded mean of its direct children's weights and can
/// only change through them. Children are owned exclusively by their parent;
/// callers address descendants with an explicit id path from the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorNode {
    id: FactorId,
    pub name: String,
    weight: Weight,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub min_label: String,
    #[serde(default)]
    pub max_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_statements: Option<RangeStatements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_principle_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<FactorNode>,
}

impl FactorNode {
    /// Creates a leaf factor with the given identity, name, and weight.
    pub fn leaf(id: FactorId, name: impl Into<String>, weight: Weight) -> Self {
        Self {
            id,
            name: name.into(),
            weight,
            description: String::new(),
            category: String::new(),
            min_label: String::new(),
            max_label: String::new(),
            range_statements: None,
            first_principle_prompt: None,
            user_notes: None,
            children: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category (e.g. "Values", "Risks", "Goals").
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the labels for the 0 and 100 ends of the weight range.
    pub fn with_labels(mut self, min_label: impl Into<String>, max_label: impl Into<String>) -> Self {
        self.min_label = min_label.into();
        self.max_label = max_label.into();
        self
    }

    /// Sets the narrative range statements.
    pub fn with_range_statements(mut self, statements: RangeStatements) -> Self {
        self.range_statements = Some(statements);
        self
    }

    /// Sets the probing first-principle prompt.
    pub fn with_first_principle_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.first_principle_prompt = Some(prompt.into());
        self
    }

    /// Returns this factor's identifier.
    pub fn id(&self) -> &FactorId {
        &self.id
    }

    /// Returns the current weight.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the direct children, in order.
    pub fn children(&self) -> &[FactorNode] {
        &self.children
    }

    /// True when this factor has no children and its weight is directly
    /// settable.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sets the weight of a leaf factor.
    ///
    /// # Errors
    ///
    /// `TreeError::DerivedWeight` if this factor has children.
    pub fn set_weight(&mut self, weight: Weight) -> Result<(), TreeError> {
        if !self.is_leaf() {
            return Err(TreeError::DerivedWeight(self.id.clone()));
        }
        self.weight = weight;
        Ok(())
    }

    /// Replaces the user's reasoning note.
    pub fn set_user_notes(&mut self, notes: impl Into<String>) {
        self.user_notes = Some(notes.into());
    }

    /// Resolves the narrative statement for the current weight.
    ///
    /// Total over all weights and both node states: with range statements,
    /// the low band covers weights up to 33 and the high band from 67; the
    /// fallback phrases lean on the range labels, with a balanced middle.
    pub fn resolve_narrative(&self) -> String {
        let w = self.weight.value();
        if let Some(statements) = &self.range_statements {
            return if w <= 33 {
                statements.low.clone()
            } else if w >= 67 {
                statements.high.clone()
            } else {
                statements.mid.clone()
            };
        }

        if w <= 15 {
            format!("strongly prioritizes {}", self.min_label)
        } else if w <= 40 {
            format!("leans {}", self.min_label)
        } else if w >= 85 {
            format!("strongly prioritizes {}", self.max_label)
        } else if w >= 60 {
            format!("leans {}", self.max_label)
        } else {
            "balanced approach".to_string()
        }
    }

    pub(super) fn child_mut(&mut self, id: &FactorId) -> Option<&mut FactorNode> {
        self.children.iter_mut().find(|c| c.id == *id)
    }

    pub(super) fn child(&self, id: &FactorId) -> Option<&FactorNode> {
        self.children.iter().find(|c| c.id == *id)
    }

    /// Re-derives the weight from the direct children. No-op on a leaf, so
    /// a node emptied of children keeps its last computed weight.
    pub(super) fn recompute_weight(&mut self) {
        if let Some(mean) = Weight::mean_half_up(self.children.iter().map(|c| &c.weight)) {
            self.weight = mean;
        }
    }

    pub(super) fn replace_children(&mut self, children: Vec<FactorNode>) {
        self.children = children;
        self.recompute_weight();
    }

    pub(super) fn remove_child_by_id(&mut self, id: &FactorId) -> Result<(), TreeError> {
        let position = self
            .children
            .iter()
            .position(|c| c.id == *id)
            .ok_or_else(|| TreeError::UnknownFactor(id.clone()))?;
        self.children.remove(position);
        self.recompute_weight();
        Ok(())
    }

    /// Collects this node's id and every descendant id.
    pub(super) fn collect_ids(&self, into: &mut HashSet<FactorId>) {
        into.insert(self.id.clone());
        for child in &self.children {
            child.collect_ids(into);
        }
    }
}
