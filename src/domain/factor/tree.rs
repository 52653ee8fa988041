//! The decision-factor tree and its mutation algorithm.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{FactorNode, TreeError};
use crate::domain::foundation::{FactorId, Weight};

/// A complete factor tree rooted at a single [`FactorNode`].
///
/// Descendants are addressed by an id path: the sequence of child ids
/// leading from the root to the target, where the empty path is the root
/// itself. Parents are never back-referenced; every operation that needs
/// one receives the path explicitly.
///
/// Mutations re-derive the weight of every node on the path back to the
/// root, so a derived node's weight always equals the half-up mean of its
/// direct children. Mutations are synchronous and unsynchronized; sharing a
/// tree across threads needs external locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorTree {
    root: FactorNode,
}

impl FactorTree {
    /// Creates a tree from its root factor.
    pub fn new(root: FactorNode) -> Self {
        Self { root }
    }

    /// Returns the root factor.
    pub fn root(&self) -> &FactorNode {
        &self.root
    }

    /// Returns the factor at `path`, or `None` if the path dangles.
    pub fn get(&self, path: &[FactorId]) -> Option<&FactorNode> {
        let mut node = &self.root;
        for id in path {
            node = node.child(id)?;
        }
        Some(node)
    }

    /// Like [`get`](Self::get), but reports the first dangling path segment
    /// as `TreeError::UnknownFactor`.
    pub fn resolve(&self, path: &[FactorId]) -> Result<&FactorNode, TreeError> {
        let mut node = &self.root;
        for id in path {
            node = node
                .child(id)
                .ok_or_else(|| TreeError::UnknownFactor(id.clone()))?;
        }
        Ok(node)
    }

    /// Sets the weight of the leaf at `path` and re-derives every ancestor
    /// on the way back up.
    ///
    /// # Errors
    ///
    /// `TreeError::DerivedWeight` if the target has children — the update
    /// must be applied to one of its descendants instead;
    /// `TreeError::UnknownFactor` if the path dangles.
    pub fn update_weight(&mut self, path: &[FactorId], weight: Weight) -> Result<(), TreeError> {
        update_weight_at(&mut self.root, path, weight)
    }

    /// Replaces the children of the factor at `path`, moving it into (or
    /// keeping it in) derived state, and re-derives the path to the root.
    ///
    /// # Errors
    ///
    /// `TreeError::EmptyBreakdown` if `children` is empty;
    /// `TreeError::Cycle` if any id carried by the proposed children is
    /// already on the path from the root to the target, the target itself
    /// included; `TreeError::UnknownFactor` if the path dangles.
    pub fn attach_children(
        &mut self,
        path: &[FactorId],
        children: Vec<FactorNode>,
    ) -> Result<(), TreeError> {
        if children.is_empty() {
            return Err(TreeError::EmptyBreakdown);
        }
        let mut ancestors = HashSet::new();
        attach_children_at(&mut self.root, path, children, &mut ancestors)
    }

    /// Removes the child `child_id` from the factor at `parent_path`.
    ///
    /// A parent left with no children reverts to leaf state, keeping its
    /// last computed weight as its new directly-editable value; otherwise
    /// the parent and its ancestors re-derive.
    ///
    /// # Errors
    ///
    /// `TreeError::UnknownFactor` if the path dangles or the child is not
    /// present.
    pub fn remove_child(
        &mut self,
        parent_path: &[FactorId],
        child_id: &FactorId,
    ) -> Result<(), TreeError> {
        remove_child_at(&mut self.root, parent_path, child_id)
    }

    /// Replaces the user's reasoning note on the factor at `path`.
    ///
    /// # Errors
    ///
    /// `TreeError::UnknownFactor` if the path dangles.
    pub fn set_user_notes(
        &mut self,
        path: &[FactorId],
        notes: impl Into<String>,
    ) -> Result<(), TreeError> {
        let node = node_at_mut(&mut self.root, path)?;
        node.set_user_notes(notes);
        Ok(())
    }
}

fn node_at_mut<'a>(
    node: &'a mut FactorNode,
    path: &[FactorId],
) -> Result<&'a mut FactorNode, TreeError> {
    match path.split_first() {
        None => Ok(node),
        Some((next, rest)) => {
            let child = node
                .child_mut(next)
                .ok_or_else(|| TreeError::UnknownFactor(next.clone()))?;
            node_at_mut(child, rest)
        }
    }
}

fn update_weight_at(
    node: &mut FactorNode,
    path: &[FactorId],
    weight: Weight,
) -> Result<(), TreeError> {
    let Some((next, rest)) = path.split_first() else {
        return node.set_weight(weight);
    };
    let child = node
        .child_mut(next)
        .ok_or_else(|| TreeError::UnknownFactor(next.clone()))?;
    update_weight_at(child, rest, weight)?;
    node.recompute_weight();
    Ok(())
}

fn attach_children_at(
    node: &mut FactorNode,
    path: &[FactorId],
    children: Vec<FactorNode>,
    ancestors: &mut HashSet<FactorId>,
) -> Result<(), TreeError> {
    ancestors.insert(node.id().clone());

    let Some((next, rest)) = path.split_first() else {
        let mut proposed = HashSet::new();
        for child in &children {
            child.collect_ids(&mut proposed);
        }
        if let Some(duplicate) = proposed.intersection(ancestors).next() {
            return Err(TreeError::Cycle(duplicate.clone()));
        }
        node.replace_children(children);
        return Ok(());
    };

    let child = node
        .child_mut(next)
        .ok_or_else(|| TreeError::UnknownFactor(next.clone()))?;
    attach_children_at(child, rest, children, ancestors)?;
    node.recompute_weight();
    Ok(())
}

fn remove_child_at(
    node: &mut FactorNode,
    parent_path: &[FactorId],
    child_id: &FactorId,
) -> Result<(), TreeError> {
    let Some((next, rest)) = parent_path.split_first() else {
        return node.remove_child_by_id(child_id);
    };
    let child = node
        .child_mut(next)
        .ok_or_else(|| TreeError::UnknownFactor(next.clone()))?;
    remove_child_at(child, rest, child_id)?;
    node.recompute_weight();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> FactorId {
        FactorId::from_string(s)
    }

    fn factor(name: &str, weight: u8) -> FactorNode {
        FactorNode::leaf(id(name), name.to_string(), Weight::new(weight))
    }

    fn tree_with_children(weights: &[(&str, u8)]) -> FactorTree {
        let mut tree = FactorTree::new(factor("root", 50));
        let children = weights.iter().map(|(n, w)| factor(n, *w)).collect();
        tree.attach_children(&[], children).unwrap();
        tree
    }

    #[test]
    fn attach_children_rolls_up_half_up() {
        let tree = tree_with_children(&[("a", 10), ("b", 20), ("c", 30), ("d", 45)]);
        // mean 26.25 -> 26
        assert_eq!(tree.root().weight().value(), 26);

        let tree = tree_with_children(&[("a", 50), ("b", 51)]);
        // mean 50.5 -> 51
        assert_eq!(tree.root().weight().value(), 51);
    }

    #[test]
    fn attach_children_rejects_empty() {
        let mut tree = FactorTree::new(factor("root", 50));
        assert_eq!(
            tree.attach_children(&[], vec![]),
            Err(TreeError::EmptyBreakdown)
        );
    }

    #[test]
    fn attach_children_rejects_ancestor_id() {
        let mut tree = tree_with_children(&[("a", 40), ("b", 60)]);

        // Proposing the target's own id as a child.
        let result = tree.attach_children(&[id("a")], vec![factor("a", 10)]);
        assert_eq!(result, Err(TreeError::Cycle(id("a"))));

        // Proposing the root's id two levels down.
        let result = tree.attach_children(&[id("b")], vec![factor("root", 10)]);
        assert_eq!(result, Err(TreeError::Cycle(id("root"))));
    }

    #[test]
    fn attach_children_rejects_nested_ancestor_id() {
        let mut tree = tree_with_children(&[("a", 40)]);

        // The duplicate hides below the proposed child.
        let mut proposed = factor("fresh", 30);
        proposed.replace_children(vec![factor("root", 10)]);
        let result = tree.attach_children(&[id("a")], vec![proposed]);
        assert_eq!(result, Err(TreeError::Cycle(id("root"))));
    }

    #[test]
    fn update_weight_propagates_to_ancestors() {
        let mut tree = tree_with_children(&[("a", 40), ("b", 60)]);
        tree.attach_children(&[id("a")], vec![factor("a1", 20), factor("a2", 60)])
            .unwrap();
        // a = mean(20, 60) = 40, root = mean(40, 60) = 50
        assert_eq!(tree.get(&[id("a")]).unwrap().weight().value(), 40);
        assert_eq!(tree.root().weight().value(), 50);

        tree.update_weight(&[id("a"), id("a1")], Weight::new(100))
            .unwrap();
        // a = mean(100, 60) = 80, root = mean(80, 60) = 70
        assert_eq!(tree.get(&[id("a"), id("a1")]).unwrap().weight().value(), 100);
        assert_eq!(tree.get(&[id("a")]).unwrap().weight().value(), 80);
        assert_eq!(tree.root().weight().value(), 70);
    }

    #[test]
    fn update_weight_refuses_derived_target() {
        let mut tree = tree_with_children(&[("a", 40), ("b", 60)]);
        tree.attach_children(&[id("a")], vec![factor("a1", 20)])
            .unwrap();

        // "a" is derived now; the update must land on one of its leaves.
        let result = tree.update_weight(&[id("a")], Weight::new(10));
        assert_eq!(result, Err(TreeError::DerivedWeight(id("a"))));

        let result = tree.update_weight(&[], Weight::new(10));
        assert_eq!(result, Err(TreeError::DerivedWeight(id("root"))));
    }

    #[test]
    fn update_weight_reports_dangling_path() {
        let mut tree = tree_with_children(&[("a", 40)]);
        let result = tree.update_weight(&[id("missing")], Weight::new(10));
        assert_eq!(result, Err(TreeError::UnknownFactor(id("missing"))));
    }

    #[test]
    fn remove_child_rederives_remaining_siblings() {
        let mut tree = tree_with_children(&[("a", 10), ("b", 20), ("c", 90)]);
        tree.remove_child(&[], &id("c")).unwrap();
        // mean(10, 20) = 15
        assert_eq!(tree.root().weight().value(), 15);
        assert_eq!(tree.root().children().len(), 2);
    }

    #[test]
    fn remove_last_child_reverts_to_editable_leaf() {
        let mut tree = tree_with_children(&[("a", 40), ("b", 80)]);
        // root = mean(40, 80) = 60
        assert_eq!(tree.root().weight().value(), 60);

        tree.remove_child(&[], &id("a")).unwrap();
        // root = mean(80) = 80
        assert_eq!(tree.root().weight().value(), 80);

        tree.remove_child(&[], &id("b")).unwrap();
        // Leaf again, keeping the last computed weight.
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().weight().value(), 80);

        // Directly settable once more.
        tree.update_weight(&[], Weight::new(5)).unwrap();
        assert_eq!(tree.root().weight().value(), 5);
    }

    #[test]
    fn remove_child_of_nested_parent_rolls_up_the_path() {
        let mut tree = tree_with_children(&[("a", 40), ("b", 60)]);
        tree.attach_children(&[id("a")], vec![factor("a1", 0), factor("a2", 100)])
            .unwrap();
        // a = 50, root = mean(50, 60) = 55
        assert_eq!(tree.root().weight().value(), 55);

        tree.remove_child(&[id("a")], &id("a1")).unwrap();
        // a = 100, root = mean(100, 60) = 80
        assert_eq!(tree.get(&[id("a")]).unwrap().weight().value(), 100);
        assert_eq!(tree.root().weight().value(), 80);
    }

    #[test]
    fn remove_child_reports_missing_child() {
        let mut tree = tree_with_children(&[("a", 40)]);
        let result = tree.remove_child(&[], &id("ghost"));
        assert_eq!(result, Err(TreeError::UnknownFactor(id("ghost"))));
    }

    #[test]
    fn set_user_notes_reaches_nested_factors() {
        let mut tree = tree_with_children(&[("a", 40)]);
        tree.set_user_notes(&[id("a")], "grounded in the runway math")
            .unwrap();
        assert_eq!(
            tree.get(&[id("a")]).unwrap().user_notes.as_deref(),
            Some("grounded in the runway math")
        );
    }

    #[test]
    fn get_returns_none_for_dangling_path() {
        let tree = tree_with_children(&[("a", 40)]);
        assert!(tree.get(&[id("a"), id("deeper")]).is_none());
    }
}
