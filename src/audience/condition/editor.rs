// SPDX-License-Identifier: MIT

//! Tree surgery for condition authoring
//!
//! Every operation takes the current tree by reference and returns a new one.

use uuid::Uuid;

use super::ast::{ConditionLeaf, ConditionNode, GroupNode, GroupOperator, NodeKind};
use super::MAX_DEPTH;
use crate::error::{Result, RulesError};

/// Kind of node to create with [`add_child`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewNode {
    Group,
    Condition,
}

/// Generate a fresh node id
pub fn generate_node_id() -> String {
    format!("node_{}", Uuid::new_v4().simple())
}

pub fn find_node<'a>(root: &'a ConditionNode, id: &str) -> Option<&'a ConditionNode> {
    if root.id == id {
        return Some(root);
    }
    root.children().iter().find_map(|child| find_node(child, id))
}

/// Nesting level of `id` below `root` (the root is level 0)
pub fn depth_of(root: &ConditionNode, id: &str) -> Option<usize> {
    if root.id == id {
        return Some(0);
    }
    root.children()
        .iter()
        .find_map(|child| depth_of(child, id).map(|d| d + 1))
}

/// Apply `update` to the first node with `id`
pub fn update_node<F>(root: &ConditionNode, id: &str, update: F) -> Result<ConditionNode>
where
    F: FnOnce(&mut ConditionNode),
{
    let mut tree = root.clone();
    let node = find_node_mut(&mut tree, id).ok_or_else(|| RulesError::node_not_found(id))?;
    update(node);
    Ok(tree)
}

/// Remove every descendant with `id`; the root itself is never removed.
pub fn delete_node(root: &ConditionNode, id: &str) -> ConditionNode {
    let mut tree = root.clone();
    prune(&mut tree, id);
    tree
}

/// Append a new empty node under the group `parent_id`.
///
/// Returns the updated tree and the id of the created node. New groups start
/// as `AND` with no children.
pub fn add_child(
    root: &ConditionNode,
    parent_id: &str,
    kind: NewNode,
) -> Result<(ConditionNode, String)> {
    let parent_depth =
        depth_of(root, parent_id).ok_or_else(|| RulesError::node_not_found(parent_id))?;
    let child_depth = parent_depth + 1;
    if child_depth > MAX_DEPTH {
        return Err(RulesError::DepthExceeded { limit: MAX_DEPTH });
    }

    let mut tree = root.clone();
    let parent =
        find_node_mut(&mut tree, parent_id).ok_or_else(|| RulesError::node_not_found(parent_id))?;
    let NodeKind::Group(group) = &mut parent.kind else {
        return Err(RulesError::NotAGroup {
            id: parent_id.to_string(),
        });
    };

    let id = generate_node_id();
    let child = ConditionNode {
        id: id.clone(),
        kind: match kind {
            NewNode::Group => NodeKind::Group(GroupNode {
                operator: Some(GroupOperator::And),
                children: Some(Vec::new()),
            }),
            NewNode::Condition => NodeKind::Condition(ConditionLeaf::default()),
        },
        depth: Some(child_depth as u32),
    };
    group.children.get_or_insert_with(Vec::new).push(child);

    log::debug!("Added {:?} node {} under {}", kind, id, parent_id);
    Ok((tree, id))
}

fn find_node_mut<'a>(node: &'a mut ConditionNode, id: &str) -> Option<&'a mut ConditionNode> {
    if node.id == id {
        return Some(node);
    }
    match &mut node.kind {
        NodeKind::Group(GroupNode {
            children: Some(children),
            ..
        }) => children
            .iter_mut()
            .find_map(|child| find_node_mut(child, id)),
        _ => None,
    }
}

fn prune(node: &mut ConditionNode, id: &str) {
    if let NodeKind::Group(GroupNode {
        children: Some(children),
        ..
    }) = &mut node.kind
    {
        children.retain(|child| child.id != id);
        for child in children.iter_mut() {
            prune(child, id);
        }
    }
}
