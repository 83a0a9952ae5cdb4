use super::{Node, NodeId};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneGraphError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("making {parent:?} the parent of {node:?} would create a cycle")]
    CycleDetected { node: NodeId, parent: NodeId },
}

/// An arena of scene nodes addressed by stable [`NodeId`] handles.
///
/// A handle is its slot index: removal parks the slot on a free list and a
/// later insert recycles it, id included. Lookups clone the node's `Arc`
/// under a briefly-held read lock, so no lock on the arena is ever held
/// across the recursive matrix or invalidation walks. Transform mutation
/// and matrix reads may come from any thread; structural changes
/// (create/remove/reparent) are expected to be issued from a single logic
/// thread.
pub struct SceneGraph {
    nodes: RwLock<Vec<Option<Arc<Node>>>>,
    free_slots: Mutex<Vec<usize>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::with_capacity(1024)),
            free_slots: Mutex::new(Vec::new()),
        }
    }

    /// Creates a detached node with an identity transform and an invalid
    /// model matrix cache.
    pub fn create_node(&self) -> NodeId {
        self.insert_node(true)
    }

    /// Creates a detached node that carries no transform at all. Such a
    /// node contributes nothing to its descendants' world matrices and is
    /// skipped by invalidation.
    pub fn create_node_without_transform(&self) -> NodeId {
        self.insert_node(false)
    }

    pub fn node(&self, id: NodeId) -> Option<Arc<Node>> {
        self.nodes.read().get(id.index()).and_then(|slot| slot.clone())
    }

    /// Re-parents `node_id` under `parent_id`, or detaches it when
    /// `parent_id` is `None`, then invalidates the subtree's cached world
    /// matrices.
    pub fn set_parent(
        &self,
        node_id: NodeId,
        parent_id: Option<NodeId>,
    ) -> Result<(), SceneGraphError> {
        let node = self
            .node(node_id)
            .ok_or(SceneGraphError::NodeNotFound(node_id))?;

        let new_parent = match parent_id {
            Some(parent_id) => {
                let parent = self
                    .node(parent_id)
                    .ok_or(SceneGraphError::NodeNotFound(parent_id))?;

                let mut ancestor = Some(parent_id);
                while let Some(ancestor_id) = ancestor {
                    if ancestor_id == node_id {
                        return Err(SceneGraphError::CycleDetected {
                            node: node_id,
                            parent: parent_id,
                        });
                    }
                    ancestor = self.node(ancestor_id).and_then(|node| node.parent());
                }

                Some(parent)
            }
            None => None,
        };

        if let Some(old_parent_id) = node.parent() {
            if let Some(old_parent) = self.node(old_parent_id) {
                old_parent.remove_child(node_id);
            }
        }

        node.set_parent_id(parent_id);

        if let Some(new_parent) = new_parent {
            new_parent.add_child(node_id);
        }

        // the node keeps its local fields, but its world matrix now depends
        // on a different ancestor chain
        if let Some(transform) = node.transform() {
            transform.invalidate(self, false);
        }

        Ok(())
    }

    /// Removes a node and its whole subtree, parking their slots on the
    /// free list for reuse. Threads still holding an `Arc` to a removed
    /// node keep a usable node, but it is no longer reachable through the
    /// graph.
    pub fn remove_node(&self, node_id: NodeId) -> Result<(), SceneGraphError> {
        let node = self
            .node(node_id)
            .ok_or(SceneGraphError::NodeNotFound(node_id))?;

        if let Some(parent_id) = node.parent() {
            if let Some(parent) = self.node(parent_id) {
                parent.remove_child(node_id);
            }
        }

        let mut pending = vec![node_id];

        while let Some(id) = pending.pop() {
            let removed = self
                .nodes
                .write()
                .get_mut(id.index())
                .and_then(Option::take);

            if let Some(removed) = removed {
                pending.extend(removed.children());
                self.free_slots.lock().push(id.index());
            }
        }

        Ok(())
    }

    fn insert_node(&self, with_transform: bool) -> NodeId {
        let free_slot = self.free_slots.lock().pop();
        let mut nodes = self.nodes.write();

        let index = match free_slot {
            Some(index) => index,
            None => {
                nodes.push(None);
                nodes.len() - 1
            }
        };

        let id = NodeId::from_index(index);
        nodes[index] = Some(Arc::new(Node::new(id, with_transform)));

        id
    }
}
