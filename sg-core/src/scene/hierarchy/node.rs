use super::{NodeId, Transform};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A scene node. It owns its [`Transform`] and carries the parent/child
/// links plus the dirty flags that downstream systems poll once per frame.
///
/// Nodes are handed out as `Arc<Node>` by the [`SceneGraph`] arena; the
/// transform navigates the hierarchy through [`NodeId`] handles only, so a
/// node that has been removed from the graph simply stops being reachable.
///
/// [`SceneGraph`]: super::SceneGraph
pub struct Node {
    id: NodeId,
    parent: Mutex<Option<NodeId>>,
    children: Mutex<Vec<NodeId>>,
    transform: Option<Transform>,
    transform_dirty: AtomicBool,
    bounding_volume_dirty: AtomicBool,
}

impl Node {
    pub(crate) fn new(id: NodeId, with_transform: bool) -> Self {
        Self {
            id,
            parent: Mutex::new(None),
            children: Mutex::new(Vec::new()),
            transform: with_transform.then(|| Transform::new(id)),
            // fresh nodes must be picked up by the next frame
            transform_dirty: AtomicBool::new(true),
            bounding_volume_dirty: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        *self.parent.lock()
    }

    /// Returns a point-in-time copy of the child list. Structural changes
    /// made after the copy is taken are not reflected in it.
    pub fn children(&self) -> Vec<NodeId> {
        self.children.lock().clone()
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn set_transform_dirty(&self) {
        self.transform_dirty.store(true, Ordering::Release);
    }

    pub fn is_transform_dirty(&self) -> bool {
        self.transform_dirty.load(Ordering::Acquire)
    }

    /// Clears the transform-dirty flag and returns whether it was set.
    pub fn take_transform_dirty(&self) -> bool {
        self.transform_dirty.swap(false, Ordering::AcqRel)
    }

    pub fn dirty_hierarchical_bounding_volume(&self) {
        self.bounding_volume_dirty.store(true, Ordering::Release);
    }

    pub fn is_bounding_volume_dirty(&self) -> bool {
        self.bounding_volume_dirty.load(Ordering::Acquire)
    }

    pub fn take_bounding_volume_dirty(&self) -> bool {
        self.bounding_volume_dirty.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn set_parent_id(&self, parent: Option<NodeId>) {
        *self.parent.lock() = parent;
    }

    pub(crate) fn add_child(&self, child: NodeId) {
        self.children.lock().push(child);
    }

    pub(crate) fn remove_child(&self, child: NodeId) {
        self.children.lock().retain(|&id| id != child);
    }
}
