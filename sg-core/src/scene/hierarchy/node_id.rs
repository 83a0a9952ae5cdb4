use std::num::NonZeroU32;

/// A stable handle addressing a single arena slot of a
/// [`SceneGraph`](super::SceneGraph).
///
/// The id is the slot index shifted up by one, so `Option<NodeId>` stays as
/// small as the id itself. A freed slot hands the same id to the node that
/// recycles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        let id = u32::try_from(index + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .expect("failed to allocate node id; node id overflow");
        Self(id)
    }

    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}
