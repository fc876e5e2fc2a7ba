use common::{Bounds, Resettable};

pub(crate) type NodeId = usize;

// The root always occupies the first arena slot and is never released.
pub(crate) const ROOT: NodeId = 0;

/// A stored reference: the entity handle plus its bounds at insertion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item<Id> {
    pub id: Id,
    pub bounds: Bounds,
}

pub(crate) struct Node<Id> {
    pub(crate) region: Bounds,
    pub(crate) depth: u32,
    pub(crate) items: Vec<Item<Id>>,
    // Ordered by `Quadrant`: top-right, top-left, bottom-left, bottom-right
    pub(crate) children: Option<[NodeId; 4]>,
}

impl<Id> Node<Id> {
    pub(crate) fn new(region: Bounds, depth: u32) -> Self {
        Node {
            region,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    pub(crate) fn initialize(&mut self, region: Bounds, depth: u32) {
        debug_assert!(self.items.is_empty() && self.children.is_none());
        self.region = region;
        self.depth = depth;
    }

    pub(crate) fn is_prunable(&self) -> bool {
        self.children.is_none() && self.items.is_empty()
    }
}

// Keeps the item vector's allocation for the next checkout.
impl<Id> Resettable for Node<Id> {
    fn reset(&mut self) {
        self.region = Bounds::default();
        self.depth = 0;
        self.items.clear();
        self.children = None;
    }
}
