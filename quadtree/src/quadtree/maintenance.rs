use super::*;
use common::Resettable;
use tracing::debug;

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport,
{
    /// Drop every item and hand all child nodes back to the pool.
    pub fn clear(&mut self) {
        self.nodes[ROOT].items.clear();
        if let Some(children) = self.nodes[ROOT].children.take() {
            for child in children {
                self.release_subtree(child);
            }
        }
        self.len = 0;
    }

    /// Clear, then resize the root, e.g. after the world bounds changed.
    pub fn clear_with_region(&mut self, region: Bounds) -> QuadtreeResult<()> {
        validate_region(&region)?;
        self.clear();
        debug!(
            left = region.left,
            top = region.top,
            width = region.width,
            height = region.height,
            "resizing quadtree root"
        );
        self.nodes[ROOT].region = region;
        Ok(())
    }

    pub(crate) fn acquire_node(&mut self, region: Bounds, depth: u32) -> NodeId {
        match self.free_nodes.pop() {
            Some(node_id) => {
                self.nodes[node_id].initialize(region, depth);
                node_id
            }
            None => {
                self.nodes.push(Node::new(region, depth));
                self.nodes.len() - 1
            }
        }
    }

    // The caller must have detached `node_id` from its parent already.
    pub(crate) fn release_node(&mut self, node_id: NodeId) {
        debug_assert!(node_id != ROOT);
        self.nodes[node_id].reset();
        self.free_nodes.push(node_id);
    }

    fn release_subtree(&mut self, node_id: NodeId) {
        if let Some(children) = self.nodes[node_id].children.take() {
            for child in children {
                self.release_subtree(child);
            }
        }
        self.release_node(node_id);
    }

    /// Nodes currently part of the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_nodes.len()
    }

    /// Released nodes waiting to be reused.
    pub fn pooled_node_count(&self) -> usize {
        self.free_nodes.len()
    }

    pub fn all_node_regions(&self, regions: &mut Vec<Bounds>) {
        self.visit(ROOT, &mut |node| regions.push(node.region));
    }

    pub fn all_items(&self, items: &mut Vec<Item<Id>>) {
        self.visit(ROOT, &mut |node| items.extend_from_slice(&node.items));
    }

    fn visit<'a, F>(&'a self, node_id: NodeId, f: &mut F)
    where
        F: FnMut(&'a Node<Id>),
    {
        let node = &self.nodes[node_id];
        f(node);
        if let Some(children) = node.children {
            for child in children {
                self.visit(child, f);
            }
        }
    }

    fn node_at(&self, path: &[Quadrant]) -> Option<&Node<Id>> {
        let mut node = &self.nodes[ROOT];
        for quadrant in path {
            node = &self.nodes[node.children?[quadrant.index()]];
        }
        Some(node)
    }

    /// Items stored directly in the node reached by following `path` from
    /// the root, or `None` if that node does not exist.
    pub fn node_items(&self, path: &[Quadrant]) -> Option<&[Item<Id>]> {
        self.node_at(path).map(|node| node.items.as_slice())
    }

    pub fn node_region(&self, path: &[Quadrant]) -> Option<Bounds> {
        self.node_at(path).map(|node| node.region)
    }

    pub fn has_children(&self, path: &[Quadrant]) -> bool {
        self.node_at(path)
            .is_some_and(|node| node.children.is_some())
    }

    /// Path from the root to the node holding `id`.
    pub fn locate(&self, id: Id) -> Option<Vec<Quadrant>> {
        let mut path = Vec::new();
        self.locate_from(ROOT, id, &mut path).then_some(path)
    }

    fn locate_from(&self, node_id: NodeId, id: Id, path: &mut Vec<Quadrant>) -> bool {
        let node = &self.nodes[node_id];
        if node.items.iter().any(|item| item.id == id) {
            return true;
        }
        let Some(children) = node.children else {
            return false;
        };
        for quadrant in Quadrant::ALL {
            path.push(quadrant);
            if self.locate_from(children[quadrant.index()], id, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}
