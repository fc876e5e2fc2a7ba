use super::*;
use tracing::debug;

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport,
{
    /// Remove the item stored for `entity`, located with the entity's current
    /// bounds. Returns whether anything was removed.
    ///
    /// Emptied child quadrants are returned to the pool, but the remaining
    /// items are never moved around.
    pub fn remove<E>(&mut self, entity: &E) -> bool
    where
        E: Collidable<Id = Id> + ?Sized,
    {
        let Some(bounds) = self.index_bounds(entity) else {
            return false;
        };
        let removed = self.remove_from(ROOT, entity.id(), &bounds);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_from(&mut self, node_id: NodeId, id: Id, bounds: &Bounds) -> bool {
        if let Some(children) = self.nodes[node_id].children {
            if let Some(quadrant) = Quadrant::classify(&self.nodes[node_id].region, bounds) {
                if self.remove_from(children[quadrant.index()], id, bounds) {
                    self.prune_children(node_id);
                    return true;
                }
            }
        }

        let items = &mut self.nodes[node_id].items;
        match items.iter().position(|item| item.id == id) {
            Some(pos) => {
                items.remove(pos);
                true
            }
            None => false,
        }
    }

    // Children come and go as a group of four, so they are only released
    // once every one of them is an empty leaf.
    fn prune_children(&mut self, node_id: NodeId) {
        let Some(children) = self.nodes[node_id].children else {
            return;
        };
        if !children.iter().all(|&child| self.nodes[child].is_prunable()) {
            return;
        }
        debug!(
            node = node_id,
            depth = self.nodes[node_id].depth,
            "pruning empty quadrants"
        );
        self.nodes[node_id].children = None;
        for child in children {
            self.release_node(child);
        }
    }
}
