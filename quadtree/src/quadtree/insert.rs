use super::*;
use common::SceneNode;
use tracing::debug;

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport,
{
    /// Insert a reference to `entity`. Returns `false` (and stores nothing)
    /// when the entity has no usable bounds.
    pub fn insert<E>(&mut self, entity: &E) -> bool
    where
        E: Collidable<Id = Id> + ?Sized,
    {
        let Some(bounds) = self.index_bounds(entity) else {
            return false;
        };
        self.insert_item(
            ROOT,
            Item {
                id: entity.id(),
                bounds,
            },
        );
        self.len += 1;
        true
    }

    /// Insert every collidable entity of a scene graph, depth first.
    ///
    /// Kinematic entities and whole kinematic containers are skipped, and
    /// containers are only inserted themselves when they carry an entity.
    /// The root is walked but never inserted. Returns the number of entities
    /// added.
    pub fn insert_all<E>(&mut self, root: &SceneNode<E>) -> usize
    where
        E: Collidable<Id = Id>,
    {
        match root {
            SceneNode::Leaf(_) => self.insert_scene_node(root),
            SceneNode::Container {
                kinematic: true, ..
            } => 0,
            SceneNode::Container { children, .. } => children
                .iter()
                .map(|child| self.insert_scene_node(child))
                .sum(),
        }
    }

    fn insert_scene_node<E>(&mut self, node: &SceneNode<E>) -> usize
    where
        E: Collidable<Id = Id>,
    {
        match node {
            SceneNode::Leaf(entity) => self.insert_unless_kinematic(entity),
            SceneNode::Container {
                entity,
                kinematic,
                children,
            } => {
                if *kinematic {
                    return 0;
                }
                let own = entity
                    .as_ref()
                    .map_or(0, |entity| self.insert_unless_kinematic(entity));
                own + children
                    .iter()
                    .map(|child| self.insert_scene_node(child))
                    .sum::<usize>()
            }
        }
    }

    fn insert_unless_kinematic<E>(&mut self, entity: &E) -> usize
    where
        E: Collidable<Id = Id>,
    {
        if entity.is_kinematic() {
            return 0;
        }
        usize::from(self.insert(entity))
    }

    // Descend while a single child holds the item, then store it and split
    // the receiving node if it overflowed.
    fn insert_item(&mut self, start: NodeId, item: Item<Id>) {
        let mut node_id = start;
        while let Some(children) = self.nodes[node_id].children {
            match Quadrant::classify(&self.nodes[node_id].region, &item.bounds) {
                Some(quadrant) => node_id = children[quadrant.index()],
                None => break,
            }
        }

        let node = &mut self.nodes[node_id];
        node.items.push(item);
        if node.items.len() <= self.config.node_capacity || node.depth >= self.config.max_depth {
            return;
        }
        if node.children.is_none() {
            self.split(node_id);
        }
        self.redistribute(node_id);
    }

    fn split(&mut self, node_id: NodeId) {
        let region = self.nodes[node_id].region;
        let depth = self.nodes[node_id].depth + 1;
        let children = Quadrant::ALL.map(|quadrant| self.acquire_node(quadrant.region_of(&region), depth));
        debug!(
            node = node_id,
            depth,
            items = self.nodes[node_id].items.len(),
            "splitting quadtree node"
        );
        self.nodes[node_id].children = Some(children);
    }

    // Push every item that fits a single child down one level. Items that
    // straddle a midline stay. Running it again on a settled node moves nothing.
    fn redistribute(&mut self, node_id: NodeId) {
        let Some(children) = self.nodes[node_id].children else {
            return;
        };
        let region = self.nodes[node_id].region;
        let mut i = 0;
        while i < self.nodes[node_id].items.len() {
            let bounds = self.nodes[node_id].items[i].bounds;
            match Quadrant::classify(&region, &bounds) {
                Some(quadrant) => {
                    let item = self.nodes[node_id].items.remove(i);
                    self.insert_item(children[quadrant.index()], item);
                }
                None => i += 1,
            }
        }
    }

    /// Re-run redistribution on every split node. A no-op on a tree built
    /// purely through `insert`.
    pub fn settle(&mut self) {
        let mut stack = vec![ROOT];
        while let Some(node_id) = stack.pop() {
            self.redistribute(node_id);
            if let Some(children) = self.nodes[node_id].children {
                stack.extend(children);
            }
        }
    }
}
