use super::*;
use std::cmp::Ordering;

impl<Id, V> SpatialIndex<Id, V>
where
    Id: Copy + Eq + Debug,
    V: Viewport,
{
    /// Collect every id that could overlap `entity` into `candidates`
    /// (cleared first). The result may contain false positives, never false
    /// negatives, and includes `entity` itself if it is stored.
    pub fn retrieve<E>(&self, entity: &E, candidates: &mut Vec<Id>)
    where
        E: Collidable<Id = Id> + ?Sized,
    {
        candidates.clear();
        if let Some(bounds) = self.index_bounds(entity) {
            self.retrieve_from(ROOT, &bounds, candidates);
        }
    }

    /// Like `retrieve`, then stable-sorts the candidates so resolution order
    /// does not depend on tree layout.
    pub fn retrieve_sorted_by<E, F>(&self, entity: &E, candidates: &mut Vec<Id>, compare: F)
    where
        E: Collidable<Id = Id> + ?Sized,
        F: FnMut(&Id, &Id) -> Ordering,
    {
        self.retrieve(entity, candidates);
        candidates.sort_by(compare);
    }

    /// Candidate query for an arbitrary region already in the index frame.
    pub fn retrieve_bounds(&self, bounds: &Bounds, candidates: &mut Vec<Id>) {
        candidates.clear();
        if bounds.is_valid() {
            self.retrieve_from(ROOT, bounds, candidates);
        }
    }

    fn retrieve_from(&self, node_id: NodeId, bounds: &Bounds, candidates: &mut Vec<Id>) {
        let node = &self.nodes[node_id];
        candidates.extend(node.items.iter().map(|item| item.id));
        let Some(children) = node.children else {
            return;
        };
        match Quadrant::classify(&node.region, bounds) {
            Some(quadrant) => self.retrieve_from(children[quadrant.index()], bounds, candidates),
            None => {
                for child in children {
                    self.retrieve_from(child, bounds, candidates);
                }
            }
        }
    }
}
