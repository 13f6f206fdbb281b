use super::model::{Node, Relation, Way};
use crate::geom::Bound;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

/// A spatial index entry: just enough to answer envelope queries without
/// touching the actual feature (which lives in the id-keyed maps).
#[derive(Debug, Clone, Copy)]
struct IndexedId {
    id: i64,
    min: [f64; 2],
    max: [f64; 2],
}

impl RTreeObject for IndexedId {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

fn bound_envelope(b: Bound) -> IndexedId {
    IndexedId {
        id: 0,
        min: [b.min.lon, b.min.lat],
        max: [b.max.lon, b.max.lat],
    }
}

fn query_envelope(b: Bound) -> AABB<[f64; 2]> {
    AABB::from_corners([b.min.lon, b.min.lat], [b.max.lon, b.max.lat])
}

/// In-memory, spatially-indexed OSM dataset. Mirrors the shape of the
/// source extract: nodes, ways and relations keyed by id, plus an R-tree
/// per kind so tile builds and `IntersectsBounds` queries (§4.C) don't
/// need to scan every feature.
pub struct OsmStore {
    nodes: HashMap<i64, Node>,
    ways: HashMap<i64, Way>,
    relations: HashMap<i64, Relation>,
    node_index: RTree<IndexedId>,
    way_index: RTree<IndexedId>,
    relation_index: RTree<IndexedId>,
}

impl OsmStore {
    pub(crate) fn build(
        nodes: HashMap<i64, Node>,
        ways: HashMap<i64, Way>,
        relations: HashMap<i64, Relation>,
    ) -> Self {
        let node_index = RTree::bulk_load(
            nodes
                .values()
                .map(|n| IndexedId {
                    id: n.id,
                    min: [n.lon, n.lat],
                    max: [n.lon, n.lat],
                })
                .collect(),
        );
        let way_index = RTree::bulk_load(
            ways.values()
                .map(|w| IndexedId {
                    id: w.id,
                    ..bound_envelope(w.bound)
                })
                .collect(),
        );
        let relation_index = RTree::bulk_load(
            relations
                .values()
                .map(|r| IndexedId {
                    id: r.id,
                    ..bound_envelope(r.bound)
                })
                .collect(),
        );

        OsmStore {
            nodes,
            ways,
            relations,
            node_index,
            way_index,
            relation_index,
        }
    }

    pub fn get_node(&self, id: i64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_way(&self, id: i64) -> Option<&Way> {
        self.ways.get(&id)
    }

    pub fn get_relation(&self, id: i64) -> Option<&Relation> {
        self.relations.get(&id)
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn all_ways(&self) -> impl Iterator<Item = &Way> {
        self.ways.values()
    }

    pub fn all_relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn nodes_in_bound(&self, bound: Bound) -> Vec<&Node> {
        self.node_index
            .locate_in_envelope_intersecting(&query_envelope(bound))
            .filter_map(|entry| self.nodes.get(&entry.id))
            .collect()
    }

    pub fn ways_in_bound(&self, bound: Bound) -> Vec<&Way> {
        self.way_index
            .locate_in_envelope_intersecting(&query_envelope(bound))
            .filter_map(|entry| self.ways.get(&entry.id))
            .collect()
    }

    pub fn relations_in_bound(&self, bound: Bound) -> Vec<&Relation> {
        self.relation_index
            .locate_in_envelope_intersecting(&query_envelope(bound))
            .filter_map(|entry| self.relations.get(&entry.id))
            .collect()
    }

    /// Case-sensitive substring match against the named tag's value only,
    /// same as the source extract's `SearchNodes(tag, keyword)` and its
    /// siblings — not a scan over every tag on the feature.
    pub fn search_nodes(&self, tag: &str, substr: &str) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.tags.get(tag).is_some_and(|v| v.contains(substr)))
            .collect()
    }

    pub fn search_ways(&self, tag: &str, substr: &str) -> Vec<&Way> {
        self.ways
            .values()
            .filter(|w| w.tags.get(tag).is_some_and(|v| v.contains(substr)))
            .collect()
    }

    pub fn search_relations(&self, tag: &str, substr: &str) -> Vec<&Relation> {
        self.relations
            .values()
            .filter(|r| r.tags.get(tag).is_some_and(|v| v.contains(substr)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, lat: f64, lon: f64) -> Node {
        Node {
            id,
            tags: HashMap::new(),
            lat,
            lon,
        }
    }

    #[test]
    fn nodes_in_bound_only_returns_contained_nodes() {
        let mut nodes = HashMap::new();
        nodes.insert(1, node(1, 10.0, 10.0));
        nodes.insert(2, node(2, 50.0, 50.0));
        let store = OsmStore::build(nodes, HashMap::new(), HashMap::new());

        let bound = Bound::make(5.0, 5.0, 15.0, 15.0);
        let found = store.nodes_in_bound(bound);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn search_is_substring_and_case_sensitive() {
        let mut nodes = HashMap::new();
        let mut n = node(1, 0.0, 0.0);
        n.tags.insert("name".to_string(), "Cafe Lumiere".to_string());
        nodes.insert(1, n);
        let store = OsmStore::build(nodes, HashMap::new(), HashMap::new());

        assert_eq!(store.search_nodes("name", "Lumiere").len(), 1);
        assert_eq!(store.search_nodes("name", "lumiere").len(), 0);
    }

    #[test]
    fn search_only_matches_the_named_tag() {
        let mut nodes = HashMap::new();
        let mut n = node(1, 0.0, 0.0);
        n.tags.insert("name".to_string(), "Lumiere".to_string());
        n.tags.insert("operator".to_string(), "Someone Else".to_string());
        nodes.insert(1, n);
        let store = OsmStore::build(nodes, HashMap::new(), HashMap::new());

        assert_eq!(store.search_nodes("name", "Lumiere").len(), 1);
        assert_eq!(store.search_nodes("operator", "Lumiere").len(), 0);
    }

    #[test]
    fn unknown_id_lookups_return_none() {
        let store = OsmStore::build(HashMap::new(), HashMap::new(), HashMap::new());
        assert!(store.get_node(1).is_none());
        assert!(store.get_way(1).is_none());
        assert!(store.get_relation(1).is_none());
    }
}
