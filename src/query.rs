//! Bounded spatial query: the exact node/way/relation de-duplication
//! rule from the source extract's `IntersectsBounds` (§4.C).
//!
//! A node that belongs to a returned way or relation is not also
//! returned bare — it would double-draw and double-count. The
//! algorithm: collect every node in the bound, then delete from that
//! set every node referenced by a returned way or by a NODE-typed
//! relation member; whatever remains is genuinely bare.

use crate::osm::{Node, OsmStore, Relation, Way};
use crate::geom::Bound;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub nodes: Vec<Node>,
    pub ways: Vec<Way>,
    pub relations: Vec<Relation>,
}

pub fn intersects_bounds(store: &OsmStore, bound: Bound) -> ResultSet {
    let mut raw_nodes: HashMap<i64, Node> = store
        .nodes_in_bound(bound)
        .into_iter()
        .map(|n| (n.id, n.clone()))
        .collect();

    let ways = store.ways_in_bound(bound);
    for way in &ways {
        for node_ref in &way.node_refs {
            raw_nodes.remove(&node_ref.id);
        }
    }

    let mut way_ids: HashSet<i64> = ways.iter().map(|w| w.id).collect();
    let mut relation_ways: Vec<Way> = Vec::new();

    let relations = store.relations_in_bound(bound);
    for rel in &relations {
        for member in &rel.members {
            match member.member_type {
                crate::osm::MemberType::Node => {
                    raw_nodes.remove(&member.ref_id);
                }
                crate::osm::MemberType::Way => {
                    if way_ids.insert(member.ref_id) {
                        if let Some(w) = store.get_way(member.ref_id) {
                            relation_ways.push(w.clone());
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let mut all_ways: Vec<Way> = ways.into_iter().cloned().collect();
    all_ways.extend(relation_ways);

    ResultSet {
        nodes: raw_nodes.into_values().collect(),
        ways: all_ways,
        relations: relations.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osm::load::load_from_records;
    use crate::osm::model::{MemberType, OsmRecord, RawMember, RawNode, RawRelation, RawWay, TagMap};

    #[test]
    fn way_nodes_are_not_returned_bare() {
        let records = vec![
            OsmRecord::Node(RawNode { id: 1, lat: 0.0, lon: 0.0, tags: TagMap::new() }),
            OsmRecord::Node(RawNode { id: 2, lat: 1.0, lon: 1.0, tags: TagMap::new() }),
            OsmRecord::Way(RawWay { id: 10, tags: TagMap::new(), node_refs: vec![1, 2] }),
        ];
        let store = load_from_records(records).unwrap();
        let result = intersects_bounds(&store, Bound::make(-1.0, -1.0, 2.0, 2.0));
        assert_eq!(result.ways.len(), 1);
        assert!(result.nodes.is_empty());
    }

    #[test]
    fn relation_node_members_are_removed_from_bare_nodes() {
        let records = vec![
            OsmRecord::Node(RawNode { id: 1, lat: 0.0, lon: 0.0, tags: TagMap::new() }),
            OsmRecord::Relation(RawRelation {
                id: 100,
                tags: TagMap::new(),
                members: vec![RawMember { member_type: MemberType::Node, ref_id: 1, role: "".to_string() }],
            }),
        ];
        let store = load_from_records(records).unwrap();
        let result = intersects_bounds(&store, Bound::make(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(result.relations.len(), 1);
        assert!(result.nodes.is_empty());
    }

    #[test]
    fn bare_node_outside_any_way_or_relation_is_returned() {
        let records = vec![OsmRecord::Node(RawNode { id: 1, lat: 0.0, lon: 0.0, tags: TagMap::new() })];
        let store = load_from_records(records).unwrap();
        let result = intersects_bounds(&store, Bound::make(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(result.nodes.len(), 1);
    }
}
