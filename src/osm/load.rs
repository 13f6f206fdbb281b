//! Two-pass materialization from a raw record stream into an `OsmStore`.
//! Pass one indexes nodes by id; pass two resolves way node refs to
//! coordinates and extends bounds; pass three resolves relation members,
//! skipping RELATION-typed members the way the source extract does
//! (`ds_file.go`'s `loadOsmData`, which `continue`s over them).

use super::model::{MemberType, Node, NodeRef, OsmRecord, RawMember, RawNode, RawRelation, RawWay};
use super::model::{Relation, RelationMember, Way};
use super::store::OsmStore;
use crate::error::OtsError;
use crate::geom::Bound;
use std::collections::HashMap;

fn empty_bound() -> Bound {
    Bound::make(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
}

fn materialize_way(raw: &RawWay, nodes: &HashMap<i64, RawNode>) -> Way {
    let mut bound = empty_bound();
    let mut node_refs = Vec::with_capacity(raw.node_refs.len());
    for &id in &raw.node_refs {
        if let Some(n) = nodes.get(&id) {
            bound = bound.extend(crate::geom::LatLon::new(n.lat, n.lon));
            node_refs.push(NodeRef {
                id: n.id,
                lat: n.lat,
                lon: n.lon,
            });
        }
    }
    Way {
        id: raw.id,
        tags: raw.tags.clone(),
        node_refs,
        bound,
    }
}

fn materialize_member(
    m: &RawMember,
    nodes: &HashMap<i64, RawNode>,
    ways: &HashMap<i64, Way>,
    bound: &mut Bound,
) -> Option<RelationMember> {
    match m.member_type {
        MemberType::Node => {
            let n = nodes.get(&m.ref_id)?;
            *bound = bound.extend(crate::geom::LatLon::new(n.lat, n.lon));
            Some(RelationMember {
                member_type: MemberType::Node,
                ref_id: m.ref_id,
                role: m.role.clone(),
                way_node_refs: Vec::new(),
                node_lat_lon: Some((n.lat, n.lon)),
            })
        }
        MemberType::Way => {
            let way = ways.get(&m.ref_id)?;
            *bound = bound.union(way.bound);
            Some(RelationMember {
                member_type: MemberType::Way,
                ref_id: m.ref_id,
                role: m.role.clone(),
                way_node_refs: way.node_refs.clone(),
                node_lat_lon: None,
            })
        }
        // Relation-of-relation members are not dereferenced: the source
        // extract skips them too, to avoid chasing cycles.
        MemberType::Relation | MemberType::Bounds => None,
    }
}

fn materialize_relation(raw: &RawRelation, nodes: &HashMap<i64, RawNode>, ways: &HashMap<i64, Way>) -> Relation {
    let mut bound = empty_bound();
    let members = raw
        .members
        .iter()
        .filter_map(|m| materialize_member(m, nodes, ways, &mut bound))
        .collect();
    Relation {
        id: raw.id,
        tags: raw.tags.clone(),
        members,
        bound,
    }
}

/// Consumes a stream of raw records and builds a fully materialized,
/// spatially-indexed store. Producing the record stream itself (PBF scan,
/// XML parse, snapshot decode) is handled upstream — see `server::load`.
pub fn load_from_records(records: impl IntoIterator<Item = OsmRecord>) -> Result<OsmStore, OtsError> {
    let mut raw_nodes = HashMap::new();
    let mut raw_ways = HashMap::new();
    let mut raw_relations = HashMap::new();

    for record in records {
        match record {
            OsmRecord::Node(n) => {
                raw_nodes.insert(n.id, n);
            }
            OsmRecord::Way(w) => {
                raw_ways.insert(w.id, w);
            }
            OsmRecord::Relation(r) => {
                raw_relations.insert(r.id, r);
            }
        }
    }

    if raw_nodes.is_empty() && raw_ways.is_empty() && raw_relations.is_empty() {
        return Err(OtsError::DatasetLoad("extract contained no records".to_string()));
    }

    let nodes: HashMap<i64, Node> = raw_nodes
        .values()
        .map(|n| {
            (
                n.id,
                Node {
                    id: n.id,
                    tags: n.tags.clone(),
                    lat: n.lat,
                    lon: n.lon,
                },
            )
        })
        .collect();

    let ways: HashMap<i64, Way> = raw_ways
        .values()
        .map(|w| (w.id, materialize_way(w, &raw_nodes)))
        .collect();

    let relations: HashMap<i64, Relation> = raw_relations
        .values()
        .map(|r| (r.id, materialize_relation(r, &raw_nodes, &ways)))
        .collect();

    Ok(OsmStore::build(nodes, ways, relations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::model::TagMap;

    fn tag(k: &str, v: &str) -> TagMap {
        let mut m = TagMap::new();
        m.insert(k.to_string(), v.to_string());
        m
    }

    #[test]
    fn way_bound_is_extended_from_referenced_nodes() {
        let records = vec![
            OsmRecord::Node(RawNode { id: 1, lat: 0.0, lon: 0.0, tags: TagMap::new() }),
            OsmRecord::Node(RawNode { id: 2, lat: 1.0, lon: 1.0, tags: TagMap::new() }),
            OsmRecord::Way(RawWay { id: 10, tags: tag("highway", "residential"), node_refs: vec![1, 2] }),
        ];
        let store = load_from_records(records).unwrap();
        let way = store.get_way(10).unwrap();
        assert_eq!(way.node_refs.len(), 2);
        assert_eq!(way.bound.min.lat, 0.0);
        assert_eq!(way.bound.max.lat, 1.0);
    }

    #[test]
    fn relation_skips_nested_relation_members() {
        let records = vec![
            OsmRecord::Node(RawNode { id: 1, lat: 0.0, lon: 0.0, tags: TagMap::new() }),
            OsmRecord::Relation(RawRelation {
                id: 100,
                tags: tag("type", "multipolygon"),
                members: vec![
                    RawMember { member_type: MemberType::Node, ref_id: 1, role: "".to_string() },
                    RawMember { member_type: MemberType::Relation, ref_id: 999, role: "".to_string() },
                ],
            }),
        ];
        let store = load_from_records(records).unwrap();
        let rel = store.get_relation(100).unwrap();
        assert_eq!(rel.members.len(), 1);
    }

    #[test]
    fn empty_stream_is_an_error() {
        assert!(load_from_records(Vec::new()).is_err());
    }
}
