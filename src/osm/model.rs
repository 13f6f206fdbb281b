use crate::geom::Bound;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TagMap = HashMap<String, String>;

/// A single node as read from the extract, before materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: TagMap,
}

/// A single way as read from the extract: node refs are bare ids until
/// the store's second materialization pass resolves coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWay {
    pub id: i64,
    #[serde(default)]
    pub tags: TagMap,
    pub node_refs: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberType {
    Node,
    Way,
    Relation,
    Bounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMember {
    pub member_type: MemberType,
    pub ref_id: i64,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelation {
    pub id: i64,
    #[serde(default)]
    pub tags: TagMap,
    pub members: Vec<RawMember>,
}

/// One record out of a PBF/XML ingestion stream. Loading the bytes into
/// this shape is the external collaborator's job (§1 out-of-scope); the
/// store only consumes the stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OsmRecord {
    Node(RawNode),
    Way(RawWay),
    Relation(RawRelation),
}

/// A node ref inside a materialized way or relation member: the node's
/// own coordinates copied in at load time (§4.B, §9 cyclic-reference note).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub tags: TagMap,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn find_tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    pub tags: TagMap,
    pub node_refs: Vec<NodeRef>,
    pub bound: Bound,
}

impl Way {
    pub fn find_tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// A way is closed iff it has at least 3 node refs and its first and
    /// last refs share an id or identical coordinates.
    pub fn is_closed(&self) -> bool {
        if self.node_refs.len() < 3 {
            return false;
        }
        let first = self.node_refs.first().unwrap();
        let last = self.node_refs.last().unwrap();
        first.id == last.id || (first.lat == last.lat && first.lon == last.lon)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationMember {
    pub member_type: MemberType,
    pub ref_id: i64,
    pub role: String,
    /// Populated for WAY members during load materialization.
    pub way_node_refs: Vec<NodeRef>,
    /// Populated for NODE members during load materialization.
    pub node_lat_lon: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub id: i64,
    pub tags: TagMap,
    pub members: Vec<RelationMember>,
    pub bound: Bound,
}

impl Relation {
    pub fn find_tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
