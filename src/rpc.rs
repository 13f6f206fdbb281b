//! Plain request/response contract types mirroring the gRPC surface in
//! `ots/tile_server.go` (`Find`/`Get`/`Scan`). The transport itself
//! (cmux, tonic) is out of scope per spec.md §6 — these structs exist so
//! the core query/search functions have a stable, documented boundary
//! a future transport layer could hang off without touching the store.

use serde::{Deserialize, Serialize};

use crate::geom::Bound;
use crate::osm::model::{MemberType, Node, Relation, Way};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRequest {
    pub bound: Bound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindResponse {
    pub nodes: Vec<Node>,
    pub ways: Vec<Way>,
    pub relations: Vec<Relation>,
    pub code: u32,
    pub reason: String,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetRequest {
    pub member_type: MemberType,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GetResponse {
    Node(Node),
    Way(Way),
    Relation(Relation),
    NotFound,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ScanScope {
    Nodes,
    Ways,
    Relations,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub scope: ScanScope,
    pub tag: String,
    pub substring: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanResponse {
    Nodes(Vec<Node>),
    Ways(Vec<Way>),
    Relations(Vec<Relation>),
}
