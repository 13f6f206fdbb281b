//! Turns bytes on disk into an `OsmStore`: an XML extract (JOSM/Overpass
//! style, via `quick-xml`) for first load, and a binary snapshot (via
//! `ciborium`) for fast subsequent restarts.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OtsError;
use crate::osm::model::{MemberType, Node, OsmRecord, RawMember, RawNode, RawRelation, RawWay, Relation, Way};
use crate::osm::store::OsmStore;

#[derive(Debug, Deserialize)]
struct XmlTag {
    #[serde(rename = "@k")]
    k: String,
    #[serde(rename = "@v")]
    v: String,
}

#[derive(Debug, Deserialize)]
struct XmlNode {
    #[serde(rename = "@id")]
    id: i64,
    #[serde(rename = "@lat")]
    lat: f64,
    #[serde(rename = "@lon")]
    lon: f64,
    #[serde(rename = "tag", default)]
    tag: Vec<XmlTag>,
}

#[derive(Debug, Deserialize)]
struct XmlNd {
    #[serde(rename = "@ref")]
    reference: i64,
}

#[derive(Debug, Deserialize)]
struct XmlWay {
    #[serde(rename = "@id")]
    id: i64,
    #[serde(rename = "nd", default)]
    nd: Vec<XmlNd>,
    #[serde(rename = "tag", default)]
    tag: Vec<XmlTag>,
}

#[derive(Debug, Deserialize)]
struct XmlMember {
    #[serde(rename = "@type")]
    member_type: String,
    #[serde(rename = "@ref")]
    reference: i64,
    #[serde(rename = "@role", default)]
    role: String,
}

#[derive(Debug, Deserialize)]
struct XmlRelation {
    #[serde(rename = "@id")]
    id: i64,
    #[serde(rename = "member", default)]
    member: Vec<XmlMember>,
    #[serde(rename = "tag", default)]
    tag: Vec<XmlTag>,
}

#[derive(Debug, Deserialize)]
struct XmlOsm {
    #[serde(rename = "node", default)]
    node: Vec<XmlNode>,
    #[serde(rename = "way", default)]
    way: Vec<XmlWay>,
    #[serde(rename = "relation", default)]
    relation: Vec<XmlRelation>,
}

fn tags_to_map(tags: Vec<XmlTag>) -> HashMap<String, String> {
    tags.into_iter().map(|t| (t.k, t.v)).collect()
}

fn parse_member_type(raw: &str) -> MemberType {
    match raw {
        "way" => MemberType::Way,
        "relation" => MemberType::Relation,
        "bounds" => MemberType::Bounds,
        _ => MemberType::Node,
    }
}

/// Parses an OSM XML extract into the raw-record stream the store's
/// two-pass materializer expects.
pub fn parse_xml(xml: &str) -> Result<Vec<OsmRecord>, OtsError> {
    let osm: XmlOsm = quick_xml::de::from_str(xml)
        .map_err(|e| OtsError::DatasetLoad(format!("parsing osm xml: {e}")))?;

    let mut records = Vec::with_capacity(osm.node.len() + osm.way.len() + osm.relation.len());

    for n in osm.node {
        records.push(OsmRecord::Node(RawNode {
            id: n.id,
            lat: n.lat,
            lon: n.lon,
            tags: tags_to_map(n.tag),
        }));
    }
    for w in osm.way {
        records.push(OsmRecord::Way(RawWay {
            id: w.id,
            tags: tags_to_map(w.tag),
            node_refs: w.nd.into_iter().map(|r| r.reference).collect(),
        }));
    }
    for r in osm.relation {
        records.push(OsmRecord::Relation(RawRelation {
            id: r.id,
            tags: tags_to_map(r.tag),
            members: r
                .member
                .into_iter()
                .map(|m| RawMember {
                    member_type: parse_member_type(&m.member_type),
                    ref_id: m.reference,
                    role: m.role,
                })
                .collect(),
        }));
    }

    Ok(records)
}

pub fn load_xml_file(path: &Path) -> Result<OsmStore, OtsError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| OtsError::DatasetLoad(format!("reading {}: {e}", path.display())))?;
    let records = parse_xml(&text)?;
    crate::osm::load::load_from_records(records)
}

/// The materialized store flattened to a serializable shape, so a
/// binary snapshot round-trips without repeating node/way/relation
/// resolution on every startup.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    nodes: Vec<Node>,
    ways: Vec<Way>,
    relations: Vec<Relation>,
}

pub fn save_snapshot(store: &OsmStore, path: &Path) -> Result<(), OtsError> {
    let snapshot = Snapshot {
        nodes: store.all_nodes().cloned().collect(),
        ways: store.all_ways().cloned().collect(),
        relations: store.all_relations().cloned().collect(),
    };
    let file = std::fs::File::create(path)
        .map_err(|e| OtsError::DatasetLoad(format!("creating {}: {e}", path.display())))?;
    ciborium::ser::into_writer(&snapshot, file)
        .map_err(|e| OtsError::DatasetLoad(format!("encoding snapshot: {e}")))
}

pub fn load_snapshot(path: &Path) -> Result<OsmStore, OtsError> {
    let file = std::fs::File::open(path)
        .map_err(|e| OtsError::DatasetLoad(format!("opening {}: {e}", path.display())))?;
    let snapshot: Snapshot = ciborium::de::from_reader(file)
        .map_err(|e| OtsError::DatasetLoad(format!("decoding snapshot: {e}")))?;

    let nodes = snapshot.nodes.into_iter().map(|n| (n.id, n)).collect();
    let ways = snapshot.ways.into_iter().map(|w| (w.id, w)).collect();
    let relations = snapshot.relations.into_iter().map(|r| (r.id, r)).collect();
    Ok(OsmStore::build(nodes, ways, relations))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
<osm>
  <node id="1" lat="10.0" lon="20.0"><tag k="name" v="Cafe"/></node>
  <node id="2" lat="10.1" lon="20.1"/>
  <way id="100"><nd ref="1"/><nd ref="2"/><tag k="highway" v="residential"/></way>
  <relation id="200">
    <member type="way" ref="100" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>"#;

    #[test]
    fn parses_nodes_ways_and_relations() {
        let records = parse_xml(SAMPLE_XML).unwrap();
        let (mut nodes, mut ways, mut relations) = (0, 0, 0);
        for r in &records {
            match r {
                OsmRecord::Node(_) => nodes += 1,
                OsmRecord::Way(_) => ways += 1,
                OsmRecord::Relation(_) => relations += 1,
            }
        }
        assert_eq!(nodes, 2);
        assert_eq!(ways, 1);
        assert_eq!(relations, 1);
    }

    #[test]
    fn parsed_xml_materializes_into_a_usable_store() {
        let records = parse_xml(SAMPLE_XML).unwrap();
        let store = crate::osm::load::load_from_records(records).unwrap();
        let way = store.get_way(100).unwrap();
        assert_eq!(way.node_refs.len(), 2);
        let rel = store.get_relation(200).unwrap();
        assert_eq!(rel.members.len(), 1);
    }
}
