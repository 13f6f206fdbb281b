//! Marker icons drawn at label anchors. The source styling drew these
//! from an embedded FontAwesome face; without that asset on hand, each
//! icon renders as a short glyph via cairo's toy font API against the
//! system sans-serif face (documented as an Open Question in DESIGN.md).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub name: &'static str,
    pub glyph: char,
}

pub const SCHOOL: Icon = Icon { name: "school", glyph: 'S' };
pub const CHILD: Icon = Icon { name: "child", glyph: 'C' };
pub const BOOK: Icon = Icon { name: "book", glyph: 'B' };
pub const UNIVERSITY: Icon = Icon { name: "university", glyph: 'U' };
pub const PARKING: Icon = Icon { name: "parking", glyph: 'P' };
pub const HOSPITAL: Icon = Icon { name: "hospital", glyph: 'H' };
pub const POLICE: Icon = Icon { name: "police", glyph: 'X' };
pub const FIRE_STATION: Icon = Icon { name: "fire_station", glyph: 'F' };
