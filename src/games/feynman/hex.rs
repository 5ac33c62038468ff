//! Hex grid geometry: axial positions, edges, edge sets and corner points.
//!
//! Flat-top layout with screen y pointing down. Edge `i` of a cell faces the
//! neighbor at `EDGE_DIRECTIONS[i]`; edges run clockwise from the upper-right.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

/// Axial offset of the neighbor across each edge.
pub const EDGE_DIRECTIONS: [(i32, i32); 6] = [
    (1, -1), // edge 0, upper-right
    (1, 0),  // edge 1, lower-right
    (0, 1),  // edge 2, bottom
    (-1, 1), // edge 3, lower-left
    (-1, 0), // edge 4, upper-left
    (0, -1), // edge 5, top
];

/// Corner owned by each edge, on the integer corner lattice.
///
/// Edge `i` owns the corner at its clockwise end, 60°·i from the centre.
/// Lattice units: x in half a hex radius, y in √3/2 of a hex radius.
const CORNER_OFFSETS: [(i32, i32); 6] = [
    (2, 0),
    (1, 1),
    (-1, 1),
    (-2, 0),
    (-1, -1),
    (1, -1),
];

/// Largest `|q|`, `|r|` or `|s|` a board cell may have. Neighbor arithmetic
/// on in-bounds cells never overflows `i32`.
pub const HEX_COORD_LIMIT: i32 = 1 << 30;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

// --- Edge ---

/// One of the six sides of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Edge(u8);

impl Edge {
    pub const ALL: [Edge; 6] = [Edge(0), Edge(1), Edge(2), Edge(3), Edge(4), Edge(5)];

    pub fn new(index: u8) -> Result<Self, EngineError> {
        if index < 6 {
            Ok(Self(index))
        } else {
            Err(EngineError::InvalidEdge(i64::from(index)))
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Self((self.0 + 3) % 6)
    }

    /// Rotate clockwise by `steps` sixths of a turn.
    #[inline]
    pub const fn rotated(self, steps: u8) -> Self {
        Self((self.0 + steps % 6) % 6)
    }

    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        EDGE_DIRECTIONS[self.0 as usize]
    }
}

impl TryFrom<u8> for Edge {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Edge> for u8 {
    fn from(edge: Edge) -> Self {
        edge.0
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn opposite_edge(edge: Edge) -> Edge {
    edge.opposite()
}

// --- EdgeSet ---

/// Set of edges carrying a line, stored as a 6-bit mask.
/// Serialized as an ascending list of edge indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct EdgeSet(u8);

impl EdgeSet {
    pub const EMPTY: EdgeSet = EdgeSet(0);

    /// Build from raw indices, rejecting anything outside 0..=5.
    pub fn from_indices(indices: &[u8]) -> Result<Self, EngineError> {
        let mut set = Self::EMPTY;
        for &idx in indices {
            set.insert(Edge::new(idx)?);
        }
        Ok(set)
    }

    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut set = Self::EMPTY;
        for edge in edges {
            set.insert(edge);
        }
        set
    }

    #[inline]
    pub fn contains(self, edge: Edge) -> bool {
        self.0 & (1 << edge.0) != 0
    }

    #[inline]
    pub fn insert(&mut self, edge: Edge) {
        self.0 |= 1 << edge.0;
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Edges in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |&e| self.contains(e))
    }

    /// Rotate every edge clockwise by `steps` sixths of a turn.
    pub fn rotated(self, steps: u8) -> Self {
        let steps = steps % 6;
        if steps == 0 {
            return self;
        }
        let bits = self.0;
        Self(((bits << steps) | (bits >> (6 - steps))) & 0b11_1111)
    }

    pub fn indices(self) -> Vec<u8> {
        self.iter().map(u8::from).collect()
    }
}

impl TryFrom<Vec<u8>> for EdgeSet {
    type Error = EngineError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

impl From<EdgeSet> for Vec<u8> {
    fn from(set: EdgeSet) -> Self {
        set.indices()
    }
}

// --- Hex ---

/// Axial position of a cell. The cube coordinate `s` is derived.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube `s`. Exact for in-bounds cells.
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Tuple key for zero-allocation map lookups.
    #[inline]
    pub const fn key(self) -> (i32, i32) {
        (self.q, self.r)
    }

    pub fn to_key(self) -> String {
        format!("{},{}", self.q, self.r)
    }

    /// Parse "q,r" or the cube form "q,r,s" (which must satisfy q + r + s = 0).
    pub fn from_key(key: &str) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidPositionKey(key.to_string());
        let parts = key
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match parts.as_slice() {
            [q, r] => Ok(Self::new(*q, *r)),
            [q, r, s] if i64::from(*q) + i64::from(*r) + i64::from(*s) == 0 => {
                Ok(Self::new(*q, *r))
            }
            _ => Err(invalid()),
        }
    }

    /// Whether all three cube coordinates are within `HEX_COORD_LIMIT`.
    pub fn in_bounds(self) -> bool {
        let limit = HEX_COORD_LIMIT.unsigned_abs();
        let s = (i64::from(self.q) + i64::from(self.r)).unsigned_abs();
        self.q.unsigned_abs() <= limit && self.r.unsigned_abs() <= limit && s <= u64::from(limit)
    }

    /// Cell across `edge`. Only in-bounds cells are guaranteed not to overflow.
    #[inline]
    pub fn neighbor(self, edge: Edge) -> Self {
        let (dq, dr) = edge.offset();
        Self::new(self.q + dq, self.r + dr)
    }

    /// The six neighbors, indexed by edge.
    pub fn neighbors(self) -> [Hex; 6] {
        Edge::ALL.map(|e| self.neighbor(e))
    }

    /// Edge of `self` that faces `other`, if the two cells are adjacent.
    pub fn direction_to(self, other: Hex) -> Option<Edge> {
        Edge::ALL.into_iter().find(|&e| self.neighbor(e) == other)
    }

    pub fn distance(self, other: Hex) -> u64 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let ds = -dq - dr;
        (dq.unsigned_abs() + dr.unsigned_abs() + ds.unsigned_abs()) / 2
    }

    /// Pixel centre for a hex of circumradius `size`.
    pub fn to_pixel(self, size: f64) -> (f64, f64) {
        let x = 1.5 * f64::from(self.q);
        let y = SQRT_3 * (f64::from(self.r) + f64::from(self.q) / 2.0);
        (x * size, y * size)
    }

    /// Corner at the clockwise end of `edge`.
    pub fn corner(self, edge: Edge) -> Corner {
        corner_of(self, edge)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

// --- Corner ---

/// Exact corner point on the integer corner lattice.
///
/// Every corner is shared by three cells; each reaches it through a different
/// edge of its own frame (`i`, `i + 2` and `i + 4` for cells `c`,
/// `c + dir[i]` and `c + dir[i + 1]`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Corner {
    pub x: i64,
    pub y: i64,
}

impl Corner {
    pub fn to_key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Pixel position for hexes of circumradius `size`.
    pub fn to_pixel(self, size: f64) -> (f64, f64) {
        let x = self.x as f64 / 2.0;
        let y = self.y as f64 * SQRT_3 / 2.0;
        (x * size, y * size)
    }
}

pub fn corner_of(hex: Hex, edge: Edge) -> Corner {
    let (dx, dy) = CORNER_OFFSETS[edge.index()];
    let (q, r) = (i64::from(hex.q), i64::from(hex.r));
    Corner {
        x: 3 * q + i64::from(dx),
        y: 2 * r + q + i64::from(dy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(i: u8) -> Edge {
        Edge::new(i).unwrap()
    }

    #[test]
    fn test_neighbors_follow_edge_order() {
        let n = Hex::ORIGIN.neighbors();
        assert_eq!(n[0], Hex::new(1, -1));
        assert_eq!(n[1], Hex::new(1, 0));
        assert_eq!(n[2], Hex::new(0, 1));
        assert_eq!(n[3], Hex::new(-1, 1));
        assert_eq!(n[4], Hex::new(-1, 0));
        assert_eq!(n[5], Hex::new(0, -1));
    }

    #[test]
    fn test_opposite_edge() {
        for edge in Edge::ALL {
            assert_eq!(opposite_edge(edge).index(), (edge.index() + 3) % 6);
            assert_eq!(edge.opposite().opposite(), edge);
        }
    }

    #[test]
    fn test_opposite_edge_points_back() {
        let origin = Hex::new(2, -3);
        for edge in Edge::ALL {
            assert_eq!(origin.neighbor(edge).neighbor(edge.opposite()), origin);
        }
    }

    #[test]
    fn test_direction_to() {
        let a = Hex::new(1, 1);
        for edge in Edge::ALL {
            assert_eq!(a.direction_to(a.neighbor(edge)), Some(edge));
        }
        assert_eq!(a.direction_to(Hex::new(5, 5)), None);
        assert_eq!(a.direction_to(a), None);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Hex::ORIGIN.distance(Hex::ORIGIN), 0);
        assert_eq!(Hex::ORIGIN.distance(Hex::new(1, -1)), 1);
        assert_eq!(Hex::ORIGIN.distance(Hex::new(2, 1)), 3);
        assert_eq!(Hex::new(-2, 0).distance(Hex::new(2, 0)), 4);
        assert_eq!(Hex::new(i32::MIN, 0).distance(Hex::new(i32::MAX, 0)), u64::from(u32::MAX));
    }

    #[test]
    fn test_in_bounds() {
        assert!(Hex::ORIGIN.in_bounds());
        assert!(Hex::new(HEX_COORD_LIMIT, -HEX_COORD_LIMIT).in_bounds());
        assert!(!Hex::new(HEX_COORD_LIMIT + 1, 0).in_bounds());
        assert!(!Hex::new(HEX_COORD_LIMIT, 1).in_bounds());
        assert!(!Hex::new(i32::MIN, 0).in_bounds());
    }

    #[test]
    fn test_corners_far_from_origin_stay_distinct() {
        let far = Hex::new(1_000_000_000, 0);
        assert_eq!(far.corner(e(0)), Corner { x: 3_000_000_002, y: 1_000_000_000 });
        // Shared corner still agrees across the three cells.
        assert_eq!(far.corner(e(0)), far.neighbor(e(0)).corner(e(2)));
        assert_eq!(far.corner(e(0)), far.neighbor(e(1)).corner(e(4)));
        assert_ne!(far.corner(e(0)), Hex::ORIGIN.corner(e(0)));
    }

    #[test]
    fn test_key_roundtrip() {
        let pos = Hex::new(3, -1);
        assert_eq!(pos.to_key(), "3,-1");
        assert_eq!(Hex::from_key("3,-1").unwrap(), pos);
        assert_eq!(Hex::from_key("3,-1,-2").unwrap(), pos);
    }

    #[test]
    fn test_from_key_rejects_garbage() {
        assert!(Hex::from_key("").is_err());
        assert!(Hex::from_key("1").is_err());
        assert!(Hex::from_key("a,b").is_err());
        assert!(Hex::from_key("1,1,1").is_err());
        assert!(Hex::from_key("2147483647,2147483647,2").is_err());
    }

    #[test]
    fn test_edge_rejects_out_of_range() {
        assert_eq!(Edge::new(6), Err(EngineError::InvalidEdge(6)));
        assert!(EdgeSet::from_indices(&[0, 7]).is_err());
    }

    #[test]
    fn test_edge_set_rotation() {
        let set = EdgeSet::from_indices(&[0, 2, 5]).unwrap();
        assert_eq!(set.rotated(1).indices(), vec![0, 1, 3]);
        assert_eq!(set.rotated(6), set);
        let mut r = set;
        for _ in 0..6 {
            r = r.rotated(1);
        }
        assert_eq!(r, set);
    }

    #[test]
    fn test_edge_set_dedupes() {
        let set = EdgeSet::from_indices(&[3, 3, 1]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.indices(), vec![1, 3]);
    }

    #[test]
    fn test_corner_shared_by_three_cells() {
        let c = Hex::new(-2, 1);
        for i in 0..6u8 {
            let b = c.neighbor(e(i));
            let d = c.neighbor(e((i + 1) % 6));
            let corner = c.corner(e(i));
            assert_eq!(b.corner(e((i + 2) % 6)), corner, "edge {i}");
            assert_eq!(d.corner(e((i + 4) % 6)), corner, "edge {i}");
        }
    }

    #[test]
    fn test_corners_of_one_cell_are_distinct() {
        let corners: std::collections::HashSet<Corner> =
            Edge::ALL.iter().map(|&edge| Hex::new(4, -7).corner(edge)).collect();
        assert_eq!(corners.len(), 6);
    }

    #[test]
    fn test_corner_pixel_matches_hex_geometry() {
        let hex = Hex::new(1, 0);
        let (cx, cy) = hex.to_pixel(10.0);
        let (px, py) = hex.corner(e(0)).to_pixel(10.0);
        assert!((px - (cx + 10.0)).abs() < 1e-9);
        assert!((py - cy).abs() < 1e-9);
    }
}
