//! Signed, undirected graphs with attributed vertices and an adjacency index.
//!
//! The graph is built incrementally by a live editor, so every mutating
//! operation treats invalid input (unknown ids, self-loops, duplicate
//! vertices) as a silent no-op. The `edges` list and the `adjacency` index
//! are kept symmetric by every mutation path; the rest of the crate relies
//! on that invariant.

use std::collections::BTreeMap;
use std::fmt;

/// Sign of an edge: positive edges are cooperative, negative adversarial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Numeric value of the sign, `+1` or `-1`.
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    /// The opposite sign.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Scalar metadata value attached to a vertex or an edge.
///
/// The core never interprets metadata; it is carried for the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// A vertex with a caller-assigned id and display attributes.
///
/// The position `(x, y)` is display-only and plays no computational role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: u32,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub metadata: BTreeMap<String, MetaValue>,
}

impl Vertex {
    /// Create a vertex at the origin with an empty metadata map.
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.to_owned(),
            x: 0.0,
            y: 0.0,
            metadata: BTreeMap::new(),
        }
    }
}

/// An undirected signed edge between two distinct vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: u32,
    pub target: u32,
    pub sign: Sign,
    pub metadata: BTreeMap<String, MetaValue>,
}

impl Edge {
    /// Returns `true` if this edge joins `u` and `v` (in either order).
    #[inline]
    pub fn connects(&self, u: u32, v: u32) -> bool {
        (self.source == u && self.target == v) || (self.source == v && self.target == u)
    }
}

/// A signed graph: vertex map, edge list and a derived adjacency index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignedGraph {
    vertices: BTreeMap<u32, Vertex>,
    edges: Vec<Edge>,
    adjacency: BTreeMap<u32, Vec<u32>>,
}

impl SignedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex ids in ascending order.
    ///
    /// Every component that needs a fixed vertex ordering (base-3
    /// enumeration, crossover cut points, qubit assignment) uses this one.
    pub fn vertex_ids(&self) -> Vec<u32> {
        self.vertices.keys().copied().collect()
    }

    /// Look up a vertex by id.
    pub fn vertex(&self, id: u32) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// The edge list.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbors of `v` in ascending order. Unknown ids have no neighbors.
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.adjacency.get(&v).map_or(&[], Vec::as_slice)
    }

    /// The edge joining `u` and `v`, if any.
    pub fn edge_between(&self, u: u32, v: u32) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(u, v))
    }

    /// The sign of the edge joining `u` and `v`, if any.
    pub fn sign_between(&self, u: u32, v: u32) -> Option<Sign> {
        self.edge_between(u, v).map(|e| e.sign)
    }

    /// Insert a vertex. No-op if a vertex with the same id already exists.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        if self.vertices.contains_key(&vertex.id) {
            return;
        }
        self.adjacency.insert(vertex.id, Vec::new());
        self.vertices.insert(vertex.id, vertex);
    }

    /// Remove a vertex and every incident edge. No-op on unknown ids.
    pub fn remove_vertex(&mut self, id: u32) {
        if self.vertices.remove(&id).is_none() {
            return;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        self.adjacency.remove(&id);
        for nbrs in self.adjacency.values_mut() {
            nbrs.retain(|&u| u != id);
        }
    }

    /// Insert an edge between `u` and `v` with the given sign.
    ///
    /// Idempotent: re-adding an existing pair overwrites only the sign and
    /// leaves `edges` and `adjacency` unchanged in size. Self-loops and
    /// edges to unknown vertices are silent no-ops.
    pub fn add_edge(&mut self, u: u32, v: u32, sign: Sign) {
        if u == v || !self.vertices.contains_key(&u) || !self.vertices.contains_key(&v) {
            return;
        }
        if let Some(existing) = self.edges.iter_mut().find(|e| e.connects(u, v)) {
            existing.sign = sign;
            return;
        }
        self.edges.push(Edge {
            source: u,
            target: v,
            sign,
            metadata: BTreeMap::new(),
        });
        self.link(u, v);
        self.link(v, u);
    }

    /// Remove the edge joining `u` and `v`. No-op if there is none.
    pub fn remove_edge(&mut self, u: u32, v: u32) {
        let before = self.edges.len();
        self.edges.retain(|e| !e.connects(u, v));
        if self.edges.len() == before {
            return;
        }
        self.unlink(u, v);
        self.unlink(v, u);
    }

    /// Flip the sign of the edge joining `u` and `v`. No-op if there is none.
    pub fn toggle_sign(&mut self, u: u32, v: u32) {
        if let Some(edge) = self.edges.iter_mut().find(|e| e.connects(u, v)) {
            edge.sign = edge.sign.toggled();
        }
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    fn link(&mut self, from: u32, to: u32) {
        let nbrs = self.adjacency.entry(from).or_default();
        if let Err(pos) = nbrs.binary_search(&to) {
            nbrs.insert(pos, to);
        }
    }

    fn unlink(&mut self, from: u32, to: u32) {
        if let Some(nbrs) = self.adjacency.get_mut(&from) {
            nbrs.retain(|&u| u != to);
        }
    }
}

// particular graphs
impl SignedGraph {
    fn from_positive_edges(n: u32, edges: &[(u32, u32)]) -> Self {
        let mut g = Self::new();
        for i in 0..n {
            g.add_vertex(Vertex::new(i, &format!("v{i}")));
        }
        for &(u, v) in edges {
            g.add_edge(u, v, Sign::Positive);
        }
        g
    }

    /// The path on `n` vertices with all-positive edges.
    pub fn path(n: u32) -> Self {
        let edges: Vec<_> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        Self::from_positive_edges(n, &edges)
    }

    /// The cycle on `n` vertices with all-positive edges.
    pub fn cycle(n: u32) -> Self {
        let mut edges: Vec<_> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        if n > 2 {
            edges.push((n - 1, 0));
        }
        Self::from_positive_edges(n, &edges)
    }

    /// The complete graph on `n` vertices with all-positive edges.
    pub fn complete(n: u32) -> Self {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..i {
                edges.push((i, j));
            }
        }
        Self::from_positive_edges(n, &edges)
    }
}

impl fmt::Display for SignedGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(V=[{}], E={{", self.vertex_count())?;
        for e in &self.edges {
            let s = match e.sign {
                Sign::Positive => '+',
                Sign::Negative => '-',
            };
            write!(f, " {}{s}{}", e.source, e.target)?;
        }
        write!(f, " }})")
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn two_vertices() -> SignedGraph {
        let mut g = SignedGraph::new();
        g.add_vertex(Vertex::new(0, "a"));
        g.add_vertex(Vertex::new(1, "b"));
        g
    }

    #[test]
    fn edge_insert_idempotent() {
        let mut g = two_vertices();
        g.add_edge(0, 1, Sign::Positive);
        g.add_edge(0, 1, Sign::Positive);
        g.add_edge(1, 0, Sign::Positive);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn edge_reinsert_overwrites_sign() {
        let mut g = two_vertices();
        g.add_edge(0, 1, Sign::Positive);
        g.add_edge(1, 0, Sign::Negative);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.sign_between(0, 1), Some(Sign::Negative));
    }

    #[test]
    fn invalid_input_is_a_noop() {
        let mut g = two_vertices();
        g.add_edge(0, 0, Sign::Positive); // self-loop
        g.add_edge(0, 7, Sign::Positive); // unknown endpoint
        g.add_vertex(Vertex::new(0, "duplicate"));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.vertex(0).unwrap().label, "a");
        g.remove_vertex(99);
        g.remove_edge(0, 1);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn remove_vertex_cascades() {
        let mut g = SignedGraph::path(4);
        g.remove_vertex(1);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[] as &[u32]);
        assert_eq!(g.neighbors(2), &[3]);
    }

    #[test]
    fn toggle_sign_unit() {
        let mut g = two_vertices();
        g.add_edge(0, 1, Sign::Positive);
        g.toggle_sign(0, 1);
        assert_eq!(g.sign_between(1, 0), Some(Sign::Negative));
        g.toggle_sign(1, 0);
        assert_eq!(g.sign_between(0, 1), Some(Sign::Positive));
    }

    #[test]
    fn particular_graphs() {
        assert_eq!(SignedGraph::path(5).edge_count(), 4);
        assert_eq!(SignedGraph::cycle(6).edge_count(), 6);
        assert_eq!(SignedGraph::complete(5).edge_count(), 10);
        let c6 = SignedGraph::cycle(6);
        assert_eq!(c6.neighbors(0), &[1, 5]);
    }
}
