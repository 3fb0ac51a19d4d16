//! Maximum-clique search on the sign subgraphs and Ramsey-style checks.
//!
//! The exact side is a pivoted Bron–Kerbosch over one sign class; the
//! stochastic side is a single-edge-flip hill-climbing search for 2-colorings
//! of a complete graph avoiding monochromatic cliques of the target sizes
//! (a Ramsey lower-bound witness when it reaches zero violations).

use crate::graph::{Sign, SignedGraph};
use log::*;
use rand::Rng;

/// Dense adjacency over one sign class of a signed graph.
///
/// Vertices are reindexed to `0..n` in ascending id order; `ids` maps the
/// dense index back to the original vertex id.
#[derive(Debug, Clone)]
pub struct SignSubgraph {
    ids: Vec<u32>,
    adj: Vec<Vec<bool>>,
}

impl SignSubgraph {
    /// The subgraph of `graph` keeping only edges of the given sign.
    pub fn induced(graph: &SignedGraph, sign: Sign) -> Self {
        let ids = graph.vertex_ids();
        let n = ids.len();
        let mut adj = vec![vec![false; n]; n];
        for e in graph.edges() {
            if e.sign != sign {
                continue;
            }
            // ids is sorted, so both endpoints resolve
            if let (Ok(i), Ok(j)) = (
                ids.binary_search(&e.source),
                ids.binary_search(&e.target),
            ) {
                adj[i][j] = true;
                adj[j][i] = true;
            }
        }
        Self { ids, adj }
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the dense indices `u` and `v` are adjacent.
    #[inline]
    fn connected(&self, u: usize, v: usize) -> bool {
        self.adj[u][v]
    }

    /// Returns `true` if every pair of the given vertex ids is adjacent.
    pub fn is_clique(&self, clique: &[u32]) -> bool {
        for (k, &u) in clique.iter().enumerate() {
            for &v in &clique[k + 1..] {
                let (Ok(i), Ok(j)) = (self.ids.binary_search(&u), self.ids.binary_search(&v))
                else {
                    return false;
                };
                if !self.connected(i, j) {
                    return false;
                }
            }
        }
        true
    }

    /// One maximum clique, as ascending vertex ids (ties broken by
    /// discovery order).
    pub fn max_clique(&self) -> Vec<u32> {
        let n = self.order();
        let mut best = Vec::new();
        let mut r = Vec::new();
        self.bron_kerbosch(&mut r, (0..n).collect(), Vec::new(), &mut best);
        let mut clique: Vec<u32> = best.into_iter().map(|i| self.ids[i]).collect();
        clique.sort_unstable();
        clique
    }

    /// Pivoted Bron–Kerbosch with the `|R| + |P|` branch prune.
    fn bron_kerbosch(
        &self,
        r: &mut Vec<usize>,
        mut p: Vec<usize>,
        mut x: Vec<usize>,
        best: &mut Vec<usize>,
    ) {
        if p.is_empty() && x.is_empty() {
            if r.len() > best.len() {
                *best = r.clone();
            }
            return;
        }
        if r.len() + p.len() <= best.len() {
            return;
        }
        // a representative of P union X restricts branching to P \ N(pivot)
        let pivot = *p.iter().chain(x.iter()).next().unwrap();
        let branches: Vec<usize> = p
            .iter()
            .copied()
            .filter(|&v| !self.connected(pivot, v))
            .collect();
        for v in branches {
            let np = p.iter().copied().filter(|&u| self.connected(v, u)).collect();
            let nx = x.iter().copied().filter(|&u| self.connected(v, u)).collect();
            r.push(v);
            self.bron_kerbosch(r, np, nx, best);
            r.pop();
            p.retain(|&u| u != v);
            x.push(v);
        }
    }
}

/// A clique reaching a Ramsey target, naming which sign class fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueHit {
    pub sign: Sign,
    pub target: usize,
    pub clique: Vec<u32>,
}

impl CliqueHit {
    pub fn size(&self) -> usize {
        self.clique.len()
    }
}

/// Checks whether `graph` contains a positive clique of size `pos_target` or
/// a negative clique of size `neg_target`.
pub fn ramsey_check(
    graph: &SignedGraph,
    pos_target: usize,
    neg_target: usize,
) -> Option<CliqueHit> {
    for (sign, target) in [(Sign::Positive, pos_target), (Sign::Negative, neg_target)] {
        let clique = SignSubgraph::induced(graph, sign).max_clique();
        if clique.len() >= target {
            debug!("{sign:?} clique of size {} reaches target {target}", clique.len());
            return Some(CliqueHit { sign, target, clique });
        }
    }
    None
}

/// A 2-coloring of the edges of the complete graph on `0..n`, stored as a
/// flat upper-triangular vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeColoring {
    n: usize,
    colors: Vec<Sign>,
}

impl EdgeColoring {
    fn data_size(n: usize) -> usize {
        if n == 0 { 0 } else { n * (n - 1) / 2 }
    }

    fn flat_index(mut i: usize, mut j: usize) -> usize {
        if j < i {
            std::mem::swap(&mut i, &mut j);
        }
        debug_assert!(j > i);
        Self::data_size(j) + i
    }

    /// A uniformly random coloring of K_n.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let colors = (0..Self::data_size(n))
            .map(|_| {
                if rng.random_bool(0.5) {
                    Sign::Positive
                } else {
                    Sign::Negative
                }
            })
            .collect();
        Self { n, colors }
    }

    /// A coloring of K_n with every edge `color`.
    pub fn uniform(n: usize, color: Sign) -> Self {
        Self {
            n,
            colors: vec![color; Self::data_size(n)],
        }
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.n
    }

    /// Color of the edge `{i, j}`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Sign {
        self.colors[Self::flat_index(i, j)]
    }

    /// Set the color of the edge `{i, j}`.
    pub fn set(&mut self, i: usize, j: usize, color: Sign) {
        self.colors[Self::flat_index(i, j)] = color;
    }

    /// Flip the color of the edge `{i, j}`.
    pub fn flip(&mut self, i: usize, j: usize) {
        let idx = Self::flat_index(i, j);
        self.colors[idx] = self.colors[idx].toggled();
    }

    /// Number of monochromatic `k`-cliques in the given color, counted by
    /// direct recursive extension.
    pub fn monochromatic_count(&self, color: Sign, k: usize) -> u64 {
        if k == 0 || k > self.n {
            return if k == 0 { 1 } else { 0 };
        }
        let mut count = 0;
        let mut members = Vec::with_capacity(k);
        self.extend_count(color, k, 0, &mut members, &mut count);
        count
    }

    fn extend_count(
        &self,
        color: Sign,
        k: usize,
        start: usize,
        members: &mut Vec<usize>,
        count: &mut u64,
    ) {
        if members.len() == k {
            *count += 1;
            return;
        }
        for v in start..self.n {
            if members.iter().all(|&u| self.get(u, v) == color) {
                members.push(v);
                self.extend_count(color, k, v + 1, members, count);
                members.pop();
            }
        }
    }
}

/// Outcome of a counterexample search: the best coloring found, its
/// violation count and whether it witnesses the Ramsey lower bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColoringOutcome {
    pub coloring: EdgeColoring,
    pub violations: u64,
    pub is_witness: bool,
    pub iterations: u64,
}

/// Searches for a 2-coloring of K_n with no positive `pos_target`-clique and
/// no negative `neg_target`-clique, by single-edge-flip hill-climbing from a
/// random start. Flips that increase the violation count are rejected;
/// plateau moves are kept so the walk can escape flat regions.
pub fn search_counterexample<R: Rng>(
    n: usize,
    pos_target: usize,
    neg_target: usize,
    budget: u64,
    rng: &mut R,
) -> ColoringOutcome {
    let score = |c: &EdgeColoring| {
        c.monochromatic_count(Sign::Positive, pos_target)
            + c.monochromatic_count(Sign::Negative, neg_target)
    };
    let mut coloring = EdgeColoring::random(n, rng);
    let mut current = score(&coloring);
    let mut best = coloring.clone();
    let mut best_score = current;
    let mut iterations = 0;
    for _ in 0..budget {
        if current == 0 || n < 2 {
            break;
        }
        iterations += 1;
        let i = rng.random_range(0..n);
        let j = (i + rng.random_range(1..n)) % n;
        coloring.flip(i, j);
        let flipped = score(&coloring);
        if flipped <= current {
            current = flipped;
            if flipped < best_score {
                best_score = flipped;
                best = coloring.clone();
                trace!("improved to {best_score} monochromatic cliques");
            }
        } else {
            coloring.flip(i, j);
        }
    }
    if current < best_score {
        best_score = current;
        best = coloring;
    }
    info!(
        "counterexample search on K_{n} for ({pos_target},{neg_target}): \
         {best_score} violations after {iterations} flips"
    );
    ColoringOutcome {
        coloring: best,
        violations: best_score,
        is_witness: best_score == 0,
        iterations,
    }
}
