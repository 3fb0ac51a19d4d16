//! Validity rules, violations and penalized cost for the four signed Roman
//! domination variants.
//!
//! Every solver optimizes through [`RdfModel`]; none of them is allowed its
//! own objective, so solver behavior differences come only from the search
//! strategy.

use crate::graph::{Sign, SignedGraph};
use rand::Rng;
use std::collections::BTreeMap;

/// Penalty weight shared by the stochastic solvers.
pub const DEFAULT_PENALTY: f64 = 20.0;

/// The validity rule in force for a problem instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// A: a 0-labeled vertex needs a positive neighbor labeled 2.
    PositiveOnly,
    /// B: a 0-labeled vertex needs strictly more positive defenders than
    /// negative ones.
    Blocking,
    /// C: rule (i) as variant A, plus the support inequality
    /// `f(v) + sum of f(u) * sign(v,u) >= 1` at every vertex.
    #[default]
    Weighted,
    /// D: placeholder, defers to variant A's rule. The source never defines
    /// a multi-hop semantics, so none is invented here.
    Distance,
}

/// A labeling `f: V -> {0, 1, 2}`.
///
/// 0 = undefended, 1 = self-defended, 2 = defender. Vertices absent from the
/// map are labeled 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    labels: BTreeMap<u32, u8>,
}

impl Assignment {
    /// Label every vertex of `graph` with `value`.
    pub fn uniform(graph: &SignedGraph, value: u8) -> Self {
        debug_assert!(value <= 2);
        Self {
            labels: graph.vertex_ids().into_iter().map(|v| (v, value)).collect(),
        }
    }

    /// Label every vertex of `graph` uniformly at random.
    pub fn random<R: Rng>(graph: &SignedGraph, rng: &mut R) -> Self {
        Self {
            labels: graph
                .vertex_ids()
                .into_iter()
                .map(|v| (v, rng.random_range(0..3u8)))
                .collect(),
        }
    }

    /// Build an assignment from explicit (vertex, label) pairs.
    pub fn from_labels(pairs: impl IntoIterator<Item = (u32, u8)>) -> Self {
        let labels: BTreeMap<u32, u8> = pairs.into_iter().collect();
        debug_assert!(labels.values().all(|&x| x <= 2));
        Self { labels }
    }

    /// The label of `v` (0 if unset).
    #[inline]
    pub fn get(&self, v: u32) -> u8 {
        self.labels.get(&v).copied().unwrap_or(0)
    }

    /// Set the label of `v`.
    #[inline]
    pub fn set(&mut self, v: u32, value: u8) {
        debug_assert!(value <= 2);
        self.labels.insert(v, value);
    }

    /// Iterator on (vertex, label) pairs in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.labels.iter().map(|(&v, &x)| (v, x))
    }

    /// Total weight, the sum of all labels.
    pub fn weight(&self) -> u64 {
        self.labels.values().map(|&x| u64::from(x)).sum()
    }
}

/// The constraint model: one graph, one variant, one objective.
#[derive(Debug, Clone, Copy)]
pub struct RdfModel<'a> {
    graph: &'a SignedGraph,
    variant: Variant,
}

impl<'a> RdfModel<'a> {
    pub fn new(graph: &'a SignedGraph, variant: Variant) -> Self {
        Self { graph, variant }
    }

    pub fn graph(&self) -> &'a SignedGraph {
        self.graph
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Signed defense balance at `v`: `f(v) + sum of f(u) * sign(v,u)`.
    fn support(&self, v: u32, a: &Assignment) -> i64 {
        let mut s = i64::from(a.get(v));
        for &u in self.graph.neighbors(v) {
            // adjacency and edges are kept in sync, so the sign exists
            if let Some(sign) = self.graph.sign_between(v, u) {
                s += i64::from(a.get(u)) * sign.value();
            }
        }
        s
    }

    /// Returns `true` if some positive neighbor of `v` is labeled 2.
    fn defended(&self, v: u32, a: &Assignment) -> bool {
        self.graph
            .neighbors(v)
            .iter()
            .any(|&u| a.get(u) == 2 && self.graph.sign_between(v, u) == Some(Sign::Positive))
    }

    fn vertex_ok(&self, v: u32, a: &Assignment) -> bool {
        match self.variant {
            // Variant D is a documented placeholder for A.
            Variant::PositiveOnly | Variant::Distance => a.get(v) != 0 || self.defended(v, a),
            Variant::Blocking => {
                if a.get(v) != 0 {
                    return true;
                }
                let mut pos = 0usize;
                let mut neg = 0usize;
                for &u in self.graph.neighbors(v) {
                    if a.get(u) == 2 {
                        match self.graph.sign_between(v, u) {
                            Some(Sign::Positive) => pos += 1,
                            Some(Sign::Negative) => neg += 1,
                            None => {}
                        }
                    }
                }
                pos > neg
            }
            Variant::Weighted => {
                (a.get(v) != 0 || self.defended(v, a)) && self.support(v, a) >= 1
            }
        }
    }

    /// Conjunction of the per-vertex rule over all vertices.
    pub fn is_valid(&self, a: &Assignment) -> bool {
        self.graph.vertex_ids().iter().all(|&v| self.vertex_ok(v, a))
    }

    /// Vertices failing their rule, deduplicated and in ascending order.
    pub fn violations(&self, a: &Assignment) -> Vec<u32> {
        self.graph
            .vertex_ids()
            .into_iter()
            .filter(|&v| !self.vertex_ok(v, a))
            .collect()
    }

    /// Total weight of the assignment.
    pub fn weight(&self, a: &Assignment) -> u64 {
        a.weight()
    }

    /// Negative edges whose both endpoints are labeled 2: two declared
    /// defenders in direct conflict.
    pub fn attack_conflicts(&self, a: &Assignment) -> Vec<(u32, u32)> {
        self.graph
            .edges()
            .iter()
            .filter(|e| e.sign == Sign::Negative && a.get(e.source) == 2 && a.get(e.target) == 2)
            .map(|e| (e.source, e.target))
            .collect()
    }

    /// The penalized cost shared by every stochastic solver.
    ///
    /// Weight plus `penalty` per violating vertex. Variant C adds a
    /// continuous deficit term (the amount by which the support inequality
    /// falls short of 1, at half penalty scale); the other variants add a
    /// penalty per attack conflict instead. The asymmetry is deliberate:
    /// variant C's support rule already charges negative-sign defenders.
    pub fn total_cost(&self, a: &Assignment, penalty: f64) -> f64 {
        let mut cost = self.weight(a) as f64 + penalty * self.violations(a).len() as f64;
        match self.variant {
            Variant::Weighted => {
                let mut deficit = 0i64;
                for v in self.graph.vertex_ids() {
                    let s = self.support(v, a);
                    if s < 1 {
                        deficit += 1 - s;
                    }
                }
                cost += 0.5 * penalty * deficit as f64;
            }
            _ => {
                cost += penalty * self.attack_conflicts(a).len() as f64;
            }
        }
        cost
    }
}
