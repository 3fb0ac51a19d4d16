//! Violation-driven construction followed by a label-reduction pass.

use crate::constraint::{Assignment, DEFAULT_PENALTY, RdfModel, Variant};
use crate::graph::{Sign, SignedGraph};
use crate::solvers::{Solver, SolverError, SolverResult, finish};
use log::*;
use rand::rngs::StdRng;
use std::time::Instant;

/// Safety cap on construction rounds.
const CONSTRUCTION_ROUNDS: usize = 1000;

/// Builds a valid labeling by repeatedly defending the first violating
/// vertex, then tries to lower every non-zero label. Local optima are
/// accepted as final; there is no backtracking past the reduction phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl GreedySolver {
    /// Picks the positive neighbor of `v` whose promotion to 2 removes the
    /// most violations, if any promotion is strictly improving.
    fn best_defender(
        &self,
        model: &RdfModel,
        graph: &SignedGraph,
        a: &Assignment,
        v: u32,
        current_violations: usize,
    ) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for &u in graph.neighbors(v) {
            if a.get(u) == 2 || graph.sign_between(v, u) != Some(Sign::Positive) {
                continue;
            }
            let mut trial = a.clone();
            trial.set(u, 2);
            let after = model.violations(&trial).len();
            if after < current_violations && best.is_none_or(|(_, b)| after < b) {
                best = Some((u, after));
            }
        }
        best.map(|(u, _)| u)
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(
        &self,
        graph: &SignedGraph,
        variant: Variant,
        _rng: &mut StdRng,
    ) -> Result<SolverResult, SolverError> {
        let started = Instant::now();
        let model = RdfModel::new(graph, variant);
        let mut a = Assignment::uniform(graph, 0);
        let mut rounds = 0u64;

        // construction: defend violating vertices until none remain
        for _ in 0..CONSTRUCTION_ROUNDS {
            let violations = model.violations(&a);
            let Some(&v) = violations.first() else { break };
            rounds += 1;
            match self.best_defender(&model, graph, &a, v, violations.len()) {
                Some(u) => a.set(u, 2),
                // no neighbor helps: the vertex defends itself
                None => a.set(v, 2),
            }
        }
        debug!("construction done after {rounds} rounds, weight {}", a.weight());

        // reduction: two passes lowering labels where validity and cost allow
        for _ in 0..2 {
            for v in graph.vertex_ids() {
                let label = a.get(v);
                if label == 0 {
                    continue;
                }
                let cost = model.total_cost(&a, DEFAULT_PENALTY);
                a.set(v, label - 1);
                if !model.is_valid(&a) || model.total_cost(&a, DEFAULT_PENALTY) > cost {
                    a.set(v, label);
                }
            }
        }

        Ok(finish(self.name(), &model, a, started, Some(rounds)))
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Vertex;
    use rand::SeedableRng;

    fn run(graph: &SignedGraph, variant: Variant) -> SolverResult {
        let mut rng = StdRng::seed_from_u64(0);
        GreedySolver.solve(graph, variant, &mut rng).unwrap()
    }

    #[test]
    fn produces_valid_labelings() {
        for g in [
            SignedGraph::path(7),
            SignedGraph::cycle(8),
            SignedGraph::complete(6),
        ] {
            for variant in [Variant::PositiveOnly, Variant::Blocking, Variant::Weighted] {
                let result = run(&g, variant);
                assert!(result.valid, "{variant:?} on {g}");
            }
        }
    }

    #[test]
    fn reduction_trims_excess_defense() {
        // a star: one central defender suffices
        let mut g = SignedGraph::new();
        for i in 0..6 {
            g.add_vertex(Vertex::new(i, "v"));
        }
        for i in 1..6 {
            g.add_edge(0, i, Sign::Positive);
        }
        let result = run(&g, Variant::PositiveOnly);
        assert!(result.valid);
        assert_eq!(result.weight, 2);
        assert_eq!(result.assignment.get(0), 2);
    }

    #[test]
    fn self_defense_when_no_neighbor_helps() {
        // isolated vertices can only defend themselves
        let mut g = SignedGraph::new();
        g.add_vertex(Vertex::new(0, "lone"));
        let result = run(&g, Variant::PositiveOnly);
        assert!(result.valid);
        assert_eq!(result.weight, 1); // promoted to 2, then reduced to 1
    }

    #[test]
    fn empty_graph_is_a_noop() {
        let result = run(&SignedGraph::new(), Variant::Weighted);
        assert!(result.valid);
        assert_eq!(result.weight, 0);
        assert_eq!(result.iterations, Some(0));
    }
}
