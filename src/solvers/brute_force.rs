//! Exhaustive enumeration of all `3^n` labelings.

use crate::constraint::{Assignment, RdfModel, Variant};
use crate::graph::SignedGraph;
use crate::solvers::{Solver, SolverError, SolverResult, defended_fallback, finish};
use log::*;
use rand::rngs::StdRng;
use std::time::Instant;

/// Largest graph the exhaustive solver accepts: `3^14` is just under five
/// million labelings.
pub const MAX_BRUTE_FORCE_VERTICES: usize = 14;

/// Enumerates every labeling as the base-3 digit expansion of a counter and
/// keeps the minimum-weight one that is exactly valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSolver;

impl Solver for BruteForceSolver {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve(
        &self,
        graph: &SignedGraph,
        variant: Variant,
        _rng: &mut StdRng,
    ) -> Result<SolverResult, SolverError> {
        let n = graph.vertex_count();
        if n > MAX_BRUTE_FORCE_VERTICES {
            return Err(SolverError::GraphTooLarge {
                solver: self.name(),
                vertices: n,
                max: MAX_BRUTE_FORCE_VERTICES,
            });
        }
        let started = Instant::now();
        let model = RdfModel::new(graph, variant);
        let ids = graph.vertex_ids();
        let total = 3u64.pow(n as u32);
        debug!("enumerating {total} labelings of {n} vertices");

        let mut best: Option<Assignment> = None;
        let mut best_weight = u64::MAX;
        for counter in 0..total {
            let mut digits = counter;
            let mut a = Assignment::default();
            for &id in &ids {
                a.set(id, (digits % 3) as u8);
                digits /= 3;
            }
            if a.weight() < best_weight && model.is_valid(&a) {
                best_weight = a.weight();
                best = Some(a);
            }
        }

        // cannot occur for well-formed variants, guarded defensively
        let assignment = best.unwrap_or_else(|| {
            warn!("no labeling validated, using the all-2 fallback");
            defended_fallback(graph)
        });
        Ok(finish(self.name(), &model, assignment, started, Some(total)))
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run(graph: &SignedGraph, variant: Variant) -> SolverResult {
        let mut rng = StdRng::seed_from_u64(0);
        BruteForceSolver.solve(graph, variant, &mut rng).unwrap()
    }

    #[test]
    fn path_p5_optimum() {
        // a defender at v1 plus one at v3 covers everything: weight 4, and
        // no labeling of weight 3 validates
        let result = run(&SignedGraph::path(5), Variant::PositiveOnly);
        assert!(result.valid);
        assert_eq!(result.weight, 4);
        assert_eq!(result.iterations, Some(243));
    }

    #[test]
    fn cycle_c6_optimum() {
        // two opposite defenders dominate the 6-cycle
        let result = run(&SignedGraph::cycle(6), Variant::PositiveOnly);
        assert!(result.valid);
        assert_eq!(result.weight, 4);
    }

    #[test]
    fn single_vertex_needs_weight_one() {
        let result = run(&SignedGraph::path(1), Variant::PositiveOnly);
        assert!(result.valid);
        assert_eq!(result.weight, 1);
    }

    #[test]
    fn empty_graph_is_trivially_solved() {
        let result = run(&SignedGraph::new(), Variant::Weighted);
        assert!(result.valid);
        assert_eq!(result.weight, 0);
    }

    #[test]
    fn rejects_large_graphs_before_searching() {
        let g = SignedGraph::complete(15);
        let mut rng = StdRng::seed_from_u64(0);
        let err = BruteForceSolver
            .solve(&g, Variant::Weighted, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::GraphTooLarge { vertices: 15, max: 14, .. }
        ));
    }
}
