//! Single-flip Metropolis search with geometric cooling.

use crate::constraint::{Assignment, DEFAULT_PENALTY, RdfModel, Variant};
use crate::graph::SignedGraph;
use crate::solvers::{Solver, SolverError, SolverResult, finish};
use log::*;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Instant;

/// Simulated annealing over the penalized cost. The state is a full
/// assignment; a move resamples one random vertex's label to a different
/// value. The best-cost assignment ever seen is returned, not the final one.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedAnnealingSolver {
    pub initial_temperature: f64,
    pub cooling: f64,
    pub floor: f64,
    pub penalty: f64,
}

impl Default for SimulatedAnnealingSolver {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling: 0.995,
            floor: 0.1,
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl Solver for SimulatedAnnealingSolver {
    fn name(&self) -> &'static str {
        "simulated-annealing"
    }

    fn solve(
        &self,
        graph: &SignedGraph,
        variant: Variant,
        rng: &mut StdRng,
    ) -> Result<SolverResult, SolverError> {
        let started = Instant::now();
        let model = RdfModel::new(graph, variant);
        let ids = graph.vertex_ids();
        if ids.is_empty() {
            return Ok(finish(self.name(), &model, Assignment::default(), started, Some(0)));
        }

        let mut current = Assignment::random(graph, rng);
        let mut current_cost = model.total_cost(&current, self.penalty);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut temperature = self.initial_temperature;
        let mut steps = 0u64;

        while temperature > self.floor {
            steps += 1;
            let v = ids[rng.random_range(0..ids.len())];
            let old = current.get(v);
            let new = (old + rng.random_range(1..3u8)) % 3;
            current.set(v, new);
            let cost = model.total_cost(&current, self.penalty);
            let delta = cost - current_cost;
            if delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                current_cost = cost;
                if cost < best_cost {
                    best_cost = cost;
                    best = current.clone();
                }
            } else {
                current.set(v, old);
            }
            temperature *= self.cooling;
        }
        debug!("annealing stopped after {steps} steps at cost {best_cost}");

        Ok(finish(self.name(), &model, best, started, Some(steps)))
    }
}
