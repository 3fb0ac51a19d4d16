//! Five solver strategies over the one shared cost model.
//!
//! Every solver implements [`Solver`] and differs from the others only in
//! how it searches: cost evaluation routes exclusively through
//! [`RdfModel`](crate::constraint::RdfModel). Stochastic solvers draw all
//! randomness from the `StdRng` handle threaded through `solve`, so a seeded
//! run is reproducible.

mod annealing;
mod brute_force;
mod genetic;
mod greedy;
mod vqe;

pub use annealing::SimulatedAnnealingSolver;
pub use brute_force::{BruteForceSolver, MAX_BRUTE_FORCE_VERTICES};
pub use genetic::GeneticAlgorithmSolver;
pub use greedy::GreedySolver;
pub use vqe::{MAX_VQE_VERTICES, VqeSolver};

use crate::constraint::{Assignment, RdfModel, Variant};
use crate::graph::SignedGraph;
use crate::quantum::QuantumError;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Precondition failures, reported before any search work begins.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("{solver} accepts at most {max} vertices, the graph has {vertices}")]
    GraphTooLarge {
        solver: &'static str,
        vertices: usize,
        max: usize,
    },
    #[error(transparent)]
    Quantum(#[from] QuantumError),
}

/// The outcome of one solver invocation. Never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Name of the solver that produced this result.
    pub solver: String,
    /// The labeling found.
    pub assignment: Assignment,
    /// Total weight of the labeling.
    pub weight: u64,
    /// Whether the labeling is valid under the active variant.
    pub valid: bool,
    /// Wall time spent inside `solve`.
    pub elapsed: Duration,
    /// Iteration count, where the strategy has a natural one.
    pub iterations: Option<u64>,
}

/// Common contract of the five strategies.
pub trait Solver {
    /// Short stable name used in results and logs.
    fn name(&self) -> &'static str;

    /// Runs the search to completion (or to the internal iteration budget)
    /// and returns the best labeling found.
    fn solve(
        &self,
        graph: &SignedGraph,
        variant: Variant,
        rng: &mut StdRng,
    ) -> Result<SolverResult, SolverError>;
}

/// The deterministic always-defensible fallback: every vertex defends itself.
pub(crate) fn defended_fallback(graph: &SignedGraph) -> Assignment {
    Assignment::uniform(graph, 2)
}

pub(crate) fn finish(
    name: &'static str,
    model: &RdfModel,
    assignment: Assignment,
    started: Instant,
    iterations: Option<u64>,
) -> SolverResult {
    SolverResult {
        solver: name.to_owned(),
        weight: assignment.weight(),
        valid: model.is_valid(&assignment),
        assignment,
        elapsed: started.elapsed(),
        iterations,
    }
}
