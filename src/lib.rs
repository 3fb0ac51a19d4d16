//!Solvers for the (signed) Roman domination problem on small graphs,
//!with a clique engine for Ramsey-number checks.
//!
//!A *Roman domination function* labels every vertex with 0, 1 or 2 so that
//!every 0-labeled vertex has a neighbor labeled 2; the goal is to minimize
//!the total weight. On signed graphs, negative edges hinder defense, and
//!four [`Variant`]s of the validity rule are supported. Five solvers attack
//!the same objective: exhaustive enumeration, greedy construct-and-improve,
//!simulated annealing, a genetic algorithm and a variational quantum solver
//!backed by a statevector simulator.
//!
//!# Example
//!
//!```rust
//!use srdf::*;
//!use rand::SeedableRng;
//!use rand::rngs::StdRng;
//!
//!pub fn main() {
//!    // The 5-vertex path with all-positive edges.
//!    let graph = SignedGraph::path(5);
//!    let mut rng = StdRng::seed_from_u64(0);
//!
//!    // Exhaustive search under the default (weighted) variant.
//!    let result = BruteForceSolver
//!        .solve(&graph, Variant::default(), &mut rng)
//!        .unwrap();
//!    assert!(result.valid);
//!}
//!```

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_labels
)]

pub mod clique;
pub mod constraint;
pub mod graph;
pub mod quantum;
pub mod solvers;

pub use crate::clique::{CliqueHit, ColoringOutcome, EdgeColoring, SignSubgraph};
pub use crate::clique::{ramsey_check, search_counterexample};
pub use crate::constraint::{Assignment, DEFAULT_PENALTY, RdfModel, Variant};
pub use crate::graph::{Edge, MetaValue, Sign, SignedGraph, Vertex};
pub use crate::quantum::{Ansatz, MAX_QUBITS, QuantumError, QuantumState};
pub use crate::solvers::{
    BruteForceSolver, GeneticAlgorithmSolver, GreedySolver, MAX_BRUTE_FORCE_VERTICES,
    MAX_VQE_VERTICES, SimulatedAnnealingSolver, Solver, SolverError, SolverResult, VqeSolver,
};

#[macro_use]
extern crate serde_derive;

pub fn init_default_log() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
pub fn init_debug_log() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("debug"),
    )
    .try_init();
}
