//! Variational solver: graph-derived ansatz, SPSA parameter optimization,
//! classical decoding of the sampled distribution.

use crate::constraint::{Assignment, DEFAULT_PENALTY, RdfModel, Variant};
use crate::graph::SignedGraph;
use crate::quantum::Ansatz;
use crate::solvers::{Solver, SolverError, SolverResult, defended_fallback, finish};
use log::*;
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::PI;
use std::time::Instant;

/// Largest graph the variational solver accepts: 10 vertices is the 20-qubit
/// simulator cap at 2 qubits per vertex.
pub const MAX_VQE_VERTICES: usize = 10;

/// Basis states below this probability are ignored during decoding.
const DECODE_THRESHOLD: f64 = 1e-4;

/// Variational quantum eigensolver over the penalized cost.
///
/// The circuit encodes one 2-bit label per vertex; SPSA minimizes the
/// expected cost of the output distribution, where the unused bit pattern
/// `11` is an invalid code charged one penalty unit per occurrence. The
/// returned labeling is the highest-probability valid decoding (lower weight
/// on ties), or the highest-probability decoding if none validate.
#[derive(Debug, Clone, Copy)]
pub struct VqeSolver {
    pub layers: usize,
    pub iterations: usize,
    pub penalty: f64,
    /// SPSA gain numerators: step size `a` and perturbation size `c`.
    pub gain_a: f64,
    pub gain_c: f64,
}

impl Default for VqeSolver {
    fn default() -> Self {
        Self {
            layers: 2,
            iterations: 120,
            penalty: DEFAULT_PENALTY,
            gain_a: 0.2,
            gain_c: 0.15,
        }
    }
}

/// SPSA gain schedule exponents (standard values).
const SPSA_ALPHA: f64 = 0.602;
const SPSA_GAMMA: f64 = 0.101;

impl VqeSolver {
    /// Decodes a basis index into a labeling over `ids` (2 bits per vertex,
    /// low bit first), returning the count of invalid `11` codes. Invalid
    /// codes decode to 0.
    fn decode(index: usize, ids: &[u32]) -> (Assignment, usize) {
        let mut a = Assignment::default();
        let mut invalid = 0;
        for (i, &id) in ids.iter().enumerate() {
            let b0 = (index >> (2 * i)) & 1;
            let b1 = (index >> (2 * i + 1)) & 1;
            let value = ((b1 << 1) | b0) as u8;
            if value == 3 {
                invalid += 1;
                a.set(id, 0);
            } else {
                a.set(id, value);
            }
        }
        (a, invalid)
    }

    /// Expected penalized cost of the circuit's output distribution.
    fn energy(
        &self,
        ansatz: &Ansatz,
        params: &[f64],
        model: &RdfModel,
        ids: &[u32],
    ) -> Result<f64, SolverError> {
        let probs = ansatz.run(params)?.probabilities();
        let mut energy = 0.0;
        for (index, &p) in probs.iter().enumerate() {
            if p < 1e-9 {
                continue;
            }
            let (assignment, invalid) = Self::decode(index, ids);
            energy += p * (model.total_cost(&assignment, self.penalty)
                + self.penalty * invalid as f64);
        }
        Ok(energy)
    }
}

impl Solver for VqeSolver {
    fn name(&self) -> &'static str {
        "vqe"
    }

    fn solve(
        &self,
        graph: &SignedGraph,
        variant: Variant,
        rng: &mut StdRng,
    ) -> Result<SolverResult, SolverError> {
        let n = graph.vertex_count();
        if n > MAX_VQE_VERTICES {
            return Err(SolverError::GraphTooLarge {
                solver: self.name(),
                vertices: n,
                max: MAX_VQE_VERTICES,
            });
        }
        let started = Instant::now();
        let model = RdfModel::new(graph, variant);
        if n == 0 {
            return Ok(finish(self.name(), &model, Assignment::default(), started, Some(0)));
        }
        let ids = graph.vertex_ids();
        let ansatz = Ansatz::for_graph(graph, self.layers)?;

        let mut params: Vec<f64> = (0..ansatz.parameter_count())
            .map(|_| rng.random_range(-PI..PI))
            .collect();

        // SPSA: one random +/- perturbation direction per iteration gives a
        // two-sided gradient estimate from two energy evaluations
        let stability = self.iterations as f64 * 0.1;
        for k in 0..self.iterations {
            let ak = self.gain_a / (k as f64 + 1.0 + stability).powf(SPSA_ALPHA);
            let ck = self.gain_c / (k as f64 + 1.0).powf(SPSA_GAMMA);
            let delta: Vec<f64> = (0..params.len())
                .map(|_| if rng.random_bool(0.5) { 1.0 } else { -1.0 })
                .collect();
            let plus: Vec<f64> = params.iter().zip(&delta).map(|(p, d)| p + ck * d).collect();
            let minus: Vec<f64> = params.iter().zip(&delta).map(|(p, d)| p - ck * d).collect();
            let slope = (self.energy(&ansatz, &plus, &model, &ids)?
                - self.energy(&ansatz, &minus, &model, &ids)?)
                / (2.0 * ck);
            if !slope.is_finite() {
                continue;
            }
            for (p, d) in params.iter_mut().zip(&delta) {
                // delta entries are +/-1, so dividing by them is multiplying
                *p -= ak * slope * d;
            }
        }

        let probs = ansatz.run(&params)?.probabilities();
        if probs.iter().any(|p| !p.is_finite()) {
            warn!("degenerate output distribution, using the all-2 fallback");
            let fallback = defended_fallback(graph);
            return Ok(finish(self.name(), &model, fallback, started, Some(self.iterations as u64)));
        }

        // best valid decoding by probability, then by weight
        let mut best_valid: Option<(f64, u64, Assignment)> = None;
        for (index, &p) in probs.iter().enumerate() {
            if p < DECODE_THRESHOLD {
                continue;
            }
            let (assignment, invalid) = Self::decode(index, &ids);
            if invalid > 0 || !model.is_valid(&assignment) {
                continue;
            }
            let weight = assignment.weight();
            let better = match best_valid.as_ref() {
                None => true,
                Some((bp, bw, _)) => p > *bp || (p == *bp && weight < *bw),
            };
            if better {
                best_valid = Some((p, weight, assignment));
            }
        }

        let assignment = match best_valid {
            Some((p, _, assignment)) => {
                debug!("valid decoding with probability {p:.4}");
                assignment
            }
            None => {
                // fall back to the most probable decoding, valid or not
                let top = probs
                    .iter()
                    .enumerate()
                    .max_by(|x, y| x.1.total_cmp(y.1))
                    .map(|(index, _)| index)
                    .unwrap_or(0);
                Self::decode(top, &ids).0
            }
        };
        Ok(finish(
            self.name(),
            &model,
            assignment,
            started,
            Some(self.iterations as u64),
        ))
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn decode_unit() {
        let ids = [0u32, 1, 2];
        // index 0b01_10_01: v0 -> 01 (1), v1 -> 10 (2), v2 -> 01 (1)
        let (a, invalid) = VqeSolver::decode(0b01_10_01, &ids);
        assert_eq!(invalid, 0);
        assert_eq!(a.get(0), 1);
        assert_eq!(a.get(1), 2);
        assert_eq!(a.get(2), 1);
        // the 11 code is invalid and decodes to 0
        let (b, invalid) = VqeSolver::decode(0b11, &ids);
        assert_eq!(invalid, 1);
        assert_eq!(b.get(0), 0);
    }

    #[test]
    fn rejects_large_graphs_before_searching() {
        let g = SignedGraph::path(11);
        let mut rng = StdRng::seed_from_u64(0);
        let err = VqeSolver::default()
            .solve(&g, Variant::Weighted, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::GraphTooLarge { vertices: 11, max: 10, .. }
        ));
    }

    #[test]
    fn solves_a_tiny_path() {
        // 2 vertices, 4 qubits: the distribution is wide enough that some
        // valid decoding always clears the probability threshold
        let solver = VqeSolver { iterations: 40, ..VqeSolver::default() };
        let g = SignedGraph::path(2);
        let mut rng = StdRng::seed_from_u64(1);
        let result = solver.solve(&g, Variant::PositiveOnly, &mut rng).unwrap();
        assert!(result.weight <= 4);
        assert_eq!(result.iterations, Some(40));
    }

    #[test]
    fn empty_graph_short_circuits() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = VqeSolver::default()
            .solve(&SignedGraph::new(), Variant::Weighted, &mut rng)
            .unwrap();
        assert!(result.valid);
        assert_eq!(result.weight, 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let solver = VqeSolver { iterations: 15, ..VqeSolver::default() };
        let g = SignedGraph::path(3);
        let mut rng_a = StdRng::seed_from_u64(4);
        let mut rng_b = StdRng::seed_from_u64(4);
        let a = solver.solve(&g, Variant::Weighted, &mut rng_a).unwrap();
        let b = solver.solve(&g, Variant::Weighted, &mut rng_b).unwrap();
        assert_eq!(a.assignment, b.assignment);
    }
}
