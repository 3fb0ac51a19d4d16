//! Deterministic construction of a parametrized circuit from graph topology.
//!
//! Each vertex owns two qubits (ascending id order): vertex rank `i` maps to
//! qubits `2i` and `2i+1`, so a basis state decodes to one 2-bit label per
//! vertex. The gate sequence is fixed given the graph and the layer count;
//! rotation angles are injected at run time.

use crate::graph::SignedGraph;
use crate::quantum::state::{MAX_QUBITS, QuantumError, QuantumState};

/// One gate of the circuit. Parametrized gates carry the index of their
/// trainable angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Hadamard(usize),
    Ry { target: usize, param: usize },
    Rz { target: usize, param: usize },
    Cnot { control: usize, target: usize },
}

/// A parametrized circuit derived from a graph.
#[derive(Debug, Clone)]
pub struct Ansatz {
    qubits: usize,
    gates: Vec<Gate>,
    params: usize,
}

impl Ansatz {
    /// Builds the ansatz for `graph` with the given entangling layer count.
    ///
    /// One Hadamard per qubit; per layer one RY and one RZ per qubit (each a
    /// trainable parameter), one CNOT per graph edge between the endpoints'
    /// first qubits, and one CNOT linking each vertex's own qubit pair; then
    /// a final RY per qubit. Parameter count is `qubits * (2 * layers + 1)`.
    pub fn for_graph(graph: &SignedGraph, layers: usize) -> Result<Self, QuantumError> {
        let ids = graph.vertex_ids();
        let qubits = ids.len() * 2;
        if qubits > MAX_QUBITS {
            return Err(QuantumError::TooManyQubits {
                qubits,
                max: MAX_QUBITS,
            });
        }
        let rank = |id: u32| ids.binary_search(&id).unwrap();

        let mut gates = Vec::new();
        let mut params = 0;
        let mut next_param = || {
            params += 1;
            params - 1
        };

        for q in 0..qubits {
            gates.push(Gate::Hadamard(q));
        }
        for _ in 0..layers {
            for q in 0..qubits {
                gates.push(Gate::Ry {
                    target: q,
                    param: next_param(),
                });
                gates.push(Gate::Rz {
                    target: q,
                    param: next_param(),
                });
            }
            for e in graph.edges() {
                gates.push(Gate::Cnot {
                    control: 2 * rank(e.source),
                    target: 2 * rank(e.target),
                });
            }
            for i in 0..ids.len() {
                gates.push(Gate::Cnot {
                    control: 2 * i,
                    target: 2 * i + 1,
                });
            }
        }
        for q in 0..qubits {
            gates.push(Gate::Ry {
                target: q,
                param: next_param(),
            });
        }

        Ok(Self {
            qubits,
            gates,
            params,
        })
    }

    /// Number of qubits, twice the vertex count.
    pub fn qubit_count(&self) -> usize {
        self.qubits
    }

    /// Number of trainable parameters.
    pub fn parameter_count(&self) -> usize {
        self.params
    }

    /// The gate sequence.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Runs the circuit on a fresh |0...0> state with the given angles.
    ///
    /// # Panics
    /// Panics if `params` does not match [`Self::parameter_count`].
    pub fn run(&self, params: &[f64]) -> Result<QuantumState, QuantumError> {
        assert_eq!(params.len(), self.params, "parameter count mismatch");
        let mut state = QuantumState::zero(self.qubits)?;
        for gate in &self.gates {
            match *gate {
                Gate::Hadamard(q) => state.h(q),
                Gate::Ry { target, param } => state.ry(target, params[param]),
                Gate::Rz { target, param } => state.rz(target, params[param]),
                Gate::Cnot { control, target } => state.cnot(control, target),
            }
        }
        Ok(state)
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gate_and_parameter_counts() {
        let g = SignedGraph::path(3); // 3 vertices, 2 edges, 6 qubits
        let layers = 2;
        let ansatz = Ansatz::for_graph(&g, layers).unwrap();
        assert_eq!(ansatz.qubit_count(), 6);
        assert_eq!(ansatz.parameter_count(), 6 * (2 * layers + 1));
        // H per qubit + layers * (2 rotations per qubit + edge CNOTs +
        // vertex-pair CNOTs) + final RY per qubit
        let expected = 6 + layers * (12 + 2 + 3) + 6;
        assert_eq!(ansatz.gates().len(), expected);
    }

    #[test]
    fn construction_is_deterministic() {
        let g = SignedGraph::cycle(4);
        let a = Ansatz::for_graph(&g, 1).unwrap();
        let b = Ansatz::for_graph(&g, 1).unwrap();
        assert_eq!(a.gates(), b.gates());
    }

    #[test]
    fn rejects_graphs_beyond_the_qubit_cap() {
        let g = SignedGraph::path(11); // 22 qubits
        assert!(matches!(
            Ansatz::for_graph(&g, 1),
            Err(QuantumError::TooManyQubits { qubits: 22, .. })
        ));
    }

    #[test]
    fn run_produces_a_normalized_state() {
        let g = SignedGraph::path(2);
        let ansatz = Ansatz::for_graph(&g, 2).unwrap();
        let params: Vec<f64> = (0..ansatz.parameter_count())
            .map(|i| 0.1 * (i as f64 + 1.0))
            .collect();
        let state = ansatz.run(&params).unwrap();
        let total: f64 = state.probabilities().iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-10);
    }
}
