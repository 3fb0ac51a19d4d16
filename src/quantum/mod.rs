//! A small statevector quantum simulator and the graph-derived ansatz
//! consumed by the VQE solver.

mod ansatz;
mod state;

pub use ansatz::{Ansatz, Gate};
pub use state::{MAX_QUBITS, QuantumError, QuantumState};
