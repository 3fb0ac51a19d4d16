//! Dense statevector simulation with a minimal gate set.
//!
//! The state is a vector of `2^q` complex amplitudes mutated in place by
//! gate application; every gate is O(2^q). Qubit `t` of basis index `i` is
//! bit `t` of `i`.

use num::complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;
use thiserror::Error;

/// Hard cap on the qubit count: 2^20 amplitudes is the largest state this
/// classical emulation will allocate.
pub const MAX_QUBITS: usize = 20;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuantumError {
    #[error("a {qubits}-qubit state exceeds the simulator cap of {max} qubits")]
    TooManyQubits { qubits: usize, max: usize },
}

/// A statevector over `qubits` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    qubits: usize,
    amps: Vec<Complex64>,
}

impl QuantumState {
    /// The all-zero basis state |0...0>.
    pub fn zero(qubits: usize) -> Result<Self, QuantumError> {
        if qubits > MAX_QUBITS {
            return Err(QuantumError::TooManyQubits {
                qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << qubits];
        amps[0] = Complex64::new(1.0, 0.0);
        Ok(Self { qubits, amps })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits
    }

    /// Dimension of the state, `2^qubits`.
    pub fn dim(&self) -> usize {
        self.amps.len()
    }

    /// The amplitude of one basis index.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amps[index]
    }

    /// Hadamard on `target`: `(a, b) -> ((a+b)/sqrt 2, (a-b)/sqrt 2)` over
    /// every amplitude pair differing only in bit `target`.
    pub fn h(&mut self, target: usize) {
        debug_assert!(target < self.qubits);
        let mask = 1usize << target;
        for i in 0..self.amps.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amps[i];
                let b = self.amps[j];
                self.amps[i] = (a + b) * FRAC_1_SQRT_2;
                self.amps[j] = (a - b) * FRAC_1_SQRT_2;
            }
        }
    }

    /// Real rotation RY(theta) on `target`.
    pub fn ry(&mut self, target: usize, theta: f64) {
        debug_assert!(target < self.qubits);
        let (sin, cos) = (theta / 2.0).sin_cos();
        let mask = 1usize << target;
        for i in 0..self.amps.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amps[i];
                let b = self.amps[j];
                self.amps[i] = a * cos - b * sin;
                self.amps[j] = a * sin + b * cos;
            }
        }
    }

    /// Phase rotation RZ(theta) on `target`: `e^{-i theta/2}` on the
    /// 0-component, `e^{+i theta/2}` on the 1-component.
    pub fn rz(&mut self, target: usize, theta: f64) {
        debug_assert!(target < self.qubits);
        let phase0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase1 = Complex64::from_polar(1.0, theta / 2.0);
        let mask = 1usize << target;
        for i in 0..self.amps.len() {
            if i & mask == 0 {
                self.amps[i] *= phase0;
                self.amps[i | mask] *= phase1;
            }
        }
    }

    /// CNOT: swap the amplitude pairs whose `control` bit is set.
    pub fn cnot(&mut self, control: usize, target: usize) {
        debug_assert!(control < self.qubits && target < self.qubits);
        debug_assert!(control != target);
        let cmask = 1usize << control;
        let tmask = 1usize << target;
        for i in 0..self.amps.len() {
            if i & cmask != 0 && i & tmask == 0 {
                self.amps.swap(i, i | tmask);
            }
        }
    }

    /// Measurement probabilities: `|amplitude|^2` per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn total_probability(state: &QuantumState) -> f64 {
        state.probabilities().iter().sum()
    }

    #[test]
    fn zero_state_unit() {
        let s = QuantumState::zero(3).unwrap();
        assert_eq!(s.dim(), 8);
        assert_relative_eq!(s.probabilities()[0], 1.0);
        assert!(QuantumState::zero(21).is_err());
        assert!(QuantumState::zero(MAX_QUBITS).is_ok());
    }

    #[test]
    fn hadamard_is_self_inverse() {
        let mut s = QuantumState::zero(2).unwrap();
        s.ry(0, 0.7); // something that is not a basis state
        s.cnot(0, 1);
        let before = s.clone();
        s.h(1);
        assert_ne!(s, before);
        s.h(1);
        for i in 0..s.dim() {
            assert_relative_eq!(s.amplitude(i).re, before.amplitude(i).re, epsilon = 1e-12);
            assert_relative_eq!(s.amplitude(i).im, before.amplitude(i).im, epsilon = 1e-12);
        }
    }

    #[test]
    fn gates_preserve_the_norm() {
        let mut s = QuantumState::zero(3).unwrap();
        s.h(0);
        s.ry(1, 1.3);
        s.rz(0, -0.4);
        s.cnot(0, 2);
        s.h(2);
        s.rz(2, PI / 3.0);
        assert_relative_eq!(total_probability(&s), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ry_rotates_in_the_real_plane() {
        let mut s = QuantumState::zero(1).unwrap();
        s.ry(0, PI);
        // RY(pi)|0> = |1>
        assert_relative_eq!(s.probabilities()[1], 1.0, epsilon = 1e-12);
        let mut half = QuantumState::zero(1).unwrap();
        half.ry(0, PI / 2.0);
        assert_relative_eq!(half.probabilities()[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn cnot_flips_conditionally() {
        // |10> (qubit 0 set) -> |11>
        let mut s = QuantumState::zero(2).unwrap();
        s.ry(0, PI);
        s.cnot(0, 1);
        assert_relative_eq!(s.probabilities()[3], 1.0, epsilon = 1e-12);
        // control clear: nothing happens
        let mut t = QuantumState::zero(2).unwrap();
        t.cnot(0, 1);
        assert_relative_eq!(t.probabilities()[0], 1.0);
    }

    #[test]
    fn rz_is_a_pure_phase() {
        let mut s = QuantumState::zero(1).unwrap();
        s.h(0);
        let before = s.probabilities();
        s.rz(0, 1.1);
        let after = s.probabilities();
        for (p, q) in before.iter().zip(&after) {
            assert_relative_eq!(*p, *q, epsilon = 1e-12);
        }
        // but the relative phase is visible after interference
        s.h(0);
        assert!(s.probabilities()[1] > 1e-3);
    }
}
