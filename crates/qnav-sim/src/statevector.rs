//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use qnav_ir::{GateOp, QubitId};

use crate::MAX_QUBITS;
use crate::error::{SimError, SimResult};

/// 2×2 unitary acting on one qubit, rows indexed by output bit.
type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Amplitudes of an `n`-qubit register.
///
/// Index `i` holds the amplitude of basis state `i`, where qubit 0 is the
/// most significant bit. Gates mutate the amplitudes in place.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        check_width(num_qubits)?;
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap an explicit amplitude vector.
    ///
    /// The length must be a power of two. Normalization is not checked here;
    /// see [`StateVector::check_normalized`].
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() || len < 2 {
            return Err(SimError::InvalidConfiguration(format!(
                "amplitude vector length {len} is not a power of two >= 2"
            )));
        }
        let num_qubits = len.trailing_zeros() as usize;
        check_width(num_qubits)?;
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// `|a|²` for every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Fail with [`SimError::NumericInvariantViolation`] unless the squared
    /// norm is within `tolerance` of one.
    pub fn check_normalized(&self, tolerance: f64) -> SimResult<()> {
        let total = self.norm_sqr();
        if (total - 1.0).abs() > tolerance {
            return Err(SimError::NumericInvariantViolation { total });
        }
        Ok(())
    }

    /// Expectation value of Pauli-Z on `qubit`: `P(0) - P(1)`.
    pub fn expectation_z(&self, qubit: QubitId) -> SimResult<f64> {
        self.check_qubit(qubit)?;
        let mask = qubit.mask(self.num_qubits);
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let p = a.norm_sqr();
                if i & mask == 0 { p } else { -p }
            })
            .sum())
    }

    /// Overlap `|⟨self|other⟩|²`.
    pub fn fidelity(&self, other: &StateVector) -> SimResult<f64> {
        if self.num_qubits != other.num_qubits {
            return Err(SimError::InvalidConfiguration(format!(
                "cannot compare a {}-qubit state with a {}-qubit state",
                self.num_qubits, other.num_qubits
            )));
        }
        let inner: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        Ok(inner.norm_sqr())
    }

    /// Apply a gate to the statevector.
    ///
    /// The gate is validated against the register width first; an invalid
    /// gate leaves the amplitudes untouched.
    pub fn apply(&mut self, op: &GateOp) -> SimResult<()> {
        op.validate(self.num_qubits)?;
        let n = self.num_qubits;
        match op {
            GateOp::Hadamard { qubit } => self.apply_single(qubit.mask(n), &hadamard()),
            GateOp::PauliX { qubit } => self.apply_x(qubit.mask(n)),
            GateOp::PauliZ { qubit } => self.apply_phase_on_mask(qubit.mask(n), -ONE),
            GateOp::PhaseShift { qubit, theta } => {
                self.apply_phase_on_mask(qubit.mask(n), Complex64::from_polar(1.0, *theta));
            }
            GateOp::Ry { qubit, theta } => self.apply_single(qubit.mask(n), &ry(*theta)),
            GateOp::Rz { qubit, theta } => self.apply_single(qubit.mask(n), &rz(*theta)),
            GateOp::ControlledX { control, target } => {
                self.apply_cx(control.mask(n), target.mask(n));
            }
            GateOp::ControlledPhase {
                control,
                target,
                theta,
            } => {
                self.apply_phase_on_mask(
                    control.mask(n) | target.mask(n),
                    Complex64::from_polar(1.0, *theta),
                );
            }
            GateOp::MultiControlledPhaseFlip { qubits } => {
                let mask = qubits.iter().fold(0, |acc, q| acc | q.mask(n));
                self.apply_phase_on_mask(mask, -ONE);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    /// Apply `m` to every index pair differing only in the `mask` bit.
    fn apply_single(&mut self, mask: usize, m: &Matrix2) {
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_x(&mut self, mask: usize) {
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_cx(&mut self, ctrl_mask: usize, tgt_mask: usize) {
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    /// Multiply by `phase` every amplitude whose bits under `mask` are all 1.
    fn apply_phase_on_mask(&mut self, mask: usize, phase: Complex64) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp *= phase;
            }
        }
    }

    /// Project `qubit` onto `value` and renormalize.
    ///
    /// Returns the probability the projection had before renormalizing.
    pub(crate) fn collapse(&mut self, qubit: QubitId, value: u8) -> f64 {
        let mask = qubit.mask(self.num_qubits);
        let keep_set = value == 1;
        let mut kept = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == keep_set {
                kept += amp.norm_sqr();
            } else {
                *amp = ZERO;
            }
        }
        if kept > 0.0 {
            let norm = kept.sqrt();
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
        kept
    }

    pub(crate) fn check_qubit(&self, qubit: QubitId) -> SimResult<()> {
        if qubit.index() >= self.num_qubits {
            return Err(qnav_ir::IrError::InvalidQubitIndex {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: None,
            }
            .into());
        }
        Ok(())
    }
}

pub(crate) fn check_width(num_qubits: usize) -> SimResult<()> {
    if num_qubits == 0 {
        return Err(SimError::InvalidConfiguration(
            "register width must be at least 1".into(),
        ));
    }
    if num_qubits > MAX_QUBITS {
        return Err(SimError::InvalidConfiguration(format!(
            "{num_qubits} qubits exceeds the simulator limit of {MAX_QUBITS}"
        )));
    }
    Ok(())
}

fn hadamard() -> Matrix2 {
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[s, s], [s, -s]]
}

fn ry(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}

fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}
