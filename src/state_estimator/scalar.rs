use super::{checked_inverse, KalmanResult, StateEstimator};
use crate::consistency::Consistency;
use std::f64::consts::TAU as _2_PI;

/// Belief and model of a scalar filter without control input.
///
/// `A`, `H`, `Q` and `R` are fixed at construction. `x` and `P` only change through
/// [`ScalarKalman`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarParams {
    x: f64,
    P: f64,
    A: f64,
    H: f64,
    Q: f64,
    R: f64,
}

impl ScalarParams {
    pub fn new(x0: f64, P0: f64, A: f64, H: f64, Q: f64, R: f64) -> Self {
        ScalarParams {
            x: x0,
            P: P0,
            A,
            H,
            Q,
            R,
        }
    }

    /// Model-only constructor. The initial estimate and variance default to zero.
    pub fn from_model(A: f64, H: f64, Q: f64, R: f64, x0: Option<f64>, P0: Option<f64>) -> Self {
        Self::new(x0.unwrap_or(0.0), P0.unwrap_or(0.0), A, H, Q, R)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn P(&self) -> f64 {
        self.P
    }

    pub fn A(&self) -> f64 {
        self.A
    }

    pub fn H(&self) -> f64 {
        self.H
    }

    pub fn Q(&self) -> f64 {
        self.Q
    }

    pub fn R(&self) -> f64 {
        self.R
    }
}

/// Scalar Kalman filter. Holds no state of its own; every call works on the given
/// [`ScalarParams`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKalman;

impl ScalarKalman {
    /// Innovation `y = z - Hx` and its covariance `S = HPH + R`.
    pub fn innovation(&self, eststate: &ScalarParams, z: f64) -> (f64, f64) {
        let y = z - eststate.H * eststate.x;
        let S = eststate.H * eststate.P * eststate.H + eststate.R;
        (y, S)
    }
}

impl StateEstimator for ScalarKalman {
    type Params = ScalarParams;
    type Measurement = f64;
    type Estimate = f64;

    fn predict(&self, eststate: &mut ScalarParams) {
        eststate.x *= eststate.A;
        eststate.P = eststate.A * eststate.P * eststate.A + eststate.Q;
    }

    fn update(&self, z: f64, eststate: &mut ScalarParams) -> KalmanResult<()> {
        let (y, S) = self.innovation(eststate, z);
        let S_inv = checked_inverse(S, "innovation covariance `S`")?;

        let K = eststate.P * eststate.H * S_inv;
        eststate.x += K * y;
        eststate.P *= 1.0 - K * eststate.H;
        Ok(())
    }

    fn estimate(&self, eststate: &ScalarParams) -> f64 {
        eststate.x
    }

    fn loglikelihood(&self, z: &f64, eststate: &ScalarParams) -> KalmanResult<f64> {
        let nis = self.NIS(eststate, z)?;
        let (_, S) = self.innovation(eststate, *z);
        let llh = -0.5 * ((_2_PI * S).ln() + nis);
        Ok(llh)
    }

    fn gate(&self, z: &f64, eststate: &ScalarParams, gate_size_square: f64) -> KalmanResult<bool> {
        let nis = self.NIS(eststate, z)?;
        Ok(nis <= gate_size_square)
    }
}

impl Consistency for ScalarKalman {
    type Params = ScalarParams;
    type Measurement = f64;
    type GroundTruth = f64;

    fn NIS(&self, eststate: &ScalarParams, z: &f64) -> KalmanResult<f64> {
        let (y, S) = self.innovation(eststate, *z);
        let S_inv = checked_inverse(S, "innovation covariance `S`")?;
        Ok(y * y * S_inv)
    }

    fn NEES(&self, eststate: &ScalarParams, x_gt: &f64) -> KalmanResult<f64> {
        let x_err = eststate.x - x_gt;
        let P_inv = checked_inverse(eststate.P, "estimate-error variance `P`")?;
        Ok(x_err * x_err * P_inv)
    }
}
