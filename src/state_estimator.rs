pub mod scalar;

use thiserror::Error;

/// Below this magnitude a scalar is treated as zero and never inverted.
pub const INVERSION_THRESHOLD: f64 = 1e-8;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum KalmanError {
    #[error("failed to invert scalar {scalar_name} in operation")]
    ScalarInversionFailure { scalar_name: &'static str },
}

pub type KalmanResult<T> = std::result::Result<T, KalmanError>;

/// Inverts `value`, or fails if it is numerically indistinguishable from zero.
pub(crate) fn checked_inverse(value: f64, scalar_name: &'static str) -> KalmanResult<f64> {
    if value.abs() < INVERSION_THRESHOLD {
        return Err(KalmanError::ScalarInversionFailure { scalar_name });
    }
    Ok(1. / value)
}

pub trait StateEstimator {
    type Params;
    type Measurement;
    type Estimate;

    fn predict(&self, eststate: &mut Self::Params);

    fn update(&self, z: Self::Measurement, eststate: &mut Self::Params) -> KalmanResult<()>;

    /// Predicts one step ahead, then incorporates `z`. The prediction is kept even if the
    /// update fails.
    fn advance(
        &self,
        z: Self::Measurement,
        eststate: &mut Self::Params,
    ) -> KalmanResult<Self::Estimate> {
        self.predict(eststate);
        self.update(z, eststate)?;
        Ok(self.estimate(eststate))
    }

    fn estimate(&self, eststate: &Self::Params) -> Self::Estimate;

    fn loglikelihood(&self, z: &Self::Measurement, eststate: &Self::Params) -> KalmanResult<f64>;

    fn gate(
        &self,
        z: &Self::Measurement,
        eststate: &Self::Params,
        gate_size_square: f64,
    ) -> KalmanResult<bool>;
}
