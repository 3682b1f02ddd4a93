use crate::state_estimator::KalmanResult;

pub trait Consistency {
    type Params;
    type Measurement;
    type GroundTruth;

    fn NIS(&self, eststate: &Self::Params, z: &Self::Measurement) -> KalmanResult<f64>;
    fn NEES(&self, eststate: &Self::Params, x_gt: &Self::GroundTruth) -> KalmanResult<f64>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Average {
    sum: f64,
    count: usize,
}

impl Average {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}
