use crate::state_estimator::{
    scalar::{ScalarKalman, ScalarParams},
    KalmanResult, StateEstimator,
};
use anyhow::ensure;
use rayon::prelude::*;

/// Independent scalar filters, e.g. one per sensor, advanced side by side.
pub struct FilterBank {
    filter: ScalarKalman,
    eststates: Vec<ScalarParams>,
}

impl FilterBank {
    pub fn init(eststates: Vec<ScalarParams>) -> Self {
        FilterBank {
            filter: ScalarKalman,
            eststates,
        }
    }

    pub fn eststates(&self) -> &[ScalarParams] {
        &self.eststates
    }

    /// Runs filter `i` over `streams[i]`. Each filter stops at its own first failure and
    /// leaves the others alone.
    pub fn run(&mut self, streams: &[Vec<f64>]) -> anyhow::Result<Vec<KalmanResult<Vec<f64>>>> {
        ensure!(
            streams.len() == self.eststates.len(),
            "{} observation streams for {} filters",
            streams.len(),
            self.eststates.len()
        );
        let filter = self.filter;
        let estimates = self
            .eststates
            .par_iter_mut()
            .zip(streams.par_iter())
            .map(|(eststate, zs)| {
                zs.iter()
                    .map(|&z| filter.advance(z, &mut *eststate))
                    .collect::<KalmanResult<Vec<f64>>>()
            })
            .collect();
        Ok(estimates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_estimator::KalmanError;

    #[test]
    fn test_bank_matches_sequential_filters() {
        let init = vec![
            ScalarParams::new(0.0, 1.0, 1.0, 1.0, 1e-4, 0.0025),
            ScalarParams::new(1.0, 0.5, 0.9, 2.0, 1e-3, 0.01),
        ];
        let streams = vec![vec![0.1, 0.2, 0.15, 0.18], vec![2.0, 1.8, 1.7]];

        let mut bank = FilterBank::init(init.clone());
        let results = bank.run(&streams).unwrap();

        let kf = ScalarKalman;
        for (i, (result, zs)) in results.iter().zip(streams.iter()).enumerate() {
            let mut eststate = init[i];
            let expected: Vec<f64> = zs
                .iter()
                .map(|&z| kf.advance(z, &mut eststate).unwrap())
                .collect();
            assert_eq!(result.as_ref().unwrap(), &expected);
            assert_eq!(bank.eststates()[i], eststate);
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let init = vec![
            ScalarParams::new(0.0, 0.0, 1.0, 0.0, 0.1, 0.0),
            ScalarParams::new(0.0, 1.0, 1.0, 1.0, 1e-4, 0.0025),
        ];
        let streams = vec![vec![1.0, 2.0], vec![1.0, 2.0]];
        let mut bank = FilterBank::init(init);
        let results = bank.run(&streams).unwrap();

        assert!(matches!(
            results[0],
            Err(KalmanError::ScalarInversionFailure { .. })
        ));
        assert_eq!(results[1].as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_stream_count_must_match() {
        let mut bank = FilterBank::init(vec![ScalarParams::new(0.0, 1.0, 1.0, 1.0, 0.0, 1.0)]);
        assert!(bank.run(&[]).is_err());
    }
}
