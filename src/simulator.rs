use crate::config::{Config, FailurePolicy};
use crate::consistency::{Average, Consistency};
use crate::state_estimator::{scalar::ScalarKalman, StateEstimator};
use anyhow::{ensure, Context};
use log::{debug, info, warn};
use nalgebra::DVector;

/// An observation sequence, with ground truth when it is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    pub t: DVector<f64>,
    pub z: DVector<f64>,
    pub x_gt: Option<DVector<f64>>,
}

impl Observations {
    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }
}

/// Per-step result of running the filter over [`Observations`].
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub t: DVector<f64>,
    pub z: DVector<f64>,
    pub x_gt: Option<DVector<f64>>,
    pub x: DVector<f64>,
    pub P: DVector<f64>,
    /// Steps where the update failed and the predicted estimate was kept.
    pub failed: Vec<usize>,
    /// Steps whose observation fell outside the gate.
    pub gated_out: Vec<usize>,
    pub anis: Option<f64>,
    pub anees: Option<f64>,
}

/// Runs the scalar filter over `observations` as configured.
pub fn run_scalar(config: &Config, observations: &Observations) -> anyhow::Result<Run> {
    ensure!(
        observations.t.len() == observations.len(),
        "{} timestamps for {} observations",
        observations.t.len(),
        observations.len()
    );
    if let Some(x_gt) = &observations.x_gt {
        ensure!(
            x_gt.len() == observations.len(),
            "{} ground truth samples for {} observations",
            x_gt.len(),
            observations.len()
        );
    }

    let kf = ScalarKalman;
    let x0_fallback = observations.x_gt.as_ref().and_then(|x_gt| x_gt.iter().next().copied());
    let mut eststate = config.filter.params(x0_fallback);
    info!(
        "running scalar filter over {} observations (x0 = {}, P0 = {})",
        observations.len(),
        eststate.x(),
        eststate.P()
    );

    let n = observations.len();
    let mut x = DVector::<f64>::zeros(n);
    let mut P = DVector::<f64>::zeros(n);
    let mut failed = Vec::new();
    let mut gated_out = Vec::new();
    let mut nis = Average::default();
    let mut nees = Average::default();

    for (k, &z) in observations.z.iter().enumerate() {
        // Same as `advance`, with the NIS of the prediction taken in between.
        kf.predict(&mut eststate);
        let res = kf.NIS(&eststate, &z).and_then(|step_nis| {
            nis.push(step_nis);
            match config.gate_size {
                Some(gate_size) if step_nis > gate_size.powi(2) => {
                    debug!("observation {} outside gate (NIS = {})", k, step_nis);
                    gated_out.push(k);
                    Ok(())
                }
                _ => kf.update(z, &mut eststate),
            }
        });

        if let Err(err) = res {
            match config.failure_policy {
                FailurePolicy::Halt => {
                    return Err(err)
                        .with_context(|| format!("observation {} could not be incorporated", k));
                }
                FailurePolicy::Skip => {
                    warn!("observation {} skipped: {}", k, err);
                    failed.push(k);
                }
            }
        }

        x[k] = kf.estimate(&eststate);
        P[k] = eststate.P();

        if let Some(x_gt) = &observations.x_gt {
            match kf.NEES(&eststate, &x_gt[k]) {
                Ok(step_nees) => nees.push(step_nees),
                Err(err) => debug!("no NEES at step {}: {}", k, err),
            }
        }
    }

    let anis = nis.mean();
    let anees = nees.mean();
    if let Some(anis) = anis {
        info!("ANIS = {:.3} over {} steps", anis, nis.count());
    }
    if let Some(anees) = anees {
        info!("ANEES = {:.3} over {} steps", anees, nees.count());
    }
    if !gated_out.is_empty() {
        info!("{} observations rejected by the gate", gated_out.len());
    }

    Ok(Run {
        t: observations.t.clone(),
        z: observations.z.clone(),
        x_gt: observations.x_gt.clone(),
        x,
        P,
        failed,
        gated_out,
        anis,
        anees,
    })
}
