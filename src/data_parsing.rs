use crate::simulator::Observations;
use anyhow::{bail, Context};
use log::info;
use nalgebra::DVector;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

fn default_ts() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Timestep {
    /// Time since the previous step.
    #[serde(default = "default_ts")]
    pub Ts: f64,
    pub Z: f64,
    #[serde(default)]
    pub Xgt: Option<f64>,
}

/// Collects timesteps into observations. Ground truth must be given for every step or none.
pub fn observations_from_timesteps(timesteps: &[Timestep]) -> anyhow::Result<Observations> {
    let n = timesteps.len();
    let with_truth = timesteps.iter().filter(|step| step.Xgt.is_some()).count();
    if with_truth != 0 && with_truth != n {
        bail!("ground truth given for {} of {} timesteps", with_truth, n);
    }

    let mut t = DVector::<f64>::zeros(n);
    for k in 1..n {
        t[k] = t[k - 1] + timesteps[k].Ts;
    }
    let z = DVector::from_iterator(n, timesteps.iter().map(|step| step.Z));
    let x_gt = if n > 0 && with_truth == n {
        Some(DVector::from_iterator(n, timesteps.iter().filter_map(|step| step.Xgt)))
    } else {
        None
    };

    Ok(Observations { t, z, x_gt })
}

pub fn read_dataset(reader: impl Read) -> anyhow::Result<Observations> {
    let timesteps: Vec<Timestep> = serde_json::from_reader(reader)?;
    observations_from_timesteps(&timesteps)
}

pub fn read_dataset_from_json(data_path: impl AsRef<Path>) -> anyhow::Result<Observations> {
    let data_path = data_path.as_ref();
    let file = File::open(data_path)
        .with_context(|| format!("opening dataset {}", data_path.display()))?;
    read_dataset(file).with_context(|| format!("parsing dataset {}", data_path.display()))
}

/// Loads a JSON dataset of timesteps.
pub fn load_observations(data_path: impl AsRef<Path>) -> anyhow::Result<Observations> {
    let data_path = data_path.as_ref();
    let observations = read_dataset_from_json(data_path)?;
    info!("loaded {} observations from {}", observations.len(), data_path.display());
    Ok(observations)
}
