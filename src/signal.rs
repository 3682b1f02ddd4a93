use crate::config::{NoiseConfig, SignalConfig};
use crate::simulator::Observations;
use anyhow::ensure;
use nalgebra::DVector;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};
use std::f64::consts::TAU as _2_PI;

fn sample_noise(noise: NoiseConfig, n: usize, rng: &mut StdRng) -> anyhow::Result<DVector<f64>> {
    let samples = match noise {
        NoiseConfig::Uniform { max } => {
            ensure!(
                max.is_finite() && max >= 0.0,
                "uniform noise bound must be finite and non-negative, got {}",
                max
            );
            let dist = Uniform::new_inclusive(-max, max);
            DVector::from_iterator(n, dist.sample_iter(rng).take(n))
        }
        NoiseConfig::Gaussian { std } => {
            let dist = Normal::new(0.0, std)?;
            DVector::from_iterator(n, dist.sample_iter(rng).take(n))
        }
    };
    Ok(samples)
}

/// Samples the configured sinusoid at `t_k = k * ts` and adds noise to get the observations.
pub fn generate(config: &SignalConfig) -> anyhow::Result<Observations> {
    ensure!(config.ts > 0.0, "sampling time must be positive, got {}", config.ts);
    let n = config.num_steps;
    let w = _2_PI * config.frequency;

    let t = DVector::from_fn(n, |k, _| config.ts * k as f64);
    let x_gt = t.map(|t| config.magnitude * (w * t - config.phase).sin() + config.dc_offset);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let z = &x_gt + sample_noise(config.noise, n, &mut rng)?;

    Ok(Observations { t, z, x_gt: Some(x_gt) })
}
