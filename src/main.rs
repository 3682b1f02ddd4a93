#![allow(non_snake_case)]
use anyhow::{bail, Context};
use log::info;
use scalar_kalman::{
    config::Config,
    data_parsing::load_observations,
    plotting, report,
    signal,
    simulator as sim,
};
use std::{io, path::PathBuf};

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    plot: Option<PathBuf>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut parsed.config,
                "--data" => &mut parsed.data,
                "--plot" => &mut parsed.plot,
                other => bail!(
                    "unexpected argument `{}`\nusage: scalar-kalman \
                     [--config <path>] [--data <path.json>] [--plot <path.svg>]",
                    other
                ),
            };
            let value = args.next().with_context(|| format!("`{}` needs a value", arg))?;
            *slot = Some(PathBuf::from(value));
        }
        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let observations = match &args.data {
        Some(path) => load_observations(path)?,
        None => signal::generate(&config.signal)?,
    };

    let run = sim::run_scalar(&config, &observations)?;
    report::write_csv(&run, io::stdout().lock())?;

    if let Some(path) = &args.plot {
        plotting::save_plot(&run, path)?;
        info!("plot written to {}", path.display());
    }
    Ok(())
}
