use crate::simulator::Run;
use itertools::izip;
use std::io::{self, Write};

/// Writes one `truth,observation,estimate` line per step. Truth is left empty when unknown.
pub fn write_csv(run: &Run, mut writer: impl Write) -> io::Result<()> {
    match &run.x_gt {
        Some(x_gt) => {
            for (x_gt, z, x) in izip!(x_gt.iter(), run.z.iter(), run.x.iter()) {
                writeln!(writer, "{},{},{}", x_gt, z, x)?;
            }
        }
        None => {
            for (z, x) in run.z.iter().zip(run.x.iter()) {
                writeln!(writer, ",{},{}", z, x)?;
            }
        }
    }
    writer.flush()
}
