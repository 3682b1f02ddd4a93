use crate::simulator::Run;
use plotters::prelude::*;
use std::path::Path;

// Bounds over every plotted series, padded so points do not sit on the frame.
fn y_range(run: &Run) -> (f64, f64) {
    let truth = run.x_gt.iter().flat_map(|x_gt| x_gt.iter());
    let (lo, hi) = run
        .z
        .iter()
        .chain(run.x.iter())
        .chain(truth)
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo > hi {
        return (-1.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    (lo - pad, hi + pad)
}

/// Draws observations as points, the estimate as a line and the truth (if known) to an SVG file.
pub fn save_plot(run: &Run, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let t_max = run.t.iter().copied().fold(0.0, f64::max).max(1e-3);
    let (y_min, y_max) = y_range(run);

    let root = SVGBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Scalar Kalman Filter Example", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..t_max, y_min..y_max)?;
    chart.configure_mesh().x_desc("Time [s]").draw()?;

    chart
        .draw_series(
            run.t
                .iter()
                .zip(run.z.iter())
                .map(|(&t, &z)| Circle::new((t, z), 3, BLUE.mix(0.25).filled())),
        )?
        .label("input")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.mix(0.25).filled()));
    chart
        .draw_series(LineSeries::new(
            run.t.iter().copied().zip(run.x.iter().copied()),
            &RED,
        ))?
        .label("kalman filter output")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    if let Some(x_gt) = &run.x_gt {
        chart
            .draw_series(LineSeries::new(
                run.t.iter().copied().zip(x_gt.iter().copied()),
                &GREEN,
            ))?
            .label("truth")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
