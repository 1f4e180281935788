//! Line charts of average timing per strategy across one sweep.
//!
//! Charts are written to disk (PNG by default, SVG when the path ends in `.svg`) instead of
//! being shown interactively, so the driver never blocks on a viewer.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::aggregate::Strategy;
use crate::error::{BenchError, BenchResult};

pub const Y_LABEL: &str = "Time in Seconds (s)";

fn plot_err<E: std::fmt::Display>(e: E) -> BenchError {
    BenchError::Plot(e.to_string())
}

fn series_color(strategy: Strategy) -> RGBColor {
    match strategy {
        Strategy::Pivot => RGBColor(31, 119, 180),
        Strategy::Case => RGBColor(255, 127, 14),
        Strategy::Spj => RGBColor(44, 160, 44),
    }
}

/// Marker shape per strategy: PIVOT circle, CASE square, SPJ triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
}

pub fn marker_for(strategy: Strategy) -> Marker {
    match strategy {
        Strategy::Pivot => Marker::Circle,
        Strategy::Case => Marker::Square,
        Strategy::Spj => Marker::Triangle,
    }
}

/// Data for one chart: shared x values and one timing series per strategy.
#[derive(Debug, Clone)]
pub struct SweepChart<'a> {
    pub x: &'a [f64],
    pub pivot: &'a [f64],
    pub case: &'a [f64],
    pub spj: &'a [f64],
    pub xlabel: &'a str,
}

impl<'a> SweepChart<'a> {
    pub fn title(&self) -> String {
        format!("Time Complexity Analysis ({})", self.xlabel)
    }

    fn series(&self) -> [(Strategy, &'a [f64]); 3] {
        [(Strategy::Pivot, self.pivot), (Strategy::Case, self.case), (Strategy::Spj, self.spj)]
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.x.is_empty() {
            return Err(BenchError::Plot(format!("no sweep points to plot for '{}'", self.xlabel)));
        }
        for (s, ys) in self.series() {
            if ys.len() != self.x.len() {
                return Err(BenchError::Plot(format!(
                    "{} series has {} points but the sweep has {}",
                    s.label(),
                    ys.len(),
                    self.x.len()
                )));
            }
        }
        Ok(())
    }

    fn x_range(&self) -> (f64, f64) {
        let lo = self.x.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = self.x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if (hi - lo).abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }

    fn y_max(&self) -> f64 {
        self.series()
            .iter()
            .flat_map(|(_, ys)| ys.iter())
            .cloned()
            .fold(0.0, f64::max)
            .max(1e-9)
            * 1.1
    }
}

/// Render `chart` to `output_path`, creating nothing else on disk.
pub fn plot_results(chart: &SweepChart<'_>, output_path: &Path, size: (u32, u32)) -> BenchResult<()> {
    chart.validate()?;
    let is_svg = output_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if is_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_chart(&root, chart)
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_chart(&root, chart)
    }
}

fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &SweepChart<'_>) -> BenchResult<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;
    let (x_lo, x_hi) = chart.x_range();
    let title = chart.title();

    let mut ctx = ChartBuilder::on(root)
        .caption(&title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, 0.0..chart.y_max())
        .map_err(plot_err)?;

    // mesh lines double as the grid
    ctx.configure_mesh()
        .x_desc(chart.xlabel)
        .y_desc(Y_LABEL)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.4}", y))
        .draw()
        .map_err(plot_err)?;

    for (strategy, ys) in chart.series() {
        let color = series_color(strategy);
        let points: Vec<(f64, f64)> = chart.x.iter().cloned().zip(ys.iter().cloned()).collect();

        ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(plot_err)?
            .label(strategy.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        let style = color.filled();
        match marker_for(strategy) {
            Marker::Circle => {
                ctx.draw_series(points.iter().map(|&p| Circle::new(p, 5, style))).map_err(plot_err)?;
            }
            Marker::Square => {
                ctx.draw_series(points.iter().map(|&p| EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], style)))
                    .map_err(plot_err)?;
            }
            Marker::Triangle => {
                ctx.draw_series(points.iter().map(|&p| TriangleMarker::new(p, 6, style))).map_err(plot_err)?;
            }
        }
    }

    // explicit font and margin so the widest label ("PIVOT") sizes the box and "SPJ" is not clipped
    ctx.configure_series_labels()
        .label_font(("sans-serif", 18))
        .margin(10)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_differ_per_strategy() {
        let m: Vec<Marker> = Strategy::ALL.iter().map(|s| marker_for(*s)).collect();
        assert_eq!(m, vec![Marker::Circle, Marker::Square, Marker::Triangle]);
    }

    #[test]
    fn title_names_the_axis() {
        let x = [1.0];
        let chart = SweepChart { x: &x, pivot: &x, case: &x, spj: &x, xlabel: "Fact Table Size (N)" };
        assert_eq!(chart.title(), "Time Complexity Analysis (Fact Table Size (N))");
    }

    #[test]
    fn mismatched_series_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let x = [1.0, 2.0];
        let short = [0.1];
        let chart = SweepChart { x: &x, pivot: &x, case: &short, spj: &x, xlabel: "d" };
        let err = plot_results(&chart, &path, (200, 120)).unwrap_err();
        assert!(err.to_string().contains("CASE series has 1 points"));
        assert!(!path.exists());
    }

    #[test]
    fn svg_chart_carries_every_series_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vary_distinct_groups_d.svg");
        let x = [8.0, 16.0, 32.0];
        let pivot = [0.001, 0.002, 0.003];
        let case = [0.004, 0.008, 0.016];
        let spj = [0.005, 0.009, 0.017];
        let chart = SweepChart { x: &x, pivot: &pivot, case: &case, spj: &spj, xlabel: "Distinct Grouping Columns (d)" };
        plot_results(&chart, &path, (1000, 600)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.is_empty());
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
        for label in ["PIVOT", "CASE", "SPJ", Y_LABEL, "Time Complexity Analysis (Distinct Grouping Columns (d))"] {
            assert!(svg.contains(label), "missing '{}' in rendered chart", label);
        }
    }

    #[test]
    fn empty_sweep_rejected() {
        let chart = SweepChart { x: &[], pivot: &[], case: &[], spj: &[], xlabel: "n" };
        assert_eq!(chart.validate().unwrap_err().code_str(), "plot_error");
    }

    #[test]
    fn ranges_are_padded() {
        let x = [8.0, 128.0];
        let y = [0.5, 1.0];
        let chart = SweepChart { x: &x, pivot: &y, case: &y, spj: &y, xlabel: "d" };
        let (lo, hi) = chart.x_range();
        assert!(lo < 8.0 && hi > 128.0);
        assert!((chart.y_max() - 1.1).abs() < 1e-12);
    }
}
