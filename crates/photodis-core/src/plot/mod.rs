//! Comparison figures rendered with `plotters`.
//!
//! Three views: cross-section overlays against published measurements,
//! interaction/energy-loss length curves per model, and the percentage
//! difference between the two models. Output backend is chosen from the
//! file extension (`.svg` or bitmap).

use crate::common::constants::adiabatic_length_mpc;
use crate::common::nuclide::Nuclide;
use crate::domain::{Error, Result};
use crate::length::LengthTable;
use crate::measurements::MeasurementSeries;
use crate::xsection::{CrossSection, XsModel};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const FIGURE_SIZE: (u32, u32) = (1100, 850);

/// One curve of the interaction-length figure.
#[derive(Debug, Clone)]
pub struct LengthSeries {
    pub nuclide: Nuclide,
    pub model: XsModel,
    pub table: LengthTable,
}

/// Cross-section overlay: both models plus labelled measurement series.
pub fn plot_cross_sections(
    nuclide: Nuclide,
    v2r4: &CrossSection,
    tendl: &CrossSection,
    measurements: &[(String, MeasurementSeries)],
    output: &Path,
) -> Result<()> {
    if wants_svg(output) {
        let root = SVGBackend::new(output, FIGURE_SIZE).into_drawing_area();
        draw_cross_sections(&root, nuclide, v2r4, tendl, measurements)?;
        root.present().map_err(|e| Error::Plot(e.to_string()))
    } else {
        let root = BitMapBackend::new(output, FIGURE_SIZE).into_drawing_area();
        draw_cross_sections(&root, nuclide, v2r4, tendl, measurements)?;
        root.present().map_err(|e| Error::Plot(e.to_string()))
    }
}

/// Interaction-length (or energy-loss-length) curves over log10(E/eV) with
/// the adiabatic-loss horizon as a reference line.
pub fn plot_interaction_length(series: &[LengthSeries], output: &Path) -> Result<()> {
    if wants_svg(output) {
        let root = SVGBackend::new(output, FIGURE_SIZE).into_drawing_area();
        draw_interaction_length(&root, series)?;
        root.present().map_err(|e| Error::Plot(e.to_string()))
    } else {
        let root = BitMapBackend::new(output, FIGURE_SIZE).into_drawing_area();
        draw_interaction_length(&root, series)?;
        root.present().map_err(|e| Error::Plot(e.to_string()))
    }
}

/// Percentage relative difference between the models, per nucleus.
pub fn plot_relative_difference(series: &[(Nuclide, LengthTable)], output: &Path) -> Result<()> {
    if wants_svg(output) {
        let root = SVGBackend::new(output, FIGURE_SIZE).into_drawing_area();
        draw_relative_difference(&root, series)?;
        root.present().map_err(|e| Error::Plot(e.to_string()))
    } else {
        let root = BitMapBackend::new(output, FIGURE_SIZE).into_drawing_area();
        draw_relative_difference(&root, series)?;
        root.present().map_err(|e| Error::Plot(e.to_string()))
    }
}

fn wants_svg(output: &Path) -> bool {
    output
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("svg"))
}

fn draw_cross_sections<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    nuclide: Nuclide,
    v2r4: &CrossSection,
    tendl: &CrossSection,
    measurements: &[(String, MeasurementSeries)],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let v2r4 = v2r4.filter_positive();
    let tendl = tendl.filter_positive();
    let y_max = tendl
        .sigma_mb
        .iter()
        .chain(&v2r4.sigma_mb)
        .chain(measurements.iter().flat_map(|(_, m)| &m.sigma_mb))
        .copied()
        .fold(1.0_f64, f64::max);

    let caption = nuclide.to_string();
    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..50.0, 0.0..y_max * 1.1)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Photon energy [MeV]")
        .y_desc("Nonelastic cross section [mb]")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            curve_points(&tendl),
            BLACK.stroke_width(2),
        ))
        .map_err(plot_error)?
        .label("TENDL-2023")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            curve_points(&v2r4),
            6,
            4,
            BLACK.stroke_width(2),
        ))
        .map_err(plot_error)?
        .label("SimProp v2r4")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    let palette = [
        RGBColor(31, 119, 180),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
        RGBColor(255, 165, 0),
    ];
    for (index, (label, series)) in measurements.iter().enumerate() {
        let color = palette[index % palette.len()];
        chart
            .draw_series(series.energy_mev.iter().zip(&series.sigma_mb).zip(&series.sigma_err_mb).map(
                |((&energy, &sigma), &sigma_err)| {
                    ErrorBar::new_vertical(
                        energy,
                        sigma - sigma_err,
                        sigma,
                        sigma + sigma_err,
                        color.filled(),
                        6,
                    )
                },
            ))
            .map_err(plot_error)?
            .label(label.clone())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

fn draw_interaction_length<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[LengthSeries],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(19.0..22.0, (1.0e-1..1.0e4_f64).log_scale())
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("log10(Energy/eV)")
        .y_desc("Interaction length [Mpc]")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    let horizon = adiabatic_length_mpc();
    chart
        .draw_series(LineSeries::new(
            [(19.0, horizon), (22.0, horizon)],
            RGBColor(128, 128, 128).stroke_width(1),
        ))
        .map_err(plot_error)?
        .label("Adiabatic losses")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], RGBColor(128, 128, 128))
        });

    for entry in series {
        let color = nucleus_color(entry.nuclide);
        let points = length_points(&entry.table);
        match entry.model {
            XsModel::Tendl2023 => {
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(plot_error)?
                    .label(format!("{} ({})", entry.nuclide, entry.model))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            XsModel::V2r4 => {
                chart
                    .draw_series(DashedLineSeries::new(points, 6, 4, color.stroke_width(2)))
                    .map_err(plot_error)?
                    .label(format!("{} ({})", entry.nuclide, entry.model))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

fn draw_relative_difference<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[(Nuclide, LengthTable)],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(root)
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(19.0..22.0, (1.0e-1..1.0e2_f64).log_scale())
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("log10(Energy/eV)")
        .y_desc("Relative difference [%]")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    for (nuclide, table) in series {
        let color = nucleus_color(*nuclide);
        chart
            .draw_series(LineSeries::new(length_points(table), color.stroke_width(2)))
            .map_err(plot_error)?
            .label(nuclide.to_string())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

fn curve_points(curve: &CrossSection) -> Vec<(f64, f64)> {
    curve
        .energy_mev
        .iter()
        .zip(&curve.sigma_mb)
        .map(|(&energy, &sigma)| (energy, sigma))
        .collect()
}

/// Points on the log10-energy axis, with non-positive and non-finite lengths
/// masked out before the log-scale plot.
fn length_points(table: &LengthTable) -> Vec<(f64, f64)> {
    table
        .energy_ev
        .iter()
        .zip(&table.length_mpc)
        .filter(|&(&energy, &length)| energy > 0.0 && length > 0.0 && length.is_finite())
        .map(|(&energy, &length)| (energy.log10(), length))
        .collect()
}

/// Fixed per-nucleus colors sampled from a sequential colormap, matching the
/// reference figures for the benchmark nuclei.
fn nucleus_color(nuclide: Nuclide) -> RGBColor {
    match (nuclide.a, nuclide.z) {
        (16, 8) => RGBColor(156, 23, 158),
        (28, 14) => RGBColor(219, 92, 104),
        (56, 26) => RGBColor(254, 168, 50),
        (195, 78) => RGBColor(239, 248, 33),
        _ => RGBColor(44, 139, 189),
    }
}

fn plot_error<E: std::fmt::Debug>(error: E) -> Error {
    Error::Plot(format!("{error:?}"))
}
