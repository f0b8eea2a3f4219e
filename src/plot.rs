use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use palette::Srgb;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::color::to_plotters;
use crate::config::PlotConfig;
use crate::data::filter::{present_rows, round_series};
use crate::data::model::{JitteredSeries, Metric, MetricTable, Round};
use crate::jitter::jitter;
use crate::preset::{MarkerShape, Preset};

// ---------------------------------------------------------------------------
// Layers: what gets drawn, independent of the backend
// ---------------------------------------------------------------------------

/// One (metric, round) combination, ready to draw.
#[derive(Debug, Clone)]
pub struct SeriesLayer {
    pub metric: Metric,
    pub round: Round,
    /// Legend text, e.g. `"Recall (Round 2)"`.
    pub label: String,
    pub color: Srgb<u8>,
    pub marker: MarkerShape,
    pub filled: bool,
    pub points: JitteredSeries,
}

/// Build the layers for every metric × preset round, metric-major.
///
/// `table` must already be reduced to present rows (see [`present_rows`]).
pub fn build_layers(table: &MetricTable, preset: Preset) -> Result<Vec<SeriesLayer>> {
    for &round in preset.rounds() {
        if !table.records.iter().any(|r| r.round == round) {
            log::warn!("No rows for {round}; its series will be empty");
        }
    }

    let colors = preset.metric_colors()?;
    let mut layers = Vec::with_capacity(Metric::ALL.len() * preset.rounds().len());

    for (metric, color) in Metric::ALL.into_iter().zip(colors) {
        for &round in preset.rounds() {
            let series = round_series(table, metric, round);
            let points = jitter(series, preset.jitter_applies(round));
            log::debug!("{metric} ({round}): {} points", points.len());

            layers.push(SeriesLayer {
                metric,
                round,
                label: format!("{metric} ({round})"),
                color,
                marker: preset.marker_for(round),
                filled: preset.filled_for(round),
                points,
            });
        }
    }
    Ok(layers)
}

// ---------------------------------------------------------------------------
// Axis ranges
// ---------------------------------------------------------------------------

/// X range covering every depth plus the widest jitter offset.
fn x_range(depths: &BTreeSet<u32>) -> Range<f64> {
    match (depths.first(), depths.last()) {
        (Some(&lo), Some(&hi)) => (f64::from(lo) - 0.5)..(f64::from(hi) + 1.0),
        _ => 0.0..1.0,
    }
}

/// Y range spanning all layer values with a 5-point margin; 0..100 when empty.
fn y_range(layers: &[SeriesLayer]) -> Range<f64> {
    let values = layers.iter().flat_map(|l| l.points.iter().map(|p| p.value));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..100.0;
    }
    (min - 5.0).max(0.0)..(max + 5.0)
}

/// Continuous x axis whose ticks are exactly the tree depths present.
struct DepthAxis {
    inner: RangedCoordf64,
    depths: Vec<f64>,
}

impl DepthAxis {
    fn new(depths: &BTreeSet<u32>) -> Self {
        DepthAxis {
            inner: x_range(depths).into(),
            depths: depths.iter().map(|&d| f64::from(d)).collect(),
        }
    }
}

impl Ranged for DepthAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.depths.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

impl ValueFormatter<f64> for DepthAxis {
    fn format(value: &f64) -> String {
        format!("{value:.0}")
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Marker outline as pixel offsets around the anchor. Circles are 16-gons.
fn marker_outline(shape: MarkerShape, size: i32) -> Vec<(i32, i32)> {
    let r = size;
    match shape {
        MarkerShape::Circle => (0..16)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 16.0;
                let rf = f64::from(r);
                ((rf * a.cos()).round() as i32, (rf * a.sin()).round() as i32)
            })
            .collect(),
        MarkerShape::Square => vec![(-r, -r), (r, -r), (r, r), (-r, r)],
        MarkerShape::Diamond => vec![(0, -r - 1), (r + 1, 0), (0, r + 1), (-r - 1, 0)],
        MarkerShape::Triangle => vec![(0, -r - 1), (r + 1, r), (-r - 1, r)],
    }
}

/// Closed stroke path for an outline.
fn closed(outline: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut path = outline.to_vec();
    if let Some(&first) = outline.first() {
        path.push(first);
    }
    path
}

/// Legend entry spacing in the outside strip, in pixels.
const LEGEND_ROW: i32 = 20;

fn draw_chart(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    layers: &[SeriesLayer],
    depths: &BTreeSet<u32>,
    config: &PlotConfig,
) -> Result<()> {
    root.fill(&WHITE)?;

    match config.legend.to_series_label_position() {
        Some(position) => draw_plot(root, layers, depths, config, Some(position)),
        None => {
            let (w, _) = root.dim_in_pixel();
            let strip = config.legend_width.min(w / 2);
            let (plot_area, legend_area) = root.split_horizontally(w - strip);
            draw_plot(&plot_area, layers, depths, config, None)?;
            draw_outside_legend(&legend_area, layers, config)
        }
    }
}

fn draw_plot(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    layers: &[SeriesLayer],
    depths: &BTreeSet<u32>,
    config: &PlotConfig,
    inside_legend: Option<SeriesLabelPosition>,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(&config.title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(DepthAxis::new(depths), y_range(layers))?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str());
        if config.grid {
            mesh.bold_line_style(BLACK.mix(0.15))
                .light_line_style(WHITE.mix(0.0));
        } else {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    let size = config.marker_size as i32;
    for layer in layers.iter().filter(|l| !l.points.is_empty()) {
        let color = to_plotters(layer.color);
        let coords: Vec<(f64, f64)> = layer.points.iter().map(|p| (p.depth, p.value)).collect();

        chart.draw_series(LineSeries::new(
            coords.iter().copied(),
            color.mix(config.line_alpha).stroke_width(2),
        ))?;

        let (fill, stroke) = marker_styles(layer);
        let outline = marker_outline(layer.marker, size);
        let path = closed(&outline);

        let (legend_outline, legend_path) = (outline.clone(), path.clone());
        chart
            .draw_series(coords.iter().map(|&c| {
                EmptyElement::at(c)
                    + Polygon::new(outline.clone(), fill)
                    + PathElement::new(path.clone(), stroke)
            }))?
            .label(layer.label.as_str())
            .legend(move |c| {
                EmptyElement::at(c)
                    + Polygon::new(legend_outline.clone(), fill)
                    + PathElement::new(legend_path.clone(), stroke)
            });
    }

    if let Some(position) = inside_legend {
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.4))
            .label_font(("sans-serif", 13))
            .draw()?;
    }

    Ok(())
}

/// Fill and stroke for a layer's markers. Hollow markers get a fully transparent fill.
fn marker_styles(layer: &SeriesLayer) -> (ShapeStyle, ShapeStyle) {
    let color = to_plotters(layer.color);
    let fill = if layer.filled {
        color.filled()
    } else {
        color.mix(0.0).filled()
    };
    (fill, color.stroke_width(2))
}

/// One legend row per drawn layer, vertically centred in a strip right of the axes.
fn draw_outside_legend(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    layers: &[SeriesLayer],
    config: &PlotConfig,
) -> Result<()> {
    let drawn: Vec<&SeriesLayer> = layers.iter().filter(|l| !l.points.is_empty()).collect();
    let (_, h) = area.dim_in_pixel();
    let top = (h as i32 - drawn.len() as i32 * LEGEND_ROW).max(0) / 2;
    let size = config.marker_size as i32;

    for (i, layer) in drawn.into_iter().enumerate() {
        let (fill, stroke) = marker_styles(layer);
        let outline = marker_outline(layer.marker, size);
        let path = closed(&outline);
        let y = top + i as i32 * LEGEND_ROW + LEGEND_ROW / 2;
        area.draw(
            &(EmptyElement::at((12, y))
                + Polygon::new(outline, fill)
                + PathElement::new(path, stroke)
                + Text::new(
                    layer.label.clone(),
                    (size + 10, -7),
                    ("sans-serif", 13).into_font(),
                )),
        )?;
    }
    Ok(())
}

/// Render layers into an RGB image of `config.width × config.height`.
pub fn render(
    layers: &[SeriesLayer],
    depths: &BTreeSet<u32>,
    config: &PlotConfig,
) -> Result<RgbImage> {
    let (w, h) = (config.width, config.height);
    let mut buffer = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
        draw_chart(&root, layers, depths, config).context("drawing chart")?;
        root.present().context("finishing figure")?;
    }
    RgbImage::from_raw(w, h, buffer).context("figure buffer has unexpected size")
}

/// Write the figure as PNG.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved {}x{} figure to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Full pipeline for one invocation: filter, build layers, render.
pub fn plot_metrics(table: &MetricTable, preset: Preset, config: &PlotConfig) -> Result<RgbImage> {
    let present = present_rows(table);
    if present.is_empty() {
        log::warn!("No rows with Accuracy > 0; the chart will only show axes");
    }
    log::info!(
        "Plotting {} of {} rows with the {preset} preset",
        present.len(),
        table.len()
    );
    let layers = build_layers(&present, preset)?;
    render(&layers, &present.depths, config)
}
