use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::chart::SeriesLabelPosition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    /// Strip to the right of the axes.
    #[default]
    Outside,
    UpperLeft,
    UpperRight,
    MiddleRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    /// Position inside the plotting area; `None` for the outside strip.
    pub fn to_series_label_position(self) -> Option<SeriesLabelPosition> {
        match self {
            LegendPosition::Outside => None,
            LegendPosition::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
            LegendPosition::UpperRight => Some(SeriesLabelPosition::UpperRight),
            LegendPosition::MiddleRight => Some(SeriesLabelPosition::MiddleRight),
            LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
            LegendPosition::LowerRight => Some(SeriesLabelPosition::LowerRight),
        }
    }
}

/// Figure settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    #[serde(default = "PlotConfig::default_width")]
    pub width: u32,
    #[serde(default = "PlotConfig::default_height")]
    pub height: u32,
    #[serde(default = "PlotConfig::default_title")]
    pub title: String,
    #[serde(default = "PlotConfig::default_x_label")]
    pub x_label: String,
    #[serde(default = "PlotConfig::default_y_label")]
    pub y_label: String,
    /// Marker radius in pixels.
    #[serde(default = "PlotConfig::default_marker_size")]
    pub marker_size: u32,
    /// Opacity of the connecting lines.
    #[serde(default = "PlotConfig::default_line_alpha")]
    pub line_alpha: f64,
    #[serde(default = "PlotConfig::default_grid")]
    pub grid: bool,
    #[serde(default)]
    pub legend: LegendPosition,
    /// Width of the outside legend strip in pixels.
    #[serde(default = "PlotConfig::default_legend_width")]
    pub legend_width: u32,
}

impl PlotConfig {
    fn default_width() -> u32 {
        1400
    }
    fn default_height() -> u32 {
        800
    }
    fn default_title() -> String {
        "Decision Tree Metrics by Depth and Round".to_string()
    }
    fn default_x_label() -> String {
        "Tree Depth".to_string()
    }
    fn default_y_label() -> String {
        "Metric (%)".to_string()
    }
    fn default_marker_size() -> u32 {
        5
    }
    fn default_line_alpha() -> f64 {
        0.4
    }
    fn default_grid() -> bool {
        true
    }
    fn default_legend_width() -> u32 {
        200
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: PlotConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }

    /// Defaults when `path` is `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            title: Self::default_title(),
            x_label: Self::default_x_label(),
            y_label: Self::default_y_label(),
            marker_size: Self::default_marker_size(),
            line_alpha: Self::default_line_alpha(),
            grid: Self::default_grid(),
            legend: LegendPosition::default(),
            legend_width: Self::default_legend_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "depth_plot_config_test_{}_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos(),
            name
        ));
        p
    }

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: PlotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PlotConfig::default());
        assert_eq!((cfg.width, cfg.height), (1400, 800));
        assert_eq!(cfg.legend, LegendPosition::Outside);
        assert_eq!(cfg.legend_width, 200);
    }

    #[test]
    fn only_outside_legend_has_no_inside_position() {
        assert!(LegendPosition::Outside.to_series_label_position().is_none());
        assert!(LegendPosition::LowerLeft.to_series_label_position().is_some());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let path = unique_path("partial.json");
        fs::write(
            &path,
            r#"{ "width": 640, "legend": "upper-left", "grid": false }"#,
        )
        .unwrap();
        let cfg = PlotConfig::load_or_default(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 800);
        assert!(!cfg.grid);
        assert_eq!(cfg.legend, LegendPosition::UpperLeft);
        assert_eq!(cfg.y_label, "Metric (%)");
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = unique_path("missing.json");
        assert!(PlotConfig::load(&path).is_err());
        assert_eq!(PlotConfig::load_or_default(None).unwrap(), PlotConfig::default());
    }
}
