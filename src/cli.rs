use std::path::PathBuf;

use clap::Parser;

use crate::preset::Preset;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Depth summary table (.csv, .json or .parquet)
    #[arg(value_name = "INPUT", default_value = "depth_summary.csv")]
    pub input: PathBuf,

    /// Presentation preset
    #[arg(long, value_enum, default_value_t = Preset::ThreeRound)]
    pub preset: Preset,

    /// Where to write the PNG figure
    #[arg(long, short, default_value = "depth_metrics.png")]
    pub output: PathBuf,

    /// Figure settings as JSON (missing fields keep their defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Figure width in pixels (overrides config)
    #[arg(long)]
    pub width: Option<u32>,

    /// Figure height in pixels (overrides config)
    #[arg(long)]
    pub height: Option<u32>,

    /// Chart title (overrides config)
    #[arg(long)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_experiment_layout() {
        let args = Args::try_parse_from(["depth-plot"]).unwrap();
        assert_eq!(args.input, PathBuf::from("depth_summary.csv"));
        assert_eq!(args.preset, Preset::ThreeRound);
        assert_eq!(args.output, PathBuf::from("depth_metrics.png"));
        assert!(args.config.is_none());
    }

    #[test]
    fn preset_and_overrides_parse() {
        let args = Args::try_parse_from([
            "depth-plot",
            "runs/summary.parquet",
            "--preset",
            "two-round",
            "-o",
            "out.png",
            "--width",
            "800",
            "--title",
            "Holdout only",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("runs/summary.parquet"));
        assert_eq!(args.preset, Preset::TwoRound);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.width, Some(800));
        assert_eq!(args.height, None);
        assert_eq!(args.title.as_deref(), Some("Holdout only"));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(Args::try_parse_from(["depth-plot", "--preset", "four-round"]).is_err());
    }
}
