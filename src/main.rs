mod cli;
mod color;
mod config;
mod data;
mod jitter;
mod plot;
mod preset;

use anyhow::Result;
use clap::Parser;

use cli::Args;
use config::PlotConfig;

fn run(args: Args) -> Result<()> {
    let mut config = PlotConfig::load_or_default(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(title) = args.title {
        config.title = title;
    }

    let table = data::loader::load_file(&args.input)?;
    let figure = plot::plot_metrics(&table, args.preset, &config)?;
    plot::save_png(&figure, &args.output)
}

fn main() -> Result<()> {
    env_logger::init();
    run(Args::parse())
}
