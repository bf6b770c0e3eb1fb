use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use result_plotter::app::run_viewer;
use result_plotter::color::SeriesColors;
use result_plotter::state::ViewerState;
use result_plotter::{ImageFormat, PlotConfig, ResultPlotter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Results file with `Input`, `Expected` and `Actual` columns
    #[arg(value_name = "PATH", default_value = "plot_data.csv")]
    path: PathBuf,

    /// JSON file with plot settings
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Image format of the saved chart
    #[arg(short = 'f', long, value_enum)]
    format: Option<ImageFormat>,

    #[arg(short = 't', long)]
    title: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// TrueType/OpenType font for the chart text
    #[arg(long, value_name = "FONT_FILE")]
    font: Option<PathBuf>,

    /// Open an interactive window after saving
    #[arg(short = 's', long)]
    show: bool,
}

impl CliArgs {
    /// Config file (or defaults) with the command line flags applied on top.
    fn plot_config(&self) -> Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => PlotConfig::from_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => PlotConfig::default(),
        };

        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let config = args.plot_config()?;
    let plotter = ResultPlotter::new(config);

    let outcome = plotter
        .plot_file(&args.path)
        .with_context(|| format!("plotting {}", args.path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;

    println!("Plot saved to: {}", outcome.output.display());

    if args.show {
        let config = plotter.config().clone();
        let colors = SeriesColors::resolve(&config.expected_color, &config.actual_color)?;
        let state = ViewerState::new(outcome.results, config, colors).with_output(outcome.output);
        run_viewer(state).map_err(|e| anyhow!("viewer failed: {e}"))?;
    }

    Ok(())
}
