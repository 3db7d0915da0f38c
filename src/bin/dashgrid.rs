use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dashgrid::common::config::Config;
use dashgrid::layout_engine::GridLayoutEngine;
use dashgrid::model::server::LayoutData;
use dashgrid::model::widget::{Dashboard, Widget};
use dashgrid::ui::text;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

#[derive(Parser, Debug)]
#[command(version, about = "Lay out dashboard widgets on a grid")]
struct Cli {
    /// Dashboard JSON file, or a JSON array of widgets.
    file: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1920, allow_negative_numbers = true)]
    viewport_width: i64,

    /// Config file to use instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    row_size: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    column_size: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    margin: Option<i64>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    Dashboard(Dashboard),
    Widgets(Vec<Widget>),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(HierarchicalLayer::new(2).with_writer(std::io::stderr).with_targets(true))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    if let Some(row_size) = cli.row_size {
        config.grid.row_size = row_size;
    }
    if let Some(column_size) = cli.column_size {
        config.grid.column_size = column_size;
    }
    if let Some(margin) = cli.margin {
        config.grid.margin = margin;
    }

    let contents = fs::read_to_string(&cli.file)
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let input: Input = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", cli.file.display()))?;
    let (dashboard_id, widgets) = match input {
        Input::Dashboard(dashboard) => {
            info!(id = %dashboard.id, title = %dashboard.title, "loaded dashboard");
            (Some(dashboard.id), dashboard.widgets)
        }
        Input::Widgets(widgets) => (None, widgets),
    };

    let engine = GridLayoutEngine::new(config.grid, widgets, cli.viewport_width)?;
    match cli.format {
        Format::Json => {
            let data = LayoutData::new(dashboard_id, engine.layout(), engine.settings());
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Format::Text => print!("{}", text::render(engine.layout())),
    }
    Ok(())
}
