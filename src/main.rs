//! Entry point for the **wsgrid** command.
//!
//! Runs one layout pass of the switcher popup for a given screen and prints
//! the result as JSON, which is what a host adapter would feed to its
//! widget toolkit.  With `--preview` (requires the `visualizer-gtk`
//! feature) the popup is drawn through GTK4 instead.
//!
//! ```text
//! wsgrid [-c PATH] [-w PX] [-H PX] [--top-inset PX]
//!        [-n COUNT] [-a INDEX] [-d DIR] [--preview]
//! ```

use clap::Parser;
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use wsgrid::config::Config;
use wsgrid::direction::{parse_direction, Direction};
use wsgrid::indicator::ActiveIndicatorState;
use wsgrid::layout::{CellBox, LayoutResult, Viewport};
use wsgrid::popup::{SwitcherPopup, WorkArea};
use wsgrid::traits::GridLayoutProvider;

/// Resolve the config directory (`$XDG_CONFIG_HOME/wsgrid`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("wsgrid")
}

/// Load the config from `path`, or from `$XDG_CONFIG_HOME/wsgrid/config.json`,
/// falling back to compiled-in defaults.
fn load_config(path: Option<&Path>) -> Config {
    let default_path = config_dir().join("config.json");
    let path = path.unwrap_or(&default_path);
    match Config::load(path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no usable config ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Command line

#[derive(Debug, Parser)]
#[command(name = "wsgrid")]
#[command(about = "Lay out the workspace switcher popup for a screen")]
struct Options {
    /// Config file (default: $XDG_CONFIG_HOME/wsgrid/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Screen width in pixels
    #[arg(short, long, default_value_t = 1920.0)]
    width: f64,

    /// Screen height in pixels
    #[arg(short = 'H', long, default_value_t = 1080.0)]
    height: f64,

    /// Space reserved at the top of the screen (panel height)
    #[arg(long, default_value_t = 0.0)]
    top_inset: f64,

    /// Number of workspaces (default: one per grid cell)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Index of the active workspace
    #[arg(short, long, default_value_t = 0)]
    active: usize,

    /// Direction of the last move (up, down, left, right, up-left, ...)
    #[arg(short, long, value_parser = direction_arg)]
    direction: Option<Direction>,

    /// Draw the popup with GTK4 instead of printing the layout
    #[arg(long)]
    preview: bool,
}

fn direction_arg(s: &str) -> Result<Direction, String> {
    parse_direction(s).ok_or_else(|| {
        let known: Vec<String> = Direction::ALL.iter().map(|d| d.to_string()).collect();
        format!("expected one of {}", known.join(", "))
    })
}

//  Output

#[derive(Serialize)]
struct CellReport<'a> {
    #[serde(flatten)]
    cell: CellBox,
    state: ActiveIndicatorState,
    style_class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

#[derive(Serialize)]
struct Report<'a> {
    viewport: Viewport,
    rows: usize,
    columns: usize,
    layout: Option<LayoutResult>,
    popup_x: f64,
    popup_y: f64,
    cells: Vec<CellReport<'a>>,
}

//  Main

fn main() {
    env_logger::init();

    let opts = Options::parse();

    let config = load_config(opts.config.as_deref());
    let mut popup = SwitcherPopup::from_config(&config);
    if let Some(count) = opts.count {
        popup.set_workspace_count(count);
    }
    popup.display(opts.active, opts.direction, Instant::now());

    if opts.preview {
        run_preview(popup, &config, opts.top_inset);
    } else if let Err(e) = print_layout(&mut popup, &config, &opts) {
        error!("failed to write layout: {}", e);
        std::process::exit(1);
    }
}

fn print_layout(
    popup: &mut SwitcherPopup,
    config: &Config,
    opts: &Options,
) -> Result<(), serde_json::Error> {
    let viewport = Viewport::new(opts.width, opts.height).with_top_inset(opts.top_inset);
    let work_area = WorkArea {
        x: 0.0,
        y: 0.0,
        width: opts.width,
        height: opts.height,
    };

    let (width, height) = popup.natural_size(&viewport);
    let (x, y) = SwitcherPopup::placement(&work_area, opts.top_inset, width, height);
    let boxes = popup.allocate(
        x + config.popup.horizontal_padding / 2.0,
        y + config.popup.vertical_padding / 2.0,
    );

    let cells = boxes
        .into_iter()
        .zip(popup.indicators())
        .map(|(cell, ind)| CellReport {
            cell,
            state: ind.state,
            style_class: ind.style_class(),
            label: ind.label.as_deref(),
        })
        .collect();

    let shape = popup.shape();
    let report = Report {
        viewport,
        rows: shape.rows(),
        columns: shape.columns(),
        layout: popup.layout(),
        popup_x: x,
        popup_y: y,
        cells,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(feature = "visualizer-gtk")]
fn run_preview(popup: SwitcherPopup, config: &Config, top_inset: f64) {
    let padding = (config.popup.horizontal_padding, config.popup.vertical_padding);
    wsgrid::visualizer::gtk::run_preview(
        popup,
        Some(config_dir().join("style.css")),
        padding,
        top_inset,
    );
}

#[cfg(not(feature = "visualizer-gtk"))]
fn run_preview(_popup: SwitcherPopup, _config: &Config, _top_inset: f64) {
    error!("--preview requires the `visualizer-gtk` feature");
    std::process::exit(1);
}
