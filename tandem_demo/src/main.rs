// Copyright 2025 the Tandem Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two linked quadratic plots driven by a scripted pointer sequence.
//!
//! The demo stacks two viewports over the same data, pans, zooms, and
//! drag-selects a range through [`NavigationController`], then writes a
//! snapshot of the final state as `image.svg` and a report with the
//! snapshot embedded as `report-{n}.svg` pages.

mod sample;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use tandem_nav::{
    InputEvent, Modifiers, NavConfig, NavigationController, PointerButton, PointerButtons,
};
use tandem_report::{
    Cursor, Document, DocumentEmbedder, ExportError, PLOT_OBJECT_TYPE, PageLayout, ReportBuilder,
    ReportError, Series, ViewportPainter, capture, export,
};
use tandem_view::{AxisRange, ViewportSet};

/// Window size of the interactive plot area.
const PLOT_SIZE: Size = Size::new(800.0, 600.0);

#[derive(Parser, Debug)]
#[command(about = "Render the Tandem two-plot demo to SVG")]
struct Args {
    /// Directory the snapshot and report pages are written to.
    #[arg(long, default_value = "tandem-out")]
    out: PathBuf,
    /// JSON navigation config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Width of the snapshot embedded in the report.
    #[arg(long, default_value_t = 400.0)]
    capture_width: f64,
    /// Height of the snapshot embedded in the report.
    #[arg(long, default_value_t = 400.0)]
    capture_height: f64,
    /// Hold Ctrl while zooming, keeping the shared horizontal range fixed.
    #[arg(long)]
    lock_horizontal: bool,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read config {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> Result<(), DemoError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => NavConfig::default(),
    };
    log::debug!("navigation config: {config:?}");

    let data = sample::quadratic(sample::SAMPLE_COUNT);
    let (mut set, series) = stacked_plots(&data);

    let mut nav = NavigationController::new(config);
    let modifiers = if args.lock_horizontal {
        Modifiers::CONTROL
    } else {
        Modifiers::empty()
    };
    let mut redraws = 0_u32;
    let mut redraw = || redraws += 1;
    for event in script(modifiers) {
        let _ = nav.handle(&mut set, event, &mut redraw);
    }
    log::info!("scripted navigation finished after {redraws} redraws");
    for vp in set.iter() {
        log::info!(
            "viewport {:?}: x {:?}, y {:?}",
            vp.id(),
            vp.horizontal_range(),
            vp.vertical_range()
        );
    }

    fs::create_dir_all(&args.out).map_err(|source| ExportError::Io {
        path: args.out.clone(),
        source,
    })?;
    let painter = ViewportPainter::new(&set, &series).with_guides(nav.guides());
    export::export_svg(args.out.join("image.svg"), &capture(&painter, PLOT_SIZE))?;

    let mut document = Document::new();
    document.register_handler(PLOT_OBJECT_TYPE, Arc::new(DocumentEmbedder));
    ReportBuilder::new().build(
        &mut document,
        Cursor::start(),
        &painter,
        Size::new(args.capture_width, args.capture_height),
    )?;
    let pages = PageLayout::new().paginate(&document);
    export::export_pages_svg(&args.out, "report", &pages)?;
    Ok(())
}

fn load_config(path: &Path) -> Result<NavConfig, DemoError> {
    let text = fs::read_to_string(path).map_err(|source| DemoError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Two viewports stacked vertically in the plot area, each fitted to `data`.
fn stacked_plots(data: &[Point]) -> (ViewportSet, Vec<Series>) {
    let mut set = ViewportSet::new();
    let half = PLOT_SIZE.height / 2.0;
    let unit = AxisRange::new(0.0, 1.0);
    let top = set.add(Rect::new(0.0, 0.0, PLOT_SIZE.width, half), unit, unit);
    let bottom = set.add(
        Rect::new(0.0, half, PLOT_SIZE.width, PLOT_SIZE.height),
        unit,
        unit,
    );
    for id in [top, bottom] {
        if let Some(vp) = set.get_mut(id) {
            vp.rescale_to_data(data);
        }
    }

    let points: Arc<[Point]> = data.into();
    let series = vec![
        Series::new(top, Arc::clone(&points), Color::from_rgba8(0, 0, 255, 255)),
        Series::new(bottom, points, Color::from_rgba8(0, 0, 255, 255)),
    ];
    (set, series)
}

/// Pan the top plot, zoom in over the bottom plot, then select a range
/// with the secondary button.
fn script(modifiers: Modifiers) -> Vec<InputEvent> {
    let top = PLOT_SIZE.height / 4.0;
    let bottom = PLOT_SIZE.height * 3.0 / 4.0;
    vec![
        InputEvent::Modifiers(modifiers),
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos: Point::new(400.0, top),
        },
        InputEvent::PointerMove {
            buttons: PointerButtons::PRIMARY,
            pos: Point::new(360.0, top + 20.0),
        },
        InputEvent::PointerMove {
            buttons: PointerButtons::PRIMARY,
            pos: Point::new(320.0, top + 30.0),
        },
        InputEvent::PointerUp {
            button: PointerButton::Primary,
            pos: Point::new(320.0, top + 30.0),
        },
        InputEvent::Scroll {
            delta: 240.0,
            pos: Point::new(400.0, bottom),
        },
        InputEvent::Modifiers(Modifiers::empty()),
        InputEvent::PointerDown {
            button: PointerButton::Secondary,
            pos: Point::new(250.0, bottom),
        },
        InputEvent::PointerMove {
            buttons: PointerButtons::SECONDARY,
            pos: Point::new(450.0, bottom),
        },
        InputEvent::PointerMove {
            buttons: PointerButtons::SECONDARY,
            pos: Point::new(550.0, bottom),
        },
        InputEvent::PointerUp {
            button: PointerButton::Secondary,
            pos: Point::new(550.0, bottom),
        },
    ]
}
