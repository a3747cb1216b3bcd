//! chronobounce: analog clock, stopwatch and bouncing balls in one window.

mod app;
mod paint;
mod theme;
mod widgets;

use app::ChronoBounceApp;
use chronocore::config::DemoConfig;
use chronocore::hands::Granularity;
use clap::Parser;
use eframe::NativeOptions;
use std::path::PathBuf;
use theme::apply_theme;

#[derive(Parser)]
#[command(name = "chronobounce", about = "Analog clock, stopwatch and bouncing balls")]
struct Args {
    /// JSON config file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Clock hands: continuous or discrete
    #[arg(long)]
    clock_granularity: Option<Granularity>,

    /// Stopwatch hands: continuous or discrete
    #[arg(long)]
    stopwatch_granularity: Option<Granularity>,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = DemoConfig::resolve(args.config.as_deref());
    if let Some(g) = args.clock_granularity {
        config.clock.granularity = g;
    }
    if let Some(g) = args.stopwatch_granularity {
        config.stopwatch.granularity = g;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.window.width, config.window.height])
        .with_title(config.window.title.clone());

    if let Some((x, y)) = chronocore::cascade_position() {
        viewport = viewport.with_position(egui::Pos2::new(x, y));
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    let title = config.window.title.clone();
    let result = eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx);
            Box::new(ChronoBounceApp::new(cc, &config))
        }),
    );
    log::info!("chronobounce exited");
    result
}
