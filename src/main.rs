mod app;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::KnnScatterApp;
use eframe::egui;
use knn_scatter::ExplorerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ExplorerConfig::from_env().context("loading configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "k-NN Scatter Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(KnnScatterApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}
