mod app;
mod config;
mod editor;
mod error;
mod export;
mod image_source;
mod label;
mod model;
mod transform;

use eframe::egui;
use std::path::{Path, PathBuf};

const TITLE: &str = "Land Site Overlay Tool";

fn window_title(image_path: Option<&Path>) -> String {
    match image_path {
        Some(path) => format!(
            "{TITLE} - {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => TITLE.to_owned(),
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let image_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = config::Settings::load();

    let title = window_title(image_path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title(&title),
        ..Default::default()
    };

    log::info!("starting {title}");
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(app::OverlayApp::new(settings, image_path)))),
    )
}
