#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

type DynError = Box<dyn std::error::Error + Send + Sync>;

fn create_app(cc: &eframe::CreationContext<'_>) -> Result<Box<dyn eframe::App>, DynError> {
    Ok(Box::new(inkpad::InkApp::new(cc)?))
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native("inkpad", native_options, Box::new(create_app))
}

// The host is native only; there is no web entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
