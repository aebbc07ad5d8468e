mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::anchor`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use ardraw_lib::anchor;
pub use ardraw_lib::state;

use app::ArDrawApp;
use shared::PlacementMode;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ardraw=info,ardraw_lib=info".into()),
        )
        .init();

    // Parse --mode <freeform|surface_constrained|image_anchored> argument
    let initial_mode = parse_mode_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ARDraw AR placement preview")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "ardraw",
        native_options,
        Box::new(move |cc| Ok(Box::new(ArDrawApp::new(cc, initial_mode)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_mode_arg() -> Option<PlacementMode> {
    let args: Vec<String> = std::env::args().collect();
    let position = args.iter().position(|a| a == "--mode")?;
    let Some(value) = args.get(position + 1) else {
        tracing::error!("--mode needs a value");
        return None;
    };
    match serde_json::from_value::<PlacementMode>(serde_json::Value::String(value.clone())) {
        Ok(mode) => {
            tracing::info!(?mode, "Starting in requested mode");
            Some(mode)
        }
        Err(e) => {
            tracing::error!("Unknown mode {value}: {e}");
            None
        }
    }
}
