use graphpad::{app, init_logging, settings};

fn main() -> eframe::Result<()> {
    init_logging();
    let settings = settings::load_first(&settings::candidate_paths());
    tracing::info!(?settings, "starting graphpad");

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Graphpad",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app::DiagramApp::new(settings)))),
    )
}
