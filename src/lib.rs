//! Interactive directed-graph diagram editor.
//!
//! The core ([`model`], [`viewport`], [`hit_test`], [`controller`], [`render`])
//! has no dependency on a live window; [`app`] hosts it in an eframe window.

pub mod app;
pub mod controller;
pub mod editor;
pub mod error;
pub mod model;
pub mod render;
pub mod settings;
pub mod viewport;

pub use controller::{
    CursorHint, InputEvent, InteractionController, Key, KeyboardSubscription, Mode, Modifiers,
    PaletteEvent, PointerButton, ShapeKind,
};
pub use editor::Editor;
pub use error::{GeometryError, SettingsError};
pub use hit_test::HitTester;
pub use model::{
    DiagramModel, Edge, EdgeGeometry, ElementId, ElementKind, ElementRef, Node, NodeGeometry,
    NodeKind, Point, Selection, SelectionDetails,
};
pub use render::{Preview, Renderer, Rgba, Stroke, Surface, Theme};
pub use settings::EditorSettings;
pub use viewport::Viewport;

/// Installs a stdout fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
