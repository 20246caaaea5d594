use eframe::egui;

use crate::editor::Editor;
use crate::settings::EditorSettings;
use crate::KeyboardSubscription;

mod canvas;
mod help;
mod panels;
mod update;

pub struct DiagramApp {
    editor: Editor,
    keyboard: Option<KeyboardSubscription>,
    /// A primary press started on the canvas and its release is still pending.
    pointer_captured: bool,
    canvas_size: egui::Vec2,
    edit_panel_open: bool,
    show_help: bool,
}

impl DiagramApp {
    pub fn new(settings: EditorSettings) -> Self {
        let mut editor = Editor::new(&settings);
        let keyboard = Some(editor.attach_keyboard());
        Self {
            editor,
            keyboard,
            pointer_captured: false,
            canvas_size: egui::Vec2::ZERO,
            edit_panel_open: true,
            show_help: settings.show_help_on_start,
        }
    }
}

impl Drop for DiagramApp {
    fn drop(&mut self) {
        if let Some(subscription) = self.keyboard.take() {
            self.editor.detach_keyboard(subscription);
        }
    }
}
