use eframe::egui;

use crate::controller::{InputEvent, PaletteEvent, ShapeKind};
use crate::editor::Editor;
use crate::model::ElementKind;

fn shape_button(ui: &mut egui::Ui, editor: &mut Editor, kind: ShapeKind) {
    let active = editor.controller().armed() == Some(kind);
    let label = match kind {
        ShapeKind::Rectangle => "▭ Rectangle",
        ShapeKind::Circle => "◯ Circle",
        ShapeKind::Arrow => "→ Arrow",
    };
    if ui.selectable_label(active, label).clicked() {
        editor.dispatch(InputEvent::Palette(PaletteEvent::Toggle(kind)));
    }
}

pub(super) fn shape_palette(ui: &mut egui::Ui, editor: &mut Editor) {
    ui.horizontal(|ui| {
        for kind in ShapeKind::ALL {
            shape_button(ui, editor, kind);
        }
        if editor.controller().armed().is_some() && ui.button("Deselect").clicked() {
            editor.dispatch(InputEvent::Palette(PaletteEvent::Deselect));
        }
    });
}

pub(super) fn zoom_control(ui: &mut egui::Ui, editor: &mut Editor) {
    ui.horizontal(|ui| {
        if ui.button("−").clicked() {
            editor.zoom_out();
        }
        ui.label(format!("{}%", editor.viewport().zoom_percent()));
        if ui.button("+").clicked() {
            editor.zoom_in();
        }
        if ui.button("Reset").clicked() {
            editor.zoom_reset();
        }
        ui.separator();
        if ui.button("Clear").clicked() {
            editor.clear();
        }
    });
}

pub(super) fn status_line(ui: &mut egui::Ui, editor: &Editor) {
    let model = editor.model();
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.label(format!("Edges: {}", model.edges().len()));
        ui.separator();
        ui.label(format!("Nodes: {}", model.nodes().len()));
        ui.separator();
        let mode = match editor.controller().armed() {
            Some(kind) => format!("Placing {}", kind.label()),
            None => "Ready".to_string(),
        };
        ui.label(mode);
    });
}

/// Label and data editor for the selected element.
pub(super) fn edit_panel(ui: &mut egui::Ui, editor: &mut Editor) {
    let Some(details) = editor.selection_details() else {
        ui.label("Select a node or edge to edit it.");
        return;
    };
    let kind = match details.kind {
        ElementKind::Node => "Node",
        ElementKind::Edge => "Edge",
    };
    ui.heading(kind);
    ui.small(details.id.as_str());
    ui.separator();

    ui.label("Label");
    let mut label = details.label;
    if ui.text_edit_singleline(&mut label).changed() {
        editor.set_selected_label(&label);
    }

    ui.add_space(8.0);
    ui.label("Data");
    let mut data = details.data;
    let response = ui.add(
        egui::TextEdit::multiline(&mut data)
            .code_editor()
            .desired_rows(12)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        editor.set_selected_data(&data);
    }
}
