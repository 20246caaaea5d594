use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help")
        .open(open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.heading("Shapes");
            ui.separator();
            help_row(ui, "Rectangle / Circle", "Arm in the toolbar, then click to place");
            help_row(ui, "Arrow", "Arm, then drag from one node to another");
            help_row(ui, "Toolbar button again", "Disarm the shape");

            ui.add_space(10.0);
            ui.heading("Editing");
            ui.separator();
            help_row(ui, "Click", "Select a node or edge (click again to deselect)");
            help_row(ui, "Drag", "Move the selected node");
            help_row(ui, "Delete / Backspace", "Delete selection (nodes take their edges)");
            help_row(ui, "Escape", "Cancel the current gesture");

            ui.add_space(10.0);
            ui.heading("View");
            ui.separator();
            help_row(ui, "Ctrl + Alt + wheel", "Zoom in/out");
            help_row(ui, "Shift + wheel", "Pan");
            help_row(ui, "F1", "Toggle this window");
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(shortcut).strong().monospace());
        ui.label(description);
    });
}
