use eframe::egui;

use super::canvas::{PainterSurface, collect_input, cursor_icon};
use super::help::draw_help_window;
use super::panels::{edit_panel, shape_palette, status_line, zoom_control};
use super::DiagramApp;
use crate::controller::InputEvent;

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::F1)) {
            self.show_help = !self.show_help;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                shape_palette(ui, &mut self.editor);
                ui.separator();
                if ui.selectable_label(self.edit_panel_open, "Edit panel").clicked() {
                    self.edit_panel_open = !self.edit_panel_open;
                }
                if ui.button("Help (F1)").clicked() {
                    self.show_help = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                zoom_control(ui, &mut self.editor);
                status_line(ui, &self.editor);
            });
        });

        if self.edit_panel_open {
            egui::SidePanel::right("edit_panel")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| edit_panel(ui, &mut self.editor));
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                let mut redraw = false;
                if rect.size() != self.canvas_size {
                    self.canvas_size = rect.size();
                    redraw |= self.editor.dispatch(InputEvent::Resize {
                        width: rect.width(),
                        height: rect.height(),
                    });
                }
                for event in
                    collect_input(ctx, rect, response.hovered(), &mut self.pointer_captured)
                {
                    redraw |= self.editor.dispatch(event);
                }
                if redraw {
                    ctx.request_repaint();
                }

                if response.hovered() || self.pointer_captured {
                    ctx.set_cursor_icon(cursor_icon(self.editor.controller().cursor()));
                }

                let mut surface = PainterSurface::new(ui.painter_at(rect), rect.min);
                self.editor.render(&mut surface);
            });

        draw_help_window(ctx, &mut self.show_help);
    }
}
