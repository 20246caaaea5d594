use eframe::egui;

use crate::controller::{CursorHint, InputEvent, Key, Modifiers, PointerButton};
use crate::model::Point;
use crate::render::{Rgba, Stroke, Surface};

/// [`Surface`] backed by an egui painter. World coordinates are mapped through
/// the last transform and offset by the canvas origin.
pub(super) struct PainterSurface {
    painter: egui::Painter,
    origin: egui::Pos2,
    scale: f32,
    translate: egui::Vec2,
}

impl PainterSurface {
    pub(super) fn new(painter: egui::Painter, origin: egui::Pos2) -> Self {
        Self {
            painter,
            origin,
            scale: 1.0,
            translate: egui::Vec2::ZERO,
        }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.origin + (p.to_pos2().to_vec2() + self.translate) * self.scale
    }
}

impl Surface for PainterSurface {
    fn resize(&mut self, width: f32, height: f32) {
        let clip = egui::Rect::from_min_size(self.origin, egui::vec2(width, height));
        self.painter = self.painter.with_clip_rect(clip);
    }

    fn clear(&mut self) {
        let bg = self.painter.ctx().style().visuals.extreme_bg_color;
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, bg);
    }

    fn set_transform(&mut self, scale: f32, translate_x: f32, translate_y: f32) {
        self.scale = scale;
        self.translate = egui::vec2(translate_x, translate_y);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        self.painter.circle_stroke(
            self.to_screen(center),
            radius * self.scale,
            stroke.to_egui(self.scale),
        );
    }

    fn stroke_rect(&mut self, min: Point, size: Point, stroke: Stroke) {
        let rect = egui::Rect::from_min_size(
            self.to_screen(min),
            egui::vec2(size.x, size.y) * self.scale,
        );
        self.painter
            .rect_stroke(rect, 0.0, stroke.to_egui(self.scale), egui::StrokeKind::Middle);
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            stroke.to_egui(self.scale),
        );
    }

    fn text(&mut self, at: Point, text: &str, size: f32, color: Rgba) {
        if self.scale <= f32::EPSILON {
            return;
        }
        self.painter.text(
            self.to_screen(at),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size * self.scale),
            color.to_color32(),
        );
    }
}

fn modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        ctrl: m.ctrl || m.mac_cmd,
        alt: m.alt,
    }
}

fn button(b: egui::PointerButton) -> PointerButton {
    match b {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Secondary => PointerButton::Secondary,
        _ => PointerButton::Middle,
    }
}

fn key(k: egui::Key) -> Key {
    match k {
        egui::Key::Delete | egui::Key::Backspace => Key::Delete,
        egui::Key::Escape => Key::Escape,
        _ => Key::Other,
    }
}

/// Translates this frame's raw egui events into controller input, relative to
/// `rect`. Presses only count when they start over the canvas; a release is
/// forwarded only for a press that was.
pub(super) fn collect_input(
    ctx: &egui::Context,
    rect: egui::Rect,
    canvas_hovered: bool,
    pointer_captured: &mut bool,
) -> Vec<InputEvent> {
    let keyboard_free = !ctx.wants_keyboard_input();
    let local = |pos: egui::Pos2| Point::from_pos2(pos - rect.min.to_vec2());
    let raw = ctx.input(|i| i.events.clone());
    let mut out = Vec::new();
    for event in raw {
        match event {
            egui::Event::PointerMoved(pos) => {
                if canvas_hovered || *pointer_captured {
                    out.push(InputEvent::PointerMove {
                        pos: local(pos),
                        modifiers: ctx.input(|i| modifiers(i.modifiers)),
                    });
                }
            }
            egui::Event::PointerButton {
                pos,
                button: b,
                pressed,
                modifiers: m,
                ..
            } => {
                let primary = b == egui::PointerButton::Primary;
                if pressed {
                    if !canvas_hovered || !rect.contains(pos) {
                        continue;
                    }
                    if primary {
                        *pointer_captured = true;
                    }
                    out.push(InputEvent::PointerDown {
                        pos: local(pos),
                        button: button(b),
                        modifiers: modifiers(m),
                    });
                } else if !primary || *pointer_captured {
                    if primary {
                        *pointer_captured = false;
                    }
                    out.push(InputEvent::PointerUp {
                        pos: local(pos),
                        button: button(b),
                        modifiers: modifiers(m),
                    });
                }
            }
            egui::Event::MouseWheel {
                delta, modifiers: m, ..
            } if canvas_hovered => {
                // egui reports scrolling up as positive; the controller expects
                // positive for scrolling down.
                out.push(InputEvent::Wheel {
                    delta_x: -delta.x,
                    delta_y: -delta.y,
                    modifiers: modifiers(m),
                });
            }
            egui::Event::Key {
                key: k,
                pressed: true,
                modifiers: m,
                ..
            } if keyboard_free => {
                out.push(InputEvent::KeyDown {
                    key: key(k),
                    modifiers: modifiers(m),
                });
            }
            _ => {}
        }
    }
    out
}

pub(super) fn cursor_icon(hint: CursorHint) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Move => egui::CursorIcon::Move,
        CursorHint::Crosshair => egui::CursorIcon::Crosshair,
    }
}
