//! Drawing the diagram onto a host-provided surface.
//!
//! The [`Renderer`] holds no interaction state: each call repaints the whole
//! diagram from the [`Viewport`] and [`DiagramModel`] it is handed, plus an
//! optional gesture preview.

use eframe::egui;

use crate::model::{DiagramModel, EdgeGeometry, NodeGeometry, Point};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

impl Stroke {
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { color, width }
    }

    pub fn to_egui(self, scale: f32) -> egui::Stroke {
        egui::Stroke::new(self.width * scale, self.color.to_color32())
    }
}

/// A 2D drawing target. Coordinates passed to the drawing calls are world
/// coordinates; the surface applies the transform last given to
/// [`Surface::set_transform`].
pub trait Surface {
    fn resize(&mut self, width: f32, height: f32);
    fn clear(&mut self);
    fn set_transform(&mut self, scale: f32, translate_x: f32, translate_y: f32);
    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke);
    fn stroke_rect(&mut self, min: Point, size: Point, stroke: Stroke);
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn text(&mut self, at: Point, text: &str, size: f32, color: Rgba);
}

/// A pending shape or edge drawn on top of the diagram while a gesture is in
/// flight. Never part of the model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Preview {
    Node(NodeGeometry),
    Edge(EdgeGeometry),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub stroke: Stroke,
    pub selection: Stroke,
    pub preview: Stroke,
    pub label_color: Rgba,
    pub label_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            stroke: Stroke::new(2.0, Rgba::new(0, 0, 0, 153)),
            selection: Stroke::new(2.0, Rgba::new(37, 99, 235, 255)),
            preview: Stroke::new(1.5, Rgba::new(0, 0, 0, 90)),
            label_color: Rgba::new(30, 30, 30, 255),
            label_size: 14.0,
        }
    }
}

pub const DEFAULT_SELECTION_OFFSET: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderer {
    pub theme: Theme,
    pub selection_offset: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            selection_offset: DEFAULT_SELECTION_OFFSET,
        }
    }
}

impl Renderer {
    pub fn new(selection_offset: f32) -> Self {
        Self {
            selection_offset,
            ..Self::default()
        }
    }

    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        viewport: &Viewport,
        model: &DiagramModel,
        preview: Option<&Preview>,
    ) {
        surface.resize(viewport.width(), viewport.height());
        surface.clear();
        let (tx, ty) = viewport.translation();
        surface.set_transform(viewport.scale(), tx, ty);

        let theme = &self.theme;
        for node in model.nodes() {
            draw_node_shape(surface, &node.geometry, 0.0, theme.stroke);
            if !node.label.is_empty() {
                surface.text(
                    node.geometry.center(),
                    &node.label,
                    theme.label_size,
                    theme.label_color,
                );
            }
        }
        for edge in model.edges() {
            surface.line(edge.geometry.start(), edge.geometry.end(), theme.stroke);
            if !edge.label.is_empty() {
                surface.text(
                    edge.geometry.midpoint(),
                    &edge.label,
                    theme.label_size,
                    theme.label_color,
                );
            }
        }

        if let Some(node) = model.selected_node() {
            draw_node_shape(surface, &node.geometry, self.selection_offset, theme.selection);
        } else if let Some(edge) = model.selected_edge() {
            surface.line(edge.geometry.start(), edge.geometry.end(), theme.selection);
        }

        match preview {
            Some(Preview::Node(geometry)) => draw_node_shape(surface, geometry, 0.0, theme.preview),
            Some(Preview::Edge(geometry)) => {
                surface.line(geometry.start(), geometry.end(), theme.preview)
            }
            None => {}
        }
    }
}

fn draw_node_shape(surface: &mut dyn Surface, geometry: &NodeGeometry, offset: f32, stroke: Stroke) {
    match *geometry {
        NodeGeometry::Circle { cx, cy, r } => {
            surface.stroke_circle(Point::new(cx, cy), r + offset, stroke)
        }
        NodeGeometry::Rect { x, y, w, h } => surface.stroke_rect(
            Point::new(x - offset, y - offset),
            Point::new(w + offset * 2.0, h + offset * 2.0),
            stroke,
        ),
    }
}
