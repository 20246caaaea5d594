//! Draw-call ordering and selection highlighting against a recording surface.

use graphpad::{
    DiagramModel, EdgeGeometry, Editor, EditorSettings, InputEvent, Modifiers, NodeGeometry,
    PaletteEvent, Point, PointerButton, Preview, Renderer, Rgba, ShapeKind, Stroke, Surface,
    Theme, Viewport,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize(f32, f32),
    Clear,
    Transform(f32, f32, f32),
    Circle(Point, f32, Stroke),
    Rect(Point, Point, Stroke),
    Line(Point, Point, Stroke),
    Text(Point, String),
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f32, height: f32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn set_transform(&mut self, scale: f32, translate_x: f32, translate_y: f32) {
        self.calls.push(Call::Transform(scale, translate_x, translate_y));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: Stroke) {
        self.calls.push(Call::Circle(center, radius, stroke));
    }

    fn stroke_rect(&mut self, min: Point, size: Point, stroke: Stroke) {
        self.calls.push(Call::Rect(min, size, stroke));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.calls.push(Call::Line(from, to, stroke));
    }

    fn text(&mut self, at: Point, text: &str, _size: f32, _color: Rgba) {
        self.calls.push(Call::Text(at, text.to_owned()));
    }
}

fn sample_model() -> (DiagramModel, graphpad::ElementId, graphpad::ElementId) {
    let mut model = DiagramModel::new();
    let a = model
        .add_node(NodeGeometry::Rect {
            x: 0.0,
            y: 0.0,
            w: 200.0,
            h: 100.0,
        })
        .unwrap();
    let b = model
        .add_node(NodeGeometry::Circle {
            cx: 400.0,
            cy: 50.0,
            r: 50.0,
        })
        .unwrap();
    (model, a, b)
}

#[test]
fn frame_starts_with_resize_clear_and_transform() {
    let (model, _, _) = sample_model();
    let mut viewport = Viewport::new(640.0, 480.0);
    viewport.zoom_in();
    viewport.translate(5.0, -5.0);
    let mut surface = RecordingSurface::default();
    Renderer::default().draw(&mut surface, &viewport, &model, None);

    assert_eq!(surface.calls[0], Call::Resize(640.0, 480.0));
    assert_eq!(surface.calls[1], Call::Clear);
    assert_eq!(surface.calls[2], Call::Transform(viewport.scale(), 5.0, -5.0));
    // shapes stay in world coordinates; the surface applies the transform
    assert_eq!(surface.calls.len(), 5);
}

#[test]
fn nodes_then_edges_with_labels() {
    let (mut model, a, b) = sample_model();
    let e = model.connect(&a, &b).unwrap();
    model.set_label(&a, "start");
    model.set_label(&e, "go");
    let stroke = Theme::default().stroke;

    let mut surface = RecordingSurface::default();
    Renderer::default().draw(&mut surface, &Viewport::new(800.0, 600.0), &model, None);

    assert_eq!(
        &surface.calls[3..],
        &[
            Call::Rect(Point::new(0.0, 0.0), Point::new(200.0, 100.0), stroke),
            Call::Text(Point::new(100.0, 50.0), "start".to_owned()),
            Call::Circle(Point::new(400.0, 50.0), 50.0, stroke),
            Call::Line(Point::new(200.0, 50.0), Point::new(350.0, 50.0), stroke),
            Call::Text(Point::new(275.0, 50.0), "go".to_owned()),
        ]
    );
}

#[test]
fn selected_rectangle_gets_an_offset_outline() {
    let (mut model, a, _) = sample_model();
    model.toggle_selection(&a);
    let mut surface = RecordingSurface::default();
    Renderer::default().draw(&mut surface, &Viewport::new(800.0, 600.0), &model, None);

    let selection = Theme::default().selection;
    assert_eq!(
        surface.calls.last(),
        Some(&Call::Rect(
            Point::new(-10.0, -10.0),
            Point::new(220.0, 120.0),
            selection
        ))
    );
}

#[test]
fn selected_circle_outline_grows_radius() {
    let (mut model, _, b) = sample_model();
    model.toggle_selection(&b);
    let mut surface = RecordingSurface::default();
    Renderer::new(6.0).draw(&mut surface, &Viewport::new(800.0, 600.0), &model, None);

    assert_eq!(
        surface.calls.last(),
        Some(&Call::Circle(
            Point::new(400.0, 50.0),
            56.0,
            Theme::default().selection
        ))
    );
}

#[test]
fn selected_edge_is_redrawn_in_selection_stroke() {
    let mut model = DiagramModel::new();
    let e = model
        .add_edge(EdgeGeometry {
            x1: 1.0,
            y1: 2.0,
            x2: 3.0,
            y2: 4.0,
        })
        .unwrap();
    model.toggle_selection(&e);
    let mut surface = RecordingSurface::default();
    Renderer::default().draw(&mut surface, &Viewport::new(800.0, 600.0), &model, None);

    assert_eq!(
        surface.calls.last(),
        Some(&Call::Line(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Theme::default().selection
        ))
    );
}

#[test]
fn preview_is_drawn_last() {
    let (mut model, a, _) = sample_model();
    model.toggle_selection(&a);
    let preview = Preview::Edge(EdgeGeometry::between(
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
    ));
    let mut surface = RecordingSurface::default();
    Renderer::default().draw(
        &mut surface,
        &Viewport::new(800.0, 600.0),
        &model,
        Some(&preview),
    );

    assert_eq!(
        surface.calls.last(),
        Some(&Call::Line(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Theme::default().preview
        ))
    );
}

#[test]
fn editor_renders_the_armed_shape_preview() {
    let mut editor = Editor::new(&EditorSettings::default());
    editor.dispatch(InputEvent::Resize {
        width: 300.0,
        height: 200.0,
    });
    editor.dispatch(InputEvent::Palette(PaletteEvent::Toggle(ShapeKind::Circle)));
    editor.dispatch(InputEvent::PointerMove {
        pos: Point::new(120.0, 80.0),
        modifiers: Modifiers::default(),
    });

    let mut surface = RecordingSurface::default();
    editor.render(&mut surface);
    assert_eq!(surface.calls[0], Call::Resize(300.0, 200.0));
    assert_eq!(
        surface.calls.last(),
        Some(&Call::Circle(
            Point::new(120.0, 80.0),
            50.0,
            Theme::default().preview
        ))
    );

    editor.dispatch(InputEvent::PointerDown {
        pos: Point::new(120.0, 80.0),
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    editor.dispatch(InputEvent::PointerUp {
        pos: Point::new(120.0, 80.0),
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    let mut surface = RecordingSurface::default();
    editor.render(&mut surface);
    // committed node, no preview left behind
    assert_eq!(
        &surface.calls[3..],
        &[Call::Circle(
            Point::new(120.0, 80.0),
            50.0,
            Theme::default().stroke
        )]
    );
}
