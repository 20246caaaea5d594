//! Pointer and keyboard state machine.
//!
//! The controller turns raw canvas input into viewport and model mutations.
//! Each event is handled to completion and reports whether the canvas needs a
//! repaint. Nodes and edges are only created when a gesture completes.

use tracing::{debug, trace};

use crate::hit_test::HitTester;
use crate::model::{DiagramModel, EdgeGeometry, ElementId, NodeGeometry, NodeKind, Point};
use crate::render::Preview;
use crate::viewport::Viewport;

pub const DEFAULT_PAN_STEP: f32 = 10.0;

/// A palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Arrow,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Arrow];

    pub fn node_kind(self) -> Option<NodeKind> {
        match self {
            ShapeKind::Circle => Some(NodeKind::Circle),
            ShapeKind::Rectangle => Some(NodeKind::Rectangle),
            ShapeKind::Arrow => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Arrow => "arrow",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteEvent {
    /// Arms `ShapeKind`, or disarms it when it is already armed.
    Toggle(ShapeKind),
    Deselect,
}

/// Input in canvas-relative screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown {
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Palette(PaletteEvent),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Idle,
    ShapeArmed(ShapeKind),
    /// Pointer is down; `start` is in world space.
    Pressing {
        start: Point,
        armed: Option<ShapeKind>,
    },
    DraggingSelection,
    DrawingEdge {
        start: Point,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    Crosshair,
}

/// Proof that a host is delivering key events. Dropping it without
/// [`InteractionController::detach_keyboard`] keeps the keyboard attached.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyboardSubscription(u64);

#[derive(Clone, Debug)]
pub struct InteractionController {
    mode: Mode,
    hit_tester: HitTester,
    pan_step: f32,
    preview: Option<Preview>,
    cursor: CursorHint,
    keyboard: Option<u64>,
    next_subscription: u64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(HitTester::default(), DEFAULT_PAN_STEP)
    }
}

impl InteractionController {
    pub fn new(hit_tester: HitTester, pan_step: f32) -> Self {
        Self {
            mode: Mode::Idle,
            hit_tester,
            pan_step,
            preview: None,
            cursor: CursorHint::Default,
            keyboard: None,
            next_subscription: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn armed(&self) -> Option<ShapeKind> {
        match self.mode {
            Mode::ShapeArmed(kind) => Some(kind),
            Mode::Pressing { armed, .. } => armed,
            Mode::DrawingEdge { .. } => Some(ShapeKind::Arrow),
            Mode::Idle | Mode::DraggingSelection => None,
        }
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn attach_keyboard(&mut self) -> KeyboardSubscription {
        self.next_subscription += 1;
        self.keyboard = Some(self.next_subscription);
        KeyboardSubscription(self.next_subscription)
    }

    pub fn detach_keyboard(&mut self, subscription: KeyboardSubscription) {
        if self.keyboard == Some(subscription.0) {
            self.keyboard = None;
        }
    }

    pub fn keyboard_attached(&self) -> bool {
        self.keyboard.is_some()
    }

    /// Handles one event. Returns `true` when the canvas should be redrawn.
    pub fn handle(
        &mut self,
        model: &mut DiagramModel,
        viewport: &mut Viewport,
        event: InputEvent,
    ) -> bool {
        match event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
                ..
            } => self.pointer_down(model, viewport, pos),
            InputEvent::PointerMove { pos, .. } => self.pointer_move(model, viewport, pos),
            InputEvent::PointerUp {
                pos,
                button: PointerButton::Primary,
                ..
            } => self.pointer_up(model, viewport, pos),
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => false,
            InputEvent::Wheel {
                delta_x,
                delta_y,
                modifiers,
            } => self.wheel(viewport, delta_x, delta_y, modifiers),
            InputEvent::KeyDown { key, .. } => self.key_down(model, key),
            InputEvent::Resize { width, height } => {
                viewport.set_size(width, height);
                true
            }
            InputEvent::Palette(event) => self.palette(event),
        }
    }

    fn palette(&mut self, event: PaletteEvent) -> bool {
        self.mode = match event {
            PaletteEvent::Toggle(kind) if self.armed() != Some(kind) => Mode::ShapeArmed(kind),
            PaletteEvent::Toggle(_) | PaletteEvent::Deselect => Mode::Idle,
        };
        debug!(armed = ?self.armed(), "palette changed");
        self.preview = None;
        self.cursor = if self.armed().is_some() {
            CursorHint::Crosshair
        } else {
            CursorHint::Default
        };
        true
    }

    fn pointer_down(&mut self, model: &mut DiagramModel, viewport: &Viewport, pos: Point) -> bool {
        if viewport.is_degenerate() {
            return false;
        }
        let p = viewport.screen_to_world(pos);
        match self.mode {
            Mode::Idle => {
                let ids: Vec<ElementId> = self
                    .hit_tester
                    .pick(model, p)
                    .iter()
                    .map(|hit| hit.id().clone())
                    .collect();
                if ids.is_empty() {
                    return false;
                }
                model.select_among(&ids);
                self.mode = Mode::Pressing {
                    start: p,
                    armed: None,
                };
                true
            }
            Mode::ShapeArmed(kind) => {
                self.mode = Mode::Pressing {
                    start: p,
                    armed: Some(kind),
                };
                false
            }
            Mode::Pressing { .. } | Mode::DraggingSelection | Mode::DrawingEdge { .. } => false,
        }
    }

    fn pointer_move(&mut self, model: &mut DiagramModel, viewport: &Viewport, pos: Point) -> bool {
        if viewport.is_degenerate() {
            return false;
        }
        let p = viewport.screen_to_world(pos);
        trace!(x = p.x, y = p.y, mode = ?self.mode, "pointer move");
        match self.mode {
            Mode::ShapeArmed(kind)
            | Mode::Pressing {
                armed: Some(kind), ..
            } if kind != ShapeKind::Arrow => {
                let Some(node_kind) = kind.node_kind() else {
                    return false;
                };
                self.preview = Some(Preview::Node(NodeGeometry::footprint(node_kind, p)));
                true
            }
            Mode::ShapeArmed(_) => false,
            Mode::Pressing { start, armed: Some(_) } | Mode::DrawingEdge { start } => {
                self.mode = Mode::DrawingEdge { start };
                self.preview = Some(Preview::Edge(EdgeGeometry::between(start, p)));
                true
            }
            Mode::Pressing { armed: None, .. } => {
                let Some(id) = model.selection().map(|s| s.id.clone()) else {
                    return false;
                };
                self.mode = Mode::DraggingSelection;
                model.move_node(&id, p);
                true
            }
            Mode::DraggingSelection => {
                let Some(id) = model.selection().map(|s| s.id.clone()) else {
                    return false;
                };
                model.move_node(&id, p)
            }
            Mode::Idle => {
                self.cursor = if self.hit_tester.pick(model, p).is_empty() {
                    CursorHint::Default
                } else {
                    CursorHint::Move
                };
                false
            }
        }
    }

    fn pointer_up(&mut self, model: &mut DiagramModel, viewport: &Viewport, pos: Point) -> bool {
        let p = viewport.screen_to_world(pos);
        let degenerate = viewport.is_degenerate();
        match self.mode {
            Mode::ShapeArmed(kind) | Mode::Pressing { armed: Some(kind), .. }
                if kind != ShapeKind::Arrow =>
            {
                if degenerate {
                    self.mode = Mode::ShapeArmed(kind);
                    return false;
                }
                if let Some(node_kind) = kind.node_kind() {
                    model.add_node(NodeGeometry::footprint(node_kind, p));
                }
                self.finish_gesture(Mode::Idle);
                true
            }
            Mode::ShapeArmed(_) => false,
            Mode::Pressing { start, armed: Some(_) } | Mode::DrawingEdge { start } => {
                let next = if degenerate {
                    Mode::ShapeArmed(ShapeKind::Arrow)
                } else if self.commit_edge(model, start, p) {
                    Mode::Idle
                } else {
                    debug!("arrow did not land on two distinct nodes");
                    Mode::ShapeArmed(ShapeKind::Arrow)
                };
                self.finish_gesture(next);
                true
            }
            Mode::Pressing { armed: None, .. } | Mode::DraggingSelection => {
                self.mode = Mode::Idle;
                false
            }
            Mode::Idle => false,
        }
    }

    fn commit_edge(&self, model: &mut DiagramModel, start: Point, end: Point) -> bool {
        let from = self.hit_tester.find_node_near(model, start).map(|n| n.id.clone());
        let to = self.hit_tester.find_node_near(model, end).map(|n| n.id.clone());
        match (from, to) {
            (Some(from), Some(to)) if from != to => model.connect(&from, &to).is_some(),
            _ => false,
        }
    }

    fn finish_gesture(&mut self, next: Mode) {
        self.mode = next;
        self.preview = None;
        self.cursor = if self.armed().is_some() {
            CursorHint::Crosshair
        } else {
            CursorHint::Default
        };
    }

    fn wheel(&mut self, viewport: &mut Viewport, dx: f32, dy: f32, modifiers: Modifiers) -> bool {
        let mut changed = false;
        if modifiers.ctrl && modifiers.alt {
            if dy > 0.0 {
                viewport.zoom_in();
                changed = true;
            } else if dy < 0.0 {
                viewport.zoom_out();
                changed = true;
            }
        }
        if modifiers.shift {
            let step = self.pan_step;
            let pan_y = if dy > 0.0 {
                step
            } else if dy < 0.0 {
                -step
            } else {
                0.0
            };
            let pan_x = if dx > 0.0 {
                step
            } else if dx < 0.0 {
                -step
            } else {
                0.0
            };
            if pan_x != 0.0 || pan_y != 0.0 {
                viewport.translate(pan_x, pan_y);
                changed = true;
            }
        }
        changed
    }

    fn key_down(&mut self, model: &mut DiagramModel, key: Key) -> bool {
        if self.keyboard.is_none() {
            return false;
        }
        match key {
            Key::Delete => {
                if !model.remove_selected() {
                    return false;
                }
                if matches!(
                    self.mode,
                    Mode::DraggingSelection | Mode::Pressing { armed: None, .. }
                ) {
                    self.mode = Mode::Idle;
                }
                true
            }
            Key::Escape => {
                let busy = self.mode != Mode::Idle || self.preview.is_some();
                self.finish_gesture(Mode::Idle);
                busy
            }
            Key::Other => false,
        }
    }
}
