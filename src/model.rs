use eframe::egui;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::GeometryError;

/// Width of the box a rectangle node occupies when placed or dragged.
pub const RECT_FOOTPRINT_W: f32 = 200.0;
/// Height of the box a rectangle node occupies when placed or dragged.
pub const RECT_FOOTPRINT_H: f32 = 100.0;
/// Radius of a circle node when placed or dragged.
pub const CIRCLE_FOOTPRINT_R: f32 = 50.0;

/// Text attached to freshly created elements.
pub const DEFAULT_DATA: &str = "{}";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Identifier shared by nodes and edges. Generated as a v4 UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Circle,
    Rectangle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeGeometry {
    Circle { cx: f32, cy: f32, r: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32 },
}

impl NodeGeometry {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeGeometry::Circle { .. } => NodeKind::Circle,
            NodeGeometry::Rect { .. } => NodeKind::Rectangle,
        }
    }

    /// The fixed-size shape a gesture produces at `at`: a circle centered on the
    /// point, or a rectangle whose center sits under it.
    pub fn footprint(kind: NodeKind, at: Point) -> Self {
        match kind {
            NodeKind::Circle => NodeGeometry::Circle {
                cx: at.x,
                cy: at.y,
                r: CIRCLE_FOOTPRINT_R,
            },
            NodeKind::Rectangle => NodeGeometry::Rect {
                x: at.x - RECT_FOOTPRINT_W / 2.0,
                y: at.y - RECT_FOOTPRINT_H / 2.0,
                w: RECT_FOOTPRINT_W,
                h: RECT_FOOTPRINT_H,
            },
        }
    }

    pub fn validate(self) -> Result<Self, GeometryError> {
        match self {
            NodeGeometry::Circle { cx, cy, r } => {
                finite("cx", cx)?;
                finite("cy", cy)?;
                extent("r", r)?;
            }
            NodeGeometry::Rect { x, y, w, h } => {
                finite("x", x)?;
                finite("y", y)?;
                extent("w", w)?;
                extent("h", h)?;
            }
        }
        Ok(self)
    }

    pub fn center(&self) -> Point {
        match *self {
            NodeGeometry::Circle { cx, cy, .. } => Point::new(cx, cy),
            NodeGeometry::Rect { x, y, w, h } => Point::new(x + w / 2.0, y + h / 2.0),
        }
    }

    /// Anchor for incoming edges: middle of the left side.
    pub fn left_handle(&self) -> Point {
        match *self {
            NodeGeometry::Circle { cx, cy, r } => Point::new(cx - r, cy),
            NodeGeometry::Rect { x, y, h, .. } => Point::new(x, y + h / 2.0),
        }
    }

    /// Anchor for outgoing edges: middle of the right side.
    pub fn right_handle(&self) -> Point {
        match *self {
            NodeGeometry::Circle { cx, cy, r } => Point::new(cx + r, cy),
            NodeGeometry::Rect { x, y, w, h } => Point::new(x + w, y + h / 2.0),
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { field })
    }
}

fn extent(field: &'static str, value: f32) -> Result<(), GeometryError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(GeometryError::NegativeExtent { field, value });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeGeometry {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl EdgeGeometry {
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn validate(self) -> Result<Self, GeometryError> {
        finite("x1", self.x1)?;
        finite("y1", self.y1)?;
        finite("x2", self.x2)?;
        finite("y2", self.y2)?;
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: ElementId,
    pub geometry: NodeGeometry,
    pub label: String,
    pub data: String,
    pub selected: bool,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.geometry.kind()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: ElementId,
    pub from: Option<ElementId>,
    pub to: Option<ElementId>,
    pub geometry: EdgeGeometry,
    pub label: String,
    pub data: String,
    pub selected: bool,
}

impl Edge {
    pub fn touches(&self, node_id: &ElementId) -> bool {
        self.from.as_ref() == Some(node_id) || self.to.as_ref() == Some(node_id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Edge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub kind: ElementKind,
    pub id: ElementId,
}

/// Borrowed view of either element type, as returned by picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementRef<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> &'a ElementId {
        match self {
            ElementRef::Node(n) => &n.id,
            ElementRef::Edge(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Node(_) => ElementKind::Node,
            ElementRef::Edge(_) => ElementKind::Edge,
        }
    }
}

/// What the label/data editor panel shows for the current selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionDetails {
    pub kind: ElementKind,
    pub id: ElementId,
    pub label: String,
    pub data: String,
}

/// Owner of every node and edge plus the single active selection.
///
/// Mutations given an unknown id, or geometry that fails validation, do nothing
/// and return `false`/`None`.
#[derive(Clone, Debug, Default)]
pub struct DiagramModel {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selection: Option<Selection>,
}

impl DiagramModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &ElementId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &ElementId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn element(&self, id: &ElementId) -> Option<ElementRef<'_>> {
        if let Some(node) = self.node(id) {
            return Some(ElementRef::Node(node));
        }
        self.edge(id).map(ElementRef::Edge)
    }

    pub fn add_node(&mut self, geometry: NodeGeometry) -> Option<ElementId> {
        let geometry = match geometry.validate() {
            Ok(g) => g,
            Err(err) => {
                warn!(%err, "refusing node with invalid geometry");
                return None;
            }
        };
        let id = ElementId::generate();
        debug!(%id, kind = ?geometry.kind(), "node added");
        self.nodes.push(Node {
            id: id.clone(),
            geometry,
            label: String::new(),
            data: DEFAULT_DATA.to_string(),
            selected: false,
        });
        Some(id)
    }

    /// Adds a free-floating edge with no recorded endpoints.
    pub fn add_edge(&mut self, geometry: EdgeGeometry) -> Option<ElementId> {
        let geometry = match geometry.validate() {
            Ok(g) => g,
            Err(err) => {
                warn!(%err, "refusing edge with invalid geometry");
                return None;
            }
        };
        let id = ElementId::generate();
        debug!(%id, "edge added");
        self.edges.push(Edge {
            id: id.clone(),
            from: None,
            to: None,
            geometry,
            label: String::new(),
            data: DEFAULT_DATA.to_string(),
            selected: false,
        });
        Some(id)
    }

    /// Records `from`/`to` on an edge and snaps its geometry onto the nodes'
    /// handles. Both nodes must exist and differ.
    pub fn set_endpoints(&mut self, edge_id: &ElementId, from: &ElementId, to: &ElementId) -> bool {
        if from == to {
            debug!(%edge_id, "edge endpoints must be distinct nodes");
            return false;
        }
        let (Some(source), Some(target)) = (self.node(from), self.node(to)) else {
            debug!(%edge_id, "edge endpoint references an unknown node");
            return false;
        };
        let geometry =
            EdgeGeometry::between(source.geometry.right_handle(), target.geometry.left_handle());
        let Some(edge) = self.edges.iter_mut().find(|e| &e.id == edge_id) else {
            return false;
        };
        edge.from = Some(from.clone());
        edge.to = Some(to.clone());
        edge.geometry = geometry;
        true
    }

    /// Creates an edge from `from`'s right handle to `to`'s left handle.
    pub fn connect(&mut self, from: &ElementId, to: &ElementId) -> Option<ElementId> {
        if from == to || self.node(from).is_none() || self.node(to).is_none() {
            return None;
        }
        let id = self.add_edge(EdgeGeometry::default())?;
        if !self.set_endpoints(&id, from, to) {
            self.edges.retain(|e| e.id != id);
            return None;
        }
        Some(id)
    }

    /// Removes a node and every edge that starts or ends at it.
    pub fn remove_node(&mut self, id: &ElementId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| &n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        let mut removed_edges = Vec::new();
        self.edges.retain(|e| {
            if e.touches(id) {
                removed_edges.push(e.id.clone());
                false
            } else {
                true
            }
        });
        debug!(%id, cascaded = removed_edges.len(), "node removed");
        if let Some(sel) = &self.selection {
            if &sel.id == id || removed_edges.contains(&sel.id) {
                self.selection = None;
            }
        }
        true
    }

    pub fn remove_edge(&mut self, id: &ElementId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| &e.id != id);
        if self.edges.len() == before {
            return false;
        }
        debug!(%id, "edge removed");
        if self.selection.as_ref().is_some_and(|s| &s.id == id) {
            self.selection = None;
        }
        true
    }

    pub fn set_label(&mut self, id: &ElementId, text: &str) -> bool {
        match self.text_fields_mut(id) {
            Some((label, _)) => {
                *label = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_data(&mut self, id: &ElementId, text: &str) -> bool {
        match self.text_fields_mut(id) {
            Some((_, data)) => {
                *data = text.to_string();
                true
            }
            None => false,
        }
    }

    fn text_fields_mut(&mut self, id: &ElementId) -> Option<(&mut String, &mut String)> {
        if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
            return Some((&mut node.label, &mut node.data));
        }
        self.edges
            .iter_mut()
            .find(|e| &e.id == id)
            .map(|e| (&mut e.label, &mut e.data))
    }

    /// Re-seats a node's footprint under `at` and re-anchors its edges.
    pub fn move_node(&mut self, id: &ElementId, at: Point) -> bool {
        if !at.is_finite() {
            debug!(%id, "ignoring move to a non-finite point");
            return false;
        }
        let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) else {
            return false;
        };
        node.geometry = NodeGeometry::footprint(node.kind(), at);
        let geometry = node.geometry;
        tracing::trace!(%id, x = at.x, y = at.y, "node moved");
        self.reanchor(id, &geometry);
        true
    }

    fn reanchor(&mut self, node_id: &ElementId, geometry: &NodeGeometry) {
        let right = geometry.right_handle();
        let left = geometry.left_handle();
        for edge in &mut self.edges {
            if edge.from.as_ref() == Some(node_id) {
                edge.geometry.x1 = right.x;
                edge.geometry.y1 = right.y;
            }
            if edge.to.as_ref() == Some(node_id) {
                edge.geometry.x2 = left.x;
                edge.geometry.y2 = left.y;
            }
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        match &self.selection {
            Some(Selection {
                kind: ElementKind::Node,
                id,
            }) => self.node(id),
            _ => None,
        }
    }

    pub fn selected_edge(&self) -> Option<&Edge> {
        match &self.selection {
            Some(Selection {
                kind: ElementKind::Edge,
                id,
            }) => self.edge(id),
            _ => None,
        }
    }

    /// Selects `id`, or clears the selection if `id` is already selected.
    pub fn toggle_selection(&mut self, id: &ElementId) {
        self.select_among(std::slice::from_ref(id));
    }

    /// Click selection over a set of hits: clears the selection if it is among
    /// `ids`, otherwise selects the first edge in `ids`, else the first node.
    pub fn select_among(&mut self, ids: &[ElementId]) {
        if let Some(sel) = &self.selection {
            if ids.contains(&sel.id) {
                self.clear_selection();
                return;
            }
        }
        let next = self
            .edges
            .iter()
            .find(|e| ids.contains(&e.id))
            .map(|e| Selection {
                kind: ElementKind::Edge,
                id: e.id.clone(),
            })
            .or_else(|| {
                self.nodes.iter().find(|n| ids.contains(&n.id)).map(|n| Selection {
                    kind: ElementKind::Node,
                    id: n.id.clone(),
                })
            });
        if next.is_some() {
            self.selection = next;
            self.sync_selected_flags();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.sync_selected_flags();
    }

    fn sync_selected_flags(&mut self) {
        let sel = self.selection.as_ref().map(|s| &s.id);
        for node in &mut self.nodes {
            node.selected = sel == Some(&node.id);
        }
        for edge in &mut self.edges {
            edge.selected = sel == Some(&edge.id);
        }
    }

    /// Deletes whatever is selected. Nodes take their edges with them.
    pub fn remove_selected(&mut self) -> bool {
        let Some(sel) = self.selection.clone() else {
            return false;
        };
        match sel.kind {
            ElementKind::Node => self.remove_node(&sel.id),
            ElementKind::Edge => self.remove_edge(&sel.id),
        }
    }

    pub fn selection_details(&self) -> Option<SelectionDetails> {
        let sel = self.selection.as_ref()?;
        let element = self.element(&sel.id)?;
        let (label, data) = match element {
            ElementRef::Node(n) => (&n.label, &n.data),
            ElementRef::Edge(e) => (&e.label, &e.data),
        };
        Some(SelectionDetails {
            kind: element.kind(),
            id: sel.id.clone(),
            label: label.clone(),
            data: data.clone(),
        })
    }

    /// Drops every node, edge and the selection.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "diagram cleared"
        );
        self.nodes.clear();
        self.edges.clear();
        self.selection = None;
    }
}

pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (p.x - a.x, p.y - a.y);
    let ab_len2 = abx * abx + aby * aby;
    if ab_len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((apx * abx + apy * aby) / ab_len2).clamp(0.0, 1.0);
    let closest = Point::new(a.x + abx * t, a.y + aby * t);
    p.distance(closest)
}
