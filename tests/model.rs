//! Node/edge bookkeeping: cascading deletes, re-anchoring, selection.

use graphpad::{DiagramModel, EdgeGeometry, ElementId, ElementKind, NodeGeometry, Point};
use proptest::prelude::*;

fn rect(x: f32, y: f32) -> NodeGeometry {
    NodeGeometry::Rect {
        x,
        y,
        w: 200.0,
        h: 100.0,
    }
}

fn circle(cx: f32, cy: f32) -> NodeGeometry {
    NodeGeometry::Circle { cx, cy, r: 50.0 }
}

proptest! {
    #[test]
    fn removing_a_node_removes_exactly_its_edges(
        node_count in 2usize..7,
        links in prop::collection::vec((0usize..7, 0usize..7), 0..15),
        victim in 0usize..7,
    ) {
        let mut model = DiagramModel::new();
        let ids: Vec<ElementId> = (0..node_count)
            .map(|i| model.add_node(rect(i as f32 * 300.0, 0.0)).unwrap())
            .collect();
        for (a, b) in links {
            let (a, b) = (a % node_count, b % node_count);
            if a != b {
                model.connect(&ids[a], &ids[b]);
            }
        }
        // a free-floating edge never cascades
        model.add_edge(EdgeGeometry { x1: 0.0, y1: 0.0, x2: 5.0, y2: 5.0 });

        let victim = &ids[victim % node_count];
        let expected: Vec<ElementId> = model
            .edges()
            .iter()
            .filter(|e| !e.touches(victim))
            .map(|e| e.id.clone())
            .collect();

        prop_assert!(model.remove_node(victim));
        let remaining: Vec<ElementId> = model.edges().iter().map(|e| e.id.clone()).collect();
        prop_assert_eq!(remaining, expected);
        prop_assert!(model.node(victim).is_none());
        prop_assert_eq!(model.nodes().len(), node_count - 1);
    }

    #[test]
    fn moved_nodes_keep_their_edges_on_handles(x in -500.0f32..500.0, y in -500.0f32..500.0) {
        let mut model = DiagramModel::new();
        let a = model.add_node(circle(0.0, 0.0)).unwrap();
        let b = model.add_node(rect(400.0, 0.0)).unwrap();
        let c = model.add_node(rect(-400.0, 0.0)).unwrap();
        model.connect(&a, &b).unwrap();
        model.connect(&c, &a).unwrap();

        model.move_node(&a, Point::new(x, y));
        let node = model.node(&a).unwrap();
        for edge in model.edges() {
            if edge.from.as_ref() == Some(&a) {
                prop_assert_eq!(edge.geometry.start(), node.geometry.right_handle());
            }
            if edge.to.as_ref() == Some(&a) {
                prop_assert_eq!(edge.geometry.end(), node.geometry.left_handle());
            }
        }
    }
}

#[test]
fn connect_anchors_on_right_and_left_handles() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();
    let e = model.connect(&a, &b).unwrap();
    let edge = model.edge(&e).unwrap();
    assert_eq!(edge.from.as_ref(), Some(&a));
    assert_eq!(edge.to.as_ref(), Some(&b));
    assert_eq!(edge.geometry.start(), Point::new(200.0, 50.0));
    assert_eq!(edge.geometry.end(), Point::new(300.0, 50.0));
}

#[test]
fn moving_a_rectangle_recenters_its_footprint() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();
    model.connect(&a, &b).unwrap();

    assert!(model.move_node(&b, Point::new(600.0, 200.0)));
    assert_eq!(model.node(&b).unwrap().geometry, rect(500.0, 150.0));
    let edge = &model.edges()[0];
    assert_eq!(edge.geometry.start(), Point::new(200.0, 50.0));
    assert_eq!(edge.geometry.end(), Point::new(500.0, 200.0));
}

#[test]
fn moving_to_non_finite_point_is_ignored() {
    let mut model = DiagramModel::new();
    let a = model.add_node(circle(10.0, 10.0)).unwrap();
    assert!(!model.move_node(&a, Point::new(f32::NAN, 0.0)));
    assert_eq!(model.node(&a).unwrap().geometry, circle(10.0, 10.0));
}

#[test]
fn selection_toggles_and_replaces() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();

    model.toggle_selection(&a);
    assert_eq!(model.selection().map(|s| &s.id), Some(&a));
    model.toggle_selection(&b);
    assert_eq!(model.selection().map(|s| &s.id), Some(&b));
    model.toggle_selection(&b);
    assert!(model.selection().is_none());
}

#[test]
fn select_among_prefers_edges() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();
    let e = model.connect(&a, &b).unwrap();

    model.select_among(&[a.clone(), e.clone()]);
    let sel = model.selection().unwrap();
    assert_eq!(sel.kind, ElementKind::Edge);
    assert_eq!(sel.id, e);

    // the current selection among the hits clears it
    model.select_among(&[a.clone(), e.clone()]);
    assert!(model.selection().is_none());
}

#[test]
fn deleting_the_selected_node_clears_selection_and_edges() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();
    let c = model.add_node(rect(600.0, 0.0)).unwrap();
    model.connect(&a, &b).unwrap();
    let kept = model.connect(&b, &c).unwrap();

    model.toggle_selection(&a);
    assert!(model.remove_selected());
    assert!(model.selection().is_none());
    assert!(model.node(&a).is_none());
    assert_eq!(model.edges().len(), 1);
    assert_eq!(model.edges()[0].id, kept);
}

#[test]
fn removing_a_node_clears_a_selected_cascaded_edge() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();
    let e = model.connect(&a, &b).unwrap();
    model.toggle_selection(&e);
    model.remove_node(&b);
    assert!(model.selection().is_none());
    assert!(model.edges().is_empty());
}

#[test]
fn removing_the_selected_edge_clears_selection_and_keeps_the_rest() {
    let mut model = DiagramModel::new();
    let a = model.add_node(rect(0.0, 0.0)).unwrap();
    let b = model.add_node(rect(300.0, 0.0)).unwrap();
    let c = model.add_node(rect(600.0, 0.0)).unwrap();
    let doomed = model.connect(&a, &b).unwrap();
    let kept = model.connect(&b, &c).unwrap();

    model.toggle_selection(&doomed);
    assert!(model.remove_edge(&doomed));
    assert!(model.selection().is_none());
    assert!(model.edge(&doomed).is_none());
    assert_eq!(model.edges().len(), 1);
    assert_eq!(model.edges()[0].id, kept);
    assert_eq!(model.nodes().len(), 3);
}

#[test]
fn labels_and_data_are_stored_verbatim() {
    let mut model = DiagramModel::new();
    let a = model.add_node(circle(0.0, 0.0)).unwrap();
    let e = model
        .add_edge(EdgeGeometry {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        })
        .unwrap();
    assert!(model.set_label(&a, "start"));
    assert!(model.set_data(&a, "{not json"));
    assert!(model.set_label(&e, "next"));

    model.toggle_selection(&a);
    let details = model.selection_details().unwrap();
    assert_eq!(details.kind, ElementKind::Node);
    assert_eq!(details.label, "start");
    assert_eq!(details.data, "{not json");
    assert_eq!(model.edge(&e).unwrap().label, "next");
}

#[test]
fn clear_drops_everything() {
    let mut model = DiagramModel::new();
    let a = model.add_node(circle(0.0, 0.0)).unwrap();
    let b = model.add_node(circle(200.0, 0.0)).unwrap();
    model.connect(&a, &b).unwrap();
    model.toggle_selection(&a);
    model.clear();
    assert!(model.is_empty());
    assert!(model.selection().is_none());
}

#[test]
fn ids_are_unique() {
    let mut model = DiagramModel::new();
    let mut ids: Vec<ElementId> = (0..50)
        .map(|i| model.add_node(circle(i as f32, 0.0)).unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}
