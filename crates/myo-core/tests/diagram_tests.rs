// Host-side tests for the force-directed ownership diagram.

use glam::Vec2;
use myo_core::{ConfigError, DiagramConfig, ForceDiagram, FrameTime};

fn diagram() -> ForceDiagram {
    let mut diagram = ForceDiagram::new(DiagramConfig::default()).unwrap();
    diagram.resize(Vec2::new(600.0, 400.0));
    diagram
}

fn frame(now: f64) -> FrameTime {
    FrameTime::new(now, 1.0 / 60.0)
}

#[test]
fn star_topology() {
    let diagram = diagram();
    assert_eq!(diagram.nodes().len(), 6);
    assert_eq!(diagram.edges().len(), 5);
    assert!(diagram.edges().iter().all(|e| e.source == 0 && e.target > 0));
    assert!(diagram.nodes()[0].pinned);
    assert!(diagram.nodes()[1..].iter().all(|n| !n.pinned));
}

#[test]
fn hub_stays_pinned_at_center() {
    let mut diagram = diagram();
    for _ in 0..400 {
        diagram.step();
        assert_eq!(diagram.nodes()[0].position, Vec2::new(300.0, 200.0));
    }
}

#[test]
fn relaxed_layout_has_no_overlaps() {
    let mut diagram = diagram();
    for _ in 0..500 {
        diagram.step();
    }
    let nodes = diagram.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let min = a.radius + b.radius + 12.0;
            let d = a.position.distance(b.position);
            assert!(d >= min - 1e-3, "{} and {} overlap ({} < {})", a.label, b.label, d, min);
        }
    }
    for leaf in &nodes[1..] {
        let d = leaf.position.distance(nodes[0].position);
        assert!(d > 100.0 && d < 300.0, "leaf {} drifted to {}", leaf.label, d);
        assert!(leaf.position.is_finite());
    }
}

#[test]
fn alpha_cools_to_floor_but_not_zero() {
    let mut diagram = diagram();
    assert_eq!(diagram.alpha(), 1.0);
    for _ in 0..600 {
        diagram.step();
    }
    assert!((diagram.alpha() - 0.02).abs() < 1e-6);
}

#[test]
fn markers_launch_on_interval_and_travel() {
    let mut diagram = diagram();
    diagram.advance(frame(0.0));
    assert!(diagram.markers().is_empty());

    diagram.advance(frame(2.5));
    assert_eq!(diagram.markers().len(), 5);
    for (i, m) in diagram.markers().iter().enumerate() {
        assert_eq!(m.edge, i);
        assert!((m.start - (2.5 + i as f64 * 0.15)).abs() < 1e-9);
        assert_eq!(m.duration, 1.5);
    }

    // only the first marker has set off
    let states = diagram.marker_states(2.5);
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].position, diagram.nodes()[0].position);
    assert_eq!(states[0].opacity, 1.0);

    // halfway: in-out cubic puts it at the midpoint
    let states = diagram.marker_states(3.25);
    let hub = diagram.nodes()[0].position;
    let leaf = diagram.nodes()[1].position;
    assert!(states[0].position.distance((hub + leaf) * 0.5) < 1e-3);

    // fading out on arrival
    let late = diagram.marker_states(3.95);
    assert!(late[0].opacity < 0.2);
}

#[test]
fn finished_markers_are_dropped() {
    let mut diagram = diagram();
    diagram.advance(frame(0.0));
    diagram.advance(frame(2.5));
    diagram.advance(frame(4.05));
    assert_eq!(diagram.markers().len(), 4);
    diagram.advance(frame(4.9));
    assert!(diagram.markers().is_empty());
}

#[test]
fn resize_clears_markers() {
    let mut diagram = diagram();
    diagram.advance(frame(0.0));
    diagram.advance(frame(2.5));
    diagram.resize(Vec2::new(300.0, 300.0));
    assert!(diagram.markers().is_empty());
    assert_eq!(diagram.nodes()[0].position, Vec2::new(150.0, 150.0));
}

#[test]
fn hover_highlight_transitions_in_and_out() {
    let mut diagram = diagram();
    diagram.set_hover(Some(2));
    let mut now = 0.0;
    let step = FrameTime::new(0.0, 0.05);
    for _ in 0..2 {
        now += 0.05;
        diagram.advance(FrameTime { now, ..step });
    }
    let partial = diagram.nodes()[2].highlight;
    assert!(partial > 0.0 && partial < 1.0);

    for _ in 0..10 {
        now += 0.05;
        diagram.advance(FrameTime { now, ..step });
    }
    assert_eq!(diagram.nodes()[2].highlight, 1.0);
    assert_eq!(diagram.nodes()[1].highlight, 0.0);

    diagram.set_hover(None);
    for _ in 0..10 {
        now += 0.05;
        diagram.advance(FrameTime { now, ..step });
    }
    assert_eq!(diagram.nodes()[2].highlight, 0.0);
}

#[test]
fn hover_ignores_unknown_node() {
    let mut diagram = diagram();
    diagram.set_hover(Some(42));
    assert_eq!(diagram.hovered(), None);
}

#[test]
fn rejects_single_node_config() {
    let config = DiagramConfig {
        labels: vec!["alone".into()],
        ..DiagramConfig::default()
    };
    assert_eq!(
        ForceDiagram::new(config).err(),
        Some(ConfigError::TooFew {
            field: "labels",
            len: 1,
            min: 2
        })
    );
}
