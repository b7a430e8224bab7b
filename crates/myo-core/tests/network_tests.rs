// Host-side tests for the network graph: layout invariants, pulse and ripple
// lifecycles, click fan-out and resize.

use glam::Vec2;
use myo_core::surface::DrawOp;
use myo_core::{Effect, FrameTime, InputEvent, NetworkConfig, NetworkGraph, Recorder};

fn quiet() -> NetworkConfig {
    NetworkConfig {
        spawn_chance: 0.0,
        ..NetworkConfig::default()
    }
}

fn graph(w: f32, h: f32, seed: u64) -> NetworkGraph {
    let mut graph = NetworkGraph::new(quiet(), seed).unwrap();
    graph.resize(Vec2::new(w, h));
    graph
}

#[test]
fn edges_reference_valid_distinct_nodes() {
    for seed in 0..6 {
        let graph = graph(1200.0, 800.0, seed);
        assert!(!graph.edges().is_empty());
        for edge in graph.edges() {
            assert!(edge.from < graph.nodes().len());
            assert!(edge.to < graph.nodes().len());
            assert_ne!(edge.from, edge.to);
        }
    }
}

#[test]
fn exclusion_zone_stays_clear() {
    let size = Vec2::new(1200.0, 800.0);
    let graph = graph(size.x, size.y, 4);
    let zone = graph.config().exclusion;
    for node in graph.nodes() {
        assert!(!zone.contains(node.position, size));
    }
    for edge in graph.edges() {
        let mid = (graph.nodes()[edge.from].position + graph.nodes()[edge.to].position) * 0.5;
        assert!(!zone.contains(mid, size), "edge midpoint {:?} in zone", mid);
    }
}

#[test]
fn nodes_are_snapped_and_unique() {
    let graph = graph(1000.0, 700.0, 2);
    let mut cells = std::collections::HashSet::new();
    for node in graph.nodes() {
        assert_eq!(node.position.x % 40.0, 0.0);
        assert_eq!(node.position.y % 40.0, 0.0);
        assert!(cells.insert(node.cell), "duplicate node at {:?}", node.cell);
    }
}

#[test]
fn same_seed_same_graph() {
    let a = graph(900.0, 600.0, 77);
    let b = graph(900.0, 600.0, 77);
    assert_eq!(a.nodes(), b.nodes());
    assert_eq!(a.edges(), b.edges());
}

#[test]
fn regenerating_same_size_is_stable() {
    let mut g = graph(900.0, 600.0, 5);
    let nodes = g.nodes().to_vec();
    g.resize(Vec2::new(400.0, 300.0));
    g.resize(Vec2::new(900.0, 600.0));
    assert_eq!(g.nodes(), nodes.as_slice());
}

#[test]
fn border_chains_link_top_row() {
    let graph = graph(1200.0, 800.0, 1);
    let top = graph.nodes().iter().map(|n| n.cell.1).min().unwrap();
    let mut row: Vec<usize> = (0..graph.nodes().len())
        .filter(|&i| graph.nodes()[i].cell.1 == top)
        .collect();
    row.sort_by_key(|&i| graph.nodes()[i].cell.0);
    for pair in row.windows(2) {
        let linked = graph.edges().iter().any(|e| {
            (e.from == pair[0] && e.to == pair[1]) || (e.from == pair[1] && e.to == pair[0])
        });
        assert!(linked, "top border gap between {} and {}", pair[0], pair[1]);
    }
}

#[test]
fn ripple_grows_and_is_removed_at_max_radius() {
    let mut graph = graph(800.0, 600.0, 3);
    graph.click(Vec2::new(400.0, 300.0));
    let ripple = graph.ripples()[0].clone();
    assert_eq!(ripple.radius, 0.0);
    assert!((ripple.max_radius - 480.0).abs() < 1e-3);

    let mut last = 0.0;
    let mut now = 0.0;
    loop {
        now += 1.0 / 60.0;
        graph.update(now);
        match graph.ripples().first() {
            Some(r) => {
                assert!(r.radius > last);
                assert!(r.radius < r.max_radius);
                last = r.radius;
            }
            None => break,
        }
    }
    assert!(last + ripple.speed >= ripple.max_radius);
}

#[test]
fn pulse_advances_until_done() {
    let mut graph = graph(800.0, 600.0, 3);
    assert!(graph.spawn_pulse(None));
    let pulse = graph.pulses()[0].clone();
    assert_eq!(pulse.progress, 0.0);
    assert!((0.005..=0.012).contains(&pulse.speed));

    let mut last = 0.0;
    let mut updates = 0;
    while let Some(p) = graph.pulses().first() {
        assert!(p.progress >= last);
        assert!(p.progress < 1.0);
        last = p.progress;
        graph.update(updates as f64);
        updates += 1;
        assert!(updates < 1000);
    }
    assert!(last + pulse.speed >= 1.0);
}

#[test]
fn pulse_from_node_leaves_that_node() {
    let mut graph = graph(800.0, 600.0, 3);
    let edge = graph.edges()[0];
    assert!(graph.spawn_pulse(Some(edge.to)));
    let pulse = &graph.pulses()[0];
    let used = graph.edges()[pulse.edge];
    assert!(used.from == edge.to || used.to == edge.to);
    let start = if pulse.reverse { used.to } else { used.from };
    assert_eq!(start, edge.to);
    assert_eq!(pulse.origin, Some(edge.to));
}

#[test]
fn click_fans_out_to_nearest_nodes_in_order() {
    let mut graph = graph(800.0, 600.0, 12);
    let click = Vec2::new(200.0, 150.0);
    let nearest = graph.click(click);

    assert_eq!(graph.ripples().len(), 1);
    assert_eq!(graph.ripples()[0].center, Vec2::new(200.0, 160.0));

    let mut expected: Vec<(f32, usize)> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, n)| (n.position.distance(click), i))
        .filter(|(d, _)| *d <= 200.0)
        .collect();
    expected.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    expected.truncate(5);
    let expected: Vec<usize> = expected.into_iter().map(|(_, i)| i).collect();
    assert!(!expected.is_empty());
    assert_eq!(nearest.as_slice(), expected.as_slice());

    let dues: Vec<f64> = graph.pending_spawns().iter().map(|s| s.due).collect();
    for (k, due) in dues.iter().enumerate() {
        assert!((due - k as f64 * 0.05).abs() < 1e-9);
    }

    graph.update(0.12);
    assert_eq!(graph.pulses().len(), nearest.len().min(3));
    graph.update(0.25);
    assert!(graph.pending_spawns().is_empty());
    let origins: Vec<usize> = graph.pulses().iter().filter_map(|p| p.origin).collect();
    assert_eq!(origins, expected);
}

#[test]
fn activation_schedules_three_spawns() {
    let mut graph = graph(800.0, 600.0, 6);
    graph.start(10.0);
    let dues: Vec<f64> = graph.pending_spawns().iter().map(|s| s.due).collect();
    assert_eq!(dues.len(), 3);
    for (due, expected) in dues.iter().zip([10.1, 10.4, 10.8]) {
        assert!((due - expected).abs() < 1e-9);
    }
    graph.update(11.0);
    assert_eq!(graph.pulses().len(), 3);
}

#[test]
fn resize_discards_in_flight_state() {
    let mut graph = graph(800.0, 600.0, 6);
    graph.start(0.0);
    graph.click(Vec2::new(300.0, 300.0));
    graph.update(2.0);
    graph.click(Vec2::new(500.0, 100.0));
    assert!(!graph.pulses().is_empty());
    assert!(!graph.ripples().is_empty());

    graph.handle_input(&InputEvent::Resize(Vec2::new(400.0, 300.0)));
    assert!(graph.pulses().is_empty());
    assert!(graph.ripples().is_empty());
    assert!(graph.pending_spawns().is_empty());
    assert!(graph.nodes().iter().all(|n| n.position.x <= 400.0 && n.position.y <= 300.0));
}

#[test]
fn empty_graph_is_inert() {
    let mut graph = NetworkGraph::new(quiet(), 1).unwrap();
    assert!(!graph.spawn_pulse(None));
    assert!(graph.click(Vec2::new(10.0, 10.0)).is_empty());
    graph.update(1.0);
    let mut surface = Recorder::new(0.0, 0.0);
    graph.frame(FrameTime::new(1.0, 1.0 / 60.0), &mut surface);
    assert_eq!(surface.ops, vec![DrawOp::Clear]);
}

#[test]
fn frame_draws_edges_and_pulses() {
    let mut graph = graph(800.0, 600.0, 8);
    graph.spawn_pulse(None);
    let mut surface = Recorder::new(800.0, 600.0);
    graph.frame(FrameTime::new(0.0, 1.0 / 60.0), &mut surface);
    // one stroke per edge, one trail per pulse
    assert_eq!(surface.strokes().count(), graph.edges().len() + graph.pulses().len());
    assert_eq!(surface.circles().count(), graph.pulses().len());
}
