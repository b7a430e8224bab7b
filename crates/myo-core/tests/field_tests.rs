// Host-side tests for the shared field helpers: noise, pointer smoothing,
// radial falloff, easing and the grid distortion built on them.

use glam::Vec2;
use myo_core::falloff::{influence, radial_push};
use myo_core::surface::DrawOp;
use myo_core::{Ease, Effect, FrameTime, GridConfig, GridDistortion, InputEvent, NoiseField};
use myo_core::{PointerTracker, Recorder};

#[test]
fn noise_is_deterministic_and_bounded() {
    let noise = NoiseField::default();
    for i in 0..200 {
        let x = i as f32 * 13.7 - 900.0;
        let y = i as f32 * -7.3 + 40.0;
        let t = i as f32 * 0.11;
        let a = noise.sample(x, y, t);
        let b = noise.sample(x, y, t);
        assert_eq!(a, b);
        assert!((-1.0..=1.0).contains(&a), "sample {} out of range", a);
    }
}

#[test]
fn noise_is_continuous() {
    let noise = NoiseField::new(0.01, 1.0);
    let a = noise.sample(100.0, 100.0, 1.0);
    let b = noise.sample(100.01, 100.0, 1.0);
    assert!((a - b).abs() < 1e-3);
}

#[test]
fn pointer_starts_offscreen_and_converges_without_overshoot() {
    let mut pointer = PointerTracker::new(0.1);
    assert_eq!(pointer.smoothed(), PointerTracker::OFFSCREEN);
    assert!(!pointer.is_engaged());

    pointer.on_move(200.0, 100.0);
    assert!(pointer.is_engaged());
    let mut last = pointer.smoothed().distance(pointer.raw());
    for _ in 0..300 {
        pointer.tick();
        let gap = pointer.smoothed().distance(pointer.raw());
        assert!(gap <= last, "gap grew from {} to {}", last, gap);
        assert!(pointer.smoothed().x <= 200.0);
        last = gap;
    }
    assert!(last < 0.01);
}

#[test]
fn pointer_leave_returns_to_sentinel() {
    let mut pointer = PointerTracker::new(1.0);
    pointer.on_move(10.0, 10.0);
    pointer.tick();
    pointer.on_leave();
    assert_eq!(pointer.raw(), PointerTracker::OFFSCREEN);
    pointer.tick();
    assert!(!pointer.is_engaged());
}

#[test]
fn pointer_smoothing_is_clamped() {
    assert_eq!(PointerTracker::new(5.0).smoothing(), 1.0);
    assert!(PointerTracker::new(0.0).smoothing() > 0.0);
}

#[test]
fn falloff_is_linear_inside_radius() {
    assert_eq!(influence(0.0, 100.0), 1.0);
    assert!((influence(25.0, 100.0) - 0.75).abs() < 1e-6);
    assert_eq!(influence(100.0, 100.0), 0.0);
    assert_eq!(influence(150.0, 100.0), 0.0);
    assert_eq!(influence(10.0, 0.0), 0.0);
}

#[test]
fn radial_push_guards_zero_distance() {
    let p = Vec2::new(50.0, 50.0);
    assert_eq!(radial_push(p, p, 150.0, 30.0), Vec2::ZERO);
}

#[test]
fn radial_push_points_away_and_fades() {
    let source = Vec2::new(0.0, 0.0);
    let near = radial_push(Vec2::new(10.0, 0.0), source, 100.0, 30.0);
    let far = radial_push(Vec2::new(90.0, 0.0), source, 100.0, 30.0);
    assert!(near.x > far.x && far.x > 0.0);
    assert_eq!(near.y, 0.0);
    assert!((near.x - 27.0).abs() < 1e-4);

    let pull = radial_push(Vec2::new(10.0, 0.0), source, 100.0, -30.0);
    assert!(pull.x < 0.0);
}

#[test]
fn ease_curves_hit_endpoints() {
    for ease in [Ease::Linear, Ease::OutCubic, Ease::InOutCubic] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(ease.apply(-3.0), 0.0);
    }
    assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    assert!(Ease::OutCubic.apply(0.25) > 0.25);
}

fn grid(w: f32, h: f32) -> GridDistortion {
    let mut grid = GridDistortion::new(GridConfig::default()).unwrap();
    grid.resize(Vec2::new(w, h));
    grid
}

#[test]
fn grid_is_undistorted_without_pointer() {
    let grid = grid(400.0, 300.0);
    let line = grid.vertical_line(80.0);
    assert!(line.iter().all(|p| p.x == 80.0));
    assert_eq!(line.first().map(|p| p.y), Some(0.0));
    assert_eq!(line.last().map(|p| p.y), Some(300.0));
}

#[test]
fn grid_displacement_near_pointer() {
    let mut grid = grid(400.0, 300.0);
    grid.pointer_mut().on_move(200.0, 150.0);
    for _ in 0..200 {
        grid.pointer_mut().tick();
    }
    let pointer = grid.pointer().smoothed();

    // exactly under the pointer: guarded to zero
    assert_eq!(grid.displacement(pointer), Vec2::ZERO);

    let nearby = grid.displacement(pointer + Vec2::new(30.0, 0.0));
    assert!(nearby.x > 0.0, "line should bend away from the pointer");

    let outside = grid.displacement(pointer + Vec2::new(200.0, 0.0));
    assert_eq!(outside, Vec2::ZERO);
}

#[test]
fn grid_frame_strokes_every_line() {
    let mut grid = grid(400.0, 300.0);
    let mut surface = Recorder::new(400.0, 300.0);
    grid.frame(FrameTime::new(0.0, 1.0 / 60.0), &mut surface);

    assert_eq!(surface.ops.first(), Some(&DrawOp::Clear));
    // 0..=400 step 40 and 0..=300 step 40
    assert_eq!(surface.strokes().count(), 11 + 8);
    // no dots while the pointer is away
    assert_eq!(surface.circles().count(), 0);
}

#[test]
fn grid_draws_dots_once_pointer_is_engaged() {
    let mut grid = grid(400.0, 300.0);
    grid.handle_input(&InputEvent::PointerMove(Vec2::new(200.0, 160.0)));
    let mut surface = Recorder::new(400.0, 300.0);
    for i in 0..120 {
        surface.reset();
        grid.frame(FrameTime::new(i as f64 / 60.0, 1.0 / 60.0), &mut surface);
    }
    let dots: Vec<_> = surface.circles().collect();
    assert!(!dots.is_empty());
    assert!(dots.iter().all(|(_, r)| *r > 0.0 && *r <= 2.5));
}
