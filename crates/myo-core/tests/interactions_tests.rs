// Host-side tests for the page interaction math.

use glam::Vec2;
use myo_core::interactions::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

#[test]
fn orbs_ease_towards_pointer_and_scale_by_index() {
    let mut orbs = ParallaxOrbs::default();
    orbs.on_pointer(Vec2::new(1000.0, 0.0), Vec2::new(1000.0, 800.0));
    orbs.tick();
    let first = orbs.current();
    assert!((first.x - 0.02).abs() < 1e-6);
    assert!((first.y + 0.02).abs() < 1e-6);

    for _ in 0..2000 {
        orbs.tick();
    }
    assert!((orbs.current() - Vec2::new(1.0, -1.0)).length() < 1e-3);
    let o0 = orbs.offset(0);
    let o2 = orbs.offset(2);
    assert!((o0.x - 15.0).abs() < 0.05);
    assert!((o2.x - 45.0).abs() < 0.1);
}

#[test]
fn orbs_ignore_degenerate_viewport() {
    let mut orbs = ParallaxOrbs::default();
    orbs.on_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO);
    orbs.tick();
    assert_eq!(orbs.current(), Vec2::ZERO);
}

#[test]
fn magnetic_pull_is_a_fifth_of_offset() {
    let offset = magnetic_offset(Vec2::new(150.0, 60.0), Vec2::new(100.0, 40.0), Vec2::new(60.0, 20.0));
    // center is (130, 50)
    assert!((offset - Vec2::new(4.0, 2.0)).length() < 1e-5);
}

#[test]
fn tilt_follows_pointer() {
    let t = tilt(Vec2::new(150.0, 50.0), Vec2::ZERO, Vec2::new(200.0, 200.0));
    // dx = 0.25, dy = -0.25
    assert!((t.rotate_x + 3.75).abs() < 1e-5);
    assert!((t.rotate_y + 3.75).abs() < 1e-5);
    assert_eq!(t.scale, 1.05);
    assert_eq!(
        t.css(),
        "perspective(1000px) rotateX(-3.75deg) rotateY(-3.75deg) scale(1.05)"
    );

    let flat = tilt(Vec2::new(5.0, 5.0), Vec2::ZERO, Vec2::ZERO);
    assert_eq!((flat.rotate_x, flat.rotate_y), (0.0, 0.0));
}

#[test]
fn scroll_progress_is_guarded_and_clamped() {
    assert_eq!(scroll_progress(250.0, 1500.0, 500.0), 25.0);
    assert_eq!(scroll_progress(100.0, 500.0, 500.0), 0.0);
    assert_eq!(scroll_progress(100.0, 300.0, 500.0), 0.0);
    assert_eq!(scroll_progress(5000.0, 1500.0, 500.0), 100.0);
    assert_eq!(scroll_progress(-20.0, 1500.0, 500.0), 0.0);
}

#[test]
fn nav_condenses_past_threshold() {
    assert!(!nav_condensed(0.0));
    assert!(!nav_condensed(100.0));
    assert!(nav_condensed(100.5));
}

#[test]
fn anchor_target_clears_nav() {
    assert_eq!(anchor_scroll_target(600.0, 200.0, 80.0), 700.0);
    assert_eq!(anchor_scroll_target(10.0, 0.0, 80.0), 0.0);
}

#[test]
fn streaks_stay_in_their_bands() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let streaks = dry_brush_streaks(&mut rng);
        assert!(streaks.len() <= 25);
        for s in &streaks {
            assert!((s.start.distance(STREAK_CENTER) - STREAK_RADIUS).abs() < 1e-3);
            let length = s.start.distance(s.end);
            assert!((8.0 - 1e-3..=28.0 + 1e-3).contains(&length));
            assert!((0.6..=0.95).contains(&s.opacity));
            assert!((0.8..=4.0).contains(&s.width));
            let end_section = s.angle > -PI / 4.0 && s.angle < PI / 2.0;
            if !end_section {
                assert!(s.width <= 2.3);
            }
            let normalized = (s.angle + PI) / (PI * 2.0);
            let base = 0.08 + normalized * 0.35;
            assert!((s.delay - base).abs() <= 0.025 + 1e-5);
        }
    }
}

#[test]
fn scattered_streaks_skip_wet_side() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        for s in dry_brush_streaks(&mut rng) {
            // only the scattered branch can produce angles past 0.6π
            assert!(!(s.angle > PI * 0.6 && s.angle < PI * 1.4));
        }
    }
}

#[test]
fn streak_path_is_svg_quadratic() {
    let mut rng = StdRng::seed_from_u64(1);
    let streak = dry_brush_streaks(&mut rng)[0];
    let d = streak.path_data();
    assert!(d.starts_with("M "));
    assert!(d.contains(" Q "));
    assert_eq!(d.split_whitespace().count(), 8);
}

#[test]
fn submit_cycles_through_phases() {
    let mut phase = SubmitPhase::Idle;
    assert_eq!(phase.label(), None);
    phase = phase.next();
    assert_eq!(phase.label(), Some("Sending..."));
    assert_eq!(phase.hold_ms(), Some(1500));
    phase = phase.next();
    assert_eq!(phase.label(), Some("Message Sent!"));
    assert_eq!(phase.hold_ms(), Some(3000));
    assert_eq!(phase.next(), SubmitPhase::Idle);
}
