// Host-side tests for visibility-gated frame scheduling, driven by a fake
// frame host instead of requestAnimationFrame.

use glam::Vec2;
use myo_core::{
    Animation, Bound, Effect, EffectId, FrameHandle, FrameHost, FrameTime, GridConfig,
    GridDistortion, LifecycleController, Recorder,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct FakeHost {
    next: i32,
    pending: Vec<(EffectId, FrameHandle)>,
    cancelled: Vec<FrameHandle>,
}

impl FrameHost for FakeHost {
    fn request_frame(&mut self, id: EffectId) -> Option<FrameHandle> {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push((id, handle));
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|(_, h)| *h != handle);
        self.cancelled.push(handle);
    }
}

impl FakeHost {
    fn pending_for(&self, id: EffectId) -> usize {
        self.pending.iter().filter(|(i, _)| *i == id).count()
    }

    /// Fires every pending callback once, like one browser frame.
    fn fire(controller: &mut LifecycleController<FakeHost>, now: f64) {
        let due: Vec<_> = controller.host_mut().pending.drain(..).collect();
        for (id, _) in due {
            controller.on_frame(id, now);
        }
    }
}

#[derive(Default)]
struct Log {
    starts: usize,
    stops: usize,
    frames: Vec<FrameTime>,
}

struct Probe(Rc<RefCell<Log>>);

impl Animation for Probe {
    fn start(&mut self, _now: f64) {
        self.0.borrow_mut().starts += 1;
    }

    fn stop(&mut self) {
        self.0.borrow_mut().stops += 1;
    }

    fn frame(&mut self, time: FrameTime) {
        self.0.borrow_mut().frames.push(time);
    }
}

fn probe() -> (LifecycleController<FakeHost>, EffectId, Rc<RefCell<Log>>) {
    let log = Rc::new(RefCell::new(Log::default()));
    let mut controller = LifecycleController::new(FakeHost::default());
    let id = controller.register("probe", Box::new(Probe(log.clone())));
    (controller, id, log)
}

#[test]
fn registered_animation_is_idle() {
    let (controller, id, log) = probe();
    assert!(!controller.is_running(id));
    assert_eq!(controller.pending_frame(id), None);
    assert_eq!(log.borrow().starts, 0);
}

#[test]
fn visible_schedules_exactly_one_frame() {
    let (mut controller, id, log) = probe();
    controller.set_visible(id, true, 0.0);
    controller.set_visible(id, true, 0.1);
    controller.start(id, 0.2);
    assert!(controller.is_running(id));
    assert_eq!(controller.host().pending_for(id), 1);
    assert_eq!(log.borrow().starts, 1);
}

#[test]
fn each_frame_requests_the_next() {
    let (mut controller, id, log) = probe();
    controller.set_visible(id, true, 0.0);
    for i in 1..=5 {
        FakeHost::fire(&mut controller, i as f64 / 60.0);
        assert_eq!(controller.host().pending_for(id), 1);
    }
    assert_eq!(log.borrow().frames.len(), 5);
}

#[test]
fn hidden_cancels_pending_frame() {
    let (mut controller, id, log) = probe();
    controller.set_visible(id, true, 0.0);
    let handle = controller.pending_frame(id).unwrap();
    controller.set_visible(id, false, 0.5);

    assert!(!controller.is_running(id));
    assert_eq!(controller.pending_frame(id), None);
    assert_eq!(controller.host().pending_for(id), 0);
    assert_eq!(controller.host().cancelled, vec![handle]);
    assert_eq!(log.borrow().stops, 1);

    // a second hide is a no-op
    controller.set_visible(id, false, 0.6);
    assert_eq!(log.borrow().stops, 1);
}

#[test]
fn stale_callback_after_stop_does_nothing() {
    let (mut controller, id, log) = probe();
    controller.set_visible(id, true, 0.0);
    controller.stop(id);
    controller.on_frame(id, 1.0);
    assert!(log.borrow().frames.is_empty());
    assert_eq!(controller.host().pending_for(id), 0);
}

#[test]
fn dt_is_first_frame_then_clamped() {
    let (mut controller, id, log) = probe();
    controller.set_visible(id, true, 0.0);
    FakeHost::fire(&mut controller, 1.0);
    FakeHost::fire(&mut controller, 1.02);
    FakeHost::fire(&mut controller, 5.0);
    let log = log.borrow();
    let frames = &log.frames;
    assert!((frames[0].dt - 1.0 / 60.0).abs() < 1e-6);
    assert!((frames[1].dt - 0.02).abs() < 1e-4);
    assert_eq!(frames[2].dt, 0.1);
    assert_eq!(frames[2].now, 5.0);
}

#[test]
fn restart_resets_frame_clock() {
    let (mut controller, id, log) = probe();
    controller.set_visible(id, true, 0.0);
    FakeHost::fire(&mut controller, 1.0);
    controller.set_visible(id, false, 2.0);
    controller.set_visible(id, true, 30.0);
    FakeHost::fire(&mut controller, 30.0);
    let log = log.borrow();
    assert!((log.frames[1].dt - 1.0 / 60.0).abs() < 1e-6);
    assert_eq!(log.starts, 2);
}

#[test]
fn stop_all_leaves_nothing_scheduled() {
    let mut controller = LifecycleController::new(FakeHost::default());
    let log = Rc::new(RefCell::new(Log::default()));
    let ids: Vec<_> = (0..3)
        .map(|_| controller.register("probe", Box::new(Probe(log.clone()))))
        .collect();
    for &id in &ids {
        controller.set_visible(id, true, 0.0);
    }
    assert_eq!(controller.host().pending.len(), 3);
    controller.stop_all();
    assert!(controller.host().pending.is_empty());
    assert!(ids.iter().all(|&id| !controller.is_running(id)));
}

#[test]
fn unknown_id_is_ignored() {
    let (mut controller, _, _) = probe();
    controller.set_visible(99, true, 0.0);
    controller.on_frame(99, 0.0);
    assert!(!controller.is_running(99));
    assert!(controller.host().pending.is_empty());
}

#[test]
fn bound_effect_runs_under_controller() {
    let mut grid = GridDistortion::new(GridConfig::default()).unwrap();
    grid.resize(Vec2::new(80.0, 80.0));
    let grid = Rc::new(RefCell::new(grid));
    let bound = Bound::new(grid.clone(), Recorder::new(80.0, 80.0));

    let mut controller = LifecycleController::new(FakeHost::default());
    let id = controller.register("grid", Box::new(bound));
    controller.set_visible(id, true, 0.0);
    FakeHost::fire(&mut controller, 0.016);
    assert!(controller.is_running(id));
    assert_eq!(grid.borrow().name(), "grid");
}
