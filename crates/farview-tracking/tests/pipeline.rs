//! End-to-end pipeline: a real synchronization loop thread and a frame
//! correlator sharing one engine and one head slot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use farview_tracking::{FrameCorrelator, HeadSlot, SyncLoop};
use farview_vr::{
    ButtonId, ButtonPhase, ControllerSample, ControllerSource, Eye, HapticPulse, HapticSink,
    HeadSample, JoystickAxes, Pose, RawButtons, Side, StreamEngine, Transform, VrResult,
};

/// Engine double shared by both threads: records input pushes and echoes
/// the last submitted head transform while latched.
#[derive(Default)]
struct TestEngine {
    head: Mutex<Option<Transform>>,
    latched: Mutex<bool>,
    controller_pushes: AtomicUsize,
    button_events: Mutex<Vec<(Side, ButtonId, ButtonPhase)>>,
    joystick_pushes: AtomicUsize,
}

impl StreamEngine for TestEngine {
    fn submit_head_transform(&self, transform: &Transform) -> VrResult<()> {
        *self.head.lock().unwrap() = Some(*transform);
        Ok(())
    }

    fn submit_controller_transform(&self, _side: Side, _transform: &Transform) -> VrResult<()> {
        self.controller_pushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn submit_button_event(&self, side: Side, button: ButtonId, phase: ButtonPhase) -> VrResult<()> {
        self.button_events.lock().unwrap().push((side, button, phase));
        Ok(())
    }

    fn submit_joystick_axes(&self, _axes: JoystickAxes) -> VrResult<()> {
        self.joystick_pushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn latch_frame(&self) -> VrResult<()> {
        *self.latched.lock().unwrap() = true;
        Ok(())
    }

    fn release_frame(&self) {
        *self.latched.lock().unwrap() = false;
    }

    fn echoed_head_transform(&self) -> Option<Transform> {
        if *self.latched.lock().unwrap() {
            *self.head.lock().unwrap()
        } else {
            None
        }
    }

    fn eye_texture(&self, _eye: Eye) -> Option<u32> {
        self.latched.lock().unwrap().then_some(7)
    }

    fn take_haptic_pulse(&self) -> Option<HapticPulse> {
        None
    }
}

/// Holds the trigger saturated from a given tick onward.
struct TriggerSource {
    ticks: usize,
    press_at: usize,
}

impl ControllerSource for TriggerSource {
    fn refresh(&mut self, _head: &HeadSample) {
        self.ticks += 1;
    }

    fn sample(&mut self, side: Side) -> VrResult<ControllerSample> {
        let trigger = if side == Side::Right && self.ticks > self.press_at {
            255
        } else {
            0
        };
        Ok(ControllerSample {
            trigger,
            buttons: RawButtons::empty(),
            ..ControllerSample::default()
        })
    }
}

struct NoHaptics;

impl HapticSink for NoHaptics {
    fn vibrate(&mut self, _pulse: &HapticPulse) {}
}

#[test]
fn loop_and_correlator_share_one_engine() {
    let engine = Arc::new(TestEngine::default());
    let head = Arc::new(HeadSlot::new());
    let source = Box::new(TriggerSource {
        ticks: 0,
        press_at: 5,
    });

    let mut sync = SyncLoop::spawn_with_interval(
        engine.clone(),
        source,
        head.clone(),
        Duration::from_millis(1),
    )
    .expect("sync loop must start");

    let mut correlator = FrameCorrelator::new(head.clone());
    let mut haptics = NoHaptics;

    let half = std::f32::consts::FRAC_1_SQRT_2;
    let sample = HeadSample {
        pose: Pose {
            orientation: [half, 0.0, 0.0, half],
            position: [0.0, 1.6, 0.0],
        },
        times_ns: [1, 2, 3],
    };

    // A few display frames while the loop runs underneath.
    let mut last_display = HeadSample::default();
    for _ in 0..10 {
        correlator.begin_frame(engine.as_ref(), &mut haptics, sample);
        assert_eq!(correlator.eye_texture(engine.as_ref(), Eye::Left), Some(7));
        last_display = correlator.end_frame(engine.as_ref());
        thread::sleep(Duration::from_millis(5));
    }
    sync.stop();

    // The loop forwarded controller state continuously.
    assert!(engine.controller_pushes.load(Ordering::Relaxed) >= 2);
    assert!(engine.joystick_pushes.load(Ordering::Relaxed) >= 1);

    // The scripted trigger press produced exactly one edge event.
    let events = engine.button_events.lock().unwrap();
    assert_eq!(
        *events,
        vec![(Side::Right, ButtonId::Trigger, ButtonPhase::Pressed)]
    );
    drop(events);

    // The loop saw the head sample the render side published.
    assert_eq!(head.snapshot(), sample);

    // The echoed pose round-tripped back within tolerance.
    let dot: f32 = last_display
        .pose
        .orientation
        .iter()
        .zip(&sample.pose.orientation)
        .map(|(a, b)| a * b)
        .sum();
    assert!(dot.abs() > 1.0 - 1e-4, "display pose diverged: {last_display:?}");
    assert_eq!(last_display.times_ns, [0; 3]);
}
