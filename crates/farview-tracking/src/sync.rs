//! Fixed-cadence forwarding of controller state to the streaming engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use farview_vr::{
    set_session_status, ControllerSample, ControllerSource, Side, StreamEngine, VrError, VrResult,
};

use crate::controller::{self, ControllerTracker};
use crate::math;
use crate::sampler::{self, HeadSlot};

/// Sampling period of the synchronization loop.
pub const TICK_INTERVAL: Duration = Duration::from_millis(5);

/// Background loop that samples both controllers every tick and pushes
/// transforms, edge-triggered button events and joystick axes across the
/// engine boundary.
///
/// The loop never blocks on the boundary: a failed call drops that sample
/// and the next tick is the retry. Shutdown is cooperative via [`stop`],
/// which raises the flag and joins the thread; dropping the handle does the
/// same.
///
/// [`stop`]: SyncLoop::stop
pub struct SyncLoop {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SyncLoop {
    /// Spawn the loop at the standard [`TICK_INTERVAL`].
    ///
    /// A spawn failure is fatal to the session (no tracking is possible)
    /// and is returned to the caller.
    pub fn spawn(
        engine: Arc<dyn StreamEngine>,
        source: Box<dyn ControllerSource>,
        head: Arc<HeadSlot>,
    ) -> VrResult<Self> {
        Self::spawn_with_interval(engine, source, head, TICK_INTERVAL)
    }

    pub fn spawn_with_interval(
        engine: Arc<dyn StreamEngine>,
        mut source: Box<dyn ControllerSource>,
        head: Arc<HeadSlot>,
        interval: Duration,
    ) -> VrResult<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let loop_stop = stop.clone();
        let handle = thread::Builder::new()
            .name("farview-sync".to_string())
            .spawn(move || {
                set_session_status("tracking: running");
                let mut state = LoopState::new();
                while !loop_stop.load(Ordering::Relaxed) {
                    state.tick(engine.as_ref(), source.as_mut(), &head);
                    thread::sleep(interval);
                }
                set_session_status("tracking: stopped");
            })
            .map_err(|e| VrError::Tracking(format!("sync thread spawn: {e}")))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Raise the stop flag and join the loop thread.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SyncLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

struct LoopState {
    tracker: ControllerTracker,
    /// Last good sample per side, reused when a driver read misses.
    last: [ControllerSample; 2],
}

impl LoopState {
    fn new() -> Self {
        Self {
            tracker: ControllerTracker::new(),
            last: [ControllerSample::default(); 2],
        }
    }

    fn tick(
        &mut self,
        engine: &dyn StreamEngine,
        source: &mut dyn ControllerSource,
        head: &HeadSlot,
    ) {
        // 1. Feed the head pose to the arm model, then refresh both sides.
        let head_sample = head.snapshot();
        source.refresh(&head_sample);
        for side in Side::BOTH {
            match source.sample(side) {
                Ok(sample) => self.last[side.index()] = sample,
                Err(err) => log::debug!("{side:?} controller sample unavailable: {err}"),
            }
        }

        // 2-3. Convert to engine transforms and push them.
        for side in Side::BOTH {
            let pose = sampler::controller_pose(&self.last[side.index()]);
            let transform = math::engine_transform(&pose);
            if let Err(err) = engine.submit_controller_transform(side, &transform) {
                log::debug!("{side:?} controller transform dropped: {err}");
            }
        }

        // 4. Edge-triggered button dispatch, one event per transition.
        for side in Side::BOTH {
            let sample = self.last[side.index()];
            for (button, phase) in self.tracker.transitions(side, &sample) {
                if let Err(err) = engine.submit_button_event(side, button, phase) {
                    log::debug!("{side:?} {button:?} {phase:?} dropped: {err}");
                }
            }
        }

        // 5. Joystick axes.
        let axes = controller::joystick_axes(&self.last[0], &self.last[1]);
        if let Err(err) = engine.submit_joystick_axes(axes) {
            log::debug!("joystick axes dropped: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use farview_vr::{
        ButtonId, ButtonPhase, Eye, HapticPulse, HeadSample, JoystickAxes, RawButtons, Transform,
    };

    #[derive(Default)]
    struct RecordingEngine {
        controller_transforms: Mutex<Vec<(Side, Transform)>>,
        button_events: Mutex<Vec<(Side, ButtonId, ButtonPhase)>>,
        joystick: Mutex<Vec<JoystickAxes>>,
        fail_all: bool,
    }

    impl StreamEngine for RecordingEngine {
        fn submit_head_transform(&self, _transform: &Transform) -> VrResult<()> {
            Ok(())
        }

        fn submit_controller_transform(&self, side: Side, transform: &Transform) -> VrResult<()> {
            if self.fail_all {
                return Err(VrError::Unavailable("not connected".into()));
            }
            self.controller_transforms
                .lock()
                .unwrap()
                .push((side, *transform));
            Ok(())
        }

        fn submit_button_event(
            &self,
            side: Side,
            button: ButtonId,
            phase: ButtonPhase,
        ) -> VrResult<()> {
            if self.fail_all {
                return Err(VrError::Unavailable("not connected".into()));
            }
            self.button_events.lock().unwrap().push((side, button, phase));
            Ok(())
        }

        fn submit_joystick_axes(&self, axes: JoystickAxes) -> VrResult<()> {
            if self.fail_all {
                return Err(VrError::Unavailable("not connected".into()));
            }
            self.joystick.lock().unwrap().push(axes);
            Ok(())
        }

        fn latch_frame(&self) -> VrResult<()> {
            Ok(())
        }

        fn release_frame(&self) {}

        fn echoed_head_transform(&self) -> Option<Transform> {
            None
        }

        fn eye_texture(&self, _eye: Eye) -> Option<u32> {
            None
        }

        fn take_haptic_pulse(&self) -> Option<HapticPulse> {
            None
        }
    }

    /// Plays a fixed script of button words, one entry per tick, holding
    /// the last entry forever.
    struct ScriptedSource {
        script: Vec<RawButtons>,
        ticks: usize,
        refreshed_with: Vec<HeadSample>,
    }

    impl ScriptedSource {
        fn new(script: Vec<RawButtons>) -> Self {
            Self {
                script,
                ticks: 0,
                refreshed_with: Vec::new(),
            }
        }
    }

    impl ControllerSource for ScriptedSource {
        fn refresh(&mut self, head: &HeadSample) {
            self.refreshed_with.push(*head);
            self.ticks += 1;
        }

        fn sample(&mut self, _side: Side) -> VrResult<ControllerSample> {
            let step = self.ticks.saturating_sub(1).min(self.script.len() - 1);
            Ok(ControllerSample {
                buttons: self.script[step],
                ..ControllerSample::default()
            })
        }
    }

    fn run_ticks(engine: &RecordingEngine, source: &mut ScriptedSource, ticks: usize) {
        let head = HeadSlot::new();
        let mut state = LoopState::new();
        for _ in 0..ticks {
            state.tick(engine, source, &head);
        }
    }

    #[test]
    fn tick_pushes_transforms_and_axes_every_time() {
        let engine = RecordingEngine::default();
        let mut source = ScriptedSource::new(vec![RawButtons::empty()]);
        run_ticks(&engine, &mut source, 3);

        let transforms = engine.controller_transforms.lock().unwrap();
        assert_eq!(transforms.len(), 6); // both sides, every tick
        assert_eq!(engine.joystick.lock().unwrap().len(), 3);
        // No button changed, so nothing was dispatched.
        assert!(engine.button_events.lock().unwrap().is_empty());
    }

    #[test]
    fn press_and_release_dispatch_once_each() {
        let engine = RecordingEngine::default();
        let mut source = ScriptedSource::new(vec![
            RawButtons::empty(),
            RawButtons::empty(),
            RawButtons::APP,
            RawButtons::APP,
            RawButtons::empty(),
        ]);
        run_ticks(&engine, &mut source, 5);

        let events = engine.button_events.lock().unwrap();
        let left: Vec<_> = events
            .iter()
            .filter(|(side, ..)| *side == Side::Left)
            .collect();
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].1, ButtonId::App);
        assert_eq!(left[0].2, ButtonPhase::Pressed);
        assert_eq!(left[1].2, ButtonPhase::Released);
    }

    #[test]
    fn unavailable_engine_does_not_kill_the_loop() {
        let engine = RecordingEngine {
            fail_all: true,
            ..RecordingEngine::default()
        };
        let mut source = ScriptedSource::new(vec![RawButtons::empty(), RawButtons::APP]);
        run_ticks(&engine, &mut source, 4);
        // Every push failed, but the source kept being polled.
        assert_eq!(source.ticks, 4);
        assert!(engine.controller_transforms.lock().unwrap().is_empty());
    }

    #[test]
    fn loop_thread_stops_on_request() {
        let engine = Arc::new(RecordingEngine::default());
        let source = Box::new(ScriptedSource::new(vec![RawButtons::empty()]));
        let head = Arc::new(HeadSlot::new());

        let mut sync = SyncLoop::spawn_with_interval(
            engine.clone(),
            source,
            head,
            Duration::from_millis(1),
        )
        .expect("spawn");
        thread::sleep(Duration::from_millis(30));
        sync.stop();

        let count = engine.controller_transforms.lock().unwrap().len();
        assert!(count >= 2, "loop never ran ({count} submissions)");
        thread::sleep(Duration::from_millis(10));
        // No further submissions after join returned.
        assert_eq!(engine.controller_transforms.lock().unwrap().len(), count);
    }

    #[test]
    fn refresh_sees_published_head_sample() {
        let engine = RecordingEngine::default();
        let head = HeadSlot::new();
        let published = HeadSample {
            times_ns: [7, 8, 9],
            ..HeadSample::default()
        };
        head.publish(published);

        let mut source = ScriptedSource::new(vec![RawButtons::empty()]);
        let mut state = LoopState::new();
        state.tick(&engine, &mut source, &head);
        assert_eq!(source.refreshed_with, vec![published]);
    }
}
