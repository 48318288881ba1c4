//! In-process stand-in for the native streaming engine: echoes the last
//! submitted head transform back as the rendered pose, so the full
//! correlation path runs without a remote server.

use std::sync::Mutex;

use tracing::debug;

use farview_vr::{
    ButtonId, ButtonPhase, Eye, HapticPulse, JoystickAxes, Side, StreamEngine, Transform, VrResult,
};

#[derive(Default)]
struct LoopbackState {
    head: Option<Transform>,
    latched: bool,
    haptic: Option<HapticPulse>,
}

#[derive(Default)]
pub struct LoopbackEngine {
    state: Mutex<LoopbackState>,
}

impl LoopbackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a haptic request as a remote renderer would.
    pub fn inject_haptic(&self, pulse: HapticPulse) {
        self.state.lock().unwrap().haptic = Some(pulse);
    }
}

impl StreamEngine for LoopbackEngine {
    fn submit_head_transform(&self, transform: &Transform) -> VrResult<()> {
        self.state.lock().unwrap().head = Some(*transform);
        Ok(())
    }

    fn submit_controller_transform(&self, side: Side, transform: &Transform) -> VrResult<()> {
        debug!(?side, translation = ?transform.translation(), "controller transform");
        Ok(())
    }

    fn submit_button_event(&self, side: Side, button: ButtonId, phase: ButtonPhase) -> VrResult<()> {
        debug!(?side, ?button, ?phase, "button event");
        Ok(())
    }

    fn submit_joystick_axes(&self, axes: JoystickAxes) -> VrResult<()> {
        debug!(?axes, "joystick axes");
        Ok(())
    }

    fn latch_frame(&self) -> VrResult<()> {
        self.state.lock().unwrap().latched = true;
        Ok(())
    }

    fn release_frame(&self) {
        self.state.lock().unwrap().latched = false;
    }

    fn echoed_head_transform(&self) -> Option<Transform> {
        let state = self.state.lock().unwrap();
        if state.latched {
            state.head
        } else {
            None
        }
    }

    fn eye_texture(&self, eye: Eye) -> Option<u32> {
        let state = self.state.lock().unwrap();
        state.latched.then_some(match eye {
            Eye::Left => 1,
            Eye::Right => 2,
        })
    }

    fn take_haptic_pulse(&self) -> Option<HapticPulse> {
        self.state.lock().unwrap().haptic.take()
    }
}
