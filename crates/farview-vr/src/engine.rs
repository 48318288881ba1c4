use crate::types::{ButtonId, ButtonPhase, Eye, HapticPulse, JoystickAxes, Side, Transform};
use crate::VrResult;

/// Boundary to the native streaming/rendering engine.
///
/// The engine is internally synchronized; both the synchronization loop and
/// the render thread call into it concurrently. All pushes are
/// last-value-wins with no queuing, so callers must not assume ordering
/// beyond "most recent write wins". A failed call is a soft failure: the
/// next scheduled push is the retry.
pub trait StreamEngine: Send + Sync {
    fn submit_head_transform(&self, transform: &Transform) -> VrResult<()>;

    fn submit_controller_transform(&self, side: Side, transform: &Transform) -> VrResult<()>;

    /// One discrete event per physical transition, never a level signal.
    fn submit_button_event(&self, side: Side, button: ButtonId, phase: ButtonPhase) -> VrResult<()>;

    fn submit_joystick_axes(&self, axes: JoystickAxes) -> VrResult<()>;

    /// Begin the scoped bracket around one rendered frame. Between
    /// `latch_frame` and `release_frame` the engine guarantees a stable
    /// decoded frame and its echoed pose.
    fn latch_frame(&self) -> VrResult<()>;

    fn release_frame(&self);

    /// The pose the remote renderer actually rendered the latched frame
    /// against. Queried once per frame inside the latch scope; `None` when
    /// no frame is available.
    fn echoed_head_transform(&self) -> Option<Transform>;

    /// Decoded texture for one eye, valid inside the latch scope.
    fn eye_texture(&self, eye: Eye) -> Option<u32>;

    /// Drain the engine's pending haptic request, if any. At most one is
    /// buffered; reading clears it.
    fn take_haptic_pulse(&self) -> Option<HapticPulse>;
}
