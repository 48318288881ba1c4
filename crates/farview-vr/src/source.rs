use crate::types::{ControllerSample, HapticPulse, HeadSample, Side};
use crate::VrResult;

/// Head-pose side of the device driver, polled from the render thread.
pub trait HeadSource {
    /// Predicted head pose for the upcoming frame, with the driver's
    /// timestamps passed through untouched.
    fn head_sample(&mut self) -> VrResult<HeadSample>;
}

/// Controller side of the device driver, owned by the synchronization loop.
pub trait ControllerSource: Send {
    /// Feed the latest head pose to the driver's arm model before sampling.
    fn refresh(&mut self, head: &HeadSample);

    fn sample(&mut self, side: Side) -> VrResult<ControllerSample>;
}

/// Relays engine haptic feedback back to a controller.
pub trait HapticSink {
    fn vibrate(&mut self, pulse: &HapticPulse);
}
