//! Synthetic device driver for headless runs: a slowly yawing head and
//! controllers that pulse the trigger periodically.

use tracing::info;

use farview_vr::{
    ControllerSample, ControllerSource, HapticPulse, HapticSink, HeadSample, HeadSource, Pose,
    RawButtons, Side, VrResult,
};

/// Head source yawing at a fixed rate, one step per frame.
pub struct SyntheticHead {
    frame: u64,
    /// Yaw advance per frame, radians.
    step: f32,
}

impl SyntheticHead {
    pub fn new(step: f32) -> Self {
        Self { frame: 0, step }
    }
}

impl HeadSource for SyntheticHead {
    fn head_sample(&mut self) -> VrResult<HeadSample> {
        self.frame += 1;
        let half_yaw = self.frame as f32 * self.step / 2.0;
        Ok(HeadSample {
            pose: Pose {
                // Rotation about +Y only.
                orientation: [0.0, half_yaw.sin(), 0.0, half_yaw.cos()],
                position: [0.0, 1.6, 0.0],
            },
            times_ns: [self.frame as i64, 0, 0],
        })
    }
}

impl HapticSink for SyntheticHead {
    fn vibrate(&mut self, pulse: &HapticPulse) {
        info!(
            side = ?pulse.side,
            amplitude = pulse.amplitude,
            duration_ms = pulse.duration_ms,
            "haptic pulse"
        );
    }
}

/// Controller source squeezing the right trigger every `period` ticks.
pub struct SyntheticControllers {
    ticks: u64,
    period: u64,
}

impl SyntheticControllers {
    pub fn new(period: u64) -> Self {
        Self { ticks: 0, period }
    }
}

impl ControllerSource for SyntheticControllers {
    fn refresh(&mut self, _head: &HeadSample) {
        self.ticks += 1;
    }

    fn sample(&mut self, side: Side) -> VrResult<ControllerSample> {
        let squeezing = side == Side::Right && (self.ticks / self.period) % 2 == 1;
        let x = match side {
            Side::Left => -0.2,
            Side::Right => 0.2,
        };
        Ok(ControllerSample {
            position: [x, 1.2, -0.3],
            trigger: if squeezing { 255 } else { 0 },
            buttons: RawButtons::empty(),
            ..ControllerSample::default()
        })
    }
}
