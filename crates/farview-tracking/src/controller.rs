//! Per-side button edge detection and axis remapping.

use farview_vr::{ButtonId, ButtonPhase, ControllerSample, JoystickAxes, RawButtons, Side};

/// Analog trigger magnitude that counts as pressed. Anything below is
/// released; there is no hysteresis.
pub const TRIGGER_SATURATION: u8 = 255;

/// Edge-detection state for every tracked button on both hands.
///
/// Previous states live in a fixed array indexed by side and button, all
/// initialized to released, so a transition on any button is always
/// detectable and dispatch is exhaustive over [`ButtonId::ALL`].
#[derive(Debug, Default)]
pub struct ControllerTracker {
    pressed: [[bool; ButtonId::COUNT]; 2],
}

impl ControllerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff one side's sample against the stored state, recording the new
    /// state and returning one transition per button that changed. Steady
    /// state returns nothing.
    pub fn transitions(
        &mut self,
        side: Side,
        sample: &ControllerSample,
    ) -> Vec<(ButtonId, ButtonPhase)> {
        let mut out = Vec::new();
        for button in ButtonId::ALL {
            let now = mapped_state(side, sample, button);
            let prev = &mut self.pressed[side.index()][button.index()];
            if now != *prev {
                *prev = now;
                out.push((button, ButtonPhase::from_pressed(now)));
            }
        }
        out
    }
}

/// Canonical state of one logical button in a raw sample.
///
/// The hands are mirrored: the left controller's Grip is the physically
/// right grip bar and its AX/BY pair maps to X/Y, while the right
/// controller's Grip is the physically left bar and AX/BY map to A/B.
fn mapped_state(side: Side, sample: &ControllerSample, button: ButtonId) -> bool {
    let held = |raw: RawButtons| sample.buttons.contains(raw);
    match button {
        ButtonId::Home => held(RawButtons::HOME),
        ButtonId::App => held(RawButtons::APP),
        ButtonId::Click => held(RawButtons::CLICK),
        ButtonId::VolumeUp => held(RawButtons::VOLUME_UP),
        ButtonId::VolumeDown => held(RawButtons::VOLUME_DOWN),
        ButtonId::A => side == Side::Right && held(RawButtons::AX),
        ButtonId::B => side == Side::Right && held(RawButtons::BY),
        ButtonId::X => side == Side::Left && held(RawButtons::AX),
        ButtonId::Y => side == Side::Left && held(RawButtons::BY),
        ButtonId::Grip => match side {
            Side::Left => held(RawButtons::RIGHT_GRIP),
            Side::Right => held(RawButtons::LEFT_GRIP),
        },
        ButtonId::Trigger => sample.trigger == TRIGGER_SATURATION,
    }
}

/// Remap both touchpads into a joystick sample: raw 0-255 becomes
/// `v / 128 - 1`, and the axis order is swapped so the raw primary axis is
/// reported as Y and the secondary as X.
pub fn joystick_axes(left: &ControllerSample, right: &ControllerSample) -> JoystickAxes {
    JoystickAxes {
        left_x: remap_axis(left.touchpad[1]),
        left_y: remap_axis(left.touchpad[0]),
        right_x: remap_axis(right.touchpad[1]),
        right_y: remap_axis(right.touchpad[0]),
    }
}

fn remap_axis(raw: u8) -> f32 {
    raw as f32 / 128.0 - 1.0
}
