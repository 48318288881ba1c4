use bitflags::bitflags;

/// Controller hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Stereo eye selector for per-eye texture queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    Left,
    Right,
}

/// Canonical logical buttons, per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Home,
    App,
    Click,
    VolumeUp,
    VolumeDown,
    A,
    B,
    X,
    Y,
    Grip,
    Trigger,
}

impl ButtonId {
    pub const ALL: [ButtonId; 11] = [
        ButtonId::Home,
        ButtonId::App,
        ButtonId::Click,
        ButtonId::VolumeUp,
        ButtonId::VolumeDown,
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
        ButtonId::Grip,
        ButtonId::Trigger,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub const fn index(self) -> usize {
        match self {
            ButtonId::Home => 0,
            ButtonId::App => 1,
            ButtonId::Click => 2,
            ButtonId::VolumeUp => 3,
            ButtonId::VolumeDown => 4,
            ButtonId::A => 5,
            ButtonId::B => 6,
            ButtonId::X => 7,
            ButtonId::Y => 8,
            ButtonId::Grip => 9,
            ButtonId::Trigger => 10,
        }
    }
}

/// Edge-triggered button transition. Exactly one is emitted per physical
/// press or release, never on steady state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Pressed,
    Released,
}

impl ButtonPhase {
    pub const fn from_pressed(pressed: bool) -> Self {
        if pressed {
            ButtonPhase::Pressed
        } else {
            ButtonPhase::Released
        }
    }
}

bitflags! {
    /// Physical controls as the device driver reports them. The grip bars
    /// are mirrored across hands: the left controller carries the
    /// physically-right grip and vice versa.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RawButtons: u16 {
        const HOME        = 1 << 0;
        const APP         = 1 << 1;
        const CLICK       = 1 << 2;
        const VOLUME_UP   = 1 << 3;
        const VOLUME_DOWN = 1 << 4;
        const AX          = 1 << 5;
        const BY          = 1 << 6;
        const LEFT_GRIP   = 1 << 7;
        const RIGHT_GRIP  = 1 << 8;
    }
}

/// Rigid-body pose: unit quaternion `(x, y, z, w)` plus position.
///
/// The quaternion is expected to stay within 1e-3 of unit norm; producers
/// renormalize on drift, consumers may assume it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub orientation: [f32; 4],
    pub position: [f32; 3],
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        orientation: [0.0, 0.0, 0.0, 1.0],
        position: [0.0, 0.0, 0.0],
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Row-major 4x4 homogeneous matrix, the canonical interchange layout on
/// the engine boundary in both directions. Translation sits at flat
/// indices 3, 7 and 11; the bottom row is fixed to `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub [f32; 16]);

impl Transform {
    pub const IDENTITY: Transform = Transform([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn translation(&self) -> [f32; 3] {
        [self.0[3], self.0[7], self.0[11]]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One controller's raw state, refreshed every sampling tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSample {
    pub orientation: [f32; 4],
    pub position: [f32; 3],
    /// Raw touchpad axes, 0-255 each, in driver order (primary, secondary).
    pub touchpad: [u8; 2],
    /// Analog trigger magnitude, 0-255.
    pub trigger: u8,
    pub buttons: RawButtons,
}

impl Default for ControllerSample {
    fn default() -> Self {
        Self {
            orientation: Pose::IDENTITY.orientation,
            position: [0.0, 0.0, 0.0],
            touchpad: [128, 128],
            trigger: 0,
            buttons: RawButtons::empty(),
        }
    }
}

/// Head pose with the driver's timestamps: sample time plus two
/// predicted-display placeholders, nanoseconds. Passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadSample {
    pub pose: Pose,
    pub times_ns: [i64; 3],
}

impl Default for HeadSample {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            times_ns: [0; 3],
        }
    }
}

/// Remapped joystick axes for both hands, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JoystickAxes {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
}

/// A haptic feedback request reported by the engine for one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    pub side: Side,
    /// Vibration strength, 0-1.
    pub amplitude: f32,
    pub duration_ms: u32,
}
