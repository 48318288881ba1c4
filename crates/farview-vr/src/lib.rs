#![forbid(unsafe_code)]

pub mod engine;
pub mod source;
pub mod status;
pub mod types;

pub use engine::StreamEngine;
pub use source::{ControllerSource, HapticSink, HeadSource};
pub use status::{session_status, set_session_status};
pub use types::{
    ButtonId, ButtonPhase, ControllerSample, Eye, HapticPulse, HeadSample, JoystickAxes, Pose,
    RawButtons, Side, Transform,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VrError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),
    #[error("engine error: {0}")]
    Engine(String),
    #[error("tracking error: {0}")]
    Tracking(String),
}

pub type VrResult<T> = Result<T, VrError>;
