//! Pose and controller synchronization between a headset driver and the
//! native streaming engine: transform conversion, edge-triggered button
//! dispatch, the fixed-cadence forwarding loop and frame pose correlation.

#![forbid(unsafe_code)]

pub mod controller;
pub mod frame;
pub mod math;
pub mod sampler;
pub mod sync;

pub use controller::ControllerTracker;
pub use frame::FrameCorrelator;
pub use sampler::HeadSlot;
pub use sync::SyncLoop;
