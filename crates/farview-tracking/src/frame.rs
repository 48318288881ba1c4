//! Pairs the head transform submitted for a frame with the pose the remote
//! renderer echoes back on the decoded frame.

use std::sync::Arc;

use farview_vr::{Eye, HapticSink, HeadSample, StreamEngine, Transform};

use crate::math;
use crate::sampler::{self, HeadSlot};

/// Two-state correlator driven from the render thread.
///
/// Idle: no submission outstanding. Armed: a head transform has been
/// submitted for the current frame and the engine's echo is awaited. At
/// most one record is ever in flight; a new frame overwrites it.
pub struct FrameCorrelator {
    head: Arc<HeadSlot>,
    /// The transform submitted for the frame in flight; `Some` is Armed.
    in_flight: Option<Transform>,
    display: HeadSample,
}

impl FrameCorrelator {
    pub fn new(head: Arc<HeadSlot>) -> Self {
        Self {
            head,
            in_flight: None,
            display: HeadSample::default(),
        }
    }

    /// Frame begin: publish the head sample for the synchronization loop,
    /// submit its engine transform, latch the frame and arm the correlator.
    /// Pending haptic feedback is drained and relayed while the submission
    /// is in flight.
    ///
    /// Engine failures here are soft: the frame still arms, and a missing
    /// echo at [`end_frame`] keeps the previous display pose.
    ///
    /// [`end_frame`]: FrameCorrelator::end_frame
    pub fn begin_frame(
        &mut self,
        engine: &dyn StreamEngine,
        haptics: &mut dyn HapticSink,
        sample: HeadSample,
    ) {
        let sample = sampler::conditioned_head(&sample);
        self.head.publish(sample);

        let transform = math::engine_transform(&sample.pose);
        if let Err(err) = engine.submit_head_transform(&transform) {
            log::debug!("head transform dropped: {err}");
        }
        if let Err(err) = engine.latch_frame() {
            log::debug!("frame latch unavailable: {err}");
        }
        if let Some(pulse) = engine.take_haptic_pulse() {
            haptics.vibrate(&pulse);
        }
        self.in_flight = Some(transform);
    }

    /// Decoded texture for one eye, queried inside the latch scope.
    pub fn eye_texture(&self, engine: &dyn StreamEngine, eye: Eye) -> Option<u32> {
        engine.eye_texture(eye)
    }

    /// Frame end: query the echo once inside the latch scope, release the
    /// frame and disarm.
    ///
    /// An echoed transform becomes the authoritative display pose, with
    /// the handedness mirror undone and the timestamps zeroed. A missing
    /// echo leaves the previous display pose untouched; it is never
    /// replaced with zeroed or identity data. The frame is released either
    /// way.
    pub fn end_frame(&mut self, engine: &dyn StreamEngine) -> HeadSample {
        let echo = engine.echoed_head_transform();
        engine.release_frame();
        self.in_flight = None;

        match echo {
            Some(transform) => {
                self.display = HeadSample {
                    pose: math::display_pose(&transform),
                    times_ns: [0; 3],
                };
            }
            None => log::debug!("no echoed head transform; keeping previous display pose"),
        }
        self.display
    }

    /// Display pose from the most recent echoed frame.
    pub fn display_pose(&self) -> HeadSample {
        self.display
    }

    pub fn is_armed(&self) -> bool {
        self.in_flight.is_some()
    }
}
