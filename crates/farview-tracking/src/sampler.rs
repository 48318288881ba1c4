//! Latest-value pose acquisition shared between the render thread and the
//! synchronization loop.

use std::sync::Mutex;

use farview_vr::{ControllerSample, HeadSample, Pose};

use crate::math;

/// Single-slot cell holding the most recent head sample.
///
/// The render thread publishes at frame begin; the synchronization loop
/// snapshots every tick. Last value wins, no queue, and the lock is held
/// only for the copy.
#[derive(Debug, Default)]
pub struct HeadSlot {
    inner: Mutex<HeadSample>,
}

impl HeadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, sample: HeadSample) {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = sample;
    }

    pub fn snapshot(&self) -> HeadSample {
        match self.inner.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Pass-through conditioning of a raw controller sample into a device-space
/// pose: unit conversion only, no interpolation or prediction, with the
/// orientation renormalized if the driver let it drift.
pub fn controller_pose(sample: &ControllerSample) -> Pose {
    Pose {
        orientation: math::renormalize(sample.orientation),
        position: sample.position,
    }
}

/// Same conditioning for a head sample.
pub fn conditioned_head(sample: &HeadSample) -> HeadSample {
    HeadSample {
        pose: Pose {
            orientation: math::renormalize(sample.pose.orientation),
            position: sample.pose.position,
        },
        times_ns: sample.times_ns,
    }
}
