//! Quaternion/matrix conversion and the boundary coordinate convention.
//!
//! The pure conversions assume unit-norm input; normalization is the
//! producer's job (see [`renormalize`]), not a runtime check here.

use glam::Quat;

use farview_vr::{Pose, Transform};

/// Producers renormalize an orientation whose norm drifts further than this.
pub const NORM_DRIFT_TOLERANCE: f32 = 1e-3;

/// Scale factor below which the trace algorithm's division is unsafe.
const DEGENERATE_EPS: f32 = 1e-6;

const IDENTITY_ORIENTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Build the row-major 4x4 transform for a pose.
///
/// Rotation uses the `w2 + x2 - y2 - z2` diagonal form; translation lands
/// at flat indices 3, 7 and 11 and the bottom row is `(0, 0, 0, 1)`.
pub fn matrix_from_pose(pose: &Pose) -> Transform {
    let [x, y, z, w] = pose.orientation;
    let [px, py, pz] = pose.position;
    let ww = w * w;
    let xx = x * x;
    let yy = y * y;
    let zz = z * z;

    Transform([
        ww + xx - yy - zz,
        2.0 * (x * y - w * z),
        2.0 * (x * z + w * y),
        px,
        //
        2.0 * (x * y + w * z),
        ww - xx + yy - zz,
        2.0 * (y * z - w * x),
        py,
        //
        2.0 * (x * z - w * y),
        2.0 * (y * z + w * x),
        ww - xx - yy + zz,
        pz,
        //
        0.0,
        0.0,
        0.0,
        1.0,
    ])
}

/// Recover the orientation quaternion from a rotation transform.
///
/// Trace-based with four branches: when the trace is non-positive the
/// dominant diagonal element picks the branch, so the largest quaternion
/// component is always the one computed by the square root and the rest
/// come out by division without catastrophic cancellation. Degenerate
/// (non-orthonormal) input that would divide by a near-zero scale falls
/// back to the identity orientation.
pub fn orientation_from_matrix(transform: &Transform) -> [f32; 4] {
    let m = &transform.0;
    let (m00, m01, m02) = (m[0], m[1], m[2]);
    let (m10, m11, m12) = (m[4], m[5], m[6]);
    let (m20, m21, m22) = (m[8], m[9], m[10]);

    let trace = m00 + m11 + m22;

    if trace > 0.0 {
        let s = 0.5 / (trace + 1.0).sqrt();
        [(m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s, 0.25 / s]
    } else if m00 > m11 && m00 > m22 {
        let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
        if s < DEGENERATE_EPS {
            return IDENTITY_ORIENTATION;
        }
        [0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s]
    } else if m11 > m22 {
        let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
        if s < DEGENERATE_EPS {
            return IDENTITY_ORIENTATION;
        }
        [(m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s]
    } else {
        let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
        if s < DEGENERATE_EPS {
            return IDENTITY_ORIENTATION;
        }
        [(m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s]
    }
}

/// The coordinate-convention conversion between the headset driver's frame
/// and the stream engine's frame: negate x and y. Involution, so the same
/// function converts both directions. It must be applied exactly once per
/// boundary crossing: use [`engine_transform`] outbound and
/// [`display_pose`] inbound rather than calling this at call sites.
pub fn mirror_handedness(orientation: [f32; 4]) -> [f32; 4] {
    [
        -orientation[0],
        -orientation[1],
        orientation[2],
        orientation[3],
    ]
}

/// Device-space pose to engine-facing transform. The single outbound
/// application point of [`mirror_handedness`], shared by the head and
/// controller paths.
pub fn engine_transform(pose: &Pose) -> Transform {
    let mirrored = Pose {
        orientation: mirror_handedness(pose.orientation),
        position: pose.position,
    };
    matrix_from_pose(&mirrored)
}

/// Echoed engine transform back to a device-space display pose. The single
/// inbound application point of [`mirror_handedness`].
pub fn display_pose(echo: &Transform) -> Pose {
    Pose {
        orientation: mirror_handedness(orientation_from_matrix(echo)),
        position: echo.translation(),
    }
}

/// Rescale an orientation whose norm has drifted beyond
/// [`NORM_DRIFT_TOLERANCE`]; near-zero input degrades to identity rather
/// than dividing by nothing.
pub fn renormalize(orientation: [f32; 4]) -> [f32; 4] {
    let q = Quat::from_xyzw(
        orientation[0],
        orientation[1],
        orientation[2],
        orientation[3],
    );
    let len = q.length();
    if (len - 1.0).abs() <= NORM_DRIFT_TOLERANCE {
        return orientation;
    }
    if len <= f32::EPSILON {
        return IDENTITY_ORIENTATION;
    }
    let n = q / len;
    [n.x, n.y, n.z, n.w]
}
