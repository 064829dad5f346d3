use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use pcd_core::annotation::bbox::OrientedBox;

use crate::error::TransformError;

/// Builds a unit quaternion from the `[w, x, y, z]` layout used by the dataset tables.
pub fn unit_quaternion(raw: [f64; 4]) -> Result<UnitQuaternion<f64>, TransformError> {
    let [w, i, j, k] = raw;
    UnitQuaternion::try_new(Quaternion::new(w, i, j, k), 0.0)
        .ok_or(TransformError::DegenerateRotation(raw))
}

/// A rigid placement of a child frame inside its parent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn new(translation: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), UnitQuaternion::identity())
    }

    pub fn from_raw(translation: [f64; 3], rotation: [f64; 4]) -> Result<Self, TransformError> {
        Ok(Self::new(Vector3::from(translation), unit_quaternion(rotation)?))
    }

    pub fn is_identity(&self) -> bool {
        self.translation == Vector3::zeros() && self.rotation == UnitQuaternion::identity()
    }

    /// Re-expresses a box given in the parent frame relative to this pose.
    ///
    /// Translation is removed first, then the inverse rotation is applied.
    pub fn apply_inverse(&self, bbox: &mut OrientedBox) {
        bbox.translate(&-self.translation);
        bbox.rotate(&self.rotation.inverse());
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Where a sensor was when it captured a sample: the vehicle in the world and
/// the sensor on the vehicle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorPose {
    pub ego: Pose,
    pub calibration: Pose,
}

impl SensorPose {
    pub fn new(ego: Pose, calibration: Pose) -> Self {
        Self { ego, calibration }
    }

    pub fn is_identity(&self) -> bool {
        self.ego.is_identity() && self.calibration.is_identity()
    }
}
