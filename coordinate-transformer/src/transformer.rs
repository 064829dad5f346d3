use pcd_core::annotation::bbox::OrientedBox;

use crate::pose::SensorPose;

/// Expresses a world-frame box in the frame of the sensor described by `pose`.
///
/// The caller's box is left untouched. The ego step runs before the
/// calibration step and each step translates before rotating; the steps do
/// not commute.
pub fn world_to_sensor(world_box: &OrientedBox, pose: &SensorPose) -> OrientedBox {
    let mut sensor_box = world_box.clone();
    // world -> ego vehicle
    pose.ego.apply_inverse(&mut sensor_box);
    // ego vehicle -> sensor
    pose.calibration.apply_inverse(&mut sensor_box);
    sensor_box
}

pub enum BoxTransformer {
    Identity,
    WorldToSensor(SensorPose),
}

impl BoxTransformer {
    pub fn new(pose: SensorPose) -> Self {
        if pose.is_identity() {
            return Self::Identity;
        }
        Self::WorldToSensor(pose)
    }

    pub fn transform(&self, world_box: &OrientedBox) -> OrientedBox {
        match self {
            Self::Identity => world_box.clone(),
            Self::WorldToSensor(pose) => world_to_sensor(world_box, pose),
        }
    }

    pub fn transform_all(&self, world_boxes: &[OrientedBox]) -> Vec<OrientedBox> {
        world_boxes.iter().map(|b| self.transform(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::{assert_relative_eq, relative_ne};
    use nalgebra::{UnitQuaternion, Vector3};

    use super::*;
    use crate::pose::Pose;

    fn yaw(angle: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
    }

    fn sample_box() -> OrientedBox {
        OrientedBox::new(Vector3::new(12.0, 5.0, 1.0), [1.9, 4.5, 1.6], yaw(FRAC_PI_2))
            .with_label("vehicle.car", "ann-0")
    }

    #[test]
    fn identity_poses_leave_corners_unchanged() {
        let world_box = sample_box();
        let sensor_box = world_to_sensor(&world_box, &SensorPose::default());

        for (a, b) in world_box.corners().iter().zip(sensor_box.corners().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn unit_cube_with_identity_poses() {
        let cube = OrientedBox::new(Vector3::zeros(), [1.0, 1.0, 1.0], UnitQuaternion::identity());
        let transformed = world_to_sensor(&cube, &SensorPose::default());
        for corner in transformed.corners() {
            for value in corner.iter() {
                assert_relative_eq!(value.abs(), 0.5);
            }
        }
    }

    #[test]
    fn world_box_reaches_sensor_frame() {
        let pose = SensorPose::new(
            Pose::new(Vector3::new(10.0, 5.0, 0.0), yaw(FRAC_PI_2)),
            Pose::new(Vector3::new(0.5, 0.0, 1.5), UnitQuaternion::identity()),
        );
        let sensor_box = world_to_sensor(&sample_box(), &pose);

        // (2, 0, 1) in the vehicle frame after undoing the yaw is (0, -2, 1)
        assert_relative_eq!(sensor_box.center, Vector3::new(-0.5, -2.0, -0.5), epsilon = 1e-12);
        assert_relative_eq!(sensor_box.orientation, UnitQuaternion::identity(), epsilon = 1e-12);
        assert_eq!(sensor_box.size, [1.9, 4.5, 1.6]);
        assert_eq!(sensor_box.name.as_deref(), Some("vehicle.car"));
    }

    #[test]
    fn caller_box_is_not_mutated() {
        let world_box = sample_box();
        let before = world_box.clone();
        let pose = SensorPose::new(
            Pose::new(Vector3::new(3.0, -1.0, 0.0), yaw(0.3)),
            Pose::new(Vector3::new(1.0, 0.0, 1.8), yaw(-FRAC_PI_2)),
        );
        let _ = world_to_sensor(&world_box, &pose);
        assert_eq!(world_box, before);
    }

    #[test]
    fn ego_and_calibration_steps_do_not_commute() {
        let ego = Pose::new(Vector3::new(100.0, 20.0, 0.0), yaw(0.7));
        let calibration = Pose::new(
            Vector3::new(0.9, 0.0, 1.8),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.4),
        );
        let world_box = sample_box();

        let forward = world_to_sensor(&world_box, &SensorPose::new(ego.clone(), calibration.clone()));
        let swapped = world_to_sensor(&world_box, &SensorPose::new(calibration, ego));

        assert!(relative_ne!(forward.center, swapped.center, epsilon = 1e-6));
    }

    #[test]
    fn transformer_shortcuts_identity() {
        let transformer = BoxTransformer::new(SensorPose::default());
        assert!(matches!(transformer, BoxTransformer::Identity));

        let boxes = vec![sample_box(), sample_box()];
        assert_eq!(transformer.transform_all(&boxes), boxes);
    }

    #[test]
    fn transformer_matches_free_function() {
        let pose = SensorPose::new(
            Pose::new(Vector3::new(10.0, 5.0, 0.0), yaw(FRAC_PI_2)),
            Pose::new(Vector3::new(0.5, 0.0, 1.5), yaw(0.1)),
        );
        let transformer = BoxTransformer::new(pose.clone());
        assert_eq!(transformer.transform(&sample_box()), world_to_sensor(&sample_box(), &pose));
    }
}
