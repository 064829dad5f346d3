mod error;
mod pose;
mod transformer;

pub use error::TransformError;
pub use pose::{unit_quaternion, Pose, SensorPose};
pub use transformer::{world_to_sensor, BoxTransformer};
