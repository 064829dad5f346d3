pub mod annotation;
pub mod pointcloud;
