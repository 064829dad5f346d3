use nalgebra::Point3;

use pcd_core::pointcloud::point::PointCloud;

use crate::wireframe::EdgeList;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("rerun recording stream error: {0}")]
    Recording(#[from] rerun::RecordingStreamError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxLabel {
    pub center: Point3<f64>,
    pub name: String,
}

/// Everything drawn for one sample, already in the lidar sensor frame.
#[derive(Debug, Clone)]
pub struct FrameScene {
    pub index: usize,
    pub sample_token: String,
    pub points: PointCloud,
    pub edges: EdgeList,
    pub labels: Vec<BoxLabel>,
}

pub trait FrameRenderer {
    fn render(&mut self, frame: &FrameScene) -> Result<(), ExportError>;
}
