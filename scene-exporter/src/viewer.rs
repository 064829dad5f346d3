use std::path::Path;

use nalgebra::Point3;
use rerun::{RecordingStream, RecordingStreamBuilder};

use crate::renderer::{ExportError, FrameRenderer, FrameScene};

pub const FRAME_TIMELINE: &str = "frame";

const POINT_COLOR: [u8; 4] = [170, 170, 170, 255];
const BOX_COLOR: [u8; 4] = [0, 200, 255, 255];

/// Draws frames in the Rerun viewer, one step of the `frame` timeline per sample.
pub struct RerunRenderer {
    rec: RecordingStream,
}

impl RerunRenderer {
    /// Spawns a local viewer process and streams to it.
    pub fn spawn(app_id: &str) -> Result<Self, ExportError> {
        let rec = RecordingStreamBuilder::new(app_id).spawn()?;
        Self::with_stream(rec)
    }

    /// Records into an `.rrd` file instead of a live viewer.
    pub fn save(app_id: &str, path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let rec = RecordingStreamBuilder::new(app_id).save(path.as_ref())?;
        Self::with_stream(rec)
    }

    pub fn with_stream(rec: RecordingStream) -> Result<Self, ExportError> {
        // nuScenes sensor frames are right handed with z up
        rec.log_static("world", &rerun::ViewCoordinates::RIGHT_HAND_Z_UP())?;
        Ok(Self { rec })
    }
}

impl FrameRenderer for RerunRenderer {
    fn render(&mut self, frame: &FrameScene) -> Result<(), ExportError> {
        self.rec.set_time_sequence(FRAME_TIMELINE, frame.index as i64);

        let positions: Vec<[f32; 3]> = frame.points.points.iter().map(|p| p.to_f32_array()).collect();
        self.rec.log(
            "world/lidar",
            &rerun::Points3D::new(positions)
                .with_radii([rerun::components::Radius::new_ui_points(1.0)])
                .with_colors([POINT_COLOR]),
        )?;

        let strips: Vec<Vec<[f32; 3]>> = frame
            .edges
            .segments()
            .map(|(a, b)| vec![to_f32(&a), to_f32(&b)])
            .collect();
        self.rec.log(
            "world/boxes",
            &rerun::LineStrips3D::new(strips).with_colors([BOX_COLOR]),
        )?;

        let (centers, names): (Vec<[f32; 3]>, Vec<String>) = frame
            .labels
            .iter()
            .map(|label| (to_f32(&label.center), label.name.clone()))
            .unzip();
        self.rec.log(
            "world/boxes/labels",
            &rerun::Points3D::new(centers)
                .with_labels(names)
                .with_colors([BOX_COLOR]),
        )?;

        log::debug!(
            "rendered frame {} ({}): {} points, {} segments",
            frame.index,
            frame.sample_token,
            frame.points.len(),
            frame.edges.segment_count()
        );

        Ok(())
    }
}

fn to_f32(p: &Point3<f64>) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}
