use std::path::PathBuf;

use nalgebra::Point3;

use coordinate_transformer::BoxTransformer;
use nuscenes_dataset::{DatasetError, NuScenes, SampleToken, LIDAR_TOP};
use pcd_parser::parsers::{
    extension_of, nuscenes_bin::NuScenesBinParserProvider, Extension, ParserProvider as _,
};
use scene_exporter::{BoxLabel, EdgeList, ExportError, FrameScene};

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("failed to parse lidar sweep {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to read from stdin: {0}")]
    Input(#[from] std::io::Error),
}

/// Samples to visit: the first sample of each selected scene, or all of them.
pub fn frame_tokens(
    nusc: &NuScenes,
    scene_index: Option<usize>,
    all_samples: bool,
) -> Result<Vec<SampleToken>, DatasetError> {
    let scenes = match scene_index {
        Some(index) => vec![nusc.scene_by_index(index)?],
        None if all_samples => nusc.scenes().iter().collect(),
        None => return Ok(nusc.first_sample_tokens()),
    };

    let mut tokens = Vec::new();
    for scene in scenes {
        if all_samples {
            tokens.extend(nusc.scene_sample_tokens(scene)?);
        } else {
            tokens.push(scene.first_sample_token.clone());
        }
    }
    Ok(tokens)
}

/// Loads the top lidar sweep of a sample and its ground-truth boxes, moved into the lidar frame.
pub fn build_frame_scene(
    nusc: &NuScenes,
    sample_token: &str,
    index: usize,
) -> Result<FrameScene, ViewerError> {
    let lidar_token = nusc.sample_data_token(sample_token, LIDAR_TOP)?;
    let lidar_path = nusc.sample_data_path(lidar_token)?;

    match extension_of(&lidar_path) {
        Ok(Extension::NuScenesBin) => {}
        Err(message) => return Err(ViewerError::Parse { path: lidar_path, message }),
    }
    let parser = NuScenesBinParserProvider {
        filenames: vec![lidar_path.clone()],
    }
    .get_parser();
    let points = parser.parse().map_err(|e| ViewerError::Parse {
        path: lidar_path,
        message: e.to_string(),
    })?;

    let transformer = BoxTransformer::new(nusc.sensor_pose(lidar_token)?);
    let world_boxes = nusc.boxes(lidar_token)?;

    let mut edges = EdgeList::with_box_capacity(world_boxes.len());
    let mut labels = Vec::with_capacity(world_boxes.len());
    for sensor_box in transformer.transform_all(&world_boxes) {
        edges.push_box(&sensor_box.corners());
        labels.push(BoxLabel {
            center: Point3::from(sensor_box.center),
            name: sensor_box.name.unwrap_or_default(),
        });
    }

    Ok(FrameScene {
        index,
        sample_token: sample_token.to_string(),
        points,
        edges,
        labels,
    })
}
