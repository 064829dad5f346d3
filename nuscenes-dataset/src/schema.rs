//! Records of the nuScenes metadata tables.
//!
//! Only the fields the viewer needs are decoded; unknown fields are ignored.
//! Rotations are `[w, x, y, z]` quaternions, translations are metres and box
//! sizes are `[width, length, height]`.

use serde::Deserialize;

use crate::table::Record;

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub token: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    pub token: String,
    pub category_token: String,
    #[serde(default)]
    pub nbr_annotations: usize,
    #[serde(default)]
    pub first_annotation_token: String,
    #[serde(default)]
    pub last_annotation_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sensor {
    pub token: String,
    pub channel: String,
    pub modality: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalibratedSensor {
    pub token: String,
    pub sensor_token: String,
    pub translation: [f64; 3],
    pub rotation: [f64; 4],
    #[serde(default)]
    pub camera_intrinsic: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EgoPose {
    pub token: String,
    pub timestamp: i64,
    pub rotation: [f64; 4],
    pub translation: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub token: String,
    #[serde(default)]
    pub logfile: String,
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub date_captured: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub token: String,
    pub log_token: String,
    pub nbr_samples: usize,
    pub first_sample_token: String,
    pub last_sample_token: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `prev`/`next` are empty strings at either end of a scene.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub token: String,
    pub timestamp: i64,
    pub scene_token: String,
    pub prev: String,
    pub next: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleData {
    pub token: String,
    pub sample_token: String,
    pub ego_pose_token: String,
    pub calibrated_sensor_token: String,
    pub timestamp: i64,
    #[serde(default)]
    pub fileformat: String,
    pub is_key_frame: bool,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    pub filename: String,
    #[serde(default)]
    pub prev: String,
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleAnnotation {
    pub token: String,
    pub sample_token: String,
    pub instance_token: String,
    #[serde(default)]
    pub visibility_token: String,
    #[serde(default)]
    pub attribute_tokens: Vec<String>,
    pub translation: [f64; 3],
    pub size: [f64; 3],
    pub rotation: [f64; 4],
    #[serde(default)]
    pub prev: String,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub num_lidar_pts: i64,
    #[serde(default)]
    pub num_radar_pts: i64,
}

macro_rules! impl_record {
    ($($record:ty),* $(,)?) => {
        $(
            impl Record for $record {
                fn token(&self) -> &str {
                    &self.token
                }
            }
        )*
    };
}

impl_record!(
    Category,
    Instance,
    Sensor,
    CalibratedSensor,
    EgoPose,
    Log,
    Scene,
    Sample,
    SampleData,
    SampleAnnotation,
);
