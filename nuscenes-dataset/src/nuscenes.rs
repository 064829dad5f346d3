use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use nalgebra::Vector3;

use coordinate_transformer::{unit_quaternion, Pose, SensorPose};
use pcd_core::annotation::bbox::OrientedBox;

use crate::{
    error::DatasetError,
    schema::{
        CalibratedSensor, Category, EgoPose, Instance, Log, Sample, SampleAnnotation, SampleData,
        Scene, Sensor,
    },
    table::Table,
};

/// Opaque identifier of one sample (frame) in the dataset.
pub type SampleToken = String;

pub const LIDAR_TOP: &str = "LIDAR_TOP";

/// An indexed, read-only nuScenes dataset.
///
/// Tables live under `<dataroot>/<version>/`; sample data file names are
/// relative to `<dataroot>`.
pub struct NuScenes {
    dataroot: PathBuf,
    version: String,
    categories: Table<Category>,
    instances: Table<Instance>,
    sensors: Table<Sensor>,
    calibrated_sensors: Table<CalibratedSensor>,
    ego_poses: Table<EgoPose>,
    logs: Table<Log>,
    scenes: Table<Scene>,
    samples: Table<Sample>,
    sample_data: Table<SampleData>,
    sample_annotations: Table<SampleAnnotation>,
    // sample token -> channel -> key frame sample data token
    sample_channels: HashMap<String, HashMap<String, String>>,
    // sample token -> annotation tokens, in table order
    sample_anns: HashMap<String, Vec<String>>,
}

impl NuScenes {
    pub fn load(dataroot: impl AsRef<Path>, version: &str) -> Result<Self, DatasetError> {
        let start = std::time::Instant::now();
        let dataroot = dataroot.as_ref().to_path_buf();
        let table_root = dataroot.join(version);
        if !table_root.is_dir() {
            return Err(DatasetError::MissingTableRoot(table_root));
        }
        log::info!("loading tables from {:?}", table_root);

        let mut nusc = Self {
            categories: Table::load(&table_root, "category")?,
            instances: Table::load(&table_root, "instance")?,
            sensors: Table::load(&table_root, "sensor")?,
            calibrated_sensors: Table::load(&table_root, "calibrated_sensor")?,
            ego_poses: Table::load(&table_root, "ego_pose")?,
            logs: Table::load(&table_root, "log")?,
            scenes: Table::load(&table_root, "scene")?,
            samples: Table::load(&table_root, "sample")?,
            sample_data: Table::load(&table_root, "sample_data")?,
            sample_annotations: Table::load(&table_root, "sample_annotation")?,
            dataroot,
            version: version.to_string(),
            sample_channels: HashMap::new(),
            sample_anns: HashMap::new(),
        };
        nusc.build_reverse_indexes()?;

        log::info!(
            "{} scenes, {} samples, {} sample_data, {} sample_annotations loaded in {:?}",
            nusc.scenes.len(),
            nusc.samples.len(),
            nusc.sample_data.len(),
            nusc.sample_annotations.len(),
            start.elapsed()
        );

        Ok(nusc)
    }

    fn build_reverse_indexes(&mut self) -> Result<(), DatasetError> {
        for sd in self.sample_data.iter().filter(|sd| sd.is_key_frame) {
            let calibrated_sensor = self.calibrated_sensors.get(&sd.calibrated_sensor_token)?;
            let sensor = self.sensors.get(&calibrated_sensor.sensor_token)?;
            self.sample_channels
                .entry(sd.sample_token.clone())
                .or_default()
                .insert(sensor.channel.clone(), sd.token.clone());
        }

        for ann in self.sample_annotations.iter() {
            self.sample_anns
                .entry(ann.sample_token.clone())
                .or_default()
                .push(ann.token.clone());
        }

        Ok(())
    }

    pub fn dataroot(&self) -> &Path {
        &self.dataroot
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn scenes(&self) -> &[Scene] {
        self.scenes.rows()
    }

    pub fn scene(&self, token: &str) -> Result<&Scene, DatasetError> {
        self.scenes.get(token)
    }

    pub fn scene_by_index(&self, index: usize) -> Result<&Scene, DatasetError> {
        self.scenes
            .rows()
            .get(index)
            .ok_or(DatasetError::SceneIndexOutOfRange {
                index,
                len: self.scenes.len(),
            })
    }

    pub fn log(&self, token: &str) -> Result<&Log, DatasetError> {
        self.logs.get(token)
    }

    pub fn sample(&self, token: &str) -> Result<&Sample, DatasetError> {
        self.samples.get(token)
    }

    pub fn sample_data(&self, token: &str) -> Result<&SampleData, DatasetError> {
        self.sample_data.get(token)
    }

    pub fn sample_annotation(&self, token: &str) -> Result<&SampleAnnotation, DatasetError> {
        self.sample_annotations.get(token)
    }

    pub fn ego_pose(&self, token: &str) -> Result<&EgoPose, DatasetError> {
        self.ego_poses.get(token)
    }

    pub fn calibrated_sensor(&self, token: &str) -> Result<&CalibratedSensor, DatasetError> {
        self.calibrated_sensors.get(token)
    }

    pub fn sensor(&self, token: &str) -> Result<&Sensor, DatasetError> {
        self.sensors.get(token)
    }

    pub fn instance(&self, token: &str) -> Result<&Instance, DatasetError> {
        self.instances.get(token)
    }

    pub fn category(&self, token: &str) -> Result<&Category, DatasetError> {
        self.categories.get(token)
    }

    /// The first sample of every scene, in scene table order.
    pub fn first_sample_tokens(&self) -> Vec<SampleToken> {
        self.scenes
            .iter()
            .map(|scene| scene.first_sample_token.clone())
            .collect()
    }

    /// Every key frame of `scene`, following the `next` links from its first sample.
    pub fn scene_sample_tokens(&self, scene: &Scene) -> Result<Vec<SampleToken>, DatasetError> {
        let mut tokens = Vec::with_capacity(scene.nbr_samples);
        let mut visited = HashSet::new();
        let mut token = scene.first_sample_token.clone();
        while !token.is_empty() {
            if !visited.insert(token.clone()) {
                return Err(DatasetError::SampleCycle {
                    scene: scene.token.clone(),
                    token,
                });
            }
            let sample = self.sample(&token)?;
            tokens.push(token);
            token = sample.next.clone();
        }
        Ok(tokens)
    }

    /// Key frame sample data recorded by `channel` for the given sample.
    pub fn sample_data_token(&self, sample_token: &str, channel: &str) -> Result<&str, DatasetError> {
        self.sample(sample_token)?;
        self.sample_channels
            .get(sample_token)
            .and_then(|channels| channels.get(channel))
            .map(String::as_str)
            .ok_or_else(|| DatasetError::MissingChannel {
                sample_token: sample_token.to_string(),
                channel: channel.to_string(),
            })
    }

    pub fn sample_data_path(&self, sample_data_token: &str) -> Result<PathBuf, DatasetError> {
        let sd = self.sample_data(sample_data_token)?;
        Ok(self.dataroot.join(&sd.filename))
    }

    /// Vehicle pose and sensor calibration in effect when the sample data was captured.
    pub fn sensor_pose(&self, sample_data_token: &str) -> Result<SensorPose, DatasetError> {
        let sd = self.sample_data(sample_data_token)?;
        let ego_pose = self.ego_pose(&sd.ego_pose_token)?;
        let calibrated_sensor = self.calibrated_sensor(&sd.calibrated_sensor_token)?;

        Ok(SensorPose::new(
            Pose::from_raw(ego_pose.translation, ego_pose.rotation)?,
            Pose::from_raw(calibrated_sensor.translation, calibrated_sensor.rotation)?,
        ))
    }

    /// A single annotation as a world-frame box labelled with its category name.
    pub fn annotation_box(&self, annotation_token: &str) -> Result<OrientedBox, DatasetError> {
        let ann = self.sample_annotation(annotation_token)?;
        let instance = self.instance(&ann.instance_token)?;
        let category = self.category(&instance.category_token)?;

        Ok(OrientedBox::new(
            Vector3::from(ann.translation),
            ann.size,
            unit_quaternion(ann.rotation)?,
        )
        .with_label(category.name.as_str(), ann.token.as_str()))
    }

    /// Ground-truth boxes of the sample a key frame sample data belongs to, in world coordinates.
    pub fn boxes(&self, sample_data_token: &str) -> Result<Vec<OrientedBox>, DatasetError> {
        let sd = self.sample_data(sample_data_token)?;
        if !sd.is_key_frame {
            return Err(DatasetError::NotKeyFrame(sample_data_token.to_string()));
        }

        self.sample_anns
            .get(&sd.sample_token)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|token| self.annotation_box(token))
            .collect()
    }
}
