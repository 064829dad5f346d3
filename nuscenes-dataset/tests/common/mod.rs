use std::{fs, path::Path};

use serde_json::{json, Value};
use tempfile::TempDir;

pub const VERSION: &str = "v1.0-test";

fn write_table(dir: &Path, name: &str, rows: Value) {
    fs::write(dir.join(format!("{name}.json")), rows.to_string()).unwrap();
}

fn sample_data(token: &str, sample: &str, ego_pose: &str, key_frame: bool) -> Value {
    json!({
        "token": token,
        "sample_token": sample,
        "ego_pose_token": ego_pose,
        "calibrated_sensor_token": "cs-lidar",
        "timestamp": 0,
        "fileformat": "pcd",
        "is_key_frame": key_frame,
        "height": 0,
        "width": 0,
        "filename": format!("samples/LIDAR_TOP/{token}.pcd.bin"),
        "prev": "",
        "next": ""
    })
}

fn annotation(token: &str, sample: &str, instance: &str, translation: [f64; 3]) -> Value {
    json!({
        "token": token,
        "sample_token": sample,
        "instance_token": instance,
        "visibility_token": "4",
        "attribute_tokens": [],
        "translation": translation,
        "size": [1.9, 4.5, 1.6],
        "rotation": [1.0, 0.0, 0.0, 0.0],
        "prev": "",
        "next": "",
        "num_lidar_pts": 10,
        "num_radar_pts": 0
    })
}

/// Two scenes: `scene-a` with samples s1 -> s2, `scene-b` with s3 only.
/// s1 carries two annotations, s2 one, s3 none. `sd-sweep` is a non key frame of s1.
pub fn write_dataset() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let tables = root.path().join(VERSION);
    fs::create_dir_all(&tables).unwrap();

    write_table(
        &tables,
        "category",
        json!([
            {"token": "cat-car", "name": "vehicle.car", "description": ""},
            {"token": "cat-ped", "name": "human.pedestrian.adult", "description": ""}
        ]),
    );
    write_table(
        &tables,
        "instance",
        json!([
            {"token": "inst-car", "category_token": "cat-car", "nbr_annotations": 2,
             "first_annotation_token": "ann-1", "last_annotation_token": "ann-3"},
            {"token": "inst-ped", "category_token": "cat-ped", "nbr_annotations": 1,
             "first_annotation_token": "ann-2", "last_annotation_token": "ann-2"}
        ]),
    );
    write_table(
        &tables,
        "sensor",
        json!([{"token": "sensor-lidar", "channel": "LIDAR_TOP", "modality": "lidar"}]),
    );
    write_table(
        &tables,
        "calibrated_sensor",
        json!([{"token": "cs-lidar", "sensor_token": "sensor-lidar",
                "translation": [0.9, 0.0, 1.8], "rotation": [1.0, 0.0, 0.0, 0.0],
                "camera_intrinsic": []}]),
    );
    write_table(
        &tables,
        "ego_pose",
        json!([
            {"token": "ego-1", "timestamp": 0, "translation": [10.0, 5.0, 0.0],
             "rotation": [std::f64::consts::FRAC_1_SQRT_2, 0.0, 0.0, std::f64::consts::FRAC_1_SQRT_2]},
            {"token": "ego-2", "timestamp": 1, "translation": [11.0, 5.0, 0.0], "rotation": [1.0, 0.0, 0.0, 0.0]},
            {"token": "ego-3", "timestamp": 2, "translation": [0.0, 0.0, 0.0], "rotation": [1.0, 0.0, 0.0, 0.0]},
            {"token": "ego-sweep", "timestamp": 3, "translation": [0.0, 0.0, 0.0], "rotation": [1.0, 0.0, 0.0, 0.0]}
        ]),
    );
    write_table(
        &tables,
        "log",
        json!([{"token": "log-1", "logfile": "n015", "vehicle": "n015",
                "date_captured": "2018-07-24", "location": "singapore-onenorth"}]),
    );
    write_table(
        &tables,
        "scene",
        json!([
            {"token": "scene-a", "log_token": "log-1", "nbr_samples": 2,
             "first_sample_token": "s1", "last_sample_token": "s2",
             "name": "scene-0001", "description": "night, rain"},
            {"token": "scene-b", "log_token": "log-1", "nbr_samples": 1,
             "first_sample_token": "s3", "last_sample_token": "s3",
             "name": "scene-0002", "description": ""}
        ]),
    );
    write_table(
        &tables,
        "sample",
        json!([
            {"token": "s1", "timestamp": 0, "scene_token": "scene-a", "prev": "", "next": "s2"},
            {"token": "s2", "timestamp": 1, "scene_token": "scene-a", "prev": "s1", "next": ""},
            {"token": "s3", "timestamp": 2, "scene_token": "scene-b", "prev": "", "next": ""}
        ]),
    );
    write_table(
        &tables,
        "sample_data",
        json!([
            sample_data("sd-1", "s1", "ego-1", true),
            sample_data("sd-2", "s2", "ego-2", true),
            sample_data("sd-3", "s3", "ego-3", true),
            sample_data("sd-sweep", "s1", "ego-sweep", false)
        ]),
    );
    write_table(
        &tables,
        "sample_annotation",
        json!([
            annotation("ann-1", "s1", "inst-car", [12.0, 5.0, 1.0]),
            annotation("ann-2", "s1", "inst-ped", [10.0, 8.0, 1.0]),
            annotation("ann-3", "s2", "inst-car", [13.0, 5.0, 1.0])
        ]),
    );

    root
}
