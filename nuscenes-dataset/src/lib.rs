//! Read-only access to a nuScenes-format dataset: the JSON metadata tables,
//! token lookups across them, and conversion of annotations into boxes.

mod error;
mod nuscenes;
pub mod schema;
mod table;

pub use error::DatasetError;
pub use nuscenes::{NuScenes, SampleToken, LIDAR_TOP};
pub use table::{Record, Table};
