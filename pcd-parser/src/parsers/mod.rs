use std::{error::Error, path::Path};

use pcd_core::pointcloud::point::PointCloud;

pub mod nuscenes_bin;

pub trait ParserProvider {
    fn get_parser(&self) -> Box<dyn Parser>;
}

pub trait Parser {
    fn parse(&self) -> Result<PointCloud, Box<dyn Error>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    NuScenesBin,
}

pub fn get_extension(extension: &str) -> Result<Extension, String> {
    match extension.to_ascii_lowercase().as_str() {
        "bin" => Ok(Extension::NuScenesBin),
        other => Err(format!("Unsupported extension: {other}")),
    }
}

// Sweeps are named `<stem>.pcd.bin`, so only the last suffix is inspected.
pub fn extension_of(path: &Path) -> Result<Extension, String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("File extension is not found: {}", path.display()))?;
    get_extension(extension)
}
