use std::{error::Error, fs, path::PathBuf};

use byteorder::{ByteOrder as _, LittleEndian};

use pcd_core::pointcloud::point::{Point, PointCloud};

use super::{Parser, ParserProvider};

/// Each lidar return is stored as x, y, z, intensity, ring index.
pub const FIELDS_PER_POINT: usize = 5;
pub const BYTES_PER_POINT: usize = FIELDS_PER_POINT * 4;

pub struct NuScenesBinParserProvider {
    pub filenames: Vec<PathBuf>,
}

impl ParserProvider for NuScenesBinParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(NuScenesBinParser {
            filenames: self.filenames.clone(),
        })
    }
}

pub struct NuScenesBinParser {
    pub filenames: Vec<PathBuf>,
}

impl Parser for NuScenesBinParser {
    fn parse(&self) -> Result<PointCloud, Box<dyn Error>> {
        let start = std::time::Instant::now();
        let mut points = Vec::new();

        for filename in &self.filenames {
            let bytes = fs::read(filename)
                .map_err(|e| format!("Failed to read {}: {}", filename.display(), e))?;
            points.extend(decode_points(&bytes).map_err(|e| format!("{}: {}", filename.display(), e))?);
        }

        log::debug!(
            "Read {} lidar points from {} file(s) in {:?}",
            points.len(),
            self.filenames.len(),
            start.elapsed()
        );

        Ok(PointCloud::new(points))
    }
}

/// Decodes a raw sweep, keeping only the position of each return.
pub fn decode_points(bytes: &[u8]) -> Result<Vec<Point>, String> {
    if bytes.len() % BYTES_PER_POINT != 0 {
        return Err(format!(
            "sweep length {} is not a multiple of {} bytes",
            bytes.len(),
            BYTES_PER_POINT
        ));
    }

    let mut fields = [0f32; FIELDS_PER_POINT];
    let points = bytes
        .chunks_exact(BYTES_PER_POINT)
        .map(|record| {
            LittleEndian::read_f32_into(record, &mut fields);
            Point::new(fields[0] as f64, fields[1] as f64, fields[2] as f64)
        })
        .collect();

    Ok(points)
}
