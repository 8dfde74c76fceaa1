//! Per-frame CSV tables: point clouds, cuboids and semantic labels.
//!
//! Every table carries a header row. Columns are matched by name, so extra
//! columns (such as an exported row index) are ignored and column order does
//! not matter. Row order is preserved exactly.
//!
//! # Columns
//!
//! - points: `x, y, z, i, t, d`
//! - cuboids: `uuid, label, yaw, stationary, camera_used, position.x,
//!   position.y, position.z, dimensions.x, dimensions.y, dimensions.z,
//!   attributes.object_motion, attributes.rider_status,
//!   attributes.pedestrian_behavior, attributes.pedestrian_age,
//!   cuboids.sensor_id, cuboids.sibling_id`
//! - semantic labels: `class`

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::cuboid::{CuboidAttributes, CuboidRecord, Dimensions};
use super::points::{LidarPoint, PointCloudFrame};
use super::pose::Position;
use super::semseg::SemsegFrame;
use crate::error::PandasetError;

// ============================================================================
// Row types (internal to this module)
// ============================================================================

/// A single row of a cuboid table, with the flattened column names.
#[derive(Debug, Deserialize)]
struct CuboidRow {
    uuid: String,
    label: String,
    yaw: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    stationary: bool,
    camera_used: i32,
    #[serde(rename = "position.x")]
    position_x: f64,
    #[serde(rename = "position.y")]
    position_y: f64,
    #[serde(rename = "position.z")]
    position_z: f64,
    #[serde(rename = "dimensions.x")]
    dimensions_x: f64,
    #[serde(rename = "dimensions.y")]
    dimensions_y: f64,
    #[serde(rename = "dimensions.z")]
    dimensions_z: f64,
    #[serde(rename = "attributes.object_motion", default)]
    object_motion: Option<String>,
    #[serde(rename = "attributes.rider_status", default)]
    rider_status: Option<String>,
    #[serde(rename = "attributes.pedestrian_behavior", default)]
    pedestrian_behavior: Option<String>,
    #[serde(rename = "attributes.pedestrian_age", default)]
    pedestrian_age: Option<String>,
    #[serde(rename = "cuboids.sensor_id")]
    sensor_id: i32,
    #[serde(rename = "cuboids.sibling_id", default)]
    sibling_id: Option<String>,
}

impl From<CuboidRow> for CuboidRecord {
    fn from(row: CuboidRow) -> Self {
        CuboidRecord {
            uuid: row.uuid,
            label: row.label,
            yaw: row.yaw,
            stationary: row.stationary,
            camera_used: row.camera_used,
            position: Position::new(row.position_x, row.position_y, row.position_z),
            dimensions: Dimensions::new(row.dimensions_x, row.dimensions_y, row.dimensions_z),
            attributes: CuboidAttributes {
                object_motion: row.object_motion,
                rider_status: row.rider_status,
                pedestrian_behavior: row.pedestrian_behavior,
                pedestrian_age: row.pedestrian_age,
            },
            sensor_id: row.sensor_id,
            sibling_id: row.sibling_id,
        }
    }
}

/// A single row of a semantic segmentation table.
#[derive(Debug, Deserialize)]
struct SemsegRow {
    #[serde(rename = "class")]
    class_id: String,
}

/// Accepts the boolean spellings found in exported tables.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean '{other}'"
        ))),
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Reads one LiDAR frame from a point table.
pub fn read_point_table(path: &Path) -> Result<PointCloudFrame, PandasetError> {
    let rows: Vec<LidarPoint> = read_rows(path)?;
    Ok(PointCloudFrame::new(rows))
}

/// Reads a point table from a string.
///
/// Useful for testing without file I/O.
pub fn from_point_table_str(csv_str: &str) -> Result<PointCloudFrame, PandasetError> {
    from_point_table_slice(csv_str.as_bytes())
}

/// Reads a point table from raw bytes.
pub fn from_point_table_slice(bytes: &[u8]) -> Result<PointCloudFrame, PandasetError> {
    let rows: Vec<LidarPoint> = rows_from_reader(bytes, Path::new("<bytes>"))?;
    Ok(PointCloudFrame::new(rows))
}

/// Reads all cuboids of one frame.
pub fn read_cuboid_table(path: &Path) -> Result<Vec<CuboidRecord>, PandasetError> {
    let rows: Vec<CuboidRow> = read_rows(path)?;
    Ok(rows.into_iter().map(CuboidRecord::from).collect())
}

/// Reads a cuboid table from a string.
///
/// Useful for testing without file I/O.
pub fn from_cuboid_table_str(csv_str: &str) -> Result<Vec<CuboidRecord>, PandasetError> {
    let rows: Vec<CuboidRow> = rows_from_reader(csv_str.as_bytes(), Path::new("<string>"))?;
    Ok(rows.into_iter().map(CuboidRecord::from).collect())
}

/// Reads the per-point class ids of one frame.
pub fn read_semseg_table(path: &Path) -> Result<SemsegFrame, PandasetError> {
    let rows: Vec<SemsegRow> = read_rows(path)?;
    Ok(SemsegFrame::new(rows.into_iter().map(|row| row.class_id).collect()))
}

/// Reads a semantic segmentation table from a string.
///
/// Useful for testing without file I/O.
pub fn from_semseg_table_str(csv_str: &str) -> Result<SemsegFrame, PandasetError> {
    let rows: Vec<SemsegRow> = rows_from_reader(csv_str.as_bytes(), Path::new("<string>"))?;
    Ok(SemsegFrame::new(rows.into_iter().map(|row| row.class_id).collect()))
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PandasetError> {
    let file = File::open(path).map_err(PandasetError::Io)?;
    rows_from_reader(BufReader::new(file), path)
}

fn rows_from_reader<T: DeserializeOwned, R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<T>, PandasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: T = result.map_err(|source| PandasetError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}
