//! JSON companion files: poses, timestamps, intrinsics, classes and GPS.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::PandasetError;

/// Reads and deserializes a JSON document.
///
/// # Errors
/// Returns an error if the file cannot be opened or does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PandasetError> {
    let file = File::open(path).map_err(PandasetError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| PandasetError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserializes a JSON document from a string.
///
/// Useful for testing without file I/O.
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T, PandasetError> {
    serde_json::from_str(json).map_err(|source| PandasetError::JsonParse {
        path: Path::new("<string>").to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClassMap, GpsRecord, Pose};

    #[test]
    fn reads_pose_array() {
        let poses: Vec<Pose> = from_json_str(
            r#"[{"position":{"x":0,"y":0,"z":0},"heading":{"w":1,"x":0,"y":0,"z":0}},
                {"position":{"x":1,"y":2,"z":3},"heading":{"w":0,"x":1,"y":0,"z":0}}]"#,
        )
        .expect("parse poses");
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[1].position.z, 3.0);
        assert_eq!(poses[1].heading.x, 1.0);
    }

    #[test]
    fn reads_gps_and_classes() {
        let gps: Vec<GpsRecord> = from_json_str(
            r#"[{"lat":37.77,"long":-122.39,"height":2.95,"xvel":0.001,"yvel":0.16}]"#,
        )
        .expect("parse gps");
        assert_eq!(gps[0].long, -122.39);

        let classes: ClassMap =
            from_json_str(r#"{"1":"Smoke","2":"Exhaust"}"#).expect("parse classes");
        assert_eq!(classes.get("2").map(String::as_str), Some("Exhaust"));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = from_json_str::<Vec<f64>>("[1.0, oops]").expect_err("should fail");
        assert!(err.is_decode_error());
    }

    #[test]
    fn read_json_reports_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("timestamps.json");
        std::fs::write(&path, "{").expect("write");

        match read_json::<Vec<f64>>(&path) {
            Err(PandasetError::JsonParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
