//! Consistency checks over a loaded sequence.
//!
//! Where [`Sequence::check_alignment`] stops at the first problem, validation
//! collects every issue into a [`ValidationReport`]:
//! - frame alignment across streams, including semseg rows per frame
//! - cuboid sensor ids, and sibling references for dual-LiDAR pairs
//! - semseg class ids missing from the class map
//! - pose headings that are not unit quaternions
//! - cameras whose frames, poses and timestamps disagree
//!
//! Only loaded streams are inspected.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashSet;

use crate::data::{ClassMap, CuboidRecord, Pose};
use crate::sequence::Sequence;
use crate::stream::{Camera, Cuboids, Lidar, SemanticSegmentation, Stream};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, warnings fail validation too.
    pub strict: bool,
}

impl ValidateOptions {
    /// Returns true if `report` passes under these options.
    pub fn accepts(&self, report: &ValidationReport) -> bool {
        if self.strict {
            report.is_clean()
        } else {
            report.is_ok()
        }
    }
}

/// Validates the loaded streams of `sequence`.
pub fn validate_sequence(sequence: &Sequence, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new(sequence.id());

    let lidar = sequence.lidar().filter(|lidar| lidar.is_loaded());
    if let Some(lidar) = lidar {
        validate_lidar(lidar, &mut report);
    }

    for camera in sequence.cameras().values().filter(|c| c.is_loaded()) {
        validate_camera(camera, &mut report);
    }

    if let Some(cuboids) = sequence.cuboids().filter(|c| c.is_loaded()) {
        if let Some(lidar) = lidar {
            check_frame_count(
                cuboids.name(),
                lidar.frame_count(),
                cuboids.frame_count(),
                &mut report,
            );
        }
        validate_cuboids(cuboids, &mut report);
    }

    if let Some(semseg) = sequence.semseg().filter(|s| s.is_loaded()) {
        validate_semseg(semseg, lidar, &mut report);
    }

    tracing::debug!(
        sequence = sequence.id(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        strict = opts.strict,
        "validated sequence"
    );

    report
}

fn validate_lidar(lidar: &Lidar, report: &mut ValidationReport) {
    let frames = lidar.frame_count();

    if let Ok(poses) = lidar.poses() {
        check_frame_count("lidar poses", frames, poses.len(), report);
        check_headings(lidar.name(), poses, report);
    }
    if let Ok(timestamps) = lidar.timestamps() {
        check_frame_count("lidar timestamps", frames, timestamps.len(), report);
    }
}

fn validate_camera(camera: &Camera, report: &mut ValidationReport) {
    let frames = camera.frame_count();
    let poses = camera.poses().map(<[Pose]>::len).ok();
    let timestamps = camera.timestamps().map(<[f64]>::len).ok();

    let mismatched = [poses, timestamps]
        .into_iter()
        .flatten()
        .any(|count| count != frames);
    if mismatched {
        report.add(ValidationIssue::warning(
            IssueCode::CameraCountMismatch,
            format!(
                "{frames} frame(s), {} pose(s), {} timestamp(s)",
                describe(poses),
                describe(timestamps)
            ),
            IssueContext::Stream {
                name: camera.name().to_string(),
            },
        ));
    }

    if let Ok(poses) = camera.poses() {
        check_headings(camera.name(), poses, report);
    }
}

fn validate_cuboids(cuboids: &Cuboids, report: &mut ValidationReport) {
    for index in 0..cuboids.frame_count() {
        let Ok(frame) = cuboids.get(index) else {
            continue;
        };

        let uuids: HashSet<&str> = frame.iter().map(|c| c.uuid.as_str()).collect();
        for cuboid in frame {
            check_cuboid(index, cuboid, &uuids, report);
        }
    }
}

fn check_cuboid(
    frame: usize,
    cuboid: &CuboidRecord,
    uuids: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    let context = || IssueContext::Cuboid {
        frame,
        uuid: cuboid.uuid.clone(),
    };

    if !matches!(cuboid.sensor_id, -1..=1) {
        report.add(ValidationIssue::error(
            IssueCode::InvalidCuboidSensorId,
            format!("sensor id {} (expected -1, 0 or 1)", cuboid.sensor_id),
            context(),
        ));
    }

    // Exported tables write "-" or leave the cell empty for no sibling.
    let sibling = cuboid.sibling_id.as_deref().filter(|id| !id.is_empty() && *id != "-");
    match sibling {
        Some(sibling) if sibling == cuboid.uuid => report.add(ValidationIssue::error(
            IssueCode::DanglingSiblingRef,
            format!("sibling '{sibling}' is the cuboid itself"),
            context(),
        )),
        Some(sibling) if !uuids.contains(sibling) => report.add(ValidationIssue::error(
            IssueCode::DanglingSiblingRef,
            format!("sibling '{sibling}' is not in the same frame"),
            context(),
        )),
        None if cuboid.has_sibling_sensor() => report.add(ValidationIssue::error(
            IssueCode::MissingSibling,
            format!("sensor id {} without a sibling", cuboid.sensor_id),
            context(),
        )),
        _ => {}
    }
}

fn validate_semseg(
    semseg: &SemanticSegmentation,
    lidar: Option<&Lidar>,
    report: &mut ValidationReport,
) {
    let name = semseg.name();

    if let Some(lidar) = lidar {
        check_frame_count(name, lidar.frame_count(), semseg.frame_count(), report);
    }

    let classes = semseg.classes().ok();
    for index in 0..semseg.frame_count() {
        let Ok(frame) = semseg.get(index) else {
            continue;
        };

        if let Some(points) = lidar.and_then(|lidar| lidar.raw(index).ok()) {
            if points.len() != frame.len() {
                report.add(ValidationIssue::error(
                    IssueCode::SemsegRowMismatch,
                    format!("{} label(s) for {} point(s)", frame.len(), points.len()),
                    IssueContext::Frame {
                        stream: name.to_string(),
                        index,
                    },
                ));
            }
        }

        if let Some(classes) = classes {
            check_class_ids(name, index, &frame.classes, classes, report);
        }
    }
}

/// Reports each unknown class id once per frame.
fn check_class_ids(
    stream: &str,
    index: usize,
    ids: &[String],
    classes: &ClassMap,
    report: &mut ValidationReport,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !classes.contains_key(id) && seen.insert(id.as_str()) {
            report.add(ValidationIssue::warning(
                IssueCode::UnknownClassId,
                format!("class id '{id}' has no name"),
                IssueContext::Frame {
                    stream: stream.to_string(),
                    index,
                },
            ));
        }
    }
}

fn check_headings(stream: &str, poses: &[Pose], report: &mut ValidationReport) {
    for (index, pose) in poses.iter().enumerate() {
        if !pose.is_normalized() {
            report.add(ValidationIssue::warning(
                IssueCode::NonUnitQuaternion,
                format!("heading norm {:.6}", pose.heading.norm()),
                IssueContext::Frame {
                    stream: stream.to_string(),
                    index,
                },
            ));
        }
    }
}

fn check_frame_count(stream: &str, expected: usize, found: usize, report: &mut ValidationReport) {
    if expected != found {
        report.add(ValidationIssue::error(
            IssueCode::MisalignedFrameCount,
            format!("{found} frame(s), expected {expected}"),
            IssueContext::Stream {
                name: stream.to_string(),
            },
        ));
    }
}

fn describe(count: Option<usize>) -> String {
    count.map_or_else(|| "no".to_string(), |count| count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const CUBOID_HEADER: &str = "uuid,label,yaw,stationary,camera_used,position.x,position.y,position.z,dimensions.x,dimensions.y,dimensions.z,attributes.object_motion,attributes.rider_status,attributes.pedestrian_behavior,attributes.pedestrian_age,cuboids.sensor_id,cuboids.sibling_id";

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, body).expect("write");
    }

    fn sequence_with_cuboids(rows: &str) -> (tempfile::TempDir, Sequence) {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("001");
        write(&root.join("lidar/00.csv"), "x,y,z,i,t,d\n0,0,0,1,0,0\n");
        write(
            &root.join("annotations/cuboids/00.csv"),
            &format!("{CUBOID_HEADER}\n{rows}"),
        );
        let mut sequence = Sequence::discover(&root).expect("discover");
        sequence.load().expect("load");
        (temp, sequence)
    }

    #[test]
    fn clean_sequence_has_no_issues() {
        let (_temp, sequence) = sequence_with_cuboids(
            "a,Car,0,False,0,0,0,0,1,1,1,Moving,,,,0,b\nb,Car,0,False,0,0,0,0,1,1,1,Moving,,,,1,a\n",
        );
        let report = validate_sequence(&sequence, &ValidateOptions::default());
        assert!(report.is_clean(), "{report}");
    }

    #[test]
    fn flags_dangling_sibling_and_bad_sensor_id() {
        let (_temp, sequence) = sequence_with_cuboids(
            "a,Car,0,False,0,0,0,0,1,1,1,Moving,,,,0,zzz\nc,Car,0,False,0,0,0,0,1,1,1,,,,,4,-\n",
        );
        let report = validate_sequence(&sequence, &ValidateOptions::default());

        assert_eq!(report.error_count(), 2);
        assert_eq!(report.with_code(IssueCode::DanglingSiblingRef).count(), 1);
        assert_eq!(report.with_code(IssueCode::InvalidCuboidSensorId).count(), 1);
    }

    #[test]
    fn flags_paired_cuboid_without_sibling() {
        let (_temp, sequence) = sequence_with_cuboids(
            "a,Car,0,False,0,0,0,0,1,1,1,Moving,,,,0,-\nb,Car,0,False,0,0,0,0,1,1,1,Moving,,,,1,\nc,Car,0,False,0,0,0,0,1,1,1,,,,,-1,-\n",
        );
        let report = validate_sequence(&sequence, &ValidateOptions::default());

        assert_eq!(report.error_count(), 2);
        assert_eq!(report.with_code(IssueCode::MissingSibling).count(), 2);
    }

    #[test]
    fn flags_cuboid_that_is_its_own_sibling() {
        let (_temp, sequence) =
            sequence_with_cuboids("s,Car,0,False,0,0,0,0,1,1,1,Moving,,,,1,s\n");
        let report = validate_sequence(&sequence, &ValidateOptions::default());

        assert!(!report.is_ok());
        let issues: Vec<_> = report.with_code(IssueCode::DanglingSiblingRef).collect();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("itself"), "{report}");
    }

    #[test]
    fn flags_semseg_mismatch_and_unknown_classes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("002");
        write(&root.join("lidar/00.csv"), "x,y,z,i,t,d\n0,0,0,1,0,0\n1,0,0,1,0,0\n");
        write(&root.join("annotations/semseg/00.csv"), "class\n1\n42\n42\n");
        write(&root.join("annotations/semseg/classes.json"), r#"{"1": "Smoke"}"#);

        let mut sequence = Sequence::discover(&root).expect("discover");
        sequence.load_lidar().expect("lidar");
        sequence.load_semseg().expect("semseg");

        let report = validate_sequence(&sequence, &ValidateOptions::default());
        assert_eq!(report.with_code(IssueCode::SemsegRowMismatch).count(), 1);
        assert_eq!(report.with_code(IssueCode::UnknownClassId).count(), 1);
    }

    #[test]
    fn flags_non_unit_headings_as_warnings() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("003");
        write(&root.join("lidar/00.csv"), "x,y,z,i,t,d\n0,0,0,1,0,0\n");
        write(
            &root.join("lidar/poses.json"),
            r#"[{"position":{"x":0,"y":0,"z":0},"heading":{"w":2,"x":0,"y":0,"z":0}}]"#,
        );

        let mut sequence = Sequence::discover(&root).expect("discover");
        sequence.load().expect("load");
        let report = validate_sequence(&sequence, &ValidateOptions::default());

        assert_eq!(report.warning_count(), 1);
        assert!(ValidateOptions::default().accepts(&report));
        assert!(!ValidateOptions { strict: true }.accepts(&report));
    }
}
