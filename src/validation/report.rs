//! Structured validation results.
//!
//! Reports can be printed for people or serialized to JSON for tooling.

use std::fmt;

use serde::Serialize;

/// Every issue found while validating one sequence.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Id of the validated sequence.
    pub sequence: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            issues: Vec::new(),
        }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all, which is what strict
    /// mode requires.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues carrying `code`.
    pub fn with_code(&self, code: IssueCode) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.code == code)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Sequence {}: no issues found", self.sequence);
        }

        writeln!(
            f,
            "Sequence {}: {} error(s) and {} warning(s):",
            self.sequence,
            self.error_count(),
            self.warning_count()
        )?;

        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }

        Ok(())
    }
}

/// A single validation issue.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Stable code for filtering and tooling.
    pub code: IssueCode,
    pub message: String,
    /// Where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Suspicious but usable data.
    Warning,
    /// Data that breaks frame alignment or references.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    // Alignment
    /// A stream's frame count disagrees with the LiDAR frame count.
    MisalignedFrameCount,
    /// A semseg frame does not label every raw LiDAR row.
    SemsegRowMismatch,
    /// A camera's frames, poses and timestamps have different lengths.
    CameraCountMismatch,

    // Annotations
    /// A cuboid's `sensor_id` is not -1, 0 or 1.
    InvalidCuboidSensorId,
    /// A cuboid names a sibling that is not another cuboid of the same frame.
    DanglingSiblingRef,
    /// A cuboid seen by one LiDAR of the overlap has no sibling.
    MissingSibling,
    /// A semseg class id has no entry in `classes.json`.
    UnknownClassId,

    // Poses
    /// A pose heading is not a unit quaternion.
    NonUnitQuaternion,
}

/// Where a validation issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// The sequence as a whole.
    Sequence,
    /// A whole stream, e.g. `front_camera`.
    Stream { name: String },
    /// One frame of a stream.
    Frame { stream: String, index: usize },
    /// One cuboid of one frame.
    Cuboid { frame: usize, uuid: String },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Sequence => write!(f, "sequence"),
            IssueContext::Stream { name } => write!(f, "{name}"),
            IssueContext::Frame { stream, index } => write!(f, "{stream} frame {index}"),
            IssueContext::Cuboid { frame, uuid } => write!(f, "cuboid {uuid} in frame {frame}"),
        }
    }
}
