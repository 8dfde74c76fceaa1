//! Per-point semantic segmentation labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PandasetError;

/// Class id to class name mapping from `classes.json`, valid for a whole sequence.
pub type ClassMap = BTreeMap<String, String>;

/// Class ids of one LiDAR frame.
///
/// Entry `n` labels row `n` of the matching unfiltered point cloud frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SemsegFrame {
    pub classes: Vec<String>,
}

impl SemsegFrame {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolves every row's class id through `class_map`, in row order.
    pub fn class_names<'a>(&'a self, class_map: &'a ClassMap) -> Vec<Option<&'a str>> {
        self.classes
            .iter()
            .map(|id| class_map.get(id).map(String::as_str))
            .collect()
    }

    /// Returns the class ids at `indices`, e.g. the retained indices of a
    /// camera projection over the unfiltered frame.
    ///
    /// Fails on the first index past the last row.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<&str>, PandasetError> {
        indices
            .iter()
            .map(|&index| {
                self.classes
                    .get(index)
                    .map(String::as_str)
                    .ok_or(PandasetError::IndexOutOfRange {
                        index,
                        len: self.classes.len(),
                    })
            })
            .collect()
    }
}
