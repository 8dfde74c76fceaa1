//! A dataset root holding one folder per sequence.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::directory::subdirectories;
use crate::error::PandasetError;
use crate::sequence::Sequence;

/// Every sequence under a dataset root, keyed by folder name.
///
/// Opening a dataset only resolves structure. Payloads are loaded per
/// sequence, and [`Dataset::unload`] drops a whole sequence so that a
/// load, process, unload loop over all ids keeps one sequence resident at a
/// time.
#[derive(Debug)]
pub struct Dataset {
    root: PathBuf,
    sequences: BTreeMap<String, Sequence>,
}

impl Dataset {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, PandasetError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(PandasetError::LayoutInvalid {
                path: root.to_path_buf(),
                message: "dataset root is not a directory".to_string(),
            });
        }

        let mut sequences = BTreeMap::new();
        for dir in subdirectories(root)? {
            let sequence = Sequence::discover(&dir)?;
            sequences.insert(sequence.id().to_string(), sequence);
        }

        tracing::debug!(root = %root.display(), sequences = sequences.len(), "opened dataset");

        Ok(Self {
            root: root.to_path_buf(),
            sequences,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sequence_ids(&self) -> BTreeSet<&str> {
        self.sequences.keys().map(String::as_str).collect()
    }

    /// Ids of the sequences that carry semantic segmentation.
    pub fn sequence_ids_with_semseg(&self) -> BTreeSet<&str> {
        self.sequences
            .iter()
            .filter(|(_, sequence)| sequence.has_semseg())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Sequence, PandasetError> {
        self.sequences
            .get(id)
            .ok_or_else(|| PandasetError::UnknownSequence(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Sequence, PandasetError> {
        self.sequences
            .get_mut(id)
            .ok_or_else(|| PandasetError::UnknownSequence(id.to_string()))
    }

    /// Removes sequence `id` from the dataset, dropping everything it holds.
    pub fn unload(&mut self, id: &str) -> Result<(), PandasetError> {
        if self.sequences.remove(id).is_none() {
            return Err(PandasetError::UnknownSequence(id.to_string()));
        }
        tracing::debug!(sequence = id, "dropped sequence");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sequence)> {
        self.sequences.iter().map(|(id, sequence)| (id.as_str(), sequence))
    }
}
