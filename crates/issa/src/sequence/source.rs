//! Where sequences come from.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{Result, Sequence, SequenceId, parse_bfile};

/// Something that can look up a sequence by id.
///
/// `Ok(None)` means the id is well-formed but there is no such sequence;
/// `Err` is reserved for failures while reading it.
pub trait SequenceSource {
    fn fetch(&self, id: &SequenceId) -> Result<Option<Sequence>>;
}

/// A directory of downloaded b-files named `bNNNNNN.txt`.
#[derive(Debug, Clone)]
pub struct BFileDirectory {
    root: PathBuf,
}

impl BFileDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the b-file for `id` is expected to be.
    pub fn path_for(&self, id: &SequenceId) -> PathBuf {
        self.root.join(id.bfile_name())
    }
}

impl SequenceSource for BFileDirectory {
    fn fetch(&self, id: &SequenceId) -> Result<Option<Sequence>> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let seq = parse_bfile(Some(*id), &text);
                debug!("read {} terms of {} from {}", seq.len(), id, path.display());
                Ok(Some(seq))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("no b-file at {}, so '{}' is likely not downloaded or does not exist", path.display(), id);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Sequences held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sequences: HashMap<SequenceId, Sequence>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sequence under its own id (replacing any previous one).
    ///
    /// Sequences without an id are ignored, since they could never be fetched.
    pub fn insert(&mut self, sequence: Sequence) {
        if let Some(id) = sequence.id {
            self.sequences.insert(id, sequence);
        }
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl SequenceSource for MemorySource {
    fn fetch(&self, id: &SequenceId) -> Result<Option<Sequence>> {
        Ok(self.sequences.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bfile_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b001057.txt"), "0 0\n1 1\n2 -1\n3 2\n4 -2\n").unwrap();

        let source = BFileDirectory::new(dir.path());
        let id: SequenceId = "A001057".parse().unwrap();
        let seq = source.fetch(&id).unwrap().expect("sequence present");

        assert_eq!(seq.id, Some(id));
        assert_eq!(seq.values(), vec![0, 1, -1, 2, -2]);
    }

    #[test]
    fn missing_bfile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = BFileDirectory::new(dir.path());
        let id = SequenceId::new(0).unwrap();
        assert!(source.fetch(&id).unwrap().is_none());
        assert_eq!(source.root(), dir.path());
        assert_eq!(source.path_for(&id), dir.path().join("b000000.txt"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let id = SequenceId::new(12).unwrap();
        // A directory where the file should be cannot be read as text.
        fs::create_dir(dir.path().join(id.bfile_name())).unwrap();
        let source = BFileDirectory::new(dir.path());
        assert!(source.fetch(&id).is_err());
    }

    #[test]
    fn memory_source_round_trip() {
        let id = SequenceId::new(27).unwrap();
        let mut source = MemorySource::new();
        source.insert(Sequence::from_values(Some(id), 1, &[1, 2, 3]));
        source.insert(Sequence::from_values(None, 0, &[9]));

        assert_eq!(source.len(), 1);
        assert_eq!(source.fetch(&id).unwrap().unwrap().values(), vec![1, 2, 3]);
        assert!(source.fetch(&SequenceId::new(28).unwrap()).unwrap().is_none());
    }
}
