//! Gesture persistence.
//!
//! Whole-gesture granularity: the enrolled reference is saved after a
//! successful record and loaded once at startup. The file format is a
//! small magic/version header followed by the Postcard-serialized sample
//! sequence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::types::Gesture;
use crate::error::{Error, Result};

const MAGIC: [u8; 4] = *b"MUDR";
const VERSION: u8 = 1;

/// Whole-gesture persistence.
pub trait GestureStore: Send {
    /// Persist the gesture, replacing any previous one.
    fn save(&mut self, gesture: &Gesture) -> Result<()>;

    /// Load the persisted gesture, `None` when nothing is stored.
    fn load(&mut self) -> Result<Option<Gesture>>;

    /// Remove any persisted gesture.
    fn erase(&mut self) -> Result<()>;
}

/// File-backed gesture store.
#[derive(Debug, Clone)]
pub struct FileGestureStore {
    path: PathBuf,
}

impl FileGestureStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GestureStore for FileGestureStore {
    fn save(&mut self, gesture: &Gesture) -> Result<()> {
        let mut bytes = Vec::with_capacity(5 + gesture.len() * 12);
        bytes.extend_from_slice(&MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&postcard::to_stdvec(gesture)?);
        fs::write(&self.path, bytes)?;
        log::debug!("saved {} samples to {}", gesture.len(), self.path.display());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Gesture>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if bytes.len() < 5 || bytes[..4] != MAGIC {
            return Err(Error::InvalidFormat(format!(
                "{}: missing gesture header",
                self.path.display()
            )));
        }
        if bytes[4] != VERSION {
            return Err(Error::InvalidFormat(format!(
                "{}: unsupported version {}",
                self.path.display(),
                bytes[4]
            )));
        }

        let gesture: Gesture = postcard::from_bytes(&bytes[5..])?;
        Ok(Some(gesture))
    }

    fn erase(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryGestureStore {
    slot: Option<Gesture>,
}

impl MemoryGestureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GestureStore for MemoryGestureStore {
    fn save(&mut self, gesture: &Gesture) -> Result<()> {
        self.slot = Some(gesture.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Gesture>> {
        Ok(self.slot.clone())
    }

    fn erase(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}
