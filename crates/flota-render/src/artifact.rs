//! Export artifacts and delivery sinks.
//!
//! The sink is the stand-in for the browser download: renderers produce a
//! complete in-memory artifact, and delivery is a separate, final step.

use std::fs;
use std::io;
use std::path::PathBuf;

/// A fully rendered export file, ready for delivery.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Destination for finished artifacts.
pub trait ArtifactSink {
    fn deliver(&mut self, artifact: ExportArtifact) -> io::Result<()>;
}

/// Writes artifacts into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }
}

impl ArtifactSink for FileSink {
    fn deliver(&mut self, artifact: ExportArtifact) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.filename);
        fs::write(&path, &artifact.bytes)?;
        self.written.push(path);
        Ok(())
    }
}

/// Collects artifacts in memory; used by tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<ExportArtifact>,
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, artifact: ExportArtifact) -> io::Result<()> {
        self.artifacts.push(artifact);
        Ok(())
    }
}
