use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use rand::Rng;

use crate::audio::error::AudioError;

pub const BLOB_PREFIX: &str = "blob:lessonbox/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Remote(String),
    Blob(String),
    File(PathBuf),
}

impl MediaSource {
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            MediaSource::Remote(url.to_string())
        } else if url.starts_with("blob:") {
            MediaSource::Blob(url.to_string())
        } else {
            MediaSource::File(PathBuf::from(url.strip_prefix("file://").unwrap_or(url)))
        }
    }
}

/// In-process `blob:` references. They do not survive a restart.
#[derive(Clone, Default, Debug)]
pub struct BlobRegistry {
    blobs: Arc<RwLock<HashMap<String, PathBuf>>>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, path: impl AsRef<Path>) -> String {
        let token: u64 = rand::rng().random();
        let reference = format!("{BLOB_PREFIX}{token:016x}");
        if let Ok(mut blobs) = self.blobs.write() {
            blobs.insert(reference.clone(), path.as_ref().to_path_buf());
        }
        reference
    }

    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        self.blobs.read().ok()?.get(reference).cloned()
    }

    /// Resolves any source to a local file path, or `None` for remote URLs.
    pub fn local_path(&self, source: &MediaSource) -> Result<Option<PathBuf>, AudioError> {
        match source {
            MediaSource::Remote(_) => Ok(None),
            MediaSource::Blob(reference) => self
                .resolve(reference)
                .map(Some)
                .ok_or_else(|| AudioError::SourceNotFound(reference.clone())),
            MediaSource::File(path) if path.is_file() => Ok(Some(path.clone())),
            MediaSource::File(path) => Err(AudioError::SourceNotFound(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sources() {
        assert_eq!(
            MediaSource::parse("https://cdn.example/a.mp3"),
            MediaSource::Remote("https://cdn.example/a.mp3".into())
        );
        assert!(matches!(MediaSource::parse("blob:lessonbox/00ff"), MediaSource::Blob(_)));
        assert_eq!(
            MediaSource::parse("file:///tmp/a.mp3"),
            MediaSource::File(PathBuf::from("/tmp/a.mp3"))
        );
    }

    #[test]
    fn blob_references_resolve_only_in_their_registry() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lesson.mp3");
        std::fs::write(&file, b"not really audio").unwrap();

        let registry = BlobRegistry::new();
        let reference = registry.register(&file);
        assert!(reference.starts_with(BLOB_PREFIX));

        let source = MediaSource::parse(&reference);
        assert_eq!(registry.local_path(&source), Ok(Some(file)));

        // A fresh registry stands in for a restarted process.
        let restarted = BlobRegistry::new();
        assert!(matches!(
            restarted.local_path(&source),
            Err(AudioError::SourceNotFound(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let registry = BlobRegistry::new();
        let source = MediaSource::parse("/definitely/not/here.mp3");
        assert!(registry.local_path(&source).is_err());
        assert_eq!(
            registry.local_path(&MediaSource::parse("http://x/a.mp3")),
            Ok(None)
        );
    }
}
