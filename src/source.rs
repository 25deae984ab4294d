//! Load stage: fill each document's raw page and story from a local mirror.

use crate::model::Document;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Body served by the mirror when a download failed.
pub const NOT_FOUND: &str = "404: Not Found";

/// Anything that can hand out raw files by mirror-relative path.
pub trait DocumentSource {
    /// `None` when the file is missing or unusable.
    fn fetch(&self, path: &str) -> Option<String>;
}

/// Raw files on disk under `root`.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }
}

impl DocumentSource for DirSource {
    fn fetch(&self, path: &str) -> Option<String> {
        let full = self.root.join(path.trim_start_matches('/'));
        match fs::read_to_string(&full) {
            Ok(content) if content.trim() == NOT_FOUND => {
                tracing::debug!(path = %full.display(), "mirror holds a not-found page");
                None
            }
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %full.display(), "no such file");
                None
            }
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "failed to read source file");
                None
            }
        }
    }
}

/// Mirror path of a component's story.
pub fn story_path(dsd: &str) -> String {
    format!("/packages/{dsd}/stories/{dsd}.stories.tsx")
}

/// Populate the raw fields of every document.
pub fn load(docs: &mut [Document], source: &impl DocumentSource) {
    for doc in docs.iter_mut() {
        doc.chakra_doc = source.fetch(&doc.chakra);
        doc.story_doc = source.fetch(&story_path(&doc.dsd));
        if doc.chakra_doc.is_none() {
            tracing::warn!(dsd = %doc.dsd, path = %doc.chakra, "no documentation page");
        }
    }
}
