//! Save stage: write each document's artifacts under `<output>/<dsd>/`.

use crate::model::Document;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Artifact paths relative to the document folder, paired with their content.
pub fn artifacts(doc: &Document) -> Vec<(String, &str)> {
    [
        ("doc/index.mdx".to_string(), doc.dsd_doc.as_deref()),
        ("src/index.ts".to_string(), doc.index_ts.as_deref()),
        ("index.js".to_string(), doc.index_js.as_deref()),
        (format!("src/{}.tsx", doc.name), doc.tsx.as_deref()),
        ("stories/index.stories.tsx".to_string(), doc.story.as_deref()),
    ]
    .into_iter()
    .filter_map(|(path, content)| content.map(|c| (path, c)))
    .collect()
}

/// Write one document's artifacts. Artifacts that were not produced are skipped.
pub fn save_document(doc: &Document, output: &Path) -> Result<()> {
    let dir = output.join(&doc.dsd);
    for (relative, content) in artifacts(doc) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Save every document; one success flag per document.
pub fn save_all(docs: &[Document], output: &Path) -> Vec<bool> {
    docs.iter()
        .map(|doc| match save_document(doc, output) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(dsd = %doc.dsd, error = ?e, "error saving document");
                false
            }
        })
        .collect()
}

/// Write the batch-wide `index.ts`; nothing is written when it is empty.
pub fn save_batch_index(content: &str, output: &Path) -> Result<()> {
    if content.is_empty() {
        return Ok(());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;
    let path = output.join("index.ts");
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rendered() -> Document {
        Document {
            dsd_doc: Some("# Alert".into()),
            index_ts: Some("export * from './Alert';\n".into()),
            index_js: Some("export * from './src';\n".into()),
            tsx: Some("export { Alert } from '@chakra-ui/react';\n".into()),
            ..Document::new("alert", "/docs/alert.mdx", None)
        }
    }

    #[test]
    fn writes_produced_artifacts_only() {
        let dir = TempDir::new().unwrap();
        save_document(&rendered(), dir.path()).unwrap();

        let root = dir.path().join("alert");
        assert_eq!(fs::read_to_string(root.join("doc/index.mdx")).unwrap(), "# Alert");
        assert!(root.join("src/index.ts").exists());
        assert!(root.join("src/Alert.tsx").exists());
        assert!(root.join("index.js").exists());
        assert!(!root.join("stories/index.stories.tsx").exists());
    }

    #[test]
    fn save_all_reports_failures() {
        let dir = TempDir::new().unwrap();
        // A file where the output directory should be
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "").unwrap();
        let results = save_all(&[rendered()], &blocked);
        assert_eq!(results, vec![false]);

        let results = save_all(&[rendered()], dir.path());
        assert_eq!(results, vec![true]);
    }

    #[test]
    fn empty_batch_index_is_not_written() {
        let dir = TempDir::new().unwrap();
        save_batch_index("", dir.path()).unwrap();
        assert!(!dir.path().join("index.ts").exists());
        save_batch_index("export { Box } from '@chakra-ui/react';\n", dir.path()).unwrap();
        assert!(dir.path().join("index.ts").exists());
    }
}
