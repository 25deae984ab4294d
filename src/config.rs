//! TOML batch configuration: where raw pages live, where output goes, and
//! the list of documents to rewrite.
//!
//! ```toml
//! source = "../chakra-ui"
//! output = "../starter"
//!
//! [[docs]]
//! dsd = "alert"
//! chakra = "/website/pages/docs/feedback/alert.mdx"
//!
//! [rewrite]
//! ignored_elements = ["carbon-ad", "ComponentLinks"]
//! ignored_sections = [{ level = 2, title = "Props" }]
//! ```

use crate::document::RewriteOptions;
use crate::model::Document;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the raw documentation mirror
    pub source: Option<PathBuf>,
    /// Output root; one folder per document
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub docs: Vec<DocEntry>,
    #[serde(default)]
    pub rewrite: RewriteOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocEntry {
    pub dsd: String,
    pub chakra: String,
    /// Canonical name override; derived from `dsd` when absent
    pub name: Option<String>,
}

impl Config {
    /// Read and parse a config file. Relative `source`/`output` paths are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Config::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.source = config.source.map(|p| base.join(p));
        config.output = config.output.map(|p| base.join(p));
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }

    /// Documents to process, optionally restricted to slugs matching any of
    /// `only`.
    pub fn documents(&self, only: &[glob::Pattern]) -> Vec<Document> {
        self.docs
            .iter()
            .filter(|entry| only.is_empty() || only.iter().any(|p| p.matches(&entry.dsd)))
            .map(|entry| Document::new(&entry.dsd, &entry.chakra, entry.name.as_deref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionRule;

    const CONFIG: &str = r#"
source = "mirror"
output = "out"

[[docs]]
dsd = "alert"
chakra = "/docs/alert.mdx"

[[docs]]
dsd = "alert-dialog"
chakra = "/docs/alert-dialog.mdx"

[[docs]]
dsd = "tag"
chakra = "/docs/tag.mdx"
name = "Tag"
"#;

    #[test]
    fn parses_docs_map() {
        let config = Config::parse(CONFIG).unwrap();
        assert_eq!(config.source, Some(PathBuf::from("mirror")));
        let docs = config.documents(&[]);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[1].name, "AlertDialog");
        assert_eq!(docs[1].chakra, "/docs/alert-dialog.mdx");
    }

    #[test]
    fn default_rewrite_options() {
        let config = Config::parse(CONFIG).unwrap();
        assert!(config.rewrite.ignored_elements.contains(&"carbon-ad".to_string()));
        assert!(config.rewrite.ignored_sections.contains(&SectionRule::new(2, "Props")));
    }

    #[test]
    fn custom_rewrite_options() {
        let config = Config::parse(
            "[rewrite]\nignored_elements = [\"Hint\"]\nignored_sections = [{ level = 3, title = \"Theming\" }]\n",
        )
        .unwrap();
        assert_eq!(config.rewrite.ignored_elements, vec!["Hint"]);
        assert_eq!(config.rewrite.ignored_sections, vec![SectionRule::new(3, "Theming")]);
        assert!(config.docs.is_empty());
    }

    #[test]
    fn filters_by_glob() {
        let config = Config::parse(CONFIG).unwrap();
        let only = vec![glob::Pattern::new("alert*").unwrap()];
        let names: Vec<_> = config.documents(&only).into_iter().map(|d| d.dsd).collect();
        assert_eq!(names, vec!["alert", "alert-dialog"]);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::parse("sourc = \"typo\"").is_err());
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("playdoc.toml");
        fs::write(&path, CONFIG).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.output, Some(dir.path().join("out")));
    }
}
