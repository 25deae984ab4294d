//! Data model for a documentation batch: documents and the component catalog.

/// One documentation unit moving through load → rewrite → save.
#[derive(Debug, Default, Clone)]
pub struct Document {
    /// Canonical component identifier (e.g. "AlertDialog")
    pub name: String,
    /// Stable slug; names the output folder
    pub dsd: String,
    /// Legacy source path of the raw documentation page
    pub chakra: String,
    /// Raw documentation page (None when it could not be loaded)
    pub chakra_doc: Option<String>,
    /// Raw usage story
    pub story_doc: Option<String>,

    // -- Produced by the rewrite pass --
    /// Rewritten playground document (`doc/index.mdx`)
    pub dsd_doc: Option<String>,
    /// Rewritten story (`stories/index.stories.tsx`)
    pub story: Option<String>,
    /// Module export file (`src/index.ts`)
    pub index_ts: Option<String>,
    /// Root re-export file (`index.js`)
    pub index_js: Option<String>,
    /// Single-component re-export (`src/<Name>.tsx`)
    pub tsx: Option<String>,
}

impl Document {
    /// Create a document with its identity fields set. The canonical name is
    /// derived from the `dsd` slug unless one is given.
    pub fn new(dsd: &str, chakra: &str, name: Option<&str>) -> Self {
        Document {
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| component_name(dsd)),
            dsd: dsd.to_string(),
            chakra: chakra.to_string(),
            ..Default::default()
        }
    }
}

/// A known local component: canonical identifier plus the folder it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMeta {
    pub name: String,
    pub folder: String,
}

/// Registry of every component in the current batch.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: Vec<ComponentMeta>,
}

impl Catalog {
    /// Build the catalog once from the full document list.
    pub fn from_documents(docs: &[Document]) -> Self {
        Catalog {
            entries: docs
                .iter()
                .map(|doc| ComponentMeta {
                    name: doc.name.clone(),
                    folder: doc.dsd.clone(),
                })
                .collect(),
        }
    }

    pub fn from_entries(entries: Vec<ComponentMeta>) -> Self {
        Catalog { entries }
    }

    /// Exact-name lookup.
    pub fn find(&self, name: &str) -> Option<&ComponentMeta> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Derive a canonical component name from a slug or folder name.
///
/// Splits on `-`, `_`, `/`, `.` and whitespace, capitalizes every word and
/// joins them: "alert-dialog" → "AlertDialog", "circular_progress" →
/// "CircularProgress". Interior capitals are preserved ("iconButton" →
/// "IconButton").
pub fn component_name(slug: &str) -> String {
    slug.split(|c: char| c == '-' || c == '_' || c == '/' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
