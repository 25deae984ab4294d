//! Batch pipeline: rewrite every document and produce its artifacts.
//!
//! Documents are processed one at a time against a shared
//! [`BatchAccumulator`]. After a document's artifacts are captured the
//! accumulator is reset, so the next document's `src/index.ts` only
//! re-exports its own framework symbols.

use crate::classify::Package;
use crate::document::{DocumentRewriter, RewriteOptions};
use crate::imports::{BatchAccumulator, SharedBuckets};
use crate::model::{Catalog, Document};
use crate::story::rewrite_story;

/// `src/index.ts`: the component module plus re-exports of the shared buckets.
pub fn module_index(name: &str, shared: &SharedBuckets) -> String {
    let mut lines = vec![format!("export * from './{}';", name)];
    lines.extend(shared.re_export_lines());
    lines.join("\n") + "\n"
}

/// `index.js` at the package root.
pub fn root_index() -> String {
    "export * from './src';\n".to_string()
}

/// `src/<Name>.tsx`: the framework component re-exported under its own name.
pub fn component_module(name: &str) -> String {
    format!("export {{ {} }} from '{}';\n", name, Package::Core.module())
}

/// Root `index.ts` summarizing every shared symbol used across the batch.
pub fn batch_index(totals: &SharedBuckets) -> String {
    let lines = totals.re_export_lines();
    if lines.is_empty() {
        return String::new();
    }
    lines.join("\n") + "\n"
}

/// Rewrite one document in place. Does not reset `acc`.
pub fn process_document(
    doc: &mut Document,
    rewriter: &DocumentRewriter<'_>,
    acc: &mut BatchAccumulator,
) {
    let raw = doc.chakra_doc.as_deref().unwrap_or_default();
    doc.dsd_doc = Some(rewriter.rewrite(raw, acc));
    doc.story = rewrite_story(doc);
    doc.index_ts = Some(module_index(&doc.name, acc.current()));
    doc.index_js = Some(root_index());
    doc.tsx = Some(component_module(&doc.name));

    tracing::debug!(
        dsd = %doc.dsd,
        core = acc.current().core.len(),
        icons = acc.current().icons.len(),
        input = acc.current().input.len(),
        story = doc.story.is_some(),
        "processed document"
    );
}

/// Rewrite every document, resetting shared state between them. Returns the
/// batch index content.
pub fn process_batch(docs: &mut [Document], options: &RewriteOptions) -> String {
    let catalog = Catalog::from_documents(docs);
    let rewriter = DocumentRewriter::new(&catalog, options);
    let mut acc = BatchAccumulator::new();

    tracing::info!(documents = docs.len(), "rewriting batch");
    for doc in docs.iter_mut() {
        process_document(doc, &rewriter, &mut acc);
        acc.reset();
    }
    batch_index(&acc.totals())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::ImportSet;

    #[test]
    fn module_index_without_shared_symbols() {
        assert_eq!(
            module_index("Alert", &SharedBuckets::default()),
            "export * from './Alert';\n"
        );
    }

    #[test]
    fn module_index_with_shared_symbols() {
        let shared = SharedBuckets {
            core: ["Box", "Stack"].into_iter().collect::<ImportSet>(),
            icons: ["PhoneIcon"].into_iter().collect(),
            input: ImportSet::default(),
        };
        assert_eq!(
            module_index("Alert", &shared),
            "export * from './Alert';\n\
             export { PhoneIcon } from '@chakra-ui/icons';\n\
             export { Box, Stack } from '@chakra-ui/react';\n"
        );
    }

    #[test]
    fn component_module_re_exports_framework_component() {
        assert_eq!(
            component_module("Alert"),
            "export { Alert } from '@chakra-ui/react';\n"
        );
    }

    #[test]
    fn missing_doc_and_story() {
        let mut docs = vec![Document::new("alert", "/docs/alert.mdx", None)];
        let index = process_batch(&mut docs, &RewriteOptions::default());
        let doc = &docs[0];
        assert_eq!(doc.dsd_doc.as_deref(), Some(crate::document::BOILERPLATE));
        assert_eq!(doc.story, None);
        assert_eq!(doc.index_js.as_deref(), Some("export * from './src';\n"));
        assert_eq!(index, "");
    }
}
