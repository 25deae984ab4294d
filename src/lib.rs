//! playdoc: rewrite component documentation pages into playground MDX.
//!
//! The engine takes raw pages (markdown with embedded JSX samples) and a
//! catalog of the components in the batch, and produces:
//!
//! - the rewritten page, with every `jsx`/`tsx` sample wrapped in a
//!   `<Playground>` element and the imports its scope needs
//! - the rewritten usage story
//! - small index modules re-exporting the component and the framework
//!   symbols its samples use
//!
//! Loading raw pages ([`source`]) and writing artifacts ([`sink`]) are
//! separate stages driven by the `playdoc` binary.

pub mod batch;
pub mod block;
pub mod classify;
pub mod config;
pub mod document;
pub mod imports;
pub mod interpolate;
pub mod model;
pub mod sink;
pub mod source;
pub mod story;

pub use batch::{process_batch, process_document};
pub use classify::{classify, Bucket, Package};
pub use document::{rewrite_document, DocumentRewriter, RewriteOptions};
pub use imports::{BatchAccumulator, ImportSet};
pub use model::{Catalog, ComponentMeta, Document};
pub use story::rewrite_story;
