//! Whole-document rewriting.
//!
//! Passes run in a fixed order over the raw page:
//!
//! 1. front matter → `# Title`
//! 2. ignored inline elements removed
//! 3. ignored sections removed
//! 4. template literals normalized
//! 5. `jsx`/`tsx` fences → playground elements
//!
//! Each pass is independent: when its markup is missing or malformed it
//! leaves the text as it found it.

use crate::block::rewrite_block;
use crate::classify::classify;
use crate::imports::{BatchAccumulator, Buckets};
use crate::interpolate::normalize_template_literals;
use crate::model::Catalog;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::sync::LazyLock;

/// Header lines every rewritten document carries after its imports.
pub const BOILERPLATE: &str = "\
import * as React from 'react';
import { Meta } from '@storybook/addon-docs/blocks';
import { Playground } from '../../.storybook/components/Playground';
import Layout from '../../.storybook/components/Layout';

export default Layout;";

static RE_FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\s*---[ \t]*\r?\n(.*?)\r?\n---[ \t]*").unwrap());

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^title:[ \t]*(.+?)[ \t]*\r?$").unwrap());

static RE_CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```(?:jsx|tsx)\b[^\n]*\n(.*?)^```[ \t]*$").unwrap()
});

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*?)[ \t#]*$").unwrap());

/// A section to drop: heading level (number of `#`) and exact heading text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionRule {
    pub level: usize,
    pub title: String,
}

impl SectionRule {
    pub fn new(level: usize, title: &str) -> Self {
        SectionRule {
            level,
            title: title.to_string(),
        }
    }
}

/// Configurable rule lists for the removal passes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Inline elements with no playground counterpart
    pub ignored_elements: Vec<String>,
    pub ignored_sections: Vec<SectionRule>,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            ignored_elements: vec![
                "carbon-ad".to_string(),
                "ComponentLinks".to_string(),
                "PropsTable".to_string(),
            ],
            ignored_sections: vec![SectionRule::new(2, "Props"), SectionRule::new(3, "Props")],
        }
    }
}

/// Rewrites documents against one catalog and rule set.
pub struct DocumentRewriter<'a> {
    catalog: &'a Catalog,
    element_patterns: Vec<Regex>,
    sections: &'a [SectionRule],
}

impl<'a> DocumentRewriter<'a> {
    pub fn new(catalog: &'a Catalog, options: &'a RewriteOptions) -> Self {
        let element_patterns = options
            .ignored_elements
            .iter()
            .filter_map(|name| element_pattern(name))
            .collect();
        DocumentRewriter {
            catalog,
            element_patterns,
            sections: &options.ignored_sections,
        }
    }

    /// Rewrite one raw document. Identifiers found in its code samples land
    /// in a fresh set of per-document buckets and in `acc`.
    pub fn rewrite(&self, raw: &str, acc: &mut BatchAccumulator) -> String {
        let mut buckets = Buckets::default();

        let text = extract_title(raw);
        let text = self.remove_elements(&text);
        let text = remove_sections(&text, self.sections);
        let text = normalize_template_literals(&text);
        let body = RE_CODE_FENCE.replace_all(&text, |caps: &Captures| {
            let block = rewrite_block(&caps[1]);
            for identifier in &block.identifiers {
                let bucket = classify(identifier, self.catalog);
                tracing::trace!(%identifier, ?bucket, "classified");
                buckets.add(identifier, &bucket);
                acc.record(identifier, &bucket);
            }
            block.text
        });

        let imports = buckets.import_lines();
        tracing::debug!(imports = imports.len(), "assembled document header");
        format!("{}\n\n{}\n\n{}", imports.join("\n"), BOILERPLATE, body)
            .trim()
            .to_string()
    }

    fn remove_elements(&self, text: &str) -> String {
        self.element_patterns
            .iter()
            .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
    }
}

/// Rewrite with the default rule lists.
pub fn rewrite_document(raw: &str, catalog: &Catalog, acc: &mut BatchAccumulator) -> String {
    let options = RewriteOptions::default();
    DocumentRewriter::new(catalog, &options).rewrite(raw, acc)
}

/// Replace leading front matter with a `# Title` heading. Front matter
/// without a `title:` field, or no front matter at all, is left unchanged.
pub fn extract_title(text: &str) -> String {
    let Some(caps) = RE_FRONT_MATTER.captures(text) else {
        return text.to_string();
    };
    let (Some(block), Some(fields)) = (caps.get(0), caps.get(1)) else {
        return text.to_string();
    };
    let Some(title) = RE_TITLE.captures(fields.as_str()) else {
        return text.to_string();
    };
    let title: String = title[1].chars().filter(|c| *c != '"' && *c != '\'').collect();
    format!("# {}{}", title.trim(), &text[block.end()..])
}

/// `<name .../>` when the opening tag closes itself, otherwise `<name ...>`
/// through its `</name>`. An opening tag with neither is left alone.
fn element_pattern(name: &str) -> Option<Regex> {
    let name = regex::escape(name);
    match Regex::new(&format!(r"(?s)<{name}\b(?:[^>]*/>|.*?</{name}\s*>)")) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(element = %name, error = %e, "skipping unusable ignored element");
            None
        }
    }
}

/// Drop every section whose heading matches a rule, up to the next heading
/// of equal or higher level. Lines inside code fences are never headings.
pub fn remove_sections(text: &str, rules: &[SectionRule]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut skipping: Option<usize> = None;
    let mut in_fence = false;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if !in_fence {
            if let Some((level, title)) = heading(trimmed) {
                if skipping.is_some_and(|open| level <= open) {
                    skipping = None;
                }
                if skipping.is_none() && rules.iter().any(|r| r.level == level && r.title == title) {
                    skipping = Some(level);
                    continue;
                }
            }
        }
        if trimmed.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        if skipping.is_none() {
            out.push_str(line);
        }
    }
    out
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let caps = RE_HEADING.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let title = caps.get(2)?.as_str();
    Some((level, title))
}
