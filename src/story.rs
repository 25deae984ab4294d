//! Story rewriting: point a component's usage story at the new packages.
//!
//! Relative `../src`-style imports are split into a self import (the
//! documented component, still served by the local module) and one combined
//! framework import for everything else. The default export gets the theme
//! decorator.

use crate::classify::Package;
use crate::imports::{package_template, render, ImportSet};
use crate::model::Document;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const DECORATOR_IMPORT: &str = "import { withTheme } from '../../.storybook/decorators';";
pub const DECORATOR_ENTRY: &str = "  decorators: [withTheme],";
/// Module the story imports its own component from.
pub const SELF_MODULE: &str = "../src";

static RE_DECORATOR_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^[ \t]*{}[ \t]*\r?\n?", regex::escape(DECORATOR_IMPORT))).unwrap()
});

static RE_LOCAL_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s*\{([^}]*)\}\s*from\s*["'](\.\.?/[^"']*\bsrc\b[^"']*)["'];?[ \t]*\r?\n?"#)
        .unwrap()
});

static RE_EXPORT_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\s+\{[ \t]*(\r?\n)?").unwrap());

static RE_DECORATORS_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*decorators\s*:").unwrap());

/// Rewrite the document's story, or `None` when it has no story source.
pub fn rewrite_story(doc: &Document) -> Option<String> {
    let story = doc.story_doc.as_deref()?;
    Some(rewrite_story_source(story, &doc.name))
}

/// Rewrite story source for the component named `name`.
pub fn rewrite_story_source(story: &str, name: &str) -> String {
    let text = RE_DECORATOR_IMPORT.replace_all(story, "");
    let text = rewrite_imports(&text, name);
    let text = inject_decorator(&text);
    format!("{}\n{}", DECORATOR_IMPORT, text)
}

/// Replace every relative `src` import with the partitioned pair. The new
/// lines take the place of the first match; later matches are dropped.
fn rewrite_imports(text: &str, name: &str) -> String {
    let mut own = ImportSet::default();
    let mut external = ImportSet::default();
    for caps in RE_LOCAL_IMPORT.captures_iter(text) {
        for identifier in caps[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if identifier == name {
                own.insert(identifier);
            } else {
                external.insert(identifier);
            }
        }
    }

    let replacement: String = [
        render(&own, &format!("import {{ {{}} }} from '{}';", SELF_MODULE)),
        render(&external, &package_template(Package::Core)),
    ]
    .iter()
    .filter(|line| !line.is_empty())
    .map(|line| format!("{line}\n"))
    .collect();

    let mut first = true;
    RE_LOCAL_IMPORT
        .replace_all(text, |_: &Captures| {
            if first {
                first = false;
                replacement.clone()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Add the decorator entry to the default export unless it declares its own.
fn inject_decorator(text: &str) -> String {
    let Some(m) = RE_EXPORT_DEFAULT.find(text) else {
        return text.to_string();
    };
    let object_end = closing_brace(text, m.end()).unwrap_or(text.len());
    if RE_DECORATORS_KEY.is_match(&text[m.end()..object_end]) {
        return text.to_string();
    }
    let entry = if m.as_str().ends_with('\n') {
        format!("{DECORATOR_ENTRY}\n")
    } else {
        format!("\n{DECORATOR_ENTRY}\n")
    };
    format!("{}{}{}", &text[..m.end()], entry, &text[m.end()..])
}

/// Offset of the `}` closing an object whose body starts at `from`.
fn closing_brace(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in text[from..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + i);
                }
            }
            _ => {}
        }
    }
    None
}
