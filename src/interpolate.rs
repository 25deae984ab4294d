//! Template-literal normalization.
//!
//! Playground code is itself embedded in a backtick literal, so backtick
//! strings with `${...}` interpolation are rewritten into quoted-string
//! concatenation: `` `width: ${w}px` `` → `'width: ' + w + 'px'`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A backtick string, or a run of backticks (a code fence) that is skipped.
/// Matches pair up left to right.
static RE_TEMPLATE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``+|`([^`]*)`").unwrap());

static RE_INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").unwrap());

/// Rewrite every interpolating template literal in `input`. Literals without
/// interpolation are left alone.
pub fn normalize_template_literals(input: &str) -> String {
    RE_TEMPLATE_LITERAL
        .replace_all(input, |caps: &Captures| {
            match caps.get(1) {
                Some(body) if body.as_str().contains("${") => to_concatenation(body.as_str()),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn to_concatenation(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 8);
    out.push('\'');
    let mut last = 0;
    for caps in RE_INTERPOLATION.captures_iter(body) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_literal(&body[last..whole.start()]));
        out.push_str("' + ");
        out.push_str(caps[1].trim());
        out.push_str(" + '");
        last = whole.end();
    }
    out.push_str(&escape_literal(&body[last..]));
    out.push('\'');
    out
}

/// Make literal text safe inside single quotes.
fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}
