//! Code-block rewriting: turn a fenced JSX sample into a playground element.
//!
//! Identifier discovery is pattern-based, not a JSX parse. Four shapes are
//! recognized:
//!
//! - component tags: `<Alert`
//! - the namespace sentinel tag: `<chakra.div`
//! - hook calls: ` useDisclosure(` (preceded by a space)
//! - component props: `as={FaGithub}`
//!
//! Names the sample declares itself (`function Example`, `const Card =`) are
//! not external and are left out.

use crate::classify::NAMESPACE;
use crate::interpolate::normalize_template_literals;
use regex::Regex;
use std::sync::LazyLock;

static RE_COMPONENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][A-Za-z0-9_]*)").unwrap());

static RE_NAMESPACE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"<({})\.", regex::escape(NAMESPACE))).unwrap());

static RE_HOOK_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (use[A-Z][A-Za-z0-9_]*)").unwrap());

static RE_AS_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"as=\{([A-Z][A-Za-z0-9_]*)\}").unwrap());

static RE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:function|class|const|let|var)\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

static RE_BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*$").unwrap());

/// Result of rewriting one code sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenBlock {
    /// Playground element replacing the fenced block
    pub text: String,
    /// Referenced identifiers, deduplicated, in order of first appearance
    pub identifiers: Vec<String>,
    /// Sample calls `render(` itself
    pub no_inline: bool,
}

/// Rewrite the body of a fenced code block (without the fence lines).
pub fn rewrite_block(raw: &str) -> RewrittenBlock {
    let identifiers = discover_identifiers(raw);
    let no_inline = raw.contains("render(");

    let code = normalize_template_literals(raw);
    let code = strip_blank_lines(&code);
    let code = escape_for_template(&code);

    RewrittenBlock {
        text: playground(&code, &identifiers, no_inline),
        identifiers,
        no_inline,
    }
}

/// Every identifier the sample references, in order of first appearance.
/// Names the sample declares itself are skipped so a local `Example`
/// component is never imported from a package.
pub fn discover_identifiers(code: &str) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = Vec::new();
    for re in [&*RE_COMPONENT_TAG, &*RE_NAMESPACE_TAG, &*RE_HOOK_CALL, &*RE_AS_PROP] {
        for caps in re.captures_iter(code) {
            if let Some(m) = caps.get(1) {
                found.push((m.start(), m.as_str()));
            }
        }
    }
    found.sort_by_key(|(pos, _)| *pos);

    let declared: Vec<&str> = RE_DECLARATION
        .captures_iter(code)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    let mut identifiers: Vec<String> = Vec::new();
    for (_, name) in found {
        if !declared.contains(&name) && !identifiers.iter().any(|n| n == name) {
            identifiers.push(name.to_string());
        }
    }
    identifiers
}

/// Escape code for the playground's backtick `code` literal. Backslashes go
/// first so the escapes of quoted strings survive one level of unescaping.
fn escape_for_template(code: &str) -> String {
    code.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn strip_blank_lines(code: &str) -> String {
    code.lines()
        .filter(|line| !RE_BLANK_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The playground element. `code` must already be escaped.
fn playground(code: &str, scope: &[String], no_inline: bool) -> String {
    let mut out = String::from("<Playground\n");
    if scope.is_empty() {
        out.push_str("  scope={{}}\n");
    } else {
        out.push_str(&format!("  scope={{{{ {} }}}}\n", scope.join(", ")));
    }
    if no_inline {
        out.push_str("  noInline\n");
    }
    out.push_str("  code={`\n");
    out.push_str(code);
    out.push_str("\n`}\n/>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_all_shapes_in_order() {
        let code = "function Example() {\n  const { isOpen } = useDisclosure()\n  return (\n    <Stack>\n      <chakra.span>hi</chakra.span>\n      <Button as={Link} leftIcon={<FaGithub />}>Go</Button>\n    </Stack>\n  )\n}";
        assert_eq!(
            discover_identifiers(code),
            vec!["useDisclosure", "Stack", "chakra", "Button", "Link", "FaGithub"]
        );
    }

    #[test]
    fn skips_names_declared_in_the_sample() {
        let code = "const Card = () => <Box />\nfunction useCount() {}\nconst n = useCount()\nrender(<Card />)";
        assert_eq!(discover_identifiers(code), vec!["Box"]);
    }

    #[test]
    fn dedups_repeated_tags() {
        let code = "<Stack>\n  <Alert status=\"error\" />\n  <Alert status=\"info\" />\n  <Alert status=\"success\" />\n</Stack>";
        let block = rewrite_block(code);
        assert_eq!(block.identifiers, vec!["Stack", "Alert"]);
        assert!(block.text.contains("scope={{ Stack, Alert }}"));
    }

    #[test]
    fn ignores_closing_tags_and_lowercase() {
        assert_eq!(discover_identifiers("<div><Box></Box></div>"), vec!["Box"]);
    }

    #[test]
    fn hook_needs_leading_space() {
        assert!(discover_identifiers("React.useState(0)").is_empty());
        assert_eq!(discover_identifiers("const t = useToast()"), vec!["useToast"]);
    }

    #[test]
    fn render_call_sets_no_inline() {
        let block = rewrite_block("const App = () => <Box />\nrender(<App />)");
        assert!(block.no_inline);
        assert!(block.text.contains("\n  noInline\n"));

        let block = rewrite_block("<Box />");
        assert!(!block.no_inline);
        assert!(!block.text.contains("noInline"));
    }

    #[test]
    fn strips_blank_lines() {
        let block = rewrite_block("<Box>\n\n   \n</Box>\n");
        assert_eq!(
            block.text,
            "<Playground\n  scope={{ Box }}\n  code={`\n<Box>\n</Box>\n`}\n/>"
        );
    }

    #[test]
    fn escapes_backticks_after_normalizing() {
        let block = rewrite_block("<Box w={`${w}px`} title={`plain`} />");
        assert!(block.text.contains("w={'' + w + 'px'}"));
        assert!(block.text.contains("title={\\`plain\\`}"));
    }

    #[test]
    fn quoted_string_escapes_survive_the_wrapper() {
        let block = rewrite_block("<Text>{`it's ${n}`}</Text>");
        assert!(block.text.contains(r"code={`
<Text>{'it\\'s ' + n + ''}</Text>
`}"), "got: {}", block.text);

        let block = rewrite_block("<Text>{`a\n${b}`}</Text>");
        assert!(block.text.contains(r"{'a\\n' + b + ''}"));
    }

    #[test]
    fn bare_interpolation_is_not_evaluated_by_the_wrapper() {
        let block = rewrite_block("<Text>${price}</Text>");
        assert!(block.text.contains(r"<Text>\${price}</Text>"));
    }

    #[test]
    fn empty_scope() {
        let block = rewrite_block("const x = 1");
        assert!(block.identifiers.is_empty());
        assert!(block.text.contains("scope={{}}"));
    }
}
