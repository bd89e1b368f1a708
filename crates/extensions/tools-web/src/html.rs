//! HTML to plain text reduction.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    script: Regex,
    style: Regex,
    comment: Regex,
    block_break: Regex,
    tag: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        script: Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap(),
        style: Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap(),
        comment: Regex::new(r"(?s)<!--.*?-->").unwrap(),
        block_break: Regex::new(r"(?i)<(?:br|/p|/div|/li|/tr|/h[1-6]|/section|/article)\b[^>]*>").unwrap(),
        tag: Regex::new(r"<[^>]*>").unwrap(),
    })
}

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<".
    ("&amp;", "&"),
];

/// Reduce an HTML document to readable text.
///
/// Drops `script`, `style` and comment blocks, turns block-level closings into
/// line breaks, strips the remaining tags, decodes common entities, and keeps
/// only non-blank trimmed lines. Runs of two or more spaces split a line.
pub fn html_to_text(html: &str) -> String {
    let p = patterns();

    let text = p.script.replace_all(html, "");
    let text = p.style.replace_all(&text, "");
    let text = p.comment.replace_all(&text, "");
    let text = p.block_break.replace_all(&text, "\n");
    let text = p.tag.replace_all(&text, "");

    let mut decoded = text.into_owned();
    for (entity, replacement) in ENTITIES {
        decoded = decoded.replace(entity, replacement);
    }

    decoded
        .lines()
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
