//! Turns the free-text analysis returned by the compare endpoint into
//! display blocks: `**Heading**` markers become headings, lines starting
//! with `*` or `•` become bullets, everything else is a paragraph.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Bullet(String),
    Paragraph(String),
}

fn heading_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("heading pattern is valid"))
}

/// Split `text` into alternating plain/heading segments and expand the
/// plain ones into bullets and paragraphs.
pub fn format_analysis(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for caps in heading_marker().captures_iter(text) {
        let (Some(whole), Some(title)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&text[last..whole.start()], &mut blocks);
        blocks.push(Block::Heading(title.as_str().to_string()));
        last = whole.end();
    }
    push_plain(&text[last..], &mut blocks);

    blocks
}

fn push_plain(segment: &str, blocks: &mut Vec<Block>) {
    for line in segment.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.strip_prefix('*').or_else(|| line.strip_prefix('•')) {
            Some(rest) => blocks.push(Block::Bullet(rest.trim_start().to_string())),
            None => blocks.push(Block::Paragraph(line.to_string())),
        }
    }
}
