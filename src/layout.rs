use crossterm::style::Color;
use once_cell::sync::Lazy;
use regex::Regex;
use textwrap::{Options as WrapOptions, WordSeparator, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use crate::style;

pub const MIN_COMMENT_WIDTH: usize = 40;

const BAR: &str = "▎";
const DEPTH_COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

static ESCAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("valid escape sequence regex")
});

pub fn depth_color(level: usize) -> Color {
    DEPTH_COLORS[level.saturating_sub(1) % DEPTH_COLORS.len()]
}

// A `comment_width` of 0 follows the screen. The result never drops below
// MIN_COMMENT_WIDTH.
pub fn adjusted_width(
    level: usize,
    indent_size: usize,
    comment_width: usize,
    screen_width: usize,
) -> usize {
    let indent = indent_size.saturating_mul(level);
    let usable = screen_width.saturating_sub(indent);

    if comment_width == 0 || usable < comment_width {
        return usable.max(MIN_COMMENT_WIDTH);
    }

    comment_width.saturating_add(indent)
}

pub fn indent_block(level: usize, indent_size: usize) -> String {
    if level == 0 {
        return String::new();
    }
    format!(
        "{}{} ",
        " ".repeat(indent_size.saturating_mul(level)),
        style::paint(BAR, depth_color(level))
    )
}

pub fn indent_block_without_bar(level: usize, indent_size: usize) -> String {
    if level == 0 {
        return String::new();
    }
    " ".repeat(indent_size.saturating_mul(level) + BAR.width() + 1)
}

// Words are never split, so URLs and escape sequences survive even when they
// overflow.
pub fn wrap(text: &str, width: usize, padding: &str) -> String {
    let options = WrapOptions::new(width.max(1))
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .initial_indent(padding)
        .subsequent_indent(padding);

    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            lines.push(padding.trim_end().to_string());
            continue;
        }
        lines.extend(
            textwrap::wrap(line, &options)
                .into_iter()
                .map(|cow| cow.into_owned()),
        );
    }
    lines.join("\n")
}

pub fn strip_escapes(text: &str) -> String {
    ESCAPE_RE.replace_all(text, "").into_owned()
}

pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_escapes(text).as_str())
}
