use once_cell::sync::Lazy;
use regex::Regex;

use crate::style;

pub const MAX_LINKS_PER_COMMENT: usize = 10;
pub const TRUNCATE_AT: usize = 60;

const ELLIPSIS: &str = "...";
const ANCHOR_CLOSE: &str = "</a>";

static ANCHOR_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="(.*?)" rel="nofollow">"#).expect("valid anchor regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub label: String,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let label = truncate(&url);
        Self { url, label }
    }

    fn with_label(url: &str, label: &str) -> Self {
        Self {
            url: url.to_string(),
            label: label.to_string(),
        }
    }
}

pub fn truncate(url: &str) -> String {
    if url.chars().count() < TRUNCATE_AT {
        return url.to_string();
    }
    let mut shortened: String = url.chars().take(TRUNCATE_AT).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

/// Strips anchor openings from `text` and returns the links they carried, in
/// order. `</a>` is left for the markup pass. Anchor text naming the URL is
/// rewritten to its display form.
pub fn extract(text: &str) -> (String, Vec<Link>) {
    let mut stripped = String::with_capacity(text.len());
    let mut links = Vec::new();
    let mut cursor = 0;

    for caps in ANCHOR_OPEN_RE.captures_iter(text) {
        let (Some(opening), Some(url)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if opening.start() < cursor {
            continue;
        }
        stripped.push_str(&text[cursor..opening.start()]);
        cursor = opening.end();

        if links.len() >= MAX_LINKS_PER_COMMENT {
            continue;
        }

        let url = url.as_str();
        let anchor_text = text[cursor..]
            .find(ANCHOR_CLOSE)
            .map(|close| &text[cursor..cursor + close]);

        let link = match anchor_text {
            Some(anchor) if names_url(anchor, url) => {
                let link = Link::new(url);
                stripped.push_str(&link.label);
                cursor += anchor.len();
                link
            }
            Some(anchor) if !anchor.trim().is_empty() => Link::with_label(url, anchor.trim()),
            _ => Link::new(url),
        };
        links.push(link);
    }

    stripped.push_str(&text[cursor..]);
    (stripped, links)
}

fn names_url(anchor: &str, url: &str) -> bool {
    if anchor == url {
        return true;
    }
    match anchor.strip_suffix(ELLIPSIS) {
        Some(prefix) => !prefix.is_empty() && url.starts_with(prefix),
        None => false,
    }
}

// Link k binds to the first occurrence of its label after link k-1.
pub fn apply_hyperlinks(rendered: &str, links: &[Link]) -> String {
    if links.is_empty() {
        return rendered.to_string();
    }

    let mut linked = String::with_capacity(rendered.len() + links.len() * 2 * TRUNCATE_AT);
    let mut rest = rendered;
    for link in links {
        if link.label.is_empty() {
            continue;
        }
        if let Some(pos) = rest.find(link.label.as_str()) {
            linked.push_str(&rest[..pos]);
            linked.push_str(&style::hyperlink(&link.url, &link.label));
            rest = &rest[pos + link.label.len()..];
        }
    }
    linked.push_str(rest);
    linked
}
