use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::links::{self, Link};
use crate::style;

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#x27|gt|lt|#x2F|quot|amp);").expect("valid entity regex")
});

static LINK_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(10|[0-9])\]").expect("valid link number regex"));

static ANCHOR_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href=".*?" rel="nofollow">(?s:.*?)</a>"#).expect("valid anchor span regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    pub text: String,
    pub links: Vec<Link>,
}

pub fn parse_comment(raw: &str) -> ParsedComment {
    let decoded = decode_entities(raw);
    let colorized = colorize_outside_anchors(&decoded);
    let (stripped, links) = links::extract(&colorized);
    let text = replace_markup(&stripped);
    ParsedComment { text, links }
}

// Single pass: a decoded `&` never starts another entity.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    ENTITY_RE.replace_all(input, |caps: &Captures| {
        match &caps[0] {
            "&#x27;" => "'",
            "&gt;" => ">",
            "&lt;" => "<",
            "&#x2F;" => "/",
            "&quot;" => "\"",
            _ => "&",
        }
        .to_string()
    })
}

pub fn replace_markup(input: &str) -> String {
    let input = input.replacen("<p>", "", 1);
    input
        .replace("<p>", "\n\n")
        .replace("</p>", "")
        .replace("<i>", style::ITALIC)
        .replace("</i>", style::RESET)
        .replace("</a>", "")
        .replace("<pre><code>", style::DIM)
        .replace("</code></pre>", style::RESET)
}

pub fn colorize_link_numbers(input: &str) -> Cow<'_, str> {
    LINK_NUMBER_RE.replace_all(input, |caps: &Captures| {
        let number = &caps[1];
        let color = match number {
            "0" | "7" => style::WHITE,
            "1" | "8" => style::RED,
            "2" | "9" => style::YELLOW,
            "3" | "10" => style::GREEN,
            "4" => style::BLUE,
            "5" => style::TEAL,
            _ => style::PURPLE,
        };
        format!("[{}]", style::paint(number, color))
    })
}

// Anchors are copied untouched so their text still matches the link label.
fn colorize_outside_anchors(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    for anchor in ANCHOR_SPAN_RE.find_iter(input) {
        out.push_str(&colorize_link_numbers(&input[cursor..anchor.start()]));
        out.push_str(anchor.as_str());
        cursor = anchor.end();
    }
    out.push_str(&colorize_link_numbers(&input[cursor..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_known_entities() {
        assert_eq!(
            decode_entities("it&#x27;s &lt;b&gt; a&#x2F;b &quot;q&quot; &amp; more"),
            "it's <b> a/b \"q\" & more"
        );
    }

    #[test]
    fn decoding_is_idempotent_on_decoded_text() {
        let once = decode_entities("Tom &amp; Jerry &gt; cats &#x27;n&#x27; dogs").into_owned();
        let twice = decode_entities(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn decoded_ampersand_does_not_start_an_entity() {
        assert_eq!(decode_entities("&amp;gt;"), "&gt;");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode_entities("&nbsp; &copy;"), "&nbsp; &copy;");
    }

    #[test]
    fn paragraphs_become_blank_lines() {
        assert_eq!(replace_markup("<p>one<p>two<p>three"), "one\n\ntwo\n\nthree");
        assert_eq!(replace_markup("one<p>two"), "onetwo");
    }

    #[test]
    fn inline_markup_becomes_escapes() {
        assert_eq!(
            replace_markup("<i>so</i> <pre><code>x = 1</code></pre> end</a>"),
            format!("{}so{} {}x = 1{} end", style::ITALIC, style::RESET, style::DIM, style::RESET)
        );
    }

    #[test]
    fn colorizes_only_bracketed_small_numbers() {
        let out = colorize_link_numbers("see [1] and [10] but not [11] or [x]");
        assert!(out.contains(&format!("[{}]", style::paint("1", style::RED))));
        assert!(out.contains(&format!("[{}]", style::paint("10", style::GREEN))));
        assert!(out.contains("[11]"));
        assert!(out.contains("[x]"));
    }

    #[test]
    fn parse_comment_decodes_before_linking() {
        let raw = r#"<p>Read <a href="https:&#x2F;&#x2F;example.com&#x2F;a" rel="nofollow">https:&#x2F;&#x2F;example.com&#x2F;a</a> &amp; reply"#;
        let parsed = parse_comment(raw);
        assert_eq!(parsed.text, "Read https://example.com/a & reply");
        assert_eq!(parsed.links, vec![Link::new("https://example.com/a")]);
    }

    #[test]
    fn bracketed_numbers_inside_links_stay_plain() {
        let url = "https://en.wikipedia.org/wiki/Foo#cite_note-[1]";
        let raw = format!(r#"see <a href="{url}" rel="nofollow">{url}</a> and [2]"#);
        let parsed = parse_comment(&raw);
        assert_eq!(parsed.links, vec![Link::new(url)]);
        assert!(parsed.text.starts_with(&format!("see {url} and ")));
        assert!(parsed
            .text
            .ends_with(&format!("[{}]", style::paint("2", style::YELLOW))));
    }

    #[test]
    fn empty_comment_parses_to_empty_text() {
        assert_eq!(parse_comment(""), ParsedComment::default());
    }
}
