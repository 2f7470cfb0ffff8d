use crossterm::style::{Color, Stylize};

pub const RESET: &str = "\x1b[0m";
pub const ITALIC: &str = "\x1b[3m";
pub const DIM: &str = "\x1b[2m";

const OSC8_OPEN: &str = "\x1b]8;;";
const OSC8_TERMINATOR: &str = "\x1b\\";

pub const WHITE: Color = Color::White;
pub const RED: Color = Color::Red;
pub const YELLOW: Color = Color::Yellow;
pub const GREEN: Color = Color::Green;
pub const BLUE: Color = Color::Blue;
pub const TEAL: Color = Color::Cyan;
pub const PURPLE: Color = Color::Magenta;

pub fn bold(text: &str) -> String {
    text.bold().to_string()
}

pub fn dimmed(text: &str) -> String {
    text.dim().to_string()
}

pub fn dimmed_underline(text: &str) -> String {
    text.dim().underlined().to_string()
}

pub fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

pub fn hyperlink(url: &str, text: &str) -> String {
    format!("{OSC8_OPEN}{url}{OSC8_TERMINATOR}{text}{OSC8_OPEN}{OSC8_TERMINATOR}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyperlink_wraps_visible_text() {
        assert_eq!(
            hyperlink("https://example.com/a", "example.com"),
            "\x1b]8;;https://example.com/a\x1b\\example.com\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn styles_keep_the_text() {
        for styled in [
            bold("alice"),
            dimmed("alice"),
            dimmed_underline("alice"),
            paint("alice", PURPLE),
        ] {
            assert!(styled.contains("alice"), "lost text in {styled:?}");
        }
    }

    #[test]
    fn bold_emits_sgr_prefix() {
        assert!(bold("x").starts_with("\x1b[1m"));
    }
}
