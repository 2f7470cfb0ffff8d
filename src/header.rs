use crate::hackernews::CommentNode;
use crate::layout;
use crate::style;

const MODERATORS: [&str; 2] = ["dang", "sctb"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Moderator,
    OriginalPoster,
    ParentPoster,
}

impl Role {
    // mod > OP > PP
    pub fn of(author: &str, original_poster: &str, parent_poster: &str) -> Option<Self> {
        if author.is_empty() {
            return None;
        }
        if MODERATORS.contains(&author) {
            Some(Role::Moderator)
        } else if author == original_poster {
            Some(Role::OriginalPoster)
        } else if author == parent_poster {
            Some(Role::ParentPoster)
        } else {
            None
        }
    }

    pub fn suffix(&self) -> String {
        match self {
            Role::Moderator => style::paint(" mod", style::GREEN),
            Role::OriginalPoster => style::paint(" OP", style::RED),
            Role::ParentPoster => style::paint(" PP", style::PURPLE),
        }
    }
}

pub fn label_author(author: &str, original_poster: &str, parent_poster: &str) -> String {
    let mut label = style::bold(author);
    if let Some(role) = Role::of(author, original_poster, parent_poster) {
        label.push_str(&role.suffix());
    }
    label
}

pub fn info_line(points: u64, author: &str, time: &str, replies: u64) -> String {
    let line = format!("{points} points by {author} {time} • {replies} comments");
    format!("{}\n", style::dimmed(&line))
}

pub fn headline(story: &CommentNode, width: usize) -> String {
    let (label, target) = if story.domain.is_empty() {
        (format!("item?id={}", story.id), story.permalink())
    } else if story.url.is_empty() {
        (story.domain.clone(), format!("https://{}", story.domain))
    } else {
        (story.domain.clone(), story.url.clone())
    };

    let parenthesized = format!("({label})");
    let title = story.title.trim();
    let line = if title.is_empty() {
        parenthesized.clone()
    } else {
        format!("{title} {parenthesized}")
    };

    let wrapped = layout::wrap(&line, width, "");
    let mut headline = match wrapped.rfind(&parenthesized) {
        Some(pos) => format!(
            "{}({}){}",
            &wrapped[..pos],
            style::hyperlink(&target, &label),
            &wrapped[pos + parenthesized.len()..]
        ),
        None => wrapped,
    };
    headline.push('\n');
    headline
}

pub fn reply_marker(level: usize, replies: usize) -> String {
    if level != 0 {
        return String::new();
    }
    let marker = if replies > 1 {
        format!(" ::  {replies} ⤶")
    } else {
        " ::".to_string()
    };
    style::dimmed_underline(&marker)
}

pub fn underline_filler(width: usize, used: usize) -> String {
    if used >= width {
        return String::new();
    }
    style::dimmed_underline(&" ".repeat(width - used))
}

pub fn comment_heading(
    node: &CommentNode,
    level: usize,
    width: usize,
    original_poster: &str,
    parent_poster: &str,
) -> String {
    let author = format!(
        "{} ",
        label_author(&node.author, original_poster, parent_poster)
    );
    let time = node.display_time();

    if level != 0 {
        return format!("{author}{}", style::dimmed(&time));
    }

    let time = style::dimmed_underline(&time);
    let replies = reply_marker(level, node.descendant_count());
    let used = layout::visible_width(&author)
        + layout::visible_width(&time)
        + layout::visible_width(&replies);
    let filler = underline_filler(width, used);
    format!("{author}{time}{replies}{filler}")
}

pub fn separator(width: usize) -> String {
    "-".repeat(width)
}
