use tracing::{debug, trace};

use crate::hackernews::CommentNode;
use crate::header;
use crate::layout;
use crate::links;
use crate::text;

pub const DEFAULT_INDENT_SIZE: usize = 5;
pub const DEFAULT_COMMENT_WIDTH: usize = 70;
pub const FALLBACK_SCREEN_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub indent_size: usize,
    // 0 follows the screen.
    pub comment_width: usize,
    pub screen_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_size: DEFAULT_INDENT_SIZE,
            comment_width: DEFAULT_COMMENT_WIDTH,
            screen_width: FALLBACK_SCREEN_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn root_width(&self) -> usize {
        if self.comment_width == 0 {
            self.screen_width.max(layout::MIN_COMMENT_WIDTH)
        } else {
            self.comment_width
        }
    }
}

/// Per-node state threaded down the reply recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext<'a> {
    pub level: usize,
    pub indent_size: usize,
    pub comment_width: usize,
    pub screen_width: usize,
    pub original_poster: &'a str,
    pub parent_poster: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn top_level(options: &RenderOptions, original_poster: &'a str) -> Self {
        Self {
            level: 0,
            indent_size: options.indent_size,
            comment_width: options.comment_width,
            screen_width: options.screen_width,
            original_poster,
            parent_poster: "",
        }
    }

    // The parent poster is fixed once, by the top-level comment.
    pub fn child(self, author: &'a str) -> Self {
        let parent_poster = if self.level == 0 {
            author
        } else {
            self.parent_poster
        };
        Self {
            level: self.level + 1,
            parent_poster,
            ..self
        }
    }

    pub fn width(&self) -> usize {
        layout::adjusted_width(
            self.level,
            self.indent_size,
            self.comment_width,
            self.screen_width,
        )
    }
}

pub fn render_thread(story: &CommentNode, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_header(story, options, &mut out);

    let ctx = RenderContext::top_level(options, &story.author);
    for reply in &story.children {
        write_comment(reply, ctx, &mut out);
    }

    debug!(
        story = story.id,
        replies = story.descendant_count(),
        width = options.root_width(),
        bytes = out.len(),
        "rendered thread"
    );
    out
}

fn write_header(story: &CommentNode, options: &RenderOptions, out: &mut String) {
    let width = options.root_width();
    out.push_str(&header::headline(story, width));
    out.push_str(&header::info_line(
        story.points,
        &story.author,
        &story.display_time(),
        story.reply_count,
    ));

    if !story.body_raw.trim().is_empty() {
        let parsed = text::parse_comment(&story.body_raw);
        let wrapped = layout::wrap(&parsed.text, width, "");
        out.push_str(&links::apply_hyperlinks(&wrapped, &parsed.links));
        out.push('\n');
    }

    out.push_str(&header::separator(width));
    out.push_str("\n\n");
}

fn write_comment<'a>(node: &'a CommentNode, ctx: RenderContext<'a>, out: &mut String) {
    let parsed = text::parse_comment(&node.body_raw);
    let width = ctx.width();

    out.push_str(&layout::indent_block_without_bar(ctx.level, ctx.indent_size));
    out.push_str(&header::comment_heading(
        node,
        ctx.level,
        width,
        ctx.original_poster,
        ctx.parent_poster,
    ));
    out.push('\n');

    let body = layout::wrap(
        &parsed.text,
        width,
        &layout::indent_block(ctx.level, ctx.indent_size),
    );
    out.push_str(&links::apply_hyperlinks(&body, &parsed.links));
    out.push_str("\n\n");
    trace!(
        level = ctx.level,
        author = %node.author,
        links = parsed.links.len(),
        "rendered comment"
    );

    let child_ctx = ctx.child(&node.author);
    for reply in &node.children {
        write_comment(reply, child_ctx, out);
    }
}
