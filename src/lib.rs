#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod config;
pub mod hackernews;
pub mod header;
pub mod layout;
pub mod links;
pub mod render;
pub mod style;
pub mod text;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::{run, Args};
pub use hackernews::CommentNode;
pub use render::{render_thread, RenderContext, RenderOptions};
