use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config;
use crate::hackernews::CommentNode;
use crate::render::{self, RenderOptions, FALLBACK_SCREEN_WIDTH};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    // None reads stdin.
    pub input: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub comment_width: Option<usize>,
    pub indent_size: Option<usize>,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" | "-w" => {
                    parsed.comment_width = Some(numeric_value(&arg, args.next())?);
                }
                "--indent" | "-i" => {
                    parsed.indent_size = Some(numeric_value(&arg, args.next())?);
                }
                "--config" | "-c" => {
                    let value = args
                        .next()
                        .with_context(|| format!("{arg} expects a path"))?;
                    parsed.config_file = Some(PathBuf::from(value));
                }
                "-" => parsed.input = None,
                other if other.starts_with('-') => bail!("unknown flag {other}"),
                other => {
                    if parsed.input.is_some() {
                        bail!("only one input file can be rendered at a time");
                    }
                    parsed.input = Some(PathBuf::from(other));
                }
            }
        }
        Ok(parsed)
    }
}

fn numeric_value(flag: &str, value: Option<String>) -> Result<usize> {
    let value = value.with_context(|| format!("{flag} expects a number"))?;
    value
        .trim()
        .parse()
        .with_context(|| format!("{flag} expects a number, got {value:?}"))
}

pub fn run(args: Args) -> Result<()> {
    init_tracing();

    let cfg = config::load(config::LoadOptions {
        config_file: args.config_file.clone(),
        env_prefix: None,
    })
    .context("load config")?;

    let mut options = cfg.render_options(terminal_width());
    apply_overrides(&mut options, &args);
    debug!(?options, "render options");

    let input = read_input(args.input.as_deref())?;
    let story = CommentNode::from_json(&input).context("parse thread")?;
    info!(story = story.id, replies = story.descendant_count(), "loaded thread");

    let rendered = render::render_thread(&story, &options);
    write_output(&rendered)
}

fn apply_overrides(options: &mut RenderOptions, args: &Args) {
    if let Some(width) = args.comment_width {
        options.comment_width = width;
    }
    if let Some(indent) = args.indent_size {
        options.indent_size = indent;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        _ => FALLBACK_SCREEN_WIDTH,
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read thread file at {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("read thread from stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(rendered: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let written = stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush());
    match written {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("write rendered thread"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_flags_and_input() {
        let parsed = args(&["--width", "60", "-i", "3", "thread.json"]).unwrap();
        assert_eq!(parsed.comment_width, Some(60));
        assert_eq!(parsed.indent_size, Some(3));
        assert_eq!(parsed.input, Some(PathBuf::from("thread.json")));
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(args(&["-"]).unwrap().input, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(args(&["--width"]).is_err());
        assert!(args(&["--width", "wide"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut options = RenderOptions::default();
        let parsed = args(&["--width", "0"]).unwrap();
        apply_overrides(&mut options, &parsed);
        assert_eq!(options.comment_width, 0);
        assert_eq!(options.indent_size, render::DEFAULT_INDENT_SIZE);
    }
}
