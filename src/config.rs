use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::render::{RenderOptions, DEFAULT_COMMENT_WIDTH, DEFAULT_INDENT_SIZE};

const DEFAULT_ENV_PREFIX: &str = "HN_COMMENTS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub comments: CommentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentsConfig {
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,
    // 0 follows the terminal width.
    #[serde(default = "default_comment_width")]
    pub comment_width: usize,
    #[serde(default)]
    pub screen_width: usize,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            comment_width: default_comment_width(),
            screen_width: 0,
        }
    }
}

fn default_indent_size() -> usize {
    DEFAULT_INDENT_SIZE
}

fn default_comment_width() -> usize {
    DEFAULT_COMMENT_WIDTH
}

impl Config {
    pub fn render_options(&self, terminal_width: usize) -> RenderOptions {
        let screen_width = if self.comments.screen_width == 0 {
            terminal_width
        } else {
            self.comments.screen_width
        };
        RenderOptions {
            indent_size: self.comments.indent_size,
            comment_width: self.comments.comment_width,
            screen_width,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            cfg = read_config_file(path)?;
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            cfg = read_config_file(&default_path)?;
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    apply_env(&mut cfg, prefix);

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    if data.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn apply_env(cfg: &mut Config, prefix: &str) {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    for (key, value) in map {
        apply_env_value(cfg, &key, &value);
    }
}

fn apply_env_value(cfg: &mut Config, key: &str, value: &str) {
    let Ok(parsed) = value.trim().parse::<usize>() else {
        return;
    };
    match key {
        "comments.indent_size" => cfg.comments.indent_size = parsed,
        "comments.comment_width" => cfg.comments.comment_width = parsed,
        "comments.screen_width" => cfg.comments.screen_width = parsed,
        _ => {}
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hn-comments").join("config.yaml"))
}
