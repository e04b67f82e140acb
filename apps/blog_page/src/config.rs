use std::{collections::HashMap, fs, path::Path, path::PathBuf};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "blog_page.toml";
pub const DEFAULT_POSTS_URL: &str = "https://jacekkosciesza-659f4.firebaseio.com/posts.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub layout_path: PathBuf,
    pub posts_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout_path: PathBuf::from("page_layout.toml"),
            posts_url: DEFAULT_POSTS_URL.into(),
            request_timeout_secs: 10,
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the flat settings file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("layout_path") {
                settings.layout_path = PathBuf::from(v);
            }
            if let Some(v) = file_cfg.get("posts_url") {
                settings.posts_url = v.clone();
            }
            if let Some(v) = file_cfg.get("request_timeout_secs") {
                if let Some(parsed) = parse_timeout_secs(v) {
                    settings.request_timeout_secs = parsed;
                }
            }
        }
    }

    if let Some(v) = env("PAGE_LAYOUT") {
        settings.layout_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__PAGE_LAYOUT") {
        settings.layout_path = PathBuf::from(v);
    }

    if let Some(v) = env("POSTS_URL") {
        settings.posts_url = v;
    }
    if let Some(v) = env("APP__POSTS_URL") {
        settings.posts_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Some(parsed) = parse_timeout_secs(&v) {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

/// Zero would time out every fetch, so it is ignored like garbage.
fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

pub fn parse_posts_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid posts url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("posts url '{raw}' uses unsupported scheme '{other}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
