use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use tracing::debug;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "recipes.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
    pub session_file: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".into(),
            session_file: default_session_file(),
        }
    }
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("recipes")
        .join("session")
}

/// Defaults, then `recipes.toml` (or `path`), then environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded client config file");
        apply_file_config(&mut settings, &file_cfg);
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings.backend_url = normalize_backend_url(&settings.backend_url)?;
    Ok(settings)
}

fn apply_file_config(settings: &mut ClientSettings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("backend_url") {
        settings.backend_url = v.clone();
    }
    if let Some(v) = file_cfg.get("session_file") {
        settings.session_file = PathBuf::from(v);
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = var("SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }
    if let Some(v) = var("APP__SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }
}

/// Trims whitespace and trailing slashes and checks the url is usable as a base.
pub fn normalize_backend_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(ClientSettings::default().backend_url);
    }

    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid backend url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("backend url must use http or https, got '{}'", parsed.scheme());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
