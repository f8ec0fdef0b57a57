use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{bail, Context};
use grid_core::prediction::predict_endpoint;
use serde::Deserialize;
use shared::domain::DEFAULT_GRID_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "pad.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub grid_size: usize,
    pub cell_size_px: f64,
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            grid_size: DEFAULT_GRID_SIZE,
            cell_size_px: 40.0,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    grid_size: Option<usize>,
    cell_size_px: Option<f64>,
    request_timeout_ms: Option<u64>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.grid_size == 0 {
            bail!("grid_size must be at least 1");
        }
        if !(self.cell_size_px.is_finite() && self.cell_size_px > 0.0) {
            bail!("cell_size_px must be a positive number, got {}", self.cell_size_px);
        }
        if self.request_timeout_ms == 0 {
            bail!("request_timeout_ms must be greater than zero");
        }
        predict_endpoint(&self.server_url)
            .with_context(|| format!("server_url '{}' is unusable", self.server_url))?;
        Ok(())
    }
}

/// Defaults, then the TOML file at `path` when it exists, then environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.grid_size {
        settings.grid_size = v;
    }
    if let Some(v) = file_cfg.cell_size_px {
        settings.cell_size_px = v;
    }
    if let Some(v) = file_cfg.request_timeout_ms {
        settings.request_timeout_ms = v;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("PAD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__GRID_SIZE") {
        settings.grid_size = v
            .parse()
            .with_context(|| format!("APP__GRID_SIZE '{v}' is not a grid size"))?;
    }
    if let Some(v) = lookup("APP__CELL_SIZE_PX") {
        settings.cell_size_px = v
            .parse()
            .with_context(|| format!("APP__CELL_SIZE_PX '{v}' is not a number"))?;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_MS") {
        settings.request_timeout_ms = v
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_MS '{v}' is not a duration in ms"))?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
