use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RingError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub buffer: BufferConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Number of slots allocated for the staging buffer
    pub capacity: usize,
    /// Elements moved per fill/drain block
    pub block_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing filter directive (e.g. "warn", "cbuf=debug"). RUST_LOG takes precedence.
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for BufferConfig {
    fn default() -> Self {
        Self { capacity: 1024, block_size: 64 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "warn".into() }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Loads the user config. A missing file yields defaults (written out on
    /// first run, best-effort); a file that exists but fails to parse or
    /// validate is an error.
    pub fn load() -> Result<Self> {
        match Config::config_path() {
            Some(path) => Config::load_from(&path),
            None       => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let _ = write_defaults(path);
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Config::from_toml_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cbuf").join("cbuf.toml"))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> std::result::Result<(), RingError> {
        if self.buffer.capacity == 0 {
            return Err(RingError::InvalidArgument { reason: "buffer.capacity must be positive" });
        }
        if self.buffer.block_size == 0 {
            return Err(RingError::InvalidArgument { reason: "buffer.block_size must be positive" });
        }
        Ok(())
    }
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# cbuf configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
