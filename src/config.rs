use crate::core::error::Result;
use crate::media::DEFAULT_JPEG_QUALITY;
use crate::numeric::Locale;
use crate::presentation::DEFAULT_MAX_DEPTH;
use crate::utils::get_config_dir;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "config.json";

/// Settings shared by the helpers and the `helpful` CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Currency formatting locale (`en-US`, `de-DE`, ...); taken from the
    /// POSIX locale variables when not stored
    #[serde(default = "Locale::from_env")]
    pub locale: Locale,
    /// JPEG quality in percent; 50 matches a compression quality of 0.5
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Upper bound on the visible-screen walk
    #[serde(default = "default_max_depth")]
    pub max_presentation_depth: usize,
    /// Pixels per point used when rendering resized images
    #[serde(default = "default_device_scale")]
    pub device_scale: f64,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            locale: Locale::from_env(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_presentation_depth: DEFAULT_MAX_DEPTH,
            device_scale: 1.0,
        }
    }
}

impl HelperConfig {
    /// Clamps hand-edited values back into their working ranges.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.max_presentation_depth = self.max_presentation_depth.max(1);
        if !(self.device_scale.is_finite() && self.device_scale > 0.0) {
            self.device_scale = 1.0;
        }
        self
    }
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_device_scale() -> f64 {
    1.0
}

/// Saves the config to `config.json` in the user config directory.
///
/// Does nothing when no home directory can be resolved.
pub async fn save_config(config: &HelperConfig) -> Result<()> {
    let Some(dir) = get_config_dir() else {
        warn!("No config directory available, settings not saved");
        return Ok(());
    };
    crate::utils::ensure_dirs()?;
    save_config_to(&dir.join(CONFIG_FILE), config).await
}

/// Writes `config` to `path` atomically.
/// 1. Writes to a temporary sibling file.
/// 2. Sets restrictive permissions (0o600).
/// 3. Renames over the target path.
pub async fn save_config_to(path: &Path, config: &HelperConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    let temp_path = path.with_extension("json.tmp");

    #[cfg(unix)]
    {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .mode(0o600)
            .open(&temp_path)
            .await?;

        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
    }

    #[cfg(not(unix))]
    {
        use tokio::io::AsyncWriteExt;

        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
    }

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::StorageFull {
            std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "Disk full: cannot save configuration. Free up space and try again.",
            )
        } else {
            e
        }
    })?;
    debug!(path = %path.display(), "Saved config");
    Ok(())
}

fn parse_config(json: &str, path: &Path) -> HelperConfig {
    match serde_json::from_str::<HelperConfig>(json) {
        Ok(config) => config.sanitized(),
        Err(e) => {
            warn!(path = %path.display(), "Ignoring unreadable config: {e}");
            HelperConfig::default()
        }
    }
}

/// Loads the config at `path`, or defaults if it is missing or corrupt.
pub async fn load_config_from(path: &Path) -> HelperConfig {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => parse_config(&json, path),
        Err(_) => HelperConfig::default(),
    }
}

/// Loads the user config, or defaults if none is stored.
pub async fn load_config() -> HelperConfig {
    match get_config_dir() {
        Some(dir) => load_config_from(&dir.join(CONFIG_FILE)).await,
        None => HelperConfig::default(),
    }
}

/// Synchronous `load_config()` for start-up code that runs before (or
/// outside) the async runtime.
pub fn load_config_blocking() -> HelperConfig {
    let Some(path) = get_config_dir().map(|dir| dir.join(CONFIG_FILE)) else {
        return HelperConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => parse_config(&json, &path),
        Err(_) => HelperConfig::default(),
    }
}
