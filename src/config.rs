//! Server configuration: an optional TOML file layered under CLI flag
//! overrides, mirroring `ots/tile_server.go`'s `TileServerConfig`.

use serde::Deserialize;
use std::path::Path;

use crate::error::OtsError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub dataset_path: String,
    pub object_cache_size: usize,
    pub png_cache_size: usize,
    pub deadline_seconds: u64,
    pub show_watermark: bool,
    pub hide_labels: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1".to_string(),
            port: 1919,
            dataset_path: String::new(),
            object_cache_size: 2000,
            png_cache_size: 2000,
            deadline_seconds: 5,
            show_watermark: false,
            hide_labels: false,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, OtsError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| OtsError::DatasetLoad(format!("reading config {}: {e}", path.display())))?;
        toml::from_str(&text).map_err(|e| OtsError::DatasetLoad(format!("parsing config {}: {e}", path.display())))
    }

    /// Overlays CLI-supplied fields on top of whatever the file (or the
    /// default) provided; `None` leaves the existing value untouched.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(path) = overrides.dataset_path {
            self.dataset_path = path;
        }
        if let Some(deadline) = overrides.deadline_seconds {
            self.deadline_seconds = deadline;
        }
        if overrides.show_watermark {
            self.show_watermark = true;
        }
        if overrides.hide_labels {
            self.hide_labels = true;
        }
    }
}

/// CLI-supplied overrides layered on top of a loaded (or default) config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub dataset_path: Option<String>,
    pub deadline_seconds: Option<u64>,
    pub show_watermark: bool,
    pub hide_labels: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_loopback_on_1919() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind, "127.0.0.1");
        assert_eq!(cfg.port, 1919);
    }

    #[test]
    fn overrides_only_touch_fields_that_were_set() {
        let mut cfg = ServerConfig::default();
        cfg.apply_overrides(ConfigOverrides {
            port: Some(8080),
            ..Default::default()
        });
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind, "127.0.0.1");
    }

    #[test]
    fn toml_round_trips_through_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("ots-tiles-test-config-{}.toml", std::process::id()));
        std::fs::write(&path, "port = 4040\nbind = \"0.0.0.0\"\n").unwrap();
        let cfg = ServerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.port, 4040);
        assert_eq!(cfg.bind, "0.0.0.0");
    }
}
