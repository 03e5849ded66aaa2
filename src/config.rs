use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::loader::{DataRoot, Manifest};

const DEFAULT_ROOTS: &str = "data,public/data,../data";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_roots: Vec<DataRoot>,
    pub manifest: Manifest,
    pub playback_interval: Duration,
    pub http_timeout: Duration,
    pub initial_player: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let roots = env::var("SHOT_DATA_ROOTS").unwrap_or_else(|_| DEFAULT_ROOTS.to_string());
        let data_roots = parse_roots(&roots);

        let manifest = match env::var("SHOT_MANIFEST").ok().filter(|v| !v.trim().is_empty()) {
            Some(path) => load_manifest(Path::new(path.trim()))?,
            None => Manifest::builtin(),
        };

        let playback_ms = env::var("PLAYBACK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(900)
            .max(100);
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(10)
            .max(1);
        let initial_player = env::var("SHOT_PLAYER")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            data_roots,
            manifest,
            playback_interval: Duration::from_millis(playback_ms),
            http_timeout: Duration::from_secs(http_timeout),
            initial_player,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_roots: parse_roots(DEFAULT_ROOTS),
            manifest: Manifest::builtin(),
            playback_interval: Duration::from_millis(900),
            http_timeout: Duration::from_secs(10),
            initial_player: None,
        }
    }
}

pub fn parse_roots(raw: &str) -> Vec<DataRoot> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.starts_with("http://") || s.starts_with("https://") {
                DataRoot::Http(s.trim_end_matches('/').to_string())
            } else {
                DataRoot::Dir(PathBuf::from(s))
            }
        })
        .collect()
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read manifest {}", path.display()))?;
    Manifest::from_json_str(&raw).with_context(|| format!("parse manifest {}", path.display()))
}
