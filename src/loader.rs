use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::players;
use crate::shot::{self, RawRecord, Shot};

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client(timeout: Duration) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRoot {
    Dir(PathBuf),
    Http(String),
}

impl DataRoot {
    pub fn describe(&self) -> String {
        match self {
            DataRoot::Dir(path) => path.display().to_string(),
            DataRoot::Http(base) => base.clone(),
        }
    }
}

// player id -> relative data file paths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    files: HashMap<String, Vec<String>>,
}

impl Manifest {
    pub fn builtin() -> Self {
        let files = players::all()
            .iter()
            .map(|p| {
                (
                    p.id.to_string(),
                    p.files.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect();
        Self { files }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid manifest json")
    }

    pub fn insert(&mut self, player: impl Into<String>, files: Vec<String>) {
        self.files.insert(player.into(), files);
    }

    pub fn files_for(&self, player: &str) -> Option<&[String]> {
        self.files.get(player).map(Vec::as_slice)
    }

    pub fn players(&self) -> Vec<String> {
        let mut out: Vec<String> = players::all()
            .iter()
            .filter(|p| self.files.contains_key(p.id))
            .map(|p| p.id.to_string())
            .collect();
        let mut extra: Vec<String> = self
            .files
            .keys()
            .filter(|id| players::profile(id).is_none())
            .cloned()
            .collect();
        extra.sort();
        out.extend(extra);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    NoManifest,
    NoFiles,
    EmptyDataset,
}

impl NoDataReason {
    pub fn message(self) -> &'static str {
        match self {
            NoDataReason::NoManifest => "No shot data available for this player",
            NoDataReason::NoFiles => "No shot data files could be found for this player",
            NoDataReason::EmptyDataset => "Shot data loaded but contained no usable shots",
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Shots(Vec<Shot>),
    NoData(NoDataReason),
}

#[derive(Debug, Clone)]
pub struct PlayerLoad {
    pub player: String,
    pub outcome: LoadOutcome,
    pub files_loaded: usize,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub warnings: Vec<String>,
}

impl PlayerLoad {
    fn no_data(player: &str, reason: NoDataReason) -> Self {
        Self {
            player: player.to_string(),
            outcome: LoadOutcome::NoData(reason),
            files_loaded: 0,
            rows_read: 0,
            rows_dropped: 0,
            warnings: Vec::new(),
        }
    }
}

enum FetchError {
    Missing,
    Failed(anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct ShotLoader {
    roots: Vec<DataRoot>,
    manifest: Manifest,
    http_timeout: Duration,
}

impl ShotLoader {
    pub fn new(roots: Vec<DataRoot>, manifest: Manifest) -> Self {
        Self {
            roots,
            manifest,
            http_timeout: Duration::from_secs(10),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            roots: cfg.data_roots.clone(),
            manifest: cfg.manifest.clone(),
            http_timeout: cfg.http_timeout,
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// An `Err` means nothing loaded and at least one file failed for a
    /// reason other than not being found.
    pub fn load_player(&self, player: &str) -> Result<PlayerLoad> {
        let files = match self.manifest.files_for(player) {
            Some(files) if !files.is_empty() => files,
            _ => return Ok(PlayerLoad::no_data(player, NoDataReason::NoManifest)),
        };

        let mut records: Vec<RawRecord> = Vec::new();
        let mut warnings = Vec::new();
        let mut files_loaded = 0usize;
        let mut last_error: Option<anyhow::Error> = None;

        for rel in files {
            match self.load_file(rel) {
                Ok(mut rows) => {
                    files_loaded += 1;
                    records.append(&mut rows);
                }
                Err(errors) => {
                    let missing_everywhere = errors.iter().all(|e| matches!(e, FetchError::Missing));
                    warnings.push(format!(
                        "{rel} unavailable after trying {} root(s){}",
                        self.roots.len(),
                        if missing_everywhere { " (not found)" } else { "" }
                    ));
                    for err in errors {
                        if let FetchError::Failed(err) = err {
                            last_error = Some(err);
                        }
                    }
                }
            }
        }

        if files_loaded == 0 {
            if let Some(err) = last_error {
                return Err(err.context(format!("unable to load shot data for {player}")));
            }
            let mut load = PlayerLoad::no_data(player, NoDataReason::NoFiles);
            load.warnings = warnings;
            return Ok(load);
        }

        let rows_read = records.len();
        let shots = shot::parse_rows(&records, player);
        let rows_dropped = rows_read - shots.len();
        if rows_dropped > 0 {
            warnings.push(format!("dropped {rows_dropped} unparseable or unattempted row(s)"));
        }

        let outcome = if shots.is_empty() {
            LoadOutcome::NoData(NoDataReason::EmptyDataset)
        } else {
            LoadOutcome::Shots(shots)
        };

        Ok(PlayerLoad {
            player: player.to_string(),
            outcome,
            files_loaded,
            rows_read,
            rows_dropped,
            warnings,
        })
    }

    // Tries each root in order; the first one that yields a readable CSV wins.
    fn load_file(&self, rel: &str) -> std::result::Result<Vec<RawRecord>, Vec<FetchError>> {
        let mut errors = Vec::new();
        for root in &self.roots {
            let body = match self.fetch(root, rel) {
                Ok(body) => body,
                Err(err) => {
                    errors.push(err);
                    continue;
                }
            };
            match read_records(&body) {
                Ok(rows) => return Ok(rows),
                Err(err) => errors.push(FetchError::Failed(
                    err.context(format!("{rel} at {}", root.describe())),
                )),
            }
        }
        Err(errors)
    }

    fn fetch(&self, root: &DataRoot, rel: &str) -> std::result::Result<Vec<u8>, FetchError> {
        match root {
            DataRoot::Dir(dir) => {
                let path = dir.join(rel);
                fs::read(&path).map_err(|err| {
                    if err.kind() == io::ErrorKind::NotFound {
                        FetchError::Missing
                    } else {
                        FetchError::Failed(
                            anyhow::Error::new(err).context(format!("read {}", path.display())),
                        )
                    }
                })
            }
            DataRoot::Http(base) => {
                let url = format!("{}/{}", base, rel.trim_start_matches('/'));
                fetch_remote(self.http_timeout, &url)
            }
        }
    }
}

fn fetch_remote(timeout: Duration, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
    let client = http_client(timeout).map_err(FetchError::Failed)?;
    let resp = client
        .get(url)
        .header(USER_AGENT, "shotchart_terminal")
        .send()
        .with_context(|| format!("request failed: {url}"))
        .map_err(FetchError::Failed)?;
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::Missing);
    }
    if !status.is_success() {
        return Err(FetchError::Failed(anyhow!("http {status}: {url}")));
    }
    resp.bytes()
        .map(|body| body.to_vec())
        .context("failed reading body")
        .map_err(FetchError::Failed)
}

/// Reads CSV into header-keyed records. Fields that are not valid UTF-8 are
/// decoded lossily so one bad byte only spoils its own field.
pub fn read_records(body: impl AsRef<[u8]>) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_ref());
    let headers = reader.byte_headers().context("invalid csv header")?.clone();

    let mut out = Vec::new();
    for (idx, row) in reader.byte_records().enumerate() {
        let row = row.with_context(|| format!("invalid csv row {}", idx + 1))?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(k, v)| {
                (
                    String::from_utf8_lossy(k).into_owned(),
                    String::from_utf8_lossy(v).into_owned(),
                )
            })
            .collect();
        out.push(record);
    }
    Ok(out)
}
