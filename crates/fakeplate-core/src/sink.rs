//! Destinations for rendered records.
//!
//! A sink receives `(key, payload)` pairs. Keys are unique per record; what
//! a sink does with them (file names, message keys) is up to the sink. No
//! delivery guarantee is made beyond "`publish` returned `Ok`".

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::SinkConfig;
use crate::error::{FakeplateError, Result};

/// Every output destination implements this trait.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Short name for logs and errors: "stdout", "directory", ...
    fn name(&self) -> &'static str;

    /// Hand one rendered record to the destination.
    async fn publish(&self, key: &str, payload: &str) -> Result<()>;
}

type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Prints each record to standard output under a `--- <key>` header.
///
/// Writes are serialized, so records from concurrent workers never interleave.
pub struct StdoutSink {
    out: tokio::sync::Mutex<Writer>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }

    fn with_writer(writer: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self {
            out: tokio::sync::Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdoutSink").finish_non_exhaustive()
    }
}

#[async_trait]
impl Sink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn publish(&self, key: &str, payload: &str) -> Result<()> {
        let mut record = format!("--- {key}\n{payload}");
        if !record.ends_with('\n') {
            record.push('\n');
        }
        let mut out = self.out.lock().await;
        out.write_all(record.as_bytes())
            .await
            .map_err(|e| publish_error(self.name(), key, e))?;
        out.flush()
            .await
            .map_err(|e| publish_error(self.name(), key, e))?;
        Ok(())
    }
}

/// Writes each record to `<dir>/<key>.txt`.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }
}

#[async_trait]
impl Sink for DirectorySink {
    fn name(&self) -> &'static str {
        "directory"
    }

    async fn publish(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.path_for(key);
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| publish_error(self.name(), key, e))?;
        tracing::debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Keeps records in memory, in publish order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything published so far.
    pub fn records(&self) -> Vec<(String, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Sink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn publish(&self, key: &str, payload: &str) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| publish_error(self.name(), key, e))?;
        records.push((key.to_string(), payload.to_string()));
        Ok(())
    }
}

fn publish_error(sink: &str, key: &str, reason: impl std::fmt::Display) -> FakeplateError {
    FakeplateError::Publish {
        sink: sink.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Create the sink described by `config`.
pub fn from_config(config: &SinkConfig) -> Result<Box<dyn Sink>> {
    match config {
        SinkConfig::Stdout => Ok(Box::new(StdoutSink::new())),
        SinkConfig::Directory { path } => Ok(Box::new(DirectorySink::new(path)?)),
    }
}
