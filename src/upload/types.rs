use serde::Deserialize;
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// A file chosen by the user, pending submission. Dropped payloads may
/// arrive with bytes but no path, picker results always carry a path.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: Option<u64>,
    source: FileSource,
}

#[derive(Debug, Clone)]
enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        Self {
            name,
            size,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: Some(bytes.len() as u64),
            source: FileSource::Memory(bytes),
        }
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => std::fs::read(path),
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// Terminal result of one submission, reported by the upload worker.
#[derive(Debug)]
pub enum UploadOutcome {
    Success(String),
    Failure(String),
}

/// Success body of the format-statement endpoint. The summaries are
/// diagnostic only and never shown to the user.
#[derive(Debug, Deserialize)]
pub struct ServerReport {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub row_count_summary: Option<Value>,
    #[serde(default)]
    pub mismatch_summary: Option<Value>,
}
