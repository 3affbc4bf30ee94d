use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Dataset partition a manifest describes. Selects the manifest, the output directory and the failure log.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    Preictal,
    #[default]
    Interictal,
}

impl Class {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preictal => "preictal",
            Self::Interictal => "interictal",
        }
    }

    pub fn manifest_path(self, base_dir: &Path) -> PathBuf {
        base_dir.join(format!("{}.json", self.as_str()))
    }

    pub fn output_dir(self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.as_str())
    }

    pub fn failure_log_path(self, base_dir: &Path) -> PathBuf {
        base_dir.join(format!("failed_{}.txt", self.as_str()))
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "File Name")]
    pub file_name: String,
    /// Remaining record fields (start/end times, seizure counts, ...). Kept but never interpreted.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ManifestEntry {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            metadata: serde_json::Map::new(),
        }
    }
}

pub fn parse_manifest(content: &str) -> Result<Vec<ManifestEntry>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Reads `<base_dir>/<class>.json`. Any failure here is fatal for the run.
pub fn load_manifest(base_dir: &Path, class: Class) -> Result<Vec<ManifestEntry>, FetchError> {
    let path = class.manifest_path(base_dir);
    let content = std::fs::read_to_string(&path).map_err(|e| FetchError::ManifestLoad {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    parse_manifest(&content).map_err(|e| FetchError::ManifestLoad {
        path,
        reason: e.to_string(),
    })
}
