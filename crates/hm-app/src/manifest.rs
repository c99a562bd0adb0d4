//! YAML run manifest naming the input tables and output path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// File locations for one run.
///
/// ```yaml
/// data: sedsizedata.csv
/// parameters: config_files/params.csv
/// column_names: config_files/colnames.csv
/// settings: config_files/calcset.csv
/// output: output.csv
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub data: PathBuf,
    pub parameters: PathBuf,
    pub column_names: PathBuf,
    pub settings: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RunManifest {
    /// Load a manifest; relative paths resolve against its directory.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ManifestRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest: RunManifest = serde_yaml::from_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(manifest.resolved_against(base))
    }

    fn resolved_against(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            data: resolve(self.data),
            parameters: resolve(self.parameters),
            column_names: resolve(self.column_names),
            settings: resolve(self.settings),
            output: self.output.map(resolve),
        }
    }
}
