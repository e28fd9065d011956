use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_directive, BridgeState, OperatorChannel, OverrideDirective};
use crate::error::ChannelError;

/// Override and bridge state as plain local files.
pub struct FileChannel {
    override_path: PathBuf,
    bridge_path: PathBuf,
    default_target: String,
}

impl FileChannel {
    pub fn new(
        override_path: impl Into<PathBuf>,
        bridge_path: impl Into<PathBuf>,
        default_target: impl Into<String>,
    ) -> Self {
        Self {
            override_path: override_path.into(),
            bridge_path: bridge_path.into(),
            default_target: default_target.into(),
        }
    }
}

fn io_error(path: &Path, err: std::io::Error) -> ChannelError {
    ChannelError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

impl OperatorChannel for FileChannel {
    fn read_directive(&self) -> Option<OverrideDirective> {
        let raw = match fs::read_to_string(&self.override_path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(
                        "[OVERRIDE] Ignoring unreadable override file {}: {}",
                        self.override_path.display(),
                        err
                    );
                }
                return None;
            }
        };
        parse_directive(&raw, &self.default_target)
    }

    /// Writes to a sibling temp file and renames it so the dashboard never reads a
    /// half-written record.
    fn write_bridge_state(&self, state: &BridgeState) -> Result<(), ChannelError> {
        let json =
            serde_json::to_vec_pretty(state).map_err(|e| ChannelError::Encode(e.to_string()))?;
        if let Some(parent) = self
            .bridge_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let mut tmp_name = self.bridge_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, json).map_err(|e| io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.bridge_path).map_err(|e| io_error(&self.bridge_path, e))
    }
}
