use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::rtdag::RtDag;

pub fn create_yaml_file_path(folder_path: &Path, file_name: &str) -> Result<PathBuf> {
    if fs::metadata(folder_path).is_err() {
        fs::create_dir_all(folder_path).map_err(|source| ConvertError::Write {
            path: folder_path.to_path_buf(),
            source,
        })?;
        info!("Created folder: {}", folder_path.display());
    }
    Ok(folder_path.join(format!("{}.yaml", file_name)))
}

/// Write `rtdag` to `<folder_path>/<dag_name>.yaml`, replacing any previous file.
pub fn dump_rtdag_to_yaml(folder_path: &Path, rtdag: &RtDag) -> Result<PathBuf> {
    let file_path = create_yaml_file_path(folder_path, rtdag.dag_name())?;
    let yaml = serde_yaml::to_string(rtdag)?;
    fs::write(&file_path, yaml).map_err(|source| ConvertError::Write {
        path: file_path.clone(),
        source,
    })?;
    info!("Wrote {}", file_path.display());
    Ok(file_path)
}

pub fn dump_rtdag_set_to_yaml(folder_path: &Path, rtdag_set: &[RtDag]) -> Result<Vec<PathBuf>> {
    rtdag_set
        .iter()
        .map(|rtdag| dump_rtdag_to_yaml(folder_path, rtdag))
        .collect()
}
