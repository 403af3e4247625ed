use super::views::WebItem;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default location of the web artifact, relative to the run directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "data/items_for_web.json";

/// Compact JSON array of web records.
pub fn render_web_artifact(items: &[WebItem]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(items)
}

/// Writes `bytes` beside `path` and renames the temp file into place, so readers
/// only ever see a complete artifact.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let result = stage(&staging, bytes).and_then(|()| fs::rename(&staging, path));
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn stage(staging: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(staging)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".tmp");
    path.with_file_name(name)
}
