use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use pronunciation_scoring::Report;

/// Writes the report next to `path` first and renames it into place, so an
/// interrupted run never leaves a truncated report behind.
pub fn write_report(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create report directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let staging = staging_path(path);
    let result = write_pretty_json(&staging, report)
        .and_then(|()| {
            fs::rename(&staging, path).map_err(|err| {
                format!(
                    "Failed to move report into place at '{}': {err}",
                    path.display()
                )
            })
        });
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_pretty_json(path: &Path, report: &Report) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|err| format!("Failed to create '{}': {err}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|err| format!("Failed to serialize report '{}': {err}", path.display()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|err| format!("Failed to flush report '{}': {err}", path.display()))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "pronunciation-report.json".into());
    name.push(".partial");
    path.with_file_name(name)
}
