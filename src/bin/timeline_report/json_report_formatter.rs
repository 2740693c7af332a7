use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

pub fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create {what} output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create {what} file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value).map_err(|err| {
        format!(
            "Failed to serialize {what} JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize {what} file '{}': {err}", path.display()))?;
    Ok(())
}

pub fn write_text(path: &Path, contents: &str, what: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create {what} output directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    fs::write(path, contents)
        .map_err(|err| format!("Failed to write {what} file '{}': {err}", path.display()))
}
