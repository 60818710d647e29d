//! Reading and writing the record documents
//!
//! `transactions.json` and `budget.json` are both a bare JSON array of
//! records. A missing document reads as an empty list. Saves go to a sibling
//! `.tmp` file which is then renamed over the document.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Read every record of the document at `path`
pub fn load_records<T: DeserializeOwned>(path: &Path) -> TrackerResult<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(TrackerError::Storage(format!(
                "Cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        TrackerError::Storage(format!("{} is not a valid record list: {}", path.display(), e))
    })
}

/// Replace the document at `path` with `records`
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> TrackerResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| {
            TrackerError::Storage(format!("Cannot create {}: {}", dir.display(), e))
        })?;
    }

    let mut body = serde_json::to_vec_pretty(records)
        .map_err(|e| TrackerError::Storage(format!("Cannot encode records: {}", e)))?;
    body.push(b'\n');

    let staged = staging_path(path);
    if let Err(e) = write_synced(&staged, &body).and_then(|()| fs::rename(&staged, path)) {
        let _ = fs::remove_file(&staged);
        return Err(TrackerError::Storage(format!(
            "Cannot save {}: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_synced(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(body)?;
    file.sync_all()
}
