use super::OutputError;
use serde::Serialize;
use std::path::Path;
use tollwise_core::util::fs_ops;

/// serializes rows to a headered CSV artifact, written atomically.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(|e| OutputError::Serialize {
            path: path.to_path_buf(),
            message: format!("{e}"),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Serialize {
            path: path.to_path_buf(),
            message: format!("{e}"),
        })?;
    fs_ops::atomic_write(path, &bytes).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
