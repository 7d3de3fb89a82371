use super::OutputError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tollwise_core::util::fs_ops;

/// writes one value as pretty-printed JSON, atomically.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| OutputError::Serialize {
        path: path.to_path_buf(),
        message: format!("{e}"),
    })?;
    fs_ops::atomic_write(path, &bytes).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// appends one JSON document per line. the audit log accumulates across
/// runs, so this is the one artifact not written by atomic replace.
pub fn append_jsonl<T: Serialize>(path: &Path, items: &[T]) -> Result<(), OutputError> {
    let io_err = |e: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    for item in items {
        let line = serde_json::to_string(item).map_err(|e| OutputError::Serialize {
            path: path.to_path_buf(),
            message: format!("{e}"),
        })?;
        writeln!(file, "{line}").map_err(io_err)?;
    }
    file.sync_all().map_err(io_err)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_append_jsonl_accumulates() {
        let path =
            std::env::temp_dir().join(format!("tollwise_jsonl_test_{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        append_jsonl(&path, &[Item { id: 1 }]).unwrap();
        append_jsonl(&path, &[Item { id: 2 }, Item { id: 3 }]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        let _ = std::fs::remove_file(&path);
    }
}
