use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// opens a file with a bounded number of attempts and exponential backoff
/// between them. the external downloader may hand us partially written
/// files, so transient read failures are retried before giving up.
///
/// # Arguments
///
/// * `path` - file to open
/// * `max_attempts` - total attempts before surfacing the last error
/// * `backoff_ms` - initial backoff, doubled after each failed attempt
pub fn open_with_retry(
    path: &Path,
    max_attempts: u32,
    backoff_ms: u64,
) -> Result<File, std::io::Error> {
    let attempts = max_attempts.max(1);
    let mut backoff = backoff_ms;
    let mut last_err: Option<std::io::Error> = None;
    for attempt in 1..=attempts {
        match File::open(path) {
            Ok(f) => return Ok(f),
            Err(e) => {
                if attempt < attempts {
                    log::warn!(
                        "attempt {attempt}/{attempts} failed opening {}: {e}, retrying in {backoff}ms",
                        path.display()
                    );
                    std::thread::sleep(Duration::from_millis(backoff));
                    backoff = backoff.saturating_mul(2);
                }
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| std::io::Error::other("no attempts were made")))
}

/// writes bytes to a temporary sibling file and renames it into place.
/// a cancelled or crashed run never leaves a partially written artifact
/// at the destination path.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let tmp_path = temp_sibling(path);
    {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(bytes)?;
        tmp.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)
}

/// temporary path in the same directory as the destination, so the final
/// rename stays within one filesystem.
pub fn temp_sibling(path: &Path) -> std::path::PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("artifact"));
    path.with_file_name(format!(".{file_name}.tmp"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("tollwise_atomic_test_{}.txt", std::process::id()));
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "second");
        assert!(!temp_sibling(&path).exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_with_retry_missing_file_fails() {
        let path = std::env::temp_dir().join("tollwise_does_not_exist.csv");
        let result = open_with_retry(&path, 2, 1);
        assert!(result.is_err());
    }
}
