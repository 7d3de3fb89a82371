use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("failure writing artifact {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure serializing rows for {path}: {message}")]
    Serialize { path: PathBuf, message: String },
}
