#[derive(thiserror::Error, Debug)]
pub enum NormalizeError {
    #[error("no column for mandatory field '{field}' (accepted names: {candidates})")]
    MissingColumn { field: String, candidates: String },
}
