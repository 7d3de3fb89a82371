mod csv_ops;
mod error;
mod json_ops;
mod parquet_ops;

pub use csv_ops::write_csv;
pub use error::OutputError;
pub use json_ops::{append_jsonl, write_json};
pub use parquet_ops::write_parquet;
