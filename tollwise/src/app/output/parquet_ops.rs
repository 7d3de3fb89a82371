use super::OutputError;
use arrow::datatypes::FieldRef;
use arrow::datatypes::Schema;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tollwise_core::util::fs_ops;

/// serializes rows to a snappy-compressed parquet artifact. written to a
/// temporary sibling first and renamed into place on success.
pub fn write_parquet<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let serialize_err = |message: String| OutputError::Serialize {
        path: path.to_path_buf(),
        message,
    };
    let io_err = |e: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    // schema tracing samples the rows, so an empty partition has no schema
    // and produces no artifact
    if rows.is_empty() {
        return Ok(());
    }

    let tracing = serde_arrow::schema::TracingOptions::default()
        .enums_without_data_as_strings(true)
        .allow_null_fields(true);
    let fields = <Vec<FieldRef> as serde_arrow::schema::SchemaLike>::from_samples(rows, tracing)
        .map_err(|e| serialize_err(format!("failure tracing arrow schema: {e}")))?;
    let batch = serde_arrow::to_record_batch(&fields, &rows)
        .map_err(|e| serialize_err(format!("failure building record batch: {e}")))?;

    let tmp_path = fs_ops::temp_sibling(path);
    let file = File::create(&tmp_path).map_err(io_err)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let schema = Arc::new(Schema::new(fields));
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))
        .map_err(|e| serialize_err(format!("failure opening parquet writer: {e}")))?;
    writer
        .write(&batch)
        .map_err(|e| serialize_err(format!("failure writing record batch: {e}")))?;
    writer
        .close()
        .map_err(|e| serialize_err(format!("failure finalizing parquet file: {e}")))?;
    std::fs::rename(&tmp_path, path).map_err(io_err)
}
