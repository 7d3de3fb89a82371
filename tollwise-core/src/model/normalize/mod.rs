mod drop_reason;
mod error;
mod field;
mod normalizer;
mod row_parse;
mod schema_map;
mod summary;

pub use drop_reason::DropReason;
pub use error::NormalizeError;
pub use field::CanonicalField;
pub use normalizer::Normalizer;
pub use row_parse::RowParse;
pub use schema_map::{SchemaBinding, SchemaMap};
pub use summary::NormalizationSummary;
