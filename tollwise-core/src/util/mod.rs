pub mod date_ops;
pub mod fs_ops;
pub mod stats;
