use crate::model::trip::Period;

#[derive(thiserror::Error, Debug)]
pub enum ImputeError {
    #[error(
        "cannot impute {period} month {year}-{month:02}: needs both an earlier and a later \
         observed month (set allow_single_neighbor to relax)"
    )]
    InsufficientData {
        period: Period,
        year: i32,
        month: u32,
    },
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}
