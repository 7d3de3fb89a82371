mod period;
mod trip_id;
mod trip_record;

pub use period::Period;
pub use trip_id::TripId;
pub use trip_record::TripRecord;
