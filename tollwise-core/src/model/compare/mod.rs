mod border;
mod volumes;

pub use border::{border_effect, BorderZoneEffect};
pub use volumes::{quarterly_volumes, QuarterlyVolume};
