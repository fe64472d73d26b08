pub mod clock;
pub mod overflight;

pub use clock::{FixedClock, SystemClock, WallClock};
pub use overflight::{
    compute_next_free_intervals, format_duration, Interval, IntervalReport, OverflightScheduler,
    Schedule,
};
