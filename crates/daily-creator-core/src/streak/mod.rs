mod state;
mod tracker;

pub use state::{
    format_day, parse_day, DayGap, StreakState, LAST_CREATED_KEY, NOTIFICATION_TIME_KEY,
    STREAK_KEY,
};
pub use tracker::{MotivationResult, StreakCheck, StreakSnapshot, StreakTracker, TrackerOptions};
