//! Daily activity streak.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

/// Records one activity event on `today`. Calling it again on the same day
/// leaves the counters untouched. `longest_streak` is raised on every branch that
/// sets `current_streak`, including a first activity and a reset, so it never
/// falls below the current streak.
pub fn update_streak(state: &StreakState, today: NaiveDate) -> StreakState {
    let mut next = state.clone();

    match state.last_activity_date {
        Some(last) => {
            let day_diff = (today - last).num_days();
            match day_diff {
                0 => {}
                1 => next.current_streak += 1,
                d if d > 1 => next.current_streak = 1,
                _ => {
                    log::warn!("Activity on {} precedes last activity {}, ignoring", today, last);
                    return next;
                }
            }
        }
        None => next.current_streak = 1,
    }

    next.longest_streak = next.longest_streak.max(next.current_streak);
    next.last_activity_date = Some(today);
    next
}
