use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits that end a solve or a single phase. Unset means unlimited.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    pub seconds_spent_limit: Option<u64>,

    /// Added to `seconds_spent_limit` when both are set.
    pub minutes_spent_limit: Option<u64>,

    pub step_count_limit: Option<u64>,

    /// Steps in a row without a new best score.
    pub unimproved_step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Combined wall clock limit; `None` when it adds up to zero.
    pub fn time_limit(&self) -> Option<Duration> {
        let minutes = self.minutes_spent_limit.unwrap_or(0);
        let seconds = self.seconds_spent_limit.unwrap_or(0) + minutes * 60;
        (seconds > 0).then(|| Duration::from_secs(seconds))
    }
}
