use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MatchFormat;

/// A tournament or bilateral series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,

    pub name: String,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    pub format: MatchFormat,

    pub total_matches: u32,
}

impl Series {
    /// Still running or yet to start at `now`
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.end_date >= now
    }
}
