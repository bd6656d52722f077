//! Read operations that combine a provider, the normalizer and the mock
//! fallback. Every action returns an envelope; none of them fail.

pub mod dedupe;
pub mod matches;
pub mod series;
pub mod service;
pub mod system;

#[cfg(test)]
pub(crate) mod stub;

use serde::{Deserialize, Serialize};

use crate::models::{ApiUsage, CategorizedMatches, Innings, Match, MatchSummary, Series};

pub use dedupe::Deduplicator;
pub use matches::{get_current_matches, get_live_matches, get_match_details, get_match_scorecard};
pub use series::{get_all_series, get_featured_series};
pub use service::CricketService;
pub use system::get_system_status;

/// `{live, upcoming, completed, error?, usingMockData}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMatchesResponse {
    #[serde(flatten)]
    pub matches: CategorizedMatches,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub using_mock_data: bool,
}

/// `{matches, error?, usingMockData}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatchesResponse {
    pub matches: Vec<MatchSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub using_mock_data: bool,
}

/// `{match, error?, usingMockData}`; `match` is null when nothing could be loaded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetailsResponse {
    #[serde(rename = "match")]
    pub match_detail: Option<Match>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub using_mock_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardEnvelope {
    pub match_id: String,

    pub innings: Vec<Innings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `{series, error?, usingMockData}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub series: Vec<Series>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub using_mock_data: bool,
}

/// Active provider and its quota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub provider: String,
    pub usage: ApiUsage,
}
