use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{CurrentMatchesResponse, LiveMatchesResponse, MatchDetailsResponse, ScorecardEnvelope};
use crate::api::UpstreamProvider;
use crate::error::DataError;
use crate::mock_data;
use crate::models::{Match, MatchSummary};
use crate::normalize::{self, MatchContext};

async fn fetch_summaries(provider: &dyn UpstreamProvider) -> Result<Vec<MatchSummary>, DataError> {
    let raw = provider.fetch_current_matches().await?;
    Ok(normalize::to_match_summaries(&raw))
}

/// Current matches split into live, upcoming and completed.
/// Falls back to the bundled lists on any failure.
pub async fn get_current_matches(provider: &dyn UpstreamProvider) -> CurrentMatchesResponse {
    match fetch_summaries(provider).await {
        Ok(summaries) => CurrentMatchesResponse {
            matches: normalize::categorize(summaries),
            error: None,
            using_mock_data: false,
        },
        Err(e) => {
            warn!("Using mock matches: {}", e);
            CurrentMatchesResponse {
                matches: mock_data::categorized_matches(),
                error: Some(e.to_string()),
                using_mock_data: true,
            }
        }
    }
}

/// Only the matches in the live group
pub async fn get_live_matches(provider: &dyn UpstreamProvider) -> LiveMatchesResponse {
    match fetch_summaries(provider).await {
        Ok(summaries) => LiveMatchesResponse {
            matches: normalize::categorize(summaries).live,
            error: None,
            using_mock_data: false,
        },
        Err(e) => {
            warn!("Using mock live matches: {}", e);
            LiveMatchesResponse {
                matches: mock_data::live_matches(),
                error: Some(e.to_string()),
                using_mock_data: true,
            }
        }
    }
}

/// Scorecard first; match info comes from the scorecard payload when it has one
async fn detail_from_scorecard(
    provider: &dyn UpstreamProvider,
    match_id: &str,
    now: DateTime<Utc>,
) -> Result<Match, DataError> {
    let card = provider.fetch_match_scorecard(match_id).await?;
    let info = match card.embedded_match() {
        Some(info) => info,
        None => provider.fetch_match_info(match_id).await?,
    };
    Ok(normalize::to_full_match(&info, Some(&card), now)?)
}

async fn detail_from_info(
    provider: &dyn UpstreamProvider,
    match_id: &str,
    now: DateTime<Utc>,
) -> Result<Match, DataError> {
    let info = provider.fetch_match_info(match_id).await?;
    Ok(normalize::to_full_match(&info, None, now)?)
}

/// Full match detail.
///
/// Tries the scorecard, then basic match info with no innings. When both
/// fail the envelope carries the error and no match, except for the bundled
/// sample match which is served as mock data.
pub async fn get_match_details(
    provider: &dyn UpstreamProvider,
    match_id: &str,
    now: DateTime<Utc>,
) -> MatchDetailsResponse {
    match detail_from_scorecard(provider, match_id, now).await {
        Ok(detail) => {
            return MatchDetailsResponse {
                match_detail: Some(detail),
                error: None,
                using_mock_data: false,
            }
        }
        Err(e) => debug!("Scorecard unavailable for {}: {}", match_id, e),
    }

    match detail_from_info(provider, match_id, now).await {
        Ok(detail) => MatchDetailsResponse {
            match_detail: Some(detail),
            error: None,
            using_mock_data: false,
        },
        Err(e) if match_id == mock_data::SAMPLE_MATCH_ID => {
            warn!("Using mock detail for {}: {}", match_id, e);
            MatchDetailsResponse {
                match_detail: Some(mock_data::sample_match_detail()),
                error: Some(e.to_string()),
                using_mock_data: true,
            }
        }
        Err(e) => {
            warn!("Failed to load match {}: {}", match_id, e);
            MatchDetailsResponse {
                match_detail: None,
                error: Some(e.to_string()),
                using_mock_data: false,
            }
        }
    }
}

/// Normalized innings for one match, without fallback
pub async fn get_match_scorecard(provider: &dyn UpstreamProvider, match_id: &str) -> ScorecardEnvelope {
    let card = match provider.fetch_match_scorecard(match_id).await {
        Ok(card) => card,
        Err(e) => {
            warn!("Failed to load scorecard {}: {}", match_id, e);
            return ScorecardEnvelope {
                match_id: match_id.to_string(),
                innings: Vec::new(),
                error: Some(e.to_string()),
            };
        }
    };

    let ctx = card
        .embedded_match()
        .and_then(|info| normalize::to_full_match(&info, None, DateTime::<Utc>::default()).ok())
        .map(|m| MatchContext::from_match(&m))
        .unwrap_or_else(|| MatchContext::placeholder(match_id));

    ScorecardEnvelope {
        match_id: match_id.to_string(),
        innings: normalize::to_innings_list(&card, &ctx),
        error: None,
    }
}
