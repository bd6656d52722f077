use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::cache::MatchListCache;
use super::raw::{LooseNumber, RawMatch, RawMatchList, RawScorecard, RawSeriesList};
use super::UpstreamProvider;
use crate::error::UpstreamError;
use crate::models::ApiUsage;

pub const PROVIDER_NAME: &str = "cricbuzz";
pub const DEFAULT_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";

/// Live/recent matches response (nested by match type and series)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResponse {
    #[serde(default)]
    pub type_matches: Vec<TypeMatches>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMatches {
    #[serde(default)]
    pub series_matches: Vec<SeriesMatches>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMatches {
    pub series_ad_wrapper: Option<SeriesAdWrapper>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAdWrapper {
    pub series_id: Option<LooseNumber>,
    pub series_name: Option<String>,
    #[serde(default)]
    pub matches: Vec<LiveMatchItem>,
}

/// One match in the live list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatchItem {
    #[serde(default)]
    pub match_info: MatchInfo,
    pub match_score: Option<MatchScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub match_id: Option<LooseNumber>,
    pub series_id: Option<LooseNumber>,
    pub series_name: Option<String>,
    pub match_format: Option<String>,
    /// Epoch millis, usually as string
    pub start_date: Option<LooseNumber>,
    /// e.g. "Complete", "In Progress"
    #[serde(default)]
    pub state: String,
    /// e.g. "Nigeria won by 23 runs"
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub team1: TeamRef,
    #[serde(default)]
    pub team2: TeamRef,
    pub venue_info: Option<VenueInfo>,
}

impl MatchInfo {
    pub fn id(&self) -> String {
        self.match_id.as_ref().map(LooseNumber::as_text).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub team_id: Option<LooseNumber>,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_s_name: String,
    pub image_id: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueInfo {
    pub id: Option<LooseNumber>,
    pub ground: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub team1_score: Option<TeamScore>,
    pub team2_score: Option<TeamScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamScore {
    pub inngs1: Option<InningsScore>,
    pub inngs2: Option<InningsScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InningsScore {
    pub runs: Option<LooseNumber>,
    pub wickets: Option<LooseNumber>,
    pub overs: Option<LooseNumber>,
}

/// Scorecard response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardResponse {
    #[serde(default)]
    pub scorecard: Vec<InningsCard>,
    pub match_header: Option<MatchInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsCard {
    pub innings_id: Option<LooseNumber>,
    #[serde(default)]
    pub batsman: Vec<Batsman>,
    #[serde(default)]
    pub bowler: Vec<Bowler>,
    pub score_details: Option<ScoreDetails>,
    pub extras: Option<ExtrasCard>,
    #[serde(default)]
    pub fow: Vec<FallOfWicketCard>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub runs: Option<LooseNumber>,
    pub wickets: Option<LooseNumber>,
    pub overs: Option<LooseNumber>,
    pub run_rate: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Batsman {
    pub id: Option<LooseNumber>,
    #[serde(default)]
    pub name: String,
    pub runs: Option<LooseNumber>,
    pub balls: Option<LooseNumber>,
    pub fours: Option<LooseNumber>,
    pub sixes: Option<LooseNumber>,
    pub strkrate: Option<LooseNumber>,
    /// Dismissal text, e.g. "c Smith b Starc", "not out"
    pub outdec: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bowler {
    pub id: Option<LooseNumber>,
    #[serde(default)]
    pub name: String,
    pub overs: Option<LooseNumber>,
    pub maidens: Option<LooseNumber>,
    pub runs: Option<LooseNumber>,
    pub wickets: Option<LooseNumber>,
    pub economy: Option<LooseNumber>,
    pub no_balls: Option<LooseNumber>,
    pub wides: Option<LooseNumber>,
    pub dots: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasCard {
    pub total: Option<LooseNumber>,
    pub byes: Option<LooseNumber>,
    pub leg_byes: Option<LooseNumber>,
    pub wides: Option<LooseNumber>,
    pub no_balls: Option<LooseNumber>,
    pub penalty: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicketCard {
    pub batsman_id: Option<LooseNumber>,
    #[serde(default)]
    pub batsman_name: String,
    pub over_nbr: Option<LooseNumber>,
    pub runs: Option<LooseNumber>,
    pub wkt_nbr: Option<LooseNumber>,
}

/// Flatten typeMatches -> seriesMatches -> seriesAdWrapper -> matches,
/// copying the wrapper's series name onto matches that lack one
pub fn flatten_live_response(response: LiveResponse) -> Vec<LiveMatchItem> {
    let mut matches = Vec::new();

    for type_matches in response.type_matches {
        for series in type_matches.series_matches {
            let Some(wrapper) = series.series_ad_wrapper else {
                continue;
            };

            for mut item in wrapper.matches {
                if item.match_info.series_name.is_none() {
                    item.match_info.series_name = wrapper.series_name.clone();
                }
                if item.match_info.series_id.is_none() {
                    item.match_info.series_id = wrapper.series_id.clone();
                }
                matches.push(item);
            }
        }
    }

    matches
}

/// Client for the Cricbuzz API on RapidAPI
pub struct CricbuzzClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: Option<String>,
    cache: MatchListCache<LiveMatchItem>,
    usage: RwLock<ApiUsage>,
}

impl CricbuzzClient {
    /// Create a new client. A missing key is only reported when a request is made.
    pub fn new(
        base_url: &str,
        host: &str,
        api_key: Option<String>,
        timeout: Duration,
        cache: MatchListCache<LiveMatchItem>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            cache,
            usage: RwLock::new(ApiUsage::default()),
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| UpstreamError::missing_key("RAPIDAPI_KEY"))?;

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Fetching Cricbuzz endpoint: {}", url);

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.host)
            .header("Accept", "application/json")
            .send()
            .await?;

        self.record_usage(response.headers()).await;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("Cricbuzz API error: {} - {}", status, text);
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// RapidAPI reports quota in response headers
    async fn record_usage(&self, headers: &HeaderMap) {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        let Some(limit) = read("x-ratelimit-requests-limit") else {
            return;
        };

        let usage = ApiUsage {
            limit,
            remaining: read("x-ratelimit-requests-remaining").unwrap_or(0),
            reset_seconds: read("x-ratelimit-requests-reset").unwrap_or(0),
        };
        *self.usage.write().await = usage;
    }

    /// Fetch and flatten the live list, refreshing the cache slot
    async fn fetch_live_items(&self) -> Result<Vec<LiveMatchItem>, UpstreamError> {
        let response: LiveResponse = self.get("matches/v1/live").await?;
        let matches = flatten_live_response(response);

        self.cache.store(matches.clone()).await;
        info!("Cricbuzz returned {} matches", matches.len());

        Ok(matches)
    }
}

#[async_trait]
impl UpstreamProvider for CricbuzzClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch_current_matches(&self) -> Result<RawMatchList, UpstreamError> {
        Ok(RawMatchList::Cricbuzz(self.fetch_live_items().await?))
    }

    /// The match info endpoint is unreliable, so resolve the id against the
    /// cached live list and re-fetch the whole list on a miss
    async fn fetch_match_info(&self, match_id: &str) -> Result<RawMatch, UpstreamError> {
        if let Some(item) = self.cache.find(|m| m.match_info.id() == match_id).await {
            debug!("Match {} resolved from cache", match_id);
            return Ok(RawMatch::Cricbuzz(item));
        }

        self.fetch_live_items()
            .await?
            .into_iter()
            .find(|m| m.match_info.id() == match_id)
            .map(RawMatch::Cricbuzz)
            .ok_or_else(|| UpstreamError::NotFound {
                match_id: match_id.to_string(),
            })
    }

    async fn fetch_match_scorecard(&self, match_id: &str) -> Result<RawScorecard, UpstreamError> {
        let endpoint = format!("mcenter/v1/{}/hscard", urlencoding::encode(match_id));
        let card: ScorecardResponse = self.get(&endpoint).await?;
        Ok(RawScorecard::Cricbuzz(card))
    }

    async fn fetch_series(&self) -> Result<RawSeriesList, UpstreamError> {
        Ok(RawSeriesList::Unsupported)
    }

    async fn api_usage(&self) -> ApiUsage {
        *self.usage.read().await
    }
}
