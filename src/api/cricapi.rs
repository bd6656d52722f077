use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Days;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::raw::{LooseNumber, RawMatch, RawMatchList, RawScorecard, RawSeriesList};
use super::UpstreamProvider;
use crate::error::UpstreamError;
use crate::models::ApiUsage;

pub const PROVIDER_NAME: &str = "cricapi";
pub const DEFAULT_BASE_URL: &str = "https://api.cricapi.com/v1";

/// Every CricAPI response is wrapped in this envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    status: Option<String>,
    reason: Option<String>,
    info: Option<ApiInfo>,
}

/// Quota block of the envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    #[serde(default)]
    pub hits_today: u64,
    #[serde(default)]
    pub hits_limit: u64,
}

/// Match from currentMatches / match_info
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    #[serde(default)]
    pub id: String,
    /// "Team1 vs Team2, Match Number"
    #[serde(default)]
    pub name: String,
    /// "t20", "odi", "test"
    pub match_type: Option<String>,
    #[serde(default)]
    pub status: String,
    pub venue: Option<String>,
    /// "2024-12-06"
    pub date: Option<String>,
    #[serde(rename = "dateTimeGMT")]
    pub date_time_gmt: Option<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub team_info: Vec<TeamInfo>,
    #[serde(default)]
    pub score: Vec<TeamScore>,
    #[serde(rename = "series_id")]
    pub series_id: Option<String>,
    #[serde(default)]
    pub match_started: bool,
    #[serde(default)]
    pub match_ended: bool,
    pub match_winner: Option<String>,
    #[serde(rename = "venue_info")]
    pub venue_info: Option<VenueInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shortname: String,
    pub img: Option<String>,
}

/// One innings total as reported on the match
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamScore {
    pub r: Option<LooseNumber>,
    pub w: Option<LooseNumber>,
    pub o: Option<LooseNumber>,
    /// e.g. "India Inning 1"
    #[serde(default)]
    pub inning: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueInfo {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeries {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// "2024-12-01"
    pub start_date: Option<String>,
    /// Either a full date or "Dec 15"
    pub end_date: Option<String>,
    pub odi: Option<LooseNumber>,
    pub t20: Option<LooseNumber>,
    pub test: Option<LooseNumber>,
    pub matches: Option<LooseNumber>,
}

/// match_scorecard payload: match info plus innings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScorecardData {
    #[serde(flatten)]
    pub info: ApiMatch,
    #[serde(default)]
    pub scorecard: Vec<ScorecardInnings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScorecardInnings {
    #[serde(default)]
    pub inning: String,
    #[serde(default)]
    pub batting: Vec<BattingEntry>,
    #[serde(default)]
    pub bowling: Vec<BowlingEntry>,
    pub extras: Option<ExtrasEntry>,
    pub totals: Option<TotalsEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BattingEntry {
    #[serde(default)]
    pub batsman: PlayerRef,
    /// Dismissal code, e.g. "catch", "bowled", "lbw"
    pub dismissal: Option<String>,
    #[serde(rename = "dismissal-text")]
    pub dismissal_text: Option<String>,
    pub bowler: Option<PlayerRef>,
    pub catcher: Option<PlayerRef>,
    pub r: Option<LooseNumber>,
    pub b: Option<LooseNumber>,
    #[serde(rename = "4s")]
    pub fours: Option<LooseNumber>,
    #[serde(rename = "6s")]
    pub sixes: Option<LooseNumber>,
    pub sr: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BowlingEntry {
    #[serde(default)]
    pub bowler: PlayerRef,
    pub o: Option<LooseNumber>,
    pub m: Option<LooseNumber>,
    pub r: Option<LooseNumber>,
    pub w: Option<LooseNumber>,
    pub nb: Option<LooseNumber>,
    pub wd: Option<LooseNumber>,
    pub eco: Option<LooseNumber>,
}

/// Only the total and byes are reported
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtrasEntry {
    pub r: Option<LooseNumber>,
    pub b: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TotalsEntry {
    #[serde(rename = "R")]
    pub runs: Option<LooseNumber>,
    #[serde(rename = "O")]
    pub overs: Option<LooseNumber>,
    #[serde(rename = "W")]
    pub wickets: Option<LooseNumber>,
}

/// Client for CricketData.org (CricAPI)
pub struct CricApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    clock: Arc<dyn Clock>,
    usage: RwLock<ApiUsage>,
}

impl CricApiClient {
    /// Create a new client. A missing key is only reported when a request is made.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            clock,
            usage: RwLock::new(ApiUsage::default()),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| UpstreamError::missing_key("CRICAPI_KEY"))?;

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Fetching CricAPI endpoint: {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", api_key)])
            .query(params)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("CricAPI error: {} - {}", status, text);
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if let Some(info) = &envelope.info {
            self.record_usage(info).await;
        }

        if envelope.status.as_deref() == Some("failure") {
            let reason = envelope
                .reason
                .unwrap_or_else(|| "Unknown API failure".to_string());
            warn!("CricAPI reported failure on {}: {}", endpoint, reason);
            return Err(UpstreamError::Api { reason });
        }

        envelope.data.ok_or_else(|| UpstreamError::Api {
            reason: format!("{} response contained no data", endpoint),
        })
    }

    /// Quotas are daily and reset at UTC midnight
    async fn record_usage(&self, info: &ApiInfo) {
        let now = self.clock.now();
        let reset_seconds = now
            .date_naive()
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|midnight| (midnight.and_utc() - now).num_seconds().max(0) as u64)
            .unwrap_or(0);

        *self.usage.write().await = ApiUsage {
            limit: info.hits_limit,
            remaining: info.hits_limit.saturating_sub(info.hits_today),
            reset_seconds,
        };
    }
}

#[async_trait]
impl UpstreamProvider for CricApiClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch_current_matches(&self) -> Result<RawMatchList, UpstreamError> {
        let matches: Vec<ApiMatch> = self.get("currentMatches", &[("offset", "0")]).await?;
        info!("CricAPI returned {} matches", matches.len());
        Ok(RawMatchList::CricApi(matches))
    }

    async fn fetch_match_info(&self, match_id: &str) -> Result<RawMatch, UpstreamError> {
        let info: ApiMatch = self.get("match_info", &[("id", match_id)]).await?;
        if info.id.is_empty() {
            return Err(UpstreamError::NotFound {
                match_id: match_id.to_string(),
            });
        }
        Ok(RawMatch::CricApi(info))
    }

    async fn fetch_match_scorecard(&self, match_id: &str) -> Result<RawScorecard, UpstreamError> {
        let card: ScorecardData = self.get("match_scorecard", &[("id", match_id)]).await?;
        Ok(RawScorecard::CricApi(card))
    }

    async fn fetch_series(&self) -> Result<RawSeriesList, UpstreamError> {
        let series: Vec<ApiSeries> = self.get("series", &[("offset", "0")]).await?;
        Ok(RawSeriesList::CricApi(series))
    }

    async fn api_usage(&self) -> ApiUsage {
        *self.usage.read().await
    }
}
