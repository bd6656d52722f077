pub mod cache;
pub mod clock;
pub mod cricapi;
pub mod cricbuzz;
pub mod raw;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, ProviderKind};
use crate::error::UpstreamError;
use crate::models::ApiUsage;

pub use cache::MatchListCache;
pub use clock::{Clock, SystemClock};
pub use cricapi::CricApiClient;
pub use cricbuzz::CricbuzzClient;
pub use raw::{LooseNumber, RawMatch, RawMatchList, RawScorecard, RawSeriesList};

/// A cricket data source. Both providers expose the same four reads.
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    /// Short provider identifier, e.g. "cricbuzz"
    fn name(&self) -> &'static str;

    async fn fetch_current_matches(&self) -> Result<RawMatchList, UpstreamError>;

    /// Basic information for a single match
    async fn fetch_match_info(&self, match_id: &str) -> Result<RawMatch, UpstreamError>;

    /// Innings-level detail. Often unavailable before a match starts.
    async fn fetch_match_scorecard(&self, match_id: &str) -> Result<RawScorecard, UpstreamError>;

    async fn fetch_series(&self) -> Result<RawSeriesList, UpstreamError>;

    /// Last quota figures reported by the provider, zeros if none seen yet
    async fn api_usage(&self) -> ApiUsage;
}

/// Construct the provider selected by configuration
pub fn build_provider(config: &Config, clock: Arc<dyn Clock>) -> Arc<dyn UpstreamProvider> {
    let base_url = config.base_url();
    let timeout = config.request_timeout();

    match config.provider {
        ProviderKind::Cricbuzz => {
            let cache = MatchListCache::new(Duration::from_secs(config.match_cache_ttl), clock);
            Arc::new(CricbuzzClient::new(
                &base_url,
                &config.rapidapi_host,
                config.rapidapi_key.clone(),
                timeout,
                cache,
            ))
        }
        ProviderKind::CricApi => Arc::new(CricApiClient::new(
            &base_url,
            config.cricapi_key.clone(),
            timeout,
            clock,
        )),
    }
}
