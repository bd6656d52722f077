use std::sync::Arc;
use std::time::Duration;

use super::{
    matches, series, system, CurrentMatchesResponse, Deduplicator, LiveMatchesResponse,
    MatchDetailsResponse, ScorecardEnvelope, SeriesResponse, SystemStatus,
};
use crate::api::{Clock, UpstreamProvider};

/// Shared entry point for the HTTP server and the ticker.
///
/// Identical reads inside the dedupe window share one upstream fetch.
pub struct CricketService {
    provider: Arc<dyn UpstreamProvider>,
    clock: Arc<dyn Clock>,
    current: Deduplicator<CurrentMatchesResponse>,
    live: Deduplicator<LiveMatchesResponse>,
    details: Deduplicator<MatchDetailsResponse>,
    scorecards: Deduplicator<ScorecardEnvelope>,
    featured: Deduplicator<SeriesResponse>,
}

impl CricketService {
    pub fn new(provider: Arc<dyn UpstreamProvider>, clock: Arc<dyn Clock>, dedupe_window: Duration) -> Self {
        Self {
            provider,
            clock,
            current: Deduplicator::new(dedupe_window),
            live: Deduplicator::new(dedupe_window),
            details: Deduplicator::new(dedupe_window),
            scorecards: Deduplicator::new(dedupe_window),
            featured: Deduplicator::new(dedupe_window),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn current_matches(&self) -> CurrentMatchesResponse {
        let provider = Arc::clone(&self.provider);
        self.current
            .run("matches:current", || async move {
                matches::get_current_matches(provider.as_ref()).await
            })
            .await
    }

    pub async fn live_matches(&self) -> LiveMatchesResponse {
        let provider = Arc::clone(&self.provider);
        self.live
            .run("matches:live", || async move {
                matches::get_live_matches(provider.as_ref()).await
            })
            .await
    }

    pub async fn match_details(&self, match_id: &str) -> MatchDetailsResponse {
        let provider = Arc::clone(&self.provider);
        let now = self.clock.now();
        let id = match_id.to_string();
        self.details
            .run(&format!("match:{}", match_id), || async move {
                matches::get_match_details(provider.as_ref(), &id, now).await
            })
            .await
    }

    pub async fn match_scorecard(&self, match_id: &str) -> ScorecardEnvelope {
        let provider = Arc::clone(&self.provider);
        let id = match_id.to_string();
        self.scorecards
            .run(&format!("scorecard:{}", match_id), || async move {
                matches::get_match_scorecard(provider.as_ref(), &id).await
            })
            .await
    }

    pub async fn featured_series(&self) -> SeriesResponse {
        let provider = Arc::clone(&self.provider);
        let now = self.clock.now();
        self.featured
            .run("series:featured", || async move {
                series::get_featured_series(provider.as_ref(), now).await
            })
            .await
    }

    /// Not coalesced; reads cached quota only
    pub async fn system_status(&self) -> SystemStatus {
        system::get_system_status(self.provider.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::stub::StubProvider;
    use crate::api::SystemClock;

    fn service(provider: Arc<StubProvider>) -> CricketService {
        CricketService::new(provider, Arc::new(SystemClock), Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_reads_share_one_fetch() {
        let provider = Arc::new(StubProvider::unconfigured().with_delay(Duration::from_millis(200)));
        let service = service(Arc::clone(&provider));

        let (a, b, c) = tokio::join!(
            service.current_matches(),
            service.current_matches(),
            service.current_matches(),
        );

        assert_eq!(provider.calls(), 1);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(a.using_mock_data);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_per_match() {
        let provider = Arc::new(StubProvider::unconfigured());
        let service = service(Arc::clone(&provider));

        service.match_scorecard("1").await;
        service.match_scorecard("1").await;
        assert_eq!(provider.calls(), 1);

        service.match_scorecard("2").await;
        assert_eq!(provider.calls(), 2);

        tokio::time::advance(Duration::from_secs(6)).await;
        service.match_scorecard("1").await;
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_status_reports_provider() {
        let service = service(Arc::new(StubProvider::unconfigured()));
        assert_eq!(service.provider_name(), "stub");
        assert_eq!(service.system_status().await.provider, "stub");
    }
}
