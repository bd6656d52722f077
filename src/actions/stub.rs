//! Scripted provider for action and service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{RawMatch, RawMatchList, RawScorecard, RawSeriesList, UpstreamProvider};
use crate::error::UpstreamError;
use crate::models::ApiUsage;

type Reply<T> = Box<dyn Fn(&str) -> Result<T, UpstreamError> + Send + Sync>;

fn unconfigured<T>(_: &str) -> Result<T, UpstreamError> {
    Err(UpstreamError::missing_key("RAPIDAPI_KEY"))
}

pub struct StubProvider {
    current: Reply<RawMatchList>,
    info: Reply<RawMatch>,
    scorecard: Reply<RawScorecard>,
    series: Reply<RawSeriesList>,
    usage: ApiUsage,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubProvider {
    /// Every read fails with a configuration error
    pub fn unconfigured() -> Self {
        Self {
            current: Box::new(unconfigured::<RawMatchList>),
            info: Box::new(unconfigured::<RawMatch>),
            scorecard: Box::new(unconfigured::<RawScorecard>),
            series: Box::new(unconfigured::<RawSeriesList>),
            usage: ApiUsage::default(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn on_current<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<RawMatchList, UpstreamError> + Send + Sync + 'static,
    {
        self.current = Box::new(f);
        self
    }

    pub fn on_info<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<RawMatch, UpstreamError> + Send + Sync + 'static,
    {
        self.info = Box::new(f);
        self
    }

    pub fn on_scorecard<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<RawScorecard, UpstreamError> + Send + Sync + 'static,
    {
        self.scorecard = Box::new(f);
        self
    }

    pub fn on_series<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<RawSeriesList, UpstreamError> + Send + Sync + 'static,
    {
        self.series = Box::new(f);
        self
    }

    pub fn with_usage(mut self, usage: ApiUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Each fetch sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl UpstreamProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_current_matches(&self) -> Result<RawMatchList, UpstreamError> {
        self.hit().await;
        (self.current)("")
    }

    async fn fetch_match_info(&self, match_id: &str) -> Result<RawMatch, UpstreamError> {
        self.hit().await;
        (self.info)(match_id)
    }

    async fn fetch_match_scorecard(&self, match_id: &str) -> Result<RawScorecard, UpstreamError> {
        self.hit().await;
        (self.scorecard)(match_id)
    }

    async fn fetch_series(&self) -> Result<RawSeriesList, UpstreamError> {
        self.hit().await;
        (self.series)("")
    }

    async fn api_usage(&self) -> ApiUsage {
        self.usage
    }
}
