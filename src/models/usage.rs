use serde::{Deserialize, Serialize};

/// Upstream request quota as last reported by the provider.
/// All zeros when the provider has not reported anything yet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiUsage {
    pub limit: u64,
    pub remaining: u64,
    pub reset_seconds: u64,
}

impl ApiUsage {
    pub fn used(&self) -> u64 {
        self.limit.saturating_sub(self.remaining)
    }

    /// Share of the quota consumed, 0.0 - 100.0
    pub fn percent_used(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        self.used() as f64 / self.limit as f64 * 100.0
    }
}
