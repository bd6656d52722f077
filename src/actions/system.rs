use tracing::{debug, warn};

use super::SystemStatus;
use crate::api::UpstreamProvider;

const QUOTA_WARN_PERCENT: f64 = 90.0;

/// Provider name and its last reported quota
pub async fn get_system_status(provider: &dyn UpstreamProvider) -> SystemStatus {
    let usage = provider.api_usage().await;
    if usage.percent_used() >= QUOTA_WARN_PERCENT {
        warn!(
            "{} quota nearly exhausted: {}/{} used",
            provider.name(),
            usage.used(),
            usage.limit
        );
    } else {
        debug!("{} quota {:.0}% used", provider.name(), usage.percent_used());
    }

    SystemStatus {
        provider: provider.name().to_string(),
        usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::stub::StubProvider;
    use crate::models::ApiUsage;

    #[tokio::test]
    async fn test_system_status() {
        let usage = ApiUsage {
            limit: 100,
            remaining: 60,
            reset_seconds: 3600,
        };
        let provider = StubProvider::unconfigured().with_usage(usage);
        let status = get_system_status(&provider).await;

        assert_eq!(status.provider, "stub");
        assert_eq!(status.usage, usage);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["usage"]["resetSeconds"], 3600);
    }
}
