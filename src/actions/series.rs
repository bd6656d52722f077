use chrono::{DateTime, Utc};
use tracing::warn;

use super::SeriesResponse;
use crate::api::UpstreamProvider;
use crate::error::DataError;
use crate::mock_data;
use crate::models::Series;
use crate::normalize;

const FEATURED_LIMIT: usize = 5;

async fn fetch_series(provider: &dyn UpstreamProvider) -> Result<Vec<Series>, DataError> {
    let raw = provider.fetch_series().await?;
    let series = normalize::to_series(&raw);
    if series.is_empty() {
        return Err(DataError::Unavailable("Series API not implemented"));
    }
    Ok(series)
}

fn mock_response(error: DataError) -> SeriesResponse {
    SeriesResponse {
        series: mock_data::featured_series(),
        error: Some(error.to_string()),
        using_mock_data: true,
    }
}

/// Every series the provider lists; an empty list falls back to mock series
pub async fn get_all_series(provider: &dyn UpstreamProvider) -> SeriesResponse {
    match fetch_series(provider).await {
        Ok(series) => SeriesResponse {
            series,
            error: None,
            using_mock_data: false,
        },
        Err(e) => {
            warn!("Using mock series: {}", e);
            mock_response(e)
        }
    }
}

/// Up to five series that have not finished by `now`.
/// Mock series are returned as bundled.
pub async fn get_featured_series(provider: &dyn UpstreamProvider, now: DateTime<Utc>) -> SeriesResponse {
    let mut response = get_all_series(provider).await;
    if !response.using_mock_data {
        response.series.retain(|s| s.is_current(now));
    }
    response.series.truncate(FEATURED_LIMIT);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::stub::StubProvider;
    use crate::api::cricapi::ApiSeries;
    use crate::api::RawSeriesList;
    use chrono::TimeZone;

    fn raw_series(id: &str, start: &str, end: &str) -> ApiSeries {
        ApiSeries {
            id: id.to_string(),
            name: format!("Series {}", id),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unsupported_series_uses_mock() {
        let provider = StubProvider::unconfigured().on_series(|_| Ok(RawSeriesList::Unsupported));
        let response = get_all_series(&provider).await;

        assert!(response.using_mock_data);
        assert_eq!(response.error.as_deref(), Some("Series API not implemented"));
        assert_eq!(response.series, mock_data::featured_series());
    }

    #[tokio::test]
    async fn test_featured_series_drops_finished() {
        let provider = StubProvider::unconfigured().on_series(|_| {
            let mut items = vec![raw_series("old", "2024-06-01", "2024-07-01")];
            for i in 0..6 {
                items.push(raw_series(&format!("s{}", i), "2024-11-01", "2025-02-01"));
            }
            Ok(RawSeriesList::CricApi(items))
        });

        let now = Utc.with_ymd_and_hms(2024, 12, 6, 0, 0, 0).unwrap();
        let response = get_featured_series(&provider, now).await;

        assert!(!response.using_mock_data);
        assert_eq!(response.series.len(), 5);
        assert!(response.series.iter().all(|s| s.id != "old"));
        assert_eq!(response.series[0].id, "s0");
    }
}
