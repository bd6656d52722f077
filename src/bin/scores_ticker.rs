use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_scores::actions::CricketService;
use cricket_scores::api::{build_provider, Clock, SystemClock};
use cricket_scores::config::Config;
use cricket_scores::models::MatchSummary;
use cricket_scores::workers::PollingWorker;

/// What the ticker follows
enum Feed {
    Live,
    Current,
    Match(String),
    Series,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scores_ticker=info,cricket_scores=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let feed = parse_feed(&args)?;

    let config = Config::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let provider = build_provider(&config, Arc::clone(&clock));
    let service = Arc::new(CricketService::new(
        provider,
        clock,
        Duration::from_secs(config.dedupe_window),
    ));

    match feed {
        Feed::Live => {
            let interval = Duration::from_secs(config.live_poll_interval);
            follow(service, interval, "live", |s| async move {
                let response = s.live_matches().await;
                if response.using_mock_data {
                    warn!("Showing demo data: {}", response.error.unwrap_or_default());
                }
                info!("{} live matches", response.matches.len());
                for m in &response.matches {
                    info!("  {}", ticker_line(m));
                }
            })
            .await
        }
        Feed::Current => {
            let interval = Duration::from_secs(config.live_poll_interval);
            follow(service, interval, "current", |s| async move {
                let response = s.current_matches().await;
                let m = &response.matches;
                if m.is_empty() {
                    info!("No current matches");
                    return;
                }
                info!(
                    "{} matches: {} live, {} upcoming, {} completed{}",
                    m.len(),
                    m.live.len(),
                    m.upcoming.len(),
                    m.completed.len(),
                    if response.using_mock_data { " (demo data)" } else { "" }
                );
                for summary in &m.live {
                    info!("  {}", ticker_line(summary));
                }
            })
            .await
        }
        Feed::Match(id) => {
            let interval = Duration::from_secs(config.detail_poll_interval);
            follow(service, interval, "match", move |s| {
                let id = id.clone();
                async move {
                    let response = s.match_details(&id).await;
                    let Some(detail) = response.match_detail else {
                        warn!("Match {} unavailable: {}", id, response.error.unwrap_or_default());
                        return;
                    };
                    info!(
                        "{} v {} - {}",
                        detail.team1.short_name, detail.team2.short_name, detail.status_text
                    );
                    for inn in &detail.innings {
                        let rrr = inn
                            .required_run_rate
                            .map(|r| format!(" (RRR {:.2})", r))
                            .unwrap_or_default();
                        info!(
                            "  Inns {}: {} {} ({}.{} ov){}",
                            inn.innings_number,
                            inn.batting_team_id,
                            inn.score_line(),
                            inn.overs,
                            inn.balls,
                            rrr
                        );
                    }
                }
            })
            .await
        }
        Feed::Series => {
            let interval = Duration::from_secs(config.series_poll_interval);
            follow(service, interval, "series", |s| async move {
                let response = s.featured_series().await;
                for series in &response.series {
                    info!(
                        "  {} ({}, {} matches, ends {})",
                        series.name,
                        series.format.label(),
                        series.total_matches,
                        series.end_date.format("%Y-%m-%d")
                    );
                }
            })
            .await
        }
    }
}

/// Poll `report` until Ctrl-C
async fn follow<F, Fut>(service: Arc<CricketService>, interval: Duration, name: &str, report: F) -> Result<()>
where
    F: Fn(Arc<CricketService>) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    info!("Following {} feed every {:?}", name, interval);

    let worker = PollingWorker::new(name, interval, move || report(Arc::clone(&service)));
    let mut subscription = worker.spawn();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            update = subscription.changed() => {
                if update.is_none() {
                    error!("Poller exited unexpectedly");
                    break;
                }
            }
        }
    }

    subscription.stop().await;
    Ok(())
}

fn ticker_line(m: &MatchSummary) -> String {
    let side = |name: &str, score: &Option<String>, overs: &Option<String>| match (score, overs) {
        (Some(s), Some(o)) => format!("{} {} ({})", name, s, o),
        (Some(s), None) => format!("{} {}", name, s),
        _ => name.to_string(),
    };
    format!(
        "[{}] {} v {} - {}",
        m.status.label(),
        side(&m.team1.short_name, &m.team1.score, &m.team1.overs),
        side(&m.team2.short_name, &m.team2.score, &m.team2.overs),
        m.status_text
    )
}

/// Parse the feed from arguments: live (default), current, series, match <id>
fn parse_feed(args: &[String]) -> Result<Feed> {
    match args.get(1).map(String::as_str) {
        None | Some("live") => Ok(Feed::Live),
        Some("current") => Ok(Feed::Current),
        Some("series") => Ok(Feed::Series),
        Some("match") => match args.get(2) {
            Some(id) => Ok(Feed::Match(id.clone())),
            None => bail!("usage: scores_ticker match <match-id>"),
        },
        Some(other) => bail!("unknown feed '{}'; expected live, current, series or match <id>", other),
    }
}
