//! Mapping from provider payloads to the canonical match model.
//!
//! Everything here is pure. Missing or malformed optional fields become
//! zeros or `None`; the only failure is combining payloads from two
//! different providers.

pub mod cricapi;
pub mod cricbuzz;
pub mod parse;

use chrono::{DateTime, Utc};

use crate::api::{RawMatch, RawMatchList, RawScorecard, RawSeriesList};
use crate::error::NormalizeError;
use crate::models::{
    CategorizedMatches, Innings, Match, MatchFormat, MatchStatus, MatchSummary, Series, StatusGroup,
};

/// Team ids and match facts that innings derivation depends on
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub match_id: String,
    pub team1_id: String,
    pub team2_id: String,
    /// Unknown when a scorecard is normalized without its match
    pub format: Option<MatchFormat>,
    pub status: Option<MatchStatus>,
}

impl MatchContext {
    /// Context for a scorecard with no match header
    pub fn placeholder(match_id: &str) -> Self {
        Self {
            match_id: match_id.to_string(),
            team1_id: "team1".to_string(),
            team2_id: "team2".to_string(),
            format: None,
            status: None,
        }
    }

    /// Odd innings bat for team1, even innings for team2
    pub fn batting_order(&self, innings_number: u32) -> (String, String) {
        if innings_number % 2 == 1 {
            (self.team1_id.clone(), self.team2_id.clone())
        } else {
            (self.team2_id.clone(), self.team1_id.clone())
        }
    }

    /// Missing or clashing team ids fall back to "team1"/"team2"
    pub fn from_match(m: &Match) -> Self {
        let (team1_id, team2_id) = distinct_team_ids(&m.team1.id, &m.team2.id);
        Self {
            match_id: m.id.clone(),
            team1_id,
            team2_id,
            format: Some(m.format),
            status: Some(m.status),
        }
    }
}

fn distinct_team_ids(team1: &str, team2: &str) -> (String, String) {
    let team1 = team1.trim();
    let team2 = team2.trim();
    if team1.is_empty() || team2.is_empty() || team1 == team2 {
        return ("team1".to_string(), "team2".to_string());
    }
    (team1.to_string(), team2.to_string())
}

pub fn to_match_summaries(raw: &RawMatchList) -> Vec<MatchSummary> {
    match raw {
        RawMatchList::Cricbuzz(items) => items.iter().map(cricbuzz::to_match_summary).collect(),
        RawMatchList::CricApi(items) => items.iter().map(cricapi::to_match_summary).collect(),
    }
}

pub fn to_match_summary(raw: &RawMatch) -> MatchSummary {
    match raw {
        RawMatch::Cricbuzz(item) => cricbuzz::to_match_summary(item),
        RawMatch::CricApi(m) => cricapi::to_match_summary(m),
    }
}

/// Full match from basic info plus an optional scorecard.
/// Without a scorecard the innings list is empty.
pub fn to_full_match(
    raw: &RawMatch,
    scorecard: Option<&RawScorecard>,
    now: DateTime<Utc>,
) -> Result<Match, NormalizeError> {
    if let Some(card) = scorecard {
        if card.provider() != raw.provider() {
            return Err(NormalizeError::ProviderMismatch {
                match_provider: raw.provider(),
                scorecard_provider: card.provider(),
            });
        }
    }

    let mut full = match raw {
        RawMatch::Cricbuzz(item) => cricbuzz::to_match(item, now),
        RawMatch::CricApi(m) => cricapi::to_match(m, now),
    };

    if let Some(card) = scorecard {
        let ctx = MatchContext::from_match(&full);
        full.team1.id = ctx.team1_id.clone();
        full.team2.id = ctx.team2_id.clone();
        full.innings = to_innings_list(card, &ctx);
    }

    full.current_innings = (!full.innings.is_empty()).then(|| full.innings.len() as u32);
    Ok(full)
}

/// Every innings in a scorecard, with chase and completion context applied
pub fn to_innings_list(card: &RawScorecard, ctx: &MatchContext) -> Vec<Innings> {
    let mut innings: Vec<Innings> = match card {
        RawScorecard::Cricbuzz(resp) => resp
            .scorecard
            .iter()
            .enumerate()
            .map(|(i, inn)| cricbuzz::to_innings(inn, i as u32 + 1, ctx))
            .collect(),
        RawScorecard::CricApi(data) => data
            .scorecard
            .iter()
            .enumerate()
            .map(|(i, inn)| cricapi::to_innings(inn, i as u32 + 1, ctx))
            .collect(),
    };

    apply_match_context(&mut innings, ctx);
    innings
}

/// Fill in completion flags and the second-innings chase
fn apply_match_context(innings: &mut [Innings], ctx: &MatchContext) {
    let max_overs = ctx.format.and_then(|f| f.max_overs());
    let match_over = ctx
        .status
        .map_or(false, |s| s.group() == StatusGroup::Completed);
    let count = innings.len();

    for (i, inn) in innings.iter_mut().enumerate() {
        let overs_done = max_overs.map_or(false, |max| inn.overs >= max);
        inn.is_completed = i + 1 < count || inn.wickets >= 10 || overs_done || match_over;
    }

    let Some(max) = max_overs else {
        return;
    };
    if count < 2 {
        return;
    }

    let target = innings[0].runs.saturating_add(1);
    let chase = &mut innings[1];
    chase.target = Some(target);

    let remaining_balls = max.saturating_mul(6).saturating_sub(chase.total_balls());
    if !chase.is_completed && remaining_balls > 0 && chase.runs < target {
        let needed = (target - chase.runs) as f64;
        chase.required_run_rate = Some(parse::round2(needed * 6.0 / remaining_balls as f64));
    }
}

/// Series list; an unsupported endpoint reads as empty
pub fn to_series(raw: &RawSeriesList) -> Vec<Series> {
    match raw {
        RawSeriesList::Unsupported => Vec::new(),
        RawSeriesList::CricApi(items) => items.iter().filter_map(cricapi::to_series).collect(),
    }
}

/// Partition summaries into live, upcoming and completed by status group
pub fn categorize(matches: Vec<MatchSummary>) -> CategorizedMatches {
    let mut categorized = CategorizedMatches::default();

    for summary in matches {
        match summary.status.group() {
            StatusGroup::Live => categorized.live.push(summary),
            StatusGroup::Upcoming => categorized.upcoming.push(summary),
            StatusGroup::Completed => categorized.completed.push(summary),
        }
    }

    categorized
}
