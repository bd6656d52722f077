use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchFormat, MatchStatus};

/// Team record for the match detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,

    pub name: String,

    /// e.g. "IND", "AUS"
    pub short_name: String,

    pub code: String,

    pub primary_color: String,

    pub secondary_color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

/// Runs not scored off the bat
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub penalties: u32,
    pub total: u32,
}

impl Extras {
    /// Build from a full breakdown; `total` is always the component sum
    pub fn from_components(wides: u32, no_balls: u32, byes: u32, leg_byes: u32, penalties: u32) -> Self {
        let mut extras = Self {
            wides,
            no_balls,
            byes,
            leg_byes,
            penalties,
            total: 0,
        };
        extras.total = extras.component_sum();
        extras
    }

    pub fn component_sum(&self) -> u32 {
        [self.no_balls, self.byes, self.leg_byes, self.penalties]
            .into_iter()
            .fold(self.wides, u32::saturating_add)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WicketType {
    Bowled,
    Caught,
    CaughtAndBowled,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    RetiredHurt,
    RetiredOut,
    HandledBall,
    ObstructingField,
    TimedOut,
}

/// A batter's line in an innings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    pub player_id: String,

    pub player_name: String,

    pub runs: u32,

    pub balls: u32,

    pub fours: u32,

    pub sixes: u32,

    /// Runs per 100 balls, 0 when no balls faced
    pub strike_rate: f64,

    pub is_out: bool,

    /// Only set when `is_out`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wicket_type: Option<WicketType>,

    /// Bowler, or fielder for run outs. Only set when `is_out`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_by: Option<String>,

    /// Batting position (1-11)
    pub position: u32,
}

/// A bowler's figures in an innings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BowlingStats {
    pub player_id: String,

    pub player_name: String,

    /// Completed overs
    pub overs: u32,

    /// Balls into the current over (0-5)
    pub balls: u32,

    pub maidens: u32,

    pub runs: u32,

    pub wickets: u32,

    pub economy: f64,

    pub wides: u32,

    pub no_balls: u32,

    pub dot_balls: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicket {
    pub wicket_number: u32,
    pub runs: u32,
    /// Over at which the wicket fell, e.g. 10.2
    pub overs: f64,
    pub player_id: String,
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub batsman1_id: String,
    pub batsman1_name: String,
    pub batsman1_runs: u32,
    pub batsman2_id: String,
    pub batsman2_name: String,
    pub batsman2_runs: u32,
    pub total_runs: u32,
    pub balls: u32,
    pub wicket_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Over {
    pub over_number: u32,
    pub bowler_id: String,
    pub bowler_name: String,
    pub runs: u32,
    pub wickets: u32,
}

/// One team's batting turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub id: String,

    /// 1-based, chronological
    pub innings_number: u32,

    pub batting_team_id: String,

    pub bowling_team_id: String,

    pub runs: u32,

    /// 0-10
    pub wickets: u32,

    /// Completed overs
    pub overs: u32,

    /// Balls into the current over (0-5)
    pub balls: u32,

    pub run_rate: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_run_rate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,

    pub extras: Extras,

    pub batting: Vec<BattingStats>,

    pub bowling: Vec<BowlingStats>,

    pub fall_of_wickets: Vec<FallOfWicket>,

    pub partnerships: Vec<Partnership>,

    pub recent_overs: Vec<Over>,

    pub is_completed: bool,
}

impl Innings {
    /// Legal balls bowled so far
    pub fn total_balls(&self) -> u32 {
        self.overs.saturating_mul(6).saturating_add(self.balls)
    }

    /// Score in "runs/wickets" form
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }
}

/// Full match detail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,

    pub format: MatchFormat,

    pub status: MatchStatus,

    pub status_text: String,

    pub team1: Team,

    pub team2: Team,

    pub venue: Venue,

    pub start_time: DateTime<Utc>,

    /// Chronological innings order
    pub innings: Vec<Innings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_innings: Option<u32>,

    /// Always `status.is_live()`
    pub is_live: bool,

    pub last_updated: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,

    /// e.g. "5 wickets", "34 runs"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_margin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extras_from_components() {
        let extras = Extras::from_components(6, 2, 1, 3, 0);
        assert_eq!(extras.total, 12);
        assert_eq!(extras.total, extras.component_sum());
    }

    #[test]
    fn test_counts_saturate_on_absurd_input() {
        let extras = Extras::from_components(u32::MAX, 1, 0, 0, 0);
        assert_eq!(extras.total, u32::MAX);
        assert_eq!(extras.component_sum(), u32::MAX);
    }
}
