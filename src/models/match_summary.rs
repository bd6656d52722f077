use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchFormat {
    T10,
    T20,
    Odi,
    Test,
    TheHundred,
}

impl MatchFormat {
    /// Parse a provider format string, falling back to T20
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "T10" => MatchFormat::T10,
            "T20" | "T20I" => MatchFormat::T20,
            "ODI" => MatchFormat::Odi,
            "TEST" => MatchFormat::Test,
            "THE_HUNDRED" | "HUNDRED" | "THE HUNDRED" => MatchFormat::TheHundred,
            _ => MatchFormat::T20,
        }
    }

    /// Overs per innings for limited-overs formats.
    /// The Hundred is ball based and Tests are unlimited.
    pub fn max_overs(&self) -> Option<u32> {
        match self {
            MatchFormat::T10 => Some(10),
            MatchFormat::T20 => Some(20),
            MatchFormat::Odi => Some(50),
            MatchFormat::Test | MatchFormat::TheHundred => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchFormat::T10 => "T10",
            MatchFormat::T20 => "T20",
            MatchFormat::Odi => "ODI",
            MatchFormat::Test => "Test",
            MatchFormat::TheHundred => "The Hundred",
        }
    }
}

/// Match status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Live,
    Upcoming,
    Completed,
    Abandoned,
    NoResult,
    Delayed,
    InningsBreak,
    Tea,
    Lunch,
    Drinks,
}

/// Display group a status belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGroup {
    Live,
    Upcoming,
    Completed,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 10] = [
        MatchStatus::Live,
        MatchStatus::Upcoming,
        MatchStatus::Completed,
        MatchStatus::Abandoned,
        MatchStatus::NoResult,
        MatchStatus::Delayed,
        MatchStatus::InningsBreak,
        MatchStatus::Tea,
        MatchStatus::Lunch,
        MatchStatus::Drinks,
    ];

    /// Exhaustive, so every status lands in exactly one group
    pub fn group(&self) -> StatusGroup {
        match self {
            MatchStatus::Live
            | MatchStatus::InningsBreak
            | MatchStatus::Tea
            | MatchStatus::Lunch
            | MatchStatus::Drinks
            | MatchStatus::Delayed => StatusGroup::Live,
            MatchStatus::Upcoming => StatusGroup::Upcoming,
            MatchStatus::Completed | MatchStatus::Abandoned | MatchStatus::NoResult => {
                StatusGroup::Completed
            }
        }
    }

    /// Source of every `is_live` flag in the canonical model
    pub fn is_live(&self) -> bool {
        self.group() == StatusGroup::Live
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Live => "LIVE",
            MatchStatus::Upcoming => "Upcoming",
            MatchStatus::Completed => "Completed",
            MatchStatus::Abandoned => "Abandoned",
            MatchStatus::NoResult => "No Result",
            MatchStatus::Delayed => "Delayed",
            MatchStatus::InningsBreak => "Innings Break",
            MatchStatus::Tea => "Tea",
            MatchStatus::Lunch => "Lunch",
            MatchStatus::Drinks => "Drinks",
        }
    }
}

/// One side of a summary card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamScoreView {
    pub name: String,

    pub short_name: String,

    /// e.g. "185/4" or "218 & 205"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,

    /// e.g. "18.2"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overs: Option<String>,
}

impl TeamScoreView {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            score: None,
            overs: None,
        }
    }

    pub fn with_score(mut self, score: impl Into<String>, overs: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self.overs = Some(overs.into());
        self
    }
}

/// Summary of a match for list views and the live ticker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: String,

    pub format: MatchFormat,

    pub status: MatchStatus,

    /// e.g. "India won by 5 wickets"
    pub status_text: String,

    pub team1: TeamScoreView,

    pub team2: TeamScoreView,

    pub venue: String,

    pub start_time: DateTime<Utc>,

    /// Always `status.is_live()`
    pub is_live: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
}

/// Summaries split by status group
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategorizedMatches {
    pub live: Vec<MatchSummary>,
    pub upcoming: Vec<MatchSummary>,
    pub completed: Vec<MatchSummary>,
}

impl CategorizedMatches {
    pub fn len(&self) -> usize {
        self.live.len() + self.upcoming.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(MatchFormat::parse("t20"), MatchFormat::T20);
        assert_eq!(MatchFormat::parse("T20I"), MatchFormat::T20);
        assert_eq!(MatchFormat::parse("odi"), MatchFormat::Odi);
        assert_eq!(MatchFormat::parse("Test"), MatchFormat::Test);
        assert_eq!(MatchFormat::parse("hundred"), MatchFormat::TheHundred);
        assert_eq!(MatchFormat::parse("list-a"), MatchFormat::T20); // Unknown falls back
    }

    #[test]
    fn test_live_group_membership() {
        let live: Vec<_> = MatchStatus::ALL.iter().filter(|s| s.is_live()).collect();
        assert_eq!(live.len(), 6);
        assert!(!MatchStatus::Upcoming.is_live());
        assert!(!MatchStatus::Completed.is_live());
        assert!(!MatchStatus::Abandoned.is_live());
        assert!(!MatchStatus::NoResult.is_live());
        assert!(MatchStatus::Tea.is_live());
        assert!(MatchStatus::Delayed.is_live());
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&MatchStatus::InningsBreak).unwrap();
        assert_eq!(json, "\"INNINGS_BREAK\"");
        let json = serde_json::to_string(&MatchFormat::TheHundred).unwrap();
        assert_eq!(json, "\"THE_HUNDRED\"");
    }

    #[test]
    fn test_categorized_len() {
        let groups = CategorizedMatches::default();
        assert!(groups.is_empty());
        let groups = crate::mock_data::categorized_matches();
        assert!(!groups.is_empty());
        assert_eq!(
            groups.len(),
            groups.live.len() + groups.upcoming.len() + groups.completed.len()
        );
    }
}
