//! Bundled sample data served when the upstream provider is unavailable.
//!
//! All timestamps are fixed so the fallback path returns identical
//! envelopes on every call.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    team_colors, BattingStats, BowlingStats, CategorizedMatches, Extras, FallOfWicket, Innings,
    Match, MatchFormat, MatchStatus, MatchSummary, Series, Team, TeamScoreView, Venue, WicketType,
};

/// Id of the match that has a full sample scorecard
pub const SAMPLE_MATCH_ID: &str = "match-1";

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn summary(
    id: &str,
    format: MatchFormat,
    status: MatchStatus,
    status_text: &str,
    team1: TeamScoreView,
    team2: TeamScoreView,
    venue: &str,
    start_time: DateTime<Utc>,
    series_name: &str,
) -> MatchSummary {
    MatchSummary {
        match_id: id.to_string(),
        format,
        status,
        status_text: status_text.to_string(),
        team1,
        team2,
        venue: venue.to_string(),
        start_time,
        is_live: status.is_live(),
        series_name: Some(series_name.to_string()),
    }
}

pub fn live_matches() -> Vec<MatchSummary> {
    vec![
        summary(
            SAMPLE_MATCH_ID,
            MatchFormat::T20,
            MatchStatus::Live,
            "Australia need 40 runs in 30 balls",
            TeamScoreView::new("India", "IND").with_score("186/5", "20"),
            TeamScoreView::new("Australia", "AUS").with_score("147/4", "15.0"),
            "Wankhede Stadium, Mumbai",
            at(2024, 12, 6, 13),
            "Australia tour of India 2024",
        ),
        summary(
            "match-2",
            MatchFormat::Test,
            MatchStatus::Live,
            "Day 2: England lead by 53 runs",
            TeamScoreView::new("England", "ENG").with_score("312", "98.3"),
            TeamScoreView::new("South Africa", "SA").with_score("259/6", "71.2"),
            "Lord's, London",
            at(2024, 12, 5, 10),
            "South Africa tour of England 2024",
        ),
        summary(
            "match-3",
            MatchFormat::Odi,
            MatchStatus::InningsBreak,
            "Innings Break",
            TeamScoreView::new("Pakistan", "PAK").with_score("287/8", "50"),
            TeamScoreView::new("New Zealand", "NZ"),
            "Gaddafi Stadium, Lahore",
            at(2024, 12, 6, 9),
            "New Zealand tour of Pakistan 2024",
        ),
    ]
}

pub fn upcoming_matches() -> Vec<MatchSummary> {
    vec![
        summary(
            "match-4",
            MatchFormat::T20,
            MatchStatus::Upcoming,
            "Match starts at 14:00 GMT",
            TeamScoreView::new("West Indies", "WI"),
            TeamScoreView::new("Sri Lanka", "SL"),
            "Kensington Oval, Bridgetown",
            at(2024, 12, 8, 14),
            "Sri Lanka tour of West Indies 2024",
        ),
        summary(
            "match-5",
            MatchFormat::Odi,
            MatchStatus::Upcoming,
            "Match starts at 09:00 GMT",
            TeamScoreView::new("Bangladesh", "BAN"),
            TeamScoreView::new("Afghanistan", "AFG"),
            "Sharjah Cricket Stadium, Sharjah",
            at(2024, 12, 9, 9),
            "Afghanistan v Bangladesh ODI Series 2024",
        ),
    ]
}

pub fn completed_matches() -> Vec<MatchSummary> {
    vec![
        summary(
            "match-6",
            MatchFormat::T20,
            MatchStatus::Completed,
            "India won by 5 wickets",
            TeamScoreView::new("India", "IND").with_score("171/5", "19.2"),
            TeamScoreView::new("England", "ENG").with_score("168/7", "20"),
            "Eden Gardens, Kolkata",
            at(2024, 12, 3, 13),
            "England tour of India 2024",
        ),
        summary(
            "match-7",
            MatchFormat::Test,
            MatchStatus::Completed,
            "Australia won by 120 runs",
            TeamScoreView::new("Australia", "AUS").with_score("445 & 251/6d", "64"),
            TeamScoreView::new("New Zealand", "NZ").with_score("318 & 258", "82.4"),
            "The Gabba, Brisbane",
            at(2024, 11, 28, 0),
            "New Zealand tour of Australia 2024",
        ),
    ]
}

/// The three static lists, categorized
pub fn categorized_matches() -> CategorizedMatches {
    CategorizedMatches {
        live: live_matches(),
        upcoming: upcoming_matches(),
        completed: completed_matches(),
    }
}

fn team(id: &str, name: &str, code: &str) -> Team {
    let colors = team_colors(code);
    Team {
        id: id.to_string(),
        name: name.to_string(),
        short_name: code.to_string(),
        code: code.to_string(),
        primary_color: colors.primary.to_string(),
        secondary_color: colors.secondary.to_string(),
        flag_url: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn batter(
    id: &str,
    name: &str,
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    out: Option<(WicketType, &str)>,
    position: u32,
) -> BattingStats {
    BattingStats {
        player_id: id.to_string(),
        player_name: name.to_string(),
        runs,
        balls,
        fours,
        sixes,
        strike_rate: if balls == 0 {
            0.0
        } else {
            (runs as f64 * 10000.0 / balls as f64).round() / 100.0
        },
        is_out: out.is_some(),
        wicket_type: out.map(|(w, _)| w),
        dismissed_by: out.map(|(_, by)| by.to_string()),
        position,
    }
}

fn bowler(id: &str, name: &str, overs: u32, balls: u32, runs: u32, wickets: u32) -> BowlingStats {
    let total = overs * 6 + balls;
    BowlingStats {
        player_id: id.to_string(),
        player_name: name.to_string(),
        overs,
        balls,
        maidens: 0,
        runs,
        wickets,
        economy: (runs as f64 * 600.0 / total as f64).round() / 100.0,
        wides: 1,
        no_balls: 0,
        dot_balls: total / 3,
    }
}

/// Full detail for the sample live match
pub fn sample_match_detail() -> Match {
    let india = team("team-ind", "India", "IND");
    let australia = team("team-aus", "Australia", "AUS");

    let first = Innings {
        id: format!("{}-1", SAMPLE_MATCH_ID),
        innings_number: 1,
        batting_team_id: india.id.clone(),
        bowling_team_id: australia.id.clone(),
        runs: 186,
        wickets: 5,
        overs: 20,
        balls: 0,
        run_rate: 9.3,
        required_run_rate: None,
        target: None,
        extras: Extras::from_components(6, 1, 1, 4, 0),
        batting: vec![
            batter("p-rs", "Rohit Sharma", 45, 30, 5, 2, Some((WicketType::Caught, "Mitchell Starc")), 1),
            batter("p-yj", "Yashasvi Jaiswal", 23, 17, 3, 1, Some((WicketType::Bowled, "Pat Cummins")), 2),
            batter("p-sy", "Suryakumar Yadav", 61, 35, 6, 3, Some((WicketType::Caught, "Adam Zampa")), 3),
            batter("p-hp", "Hardik Pandya", 28, 18, 2, 1, Some((WicketType::RunOut, "Glenn Maxwell")), 4),
            batter("p-rp", "Rishabh Pant", 8, 6, 1, 0, Some((WicketType::Stumped, "Adam Zampa")), 5),
            batter("p-rj", "Ravindra Jadeja", 9, 7, 1, 0, None, 6),
        ],
        bowling: vec![
            bowler("p-ms", "Mitchell Starc", 4, 0, 38, 1),
            bowler("p-pc", "Pat Cummins", 4, 0, 35, 1),
            bowler("p-jh", "Josh Hazlewood", 4, 0, 33, 0),
            bowler("p-az", "Adam Zampa", 4, 0, 36, 2),
            bowler("p-gm", "Glenn Maxwell", 4, 0, 32, 0),
        ],
        fall_of_wickets: vec![
            FallOfWicket { wicket_number: 1, runs: 52, overs: 4.3, player_id: "p-yj".into(), player_name: "Yashasvi Jaiswal".into() },
            FallOfWicket { wicket_number: 2, runs: 81, overs: 8.1, player_id: "p-rs".into(), player_name: "Rohit Sharma".into() },
            FallOfWicket { wicket_number: 3, runs: 152, overs: 15.4, player_id: "p-hp".into(), player_name: "Hardik Pandya".into() },
            FallOfWicket { wicket_number: 4, runs: 168, overs: 17.5, player_id: "p-sy".into(), player_name: "Suryakumar Yadav".into() },
            FallOfWicket { wicket_number: 5, runs: 177, overs: 18.6, player_id: "p-rp".into(), player_name: "Rishabh Pant".into() },
        ],
        partnerships: Vec::new(),
        recent_overs: Vec::new(),
        is_completed: true,
    };

    let second = Innings {
        id: format!("{}-2", SAMPLE_MATCH_ID),
        innings_number: 2,
        batting_team_id: australia.id.clone(),
        bowling_team_id: india.id.clone(),
        runs: 147,
        wickets: 4,
        overs: 15,
        balls: 0,
        run_rate: 9.8,
        required_run_rate: Some(8.0),
        target: Some(187),
        extras: Extras::from_components(4, 0, 0, 2, 0),
        batting: vec![
            batter("p-th", "Travis Head", 54, 31, 6, 3, Some((WicketType::Bowled, "Jasprit Bumrah")), 1),
            batter("p-dw", "David Warner", 12, 10, 2, 0, Some((WicketType::Caught, "Arshdeep Singh")), 2),
            batter("p-mm", "Mitchell Marsh", 33, 22, 2, 2, Some((WicketType::Lbw, "Kuldeep Yadav")), 3),
            batter("p-ss", "Steven Smith", 19, 15, 1, 0, Some((WicketType::Caught, "Kuldeep Yadav")), 4),
            batter("p-gm", "Glenn Maxwell", 18, 9, 1, 1, None, 5),
            batter("p-ac", "Alex Carey", 5, 3, 0, 0, None, 6),
        ],
        bowling: vec![
            bowler("p-jb", "Jasprit Bumrah", 3, 0, 22, 1),
            bowler("p-as", "Arshdeep Singh", 3, 0, 31, 1),
            bowler("p-hp", "Hardik Pandya", 3, 0, 30, 0),
            bowler("p-ky", "Kuldeep Yadav", 4, 0, 38, 2),
            bowler("p-rj", "Ravindra Jadeja", 2, 0, 20, 0),
        ],
        fall_of_wickets: vec![
            FallOfWicket { wicket_number: 1, runs: 31, overs: 3.2, player_id: "p-dw".into(), player_name: "David Warner".into() },
            FallOfWicket { wicket_number: 2, runs: 78, overs: 7.4, player_id: "p-th".into(), player_name: "Travis Head".into() },
            FallOfWicket { wicket_number: 3, runs: 112, overs: 11.2, player_id: "p-mm".into(), player_name: "Mitchell Marsh".into() },
            FallOfWicket { wicket_number: 4, runs: 124, overs: 12.5, player_id: "p-ss".into(), player_name: "Steven Smith".into() },
        ],
        partnerships: Vec::new(),
        recent_overs: Vec::new(),
        is_completed: false,
    };

    Match {
        id: SAMPLE_MATCH_ID.to_string(),
        series_id: Some("series-1".to_string()),
        series_name: Some("Australia tour of India 2024".to_string()),
        format: MatchFormat::T20,
        status: MatchStatus::Live,
        status_text: "Australia need 40 runs in 30 balls".to_string(),
        team1: india,
        team2: australia,
        venue: Venue {
            id: "venue-1".to_string(),
            name: "Wankhede Stadium".to_string(),
            city: "Mumbai".to_string(),
            country: "India".to_string(),
        },
        start_time: at(2024, 12, 6, 13),
        innings: vec![first, second],
        current_innings: Some(2),
        is_live: true,
        last_updated: at(2024, 12, 6, 15),
        winner: None,
        result_margin: None,
    }
}

/// Sample series shown on the featured strip
pub fn featured_series() -> Vec<Series> {
    vec![
        Series {
            id: "series-1".to_string(),
            name: "Australia tour of India 2024".to_string(),
            start_date: at(2024, 12, 1, 0),
            end_date: at(2024, 12, 15, 0),
            format: MatchFormat::T20,
            total_matches: 5,
        },
        Series {
            id: "series-2".to_string(),
            name: "South Africa tour of England 2024".to_string(),
            start_date: at(2024, 11, 20, 0),
            end_date: at(2025, 1, 10, 0),
            format: MatchFormat::Test,
            total_matches: 3,
        },
        Series {
            id: "series-3".to_string(),
            name: "New Zealand tour of Pakistan 2024".to_string(),
            start_date: at(2024, 12, 2, 0),
            end_date: at(2024, 12, 20, 0),
            format: MatchFormat::Odi,
            total_matches: 3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::categorize;

    #[test]
    fn test_mock_lists_are_already_categorized() {
        let mock = categorized_matches();
        let all: Vec<MatchSummary> = mock
            .live
            .iter()
            .chain(&mock.upcoming)
            .chain(&mock.completed)
            .cloned()
            .collect();
        assert_eq!(categorize(all), mock);
        assert!(mock.live.iter().all(|m| m.is_live));
    }

    #[test]
    fn test_mock_data_is_deterministic() {
        assert_eq!(categorized_matches(), categorized_matches());
        assert_eq!(sample_match_detail(), sample_match_detail());
    }

    #[test]
    fn test_sample_detail_is_consistent() {
        let detail = sample_match_detail();
        assert_eq!(detail.id, SAMPLE_MATCH_ID);
        for inn in &detail.innings {
            assert_ne!(inn.batting_team_id, inn.bowling_team_id);
            assert_eq!(inn.extras.total, inn.extras.component_sum());
            assert!(inn.batting.iter().all(|b| b.is_out == b.dismissed_by.is_some()));
        }
        assert_eq!(detail.innings[0].batting_team_id, detail.team1.id);
        assert_eq!(detail.innings[1].target, Some(detail.innings[0].runs + 1));
        assert_eq!(detail.start_time, live_matches()[0].start_time);
    }
}
