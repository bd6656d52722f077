use chrono::{DateTime, Utc};

use super::parse;
use super::MatchContext;
use crate::api::cricbuzz::{
    Batsman, Bowler, ExtrasCard, FallOfWicketCard, InningsCard, InningsScore, LiveMatchItem,
    MatchInfo, TeamRef, TeamScore, VenueInfo,
};
use crate::models::{
    team_colors, BattingStats, BowlingStats, Extras, FallOfWicket, Innings, Match, MatchFormat,
    MatchStatus, MatchSummary, Team, TeamScoreView, Venue,
};

const FLAG_IMAGE_BASE: &str = "https://i.cricdb.com/images";

/// Status from the `state` field (exact, case-insensitive)
pub fn status_from_state(state: &str) -> MatchStatus {
    match state.trim().to_lowercase().as_str() {
        "complete" | "result" => MatchStatus::Completed,
        "in progress" | "running" | "live" => MatchStatus::Live,
        "abandoned" | "no result" => MatchStatus::Abandoned,
        "delay" => MatchStatus::Delayed,
        "innings break" => MatchStatus::InningsBreak,
        "tea" => MatchStatus::Tea,
        "lunch" => MatchStatus::Lunch,
        "drinks" => MatchStatus::Drinks,
        _ => MatchStatus::Upcoming,
    }
}

fn score_line(score: &InningsScore) -> String {
    format!(
        "{}/{}",
        parse::number(score.runs.as_ref()),
        parse::number(score.wickets.as_ref())
    )
}

fn team_view(team: &TeamRef, score: Option<&TeamScore>) -> TeamScoreView {
    let view = TeamScoreView::new(team.team_name.clone(), team.team_s_name.clone());

    let Some(score) = score else {
        return view;
    };
    let innings: Vec<&InningsScore> = [score.inngs1.as_ref(), score.inngs2.as_ref()]
        .into_iter()
        .flatten()
        .collect();
    let Some(latest) = innings.last() else {
        return view;
    };

    let line = innings.iter().map(|i| score_line(i)).collect::<Vec<_>>().join(" & ");
    view.with_score(line, parse::text(latest.overs.as_ref()))
}

fn venue_text(venue: Option<&VenueInfo>) -> String {
    let Some(venue) = venue else {
        return String::new();
    };
    [venue.ground.as_deref(), venue.city.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn start_time(info: &MatchInfo) -> DateTime<Utc> {
    parse::from_epoch_millis(info.start_date.as_ref()).unwrap_or_default()
}

pub fn to_match_summary(item: &LiveMatchItem) -> MatchSummary {
    let info = &item.match_info;
    let status = status_from_state(&info.state);
    let scores = item.match_score.as_ref();

    MatchSummary {
        match_id: info.id(),
        format: MatchFormat::parse(info.match_format.as_deref().unwrap_or_default()),
        status,
        status_text: info.status.clone(),
        team1: team_view(&info.team1, scores.and_then(|s| s.team1_score.as_ref())),
        team2: team_view(&info.team2, scores.and_then(|s| s.team2_score.as_ref())),
        venue: venue_text(info.venue_info.as_ref()),
        start_time: start_time(info),
        is_live: status.is_live(),
        series_name: info.series_name.clone(),
    }
}

fn to_team(team: &TeamRef) -> Team {
    let code = if team.team_s_name.is_empty() {
        parse::short_code(&team.team_name)
    } else {
        team.team_s_name.clone()
    };
    let id = team
        .team_id
        .as_ref()
        .map(|id| id.as_text())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| code.clone());
    let colors = team_colors(&code);

    Team {
        id,
        name: team.team_name.clone(),
        short_name: code.clone(),
        code,
        primary_color: colors.primary.to_string(),
        secondary_color: colors.secondary.to_string(),
        flag_url: team
            .image_id
            .as_ref()
            .map(|img| format!("{}/{}.jpg", FLAG_IMAGE_BASE, img.as_text())),
    }
}

fn to_venue(venue: Option<&VenueInfo>) -> Venue {
    let Some(venue) = venue else {
        return Venue::default();
    };
    Venue {
        id: parse::text(venue.id.as_ref()),
        name: venue.ground.clone().unwrap_or_default(),
        city: venue.city.clone().unwrap_or_default(),
        country: venue.country.clone().unwrap_or_default(),
    }
}

/// Match without innings; the caller attaches the scorecard
pub fn to_match(item: &LiveMatchItem, now: DateTime<Utc>) -> Match {
    let info = &item.match_info;
    let status = status_from_state(&info.state);
    let result = parse::parse_result(&info.status);

    Match {
        id: info.id(),
        series_id: info.series_id.as_ref().map(|s| s.as_text()),
        series_name: info.series_name.clone(),
        format: MatchFormat::parse(info.match_format.as_deref().unwrap_or_default()),
        status,
        status_text: info.status.clone(),
        team1: to_team(&info.team1),
        team2: to_team(&info.team2),
        venue: to_venue(info.venue_info.as_ref()),
        start_time: start_time(info),
        innings: Vec::new(),
        current_innings: None,
        is_live: status.is_live(),
        last_updated: now,
        winner: result.as_ref().map(|(w, _)| w.clone()),
        result_margin: result.map(|(_, m)| m),
    }
}

/// Recompute the total only when every component is reported
fn to_extras(extras: Option<&ExtrasCard>) -> Extras {
    let Some(e) = extras else {
        return Extras::default();
    };

    match (&e.wides, &e.no_balls, &e.byes, &e.leg_byes) {
        (Some(w), Some(nb), Some(b), Some(lb)) => Extras::from_components(
            w.as_u32(),
            nb.as_u32(),
            b.as_u32(),
            lb.as_u32(),
            parse::number(e.penalty.as_ref()),
        ),
        _ => Extras {
            wides: parse::number(e.wides.as_ref()),
            no_balls: parse::number(e.no_balls.as_ref()),
            byes: parse::number(e.byes.as_ref()),
            leg_byes: parse::number(e.leg_byes.as_ref()),
            penalties: parse::number(e.penalty.as_ref()),
            total: parse::number(e.total.as_ref()),
        },
    }
}

fn to_batting(batsman: &Batsman, index: usize) -> BattingStats {
    let runs = parse::number(batsman.runs.as_ref());
    let balls = parse::number(batsman.balls.as_ref());
    let dismissal = batsman.outdec.as_deref().unwrap_or_default();
    let is_out = !parse::is_not_out(dismissal);

    let strike_rate = if balls == 0 {
        0.0
    } else {
        parse::decimal(batsman.strkrate.as_ref())
            .filter(|sr| *sr > 0.0)
            .unwrap_or_else(|| parse::strike_rate(runs, balls))
    };

    BattingStats {
        player_id: parse::text(batsman.id.as_ref()),
        player_name: batsman.name.clone(),
        runs,
        balls,
        fours: parse::number(batsman.fours.as_ref()),
        sixes: parse::number(batsman.sixes.as_ref()),
        strike_rate,
        is_out,
        wicket_type: if is_out { parse::wicket_type_from_text(dismissal) } else { None },
        dismissed_by: if is_out { parse::dismissed_by_from_text(dismissal) } else { None },
        position: (index as u32 + 1).min(11),
    }
}

fn to_bowling(bowler: &Bowler) -> BowlingStats {
    let (overs, balls) = parse::parse_overs(bowler.overs.as_ref());
    let runs = parse::number(bowler.runs.as_ref());

    BowlingStats {
        player_id: parse::text(bowler.id.as_ref()),
        player_name: bowler.name.clone(),
        overs,
        balls,
        maidens: parse::number(bowler.maidens.as_ref()),
        runs,
        wickets: parse::number(bowler.wickets.as_ref()),
        economy: parse::decimal(bowler.economy.as_ref())
            .filter(|e| *e > 0.0)
            .unwrap_or_else(|| parse::per_over(runs, overs, balls)),
        wides: parse::number(bowler.wides.as_ref()),
        no_balls: parse::number(bowler.no_balls.as_ref()),
        dot_balls: parse::number(bowler.dots.as_ref()),
    }
}

fn to_fall_of_wicket(fow: &FallOfWicketCard, index: usize) -> FallOfWicket {
    let wicket_number = match parse::number(fow.wkt_nbr.as_ref()) {
        0 => index as u32 + 1,
        n => n,
    };
    FallOfWicket {
        wicket_number,
        runs: parse::number(fow.runs.as_ref()),
        overs: parse::decimal(fow.over_nbr.as_ref()).unwrap_or(0.0),
        player_id: parse::text(fow.batsman_id.as_ref()),
        player_name: fow.batsman_name.clone(),
    }
}

/// One scorecard innings. `position` is the 1-based order in the card.
pub fn to_innings(card: &InningsCard, position: u32, ctx: &MatchContext) -> Innings {
    let innings_number = match parse::number(card.innings_id.as_ref()) {
        0 => position,
        n => n,
    };
    let (batting_team_id, bowling_team_id) = ctx.batting_order(innings_number);

    let details = card.score_details.as_ref();
    let runs = parse::number(details.and_then(|d| d.runs.as_ref()));
    let (overs, balls) = parse::parse_overs(details.and_then(|d| d.overs.as_ref()));
    let run_rate = parse::decimal(details.and_then(|d| d.run_rate.as_ref()))
        .filter(|rr| *rr > 0.0)
        .unwrap_or_else(|| parse::per_over(runs, overs, balls));

    Innings {
        id: format!("{}-{}", ctx.match_id, innings_number),
        innings_number,
        batting_team_id,
        bowling_team_id,
        runs,
        wickets: parse::number(details.and_then(|d| d.wickets.as_ref())).min(10),
        overs,
        balls,
        run_rate,
        required_run_rate: None,
        target: None,
        extras: to_extras(card.extras.as_ref()),
        batting: card
            .batsman
            .iter()
            .enumerate()
            .map(|(i, b)| to_batting(b, i))
            .collect(),
        bowling: card.bowler.iter().map(to_bowling).collect(),
        fall_of_wickets: card
            .fow
            .iter()
            .enumerate()
            .map(|(i, f)| to_fall_of_wicket(f, i))
            .collect(),
        partnerships: Vec::new(),
        recent_overs: Vec::new(),
        is_completed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cricbuzz::{LiveResponse, ScorecardResponse};
    use crate::api::{cricbuzz::flatten_live_response, RawMatchList};
    use crate::models::{MatchStatus, WicketType};
    use crate::normalize::to_match_summaries;

    const LIVE_JSON: &str = r#"{
        "typeMatches": [{
            "matchType": "International",
            "seriesMatches": [{
                "seriesAdWrapper": {
                    "seriesId": 7572,
                    "seriesName": "Australia tour of India 2024",
                    "matches": [{
                        "matchInfo": {
                            "matchId": 87654,
                            "matchDesc": "3rd T20I",
                            "matchFormat": "T20",
                            "startDate": "1733472000000",
                            "state": "In Progress",
                            "status": "India need 40 runs in 30 balls",
                            "team1": {"teamId": 2, "teamName": "India", "teamSName": "IND", "imageId": 172115},
                            "team2": {"teamId": 4, "teamName": "Australia", "teamSName": "AUS"},
                            "venueInfo": {"id": 31, "ground": "Wankhede Stadium", "city": "Mumbai", "country": "India"}
                        },
                        "matchScore": {
                            "team1Score": {"inngs1": {"runs": 147, "wickets": 4, "overs": 15.0}},
                            "team2Score": {"inngs1": {"runs": 186, "wickets": 5, "overs": 19.6}}
                        }
                    }]
                }
            }, {
                "adDetail": {"name": "native", "layout": "x", "position": 1}
            }]
        }]
    }"#;

    fn live_items() -> Vec<LiveMatchItem> {
        let response: LiveResponse = serde_json::from_str(LIVE_JSON).unwrap();
        flatten_live_response(response)
    }

    #[test]
    fn test_state_mapping_and_is_live() {
        let cases = [
            ("Complete", MatchStatus::Completed),
            ("Result", MatchStatus::Completed),
            ("In Progress", MatchStatus::Live),
            ("running", MatchStatus::Live),
            ("Abandoned", MatchStatus::Abandoned),
            ("No Result", MatchStatus::Abandoned),
            ("Delay", MatchStatus::Delayed),
            ("Innings Break", MatchStatus::InningsBreak),
            ("Tea", MatchStatus::Tea),
            ("Preview", MatchStatus::Upcoming),
            ("", MatchStatus::Upcoming),
        ];

        for (state, expected) in cases {
            let mut item = live_items().remove(0);
            item.match_info.state = state.to_string();
            let summary = to_match_summary(&item);
            assert_eq!(summary.status, expected, "state {:?}", state);
            assert_eq!(summary.is_live, expected.is_live(), "state {:?}", state);
        }
    }

    #[test]
    fn test_summary_from_live_list() {
        let summaries = to_match_summaries(&RawMatchList::Cricbuzz(live_items()));
        assert_eq!(summaries.len(), 1);

        let s = &summaries[0];
        assert_eq!(s.match_id, "87654");
        assert_eq!(s.format, MatchFormat::T20);
        assert_eq!(s.team1.score.as_deref(), Some("147/4"));
        assert_eq!(s.team1.overs.as_deref(), Some("15"));
        assert_eq!(s.team2.short_name, "AUS");
        assert_eq!(s.venue, "Wankhede Stadium, Mumbai");
        assert_eq!(s.series_name.as_deref(), Some("Australia tour of India 2024"));
        assert_eq!(s.start_time.to_rfc3339(), "2024-12-06T08:00:00+00:00");
    }

    #[test]
    fn test_test_match_score_joins_innings() {
        let mut item = live_items().remove(0);
        item.match_score = serde_json::from_str(
            r#"{"team1Score": {"inngs1": {"runs": 218, "wickets": 10, "overs": 70.2}, "inngs2": {"runs": 205, "wickets": 3, "overs": 51.4}}}"#,
        )
        .unwrap();

        let summary = to_match_summary(&item);
        assert_eq!(summary.team1.score.as_deref(), Some("218/10 & 205/3"));
        assert_eq!(summary.team1.overs.as_deref(), Some("51.4"));
        assert_eq!(summary.team2.score, None);
    }

    #[test]
    fn test_full_match_team_records() {
        let item = live_items().remove(0);
        let full = to_match(&item, Utc::now());

        assert_eq!(full.team1.id, "2");
        assert_eq!(full.team1.primary_color, "#0066b3");
        assert_eq!(
            full.team1.flag_url.as_deref(),
            Some("https://i.cricdb.com/images/172115.jpg")
        );
        assert_eq!(full.team2.flag_url, None);
        assert_eq!(full.venue.city, "Mumbai");
        assert_eq!(full.series_id.as_deref(), Some("7572"));
    }

    #[test]
    fn test_innings_from_scorecard() {
        let card: ScorecardResponse = serde_json::from_str(
            r#"{
                "scorecard": [{
                    "inningsId": 1,
                    "batsman": [
                        {"id": 11, "name": "Rohit Sharma", "runs": 45, "balls": 30, "fours": 5, "sixes": 2, "strkrate": "150.00", "outdec": "c Smith b Starc"},
                        {"id": 12, "name": "Virat Kohli", "runs": 0, "balls": 0, "outdec": "not out"},
                        {"id": 13, "name": "Suryakumar Yadav", "runs": 12, "balls": 8, "outdec": "run out (Maxwell)"}
                    ],
                    "bowler": [
                        {"id": 21, "name": "Mitchell Starc", "overs": "3.4", "maidens": 0, "runs": 32, "wickets": 1, "no_balls": 1, "wides": 2, "dots": 5}
                    ],
                    "scoreDetails": {"runs": 147, "wickets": 4, "runRate": 9.8},
                    "extras": {"total": 99, "byes": 1, "legByes": 3, "wides": 6, "noBalls": 2},
                    "fow": [{"batsmanId": 11, "batsmanName": "Rohit Sharma", "overNbr": 4.3, "runs": 52, "wktNbr": 1}]
                }]
            }"#,
        )
        .unwrap();

        let ctx = MatchContext::placeholder("87654");
        let inn = to_innings(&card.scorecard[0], 1, &ctx);

        assert_eq!(inn.id, "87654-1");
        assert_eq!(inn.overs, 0);
        assert_eq!(inn.balls, 0);
        assert_eq!(inn.run_rate, 9.8);
        assert_eq!(inn.extras.total, 12);
        assert_eq!(inn.extras.total, inn.extras.component_sum());

        let rohit = &inn.batting[0];
        assert!(rohit.is_out);
        assert_eq!(rohit.wicket_type, Some(WicketType::Caught));
        assert_eq!(rohit.dismissed_by.as_deref(), Some("Starc"));
        assert_eq!(rohit.strike_rate, 150.0);

        let kohli = &inn.batting[1];
        assert!(!kohli.is_out);
        assert_eq!(kohli.wicket_type, None);
        assert_eq!(kohli.dismissed_by, None);
        assert_eq!(kohli.strike_rate, 0.0);
        assert_eq!(kohli.position, 2);

        assert_eq!(inn.batting[2].dismissed_by.as_deref(), Some("Maxwell"));

        let starc = &inn.bowling[0];
        assert_eq!((starc.overs, starc.balls), (3, 4));
        assert_eq!(starc.economy, 8.73);
        assert_eq!(starc.no_balls, 1);

        assert_eq!(inn.fall_of_wickets[0].overs, 4.3);
    }

    #[test]
    fn test_partial_extras_keep_provider_total() {
        let extras: ExtrasCard = serde_json::from_str(r#"{"total": 9, "wides": 6}"#).unwrap();
        let e = to_extras(Some(&extras));
        assert_eq!(e.total, 9);
        assert_eq!(e.wides, 6);
    }
}
