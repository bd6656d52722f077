use chrono::{DateTime, Utc};

use super::parse;
use super::MatchContext;
use crate::api::cricapi::{ApiMatch, ApiSeries, BattingEntry, BowlingEntry, ScorecardInnings, TeamInfo};
use crate::models::{
    team_colors, BattingStats, BowlingStats, Extras, Innings, Match, MatchFormat, MatchStatus,
    MatchSummary, Series, Team, TeamScoreView, Venue, WicketType,
};

/// Breaks detected in the status text of a match in progress
const BREAKS: [(&str, MatchStatus); 4] = [
    ("innings break", MatchStatus::InningsBreak),
    ("lunch", MatchStatus::Lunch),
    ("tea", MatchStatus::Tea),
    ("drinks", MatchStatus::Drinks),
];

/// Status from the status text and the started/ended flags
pub fn status_of(m: &ApiMatch) -> MatchStatus {
    let text = m.status.to_lowercase();

    if text.contains("abandon") {
        return MatchStatus::Abandoned;
    }
    if text.contains("no result") {
        return MatchStatus::NoResult;
    }
    if m.match_ended {
        return MatchStatus::Completed;
    }
    if !m.match_started {
        return if text.contains("delay") {
            MatchStatus::Delayed
        } else {
            MatchStatus::Upcoming
        };
    }

    for (word, status) in BREAKS {
        if parse::contains_word(&text, word) {
            return status;
        }
    }
    if text.contains("delay") {
        return MatchStatus::Delayed;
    }
    MatchStatus::Live
}

/// Team names come from `teams`, falling back to `teamInfo`
fn team_names(m: &ApiMatch) -> (String, String) {
    let from_info = |i: usize| m.team_info.get(i).map(|t| t.name.clone());
    let team1 = m.teams.first().cloned().or_else(|| from_info(0)).unwrap_or_default();
    let team2 = m.teams.get(1).cloned().or_else(|| from_info(1)).unwrap_or_default();
    (team1, team2)
}

fn info_for<'a>(m: &'a ApiMatch, name: &str) -> Option<&'a TeamInfo> {
    m.team_info.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

fn short_name(m: &ApiMatch, name: &str) -> String {
    info_for(m, name)
        .map(|t| t.shortname.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| parse::short_code(name))
}

/// Scores are attributed by the innings label, e.g. "India Inning 1"
fn team_view(m: &ApiMatch, name: &str) -> TeamScoreView {
    let view = TeamScoreView::new(name, short_name(m, name));
    if name.is_empty() {
        return view;
    }

    let prefix = name.to_lowercase();
    let scores: Vec<_> = m
        .score
        .iter()
        .filter(|s| s.inning.to_lowercase().starts_with(&prefix))
        .collect();
    let Some(latest) = scores.last() else {
        return view;
    };

    let line = scores
        .iter()
        .map(|s| format!("{}/{}", parse::number(s.r.as_ref()), parse::number(s.w.as_ref())))
        .collect::<Vec<_>>()
        .join(" & ");
    view.with_score(line, parse::text(latest.o.as_ref()))
}

fn start_time(m: &ApiMatch) -> DateTime<Utc> {
    m.date_time_gmt
        .as_deref()
        .and_then(parse::parse_datetime)
        .or_else(|| m.date.as_deref().and_then(parse::parse_datetime))
        .unwrap_or_default()
}

fn format_of(m: &ApiMatch) -> MatchFormat {
    MatchFormat::parse(m.match_type.as_deref().unwrap_or_default())
}

pub fn to_match_summary(m: &ApiMatch) -> MatchSummary {
    let status = status_of(m);
    let (team1, team2) = team_names(m);

    MatchSummary {
        match_id: m.id.clone(),
        format: format_of(m),
        status,
        status_text: m.status.clone(),
        team1: team_view(m, &team1),
        team2: team_view(m, &team2),
        venue: m.venue.clone().unwrap_or_default(),
        start_time: start_time(m),
        is_live: status.is_live(),
        series_name: None,
    }
}

fn to_team(m: &ApiMatch, name: &str) -> Team {
    let code = short_name(m, name);
    let colors = team_colors(&code);
    let colors = if colors == crate::models::teams::PLACEHOLDER_COLORS {
        team_colors(name)
    } else {
        colors
    };

    Team {
        id: if name.is_empty() { code.clone() } else { name.to_string() },
        name: name.to_string(),
        short_name: code.clone(),
        code,
        primary_color: colors.primary.to_string(),
        secondary_color: colors.secondary.to_string(),
        flag_url: info_for(m, name).and_then(|t| t.img.clone()),
    }
}

/// Venue text is "Ground, City"
fn to_venue(m: &ApiMatch) -> Venue {
    let text = m.venue.clone().unwrap_or_default();
    let mut parts = text.splitn(2, ',').map(str::trim);
    let name = parts.next().unwrap_or_default().to_string();
    let city_from_text = parts.next().unwrap_or_default().to_string();
    let info = m.venue_info.as_ref();

    Venue {
        id: String::new(),
        name,
        city: info
            .and_then(|v| v.city.clone())
            .unwrap_or(city_from_text),
        country: info.and_then(|v| v.country.clone()).unwrap_or_default(),
    }
}

/// Match without innings; the caller attaches the scorecard
pub fn to_match(m: &ApiMatch, now: DateTime<Utc>) -> Match {
    let status = status_of(m);
    let (team1, team2) = team_names(m);
    let parsed = parse::parse_result(&m.status);

    let winner = m
        .match_winner
        .clone()
        .filter(|w| !w.is_empty())
        .or_else(|| parsed.as_ref().map(|(w, _)| w.clone()));

    Match {
        id: m.id.clone(),
        series_id: m.series_id.clone(),
        series_name: None,
        format: format_of(m),
        status,
        status_text: m.status.clone(),
        team1: to_team(m, &team1),
        team2: to_team(m, &team2),
        venue: to_venue(m),
        start_time: start_time(m),
        innings: Vec::new(),
        current_innings: None,
        is_live: status.is_live(),
        last_updated: now,
        winner,
        result_margin: parsed.map(|(_, margin)| margin),
    }
}

fn to_batting(entry: &BattingEntry, index: usize) -> BattingStats {
    let runs = parse::number(entry.r.as_ref());
    let balls = parse::number(entry.b.as_ref());
    let text = entry.dismissal_text.as_deref().unwrap_or_default();
    let code = entry.dismissal.as_deref().unwrap_or_default();
    let is_out = !(parse::is_not_out(text) && parse::is_not_out(code));

    let wicket_type = is_out
        .then(|| parse::wicket_type_from_code(code).or_else(|| parse::wicket_type_from_text(text)))
        .flatten();
    let dismissed_by = if !is_out {
        None
    } else if wicket_type == Some(WicketType::RunOut) {
        entry
            .catcher
            .as_ref()
            .map(|c| c.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| parse::dismissed_by_from_text(text))
    } else {
        entry
            .bowler
            .as_ref()
            .map(|b| b.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| parse::dismissed_by_from_text(text))
    };

    let strike_rate = if balls == 0 {
        0.0
    } else {
        parse::decimal(entry.sr.as_ref())
            .filter(|sr| *sr > 0.0)
            .unwrap_or_else(|| parse::strike_rate(runs, balls))
    };

    BattingStats {
        player_id: entry.batsman.id.clone(),
        player_name: entry.batsman.name.clone(),
        runs,
        balls,
        fours: parse::number(entry.fours.as_ref()),
        sixes: parse::number(entry.sixes.as_ref()),
        strike_rate,
        is_out,
        wicket_type,
        dismissed_by,
        position: (index as u32 + 1).min(11),
    }
}

fn to_bowling(entry: &BowlingEntry) -> BowlingStats {
    let (overs, balls) = parse::parse_overs(entry.o.as_ref());
    let runs = parse::number(entry.r.as_ref());

    BowlingStats {
        player_id: entry.bowler.id.clone(),
        player_name: entry.bowler.name.clone(),
        overs,
        balls,
        maidens: parse::number(entry.m.as_ref()),
        runs,
        wickets: parse::number(entry.w.as_ref()),
        economy: parse::decimal(entry.eco.as_ref())
            .filter(|e| *e > 0.0)
            .unwrap_or_else(|| parse::per_over(runs, overs, balls)),
        wides: parse::number(entry.wd.as_ref()),
        no_balls: parse::number(entry.nb.as_ref()),
        dot_balls: 0,
    }
}

/// Only the total and byes are reported, so the total is kept as given
fn to_extras(inn: &ScorecardInnings) -> Extras {
    let Some(extras) = &inn.extras else {
        return Extras::default();
    };
    Extras {
        byes: parse::number(extras.b.as_ref()),
        total: parse::number(extras.r.as_ref()),
        ..Extras::default()
    }
}

pub fn to_innings(inn: &ScorecardInnings, innings_number: u32, ctx: &MatchContext) -> Innings {
    let (batting_team_id, bowling_team_id) = ctx.batting_order(innings_number);
    let totals = inn.totals.as_ref();
    let runs = parse::number(totals.and_then(|t| t.runs.as_ref()));
    let (overs, balls) = parse::parse_overs(totals.and_then(|t| t.overs.as_ref()));

    Innings {
        id: format!("{}-{}", ctx.match_id, innings_number),
        innings_number,
        batting_team_id,
        bowling_team_id,
        runs,
        wickets: parse::number(totals.and_then(|t| t.wickets.as_ref())).min(10),
        overs,
        balls,
        run_rate: parse::per_over(runs, overs, balls),
        required_run_rate: None,
        target: None,
        extras: to_extras(inn),
        batting: inn
            .batting
            .iter()
            .enumerate()
            .map(|(i, b)| to_batting(b, i))
            .collect(),
        bowling: inn.bowling.iter().map(to_bowling).collect(),
        fall_of_wickets: Vec::new(),
        partnerships: Vec::new(),
        recent_overs: Vec::new(),
        is_completed: false,
    }
}

fn series_format(s: &ApiSeries) -> MatchFormat {
    let count = |n: &Option<crate::api::LooseNumber>| parse::number(n.as_ref());
    if count(&s.test) > 0 {
        MatchFormat::Test
    } else if count(&s.odi) > 0 {
        MatchFormat::Odi
    } else {
        MatchFormat::T20
    }
}

/// Series without a parseable start date are dropped
pub fn to_series(s: &ApiSeries) -> Option<Series> {
    let start_date = s.start_date.as_deref().and_then(parse::parse_date)?;
    let end_date = s
        .end_date
        .as_deref()
        .and_then(|end| parse::parse_end_date(end, start_date))
        .unwrap_or(start_date);

    let total_matches = match parse::number(s.matches.as_ref()) {
        0 => {
            [&s.test, &s.odi, &s.t20]
                .into_iter()
                .map(|n| parse::number(n.as_ref()))
                .fold(0, u32::saturating_add)
        }
        n => n,
    };

    Some(Series {
        id: s.id.clone(),
        name: s.name.clone(),
        start_date,
        end_date,
        format: series_format(s),
        total_matches,
    })
}
