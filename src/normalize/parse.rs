//! Defensive parsing helpers shared by both provider normalizers

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::api::LooseNumber;
use crate::models::WicketType;

/// Split an overs figure like "18.4" into whole overs and balls (0-5)
pub fn parse_overs(value: Option<&LooseNumber>) -> (u32, u32) {
    let Some(value) = value else {
        return (0, 0);
    };

    let text = value.as_text();
    let mut parts = text.splitn(2, '.');
    let overs = parts
        .next()
        .and_then(|o| o.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let balls = parts
        .next()
        .and_then(|b| b.trim().chars().next())
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0)
        .min(5);

    (overs, balls)
}

pub fn number(value: Option<&LooseNumber>) -> u32 {
    value.map(LooseNumber::as_u32).unwrap_or(0)
}

pub fn decimal(value: Option<&LooseNumber>) -> Option<f64> {
    value.map(LooseNumber::as_f64)
}

pub fn text(value: Option<&LooseNumber>) -> String {
    value.map(LooseNumber::as_text).unwrap_or_default()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs per 100 balls, 0 when no balls faced
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    round2(runs as f64 * 100.0 / balls as f64)
}

/// Runs per over, 0 when nothing bowled
pub fn per_over(runs: u32, overs: u32, balls: u32) -> f64 {
    let total_balls = overs.saturating_mul(6).saturating_add(balls);
    if total_balls == 0 {
        return 0.0;
    }
    round2(runs as f64 * 6.0 / total_balls as f64)
}

/// Case-insensitive match of `word` bounded by non-alphanumerics
pub fn contains_word(haystack: &str, word: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let word = word.to_lowercase();
    if word.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(&word) {
        let begin = start + pos;
        let end = begin + word.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }

    false
}

/// "not out", "batting" and blank dismissal text all mean the batter is in
pub fn is_not_out(dismissal: &str) -> bool {
    let dismissal = dismissal.trim().to_lowercase();
    dismissal.is_empty() || dismissal.contains("not out") || dismissal == "batting"
}

/// Wicket type from scorecard dismissal text, e.g. "c Smith b Starc"
pub fn wicket_type_from_text(dismissal: &str) -> Option<WicketType> {
    let d = dismissal.trim().to_lowercase();

    if is_not_out(&d) {
        return None;
    }
    if d.starts_with("c & b") || d.starts_with("c and b") || d.starts_with("c&b") {
        return Some(WicketType::CaughtAndBowled);
    }
    if d.starts_with("run out") {
        return Some(WicketType::RunOut);
    }
    if d.starts_with("retired hurt") || d.starts_with("retired not out") {
        return Some(WicketType::RetiredHurt);
    }
    if d.starts_with("retired") {
        return Some(WicketType::RetiredOut);
    }
    if d.starts_with("hit wicket") {
        return Some(WicketType::HitWicket);
    }
    if d.starts_with("lbw") {
        return Some(WicketType::Lbw);
    }
    if d.starts_with("st ") {
        return Some(WicketType::Stumped);
    }
    if d.starts_with("c ") {
        return Some(WicketType::Caught);
    }
    if d.starts_with("b ") {
        return Some(WicketType::Bowled);
    }
    if d.contains("handled") {
        return Some(WicketType::HandledBall);
    }
    if d.contains("obstruct") {
        return Some(WicketType::ObstructingField);
    }
    if d.contains("timed out") {
        return Some(WicketType::TimedOut);
    }
    None
}

/// Wicket type from a short dismissal code such as "catch" or "lbw"
pub fn wicket_type_from_code(code: &str) -> Option<WicketType> {
    match code.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
        "bowled" => Some(WicketType::Bowled),
        "catch" | "caught" => Some(WicketType::Caught),
        "cb" | "caughtandbowled" | "candb" => Some(WicketType::CaughtAndBowled),
        "lbw" => Some(WicketType::Lbw),
        "runout" => Some(WicketType::RunOut),
        "stumped" | "stumping" => Some(WicketType::Stumped),
        "hitwicket" => Some(WicketType::HitWicket),
        "retiredhurt" => Some(WicketType::RetiredHurt),
        "retired" | "retiredout" => Some(WicketType::RetiredOut),
        "handledball" | "handled" => Some(WicketType::HandledBall),
        "obstructingfield" | "obstruct" => Some(WicketType::ObstructingField),
        "timedout" => Some(WicketType::TimedOut),
        _ => None,
    }
}

/// Bowler credited in the dismissal text, or the fielder for run outs
pub fn dismissed_by_from_text(dismissal: &str) -> Option<String> {
    let d = dismissal.trim();
    // ASCII lowercasing keeps byte offsets aligned with `d`
    let folded = d.to_ascii_lowercase();

    if folded.starts_with("run out") {
        let open = d.find('(')?;
        let close = d[open..].find(')').map(|c| open + c).unwrap_or(d.len());
        let fielder = d[open + 1..close].trim();
        return (!fielder.is_empty()).then(|| fielder.to_string());
    }

    let start = if folded.starts_with("b ") {
        2
    } else {
        folded.rfind(" b ")? + 3
    };
    let bowler = d[start..].trim();
    (!bowler.is_empty()).then(|| bowler.to_string())
}

/// "India won by 5 wickets" -> ("India", "5 wickets")
pub fn parse_result(status_text: &str) -> Option<(String, String)> {
    let pos = status_text.find(" won by ")?;

    let winner = status_text[..pos].trim();
    let margin = status_text[pos + " won by ".len()..]
        .split('(')
        .next()
        .unwrap_or_default()
        .trim();

    if winner.is_empty() || margin.is_empty() {
        return None;
    }
    Some((winner.to_string(), margin.to_string()))
}

/// Instant from epoch milliseconds
pub fn from_epoch_millis(value: Option<&LooseNumber>) -> Option<DateTime<Utc>> {
    let millis = value?.as_text().parse::<i64>().ok()?;
    DateTime::from_timestamp_millis(millis)
}

/// Accepts RFC 3339, naive "YYYY-MM-DDTHH:MM:SS" (read as UTC) and bare dates
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    parse_date(value)
}

pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Series end dates sometimes come as "Dec 15" with no year. The year is
/// taken from `start`, rolling over when the month precedes the start month.
pub fn parse_end_date(value: &str, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Some(full) = parse_date(value) {
        return Some(full);
    }

    use chrono::Datelike;
    let year = start.year();
    let candidate = NaiveDate::parse_from_str(&format!("{} {}", value.trim(), year), "%b %d %Y").ok()?;
    let candidate = if candidate.month() < start.month() {
        candidate.with_year(year + 1)?
    } else {
        candidate
    };
    candidate.and_hms_opt(23, 59, 59).map(|naive| naive.and_utc())
}

/// Short code from a team name when the provider gives none
pub fn short_code(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 1 {
        words
            .iter()
            .filter_map(|w| w.chars().next())
            .collect::<String>()
            .to_uppercase()
    } else {
        name.chars().take(3).collect::<String>().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_overs() {
        assert_eq!(parse_overs(Some(&LooseNumber::Text("18.4".into()))), (18, 4));
        assert_eq!(parse_overs(Some(&LooseNumber::Float(18.4))), (18, 4));
        assert_eq!(parse_overs(Some(&LooseNumber::Int(20))), (20, 0));
        assert_eq!(parse_overs(Some(&LooseNumber::Text("7.9".into()))), (7, 5));
        assert_eq!(parse_overs(Some(&LooseNumber::Text("n/a".into()))), (0, 0));
        assert_eq!(parse_overs(None), (0, 0));
    }

    #[test]
    fn test_rates() {
        assert_eq!(strike_rate(54, 38), 142.11);
        assert_eq!(strike_rate(10, 0), 0.0);
        assert_eq!(per_over(32, 3, 4), 8.73);
        assert_eq!(per_over(5, 0, 0), 0.0);
        assert_eq!(per_over(10, 800_000_000, 0), 0.0);
        assert_eq!(per_over(u32::MAX, u32::MAX, 5), 6.0);
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("Tea - Day 2", "tea"));
        assert!(contains_word("Stumps: Innings Break", "innings break"));
        assert!(!contains_word("Team India need 45 runs", "tea"));
        assert!(!contains_word("Steady", "tea"));
    }

    #[test]
    fn test_dismissal_parsing() {
        assert_eq!(wicket_type_from_text("c Smith b Starc"), Some(WicketType::Caught));
        assert_eq!(wicket_type_from_text("c & b Zampa"), Some(WicketType::CaughtAndBowled));
        assert_eq!(wicket_type_from_text("lbw b Cummins"), Some(WicketType::Lbw));
        assert_eq!(wicket_type_from_text("st Carey b Zampa"), Some(WicketType::Stumped));
        assert_eq!(wicket_type_from_text("b Bumrah"), Some(WicketType::Bowled));
        assert_eq!(wicket_type_from_text("run out (Maxwell)"), Some(WicketType::RunOut));
        assert_eq!(wicket_type_from_text("not out"), None);
        assert_eq!(wicket_type_from_text("batting"), None);

        assert_eq!(dismissed_by_from_text("c Smith b Starc").as_deref(), Some("Starc"));
        assert_eq!(dismissed_by_from_text("b Bumrah").as_deref(), Some("Bumrah"));
        assert_eq!(dismissed_by_from_text("run out (Maxwell/Carey)").as_deref(), Some("Maxwell/Carey"));
        assert_eq!(dismissed_by_from_text("not out"), None);
        assert_eq!(dismissed_by_from_text("B Bumrah").as_deref(), Some("Bumrah"));
        assert_eq!(dismissed_by_from_text("c Smith B Starc").as_deref(), Some("Starc"));
        assert_eq!(dismissed_by_from_text("c Müller b Ørsted").as_deref(), Some("Ørsted"));
        assert_eq!(dismissed_by_from_text("Run Out (Jadeja)").as_deref(), Some("Jadeja"));

        assert_eq!(wicket_type_from_code("catch"), Some(WicketType::Caught));
        assert_eq!(wicket_type_from_code("run out"), Some(WicketType::RunOut));
        assert_eq!(wicket_type_from_code("???"), None);
    }

    #[test]
    fn test_parse_result() {
        assert_eq!(
            parse_result("India won by 5 wickets"),
            Some(("India".to_string(), "5 wickets".to_string()))
        );
        assert_eq!(
            parse_result("Australia won by 23 runs (DLS method)"),
            Some(("Australia".to_string(), "23 runs".to_string()))
        );
        assert_eq!(parse_result("Match tied"), None);
    }

    #[test]
    fn test_dates() {
        let expected = Utc.with_ymd_and_hms(2024, 12, 6, 8, 0, 0).unwrap();
        assert_eq!(parse_datetime("2024-12-06T08:00:00"), Some(expected));
        assert_eq!(parse_datetime("2024-12-06T08:00:00Z"), Some(expected));
        assert_eq!(
            from_epoch_millis(Some(&LooseNumber::Text("1733472000000".into()))),
            Some(expected)
        );

        let start = Utc.with_ymd_and_hms(2024, 11, 22, 0, 0, 0).unwrap();
        assert_eq!(
            parse_end_date("Jan 7", start),
            Some(Utc.with_ymd_and_hms(2025, 1, 7, 23, 59, 59).unwrap())
        );
        assert_eq!(
            parse_end_date("2024-12-18", start),
            Some(Utc.with_ymd_and_hms(2024, 12, 18, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_short_code() {
        assert_eq!(short_code("India"), "IND");
        assert_eq!(short_code("New Zealand"), "NZ");
    }
}
