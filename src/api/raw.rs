//! Provider-tagged raw payloads handed from the clients to the normalizer

use serde::Deserialize;

use super::{cricapi, cricbuzz};

/// A number that providers send either as JSON number or as string
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    /// Parse as float; non-numeric text reads as 0
    pub fn as_f64(&self) -> f64 {
        match self {
            LooseNumber::Int(i) => *i as f64,
            LooseNumber::Float(f) if f.is_finite() => *f,
            LooseNumber::Float(_) => 0.0,
            LooseNumber::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Parse as non-negative integer, truncating fractions; garbage reads as 0
    pub fn as_u32(&self) -> u32 {
        match self {
            LooseNumber::Int(i) => (*i).clamp(0, u32::MAX as i64) as u32,
            LooseNumber::Float(_) => float_to_u32(self.as_f64()),
            LooseNumber::Text(s) => match s.trim().parse::<i64>() {
                Ok(i) => i.clamp(0, u32::MAX as i64) as u32,
                Err(_) => float_to_u32(self.as_f64()),
            },
        }
    }

    /// Textual form, used for ids and over strings
    pub fn as_text(&self) -> String {
        match self {
            LooseNumber::Int(i) => i.to_string(),
            LooseNumber::Float(f) => f.to_string(),
            LooseNumber::Text(s) => s.trim().to_string(),
        }
    }
}

fn float_to_u32(f: f64) -> u32 {
    if f.is_finite() && f > 0.0 {
        f.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Current matches list, one variant per provider
#[derive(Debug, Clone)]
pub enum RawMatchList {
    Cricbuzz(Vec<cricbuzz::LiveMatchItem>),
    CricApi(Vec<cricapi::ApiMatch>),
}

/// Basic info for a single match
#[derive(Debug, Clone)]
pub enum RawMatch {
    Cricbuzz(cricbuzz::LiveMatchItem),
    CricApi(cricapi::ApiMatch),
}

impl RawMatch {
    pub fn provider(&self) -> &'static str {
        match self {
            RawMatch::Cricbuzz(_) => cricbuzz::PROVIDER_NAME,
            RawMatch::CricApi(_) => cricapi::PROVIDER_NAME,
        }
    }
}

/// Innings-level detail for a single match
#[derive(Debug, Clone)]
pub enum RawScorecard {
    Cricbuzz(cricbuzz::ScorecardResponse),
    CricApi(cricapi::ScorecardData),
}

impl RawScorecard {
    pub fn provider(&self) -> &'static str {
        match self {
            RawScorecard::Cricbuzz(_) => cricbuzz::PROVIDER_NAME,
            RawScorecard::CricApi(_) => cricapi::PROVIDER_NAME,
        }
    }

    /// Match info carried inside the scorecard payload, when the provider includes it
    pub fn embedded_match(&self) -> Option<RawMatch> {
        match self {
            RawScorecard::Cricbuzz(card) => card.match_header.clone().map(|info| {
                RawMatch::Cricbuzz(cricbuzz::LiveMatchItem {
                    match_info: info,
                    match_score: None,
                })
            }),
            RawScorecard::CricApi(card) => Some(RawMatch::CricApi(card.info.clone())),
        }
    }
}

/// Series list
#[derive(Debug, Clone)]
pub enum RawSeriesList {
    /// Provider has no series endpoint
    Unsupported,
    CricApi(Vec<cricapi::ApiSeries>),
}
