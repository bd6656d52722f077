pub mod match_detail;
pub mod match_summary;
pub mod series;
pub mod teams;
pub mod usage;

pub use match_detail::{
    BattingStats, BowlingStats, Extras, FallOfWicket, Innings, Match, Over, Partnership, Team,
    Venue, WicketType,
};
pub use match_summary::{
    CategorizedMatches, MatchFormat, MatchStatus, MatchSummary, StatusGroup, TeamScoreView,
};
pub use series::Series;
pub use teams::{team_colors, TeamColors};
pub use usage::ApiUsage;
