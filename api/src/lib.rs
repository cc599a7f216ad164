pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the sheet wire format
// ---------------------------------------------------------------------------

/// One tournament row from the `tournaments` sheet. Listed unfiltered;
/// drives the console's tournament selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tournament {
    pub id: String,
    /// Falls back to `id` when the sheet row has no name.
    pub name: String,
    pub sport: String,  // "FOOTBALL", "BASKETBALL", "HANDBALL", "OTHER"
    pub format: String, // "CHAMPIONNAT", "GROUPS_FINALS", "KNOCKOUT"
    pub status: String, // "DRAFT", "ACTIVE", "FINISHED", "CANCELED"
    pub start_date: String,
    pub end_date: String,
}

/// A team registered in a tournament. Identity is `id`; `group_name` may be
/// empty, meaning the team is ungrouped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub group_name: String,
    pub coach_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    pub id: String,
    pub tournament_id: String,
    pub stage: String, // "LEAGUE", "GROUP", "ROUND_OF_16", ..., "FINAL"
    pub group_name: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub venue_id: Option<String>,
    pub referee_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub status: MatchStatus,
}

/// The entered result for a match. `status`, when present, takes precedence
/// over the owning match's status when deciding whether the match counts.
/// Scores are `None` whenever the sheet cell did not hold a whole number —
/// such results are treated as not-yet-complete, never as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    pub match_id: String,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Referee {
    pub id: String,
    pub full_name: String,
}

/// Match lifecycle status. Input is case-insensitive; anything non-blank
/// that is not in the known set parses to `Unrecognized` rather than being
/// silently coerced, so the result-over-match precedence rule can still see
/// that a status was present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Finished,
    Canceled,
    Unrecognized,
}

impl MatchStatus {
    /// Parse a raw sheet value. Returns `None` for blank input so callers
    /// can apply their own fallback (a blank result status falls back to
    /// the match status).
    pub fn parse(raw: &str) -> Option<MatchStatus> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return None;
        }
        Some(match normalized.as_str() {
            "SCHEDULED" => MatchStatus::Scheduled,
            "IN_PROGRESS" => MatchStatus::InProgress,
            "FINISHED" => MatchStatus::Finished,
            "CANCELED" | "CANCELLED" => MatchStatus::Canceled,
            _ => MatchStatus::Unrecognized,
        })
    }

    pub fn is_finished(self) -> bool {
        matches!(self, MatchStatus::Finished)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::InProgress => "LIVE",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Canceled => "CANCELED",
            MatchStatus::Unrecognized => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(MatchStatus::parse("finished"), Some(MatchStatus::Finished));
        assert_eq!(MatchStatus::parse("Finished"), Some(MatchStatus::Finished));
        assert_eq!(MatchStatus::parse(" IN_PROGRESS "), Some(MatchStatus::InProgress));
        assert_eq!(MatchStatus::parse("cancelled"), Some(MatchStatus::Canceled));
    }

    #[test]
    fn status_parse_blank_is_none() {
        assert_eq!(MatchStatus::parse(""), None);
        assert_eq!(MatchStatus::parse("   "), None);
    }

    #[test]
    fn status_parse_unknown_is_present_but_unrecognized() {
        assert_eq!(MatchStatus::parse("POSTPONED"), Some(MatchStatus::Unrecognized));
        assert!(!MatchStatus::parse("POSTPONED").unwrap().is_finished());
    }
}
