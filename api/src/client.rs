use crate::wire::{
    ListResponse, SnapshotFile, WireMatch, WireReferee, WireResult, WireTeam, WireTournament,
    WireVenue,
};
use crate::{Match, MatchResult, MatchStatus, Referee, Team, Tournament, Venue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// Client for the tournament sheet backend. All calls are form-encoded
/// POSTs carrying `action`/`entity` parameters, the transport the admin
/// console has always spoken.
///
/// Offline mode: when `GTTUI_SNAPSHOT_JSON` names a file, every list call
/// reads from that single JSON snapshot instead of the network, applying
/// the same per-tournament filtering client-side.
#[derive(Debug, Clone)]
pub struct GtApi {
    client: Client,
    base_url: Option<String>,
    snapshot: Option<PathBuf>,
    timeout: Duration,
}

impl Default for GtApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("gttui/0.1 (terminal standings console)")
                .build()
                .unwrap_or_default(),
            base_url: None,
            snapshot: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Http(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// The backend answered but flagged the request as failed (`ok: false`).
    Rejected(String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Http(e, url) => write!(f, "HTTP error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Rejected(msg) => write!(f, "Backend rejected request: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl GtApi {
    /// Build a client from the environment: `GTTUI_API_URL` for the remote
    /// backend, `GTTUI_SNAPSHOT_JSON` for offline snapshot mode.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GTTUI_API_URL")
                .ok()
                .filter(|u| !u.trim().is_empty()),
            snapshot: std::env::var("GTTUI_SNAPSHOT_JSON")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            base_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_snapshot(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: Some(path.into()),
            ..Self::default()
        }
    }

    /// Tournaments are listed unfiltered — the selector shows them all.
    pub async fn list_tournaments(&self) -> ApiResult<Vec<Tournament>> {
        if let Some(path) = &self.snapshot {
            return Ok(load_snapshot(path)?
                .tournaments
                .into_iter()
                .map(map_tournament)
                .collect());
        }
        let rows: Vec<WireTournament> = self.list("tournaments", None).await?;
        Ok(rows.into_iter().map(map_tournament).collect())
    }

    /// Teams filtered to one tournament (server-side via `filterKey`).
    pub async fn list_teams(&self, tournament_id: &str) -> ApiResult<Vec<Team>> {
        if let Some(path) = &self.snapshot {
            return Ok(load_snapshot(path)?
                .teams
                .into_iter()
                .filter(|t| wire_matches_tournament(t.tournament_id.as_deref(), tournament_id))
                .map(map_team)
                .collect());
        }
        let rows: Vec<WireTeam> = self
            .list("teams", Some(("tournamentId", tournament_id)))
            .await?;
        Ok(rows.into_iter().map(map_team).collect())
    }

    /// Matches filtered to one tournament (server-side via `filterKey`).
    pub async fn list_matches(&self, tournament_id: &str) -> ApiResult<Vec<Match>> {
        if let Some(path) = &self.snapshot {
            return Ok(load_snapshot(path)?
                .matches
                .into_iter()
                .filter(|m| wire_matches_tournament(m.tournament_id.as_deref(), tournament_id))
                .map(map_match)
                .collect());
        }
        let rows: Vec<WireMatch> = self
            .list("matches", Some(("tournamentId", tournament_id)))
            .await?;
        Ok(rows.into_iter().map(map_match).collect())
    }

    /// Results are deliberately unfiltered: result rows carry no tournament
    /// column, so consumers join purely on `match_id`. Match ids are
    /// allocated globally by the backend, which is what makes that join
    /// sound.
    pub async fn list_results(&self) -> ApiResult<Vec<MatchResult>> {
        if let Some(path) = &self.snapshot {
            return Ok(load_snapshot(path)?
                .results
                .into_iter()
                .map(map_result)
                .collect());
        }
        let rows: Vec<WireResult> = self.list("results", None).await?;
        Ok(rows.into_iter().map(map_result).collect())
    }

    pub async fn list_venues(&self) -> ApiResult<Vec<Venue>> {
        if let Some(path) = &self.snapshot {
            return Ok(load_snapshot(path)?.venues.into_iter().map(map_venue).collect());
        }
        let rows: Vec<WireVenue> = self.list("venues", None).await?;
        Ok(rows.into_iter().map(map_venue).collect())
    }

    pub async fn list_referees(&self) -> ApiResult<Vec<Referee>> {
        if let Some(path) = &self.snapshot {
            return Ok(load_snapshot(path)?
                .referees
                .into_iter()
                .map(map_referee)
                .collect());
        }
        let rows: Vec<WireReferee> = self.list("referees", None).await?;
        Ok(rows.into_iter().map(map_referee).collect())
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        entity: &str,
        filter: Option<(&str, &str)>,
    ) -> ApiResult<Vec<T>> {
        let mut params = vec![("action", "list"), ("entity", entity)];
        // Blank filter values are dropped entirely, same as the console.
        if let Some((key, value)) = filter
            && !value.trim().is_empty()
        {
            params.push(("filterKey", key));
            params.push(("filterValue", value));
        }
        let raw: ListResponse<T> = self.call(&params).await?;
        if !raw.ok {
            return Err(ApiError::Rejected(
                raw.error
                    .or(raw.message)
                    .unwrap_or_else(|| format!("list {entity} failed")),
            ));
        }
        Ok(raw.rows.unwrap_or_default())
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> ApiResult<ListResponse<T>> {
        let Some(url) = self.base_url.as_deref() else {
            return Err(ApiError::NotFound(
                "no backend configured: set GTTUI_API_URL or GTTUI_SNAPSHOT_JSON".into(),
            ));
        };
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .form(params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<ListResponse<T>>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Http(e, url.to_owned())),
        }
    }
}

fn load_snapshot(path: &Path) -> ApiResult<SnapshotFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::NotFound(format!("could not read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| ApiError::Other(format!("invalid snapshot json at {}: {e}", path.display())))
}

fn wire_matches_tournament(row_tournament_id: Option<&str>, wanted: &str) -> bool {
    if wanted.trim().is_empty() {
        return true;
    }
    row_tournament_id == Some(wanted)
}

// ---------------------------------------------------------------------------
// Mapping: sheet wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_tournament(raw: WireTournament) -> Tournament {
    let id = raw.id.unwrap_or_default();
    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| id.clone());
    Tournament {
        id,
        name,
        sport: raw.sport.unwrap_or_default(),
        format: raw.format.unwrap_or_default(),
        status: raw.status.unwrap_or_default().to_ascii_uppercase(),
        start_date: raw.start_date.unwrap_or_default(),
        end_date: raw.end_date.unwrap_or_default(),
    }
}

fn map_team(raw: WireTeam) -> Team {
    Team {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        group_name: raw.group_name.unwrap_or_default(),
        coach_name: raw.coach_name.filter(|c| !c.is_empty()),
        phone: raw.phone.filter(|p| !p.is_empty()),
    }
}

fn map_match(raw: WireMatch) -> Match {
    Match {
        id: raw.id.unwrap_or_default(),
        tournament_id: raw.tournament_id.unwrap_or_default(),
        stage: raw.stage.unwrap_or_default(),
        group_name: raw.group_name.unwrap_or_default(),
        home_team_id: raw.home_team_id.unwrap_or_default(),
        away_team_id: raw.away_team_id.unwrap_or_default(),
        venue_id: raw.venue_id.filter(|v| !v.is_empty()),
        referee_id: raw.referee_id.filter(|r| !r.is_empty()),
        start_time: raw.start_time.as_deref().and_then(parse_start_time),
        status: raw
            .status
            .as_deref()
            .and_then(MatchStatus::parse)
            .unwrap_or_default(),
    }
}

fn map_result(raw: WireResult) -> MatchResult {
    MatchResult {
        match_id: raw.match_id.unwrap_or_default(),
        home_score: raw.home_score,
        away_score: raw.away_score,
        status: raw.status.as_deref().and_then(MatchStatus::parse),
    }
}

fn map_venue(raw: WireVenue) -> Venue {
    Venue {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
    }
}

fn map_referee(raw: WireReferee) -> Referee {
    Referee {
        id: raw.id.unwrap_or_default(),
        full_name: raw.full_name.unwrap_or_default(),
    }
}

/// Kickoff timestamps come from a datetime-local form field, so the zone
/// suffix is frequently missing. Zoneless values are taken as UTC.
fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tournament_name_falls_back_to_id() {
        let t = map_tournament(WireTournament {
            id: Some("t9".into()),
            ..Default::default()
        });
        assert_eq!(t.name, "t9");
        assert_eq!(t.id, "t9");
    }

    #[test]
    fn team_mapping_defaults_group_to_empty() {
        let team = map_team(WireTeam {
            id: Some("7".into()),
            name: Some("Atlas".into()),
            ..Default::default()
        });
        assert_eq!(team.group_name, "");
        assert_eq!(team.coach_name, None);
    }

    #[test]
    fn match_status_defaults_to_scheduled_when_blank() {
        let m = map_match(WireMatch {
            id: Some("m1".into()),
            status: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(m.status, MatchStatus::Scheduled);
    }

    #[test]
    fn result_status_stays_absent_when_blank() {
        let r = map_result(WireResult {
            match_id: Some("m1".into()),
            status: Some("".into()),
            ..Default::default()
        });
        assert_eq!(r.status, None);
    }

    #[test]
    fn result_keeps_unrecognized_status_as_present() {
        let r = map_result(WireResult {
            match_id: Some("m1".into()),
            status: Some("ABANDONED".into()),
            ..Default::default()
        });
        assert_eq!(r.status, Some(MatchStatus::Unrecognized));
    }

    #[test]
    fn start_time_accepts_zoneless_forms() {
        assert!(parse_start_time("2026-06-01T18:30").is_some());
        assert!(parse_start_time("2026-06-01T18:30:00").is_some());
        assert!(parse_start_time("2026-06-01T18:30:00Z").is_some());
        assert!(parse_start_time("2026-06-01").is_some());
        assert_eq!(parse_start_time("next tuesday"), None);
        assert_eq!(parse_start_time(""), None);
    }

    #[test]
    fn wire_row_with_numeric_scores_maps_to_whole_goals() {
        let raw: WireResult = serde_json::from_value(json!({
            "matchId": "m1",
            "homeScore": "2",
            "awayScore": 1,
            "status": "FINISHED"
        }))
        .unwrap();
        let r = map_result(raw);
        assert_eq!(r.home_score, Some(2));
        assert_eq!(r.away_score, Some(1));
        assert_eq!(r.status, Some(MatchStatus::Finished));
    }

    #[test]
    fn snapshot_filter_ignores_blank_wanted_id() {
        assert!(wire_matches_tournament(Some("t1"), ""));
        assert!(wire_matches_tournament(Some("t1"), "t1"));
        assert!(!wire_matches_tournament(Some("t2"), "t1"));
        assert!(!wire_matches_tournament(None, "t1"));
    }
}
