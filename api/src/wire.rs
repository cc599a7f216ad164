/// Sheet API raw wire types — serde shapes for deserializing the admin
/// backend's responses. Rows come straight out of a spreadsheet, so every
/// field is optional and ids/scores may arrive as strings or numbers.
/// These map to the clean domain types via the helpers in client.rs.
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Envelope for every `action=list` call:
/// `{ok, rows, count?, error?, message?}`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub ok: bool,
    pub rows: Option<Vec<T>>,
    pub count: Option<u64>,
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireTournament {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    pub sport: Option<String>,
    pub format: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub tournament_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub group_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub coach_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireMatch {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub tournament_id: Option<String>,
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub group_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub home_team_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub away_team_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub venue_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub referee_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub start_time: Option<String>, // ISO 8601, sometimes without zone suffix
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireResult {
    #[serde(default, deserialize_with = "loose_string")]
    pub match_id: Option<String>,
    /// The sheet sends scores as numbers or strings, and half-entered rows
    /// hold blanks or free text. Anything that is not a whole number comes
    /// through as `None`.
    #[serde(default, deserialize_with = "loose_score")]
    pub home_score: Option<i64>,
    #[serde(default, deserialize_with = "loose_score")]
    pub away_score: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireVenue {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireReferee {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub full_name: Option<String>,
}

/// Offline snapshot file: the five sheets in one JSON document, used by the
/// `GTTUI_SNAPSHOT_JSON` mode and the bundled sample dataset.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SnapshotFile {
    #[serde(default)]
    pub tournaments: Vec<WireTournament>,
    #[serde(default)]
    pub teams: Vec<WireTeam>,
    #[serde(default)]
    pub matches: Vec<WireMatch>,
    #[serde(default)]
    pub results: Vec<WireResult>,
    #[serde(default)]
    pub venues: Vec<WireVenue>,
    #[serde(default)]
    pub referees: Vec<WireReferee>,
}

// ---------------------------------------------------------------------------
// Loose scalar coercion
// ---------------------------------------------------------------------------

/// Accept a string, number, or bool where a string is expected; `null`,
/// missing, and structured values become `None`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(string_from_value))
}

/// Accept a whole number or a numeric string where a score is expected;
/// everything else becomes `None` (incomplete result, not an error).
fn loose_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(score_from_value))
}

pub(crate) fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn score_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            // Sheets occasionally hand back integral floats ("2.0").
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(i);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scores_accept_numbers_and_numeric_strings() {
        assert_eq!(score_from_value(&json!(3)), Some(3));
        assert_eq!(score_from_value(&json!("3")), Some(3));
        assert_eq!(score_from_value(&json!(" 2 ")), Some(2));
        assert_eq!(score_from_value(&json!(2.0)), Some(2));
        assert_eq!(score_from_value(&json!("2.0")), Some(2));
    }

    #[test]
    fn scores_reject_everything_else() {
        assert_eq!(score_from_value(&json!("")), None);
        assert_eq!(score_from_value(&json!("n/a")), None);
        assert_eq!(score_from_value(&json!(1.5)), None);
        assert_eq!(score_from_value(&json!(null)), None);
        assert_eq!(score_from_value(&json!([2])), None);
        assert_eq!(score_from_value(&json!(f64::NAN)), None); // serde_json: NaN serializes to null
    }

    #[test]
    fn result_row_with_garbage_scores_still_parses() {
        let raw: WireResult = serde_json::from_value(json!({
            "matchId": 17,
            "homeScore": "abc",
            "awayScore": null,
            "status": "FINISHED"
        }))
        .expect("loose row should never fail to parse");
        assert_eq!(raw.match_id.as_deref(), Some("17"));
        assert_eq!(raw.home_score, None);
        assert_eq!(raw.away_score, None);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let raw: WireTeam = serde_json::from_value(json!({
            "id": 12,
            "tournamentId": "t1",
            "name": "Atlas"
        }))
        .expect("team row should parse");
        assert_eq!(raw.id.as_deref(), Some("12"));
        assert_eq!(raw.group_name, None);
    }

    #[test]
    fn list_envelope_defaults_ok_to_false() {
        let raw: ListResponse<WireTeam> = serde_json::from_str("{}").expect("empty envelope");
        assert!(!raw.ok);
        assert!(raw.rows.is_none());
    }
}
