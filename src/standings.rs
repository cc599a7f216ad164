//! Group standings computed from one tournament's teams, matches, and
//! results. A single pure pass: zeroed rows per team, results indexed by
//! match id, finished matches folded in, rows bucketed by group and ranked.
//! Recomputed from scratch on every call — nothing here is persisted.

use gt_api::{Match, MatchResult, Team};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Per-team aggregate row. Freshly allocated per computation and only
/// mutated through [`TeamStats::record`], which keeps the arithmetic
/// invariants intact: `played = wins + draws + losses`, `points = 3*wins +
/// draws`, and `gd` always re-derived from `gf - ga`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub team_id: String,
    pub name: String,
    pub group_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub gf: i64,
    pub ga: i64,
    pub gd: i64,
    pub points: u32,
}

impl TeamStats {
    /// Fold one finished match into this row from one side's perspective.
    fn record(&mut self, scored: i64, conceded: i64) {
        self.played += 1;
        self.gf += scored;
        self.ga += conceded;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += 3;
            }
            Ordering::Equal => {
                self.draws += 1;
                self.points += 1;
            }
            Ordering::Less => {
                self.losses += 1;
            }
        }
        // Always re-derived from the accumulators, never carried separately.
        self.gd = self.gf - self.ga;
    }
}

/// One group's ranked table. The empty label is the "ungrouped" bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupStandings {
    pub group: String,
    pub rows: Vec<TeamStats>,
}

/// Compute ranked group standings for one tournament.
///
/// `teams` and `matches` are expected to be pre-filtered to the tournament;
/// `results` may span everything the backend has — the join runs purely on
/// match id. Incomplete or inconsistent records (missing result, status
/// other than finished, non-numeric score, unresolvable team reference)
/// exclude that match silently; only the caller's failure to supply the
/// three collections at all is an error, and that is the caller's to raise.
pub fn compute(teams: &[Team], matches: &[Match], results: &[MatchResult]) -> Vec<GroupStandings> {
    let (mut table, index) = base_table(teams);
    let results_by_match = result_index(results);

    for m in matches {
        let Some(result) = results_by_match.get(m.id.as_str()) else {
            continue; // not yet played
        };
        // The result's own status wins over the match status when present.
        let status = result.status.unwrap_or(m.status);
        if !status.is_finished() {
            continue;
        }
        let (Some(home_score), Some(away_score)) = (result.home_score, result.away_score) else {
            continue; // half-entered result
        };
        let (Some(&home), Some(&away)) = (
            index.get(m.home_team_id.as_str()),
            index.get(m.away_team_id.as_str()),
        ) else {
            continue; // stale or cross-tournament team reference
        };
        if home == away {
            continue; // a team cannot play itself
        }
        table[home].record(home_score, away_score);
        table[away].record(away_score, home_score);
    }

    partition_and_rank(table)
}

/// Zeroed row per team, keyed by id. Rows keep the team-list order so the
/// whole pipeline stays deterministic; a duplicated id replaces the earlier
/// row with a fresh one (same last-write-wins policy as the result index).
fn base_table(teams: &[Team]) -> (Vec<TeamStats>, HashMap<&str, usize>) {
    let mut table: Vec<TeamStats> = Vec::with_capacity(teams.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(teams.len());
    for team in teams {
        let row = base_stats(team);
        match index.get(team.id.as_str()) {
            Some(&at) => table[at] = row,
            None => {
                index.insert(team.id.as_str(), table.len());
                table.push(row);
            }
        }
    }
    (table, index)
}

fn base_stats(team: &Team) -> TeamStats {
    let name = if team.name.is_empty() {
        team.id.clone()
    } else {
        team.name.clone()
    };
    TeamStats {
        team_id: team.id.clone(),
        name,
        group_name: team.group_name.clone(),
        ..TeamStats::default()
    }
}

/// Index results by match id. Rows without a match id are unusable and
/// skipped; when two rows claim the same match the later one wins.
pub fn result_index(results: &[MatchResult]) -> HashMap<&str, &MatchResult> {
    let mut by_match = HashMap::with_capacity(results.len());
    for result in results {
        if result.match_id.is_empty() {
            continue;
        }
        by_match.insert(result.match_id.as_str(), result);
    }
    by_match
}

/// Bucket rows by group label, then rank inside each bucket. `BTreeMap`
/// hands the groups back in ascending label order; the empty "ungrouped"
/// label sorts ahead of every named group, as the console has always shown
/// it.
fn partition_and_rank(table: Vec<TeamStats>) -> Vec<GroupStandings> {
    let mut groups: BTreeMap<String, Vec<TeamStats>> = BTreeMap::new();
    for row in table {
        groups.entry(row.group_name.clone()).or_default().push(row);
    }
    groups
        .into_iter()
        .map(|(group, mut rows)| {
            rows.sort_by(rank_order);
            GroupStandings { group, rows }
        })
        .collect()
}

/// The tie-break cascade: points, then goal difference, then goals for,
/// all descending; name ascending settles what is left. Case-folded name
/// comparison first, exact comparison last, so the order is total even for
/// names differing only in case.
fn rank_order(a: &TeamStats, b: &TeamStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.gd.cmp(&a.gd))
        .then_with(|| b.gf.cmp(&a.gf))
        .then_with(|| compare_names(&a.name, &b.name))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
