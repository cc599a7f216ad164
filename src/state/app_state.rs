use crate::app::MenuItem;
use crate::standings::{self, GroupStandings};
use chrono::Local;
use gt_api::{Match, MatchResult, Referee, Team, Tournament, Venue};

// ---------------------------------------------------------------------------
// Fetched data + derived standings
// ---------------------------------------------------------------------------

/// Everything the console knows about the backend right now: the
/// tournament list, the current tournament's snapshot, and the standings
/// derived from it. Standings are recomputed from scratch whenever a new
/// snapshot lands; a fresh snapshot wholesale-replaces the old one, so a
/// stale in-flight refresh can never interleave with a newer load.
#[derive(Debug, Default)]
pub struct DataState {
    pub tournaments: Vec<Tournament>,
    /// Index into `tournaments` of the tournament currently on screen.
    pub selected: usize,
    pub venues: Vec<Venue>,
    pub referees: Vec<Referee>,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub results: Vec<MatchResult>,
    pub standings: Vec<GroupStandings>,
    pub last_refreshed: Option<String>,
}

impl DataState {
    /// Store the tournament list, preferring the previously saved selection
    /// when it still exists, the first tournament otherwise.
    pub fn load_tournaments(
        &mut self,
        tournaments: Vec<Tournament>,
        saved_id: Option<&str>,
    ) {
        self.selected = saved_id
            .and_then(|id| tournaments.iter().position(|t| t.id == id))
            .unwrap_or(0);
        self.tournaments = tournaments;
    }

    pub fn selected_tournament(&self) -> Option<&Tournament> {
        self.tournaments.get(self.selected)
    }

    /// Step the selector forward or backward, wrapping at both ends.
    /// Returns the newly selected tournament id when the selection moved.
    pub fn cycle_tournament(&mut self, step: isize) -> Option<String> {
        let count = self.tournaments.len();
        if count < 2 {
            return None;
        }
        self.selected = (self.selected as isize + step).rem_euclid(count as isize) as usize;
        self.selected_tournament().map(|t| t.id.clone())
    }

    /// Replace the snapshot and recompute standings. The three collections
    /// arrive together or not at all; partial snapshots never reach here.
    pub fn apply_snapshot(
        &mut self,
        teams: Vec<Team>,
        matches: Vec<Match>,
        results: Vec<MatchResult>,
    ) {
        self.standings = standings::compute(&teams, &matches, &results);
        self.teams = teams;
        self.matches = matches;
        self.results = results;
        self.last_refreshed = Some(Local::now().format("%H:%M:%S").to_string());
    }
}

// ---------------------------------------------------------------------------
// Per-view scroll state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ViewState {
    pub scroll_offset: u16,
}

impl ViewState {
    pub fn scroll_down(&mut self, max: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub last_error: Option<String>,
    pub data: DataState,
    pub standings_view: ViewState,
    pub matches_view: ViewState,
    pub teams_view: ViewState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(id: &str) -> Tournament {
        Tournament { id: id.into(), name: id.to_uppercase(), ..Default::default() }
    }

    #[test]
    fn saved_selection_survives_a_reload() {
        let mut data = DataState::default();
        data.load_tournaments(
            vec![tournament("t1"), tournament("t2"), tournament("t3")],
            Some("t2"),
        );
        assert_eq!(data.selected_tournament().unwrap().id, "t2");
    }

    #[test]
    fn unknown_saved_selection_falls_back_to_first() {
        let mut data = DataState::default();
        data.load_tournaments(vec![tournament("t1"), tournament("t2")], Some("gone"));
        assert_eq!(data.selected_tournament().unwrap().id, "t1");
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let mut data = DataState::default();
        data.load_tournaments(vec![tournament("t1"), tournament("t2")], None);
        assert_eq!(data.cycle_tournament(1).as_deref(), Some("t2"));
        assert_eq!(data.cycle_tournament(1).as_deref(), Some("t1"));
        assert_eq!(data.cycle_tournament(-1).as_deref(), Some("t2"));
    }

    #[test]
    fn cycling_a_single_tournament_is_a_no_op() {
        let mut data = DataState::default();
        data.load_tournaments(vec![tournament("t1")], None);
        assert_eq!(data.cycle_tournament(1), None);
        assert_eq!(data.selected, 0);
    }

    #[test]
    fn snapshot_replaces_standings_wholesale() {
        let mut data = DataState::default();
        data.apply_snapshot(
            vec![Team { id: "a".into(), name: "A".into(), group_name: "A".into(), ..Default::default() }],
            vec![],
            vec![],
        );
        assert_eq!(data.standings.len(), 1);
        data.apply_snapshot(vec![], vec![], vec![]);
        assert!(data.standings.is_empty());
        assert!(data.last_refreshed.is_some());
    }
}
