use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use gt_api::{Match, MatchResult, Referee, Team, Tournament, Venue};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Matches,
    Teams,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

/// Session scraps worth keeping between runs — just the tournament the
/// user was looking at (the web console kept this in localStorage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedSession {
    pub current_tournament_id: String,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Store the tournament list and pick the selection. Returns the id to
    /// load standings for, if there is any tournament at all.
    pub fn on_tournaments_loaded(
        &mut self,
        tournaments: Vec<Tournament>,
        venues: Vec<Venue>,
        referees: Vec<Referee>,
    ) -> Option<String> {
        self.state.last_error = None;
        let saved = self.load_session().map(|s| s.current_tournament_id);
        self.state.data.load_tournaments(tournaments, saved.as_deref());
        self.state.data.venues = venues;
        self.state.data.referees = referees;
        self.state.data.selected_tournament().map(|t| t.id.clone())
    }

    pub fn on_standings_data(
        &mut self,
        tournament_id: String,
        teams: Vec<Team>,
        matches: Vec<Match>,
        results: Vec<MatchResult>,
    ) {
        // A late response for a tournament the user has already moved away
        // from is stale. Discard it rather than overwrite the fresh view.
        if self
            .state
            .data
            .selected_tournament()
            .is_some_and(|t| t.id != tournament_id)
        {
            log::debug!("discarding stale standings snapshot for {tournament_id}");
            return;
        }
        self.state.last_error = None;
        self.state.data.apply_snapshot(teams, matches, results);
        self.state.standings_view.scroll_offset = 0;
        self.state.matches_view.scroll_offset = 0;
        self.state.teams_view.scroll_offset = 0;
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Tournament selection
    // -----------------------------------------------------------------------

    /// Move the tournament selector and persist the choice. Returns the new
    /// tournament id so the caller can request its standings.
    pub fn cycle_tournament(&mut self, step: isize) -> Option<String> {
        let next = self.state.data.cycle_tournament(step)?;
        let _ = self.save_session();
        Some(next)
    }

    pub fn selected_tournament_id(&self) -> Option<String> {
        self.state.data.selected_tournament().map(|t| t.id.clone())
    }

    // -----------------------------------------------------------------------
    // Scrolling — delegated to the active view
    // -----------------------------------------------------------------------

    pub fn scroll_down(&mut self) {
        let max = self.active_view_length().saturating_sub(1);
        match self.state.active_tab {
            MenuItem::Standings => self.state.standings_view.scroll_down(max),
            MenuItem::Matches => self.state.matches_view.scroll_down(max),
            MenuItem::Teams => self.state.teams_view.scroll_down(max),
            MenuItem::Help => {}
        }
    }

    pub fn scroll_up(&mut self) {
        match self.state.active_tab {
            MenuItem::Standings => self.state.standings_view.scroll_up(),
            MenuItem::Matches => self.state.matches_view.scroll_up(),
            MenuItem::Teams => self.state.teams_view.scroll_up(),
            MenuItem::Help => {}
        }
    }

    fn active_view_length(&self) -> u16 {
        let data = &self.state.data;
        let lines = match self.state.active_tab {
            // Group title + header + rows + trailing blank, per group.
            MenuItem::Standings => data
                .standings
                .iter()
                .map(|g| g.rows.len() + 3)
                .sum::<usize>(),
            MenuItem::Matches => data.matches.len(),
            MenuItem::Teams => data.teams.len(),
            MenuItem::Help => 0,
        };
        lines.min(u16::MAX as usize) as u16
    }

    // -----------------------------------------------------------------------
    // Session persistence
    // -----------------------------------------------------------------------

    pub fn save_session(&self) -> Result<(), String> {
        let Some(id) = self.selected_tournament_id() else {
            return Ok(());
        };
        let session = SavedSession { current_tournament_id: id };
        let path = session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
        }
        let payload = serde_json::to_string_pretty(&session)
            .map_err(|e| format!("serialize session failed: {e}"))?;
        std::fs::write(&path, payload).map_err(|e| format!("write session failed: {e}"))?;
        Ok(())
    }

    pub fn load_session(&self) -> Option<SavedSession> {
        let content = std::fs::read_to_string(session_path()).ok()?;
        serde_json::from_str(&content).ok()
    }
}

fn session_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("gttui").join("session.json");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join("gttui")
            .join("session.json");
    }
    PathBuf::from("gttui_session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(id: &str) -> Tournament {
        Tournament { id: id.into(), name: id.into(), ..Default::default() }
    }

    #[test]
    fn tournaments_loaded_hands_back_an_id_to_fetch() {
        let mut app = App::new();
        let next = app.on_tournaments_loaded(
            vec![tournament("t1"), tournament("t2")],
            vec![],
            vec![],
        );
        assert!(next.is_some());
        assert!(app.selected_tournament_id().is_some());
    }

    #[test]
    fn empty_tournament_list_requests_nothing() {
        let mut app = App::new();
        assert_eq!(app.on_tournaments_loaded(vec![], vec![], vec![]), None);
    }

    #[test]
    fn stale_snapshot_for_another_tournament_is_dropped() {
        let mut app = App::new();
        app.on_tournaments_loaded(vec![tournament("t1"), tournament("t2")], vec![], vec![]);
        app.state.data.selected = 0;
        app.on_standings_data(
            "t2".into(),
            vec![Team { id: "a".into(), ..Default::default() }],
            vec![],
            vec![],
        );
        assert!(app.state.data.teams.is_empty(), "t2 data must not land while t1 is selected");

        app.on_standings_data("t1".into(), vec![], vec![], vec![]);
        assert!(app.state.data.last_refreshed.is_some());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = App::new();
        app.update_tab(MenuItem::Matches);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Matches);
    }
}
